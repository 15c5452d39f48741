use std::str::FromStr;
use std::sync::{Arc, PoisonError, RwLock};

use alloy_primitives::Address;
use mochi_wallet_provider::{parse_accounts, WalletProvider, METHOD_ACCOUNTS, METHOD_REQUEST_ACCOUNTS};
use tracing::{debug, info};

use crate::{FactCheckError, FactCheckResult};

/// The user's wallet identity.
///
/// Holds at most one account address. It is set by [`WalletSession::connect`] or by the first
/// successful [`WalletSession::current_address`] lookup and dropped by [`WalletSession::clear`].
pub struct WalletSession {
    provider: Option<Arc<dyn WalletProvider>>,
    account: RwLock<Option<Address>>,
}

impl WalletSession {
    pub fn new(provider: Option<Arc<dyn WalletProvider>>) -> Self {
        Self { provider, account: RwLock::new(None) }
    }

    /// Asks the wallet for access, this may prompt the user.
    pub async fn connect(&self) -> FactCheckResult<Address> {
        let provider = self.provider.as_ref().ok_or(FactCheckError::ProviderMissing)?;
        info!(log_type = "starting", category = "wallet", "Requesting wallet accounts.");

        let accounts = parse_accounts(METHOD_REQUEST_ACCOUNTS, provider.request(METHOD_REQUEST_ACCOUNTS, vec![]).await?)?;
        let account = first_account(&accounts)?.ok_or(FactCheckError::NoAccounts)?;
        self.set(Some(account));

        info!(log_type = "completed", category = "wallet", account = %account, "Wallet connected.");
        Ok(account)
    }

    /// Cached address, otherwise whatever the wallet has already authorized, without prompting.
    pub async fn current_address(&self) -> FactCheckResult<Option<Address>> {
        if let Some(account) = self.cached_address() {
            return Ok(Some(account));
        }
        let Some(provider) = self.provider.as_ref() else {
            debug!("No wallet provider configured, no identity");
            return Ok(None);
        };

        let accounts = parse_accounts(METHOD_ACCOUNTS, provider.request(METHOD_ACCOUNTS, vec![]).await?)?;
        let account = first_account(&accounts)?;
        if let Some(account) = account {
            debug!(account = %account, "Using already authorized wallet account");
            self.set(Some(account));
        }
        Ok(account)
    }

    pub fn cached_address(&self) -> Option<Address> {
        *self.account.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// Forgets the account. Chain handles are built per request, so nothing else needs resetting.
    pub fn clear(&self) {
        self.set(None);
        info!(category = "wallet", "Wallet session cleared.");
    }

    fn set(&self, account: Option<Address>) {
        *self.account.write().unwrap_or_else(PoisonError::into_inner) = account;
    }
}

fn first_account(accounts: &[String]) -> FactCheckResult<Option<Address>> {
    accounts
        .first()
        .map(|raw| Address::from_str(raw).map_err(|_| FactCheckError::InvalidAccount(raw.clone())))
        .transpose()
}
