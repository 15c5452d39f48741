//! Terminal rendering of verdicts, plus the state the page used to keep: the last verdict and
//! the claim in the share link.

pub mod interactive;
pub mod share;
pub mod store;

use std::io::{self, Write};
use std::sync::Arc;

use mochi_wallet_provider::{HttpWalletProvider, WalletProvider};
use url::Url;

use crate::core::{GenLayerClientFactory, WalletSession};
use crate::types::params::MochiParams;
use crate::types::{Verdict, VerdictResult};
use crate::verifier::FactVerifier;
use crate::{FactCheckError, FactCheckResult};

pub use share::{claim_from_url, share_url};
pub use store::LastVerdictStore;

const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const DIM: &str = "\x1b[90m";
const ERROR_COLOR: &str = "\x1b[31m";

fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::True => "\x1b[32m",
        Verdict::False => "\x1b[31m",
        Verdict::Partial => "\x1b[33m",
        Verdict::Unknown => "\x1b[90m",
    }
}

/// `0x1234…abcd`, addresses too short to shorten are returned unchanged.
pub fn short_address(address: &str) -> String {
    let chars: Vec<char> = address.chars().collect();
    if chars.len() <= 10 {
        return address.to_string();
    }
    let head: String = chars[..6].iter().collect();
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{head}…{tail}")
}

pub fn render_verdict(out: &mut impl Write, result: &VerdictResult, color: bool) -> io::Result<()> {
    let (paint, bold, dim, reset) =
        if color { (verdict_color(result.verdict), BOLD, DIM, RESET) } else { ("", "", "", "") };
    let verdict = result.verdict.to_string().to_uppercase();

    writeln!(out, "{dim}Verdict{reset}      {bold}{paint}{verdict}{reset}")?;
    writeln!(out, "{dim}Confidence{reset}   {}%", result.confidence)?;
    if !result.explanation.is_empty() {
        writeln!(out, "{dim}Explanation{reset}  {}", result.explanation)?;
    }
    Ok(())
}

pub fn render_error(out: &mut impl Write, error: &FactCheckError, color: bool) -> io::Result<()> {
    let (paint, reset) = if color { (ERROR_COLOR, RESET) } else { ("", "") };
    writeln!(out, "{paint}{}{reset}", error_message(error))
}

/// What the user is told for each failure.
pub fn error_message(error: &FactCheckError) -> String {
    match error {
        FactCheckError::NotConnected => "Connect your wallet before asking Mochi.".to_string(),
        FactCheckError::ProviderMissing => {
            "No wallet provider is configured, set MOCHI_WALLET_PROVIDER_URL.".to_string()
        }
        FactCheckError::NoAccounts => "The wallet did not share any account.".to_string(),
        FactCheckError::EmptyClaim => "Type a cat fact first.".to_string(),
        FactCheckError::MisconfiguredTarget(reason) => format!("Mochi is not set up correctly: {reason}."),
        FactCheckError::FinalizationTimeout { hash, .. } => {
            format!("The network did not finalize the request in time (transaction {hash}).")
        }
        FactCheckError::ConsensusNotReached { .. } => {
            "Consensus was not reached. Validators could not agree on the result.".to_string()
        }
        FactCheckError::TransactionCanceled(hash) => format!("Transaction {hash} was canceled."),
        FactCheckError::MissingLeaderReceipt(_) => "The network did not return a result for this claim.".to_string(),
        FactCheckError::MalformedPayload(_) => "Contract returned invalid JSON format.".to_string(),
        FactCheckError::WalletProvider(e) if e.is_user_rejection() => {
            "The request was rejected in the wallet.".to_string()
        }
        other => other.to_string(),
    }
}

/// Everything a command needs: the verifier (and through it the wallet session), the store and
/// the share link base.
pub struct Presenter {
    verifier: FactVerifier,
    store: LastVerdictStore,
    share_base: Url,
    color: bool,
}

impl Presenter {
    pub fn new(verifier: FactVerifier, store: LastVerdictStore, share_base: Url, color: bool) -> Self {
        Self { verifier, store, share_base, color }
    }

    /// Wires the wallet, the GenLayer client factory and the store from validated options.
    pub fn from_params(params: &MochiParams, color: bool) -> FactCheckResult<Self> {
        let wallet: Option<Arc<dyn WalletProvider>> = match &params.wallet.provider_url {
            Some(url) => Some(Arc::new(HttpWalletProvider::new(url.clone())?)),
            None => None,
        };
        let session = Arc::new(WalletSession::new(wallet.clone()));
        let factory = Arc::new(GenLayerClientFactory::new(params.network.network.clone(), wallet)?);
        let verifier =
            FactVerifier::new(session, factory, params.network.contract_address.clone(), params.finality.clone());

        Ok(Self::new(verifier, LastVerdictStore::new(&params.storage.data_dir), params.share.base_url.clone(), color))
    }

    pub async fn connect(&self, out: &mut impl Write) -> FactCheckResult<()> {
        match self.verifier.session().connect().await {
            Ok(account) => {
                writeln!(out, "Connected as {}", short_address(&account.to_string()))?;
                Ok(())
            }
            Err(e) => self.fail(out, e),
        }
    }

    pub fn disconnect(&self, out: &mut impl Write) -> FactCheckResult<()> {
        self.verifier.session().clear();
        writeln!(out, "Wallet disconnected.")?;
        Ok(())
    }

    /// Verifies `claim`, shows and keeps the verdict. Failures are shown and returned.
    ///
    /// The previous verdict is dropped up front, a failed ask leaves nothing stored.
    pub async fn ask(&self, claim: &str, out: &mut impl Write) -> FactCheckResult<VerdictResult> {
        let claim = claim.trim();
        self.store.clear()?;
        if let Some(account) = self.verifier.session().cached_address() {
            writeln!(out, "Asking Mochi as {}...", short_address(&account.to_string()))?;
        }

        match self.verifier.verify_fact(claim).await {
            Ok(result) => {
                render_verdict(out, &result, self.color)?;
                self.store.save(&result)?;
                writeln!(out, "Share: {}", share_url(&self.share_base, claim))?;
                Ok(result)
            }
            Err(e) => self.fail(out, e),
        }
    }

    pub fn last(&self, out: &mut impl Write) -> FactCheckResult<Option<VerdictResult>> {
        let last = self.store.load()?;
        match &last {
            Some(result) => render_verdict(out, result, self.color)?,
            None => writeln!(out, "No verdict yet.")?,
        }
        Ok(last)
    }

    pub fn clear(&self, out: &mut impl Write) -> FactCheckResult<()> {
        self.store.clear()?;
        writeln!(out, "Last verdict cleared.")?;
        Ok(())
    }

    pub fn share(&self, claim: &str, out: &mut impl Write) -> FactCheckResult<Url> {
        let url = share_url(&self.share_base, claim);
        writeln!(out, "{url}")?;
        Ok(url)
    }

    fn fail<T>(&self, out: &mut impl Write, error: FactCheckError) -> FactCheckResult<T> {
        render_error(out, &error, self.color)?;
        Err(error)
    }
}
