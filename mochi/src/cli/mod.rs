use clap::{Parser, Subcommand};
use url::Url;

pub mod network;
pub mod poll;
pub mod share;
pub mod storage;
pub mod wallet;

#[derive(Parser, Debug)]
#[command(
    name = "mochi",
    version,
    about = "Mochi - ask a GenLayer intelligent contract whether a cat fact is true",
    long_about = "Mochi submits a claim to a fact checking intelligent contract on GenLayer, waits for the \
    validators to finalize it and prints their verdict.\n\n\
    Quick Start:\n  \
    mochi connect\n  \
    mochi ask \"Cats sleep for around 13 to 16 hours a day\"",
    after_help = "Examples:\n  \
    mochi ask --from-url 'http://localhost:3000/?fact=Cats+have+five+toes'\n  \
    mochi last\n  \
    mochi interactive"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[clap(flatten)]
    pub run_args: RunCmd,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Ask the wallet for an account and remember it for this run
    Connect,
    /// Verify a claim, show the verdict and keep it as the last result
    Ask {
        #[command(flatten)]
        ask_command: AskCmd,
    },
    /// Show the last verdict
    Last,
    /// Forget the last verdict
    Clear,
    /// Print the share link for a claim
    Share {
        /// The claim to share
        claim: String,
    },
    /// Read claims line by line, keeping the wallet connected between them
    #[command(long_about = "Start a line oriented session.\n\n\
        Every line is a claim, except for the commands:\n  \
        :connect     connect the wallet\n  \
        :disconnect  forget the connected account\n  \
        :last        show the last verdict\n  \
        :clear       forget the last verdict\n  \
        :quit        leave the session")]
    Interactive,
}

#[derive(clap::Args, Debug, Clone)]
#[group(required = true, multiple = false)]
pub struct AskCmd {
    /// The claim to verify
    pub claim: Option<String>,

    /// Read the claim from the `fact` query parameter of a share link
    #[arg(long, value_name = "URL")]
    pub from_url: Option<Url>,
}

/// Options shared by every command
#[derive(clap::Args, Debug, Clone)]
pub struct RunCmd {
    #[clap(flatten)]
    pub network_args: network::NetworkCliArgs,

    #[clap(flatten)]
    pub wallet_args: wallet::WalletCliArgs,

    #[clap(flatten)]
    pub poll_args: poll::PollCliArgs,

    #[clap(flatten)]
    pub storage_args: storage::StorageCliArgs,

    #[clap(flatten)]
    pub share_args: share::ShareCliArgs,
}

#[cfg(test)]
mod tests {
    use clap::Parser as _;
    use rstest::rstest;

    use super::*;

    #[test]
    fn defaults_point_at_studionet() {
        let cli = Cli::try_parse_from(["mochi", "last"]).unwrap();

        assert!(matches!(cli.command, Commands::Last));
        assert_eq!(cli.run_args.network_args.rpc_url.as_str(), "https://studio.genlayer.com/api");
        assert_eq!(cli.run_args.network_args.chain_id, 61999);
        assert_eq!(cli.run_args.poll_args.finality_retries, 100);
        assert_eq!(cli.run_args.poll_args.finality_interval_ms, 2000);
    }

    #[rstest]
    #[case(&["mochi", "ask", "Cats purr"])]
    #[case(&["mochi", "ask", "--from-url", "http://localhost:3000/?fact=Cats"])]
    fn ask_takes_a_claim_or_a_link(#[case] args: &[&str]) {
        let cli = Cli::try_parse_from(args).unwrap();
        assert!(matches!(cli.command, Commands::Ask { .. }));
    }

    #[rstest]
    #[case(&["mochi", "ask"])]
    #[case(&["mochi", "ask", "Cats purr", "--from-url", "http://localhost:3000/?fact=Cats"])]
    fn ask_needs_exactly_one_source(#[case] args: &[&str]) {
        assert!(Cli::try_parse_from(args).is_err());
    }

    #[test]
    fn options_come_before_the_command() {
        let cli = Cli::try_parse_from([
            "mochi",
            "--contract-address",
            "0x2222222222222222222222222222222222222222",
            "--finality-retries",
            "3",
            "connect",
        ])
        .unwrap();

        assert_eq!(
            cli.run_args.network_args.contract_address.as_deref(),
            Some("0x2222222222222222222222222222222222222222")
        );
        assert_eq!(cli.run_args.poll_args.finality_retries, 3);
    }

    #[test]
    fn options_may_follow_the_command() {
        let cli = Cli::try_parse_from([
            "mochi",
            "ask",
            "Cats purr",
            "--contract-address",
            "0x2222222222222222222222222222222222222222",
            "--data-dir",
            "/tmp/mochi",
        ])
        .unwrap();

        assert!(matches!(cli.command, Commands::Ask { ref ask_command } if ask_command.claim.as_deref() == Some("Cats purr")));
        assert_eq!(
            cli.run_args.network_args.contract_address.as_deref(),
            Some("0x2222222222222222222222222222222222222222")
        );
        assert_eq!(cli.run_args.storage_args.data_dir, std::path::PathBuf::from("/tmp/mochi"));
    }
}
