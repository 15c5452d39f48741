use std::io::{self, IsTerminal as _, Write};
use std::process::ExitCode;

use clap::Parser as _;
use dotenvy::dotenv;
use mochi::cli::{AskCmd, Cli, Commands};
use mochi::presenter::interactive::run_interactive;
use mochi::presenter::{claim_from_url, Presenter};
use mochi::types::params::MochiParams;
use mochi::utils::logging::init_logging;
use mochi::{FactCheckError, FactCheckResult};
use tokio::io::BufReader;
use tracing::{debug, error, info};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    if let Err(e) = init_logging() {
        // No subscriber to report through
        let _ = writeln!(io::stderr(), "{e}");
        return ExitCode::FAILURE;
    }
    let cli = Cli::parse();
    debug!("Executing {:?}", cli.command);

    let mut stdout = io::stdout();
    match run(cli, &mut stdout).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!(
                error = %e,
                error_chain = ?e,
                "Mochi command failed"
            );
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli, out: &mut impl Write) -> FactCheckResult<()> {
    let params = MochiParams::try_from(cli.run_args)?;
    let presenter = Presenter::from_params(&params, io::stdout().is_terminal())?;
    info!(
        network = %params.network.network.name,
        rpc_url = %params.network.network.rpc_url,
        "Mochi ready"
    );

    match cli.command {
        Commands::Connect => presenter.connect(out).await,
        Commands::Ask { ask_command } => {
            let claim = resolve_claim(ask_command)?;
            let finished = tokio::select! {
                result = presenter.ask(&claim, out) => Some(result),
                _ = tokio::signal::ctrl_c() => None,
            };
            match finished {
                Some(result) => result.map(|_| ()),
                None => {
                    info!("Request abandoned");
                    writeln!(out, "Request abandoned.")?;
                    Ok(())
                }
            }
        }
        Commands::Last => presenter.last(out).map(|_| ()),
        Commands::Clear => presenter.clear(out),
        Commands::Share { claim } => presenter.share(&claim, out).map(|_| ()),
        Commands::Interactive => run_interactive(&presenter, BufReader::new(tokio::io::stdin()), out).await,
    }
}

fn resolve_claim(ask_command: AskCmd) -> FactCheckResult<String> {
    match (ask_command.claim, ask_command.from_url) {
        (Some(claim), _) => Ok(claim),
        (None, Some(url)) => claim_from_url(&url)
            .ok_or_else(|| FactCheckError::Config(format!("{url} does not carry a `fact` parameter"))),
        (None, None) => Err(FactCheckError::EmptyClaim),
    }
}
