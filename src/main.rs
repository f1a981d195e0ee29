use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use console::Term;
use tracing::info;
use tracing_subscriber::EnvFilter;

use sheetdash::cli::{Action, Cli, Command};
use sheetdash::config::DashboardConfig;
use sheetdash::session::{ReadinessTracker, SessionController, initialize_clients};
use sheetdash::sheets::SheetsClient;
use sheetdash::ui::{Activity, TerminalView};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let config = DashboardConfig::load()?;

    match cli.command {
        Command::Run { out } => run(config, out).await,
        Command::Config => {
            for (key, value) in config.summary() {
                println!("{key:>16}: {value}");
            }
            Ok(())
        }
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "sheetdash=debug" } else { "sheetdash=info,warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(config: DashboardConfig, out: PathBuf) -> Result<()> {
    config.validate()?;
    info!(out = %out.display(), "starting dashboard");

    let mut view = TerminalView::new(out);
    let tracker = ReadinessTracker::new();
    let sheets = SheetsClient::new(&config)?;

    let activity = Activity::start("Initializing clients");
    let identity = match initialize_clients(&config, &sheets, &tracker, &mut view).await {
        Ok(identity) => {
            activity.succeed("Clients initialized");
            identity
        }
        Err(e) => {
            activity.fail("Initialization failed");
            return Err(e.into());
        }
    };

    let mut session = SessionController::new(identity, sheets, view);
    loop {
        session.view().print_menu(session.state());
        let line = tokio::task::spawn_blocking(|| Term::stdout().read_line()).await??;
        match Action::parse(&line) {
            Some(Action::Authorize) => {
                let outcome = session.authorize().await;
                session.view().report(&outcome);
            }
            Some(Action::SignOut) => {
                if !session.sign_out() {
                    println!("  Not signed in");
                }
            }
            Some(Action::Quit) => break,
            None => println!("  Unknown action: {}", line.trim()),
        }
    }

    info!(page = %session.view().out().display(), "dashboard closed");
    Ok(())
}
