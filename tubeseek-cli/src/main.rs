//! Tubeseek - search YouTube from the terminal and download what you pick.

use std::sync::Arc;

use anyhow::bail;
use clap::Parser;
use console::style;
use tubeseek_cli::{Cli, SessionController, SessionOutcome, TerminalConsole};
use tubeseek_core::tracing_setup::{init_tracing, log_file_path};
use tubeseek_core::{TubeseekConfig, TubeseekError, YtDlpDispatcher, ensure_output_dir};
use tubeseek_search::SearchService;

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = cli.apply(TubeseekConfig::from_env());

    if let Err(source) = init_tracing(cli.log_level.as_tracing_level(), Some(cli.logs_dir.as_path())) {
        let path = log_file_path(Some(cli.logs_dir.as_path()));
        bail!(TubeseekError::Logging { path, source }.user_message());
    }
    tracing::info!(
        "Starting tubeseek v{} in {} mode using the {} provider",
        env!("CARGO_PKG_VERSION"),
        config.mode,
        config.mode.provider_name()
    );

    if let Err(e) = ensure_output_dir(&config.download.output_dir) {
        tracing::error!("{e}");
        bail!(TubeseekError::from(e).user_message());
    }

    let search = SearchService::from_config(&config)?;
    let dispatcher = Arc::new(YtDlpDispatcher::from_config(&config.download));
    let mut session =
        SessionController::new(TerminalConsole::new(), search, dispatcher.clone(), &config);

    let outcome = match session.run().await {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Session ended: {e}");
            bail!(e.user_message());
        }
    };

    if let SessionOutcome::Downloading(request) = outcome {
        let finished = dispatcher.wait_all().await;
        tracing::info!("{finished} download(s) finished for {}", request.url);
        println!("{}", style("done.").green().bold());
    }

    Ok(())
}
