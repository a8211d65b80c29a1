use std::io::IsTerminal;
use std::process::ExitCode;
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;
use youtube_live_manifest::{Config, RunError, RunSummary, run};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .init();

    match try_main().await {
        Ok(RunSummary {
            lines,
            resolved,
            live_videos,
        }) => {
            tracing::info!(lines, resolved, live_videos, "done");
            ExitCode::SUCCESS
        }
        Err(e) => {
            let code = e.exit_code();
            tracing::error!("{:#}", eyre::Report::new(e));
            ExitCode::from(code)
        }
    }
}

async fn try_main() -> Result<RunSummary, RunError> {
    // credential first: a missing key must fail before the input file is even looked at
    let config = Config::from_env()?;
    tracing::debug!(?config, "loaded configuration");
    run(&config).await
}
