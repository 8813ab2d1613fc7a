use dotenvy::dotenv;
use s3share::{LocalFileSystem, ProcessEnvironment, S3Connector, ShareError, ShareService};
use std::process::ExitCode;
use std::sync::Arc;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();

    // Logs go to stderr, stdout only carries URLs
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "s3share=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let service = ShareService::new(
        Arc::new(ProcessEnvironment),
        Arc::new(S3Connector),
        Arc::new(LocalFileSystem),
    );

    let mut stdout = std::io::stdout();
    let result = tokio::select! {
        res = service.run(&mut stdout) => res,
        _ = shutdown_signal() => Err(ShareError::Cancelled),
    };

    match result {
        Ok(outcomes) => {
            let uploaded = outcomes.iter().filter(|o| o.transferred).count();
            info!(
                "🏁 Done: {} uploaded, {} already shared",
                uploaded,
                outcomes.len() - uploaded
            );
            ExitCode::SUCCESS
        }
        Err(ShareError::Cli(e)) => e.exit(),
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!("failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                warn!("failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("⌨️  Ctrl+C received, cancelling...");
        },
        _ = terminate => {
            info!("💤 SIGTERM received, cancelling...");
        },
    }
}
