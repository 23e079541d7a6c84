use std::io::IsTerminal;

use chrono::Local;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use buildnotify::cli::Cli;
use buildnotify::config::Config;
use buildnotify::message::render;
use buildnotify::sink::{deliver, Delivery, WebhookSink};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("error")),
        )
        .with_writer(std::io::stderr)
        .with_ansi(std::io::stderr().is_terminal())
        .with_target(false)
        .init();

    // Endpoint must be known before the command line is even looked at.
    let config = Config::load()?;
    let request = Cli::parse().into_request();

    let message = render(&request, &Local::now());
    tracing::debug!(status = ?request.status, "rendered notification");

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let sink = WebhookSink::new(&config);

    // Delivery failures are reported but still exit 0.
    match rt.block_on(deliver(&sink, &message)) {
        Delivery::Sent => println!("Notification sent successfully!"),
        Delivery::Failed { reason } => println!("Failed to send notification: {reason}"),
    }
    Ok(())
}
