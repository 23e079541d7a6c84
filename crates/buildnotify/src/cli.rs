use clap::Parser;

use crate::message::{NotificationRequest, Status};

/// Buildnotify – send build status notifications to a chat webhook
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Build status
    #[arg(long, value_enum)]
    pub status: Status,

    /// Build start time as a unix timestamp (seconds)
    #[arg(long, value_name = "TIMESTAMP", value_parser = parse_start_time)]
    pub start_time: Option<f64>,

    /// Number of warnings
    #[arg(long, default_value_t = 0)]
    pub warnings: u64,

    /// Number of errors
    #[arg(long, default_value_t = 0)]
    pub errors: u64,

    /// Optional message appended to the notification
    #[arg(long, default_value = "")]
    pub message: String,
}

impl Cli {
    pub fn into_request(self) -> NotificationRequest {
        NotificationRequest {
            status: self.status,
            start_time: self.start_time,
            warnings: self.warnings,
            errors: self.errors,
            message: self.message,
        }
    }
}

fn parse_start_time(raw: &str) -> Result<f64, String> {
    let value: f64 = raw.parse().map_err(|e| format!("{e}"))?;
    if !value.is_finite() {
        return Err("must be a finite unix timestamp".to_string());
    }
    Ok(value)
}

/// Render the roff man page for the command line into `out`.
#[cfg(feature = "man")]
pub fn write_man_page(out: &mut dyn std::io::Write) -> std::io::Result<()> {
    use clap::CommandFactory;

    let cmd = Cli::command().name("buildnotify");
    clap_mangen::Man::new(cmd).render(out)
}
