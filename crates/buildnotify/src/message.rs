use chrono::{DateTime, Local};
use clap::ValueEnum;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lifecycle point of the build being reported on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Status {
    Start,
    Success,
    Failure,
}

impl Status {
    fn header(self) -> &'static str {
        match self {
            Status::Start => "🔄 **Build Started**",
            Status::Success => "🎉 **Build Successful!**",
            Status::Failure => "❌ **Build Failed!**",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub status: Status,
    /// Unix timestamp in seconds.
    pub start_time: Option<f64>,
    pub warnings: u64,
    pub errors: u64,
    pub message: String,
}

/// Text body posted to the webhook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedMessage(String);

impl RenderedMessage {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Minutes elapsed since `start_time`. A missing (or zero) start time yields 0.
pub fn duration_minutes(start_time: Option<f64>, now_secs: f64) -> f64 {
    match start_time {
        Some(start) if start != 0.0 => (now_secs - start) / 60.0,
        _ => 0.0,
    }
}

/// Render the notification for `request` as of `now`.
pub fn render(request: &NotificationRequest, now: &DateTime<Local>) -> RenderedMessage {
    let stamp = now.format(TIMESTAMP_FORMAT);
    let mut lines = vec![format!("{} at {}", request.status.header(), stamp)];

    if request.status != Status::Start {
        let now_secs = now.timestamp_millis() as f64 / 1000.0;
        let minutes = duration_minutes(request.start_time, now_secs);
        lines.push(format!("🕒 **Duration:** {minutes:.2} minutes"));
        lines.push(format!("⚠️ **Warnings:** {}", request.warnings));
        lines.push(format!("❌ **Errors:** {}", request.errors));
    }

    if !request.message.is_empty() {
        lines.push(format!("📋 **Message:** {}", request.message));
    }

    RenderedMessage(lines.join("\n"))
}
