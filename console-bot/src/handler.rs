use crate::Message;
use bot_utils::CommandResult;
use std::time::Duration;
use tokio::io::{AsyncWrite, AsyncWriteExt};

mod help;
use help::{LONG_HELP, SHORT_HELP};
mod roll;
use roll::roll;

fn format_duration(duration: Duration) -> String {
    let total = duration.as_secs();
    let (days, hours, minutes, seconds) = (
        total / 86_400,
        total / 3_600 % 24,
        total / 60 % 60,
        total % 60,
    );
    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, seconds)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

pub fn reply_text(response: &CommandResult) -> String {
    match response {
        CommandResult::Roll(result) => roll(result),
        CommandResult::Ping => "Pong!".to_string(),
        CommandResult::Help => SHORT_HELP.to_string(),
        CommandResult::LongHelp => LONG_HELP.to_string(),
        CommandResult::Uptime(uptime) => format!("/me has been up for {}", format_duration(*uptime)),
        CommandResult::Kill => "/me dies".to_string(),
        CommandResult::Restart => "/me restarts".to_string(),
    }
}

pub(crate) async fn respond<W: AsyncWrite + Unpin>(
    writer: &mut W,
    message: &Message,
    response: CommandResult,
) {
    let mut reply = String::new();
    for line in reply_text(&response).lines() {
        reply.push_str(&format!("[#{}] {}\n", message.id, line));
    }
    if let Err(err) = writer.write_all(reply.as_bytes()).await {
        log::warn!("Unable to reply to message {}: {}", message.id, err)
    } else if let Err(err) = writer.flush().await {
        log::warn!("Unable to flush reply to message {}: {}", message.id, err)
    }
}
