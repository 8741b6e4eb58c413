pub use roller_dice::{Limits, RollResult, SyntaxError};

pub mod bot_manager;
pub mod bots;
pub mod commands;
pub mod config;
pub mod rolls;

pub use bot_manager::{BotManager, StopListener};
pub use bots::{Bot, BotBuilder, BotExit};
pub use config::BotConfig;

use rolls::RollExecutor;
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

#[derive(Debug, PartialEq, Eq)]
pub enum CommandResult {
    Roll(Result<RollResult, SyntaxError>),
    Ping,
    Help,
    LongHelp,
    Uptime(Duration),
    Kill,
    Restart,
}

/// Per-bot handle that turns incoming messages into command results.
#[derive(Clone)]
pub struct ClientUtils {
    roll: Arc<RollExecutor>,
    nick: Arc<str>,
    started: Instant,
}

impl ClientUtils {
    pub fn new<S: Into<Arc<str>>>(roll: Arc<RollExecutor>, nick: S) -> ClientUtils {
        ClientUtils {
            roll,
            nick: nick.into(),
            started: Instant::now(),
        }
    }

    pub fn nick(&self) -> &str {
        &self.nick
    }

    /// `None` if the message is not addressed to the bot.
    pub async fn eval(&self, message: &str) -> Option<CommandResult> {
        match commands::parse_logging(message, &self.nick) {
            Some(command) => Some(match command {
                commands::Command::Roll(args) => CommandResult::Roll(self.roll.roll(&args).await),
                commands::Command::Ping => CommandResult::Ping,
                commands::Command::Help => CommandResult::Help,
                commands::Command::LongHelp => CommandResult::LongHelp,
                commands::Command::Uptime => CommandResult::Uptime(self.started.elapsed()),
                commands::Command::Kill => CommandResult::Kill,
                commands::Command::Restart => CommandResult::Restart,
            }),
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::watch;

    async fn utils() -> (watch::Sender<bool>, ClientUtils) {
        let (stop_sender, stop) = watch::channel(false);
        let (_handle, roll) =
            RollExecutor::new(Limits::default(), Duration::from_secs(300), stop).await;
        (stop_sender, ClientUtils::new(Arc::new(roll), "Roller"))
    }

    #[tokio::test]
    async fn test_eval_roll() {
        let (_stop, utils) = utils().await;
        match utils.eval("!roll 0d20 + 4 initiative").await {
            Some(CommandResult::Roll(Ok(result))) => {
                assert_eq!(result.to_string(), "4: () + 4 initiative")
            }
            other => panic!("unexpected result {:?}", other),
        }
        assert_eq!(
            utils.eval("/r 2x6").await,
            Some(CommandResult::Roll(Err(SyntaxError::at("2x6"))))
        );
    }

    #[tokio::test]
    async fn test_eval_commands() {
        let (_stop, utils) = utils().await;
        assert_eq!(utils.eval("!ping").await, Some(CommandResult::Ping));
        assert_eq!(utils.eval("!help").await, Some(CommandResult::Help));
        assert_eq!(utils.eval("!help @roller").await, Some(CommandResult::LongHelp));
        assert!(matches!(
            utils.eval("!uptime @Roller").await,
            Some(CommandResult::Uptime(_))
        ));
        assert_eq!(utils.eval("!kill @Roller").await, Some(CommandResult::Kill));
        assert_eq!(utils.eval("!restart @Roller").await, Some(CommandResult::Restart));
        assert_eq!(utils.eval("!kill @Other").await, None);
        assert_eq!(utils.eval("just chatting").await, None);
    }
}
