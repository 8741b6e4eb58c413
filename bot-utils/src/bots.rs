use crate::{bot_manager::StopListener, ClientUtils};
pub use async_trait::async_trait;

/// How a bot session ended.
pub enum BotExit<BB> {
    Stopped,
    /// Asked to restart; the builder hands back whatever the bot owned.
    Restart(BB),
}

#[async_trait]
pub trait Bot: Send + 'static {
    type Builder: Send + 'static;
    async fn run(self) -> BotExit<Self::Builder>;
}

#[async_trait]
pub trait BotBuilder: Sized + Send + 'static {
    type B: Bot<Builder = Self> + 'static;
    async fn build<S: StopListener>(self, utils: ClientUtils, stop: S) -> Self::B;
}
