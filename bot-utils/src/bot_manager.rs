use crate::{
    bots::{BotBuilder, BotExit},
    config::BotConfig,
    rolls::RollExecutor,
    Bot, ClientUtils,
};
pub use async_trait::async_trait;
use std::{path::Path, sync::Arc};
use tokio::sync::watch;

#[async_trait]
pub trait StopListener: Sized + Sync + Clone + Send + 'static {
    async fn wait_stop(&mut self) -> ();
}

#[async_trait]
impl StopListener for watch::Receiver<bool> {
    async fn wait_stop(&mut self) -> () {
        loop {
            let stopped = *self.borrow();
            if stopped {
                break;
            }
            if self.changed().await.is_err() {
                break;
            }
        }
    }
}

#[cfg(target_family = "unix")]
async fn wait_hup() {
    use tokio::signal::unix::*;
    match signal(SignalKind::hangup()) {
        Ok(mut signal) => {
            signal.recv().await;
        }
        Err(err) => {
            log::warn!("unable to listen for SIGHUP: {}", err);
            std::future::pending::<()>().await
        }
    }
}

async fn wait_shutdown_signal() {
    #[cfg(target_family = "unix")]
    {
        tokio::select! {
            _ = tokio::signal::ctrl_c()=>{
                log::info!("Received Ctrl-C: Shutting down")
            }
            _ = wait_hup()=>{
                log::info!("Received SIGHUP: Shutting down")
            }
        };
    }
    #[cfg(not(target_family = "unix"))]
    {
        let _ = tokio::signal::ctrl_c().await;
        log::info!("Received Ctrl-C: Shutting down");
    }
}

pub struct BotManager {
    config: BotConfig,
}

impl BotManager {
    pub fn new<P: AsRef<Path>>(config_path: P) -> BotManager {
        BotManager {
            config: BotConfig::load(config_path),
        }
    }

    pub fn from_config(config: BotConfig) -> BotManager {
        BotManager { config }
    }

    /// Builds the bot and runs it until it stops or a shutdown signal
    /// arrives, rebuilding it whenever it asks for a restart. Then waits for
    /// the rng provider to wind down.
    pub async fn run<BB: BotBuilder>(self, builder: BB) {
        let (finished_sender, finished_receiver) = watch::channel(false);
        let finished_sender = Arc::new(finished_sender);
        let signal_sender = finished_sender.clone();
        tokio::task::spawn(async move {
            wait_shutdown_signal().await;
            let _ = signal_sender.send(true);
        });

        let (rng_handle, roll) = RollExecutor::new(
            self.config.limits,
            self.config.rng_reseed,
            finished_receiver.clone(),
        )
        .await;
        let roll = Arc::new(roll);
        let nick: Arc<str> = self.config.nick.into();
        let mut builder = builder;
        loop {
            let utils = ClientUtils::new(roll.clone(), nick.clone());
            let bot = builder.build(utils, finished_receiver.clone()).await;
            match bot.run().await {
                BotExit::Stopped => break,
                BotExit::Restart(next) => {
                    log::info!("restarting bot");
                    builder = next;
                }
            }
        }
        log::info!("bot stopped");

        let _ = finished_sender.send(true);
        if let Err(err) = rng_handle.await {
            log::error!("rng task failed: {}", err);
        }
    }
}
