use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha20Rng;
use rand_xoshiro::Xoshiro256PlusPlus;
use roller_dice::{Limits, RollResult, SyntaxError};
use std::time::Duration;
use tokio::{
    sync::{mpsc, oneshot},
    task::{spawn, JoinHandle},
    time::{interval_at, Instant},
};

use crate::bot_manager::StopListener;

#[derive(Debug)]
enum RngProviderOps {
    GetRng(oneshot::Sender<Xoshiro256PlusPlus>),
    SetCryptoRng(ChaCha20Rng),
}

/// Owns the master generator and hands out independently seeded generators,
/// one per roll.
struct RngProvider {
    rng: ChaCha20Rng,
    receiver: mpsc::Receiver<RngProviderOps>,
}

impl RngProvider {
    pub async fn run(&mut self) {
        while let Some(op) = self.receiver.recv().await {
            match op {
                RngProviderOps::GetRng(channel) => {
                    let mut seed: <Xoshiro256PlusPlus as SeedableRng>::Seed = Default::default();
                    self.rng.fill(&mut seed);
                    if channel.send(Xoshiro256PlusPlus::from_seed(seed)).is_err() {
                        log::debug!("roll dropped before receiving its rng");
                    }
                }
                RngProviderOps::SetCryptoRng(rng) => self.rng = rng,
            }
        }
    }
}

async fn start_rng_provider<Stop: StopListener>(
    rng_reseed: Duration,
    mut stop: Stop,
) -> (JoinHandle<()>, mpsc::Sender<RngProviderOps>) {
    let (sender, receiver) = mpsc::channel(32);
    let rng_handle = spawn(async move {
        RngProvider {
            rng: ChaCha20Rng::from_entropy(),
            receiver,
        }
        .run()
        .await
    });
    let sender_clone = sender.clone();
    (
        spawn(async move {
            let mut interval = interval_at(Instant::now() + rng_reseed, rng_reseed);
            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        if sender_clone
                            .send(RngProviderOps::SetCryptoRng(ChaCha20Rng::from_entropy()))
                            .await
                            .is_err()
                        {
                            break;
                        }
                        log::debug!("reseeded master rng");
                    }
                    _ = stop.wait_stop() => { break; }
                }
            }
            drop(sender_clone);
            log::info!("stopped reseeding task");
            if let Err(err) = rng_handle.await {
                log::error!("rng provider failed: {}", err);
            }
        }),
        sender,
    )
}

pub struct RollExecutor {
    limits: Limits,
    rng_gen: mpsc::Sender<RngProviderOps>,
}

impl RollExecutor {
    /// Starts the rng provider. The returned handle finishes once `stop`
    /// fires and every executor has been dropped.
    pub async fn new<Stop: StopListener>(
        limits: Limits,
        rng_reseed: Duration,
        stop: Stop,
    ) -> (JoinHandle<()>, RollExecutor) {
        let (handle, rng_gen) = start_rng_provider(rng_reseed, stop).await;
        (handle, RollExecutor { limits, rng_gen })
    }

    pub fn limits(&self) -> &Limits {
        &self.limits
    }

    async fn fresh_rng(&self) -> Xoshiro256PlusPlus {
        let (rng_send, rng_receive) = oneshot::channel();
        if self
            .rng_gen
            .send(RngProviderOps::GetRng(rng_send))
            .await
            .is_ok()
        {
            if let Ok(rng) = rng_receive.await {
                return rng;
            }
        }
        log::warn!("rng provider unavailable, seeding from entropy");
        Xoshiro256PlusPlus::from_entropy()
    }

    pub async fn roll(&self, args: &str) -> Result<RollResult, SyntaxError> {
        let mut rng = self.fresh_rng().await;
        roller_dice::roll(args, &self.limits, &mut rng)
    }
}
