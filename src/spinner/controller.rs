use std::{sync::Arc, time::Duration};

use anyhow::{anyhow, Result};
use chrono::Utc;
use tokio::{
    sync::{broadcast, watch, Mutex},
    time,
};
use tokio_util::sync::CancellationToken;

use crate::{
    db::Database,
    error::WheelError,
    log_error, log_info, log_warn,
    models::{SpinRecord, WheelCollection},
    settings::SettingsStore,
    wheel::{random_offset, SpinPlan},
};

use super::{SpinEvent, SpinSnapshot, SpinTracker};

const ENABLE_LOGS: bool = true;
const EVENT_CAPACITY: usize = 32;

/// Drives spins: plans the target rotation, waits out the transition on a
/// tokio task, then resolves and records the result exactly once.
#[derive(Clone)]
pub struct SpinController {
    tracker: Arc<Mutex<SpinTracker>>,
    wheels: Arc<Mutex<WheelCollection>>,
    db: Database,
    settings: Arc<SettingsStore>,
    cancel_token: Arc<Mutex<Option<CancellationToken>>>,
    idle_tx: Arc<watch::Sender<bool>>,
    events: broadcast::Sender<SpinEvent>,
}

impl SpinController {
    pub fn new(
        wheels: Arc<Mutex<WheelCollection>>,
        db: Database,
        settings: Arc<SettingsStore>,
    ) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        let (idle_tx, _) = watch::channel(true);

        Self {
            tracker: Arc::new(Mutex::new(SpinTracker::new())),
            wheels,
            db,
            settings,
            cancel_token: Arc::new(Mutex::new(None)),
            idle_tx: Arc::new(idle_tx),
            events,
        }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SpinEvent> {
        self.events.subscribe()
    }

    pub async fn get_snapshot(&self) -> SpinSnapshot {
        let guard = self.tracker.lock().await;
        SpinSnapshot::from(&*guard)
    }

    pub async fn spinning_wheel(&self) -> Option<String> {
        let guard = self.tracker.lock().await;
        guard.spinning_wheel().map(str::to_string)
    }

    pub async fn rotation_for(&self, wheel_id: &str) -> f64 {
        self.tracker.lock().await.rotation_for(wheel_id)
    }

    /// Starts spinning `wheel_id`. Returns the planned target rotation; the
    /// result arrives later as a `SpinEvent::Resolved`.
    pub async fn spin(&self, wheel_id: &str) -> Result<SpinPlan> {
        let settings = self.settings.spin();

        let mut tracker = self.tracker.lock().await;
        if tracker.is_spinning() {
            return Err(WheelError::SpinInProgress.into());
        }

        let slot_count = {
            let wheels = self.wheels.lock().await;
            wheels
                .get(wheel_id)
                .ok_or_else(|| WheelError::WheelNotFound(wheel_id.to_string()))?
                .slot_count()
        };
        if slot_count == 0 {
            return Err(WheelError::InvalidSlotCount(slot_count).into());
        }

        tracker.spin.focus(wheel_id);
        let offset = random_offset(&mut rand::thread_rng());
        let plan = tracker.spin.begin(offset, settings.revolutions_per_spin);
        tracker.pending = Some(plan);

        let token = CancellationToken::new();
        *self.cancel_token.lock().await = Some(token.clone());
        self.idle_tx.send_replace(false);

        log_info!(
            "Spin {} of wheel {} targeting {:.2}°",
            plan.count,
            wheel_id,
            plan.rotation
        );
        let _ = self.events.send(SpinEvent::Started {
            wheel_id: wheel_id.to_string(),
            plan,
        });

        let delay = Duration::from_millis(settings.transition_ms);
        let controller = self.clone();
        let wheel_id = wheel_id.to_string();
        tokio::spawn(async move {
            controller.run_resolution(wheel_id, plan, delay, token).await;
        });

        // The task can't touch the tracker until this guard drops.
        drop(tracker);
        Ok(plan)
    }

    /// Cancels the spin in flight, if any. Nothing is recorded for it.
    ///
    /// Returns `false` when there is nothing left to cancel, including a spin
    /// whose resolution has already claimed the tracker.
    pub async fn cancel(&self) -> bool {
        let tracker = self.tracker.lock().await;
        if tracker.pending.is_none() {
            return false;
        }

        match self.cancel_token.lock().await.as_ref() {
            Some(token) if !token.is_cancelled() => {
                token.cancel();
                true
            }
            _ => false,
        }
    }

    /// Waits until no spin is in flight.
    pub async fn wait_idle(&self) -> Result<()> {
        let mut idle_rx = self.idle_tx.subscribe();
        idle_rx
            .wait_for(|idle| *idle)
            .await
            .map(|_| ())
            .map_err(|_| anyhow!("spin controller dropped"))
    }

    async fn run_resolution(
        self,
        wheel_id: String,
        plan: SpinPlan,
        delay: Duration,
        token: CancellationToken,
    ) {
        tokio::select! {
            _ = time::sleep(delay) => {}
            _ = token.cancelled() => {}
        }

        let mut tracker = self.tracker.lock().await;
        // A cancel that got the tracker first wins, even if the sleep finished.
        let completed = !token.is_cancelled();
        tracker.pending = None;
        self.cancel_token.lock().await.take();

        let event = if completed {
            match self.record_result(&wheel_id, plan).await {
                Ok(record) => {
                    log_info!(
                        "Wheel {} landed on slot {} ({})",
                        wheel_id,
                        record.index,
                        record.label
                    );
                    SpinEvent::Resolved {
                        wheel_id: wheel_id.clone(),
                        record,
                    }
                }
                Err(err) => {
                    log_error!("Failed to resolve spin for wheel {}: {err:?}", wheel_id);
                    SpinEvent::Failed {
                        wheel_id: wheel_id.clone(),
                        message: err.to_string(),
                    }
                }
            }
        } else {
            log_info!("Spin of wheel {} cancelled", wheel_id);
            SpinEvent::Cancelled {
                wheel_id: wheel_id.clone(),
            }
        };

        drop(tracker);
        let _ = self.events.send(event);
        self.idle_tx.send_replace(true);
    }

    async fn record_result(&self, wheel_id: &str, plan: SpinPlan) -> Result<SpinRecord> {
        let mut wheels = self.wheels.lock().await;
        let record = wheels
            .get_mut(wheel_id)
            .ok_or_else(|| WheelError::WheelNotFound(wheel_id.to_string()))?
            .record_spin(plan.rotation, Utc::now())?;

        if let Err(err) = self.db.save_wheels(wheels.wheels()).await {
            log_warn!("Spin result kept in memory but not saved: {err:?}");
        }

        Ok(record)
    }
}
