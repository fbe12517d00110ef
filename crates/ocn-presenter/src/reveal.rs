//! Timed reveal engine
//!
//! Reveals a run's records one at a time, simulating an agent typing. The
//! first record appears immediately on data arrival; each subsequent record
//! appears after a delay proportional to the previous record's summary
//! length, floored at a minimum and padded with a small fixed latency.
//!
//! Cancellation uses both belts: the reveal task is aborted on reset, and
//! every timer fire re-checks a monotonically increasing run generation so
//! a late callback from a superseded run can never touch newer state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::{broadcast, Mutex};
use tokio::task::JoinHandle;

use ocn_types::Explanation;

/// Typing-time model for the reveal delay
#[derive(Debug, Clone, Copy)]
pub struct RevealTiming {
    /// Simulated typing time per character of the previous summary
    pub per_char: Duration,
    /// Fixed extra latency added to every reveal
    pub base_latency: Duration,
    /// Floor for the total delay between reveals
    pub min_delay: Duration,
}

impl Default for RevealTiming {
    fn default() -> Self {
        Self {
            per_char: Duration::from_millis(20),
            base_latency: Duration::from_millis(100),
            min_delay: Duration::from_millis(300),
        }
    }
}

impl RevealTiming {
    /// Compressed timing for demos and CI
    pub fn fast() -> Self {
        Self {
            per_char: Duration::from_millis(1),
            base_latency: Duration::from_millis(5),
            min_delay: Duration::from_millis(10),
        }
    }

    /// Delay before revealing the record that follows `prev_summary`
    pub fn delay_after(&self, prev_summary: &str) -> Duration {
        let typing = self.per_char * prev_summary.len() as u32 + self.base_latency;
        typing.max(self.min_delay)
    }
}

/// One record becoming visible
#[derive(Debug, Clone)]
pub struct RevealEvent {
    /// Run generation the record belongs to
    pub generation: u64,
    /// Position in the run's explanation list
    pub index: usize,
    pub record: Explanation,
}

/// Chat presenter state machine: `Idle -> Revealing(i) -> Idle`
pub struct ChatPresenter {
    timing: RevealTiming,
    generation: Arc<AtomicU64>,
    revealed: Arc<Mutex<Vec<Explanation>>>,
    task: Arc<Mutex<Option<JoinHandle<()>>>>,
    events: broadcast::Sender<RevealEvent>,
}

impl ChatPresenter {
    pub fn new(timing: RevealTiming) -> Self {
        let (events, _) = broadcast::channel(64);
        Self {
            timing,
            generation: Arc::new(AtomicU64::new(0)),
            revealed: Arc::new(Mutex::new(Vec::new())),
            task: Arc::new(Mutex::new(None)),
            events,
        }
    }

    /// Subscribe to reveal events for live consumers. Events from
    /// superseded generations should be ignored by comparing
    /// [`RevealEvent::generation`] with the value returned by `present`.
    pub fn subscribe(&self) -> broadcast::Receiver<RevealEvent> {
        self.events.subscribe()
    }

    /// Current run generation
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Records revealed so far, in reveal order
    pub async fn revealed(&self) -> Vec<Explanation> {
        self.revealed.lock().await.clone()
    }

    /// Whether a reveal task is still running
    pub async fn is_revealing(&self) -> bool {
        self.task
            .lock()
            .await
            .as_ref()
            .map(|handle| !handle.is_finished())
            .unwrap_or(false)
    }

    /// Start revealing a fresh run. Any in-flight reveal from a previous
    /// run is invalidated. The first record appears before this returns.
    /// Returns the new run's generation.
    pub async fn present(&self, explanations: Vec<Explanation>) -> u64 {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.cancel_task().await;

        {
            let mut revealed = self.revealed.lock().await;
            revealed.clear();
        }

        if explanations.is_empty() {
            return generation;
        }

        self.push(generation, 0, explanations[0].clone()).await;

        let presenter_generation = Arc::clone(&self.generation);
        let revealed = Arc::clone(&self.revealed);
        let events = self.events.clone();
        let timing = self.timing;

        let handle = tokio::spawn(async move {
            for index in 1..explanations.len() {
                let delay = timing.delay_after(&explanations[index - 1].summary);
                tokio::time::sleep(delay).await;

                // A newer run or a reset owns the presenter now.
                if presenter_generation.load(Ordering::SeqCst) != generation {
                    tracing::debug!(generation, index, "dropping stale reveal");
                    return;
                }

                let record = explanations[index].clone();
                revealed.lock().await.push(record.clone());
                let _ = events.send(RevealEvent {
                    generation,
                    index,
                    record,
                });
            }
        });

        *self.task.lock().await = Some(handle);
        generation
    }

    /// Clear state and invalidate all pending reveal timers. No record
    /// from the old run may appear after this returns.
    pub async fn reset(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
        self.cancel_task().await;
        self.revealed.lock().await.clear();
    }

    async fn cancel_task(&self) {
        if let Some(handle) = self.task.lock().await.take() {
            handle.abort();
        }
    }

    async fn push(&self, generation: u64, index: usize, record: Explanation) {
        self.revealed.lock().await.push(record.clone());
        let _ = self.events.send(RevealEvent {
            generation,
            index,
            record,
        });
    }
}

impl Default for ChatPresenter {
    fn default() -> Self {
        Self::new(RevealTiming::default())
    }
}
