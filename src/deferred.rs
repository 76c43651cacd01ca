use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::trace;

/// Deferred callback slot - 遅延コールバック
///
/// Every simulated delay in the shell (connecting, assistant typing, ad
/// playback, payment) goes through one of these. Scheduling again or calling
/// `supersede` bumps the generation; a callback whose generation is stale
/// when its timer fires is dropped. Last write wins, no cancellation tokens.
#[derive(Debug, Clone, Default)]
pub struct DeferredSlot {
    generation: Arc<AtomicU64>,
}

/// Handle given to a deferred callback so it can re-check that it is still
/// current while holding whatever lock guards the state it mutates.
#[derive(Debug, Clone)]
pub struct Ticket {
    generation: u64,
    slot: Arc<AtomicU64>,
}

impl Ticket {
    pub fn is_current(&self) -> bool {
        self.slot.load(Ordering::SeqCst) == self.generation
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl DeferredSlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::SeqCst)
    }

    /// Invalidate whatever is pending
    pub fn supersede(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Run `f` after `delay` unless superseded first.
    /// Must be called from within a tokio runtime.
    pub fn schedule<F>(&self, delay: Duration, f: F) -> Ticket
    where
        F: FnOnce(Ticket) + Send + 'static,
    {
        let ticket = Ticket {
            generation: self.supersede(),
            slot: self.generation.clone(),
        };

        let pending = ticket.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            if pending.is_current() {
                f(pending);
            } else {
                trace!("⏱️ Deferred callback #{} superseded", pending.generation);
            }
        });

        ticket
    }
}
