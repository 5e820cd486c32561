//! Resettable, cancellable delay timer.
//!
//! An [`Alarm`] runs a fixed action once, a fixed delay after it was armed.
//! [`Alarm::reset`] pushes the deadline back to `delay` from now and
//! [`Alarm::cancel`] disables it for good.
//!
//! Firings are spawned on an injected tokio runtime, so the action never runs
//! on the caller's thread. The pending firing lives in a mutex-guarded slot
//! together with a generation counter: a firing task re-checks its generation
//! under the lock before running the action, so a firing that was reset or
//! cancelled can never run once `reset`/`cancel` has returned.
use std::{
    sync::{Arc, Mutex, MutexGuard, PoisonError, Weak},
    time::Duration,
};

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace};

use crate::error::{CoreError, CoreResult};

type Action = Arc<dyn Fn() + Send + Sync + 'static>;

/// Single-shot, resettable delay timer.
///
/// Dropping the alarm cancels it.
pub struct Alarm {
    inner: Arc<Inner>,
}

struct Inner {
    handle: Handle,
    delay: Duration,
    action: Action,
    slot: Mutex<Slot>,
}

#[derive(Default)]
struct Slot {
    /// Bumped on every arm and cancel; only the current generation may fire.
    generation: u64,
    pending: Option<CancellationToken>,
    cancelled: bool,
}

impl Alarm {
    /// Creates an alarm on the given runtime and arms it.
    ///
    /// A zero `delay` gives an inert alarm: it never fires and `reset` does
    /// nothing, but it can still be cancelled. The runtime must have its
    /// time driver enabled.
    pub fn new<F>(handle: Handle, delay: Duration, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let inner = Arc::new(Inner {
            handle,
            delay,
            action: Arc::new(action),
            slot: Mutex::new(Slot::default()),
        });

        if delay.is_zero() {
            trace!("alarm created inert (zero delay)");
        } else {
            inner.arm(&mut inner.lock());
        }
        Self { inner }
    }

    /// Creates an alarm on the runtime the caller is running in.
    pub fn current<F>(delay: Duration, action: F) -> CoreResult<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let handle = Handle::try_current().map_err(|_| CoreError::NoRuntime)?;
        Ok(Self::new(handle, delay, action))
    }

    /// Creates an alarm from a signed millisecond count.
    ///
    /// Zero or negative values give an inert alarm instead of an error.
    pub fn from_millis<F>(handle: Handle, millis: i64, action: F) -> Self
    where
        F: Fn() + Send + Sync + 'static,
    {
        let delay = u64::try_from(millis)
            .map(Duration::from_millis)
            .unwrap_or(Duration::ZERO);
        Self::new(handle, delay, action)
    }

    /// Creates an alarm from a duration string such as `"500ms"` or `"2s"`.
    pub fn parse<F>(handle: Handle, delay: &str, action: F) -> CoreResult<Self>
    where
        F: Fn() + Send + Sync + 'static,
    {
        let delay = wrapkit_model::parse_duration(delay)?;
        Ok(Self::new(handle, delay, action))
    }

    /// Cancels the pending firing, if any, and arms a new one `delay` from now.
    ///
    /// Also re-arms an alarm that has already fired. Does nothing on an inert
    /// or cancelled alarm.
    pub fn reset(&self) {
        let mut slot = self.inner.lock();
        if slot.cancelled {
            trace!("reset ignored: alarm is cancelled");
            return;
        }
        if self.inner.delay.is_zero() {
            return;
        }
        self.inner.arm(&mut slot);
    }

    /// Permanently disables the alarm. Idempotent.
    pub fn cancel(&self) {
        self.inner.cancel();
    }

    /// Returns `true` while a firing is scheduled and has not run yet.
    pub fn is_pending(&self) -> bool {
        self.inner.lock().pending.is_some()
    }

    pub fn is_cancelled(&self) -> bool {
        self.inner.lock().cancelled
    }

    pub fn delay(&self) -> Duration {
        self.inner.delay
    }
}

impl Drop for Alarm {
    fn drop(&mut self) {
        self.inner.cancel();
    }
}

impl std::fmt::Debug for Alarm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let slot = self.inner.lock();
        f.debug_struct("Alarm")
            .field("delay", &self.inner.delay)
            .field("generation", &slot.generation)
            .field("pending", &slot.pending.is_some())
            .field("cancelled", &slot.cancelled)
            .finish()
    }
}

impl Inner {
    fn lock(&self) -> MutexGuard<'_, Slot> {
        // The action never runs under this lock, so poisoning leaves the slot consistent.
        self.slot.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Replaces the pending firing with a fresh one. Caller holds the lock.
    fn arm(self: &Arc<Self>, slot: &mut Slot) {
        if let Some(previous) = slot.pending.take() {
            previous.cancel();
        }
        slot.generation += 1;

        let generation = slot.generation;
        let token = CancellationToken::new();
        slot.pending = Some(token.clone());

        let delay = self.delay;
        let weak: Weak<Inner> = Arc::downgrade(self);
        trace!(delay_ms = delay.as_millis() as u64, generation, "alarm armed");

        self.handle.spawn(async move {
            tokio::select! {
                _ = token.cancelled() => return,
                _ = tokio::time::sleep(delay) => {}
            }
            if let Some(inner) = weak.upgrade() {
                inner.fire(generation);
            }
        });
    }

    fn fire(&self, generation: u64) {
        {
            let mut slot = self.lock();
            if slot.cancelled || slot.generation != generation {
                trace!(generation, current = slot.generation, "stale alarm firing dropped");
                return;
            }
            slot.pending = None;
        }

        debug!(generation, "alarm fired");
        (self.action)();
    }

    fn cancel(&self) {
        let mut slot = self.lock();
        if slot.cancelled {
            return;
        }
        slot.cancelled = true;
        slot.generation += 1;
        if let Some(pending) = slot.pending.take() {
            pending.cancel();
        }
        trace!(generation = slot.generation, "alarm cancelled");
    }
}
