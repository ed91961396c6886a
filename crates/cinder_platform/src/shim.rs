//! Lifecycle shim
//!
//! Turns resume/pause notifications into wake-lock acquisition and release.
//! At most one wake-lock is owned at any time; it is held exactly while the
//! shim is in [`ShimState::Resumed`] and the power service was reachable.

use crate::config::ShimConfig;
use crate::lifecycle::{ActivityLifecycle, ActivityState, LifecycleEvent};
use crate::power::{PowerService, WakeLock, WakeLockGuard, WakeLockRequest};

/// Wake-lock state machine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShimState {
    #[default]
    Paused,
    Resumed,
}

/// Successful acquisitions and releases since creation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WakeLockStats {
    pub acquired: u64,
    pub released: u64,
}

pub struct LifecycleShim<P: PowerService> {
    power: P,
    request: WakeLockRequest,
    keep_screen_on: bool,
    wake_lock: Option<WakeLockGuard<P::Lock>>,
    state: ShimState,
    activity_state: ActivityState,
    stats: WakeLockStats,
}

impl<P: PowerService> LifecycleShim<P> {
    /// Shim with the default configuration
    pub fn new(power: P) -> Self {
        Self::with_config(power, &ShimConfig::default())
    }

    pub fn with_config(power: P, config: &ShimConfig) -> Self {
        Self {
            power,
            request: config.wake_lock_request(),
            keep_screen_on: config.keep_screen_on,
            wake_lock: None,
            state: ShimState::Paused,
            activity_state: ActivityState::Created,
            stats: WakeLockStats::default(),
        }
    }

    pub fn state(&self) -> ShimState {
        self.state
    }

    pub fn activity_state(&self) -> ActivityState {
        self.activity_state
    }

    pub fn stats(&self) -> WakeLockStats {
        self.stats
    }

    pub fn request(&self) -> &WakeLockRequest {
        &self.request
    }

    pub fn power_service(&self) -> &P {
        &self.power
    }

    pub fn is_holding_wake_lock(&self) -> bool {
        self.wake_lock.as_ref().is_some_and(WakeLockGuard::is_held)
    }

    /// Feed one lifecycle command from the dispatcher
    pub fn handle(&mut self, event: LifecycleEvent) {
        crate::lifecycle::dispatch(self, event);
        if let Some(next) = ActivityState::after(event) {
            self.activity_state = next;
            tracing::info!("activity state: {}", self.activity_state);
        }
    }

    fn acquire_wake_lock(&mut self) {
        if !self.keep_screen_on {
            return;
        }

        if let Some(guard) = &self.wake_lock {
            if guard.is_held() {
                tracing::debug!("Wake-lock '{}' already held", self.request.tag);
                return;
            }
            // The OS dropped it behind our back; replace it
            self.wake_lock = None;
        }

        let lock = match self.power.new_wake_lock(&self.request) {
            Ok(lock) => lock,
            Err(e) => {
                tracing::warn!("Skipping wake-lock acquisition: {}", e);
                return;
            }
        };

        match WakeLockGuard::acquire(lock) {
            Ok(guard) => {
                self.stats.acquired += 1;
                tracing::info!(
                    "Wake-lock '{}' acquired (flags {:#x})",
                    self.request.tag,
                    self.request.flags.bits()
                );
                self.wake_lock = Some(guard);
            }
            Err(e) => {
                tracing::warn!("Failed to acquire wake-lock '{}': {}", self.request.tag, e);
            }
        }
    }

    fn release_wake_lock(&mut self) {
        let Some(guard) = self.wake_lock.take() else {
            tracing::debug!("No wake-lock to release");
            return;
        };

        if !guard.is_held() {
            return;
        }

        let tag = guard.lock().tag().to_string();
        match guard.release() {
            Ok(()) => {
                self.stats.released += 1;
                tracing::info!("Wake-lock '{}' released", tag);
            }
            Err(e) => tracing::warn!("Failed to release wake-lock '{}': {}", tag, e),
        }
    }
}

impl<P: PowerService> ActivityLifecycle for LifecycleShim<P> {
    fn on_resume(&mut self) {
        self.state = ShimState::Resumed;
        self.acquire_wake_lock();
    }

    fn on_pause(&mut self) {
        self.state = ShimState::Paused;
        self.release_wake_lock();
    }

    fn on_destroy(&mut self) {
        self.state = ShimState::Paused;
        self.release_wake_lock();
    }
}

impl<P: PowerService> Drop for LifecycleShim<P> {
    fn drop(&mut self) {
        self.release_wake_lock();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{PlatformError, Result};
    use std::cell::{Cell, RefCell};
    use std::rc::Rc;

    /// Lock whose held flag can be cleared from outside, as if the OS
    /// timed it out
    struct FlakyLock {
        held: Rc<Cell<bool>>,
    }

    impl WakeLock for FlakyLock {
        fn acquire(&mut self) -> Result<()> {
            self.held.set(true);
            Ok(())
        }

        fn release(&mut self) -> Result<()> {
            if !self.held.get() {
                return Err(PlatformError::WakeLockNotHeld("flaky".into()));
            }
            self.held.set(false);
            Ok(())
        }

        fn is_held(&self) -> bool {
            self.held.get()
        }

        fn tag(&self) -> &str {
            "flaky"
        }
    }

    #[derive(Default)]
    struct FlakyService {
        created: Cell<usize>,
        last: RefCell<Option<Rc<Cell<bool>>>>,
    }

    impl PowerService for FlakyService {
        type Lock = FlakyLock;

        fn new_wake_lock(&self, _request: &WakeLockRequest) -> Result<FlakyLock> {
            self.created.set(self.created.get() + 1);
            let held = Rc::new(Cell::new(false));
            *self.last.borrow_mut() = Some(Rc::clone(&held));
            Ok(FlakyLock { held })
        }
    }

    #[test]
    fn starts_paused_without_lock() {
        let shim = LifecycleShim::new(FlakyService::default());
        assert_eq!(shim.state(), ShimState::Paused);
        assert_eq!(shim.activity_state(), ActivityState::Created);
        assert!(!shim.is_holding_wake_lock());
    }

    #[test]
    fn lost_lock_is_replaced_on_next_resume() {
        let mut shim = LifecycleShim::new(FlakyService::default());
        shim.handle(LifecycleEvent::Resume);
        assert_eq!(shim.power_service().created.get(), 1);

        if let Some(held) = shim.power_service().last.borrow().as_ref() {
            held.set(false);
        }
        assert!(!shim.is_holding_wake_lock());

        shim.handle(LifecycleEvent::Resume);
        assert_eq!(shim.power_service().created.get(), 2);
        assert!(shim.is_holding_wake_lock());
        assert_eq!(shim.stats().acquired, 2);
    }

    #[test]
    fn keep_screen_on_disabled_never_creates_locks() {
        let config = ShimConfig {
            keep_screen_on: false,
            ..ShimConfig::default()
        };
        let mut shim = LifecycleShim::with_config(FlakyService::default(), &config);
        shim.handle(LifecycleEvent::Resume);
        assert_eq!(shim.state(), ShimState::Resumed);
        assert!(!shim.is_holding_wake_lock());
        assert_eq!(shim.power_service().created.get(), 0);
    }

    #[test]
    fn activity_state_follows_commands() {
        let mut shim = LifecycleShim::new(FlakyService::default());
        shim.handle(LifecycleEvent::Start);
        assert_eq!(shim.activity_state(), ActivityState::Started);
        shim.handle(LifecycleEvent::Resume);
        shim.handle(LifecycleEvent::GainedFocus);
        assert_eq!(shim.activity_state(), ActivityState::Resumed);
        shim.handle(LifecycleEvent::Pause);
        shim.handle(LifecycleEvent::Stop);
        assert_eq!(shim.activity_state(), ActivityState::Stopped);
        assert_eq!(shim.state(), ShimState::Paused);
    }
}
