//! Power-management abstraction
//!
//! Mirrors the subset of `android.os.PowerManager` the shim needs: create a
//! wake-lock from a flag mask and a tag, then acquire and release it.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Well-known key of the power service (`Context.POWER_SERVICE`)
pub const POWER_SERVICE: &str = "power";

/// Wake-lock level or flag understood by `PowerManager.newWakeLock`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WakeLockFlag {
    Partial,
    ScreenDim,
    ScreenBright,
    FullWake,
    AcquireCausesWakeup,
    OnAfterRelease,
}

impl WakeLockFlag {
    /// Raw `PowerManager` constant
    pub const fn bits(self) -> i32 {
        match self {
            WakeLockFlag::Partial => 0x0000_0001,
            WakeLockFlag::ScreenDim => 0x0000_0006,
            WakeLockFlag::ScreenBright => 0x0000_000a,
            WakeLockFlag::FullWake => 0x0000_001a,
            WakeLockFlag::AcquireCausesWakeup => 0x1000_0000,
            WakeLockFlag::OnAfterRelease => 0x2000_0000,
        }
    }
}

/// Combined wake-lock flag mask
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WakeLockFlags(i32);

impl WakeLockFlags {
    /// Keep the screen on at full brightness and poke the user activity
    /// timer when the lock is released
    pub const SCREEN_ON: Self =
        Self(WakeLockFlag::FullWake.bits() | WakeLockFlag::OnAfterRelease.bits());

    pub fn from_flags(flags: &[WakeLockFlag]) -> Self {
        Self(flags.iter().fold(0, |mask, flag| mask | flag.bits()))
    }

    pub const fn bits(self) -> i32 {
        self.0
    }

    pub const fn contains(self, flag: WakeLockFlag) -> bool {
        self.0 & flag.bits() == flag.bits()
    }
}

impl Default for WakeLockFlags {
    fn default() -> Self {
        Self::SCREEN_ON
    }
}

/// Parameters of a wake-lock creation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WakeLockRequest {
    pub flags: WakeLockFlags,
    /// Diagnostic tag shown by `dumpsys power`
    pub tag: String,
}

impl WakeLockRequest {
    pub fn new(flags: WakeLockFlags, tag: impl Into<String>) -> Self {
        Self {
            flags,
            tag: tag.into(),
        }
    }
}

/// An OS wake-lock handle
pub trait WakeLock {
    fn acquire(&mut self) -> Result<()>;

    /// Release a held lock. Implementations return
    /// [`PlatformError::WakeLockNotHeld`](crate::PlatformError::WakeLockNotHeld)
    /// when nothing is held.
    fn release(&mut self) -> Result<()>;

    fn is_held(&self) -> bool;

    fn tag(&self) -> &str;
}

/// Power-management service capability
pub trait PowerService {
    type Lock: WakeLock;

    /// Look up the service and create a new, not yet acquired, wake-lock.
    ///
    /// Fails with
    /// [`PlatformError::ResourceUnavailable`](crate::PlatformError::ResourceUnavailable)
    /// if the service cannot be obtained.
    fn new_wake_lock(&self, request: &WakeLockRequest) -> Result<Self::Lock>;
}

/// Scoped owner of an acquired wake-lock
///
/// Releases the lock when dropped if it is still held.
pub struct WakeLockGuard<L: WakeLock> {
    lock: L,
}

impl<L: WakeLock> WakeLockGuard<L> {
    /// Acquire `lock` and take ownership of it
    pub fn acquire(mut lock: L) -> Result<Self> {
        lock.acquire()?;
        Ok(Self { lock })
    }

    pub fn is_held(&self) -> bool {
        self.lock.is_held()
    }

    pub fn lock(&self) -> &L {
        &self.lock
    }

    /// Release explicitly, surfacing any error to the caller
    pub fn release(mut self) -> Result<()> {
        self.lock.release()
    }
}

impl<L: WakeLock> Drop for WakeLockGuard<L> {
    fn drop(&mut self) {
        if self.lock.is_held() {
            if let Err(e) = self.lock.release() {
                tracing::warn!("Failed to release wake-lock '{}': {}", self.lock.tag(), e);
            }
        }
    }
}
