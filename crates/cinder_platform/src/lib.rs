//! Cinder Platform
//!
//! Platform-independent half of the Cinder native-activity shim.
//!
//! The shim sits between the host's activity-lifecycle dispatcher and the
//! native engine running in the same process. It keeps the screen on while
//! the activity is in the foreground and exposes a diagnostic hook the
//! engine can call to check that the boundary is wired.
//!
//! # Architecture
//!
//! - [`ActivityLifecycle`] is the capability interface the dispatcher calls.
//! - [`PowerService`] and [`WakeLock`] abstract the OS power manager.
//! - [`LifecycleShim`] implements the former on top of the latter.
//!
//! Platform bindings (see `cinder_platform_android`) provide the concrete
//! power service and forward lifecycle commands.
//!
//! # Usage
//!
//! ```ignore
//! use cinder_platform::{LifecycleEvent, LifecycleShim, ShimConfig};
//!
//! let mut shim = LifecycleShim::with_config(power_service, &ShimConfig::default());
//! shim.handle(LifecycleEvent::Resume); // wake-lock acquired
//! shim.handle(LifecycleEvent::Pause);  // wake-lock released
//! ```

pub mod config;
pub mod diagnostics;
pub mod error;
pub mod lifecycle;
pub mod power;
pub mod shim;

pub use config::ShimConfig;
pub use diagnostics::{hello_cinder, HELLO_MESSAGE, TAG};
pub use error::{PlatformError, Result};
pub use lifecycle::{dispatch, ActivityLifecycle, ActivityState, LifecycleEvent};
pub use power::{
    PowerService, WakeLock, WakeLockFlag, WakeLockFlags, WakeLockGuard, WakeLockRequest,
    POWER_SERVICE,
};
pub use shim::{LifecycleShim, ShimState, WakeLockStats};
