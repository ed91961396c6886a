//! Cinder Android Platform
//!
//! Native Activity integration and JNI bridge for the lifecycle shim.
//!
//! The NativeActivity glue loads this library, runs the activity's default
//! lifecycle handling, and forwards each command to [`activity::run`], which
//! hands it to a [`cinder_platform::LifecycleShim`] backed by the
//! JNI `PowerManager`.

pub mod activity;
pub mod assets;
pub mod bridge;
pub mod logging;

#[cfg(target_os = "android")]
pub mod power;

pub use assets::ConfigAssetLoader;
pub use bridge::hello_cinder_native;
pub use logging::init_logging;

#[cfg(target_os = "android")]
pub use activity::{lifecycle_event, run};
#[cfg(target_os = "android")]
pub use power::{JniPowerService, JniWakeLock};
