//! Diagnostic hooks reachable from the native engine

/// Log tag of the activity shim
pub const TAG: &str = "AndroidCinderActivity";

/// Message emitted by [`hello_cinder`]
pub const HELLO_MESSAGE: &str = "Hello Cinder!";

/// Emit one verbose record confirming the native/activity boundary is wired.
///
/// Safe to call from any thread.
pub fn hello_cinder() {
    tracing::trace!(target: TAG, "{}", HELLO_MESSAGE);
}
