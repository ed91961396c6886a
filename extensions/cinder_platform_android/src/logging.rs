//! Logging initialisation
//!
//! On Android both `log` records (android_logger) and `tracing` events
//! (tracing-android) go to logcat under the fixed activity tag. Host builds
//! print through `tracing_subscriber::fmt`.
//!
//! The configured level caps everything except the activity tag itself,
//! which always passes at TRACE so `helloCinder` is never filtered out.

use std::str::FromStr;

use cinder_platform::{ShimConfig, TAG};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Maximum level from the config, `debug` if it does not parse
pub fn max_level(config: &ShimConfig) -> LevelFilter {
    LevelFilter::from_str(&config.log_level).unwrap_or(LevelFilter::DEBUG)
}

/// Filter applied to the tracing subscriber
pub fn log_filter(config: &ShimConfig) -> EnvFilter {
    let directives = format!("{},{}=trace", max_level(config), TAG);
    EnvFilter::try_new(&directives).unwrap_or_else(|e| {
        tracing::warn!("Invalid log filter '{}': {}", directives, e);
        EnvFilter::new(format!("debug,{}=trace", TAG))
    })
}

#[cfg(any(target_os = "android", test))]
fn log_level_filter(level: LevelFilter) -> log::LevelFilter {
    log::LevelFilter::from_str(&level.to_string()).unwrap_or(log::LevelFilter::Trace)
}

#[cfg(target_os = "android")]
pub fn init_logging(config: &ShimConfig) {
    use tracing_subscriber::layer::SubscriberExt;

    // Initialize android_logger for log crate; `helloCinder` goes through
    // tracing below, so this cap never hides it
    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log_level_filter(max_level(config)))
            .with_tag(TAG),
    );

    // Initialize tracing-android for tracing crate
    match tracing_android::layer(TAG) {
        Ok(layer) => {
            let subscriber = tracing_subscriber::registry()
                .with(log_filter(config))
                .with(layer);
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        Err(e) => log::warn!("tracing-android layer unavailable: {}", e),
    }
}

#[cfg(not(target_os = "android"))]
pub fn init_logging(config: &ShimConfig) {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(log_filter(config))
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use tracing::{Event, Subscriber};
    use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

    /// Counts TRACE events, split by whether they carry the activity tag
    #[derive(Clone, Default)]
    struct TraceCounter {
        tagged: Arc<AtomicUsize>,
        other: Arc<AtomicUsize>,
    }

    impl<S: Subscriber> Layer<S> for TraceCounter {
        fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
            if *event.metadata().level() != tracing::Level::TRACE {
                return;
            }
            if event.metadata().target() == TAG {
                self.tagged.fetch_add(1, Ordering::SeqCst);
            } else {
                self.other.fetch_add(1, Ordering::SeqCst);
            }
        }
    }

    #[test]
    fn level_comes_from_config() {
        let config = ShimConfig {
            log_level: "trace".to_string(),
            ..ShimConfig::default()
        };
        assert_eq!(max_level(&config), LevelFilter::TRACE);
        assert_eq!(log_level_filter(max_level(&config)), log::LevelFilter::Trace);
    }

    #[test]
    fn unknown_level_falls_back_to_debug() {
        let config = ShimConfig {
            log_level: "chatty".to_string(),
            ..ShimConfig::default()
        };
        assert_eq!(max_level(&config), LevelFilter::DEBUG);
        assert_eq!(log_level_filter(LevelFilter::WARN), log::LevelFilter::Warn);
        assert_eq!(log_level_filter(LevelFilter::OFF), log::LevelFilter::Off);
    }

    #[test]
    fn hello_passes_default_filter() {
        let config = ShimConfig::default();
        assert_eq!(max_level(&config), LevelFilter::DEBUG);

        let counter = TraceCounter::default();
        let subscriber = tracing_subscriber::registry()
            .with(log_filter(&config))
            .with(counter.clone());
        tracing::subscriber::with_default(subscriber, || {
            crate::bridge::hello_cinder_native();
            tracing::trace!("filtered by the configured level");
        });

        assert_eq!(counter.tagged.load(Ordering::SeqCst), 1);
        assert_eq!(counter.other.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn hello_passes_even_when_logging_is_quiet() {
        let config = ShimConfig {
            log_level: "error".to_string(),
            ..ShimConfig::default()
        };

        let counter = TraceCounter::default();
        let subscriber = tracing_subscriber::registry()
            .with(log_filter(&config))
            .with(counter.clone());
        tracing::subscriber::with_default(subscriber, || crate::bridge::hello_cinder_native());

        assert_eq!(counter.tagged.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn custom_tag_does_not_move_hello_target() {
        let config = ShimConfig {
            tag: "MyActivity".to_string(),
            ..ShimConfig::default()
        };
        let counter = TraceCounter::default();
        let subscriber = tracing_subscriber::registry()
            .with(log_filter(&config))
            .with(counter.clone());
        tracing::subscriber::with_default(subscriber, || crate::bridge::hello_cinder_native());

        assert_eq!(counter.tagged.load(Ordering::SeqCst), 1);
    }
}
