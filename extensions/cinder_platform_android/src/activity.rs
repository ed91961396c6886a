//! Native activity entry point
//!
//! The NativeActivity superclass has already performed its own bookkeeping
//! by the time a command reaches `poll_events`, so every command is passed
//! to the shim after the host's default handling.

use cinder_platform::Result;

#[cfg(target_os = "android")]
use cinder_platform::{LifecycleEvent, LifecycleShim, ShimConfig};

#[cfg(target_os = "android")]
use android_activity::{AndroidApp, InputStatus, MainEvent, PollEvent};

#[cfg(target_os = "android")]
use crate::assets::ConfigAssetLoader;
#[cfg(target_os = "android")]
use crate::power::JniPowerService;

/// Map an `android-activity` main event onto a lifecycle command
#[cfg(target_os = "android")]
pub fn lifecycle_event(event: &MainEvent<'_>) -> Option<LifecycleEvent> {
    let event = match event {
        MainEvent::Start => LifecycleEvent::Start,
        MainEvent::Resume { .. } => LifecycleEvent::Resume,
        MainEvent::Pause => LifecycleEvent::Pause,
        MainEvent::Stop => LifecycleEvent::Stop,
        MainEvent::Destroy => LifecycleEvent::Destroy,
        MainEvent::GainedFocus => LifecycleEvent::GainedFocus,
        MainEvent::LostFocus => LifecycleEvent::LostFocus,
        MainEvent::SaveState { .. } => LifecycleEvent::SaveState,
        MainEvent::LowMemory => LifecycleEvent::LowMemory,
        MainEvent::ConfigChanged { .. } => LifecycleEvent::ConfigChanged,
        MainEvent::InitWindow { .. } => LifecycleEvent::InitWindow,
        MainEvent::TerminateWindow { .. } => LifecycleEvent::TerminateWindow,
        _ => return None,
    };
    Some(event)
}

/// Drain pending input so the dispatcher never times out waiting on us
#[cfg(target_os = "android")]
fn drain_input(app: &AndroidApp) {
    match app.input_events_iter() {
        Ok(mut events) => {
            while events.next(|_| InputStatus::Unhandled) {}
        }
        Err(e) => tracing::warn!("Failed to read input events: {}", e),
    }
}

/// Run the lifecycle shim until the activity is destroyed
#[cfg(target_os = "android")]
pub fn run(app: AndroidApp) -> Result<()> {
    let loaded = ConfigAssetLoader::new(app.clone()).load();
    let config = match &loaded {
        Ok(Some(config)) => config.clone(),
        _ => ShimConfig::default(),
    };

    crate::logging::init_logging(&config);
    match loaded {
        Ok(Some(_)) => tracing::info!("Loaded {}", cinder_platform::config::CONFIG_FILE_NAME),
        Ok(None) => tracing::debug!("No config asset, using defaults"),
        Err(e) => tracing::warn!("Ignoring invalid config: {}", e),
    }

    let power = JniPowerService::from_app(&app)?;
    run_shim(&app, LifecycleShim::with_config(power, &config));
    Ok(())
}

#[cfg(target_os = "android")]
fn run_shim(app: &AndroidApp, mut shim: LifecycleShim<JniPowerService>) {
    tracing::info!("Entering Android event loop");

    let mut running = true;
    while running {
        app.poll_events(None, |event| {
            if let PollEvent::Main(main_event) = event {
                if let Some(command) = lifecycle_event(&main_event) {
                    shim.handle(command);
                    if command == LifecycleEvent::Destroy {
                        running = false;
                    }
                }
            }
        });
        drain_input(app);
    }

    tracing::info!("Android event loop exited");
}

#[cfg(target_os = "android")]
#[no_mangle]
fn android_main(app: AndroidApp) {
    if let Err(e) = run(app) {
        tracing::error!("Cinder activity shim failed: {}", e);
    }
}

// Stub for non-Android builds (for cross-compilation checks)
#[cfg(not(target_os = "android"))]
pub fn run() -> Result<()> {
    Err(cinder_platform::PlatformError::Unsupported(
        "Native activity only available on Android".to_string(),
    ))
}
