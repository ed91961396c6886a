//! Activity lifecycle model
//!
//! Lifecycle commands delivered by the native-activity glue, and the
//! capability interface a host object implements to receive them.

use std::fmt;

/// Lifecycle command forwarded by the activity dispatcher
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LifecycleEvent {
    /// Activity became visible
    Start,
    /// Activity moved to the foreground
    Resume,
    /// Activity left the foreground
    Pause,
    /// Activity is no longer visible
    Stop,
    /// Activity is being torn down
    Destroy,
    /// Window gained input focus
    GainedFocus,
    /// Window lost input focus
    LostFocus,
    /// System asked the app to persist its state
    SaveState,
    /// System is low on memory
    LowMemory,
    /// Device configuration changed (orientation, locale, ...)
    ConfigChanged,
    /// Native window is ready
    InitWindow,
    /// Native window is going away
    TerminateWindow,
}

impl LifecycleEvent {
    /// Stable name used in log output
    pub fn name(&self) -> &'static str {
        match self {
            LifecycleEvent::Start => "start",
            LifecycleEvent::Resume => "resume",
            LifecycleEvent::Pause => "pause",
            LifecycleEvent::Stop => "stop",
            LifecycleEvent::Destroy => "destroy",
            LifecycleEvent::GainedFocus => "gained_focus",
            LifecycleEvent::LostFocus => "lost_focus",
            LifecycleEvent::SaveState => "save_state",
            LifecycleEvent::LowMemory => "low_memory",
            LifecycleEvent::ConfigChanged => "config_changed",
            LifecycleEvent::InitWindow => "init_window",
            LifecycleEvent::TerminateWindow => "terminate_window",
        }
    }
}

impl fmt::Display for LifecycleEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Last activity-level command observed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ActivityState {
    #[default]
    Created,
    Started,
    Resumed,
    Paused,
    Stopped,
    Destroyed,
}

impl ActivityState {
    /// State reached after `event`, or `None` if the event does not change
    /// the activity state
    pub fn after(event: LifecycleEvent) -> Option<Self> {
        match event {
            LifecycleEvent::Start => Some(ActivityState::Started),
            LifecycleEvent::Resume => Some(ActivityState::Resumed),
            LifecycleEvent::Pause => Some(ActivityState::Paused),
            LifecycleEvent::Stop => Some(ActivityState::Stopped),
            LifecycleEvent::Destroy => Some(ActivityState::Destroyed),
            _ => None,
        }
    }
}

impl fmt::Display for ActivityState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ActivityState::Created => "Created",
            ActivityState::Started => "Start",
            ActivityState::Resumed => "Resume",
            ActivityState::Paused => "Pause",
            ActivityState::Stopped => "Stop",
            ActivityState::Destroyed => "Destroy",
        };
        f.write_str(name)
    }
}

/// Capability interface registered with the lifecycle dispatcher
///
/// The dispatcher has already run the host's default handling for a
/// command before calling into an implementation, so implementations never
/// chain to a base behaviour themselves. Only `on_resume` and `on_pause`
/// are required.
pub trait ActivityLifecycle {
    fn on_start(&mut self) {}

    fn on_resume(&mut self);

    fn on_pause(&mut self);

    fn on_stop(&mut self) {}

    fn on_destroy(&mut self) {}

    /// Commands without a dedicated hook
    fn on_other(&mut self, event: LifecycleEvent) {
        tracing::debug!("Unhandled lifecycle event: {}", event);
    }
}

/// Route a lifecycle command to the matching hook
pub fn dispatch<H: ActivityLifecycle + ?Sized>(handler: &mut H, event: LifecycleEvent) {
    match event {
        LifecycleEvent::Start => handler.on_start(),
        LifecycleEvent::Resume => handler.on_resume(),
        LifecycleEvent::Pause => handler.on_pause(),
        LifecycleEvent::Stop => handler.on_stop(),
        LifecycleEvent::Destroy => handler.on_destroy(),
        other => handler.on_other(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl ActivityLifecycle for Recorder {
        fn on_resume(&mut self) {
            self.calls.push("resume");
        }

        fn on_pause(&mut self) {
            self.calls.push("pause");
        }

        fn on_other(&mut self, event: LifecycleEvent) {
            self.calls.push(event.name());
        }
    }

    #[test]
    fn dispatch_routes_to_hooks() {
        let mut recorder = Recorder::default();
        for event in [
            LifecycleEvent::Start,
            LifecycleEvent::Resume,
            LifecycleEvent::GainedFocus,
            LifecycleEvent::Pause,
            LifecycleEvent::Stop,
        ] {
            dispatch(&mut recorder, event);
        }
        // start/stop fall through to the default no-op hooks
        assert_eq!(recorder.calls, vec!["resume", "gained_focus", "pause"]);
    }

    #[test]
    fn activity_state_tracks_only_activity_commands() {
        assert_eq!(
            ActivityState::after(LifecycleEvent::Resume),
            Some(ActivityState::Resumed)
        );
        assert_eq!(ActivityState::after(LifecycleEvent::LowMemory), None);
        assert_eq!(ActivityState::Stopped.to_string(), "Stop");
    }
}
