//! Lifecycle reducer for the shell window hosting the embedded content view.
//!
//! OS-driven window events are reduced to side-effect intents that the host
//! layer executes against the real window/webview. Keeping the transition
//! logic here makes the ordering and no-op guarantees testable without a
//! windowing stack.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Phase of the hosted content view's lifecycle.
pub enum LifecyclePhase {
    /// Shell has started; the content view exists but has not gained focus.
    Created,
    /// Content view is foregrounded and running.
    Resumed,
    /// Content view is backgrounded; embedded media/timers should suspend.
    Paused,
    /// Content view has been released. Terminal; no event reanimates it.
    Destroyed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Window-level events the host feeds into the reducer.
pub enum ShellEvent {
    /// The shell window gained focus (foreground/resume on desktop).
    FocusGained,
    /// The shell window lost focus (background/pause on desktop).
    FocusLost,
    /// The content view finished loading a document.
    PageLoaded,
    /// The user requested back navigation (window close request on desktop).
    BackRequested {
        /// Whether the content view has in-content history to pop.
        can_go_back: bool,
    },
    /// The shell window is being torn down.
    Teardown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Side-effect intents produced by [`LifecycleMachine::dispatch`].
pub enum ShellEffect {
    /// Re-assert full-screen presentation and hidden OS chrome.
    ApplyImmersiveMode,
    /// Tell the embedded content to resume media/timers/rendering.
    ResumeContent,
    /// Tell the embedded content to suspend media/timers/rendering.
    PauseContent,
    /// Pop one entry from the content view's internal history.
    HistoryBack,
    /// Let the platform's default back behavior run (close the shell).
    ExitShell,
    /// Release the content view's native resources exactly once.
    DestroyContent,
    /// Hold an OS sleep inhibitor so the screen stays awake while active.
    AcquireScreenWake,
    /// Drop the sleep inhibitor so the OS may blank the screen again.
    ReleaseScreenWake,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Lifecycle state machine for the single hosted content view.
pub struct LifecycleMachine {
    phase: LifecyclePhase,
}

impl Default for LifecycleMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl LifecycleMachine {
    /// Creates a machine in the [`LifecyclePhase::Created`] phase.
    pub fn new() -> Self {
        Self {
            phase: LifecyclePhase::Created,
        }
    }

    /// Returns the current lifecycle phase.
    pub fn phase(&self) -> LifecyclePhase {
        self.phase
    }

    /// Reduces one event to the effects the host layer must execute.
    ///
    /// After [`ShellEvent::Teardown`] every event reduces to no effects; the
    /// content view is never reanimated and dispatch never fails.
    pub fn dispatch(&mut self, event: ShellEvent) -> Vec<ShellEffect> {
        if self.phase == LifecyclePhase::Destroyed {
            return Vec::new();
        }

        match event {
            ShellEvent::FocusGained => {
                // Chrome can be forced visible while focus is elsewhere, so
                // immersive mode and the wake lock are re-asserted even when
                // already resumed.
                if self.phase == LifecyclePhase::Resumed {
                    vec![
                        ShellEffect::ApplyImmersiveMode,
                        ShellEffect::AcquireScreenWake,
                    ]
                } else {
                    self.phase = LifecyclePhase::Resumed;
                    vec![
                        ShellEffect::ResumeContent,
                        ShellEffect::ApplyImmersiveMode,
                        ShellEffect::AcquireScreenWake,
                    ]
                }
            }
            ShellEvent::FocusLost => {
                if self.phase == LifecyclePhase::Paused {
                    Vec::new()
                } else {
                    self.phase = LifecyclePhase::Paused;
                    vec![ShellEffect::PauseContent, ShellEffect::ReleaseScreenWake]
                }
            }
            ShellEvent::PageLoaded => vec![ShellEffect::ApplyImmersiveMode],
            ShellEvent::BackRequested { can_go_back } => {
                if can_go_back {
                    vec![ShellEffect::HistoryBack]
                } else {
                    vec![ShellEffect::ExitShell]
                }
            }
            ShellEvent::Teardown => {
                self.phase = LifecyclePhase::Destroyed;
                vec![ShellEffect::DestroyContent, ShellEffect::ReleaseScreenWake]
            }
        }
    }
}
