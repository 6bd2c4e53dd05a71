//! Managed shell state: the lifecycle machine plus content history tracking.

use std::sync::{Mutex, PoisonError};

use shell_host::{LifecycleMachine, ShellEffect, ShellEvent};

#[derive(Debug)]
struct ShellStateInner {
    machine: LifecycleMachine,
    /// Completed-load depth of the content view's internal history. Tracked
    /// from page-load events because the webview does not expose its history
    /// list; same-document navigation (hash changes) is invisible here.
    history_depth: u32,
    /// Set while an issued `history.back()` is waiting for its page load.
    popping_history: bool,
}

#[derive(Debug)]
/// Shared shell state managed by the Tauri runtime.
pub(crate) struct ShellState {
    inner: Mutex<ShellStateInner>,
}

impl ShellState {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(ShellStateInner {
                machine: LifecycleMachine::new(),
                history_depth: 0,
                popping_history: false,
            }),
        }
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, ShellStateInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Reduces one lifecycle event to host effects.
    pub fn dispatch(&self, event: ShellEvent) -> Vec<ShellEffect> {
        self.lock().machine.dispatch(event)
    }

    /// Records a completed document load and reduces the page-load event.
    pub fn record_page_load(&self) -> Vec<ShellEffect> {
        let mut inner = self.lock();
        if inner.popping_history {
            inner.popping_history = false;
            inner.history_depth = inner.history_depth.saturating_sub(1);
        } else {
            inner.history_depth = inner.history_depth.saturating_add(1);
        }
        inner.machine.dispatch(ShellEvent::PageLoaded)
    }

    /// Whether the content view has internal history to pop.
    pub fn can_go_back(&self) -> bool {
        self.lock().history_depth > 1
    }

    /// Marks an issued history pop so its follow-up load is not re-counted.
    pub fn note_history_pop(&self) {
        self.lock().popping_history = true;
    }
}

#[cfg(test)]
mod tests {
    use super::ShellState;
    use shell_host::{ShellEffect, ShellEvent};

    #[test]
    fn history_depth_follows_loads_and_pops() {
        let state = ShellState::new();
        assert!(!state.can_go_back());

        state.record_page_load();
        assert!(!state.can_go_back(), "entry document alone has no history");

        state.record_page_load();
        assert!(state.can_go_back());

        state.note_history_pop();
        state.record_page_load();
        assert!(!state.can_go_back(), "pop returned to the entry document");
    }

    #[test]
    fn page_load_effects_reassert_immersive_mode() {
        let state = ShellState::new();
        assert_eq!(
            state.record_page_load(),
            vec![ShellEffect::ApplyImmersiveMode]
        );
    }

    #[test]
    fn dispatch_after_teardown_is_a_safe_no_op() {
        let state = ShellState::new();
        state.dispatch(ShellEvent::Teardown);
        assert_eq!(state.dispatch(ShellEvent::FocusGained), vec![]);
        assert_eq!(state.record_page_load(), vec![]);
    }
}
