//! Screen wake lock held while the shell is foregrounded.

use std::sync::{Mutex, MutexGuard, PoisonError};

#[derive(Default)]
/// OS sleep-inhibitor guard, acquired on focus gain and dropped on
/// pause/teardown. Managed by the Tauri runtime as shared state.
pub(crate) struct ScreenWake {
    inhibitor: Mutex<Option<keepawake::KeepAwake>>,
}

impl ScreenWake {
    fn slot(&self) -> MutexGuard<'_, Option<keepawake::KeepAwake>> {
        self.inhibitor.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquires the inhibitor unless it is already held.
    ///
    /// A platform refusal is logged and otherwise ignored, matching the
    /// immersive-mode error posture; the shell keeps running either way.
    pub fn acquire(&self) {
        let mut slot = self.slot();
        if slot.is_some() {
            return;
        }
        match keepawake::Builder::default()
            .display(true)
            .idle(true)
            .reason("cable-map display")
            .app_name("cable-map-shell")
            .app_reverse_domain("com.cablemap.shell")
            .create()
        {
            Ok(awake) => *slot = Some(awake),
            Err(err) => tracing::debug!("screen wake lock refused: {err}"),
        }
    }

    /// Releases the inhibitor if held; dropping the guard ends it.
    pub fn release(&self) {
        self.slot().take();
    }
}
