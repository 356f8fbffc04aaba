use super::ProcessState;
use crate::TapfareError;
use std::sync::{Mutex, MutexGuard};

/// tracks the state of taps processing runs and keeps two runs from
/// overlapping.
#[derive(Debug, Default)]
pub struct ProcessStateHandler {
    state: Mutex<ProcessState>,
}

impl ProcessStateHandler {
    pub fn state(&self) -> ProcessState {
        *self.lock()
    }

    pub fn is_running(&self) -> bool {
        self.state().is_running()
    }

    /// moves to [`ProcessState::Started`], failing if a run is already in
    /// progress. the check and the transition happen under one lock.
    pub fn try_start(&self) -> Result<(), TapfareError> {
        let mut state = self.lock();
        if state.is_running() {
            return Err(TapfareError::ProcessAlreadyRunningError);
        }
        *state = ProcessState::Started;
        log::debug!("process state changed to {}", ProcessState::Started);
        Ok(())
    }

    pub fn set_state(&self, new_state: ProcessState) {
        let mut state = self.lock();
        log::debug!("process state changed from {} to {new_state}", *state);
        *state = new_state;
    }

    // a poisoned lock still holds a valid state value
    fn lock(&self) -> MutexGuard<'_, ProcessState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }
}
