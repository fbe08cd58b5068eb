// src/app/state.rs

#[derive(Clone, Copy, Default)]
pub(crate) struct StartingState;

#[derive(Clone, Copy)]
pub(crate) struct RunningState;

/// The HTTP stack could not be built; nothing useful can run.
#[derive(Clone)]
pub(crate) struct FailedState {
    pub(crate) reason: String,
}

pub(crate) enum AppState {
    Starting(StartingState),
    Running(RunningState),
    Failed(FailedState),
}

impl Default for AppState {
    fn default() -> Self {
        AppState::Starting(StartingState)
    }
}

/// Destructive actions wait for a second click in a modal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PendingConfirm {
    Clear,
    NewAnalysis,
}
