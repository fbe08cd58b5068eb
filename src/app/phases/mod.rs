pub(super) mod failed;
pub(super) mod phase_view;
pub(super) mod running;
pub(super) mod starting;

pub(crate) use phase_view::PhaseView;
