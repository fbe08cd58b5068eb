// app/phases/starting.rs

use eframe::egui::Context;

use crate::app::{App, phases::PhaseView, state::AppState, state::StartingState};

impl PhaseView for StartingState {
    fn tick(&mut self, app: &mut App, ctx: &Context) -> AppState {
        app.tick_starting_state(ctx)
    }
}
