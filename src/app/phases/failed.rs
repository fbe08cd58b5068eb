use eframe::egui::{CentralPanel, Context};

use crate::app::{
    App,
    phases::PhaseView,
    state::{AppState, FailedState},
};
use crate::ui::{UI_CONFIG, UI_TEXT, render_fullscreen_message};

impl PhaseView for FailedState {
    fn tick(&mut self, _app: &mut App, ctx: &Context) -> AppState {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                render_fullscreen_message(ui, &UI_TEXT.startup_failed, &self.reason, true);
            });
        AppState::Failed(self.clone())
    }
}
