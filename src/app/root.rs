use {
    eframe::{
        Frame,
        egui::{CentralPanel, Context, Visuals},
    },
    std::{mem, sync::Arc, time::Duration},
};

use crate::{
    Cli,
    app::{AppState, FailedState, PendingConfirm, PhaseView, RunningState},
    config::DF,
    data::{HttpGateway, HttpLookup},
    domain::SearchKind,
    engine::{AnalysisEngine, Confirmation},
    error::TransitionError,
    models::{AnalysisMode, PeptideResult},
    ui::{UI_CONFIG, UI_TEXT, UiAction, read_dropped_file, render_fullscreen_message, save_csv},
    utils::AppInstant,
};

pub struct App {
    pub(crate) args: Cli,
    state: AppState,
    pub(crate) engine: Option<AnalysisEngine>,
    /// Raw text of the FASTA box; the validated form lives in the controller.
    pub(crate) fasta_text: String,
    pub(crate) search_query: String,
    pub(crate) search_kind: SearchKind,
    pub(crate) pending_confirm: Option<PendingConfirm>,
    pub(crate) selected_peptide: Option<PeptideResult>,
    /// Last export outcome, shown in the status bar.
    pub(crate) status_message: Option<String>,
}

impl App {
    pub(crate) fn new(_cc: &eframe::CreationContext<'_>, args: Cli) -> Self {
        Self {
            args,
            state: AppState::default(),
            engine: None,
            fasta_text: String::new(),
            search_query: String::new(),
            search_kind: SearchKind::default(),
            pending_confirm: None,
            selected_peptide: None,
            status_message: None,
        }
    }

    fn build_engine(args: &Cli) -> anyhow::Result<AnalysisEngine> {
        let gateway = HttpGateway::new(&args.api_url)?;
        let lookup = HttpLookup::new(&args.api_url)?;
        log::info!("Analysis service at {}", gateway.base_url());
        Ok(AnalysisEngine::new(Arc::new(gateway), Arc::new(lookup)))
    }

    pub(crate) fn tick_starting_state(&mut self, ctx: &Context) -> AppState {
        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| {
                render_fullscreen_message(ui, &UI_TEXT.app_title, &UI_TEXT.app_subtitle, false);
            });

        match Self::build_engine(&self.args) {
            Ok(engine) => {
                self.engine = Some(engine);
                ctx.request_repaint();
                AppState::Running(RunningState)
            }
            Err(e) => {
                log::error!("Failed to start: {:#}", e);
                AppState::Failed(FailedState {
                    reason: format!("{:#}", e),
                })
            }
        }
    }

    pub(crate) fn tick_running_state(&mut self, ctx: &Context) {
        let start = AppInstant::now();

        if let Some(engine) = &mut self.engine {
            engine.update();
        }
        let engine_time = start.elapsed().as_micros();

        let mut actions = Vec::new();
        actions.extend(self.collect_dropped_files(ctx));
        actions.extend(self.render_top_panel(ctx));
        actions.extend(self.render_status_panel(ctx));
        actions.extend(self.render_left_panel(ctx));
        actions.extend(self.render_right_panel(ctx));
        actions.extend(self.render_central_panel(ctx));
        actions.extend(self.render_confirm_dialog(ctx));
        self.render_peptide_details(ctx);

        for action in actions {
            self.apply_action(action);
        }

        #[cfg(debug_assertions)]
        if DF.log_performance {
            log::info!(
                "PERF: engine {}us, frame {}us",
                engine_time,
                start.elapsed().as_micros()
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = engine_time;

        // Worker results arrive on a channel; keep polling while anything is outstanding.
        if self.engine.as_ref().is_some_and(AnalysisEngine::is_busy) {
            ctx.request_repaint_after(Duration::from_millis(UI_CONFIG.busy_repaint_ms));
        }
    }

    fn collect_dropped_files(&mut self, ctx: &Context) -> Vec<UiAction> {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        dropped
            .iter()
            .filter_map(|file| match read_dropped_file(file) {
                Ok((file_name, text)) => Some(UiAction::LoadBatchFile { file_name, text }),
                Err(e) => {
                    log::warn!("Could not read dropped file: {:#}", e);
                    self.status_message = Some(format!("{:#}", e));
                    None
                }
            })
            .collect()
    }

    fn reset_local_inputs(&mut self) {
        self.fasta_text.clear();
        self.search_query.clear();
        self.selected_peptide = None;
        self.pending_confirm = None;
    }

    pub(crate) fn apply_action(&mut self, action: UiAction) {
        let Some(engine) = self.engine.as_mut() else {
            return;
        };

        #[cfg(debug_assertions)]
        if DF.log_controller {
            log::info!("UI action: {:?}", action);
        }

        let mut reset_inputs = false;
        let outcome: Result<(), TransitionError> = match action {
            UiAction::SwitchMode(mode) => {
                if mode != engine.mode() {
                    engine.switch_mode(mode);
                    reset_inputs = true;
                }
                Ok(())
            }
            UiAction::Search => {
                engine.search(&self.search_query, self.search_kind);
                Ok(())
            }
            UiAction::SelectCandidate(accession) => {
                engine.fetch_protein(&accession);
                Ok(())
            }
            UiAction::FastaEdited => engine.input_fasta(&self.fasta_text),
            UiAction::LoadBatchFile { file_name, text } => {
                if engine.mode() != AnalysisMode::Batch {
                    engine.switch_mode(AnalysisMode::Batch);
                    reset_inputs = true;
                }
                engine.load_batch_file(&file_name, &text)
            }
            UiAction::RemoveAccession(accession) => {
                engine.controller_mut().remove_from_batch(&accession)
            }
            UiAction::SetParams(params) => {
                engine.controller_mut().set_params(params);
                Ok(())
            }
            UiAction::SetDetectionMode(mode) => {
                engine.controller_mut().set_detection_mode(mode);
                Ok(())
            }
            UiAction::ResetParams => {
                engine.controller_mut().reset_to_recommended();
                Ok(())
            }
            UiAction::Analyze => {
                self.selected_peptide = None;
                engine.analyze()
            }
            UiAction::Clear => {
                if engine.clear(false) == Confirmation::NeedsConfirmation {
                    self.pending_confirm = Some(PendingConfirm::Clear);
                } else {
                    reset_inputs = true;
                }
                Ok(())
            }
            UiAction::NewAnalysis => {
                if engine.new_analysis(false) == Confirmation::NeedsConfirmation {
                    self.pending_confirm = Some(PendingConfirm::NewAnalysis);
                } else {
                    reset_inputs = true;
                }
                Ok(())
            }
            UiAction::Confirm => {
                match self.pending_confirm.take() {
                    Some(PendingConfirm::Clear) => {
                        engine.clear(true);
                    }
                    Some(PendingConfirm::NewAnalysis) => {
                        engine.new_analysis(true);
                    }
                    None => return,
                }
                reset_inputs = true;
                Ok(())
            }
            UiAction::CancelConfirm => {
                self.pending_confirm = None;
                Ok(())
            }
            UiAction::Download => {
                self.status_message = match engine.export() {
                    Some(Ok(document)) => match save_csv(&document) {
                        Ok(location) => Some(format!("{}: {}", UI_TEXT.saved_to, location)),
                        Err(e) => {
                            log::error!("Export failed: {:#}", e);
                            Some(format!("Error: {:#}", e))
                        }
                    },
                    Some(Err(e)) => {
                        log::error!("Export failed: {:#}", e);
                        Some(format!("Error: {:#}", e))
                    }
                    None => None,
                };
                Ok(())
            }
            UiAction::ShowPeptide(peptide) => {
                self.selected_peptide = Some(peptide);
                Ok(())
            }
        };

        if reset_inputs {
            self.reset_local_inputs();
        }

        // Input errors are already stored on the controller for display.
        if let Err(e) = outcome {
            log::warn!("Action refused: {}", e);
        }
    }
}

impl eframe::App for App {
    fn update(&mut self, ctx: &Context, _frame: &mut Frame) {
        setup_custom_visuals(ctx);
        let current = mem::take(&mut self.state);
        self.state = match current {
            AppState::Starting(mut s) => s.tick(self, ctx),
            AppState::Running(mut s) => s.tick(self, ctx),
            AppState::Failed(mut s) => s.tick(self, ctx),
        };
    }
}

fn setup_custom_visuals(ctx: &Context) {
    let mut visuals = Visuals::dark();
    visuals.window_fill = UI_CONFIG.colors.central_panel;
    visuals.panel_fill = UI_CONFIG.colors.side_panel;
    visuals.widgets.noninteractive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.inactive.fg_stroke.color = UI_CONFIG.colors.label;
    visuals.widgets.hovered.fg_stroke.color = UI_CONFIG.colors.heading;
    visuals.widgets.active.fg_stroke.color = UI_CONFIG.colors.heading;
    ctx.set_visuals(visuals);
}
