use eframe::egui::{
    Align, Align2, CentralPanel, Context, FontId, Grid, Layout, Order, RichText, ScrollArea,
    SidePanel, TopBottomPanel, Ui, Window,
};
use strum::IntoEnumIterator;

use crate::app::{App, PendingConfirm};
use crate::models::AnalysisMode;
use crate::ui::peptide_table::render_peptide_table;
use crate::ui::styles::{BadgeColor, UiStyleExt};
use crate::ui::ui_panels::{
    action_buttons, batch_input_panel, fasta_input_panel, message_frames, parameters_panel,
    results_summary_panel, single_input_panel, spaced_separator,
};
use crate::ui::{UI_CONFIG, UI_TEXT, UiAction};

fn tab_label(mode: AnalysisMode) -> &'static str {
    match mode {
        AnalysisMode::Single => &UI_TEXT.tab_single,
        AnalysisMode::Fasta => &UI_TEXT.tab_fasta,
        AnalysisMode::Batch => &UI_TEXT.tab_batch,
    }
}

impl App {
    pub(crate) fn render_top_panel(&mut self, ctx: &Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let Some(engine) = &self.engine else {
            return actions;
        };
        let current = engine.mode();
        let busy = engine.state().is_busy();

        TopBottomPanel::top("top_toolbar")
            .frame(UI_CONFIG.top_panel_frame())
            .min_height(30.0)
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(&UI_TEXT.app_title)
                            .strong()
                            .color(UI_CONFIG.colors.heading),
                    );
                    ui.separator();

                    for mode in AnalysisMode::iter() {
                        let clicked = ui
                            .interactive_label(
                                tab_label(mode),
                                mode == current,
                                UI_CONFIG.colors.label,
                                FontId::proportional(14.0),
                            )
                            .clicked();
                        if clicked && mode != current {
                            actions.push(UiAction::SwitchMode(mode));
                        }
                    }

                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui
                            .add_enabled(
                                !busy,
                                eframe::egui::Button::new(&UI_TEXT.new_analysis_button),
                            )
                            .clicked()
                        {
                            actions.push(UiAction::NewAnalysis);
                        }
                    });
                });
            });
        actions
    }

    pub(crate) fn render_left_panel(&mut self, ctx: &Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let Some(engine) = &self.engine else {
            return actions;
        };
        let fasta_text = &mut self.fasta_text;
        let search_query = &mut self.search_query;
        let search_kind = &mut self.search_kind;

        SidePanel::left("input_panel")
            .min_width(300.0)
            .default_width(340.0)
            .resizable(true)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("input_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        match engine.mode() {
                            AnalysisMode::Single => single_input_panel(
                                ui,
                                engine,
                                search_query,
                                search_kind,
                                &mut actions,
                            ),
                            AnalysisMode::Fasta => {
                                fasta_input_panel(ui, engine.state(), fasta_text, &mut actions)
                            }
                            AnalysisMode::Batch => batch_input_panel(ui, engine, &mut actions),
                        }

                        spaced_separator(ui);
                        parameters_panel(ui, engine.state(), &mut actions);

                        spaced_separator(ui);
                        action_buttons(ui, engine.state(), &mut actions);

                        ui.add_space(6.0);
                        message_frames(ui, engine.state());
                    });
            });
        actions
    }

    pub(crate) fn render_right_panel(&mut self, ctx: &Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let Some(engine) = &self.engine else {
            return actions;
        };

        SidePanel::right("results_panel")
            .min_width(200.0)
            .resizable(false)
            .frame(UI_CONFIG.side_panel_frame())
            .show(ctx, |ui| {
                ScrollArea::vertical()
                    .id_salt("summary_scroll")
                    .show(ui, |ui| results_summary_panel(ui, engine, &mut actions));
            });
        actions
    }

    pub(crate) fn render_central_panel(&mut self, ctx: &Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let Some(engine) = &self.engine else {
            return actions;
        };

        CentralPanel::default()
            .frame(UI_CONFIG.central_panel_frame())
            .show(ctx, |ui| match &engine.state().results {
                Some(results) => render_peptide_table(ui, results, &mut actions),
                None if engine.state().is_busy() => {
                    render_fullscreen_message(ui, &UI_TEXT.analyzing, "", false);
                }
                None => {
                    ui.centered_and_justified(|ui| {
                        ui.label_subdued(&UI_TEXT.results_empty);
                    });
                }
            });
        actions
    }

    pub(crate) fn render_status_panel(&mut self, ctx: &Context) -> Vec<UiAction> {
        let engine = self.engine.as_ref();
        TopBottomPanel::bottom("status_panel")
            .frame(UI_CONFIG.bottom_panel_frame())
            .resizable(false)
            .show(ctx, |ui| {
                ui.horizontal(|ui| {
                    ui.metric("API", &self.args.api_url, UI_CONFIG.colors.info);
                    ui.separator();

                    if let Some(engine) = engine {
                        let state = engine.state();
                        let (label, color) = if engine.is_busy() {
                            ("Working", UI_CONFIG.colors.warning)
                        } else if state.error.is_some() {
                            ("Error", UI_CONFIG.colors.error)
                        } else {
                            ("Ready", UI_CONFIG.colors.success)
                        };
                        ui.metric("Status", label, color);
                        if let Some(results) = &state.results {
                            ui.separator();
                            ui.metric(
                                &UI_TEXT.results_peptides,
                                &results.peptide_count().to_string(),
                                UI_CONFIG.colors.success,
                            );
                        }
                    }

                    if let Some(message) = &self.status_message {
                        ui.separator();
                        ui.label_subdued(message);
                    }
                });
            });
        Vec::new()
    }

    pub(crate) fn render_confirm_dialog(&mut self, ctx: &Context) -> Vec<UiAction> {
        let mut actions = Vec::new();
        let Some(pending) = self.pending_confirm else {
            return actions;
        };
        let question = match pending {
            PendingConfirm::Clear => &UI_TEXT.confirm_clear,
            PendingConfirm::NewAnalysis => &UI_TEXT.confirm_new,
        };

        Window::new(UI_TEXT.confirm_title.as_str())
            .collapsible(false)
            .resizable(false)
            .order(Order::Foreground)
            .anchor(Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                ui.label(question);
                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui
                        .button(ui.button_text_primary(&UI_TEXT.confirm_yes))
                        .clicked()
                    {
                        actions.push(UiAction::Confirm);
                    }
                    if ui
                        .button(ui.button_text_secondary(&UI_TEXT.confirm_no))
                        .clicked()
                    {
                        actions.push(UiAction::CancelConfirm);
                    }
                });
            });
        actions
    }

    pub(crate) fn render_peptide_details(&mut self, ctx: &Context) {
        let Some(peptide) = &self.selected_peptide else {
            return;
        };
        let mut open = true;

        Window::new(UI_TEXT.details_title.as_str())
            .collapsible(false)
            .resizable(false)
            .order(Order::Tooltip)
            .open(&mut open)
            .default_width(420.0)
            .show(ctx, |ui| {
                ui.label(RichText::new(&peptide.sequence).monospace().strong());
                if let Some(modified) = &peptide.modified_sequence {
                    ui.label_subdued(modified);
                }
                ui.add_space(6.0);

                let neutral = eframe::egui::Color32::WHITE;
                let size = peptide.size_category();
                ui.metric(&UI_TEXT.col_position, &peptide.position_label(), neutral);
                ui.metric(
                    &UI_TEXT.col_length,
                    &format!("{} aa", peptide.length),
                    neutral,
                );
                ui.metric(
                    &UI_TEXT.col_size,
                    &format!("{} ({})", size, size.range_label()),
                    size.color(),
                );
                ui.metric(
                    &UI_TEXT.col_score,
                    &format!(
                        "{:.1}% ({})",
                        peptide.bioactivity_score,
                        peptide.bioactivity_source.export_label()
                    ),
                    UI_CONFIG.bioactivity_color(peptide.bioactivity_score),
                );
                ui.metric(&UI_TEXT.col_motif, &peptide.cleavage_motif, neutral);
                if peptide.confidence_score.is_some() || peptide.confidence_level.is_some() {
                    ui.metric(
                        &UI_TEXT.col_confidence,
                        &peptide.confidence_label(),
                        neutral,
                    );
                }
                if let Some(name) = &peptide.uniprot_name {
                    let status = peptide
                        .uniprot_status
                        .map(|s| s.export_label())
                        .unwrap_or("Unknown");
                    ui.metric(&UI_TEXT.col_uniprot, &format!("{} ({})", name, status), neutral);
                }
                if let Some(note) = &peptide.uniprot_note {
                    ui.label_subdued(note);
                }

                if !peptide.ptms.is_empty() {
                    spaced_separator(ui);
                    ui.label_subheader(&UI_TEXT.details_ptms);
                    Grid::new("ptm_grid").striped(true).show(ui, |ui| {
                        for ptm in &peptide.ptms {
                            ui.label(format!("{} {}", ptm.emoji, ptm.short_name));
                            ui.label_subdued(ptm.description.as_deref().unwrap_or(""));
                            ui.label_subdued(ptm.enzyme.as_deref().unwrap_or(""));
                            ui.end_row();
                        }
                    });
                }

                if let Some(brain) = peptide.brain_peptide.as_ref().filter(|b| b.found) {
                    spaced_separator(ui);
                    ui.label_subheader(&UI_TEXT.details_brain);
                    let level = brain.detection_confidence();
                    ui.metric(
                        &UI_TEXT.details_msms,
                        &format!("{} ({})", brain.msms_count, level),
                        level.color(),
                    );
                    if let Some(score) = brain.mascot_score {
                        ui.metric(&UI_TEXT.details_mascot, &format!("{:.1}", score), neutral);
                    }
                    if let Some(name) = &brain.protein_name {
                        ui.metric("Protein", name, neutral);
                    }
                    let accessions = brain.accessions();
                    if !accessions.is_empty() {
                        ui.metric("UniProt", &accessions.join(", "), neutral);
                    }
                    if brain.is_prohormone {
                        ui.label_subdued("Prohormone");
                    }
                    if brain.is_amidated {
                        ui.label_subdued("C-terminal amidation");
                    }
                }
            });

        if !open {
            self.selected_peptide = None;
        }
    }
}

pub(crate) fn render_fullscreen_message(ui: &mut Ui, title: &str, subtitle: &str, is_error: bool) {
    ui.vertical_centered(|ui| {
        ui.add_space(40.0);

        if is_error {
            ui.heading(title);
        } else {
            ui.spinner();
            ui.add_space(12.0);
            ui.heading(title);
        }

        ui.add_space(6.0);

        let color = if is_error {
            UI_CONFIG.colors.error
        } else {
            UI_CONFIG.colors.label
        };
        ui.label(RichText::new(subtitle).color(color));
    });
}
