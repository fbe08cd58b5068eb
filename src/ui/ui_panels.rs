use eframe::egui::{
    Align, Button, CollapsingHeader, Color32, ComboBox, DragValue, FontId, Frame, Grid, Key,
    Layout, RichText, ScrollArea, TextEdit, TextStyle, Ui,
};
use strum::IntoEnumIterator;

use crate::config::{DETECTION, SERVICE, VALIDATION};
use crate::domain::{DetectionMode, DetectionParameters, ProteinRef, SearchKind};
use crate::engine::{AnalysisEngine, ControllerState, LookupState, ModeState};
use crate::models::{AnalysisResultSet, BatchResult, SingleResult};
use crate::ui::styles::{UiStyleExt, colored_subsection_heading};
use crate::ui::ui_text::ICON_CLOSE;
use crate::ui::{UI_CONFIG, UI_TEXT, UiAction};
use crate::utils::format_elapsed;

pub(crate) fn spaced_separator(ui: &mut Ui) {
    ui.add_space(6.0);
    ui.separator();
    ui.add_space(6.0);
}

/// Search box, candidate list and the currently selected protein.
pub(crate) fn single_input_panel(
    ui: &mut Ui,
    engine: &AnalysisEngine,
    query: &mut String,
    kind: &mut SearchKind,
    actions: &mut Vec<UiAction>,
) {
    ui.label_subheader(&UI_TEXT.search_title);

    ui.horizontal(|ui| {
        ui.label_subdued(&UI_TEXT.search_by);
        ComboBox::from_id_salt("search_kind")
            .selected_text(kind.to_string())
            .show_ui(ui, |ui| {
                for option in SearchKind::iter() {
                    ui.selectable_value(kind, option, option.to_string());
                }
            });
    });

    let hint = match kind {
        SearchKind::GeneName => &UI_TEXT.search_hint_gene,
        SearchKind::Accession => &UI_TEXT.search_hint_accession,
    };
    ui.horizontal(|ui| {
        let response = ui.add(
            TextEdit::singleline(query)
                .hint_text(hint.as_str())
                .desired_width(180.0),
        );
        let submitted = response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter));
        let long_enough = query.trim().chars().count() >= SERVICE.min_search_chars;
        let clicked = ui
            .add_enabled(long_enough, Button::new(&UI_TEXT.search_button))
            .clicked();
        if (submitted && long_enough) || clicked {
            actions.push(UiAction::Search);
        }
    });

    render_lookup_results(ui, &engine.lookup, actions);

    if let ModeState::Single {
        protein: Some(protein),
    } = &engine.state().mode_state
    {
        spaced_separator(ui);
        render_selected_protein(ui, protein);
    }
}

fn render_lookup_results(ui: &mut Ui, lookup: &LookupState, actions: &mut Vec<UiAction>) {
    if lookup.pending > 0 {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label_subdued(format!("{} {}", UI_TEXT.search_button, lookup.query));
        });
        return;
    }

    if let Some(error) = &lookup.error {
        ui.colored_label(UI_CONFIG.colors.error, error);
        return;
    }

    if lookup.has_searched && lookup.candidates.is_empty() {
        ui.label_subdued(&UI_TEXT.search_no_results);
        return;
    }

    if lookup.candidates.len() > 1 {
        ui.add_space(4.0);
        ui.label_subdued(&UI_TEXT.search_select_prompt);
        ScrollArea::vertical()
            .id_salt("candidates")
            .max_height(180.0)
            .show(ui, |ui| {
                for candidate in &lookup.candidates {
                    let text = format!(
                        "{}  {}  {}",
                        candidate.accession,
                        candidate.gene_name.as_deref().unwrap_or("-"),
                        candidate.protein_name.as_deref().unwrap_or("")
                    );
                    if ui
                        .interactive_label(
                            &text,
                            false,
                            UI_CONFIG.colors.info,
                            FontId::proportional(12.0),
                        )
                        .clicked()
                    {
                        actions.push(UiAction::SelectCandidate(candidate.accession.clone()));
                    }
                }
            });
    }
}

fn render_selected_protein(ui: &mut Ui, protein: &ProteinRef) {
    ui.label(colored_subsection_heading(&UI_TEXT.selected_protein).strong());
    let neutral = Color32::WHITE;
    ui.metric("Accession", &protein.accession, neutral);
    if !protein.gene_name.is_empty() {
        ui.metric("Gene", &protein.gene_name, neutral);
    }
    if let Some(name) = &protein.protein_name {
        ui.metric("Protein", name, neutral);
    }
    ui.metric("Length", &format!("{} aa", protein.length()), neutral);
    if let Some(end) = protein.signal_peptide_end {
        ui.metric("Signal peptide", &format!("1-{}", end), neutral);
    }

    CollapsingHeader::new(&UI_TEXT.show_sequence)
        .id_salt("protein_sequence")
        .default_open(false)
        .show(ui, |ui| {
            ui.label(RichText::new(&protein.sequence).monospace().small());
        });
}

pub(crate) fn fasta_input_panel(
    ui: &mut Ui,
    state: &ControllerState,
    text: &mut String,
    actions: &mut Vec<UiAction>,
) {
    ui.label_subheader(&UI_TEXT.fasta_title);
    let response = ui.add(
        TextEdit::multiline(text)
            .hint_text(UI_TEXT.fasta_hint.as_str())
            .font(TextStyle::Monospace)
            .desired_rows(10)
            .desired_width(f32::INFINITY),
    );
    if response.changed() {
        actions.push(UiAction::FastaEdited);
    }

    if let ModeState::Fasta {
        sequence: Some(sequence),
    } = &state.mode_state
    {
        ui.colored_label(
            UI_CONFIG.colors.success,
            format!("{} ({} aa)", UI_TEXT.fasta_valid, sequence.len()),
        );
        if let Some(header) = sequence.header() {
            ui.label_subdued(header);
        }
    } else {
        ui.label_subdued(format!(
            "Minimum {} amino acids",
            VALIDATION.min_sequence_length
        ));
    }
}

pub(crate) fn batch_input_panel(
    ui: &mut Ui,
    engine: &AnalysisEngine,
    actions: &mut Vec<UiAction>,
) {
    ui.label_subheader(&UI_TEXT.batch_title);
    ui.label_subdued(&UI_TEXT.batch_hint);

    if let Some(file_name) = &engine.batch_loading {
        ui.horizontal(|ui| {
            ui.spinner();
            ui.label_subdued(format!("{} ({})", UI_TEXT.batch_checking, file_name));
        });
        return;
    }

    let ModeState::Batch {
        accessions,
        not_found,
        file_name,
    } = &engine.state().mode_state
    else {
        return;
    };

    if accessions.is_empty() && not_found.is_empty() {
        Frame::group(ui.style()).show(ui, |ui| {
            ui.set_min_height(60.0);
            ui.centered_and_justified(|ui| {
                ui.label(RichText::new(&UI_TEXT.batch_drop_prompt).color(UI_CONFIG.colors.info));
            });
        });
        return;
    }

    if let Some(name) = file_name {
        ui.metric("File", name, UI_CONFIG.colors.info);
    }
    ui.label_subdued(format!(
        "{} / {} proteins",
        accessions.len() + not_found.len(),
        VALIDATION.max_batch_entries
    ));

    ScrollArea::vertical()
        .id_salt("batch_list")
        .max_height(220.0)
        .show(ui, |ui| {
            for accession in accessions {
                ui.horizontal(|ui| {
                    ui.label(RichText::new(accession).monospace());
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button(ICON_CLOSE).clicked() {
                            actions.push(UiAction::RemoveAccession(accession.clone()));
                        }
                    });
                });
            }
            for accession in not_found {
                ui.horizontal(|ui| {
                    ui.label(
                        RichText::new(accession)
                            .monospace()
                            .strikethrough()
                            .color(UI_CONFIG.colors.warning),
                    )
                    .on_hover_text(&UI_TEXT.batch_not_found);
                    ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                        if ui.small_button(ICON_CLOSE).clicked() {
                            actions.push(UiAction::RemoveAccession(accession.clone()));
                        }
                    });
                });
            }
        });

    ui.label_subdued(&UI_TEXT.batch_defaults_note);
}

/// Detection mode for every workflow; numeric parameters only where the request carries them.
pub(crate) fn parameters_panel(
    ui: &mut Ui,
    state: &ControllerState,
    actions: &mut Vec<UiAction>,
) {
    ui.label_subheader(&UI_TEXT.params_title);

    let mut detection_mode = state.detection_mode;
    ui.horizontal(|ui| {
        ui.label_subdued(&UI_TEXT.params_mode);
        ComboBox::from_id_salt("detection_mode")
            .selected_text(detection_mode.to_string())
            .show_ui(ui, |ui| {
                for option in DetectionMode::iter() {
                    ui.selectable_value(&mut detection_mode, option, option.to_string());
                }
            });
    });
    if detection_mode != state.detection_mode {
        actions.push(UiAction::SetDetectionMode(detection_mode));
    }

    if matches!(state.mode_state, ModeState::Batch { .. }) {
        return;
    }

    let mut params: DetectionParameters = state.params;
    Grid::new("params_grid")
        .num_columns(2)
        .spacing([8.0, 4.0])
        .show(ui, |ui| {
            ui.label_subdued(&UI_TEXT.params_signal);
            ui.add(DragValue::new(&mut params.signal_peptide_length).range(0..=200));
            ui.end_row();

            ui.label_subdued(&UI_TEXT.params_sites);
            ui.add(DragValue::new(&mut params.min_cleavage_sites).range(1..=50));
            ui.end_row();

            ui.label_subdued(&UI_TEXT.params_spacing);
            ui.add(DragValue::new(&mut params.min_cleavage_spacing).range(1..=100));
            ui.end_row();

            ui.label_subdued(&UI_TEXT.params_max_len);
            ui.add(DragValue::new(&mut params.max_peptide_length).range(1..=1000));
            ui.end_row();
        });
    if params != state.params {
        actions.push(UiAction::SetParams(params));
    }

    if state.params_diverged() {
        ui.horizontal(|ui| {
            ui.colored_label(UI_CONFIG.colors.warning, &UI_TEXT.params_modified);
            if ui.small_button(&UI_TEXT.params_reset).clicked() {
                actions.push(UiAction::ResetParams);
            }
        });
    } else if state.recommended.is_none() && state.params != DETECTION.fasta {
        ui.label_subdued(format!(
            "Defaults: signal {}, sites {}, spacing {}, max length {}",
            DETECTION.fasta.signal_peptide_length,
            DETECTION.fasta.min_cleavage_sites,
            DETECTION.fasta.min_cleavage_spacing,
            DETECTION.fasta.max_peptide_length
        ));
    }
}

pub(crate) fn action_buttons(ui: &mut Ui, state: &ControllerState, actions: &mut Vec<UiAction>) {
    ui.horizontal(|ui| {
        let analyze = Button::new(ui.button_text_primary(&UI_TEXT.analyze_button));
        if ui.add_enabled(state.can_analyze(), analyze).clicked() {
            actions.push(UiAction::Analyze);
        }
        if ui
            .add_enabled(!state.is_busy(), Button::new(&UI_TEXT.clear_button))
            .clicked()
        {
            actions.push(UiAction::Clear);
        }
        if state.is_busy() {
            ui.spinner();
            ui.label_subdued(&UI_TEXT.analyzing);
        }
    });
}

pub(crate) fn message_frames(ui: &mut Ui, state: &ControllerState) {
    if let Some(error) = &state.error {
        notice_frame(ui, error, UI_CONFIG.colors.error);
    }
    if let Some(warning) = &state.warning {
        notice_frame(ui, warning, UI_CONFIG.colors.warning);
    }
}

fn notice_frame(ui: &mut Ui, text: &str, color: Color32) {
    Frame::group(ui.style())
        .stroke((1.0, color))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(RichText::new(text).color(color));
        });
}

/// Headline numbers for the right-hand panel.
pub(crate) fn results_summary_panel(
    ui: &mut Ui,
    engine: &AnalysisEngine,
    actions: &mut Vec<UiAction>,
) {
    ui.heading(&UI_TEXT.results_title);
    ui.separator();

    let Some(results) = &engine.state().results else {
        ui.label_subdued(&UI_TEXT.results_empty);
        return;
    };

    match results.as_ref() {
        AnalysisResultSet::Single(result) | AnalysisResultSet::Fasta(result) => {
            single_summary(ui, result)
        }
        AnalysisResultSet::Batch(batch) => batch_summary(ui, batch),
    }

    ui.metric(
        &UI_TEXT.params_mode,
        &results.detection_mode().to_string(),
        UI_CONFIG.colors.info,
    );
    if let Some(ms) = engine.last_duration_ms {
        ui.metric(
            "Time",
            &format_elapsed(std::time::Duration::from_millis(ms as u64)),
            Color32::GRAY,
        );
    }

    spaced_separator(ui);
    if ui.button(&UI_TEXT.download_button).clicked() {
        actions.push(UiAction::Download);
    }
}

fn single_summary(ui: &mut Ui, result: &SingleResult) {
    if let Some(id) = &result.protein_id {
        ui.label(RichText::new(id).strong().color(UI_CONFIG.colors.heading));
    }
    if let Some(name) = &result.protein_name {
        ui.label_subdued(name);
    }
    ui.add_space(4.0);

    let neutral = Color32::WHITE;
    ui.metric(
        &UI_TEXT.results_sequence_length,
        &format!("{} aa", result.sequence_length),
        neutral,
    );
    ui.metric(
        &UI_TEXT.results_cleavage_sites,
        &result.cleavage_sites_count.to_string(),
        neutral,
    );
    ui.metric(
        &UI_TEXT.results_peptides,
        &result.peptides.len().to_string(),
        UI_CONFIG.colors.success,
    );
    ui.metric(
        &UI_TEXT.results_in_range,
        &result.peptides_in_range.to_string(),
        neutral,
    );

    if !result.cleavage_motif_counts.is_empty() {
        ui.add_space(6.0);
        ui.label_subheader(&UI_TEXT.results_motifs);
        Grid::new("motif_grid").striped(true).show(ui, |ui| {
            for (motif, count) in &result.cleavage_motif_counts {
                ui.label(RichText::new(motif).monospace());
                ui.label(count.to_string());
                ui.end_row();
            }
        });
    }
}

fn batch_summary(ui: &mut Ui, batch: &BatchResult) {
    let stats = batch.stats();
    let neutral = Color32::WHITE;
    ui.metric(
        &UI_TEXT.results_batch_proteins,
        &format!("{} / {}", stats.total_proteins, batch.total_submitted),
        neutral,
    );
    ui.metric(
        &UI_TEXT.results_peptides,
        &stats.total_peptides.to_string(),
        UI_CONFIG.colors.success,
    );
    ui.metric(
        &UI_TEXT.results_batch_avg,
        &stats.avg_peptides_per_protein.to_string(),
        neutral,
    );

    ui.add_space(4.0);
    for entry in batch.successes() {
        ui.metric(
            &entry.id_gene_name(),
            &entry.peptides().len().to_string(),
            neutral,
        );
    }

    if !batch.failed_ids.is_empty() {
        ui.metric(
            &UI_TEXT.results_batch_failed,
            &batch.failed_ids.join(", "),
            UI_CONFIG.colors.warning,
        );
    }
}
