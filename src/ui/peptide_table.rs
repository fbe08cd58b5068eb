use eframe::egui::{Align, Layout, RichText, Ui};
use egui_extras::{Column, TableBuilder};

use crate::models::{AnalysisResultSet, PeptideResult};
use crate::ui::styles::{BadgeColor, UiStyleExt};
use crate::ui::{UI_CONFIG, UI_TEXT, UiAction};
use crate::ui::ui_text::ICON_BRAIN;

/// One table line: the owning protein (batch only) and the peptide.
struct Row<'a> {
    protein: Option<String>,
    peptide: &'a PeptideResult,
}

fn rows(results: &AnalysisResultSet) -> Vec<Row<'_>> {
    match results {
        AnalysisResultSet::Single(r) | AnalysisResultSet::Fasta(r) => r
            .peptides
            .iter()
            .map(|peptide| Row {
                protein: None,
                peptide,
            })
            .collect(),
        AnalysisResultSet::Batch(batch) => batch
            .successes()
            .flat_map(|entry| {
                let label = entry.id_gene_name();
                entry.peptides().iter().map(move |peptide| Row {
                    protein: Some(label.clone()),
                    peptide,
                })
            })
            .collect(),
    }
}

pub(crate) fn render_peptide_table(
    ui: &mut Ui,
    results: &AnalysisResultSet,
    actions: &mut Vec<UiAction>,
) {
    let rows = rows(results);
    if rows.is_empty() {
        ui.centered_and_justified(|ui| {
            ui.label_subdued("No peptides predicted with these parameters");
        });
        return;
    }

    let show_protein = matches!(results, AnalysisResultSet::Batch(_));
    let show_confidence = results.detection_mode().reports_confidence();
    let row_height = UI_CONFIG.table_row_height;

    let mut table = TableBuilder::new(ui)
        .striped(true)
        .resizable(true)
        .cell_layout(Layout::left_to_right(Align::Center))
        .column(Column::exact(36.0));
    if show_protein {
        table = table.column(Column::auto().at_least(110.0));
    }
    table = table
        .column(Column::initial(220.0).at_least(80.0).clip(true))
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto())
        .column(Column::auto().at_least(60.0));
    if show_confidence {
        table = table.column(Column::auto());
    }
    table = table.column(Column::remainder());

    table
        .header(row_height + 2.0, |mut header| {
            let mut heading = |label: &str| {
                header.col(|ui| {
                    ui.strong(label);
                });
            };
            heading(UI_TEXT.col_index.as_str());
            if show_protein {
                heading("Protein");
            }
            heading(UI_TEXT.col_sequence.as_str());
            heading(UI_TEXT.col_position.as_str());
            heading(UI_TEXT.col_length.as_str());
            heading(UI_TEXT.col_score.as_str());
            heading(UI_TEXT.col_size.as_str());
            heading(UI_TEXT.col_motif.as_str());
            heading(UI_TEXT.col_brain.as_str());
            heading(UI_TEXT.col_ptms.as_str());
            if show_confidence {
                heading(UI_TEXT.col_confidence.as_str());
            }
            heading(UI_TEXT.col_uniprot.as_str());
        })
        .body(|body| {
            body.rows(row_height, rows.len(), |mut table_row| {
                let row = &rows[table_row.index()];
                let peptide = row.peptide;
                let index = table_row.index() + 1;

                table_row.col(|ui| {
                    if ui.small_button(index.to_string()).clicked() {
                        actions.push(UiAction::ShowPeptide(peptide.clone()));
                    }
                });
                if show_protein {
                    table_row.col(|ui| {
                        ui.label(RichText::new(row.protein.as_deref().unwrap_or("")).small());
                    });
                }
                table_row.col(|ui| {
                    ui.label(RichText::new(&peptide.sequence).monospace());
                });
                table_row.col(|ui| {
                    ui.label(peptide.position_label());
                });
                table_row.col(|ui| {
                    ui.label(peptide.length.to_string());
                });
                table_row.col(|ui| {
                    let score = peptide.bioactivity_score;
                    ui.label(
                        RichText::new(format!("{:.1}%", score))
                            .color(UI_CONFIG.bioactivity_color(score)),
                    )
                    .on_hover_text(peptide.bioactivity_source.export_label());
                });
                table_row.col(|ui| {
                    let size = peptide.size_category();
                    ui.badge(size.to_string(), size.color())
                        .on_hover_text(size.range_label());
                });
                table_row.col(|ui| {
                    ui.label(RichText::new(&peptide.cleavage_motif).monospace().small());
                });
                table_row.col(|ui| match &peptide.brain_peptide {
                    Some(brain) if brain.found => {
                        let level = brain.detection_confidence();
                        ui.badge(ICON_BRAIN, level.color())
                            .on_hover_text(format!("{} ({} MS/MS)", level, brain.msms_count));
                    }
                    _ => {
                        ui.label_subdued("-");
                    }
                });
                table_row.col(|ui| {
                    if peptide.ptms.is_empty() {
                        ui.label_subdued("-");
                    } else {
                        let icons: String = peptide.ptms.iter().map(|p| p.emoji.as_str()).collect();
                        ui.label(icons).on_hover_text(peptide.ptm_label());
                    }
                });
                if show_confidence {
                    table_row.col(|ui| {
                        ui.label(RichText::new(peptide.confidence_label()).small());
                    });
                }
                table_row.col(|ui| {
                    let name = peptide.uniprot_name.as_deref().unwrap_or("-");
                    let label = ui.label(RichText::new(name).small());
                    if let Some(status) = &peptide.uniprot_status {
                        label.on_hover_text(status.export_label());
                    }
                });
            });
        });
}
