//! The mode controller: one state record, replaced whole by each named transition.

use std::mem;
use std::sync::Arc;

use crate::analysis::{aggregate_batch, ensure_standard_residues};
use crate::config::{DETECTION, DF, VALIDATION};
use crate::data::{RawResponse, not_found_warning};
use crate::domain::{DetectionMode, DetectionParameters, ProteinRef, ValidatedSequence};
use crate::error::{AnalysisError, GatewayError, TransitionError, ValidationError};
use crate::models::{AnalysisMode, AnalysisRequest, AnalysisResultSet, SingleResult};

use super::state::{ControllerState, ModeState};

/// A dispatched request, tagged with the generation it belongs to.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisTicket {
    pub generation: u64,
    pub request: AnalysisRequest,
    /// Batch accessions dropped by the lookup step, folded into the aggregate as failures.
    pub not_found: Vec<String>,
}

/// What happened to a response handed back to the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    Applied,
    /// The state moved on while the request was outstanding; the response was dropped.
    Stale,
}

/// Outcome of a destructive action that may need the user to confirm first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Done,
    NeedsConfirmation,
}

#[derive(Debug, Default)]
pub struct ModeController {
    state: ControllerState,
}

impl ModeController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ControllerState {
        &self.state
    }

    pub fn mode(&self) -> AnalysisMode {
        self.state.mode()
    }

    fn apply(&mut self, label: &str, transition: impl FnOnce(ControllerState) -> ControllerState) {
        let previous = mem::take(&mut self.state);
        self.state = transition(previous);

        #[cfg(debug_assertions)]
        if DF.log_controller {
            log::info!(
                "CONTROLLER: {} -> {} (gen {}, in flight {:?})",
                label,
                self.state.mode(),
                self.state.generation,
                self.state.in_flight
            );
        }
        #[cfg(not(debug_assertions))]
        let _ = label;
    }

    fn require_mode(&self, action: &'static str, expected: AnalysisMode) -> Result<(), TransitionError> {
        let actual = self.mode();
        if actual == expected {
            Ok(())
        } else {
            Err(TransitionError::WrongMode {
                action,
                expected,
                actual,
            })
        }
    }

    /// Full reset into `mode`. Selecting the active mode again is a no-op.
    pub fn switch_mode(&mut self, mode: AnalysisMode) {
        if mode == self.mode() {
            return;
        }
        self.apply("switch_mode", |s| {
            ControllerState::initial(mode, s.generation + 1, s.in_flight)
        });
    }

    /// Store (or clear, with `None`) the selected protein. Recommended parameters overwrite the
    /// current ones.
    pub fn select_protein(&mut self, protein: Option<ProteinRef>) -> Result<(), TransitionError> {
        self.require_mode("Protein selection", AnalysisMode::Single)?;
        self.apply("select_protein", |s| {
            let recommended = protein
                .as_ref()
                .and_then(|p| p.recommended_params)
                .map(DetectionParameters::sanitized);
            let params = match (&protein, recommended) {
                (_, Some(rec)) => rec,
                (Some(_), None) => DETECTION.single,
                (None, None) => s.params,
            };
            ControllerState {
                mode_state: ModeState::Single { protein },
                params,
                recommended,
                results: None,
                error: None,
                warning: None,
                generation: s.generation + 1,
                ..s
            }
        });
        Ok(())
    }

    /// Store (or clear) the validated FASTA input. Parameters go back to the FASTA defaults.
    pub fn validate_fasta(
        &mut self,
        sequence: Option<ValidatedSequence>,
    ) -> Result<(), TransitionError> {
        self.require_mode("Sequence input", AnalysisMode::Fasta)?;
        self.apply("validate_fasta", |s| ControllerState {
            mode_state: ModeState::Fasta { sequence },
            params: DETECTION.fasta,
            recommended: None,
            error: None,
            generation: s.generation + 1,
            ..s
        });
        Ok(())
    }

    /// Store an uploaded accession list. `not_found` holds the ids the lookup step dropped; they
    /// are not sent but still count against the batch.
    pub fn upload_batch(
        &mut self,
        accessions: Vec<String>,
        not_found: Vec<String>,
        file_name: String,
    ) -> Result<(), TransitionError> {
        self.require_mode("Batch upload", AnalysisMode::Batch)?;
        if accessions.is_empty() {
            let err = ValidationError::NoValidAccessions;
            self.report_input_error(&err);
            return Err(err.into());
        }
        let warning = not_found_warning(&not_found);
        self.apply("upload_batch", |s| ControllerState {
            mode_state: ModeState::Batch {
                accessions,
                not_found,
                file_name: Some(file_name),
            },
            results: None,
            error: None,
            warning,
            generation: s.generation + 1,
            ..s
        });
        Ok(())
    }

    /// Drop one accession. An emptied list forgets its file name too.
    pub fn remove_from_batch(&mut self, accession: &str) -> Result<(), TransitionError> {
        self.require_mode("Batch editing", AnalysisMode::Batch)?;
        self.apply("remove_from_batch", |s| {
            let mode_state = match s.mode_state {
                ModeState::Batch {
                    accessions,
                    not_found,
                    file_name,
                } => {
                    let accessions: Vec<String> =
                        accessions.into_iter().filter(|a| a != accession).collect();
                    let not_found: Vec<String> =
                        not_found.into_iter().filter(|a| a != accession).collect();
                    let file_name = if accessions.is_empty() && not_found.is_empty() {
                        None
                    } else {
                        file_name
                    };
                    ModeState::Batch {
                        accessions,
                        not_found,
                        file_name,
                    }
                }
                other => other,
            };
            ControllerState {
                mode_state,
                generation: s.generation + 1,
                ..s
            }
        });
        Ok(())
    }

    pub fn set_params(&mut self, params: DetectionParameters) {
        if params == self.state.params {
            return;
        }
        self.apply("set_params", |s| ControllerState {
            params: params.sanitized(),
            ..s
        });
    }

    pub fn set_detection_mode(&mut self, detection_mode: DetectionMode) {
        if detection_mode == self.state.detection_mode {
            return;
        }
        self.apply("set_detection_mode", |s| ControllerState {
            detection_mode,
            ..s
        });
    }

    /// Restore the selected protein's recommended parameters. Returns false when there are none.
    pub fn reset_to_recommended(&mut self) -> bool {
        let Some(recommended) = self.state.recommended else {
            return false;
        };
        self.apply("reset_to_recommended", |s| ControllerState {
            params: recommended,
            ..s
        });
        true
    }

    /// Show a local input problem without touching anything else.
    pub fn report_input_error(&mut self, error: &ValidationError) {
        let message = error.user_message();
        self.apply("report_input_error", |s| ControllerState {
            error: Some(message),
            ..s
        });
    }

    pub fn set_warning(&mut self, warning: Option<String>) {
        self.apply("set_warning", |s| ControllerState { warning, ..s });
    }

    /// Build the request for the active mode and mark it in flight.
    pub fn begin_analysis(&mut self) -> Result<AnalysisTicket, TransitionError> {
        if self.state.is_busy() {
            return Err(TransitionError::Busy);
        }

        let request = match self.build_request() {
            Ok(request) => request,
            Err(err) => {
                self.report_input_error(&err);
                return Err(err.into());
            }
        };

        let not_found = match &self.state.mode_state {
            ModeState::Batch { not_found, .. } => not_found.clone(),
            _ => Vec::new(),
        };
        let generation = self.state.generation;
        self.apply("begin_analysis", |s| ControllerState {
            results: None,
            error: None,
            warning: None,
            in_flight: Some(generation),
            ..s
        });

        Ok(AnalysisTicket {
            generation,
            request,
            not_found,
        })
    }

    fn build_request(&self) -> Result<AnalysisRequest, ValidationError> {
        let s = &self.state;
        let no_target = ValidationError::NoTarget { mode: s.mode() };
        match &s.mode_state {
            ModeState::Single { protein } => {
                let protein = protein.as_ref().ok_or(no_target)?;
                Ok(AnalysisRequest::Single {
                    protein_id: protein.accession.clone(),
                    params: s.params,
                    mode: s.detection_mode,
                })
            }
            ModeState::Fasta { sequence } => {
                let sequence = sequence.as_ref().ok_or(no_target)?;
                ensure_standard_residues(sequence, &VALIDATION)?;
                Ok(AnalysisRequest::Fasta {
                    sequence: sequence.clone(),
                    params: s.params,
                    mode: s.detection_mode,
                })
            }
            ModeState::Batch {
                accessions,
                not_found,
                ..
            } => {
                if accessions.is_empty() {
                    return Err(no_target);
                }
                let count = accessions.len() + not_found.len();
                if count > VALIDATION.max_batch_entries {
                    return Err(ValidationError::TooManyEntries {
                        count,
                        max: VALIDATION.max_batch_entries,
                    });
                }
                Ok(AnalysisRequest::Batch {
                    protein_ids: accessions.clone(),
                    mode: s.detection_mode,
                })
            }
        }
    }

    /// Hand a gateway outcome back. Responses for an older generation are dropped.
    pub fn finish_analysis(
        &mut self,
        ticket: AnalysisTicket,
        outcome: Result<RawResponse, GatewayError>,
    ) -> Completion {
        let in_flight = match self.state.in_flight {
            Some(g) if g == ticket.generation => None,
            other => other,
        };

        if ticket.generation != self.state.generation {
            log::info!(
                "CONTROLLER: dropping stale response for gen {} (now gen {})",
                ticket.generation,
                self.state.generation
            );
            self.apply("finish_analysis (stale)", |s| ControllerState { in_flight, ..s });
            return Completion::Stale;
        }

        let normalized = outcome
            .map_err(AnalysisError::from)
            .and_then(|raw| normalize(&ticket, raw));

        match normalized {
            Ok((results, warning)) => {
                self.apply("finish_analysis (ok)", |s| ControllerState {
                    results: Some(Arc::new(results)),
                    error: None,
                    warning,
                    in_flight,
                    ..s
                });
            }
            Err(err) => {
                log::warn!("CONTROLLER: {} failed: {}", ticket.request.describe(), err);
                let message = err.user_message();
                self.apply("finish_analysis (error)", |s| ControllerState {
                    results: None,
                    error: Some(message),
                    warning: None,
                    in_flight,
                    ..s
                });
            }
        }
        Completion::Applied
    }

    /// Back to the initial state. Needs confirmation.
    pub fn new_analysis(&mut self, confirmed: bool) -> Confirmation {
        if !confirmed {
            return Confirmation::NeedsConfirmation;
        }
        self.apply("new_analysis", |s| {
            ControllerState::initial(AnalysisMode::Single, s.generation + 1, s.in_flight)
        });
        Confirmation::Done
    }

    /// Clear the active mode's input and results. Needs confirmation only when results exist.
    pub fn clear(&mut self, confirmed: bool) -> Confirmation {
        if self.state.results.is_some() && !confirmed {
            return Confirmation::NeedsConfirmation;
        }
        self.apply("clear", |s| {
            ControllerState::initial(s.mode(), s.generation + 1, s.in_flight)
        });
        Confirmation::Done
    }
}

/// Turn a raw response into a result set, routing batches through the aggregator.
fn normalize(
    ticket: &AnalysisTicket,
    raw: RawResponse,
) -> Result<(AnalysisResultSet, Option<String>), AnalysisError> {
    let request = &ticket.request;
    let detection_mode = request.detection_mode();
    match (request, raw) {
        (AnalysisRequest::Single { .. }, RawResponse::Single(r)) => Ok((
            AnalysisResultSet::Single(SingleResult::from_response(
                r,
                AnalysisMode::Single,
                detection_mode,
            )?),
            None,
        )),
        (AnalysisRequest::Fasta { sequence, .. }, RawResponse::Single(mut r)) => {
            if r.fasta_header.is_none() {
                r.fasta_header = sequence.header().map(str::to_string);
            }
            Ok((
                AnalysisResultSet::Fasta(SingleResult::from_response(
                    r,
                    AnalysisMode::Fasta,
                    detection_mode,
                )?),
                None,
            ))
        }
        (AnalysisRequest::Batch { protein_ids, .. }, RawResponse::Batch(b)) => {
            let summary = aggregate_batch(protein_ids, &ticket.not_found, b, detection_mode)?;
            Ok((AnalysisResultSet::Batch(summary.result), summary.warning))
        }
        (request, _) => Err(GatewayError::InvalidResponse {
            reason: format!("response shape does not match {} request", request.analysis_mode()),
        }
        .into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::validate_fasta;
    use crate::data::{BatchItem, BatchResponse, ItemStatus, SingleResponse};
    use crate::models::fixtures::peptide;

    fn pomc() -> ProteinRef {
        ProteinRef {
            accession: "P01189".into(),
            gene_name: "POMC".into(),
            protein_name: Some("Pro-opiomelanocortin".into()),
            sequence: "M".repeat(267),
            signal_peptide_end: Some(26),
            fasta_header: None,
            recommended_params: Some(DetectionParameters {
                signal_peptide_length: 26,
                min_cleavage_sites: 3,
                min_cleavage_spacing: 4,
                max_peptide_length: 80,
            }),
        }
    }

    fn single_response() -> RawResponse {
        RawResponse::Single(SingleResponse {
            sequence_length: 267,
            cleavage_sites_count: 2,
            peptides: vec![peptide("YGGFM", 237, "KR")],
            peptides_in_range: 1,
            protein_id: Some("P01189".into()),
            gene_name: Some("POMC".into()),
            protein_name: None,
            mode: None,
            fasta_header: None,
        })
    }

    #[test]
    fn starts_in_single_mode() {
        let c = ModeController::new();
        assert_eq!(c.mode(), AnalysisMode::Single);
        assert!(!c.state().can_analyze());
    }

    #[test]
    fn recommended_params_seed_and_reset() {
        let mut c = ModeController::new();
        c.select_protein(Some(pomc())).unwrap();
        let rec = c.state().recommended.unwrap();
        assert_eq!(c.state().params, rec);
        assert!(!c.state().params_diverged());

        c.set_params(DetectionParameters {
            max_peptide_length: 50,
            ..rec
        });
        assert!(c.state().params_diverged());
        assert!(c.reset_to_recommended());
        assert_eq!(c.state().params, rec);
    }

    #[test]
    fn wrong_mode_is_refused() {
        let mut c = ModeController::new();
        let err = c.upload_batch(vec!["P01189".into()], vec![], "a.txt".into()).unwrap_err();
        assert!(matches!(err, TransitionError::WrongMode { expected: AnalysisMode::Batch, .. }));
    }

    #[test]
    fn analyze_without_target_stores_error() {
        let mut c = ModeController::new();
        let err = c.begin_analysis().unwrap_err();
        assert!(matches!(err, TransitionError::Validation(ValidationError::NoTarget { .. })));
        assert!(c.state().error.is_some());
        assert!(!c.state().is_busy());
    }

    #[test]
    fn one_request_in_flight() {
        let mut c = ModeController::new();
        c.select_protein(Some(pomc())).unwrap();
        let ticket = c.begin_analysis().unwrap();
        assert_eq!(c.begin_analysis().unwrap_err(), TransitionError::Busy);
        assert_eq!(c.finish_analysis(ticket, Ok(single_response())), Completion::Applied);
        assert!(!c.state().is_busy());
        assert!(c.state().results.is_some());
    }

    #[test]
    fn stale_response_is_discarded_after_mode_switch() {
        let mut c = ModeController::new();
        c.select_protein(Some(pomc())).unwrap();
        let ticket = c.begin_analysis().unwrap();

        c.switch_mode(AnalysisMode::Fasta);
        // Still busy: the old request has not come back yet.
        assert!(c.state().is_busy());

        assert_eq!(c.finish_analysis(ticket, Ok(single_response())), Completion::Stale);
        assert!(c.state().results.is_none());
        assert!(!c.state().is_busy());
        assert_eq!(c.mode(), AnalysisMode::Fasta);
    }

    #[test]
    fn gateway_failure_clears_results() {
        let mut c = ModeController::new();
        c.select_protein(Some(pomc())).unwrap();
        let ticket = c.begin_analysis().unwrap();
        c.finish_analysis(
            ticket,
            Err(GatewayError::NetworkUnreachable {
                reason: "connection refused".into(),
            }),
        );
        assert!(c.state().results.is_none());
        assert_eq!(
            c.state().error.as_deref(),
            Some("Error: Cannot reach API server. Check your connection.")
        );
    }

    #[test]
    fn fasta_resets_params_and_checks_residues() {
        let mut c = ModeController::new();
        c.switch_mode(AnalysisMode::Fasta);
        c.set_params(DetectionParameters {
            signal_peptide_length: 0,
            ..DETECTION.fasta
        });
        let seq = validate_fasta(&format!("{}X", "MPRSCCSRSGALLLALLLQASMEVRGWCLESSQ")).unwrap();
        c.validate_fasta(Some(seq)).unwrap();
        assert_eq!(c.state().params, DETECTION.fasta);

        let err = c.begin_analysis().unwrap_err();
        assert!(matches!(
            err,
            TransitionError::Validation(ValidationError::NonStandardResidues { .. })
        ));
        assert!(!c.state().is_busy());
    }

    #[test]
    fn removing_last_accession_forgets_file() {
        let mut c = ModeController::new();
        c.switch_mode(AnalysisMode::Batch);
        c.upload_batch(vec!["P01189".into(), "P01308".into()], vec![], "list.txt".into())
            .unwrap();
        c.remove_from_batch("P01189").unwrap();
        assert!(matches!(
            &c.state().mode_state,
            ModeState::Batch { accessions, file_name: Some(_), .. } if accessions.len() == 1
        ));
        c.remove_from_batch("P01308").unwrap();
        assert_eq!(
            c.state().mode_state,
            ModeState::Batch {
                accessions: vec![],
                not_found: vec![],
                file_name: None
            }
        );
    }

    #[test]
    fn batch_total_failure_is_an_error() {
        let mut c = ModeController::new();
        c.switch_mode(AnalysisMode::Batch);
        c.upload_batch(vec!["P01189".into()], vec![], "list.txt".into()).unwrap();
        let ticket = c.begin_analysis().unwrap();
        c.finish_analysis(
            ticket,
            Ok(RawResponse::Batch(BatchResponse {
                results: vec![BatchItem {
                    status: ItemStatus::Error,
                    accession: Some("P01189".into()),
                    protein_id: None,
                    gene_name: None,
                    protein_name: None,
                    peptides: None,
                    error: Some("boom".into()),
                }],
                total_proteins: 1,
                successful_proteins: 0,
                failed_proteins: 1,
            })),
        );
        assert!(c.state().results.is_none());
        assert!(c.state().error.as_deref().unwrap().contains("No proteins were successfully analyzed"));
    }

    #[test]
    fn lookup_misses_stay_in_the_batch_aggregate() {
        let mut c = ModeController::new();
        c.switch_mode(AnalysisMode::Batch);
        c.upload_batch(vec!["P01189".into()], vec!["P01308".into()], "list.txt".into())
            .unwrap();
        assert_eq!(c.state().warning.as_deref(), Some("1 proteins not found: P01308"));

        let ticket = c.begin_analysis().unwrap();
        assert!(matches!(
            &ticket.request,
            AnalysisRequest::Batch { protein_ids, .. } if protein_ids == &vec!["P01189".to_string()]
        ));
        assert_eq!(ticket.not_found, vec!["P01308"]);

        c.finish_analysis(
            ticket,
            Ok(RawResponse::Batch(BatchResponse {
                results: vec![BatchItem {
                    status: ItemStatus::Success,
                    accession: Some("P01189".into()),
                    protein_id: Some("P01189".into()),
                    gene_name: Some("POMC".into()),
                    protein_name: None,
                    peptides: Some(vec![peptide("YGGFM", 237, "KR")]),
                    error: None,
                }],
                total_proteins: 1,
                successful_proteins: 1,
                failed_proteins: 0,
            })),
        );

        let Some(AnalysisResultSet::Batch(batch)) = c.state().results.as_deref() else {
            panic!("expected batch results");
        };
        assert_eq!(batch.total_submitted, 2);
        assert_eq!(batch.successful(), 1);
        assert_eq!(batch.failed_ids, vec!["P01308"]);
        assert!(c.state().warning.as_deref().unwrap_or("").contains("P01308"));
    }

    #[test]
    fn removing_a_missing_accession_keeps_the_file() {
        let mut c = ModeController::new();
        c.switch_mode(AnalysisMode::Batch);
        c.upload_batch(vec!["P01189".into()], vec!["P01308".into()], "list.txt".into())
            .unwrap();
        c.remove_from_batch("P01308").unwrap();
        assert_eq!(
            c.state().mode_state,
            ModeState::Batch {
                accessions: vec!["P01189".into()],
                not_found: vec![],
                file_name: Some("list.txt".into())
            }
        );
    }

    #[test]
    fn clear_asks_only_when_results_exist() {
        let mut c = ModeController::new();
        c.select_protein(Some(pomc())).unwrap();
        assert_eq!(c.clear(false), Confirmation::Done);
        assert!(!c.state().mode_state.has_target());

        c.select_protein(Some(pomc())).unwrap();
        let ticket = c.begin_analysis().unwrap();
        c.finish_analysis(ticket, Ok(single_response()));
        assert_eq!(c.clear(false), Confirmation::NeedsConfirmation);
        assert!(c.state().results.is_some());
        assert_eq!(c.clear(true), Confirmation::Done);
        assert!(c.state().results.is_none());
    }

    #[test]
    fn new_analysis_returns_to_single() {
        let mut c = ModeController::new();
        c.switch_mode(AnalysisMode::Batch);
        assert_eq!(c.new_analysis(false), Confirmation::NeedsConfirmation);
        assert_eq!(c.mode(), AnalysisMode::Batch);
        assert_eq!(c.new_analysis(true), Confirmation::Done);
        assert_eq!(c.mode(), AnalysisMode::Single);
    }

    #[test]
    fn mismatched_shape_is_invalid_response() {
        let mut c = ModeController::new();
        c.select_protein(Some(pomc())).unwrap();
        let ticket = c.begin_analysis().unwrap();
        c.finish_analysis(ticket, Ok(RawResponse::Batch(BatchResponse {
            results: vec![],
            total_proteins: 0,
            successful_proteins: 0,
            failed_proteins: 0,
        })));
        assert!(c.state().error.as_deref().unwrap().contains("Invalid response"));
    }
}
