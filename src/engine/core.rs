use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender, channel};

use crate::analysis::{check_batch_file_name, validate_batch_list, validate_fasta};
use crate::config::{DF, EXPORT, SERVICE, VALIDATION};
use crate::data::{AnalysisGateway, ProteinLookup};
use crate::domain::{ProteinCandidate, SearchKind};
use crate::error::{TransitionError, ValidationError};
use crate::export::{CsvDocument, export_results};
use crate::models::AnalysisMode;

use super::controller::{Confirmation, ModeController};
use super::messages::{JobRequest, JobResult};
use super::state::ControllerState;
use super::worker::{self, Services};

/// Search box state that lives outside the controller (it is not analysis input until selected).
#[derive(Debug, Clone, Default)]
pub struct LookupState {
    pub query: String,
    pub kind: SearchKind,
    pub candidates: Vec<ProteinCandidate>,
    pub has_searched: bool,
    pub pending: usize,
    pub error: Option<String>,
}

pub struct AnalysisEngine {
    controller: ModeController,
    pub lookup: LookupState,
    /// Batch file currently being checked against the lookup service.
    pub batch_loading: Option<String>,
    pub last_duration_ms: Option<u128>,

    services: Services,

    // Common Channels
    #[cfg_attr(target_arch = "wasm32", allow(dead_code))]
    job_tx: Sender<JobRequest>,
    result_rx: Receiver<JobResult>,

    // WASM ONLY: jobs are spawned locally and report back through this sender.
    #[cfg(target_arch = "wasm32")]
    result_tx: Sender<JobResult>,
}

impl AnalysisEngine {
    pub fn new(gateway: Arc<dyn AnalysisGateway>, lookup: Arc<dyn ProteinLookup>) -> Self {
        let (job_tx, job_rx) = channel::<JobRequest>();
        let (result_tx, result_rx) = channel::<JobResult>();
        let services = Services { gateway, lookup };

        // NATIVE: Pass the receiver to the thread.
        #[cfg(not(target_arch = "wasm32"))]
        worker::spawn_worker_thread(job_rx, result_tx, services.clone());

        #[cfg(target_arch = "wasm32")]
        drop(job_rx);

        Self {
            controller: ModeController::new(),
            lookup: LookupState::default(),
            batch_loading: None,
            last_duration_ms: None,
            services,
            job_tx,
            result_rx,
            #[cfg(target_arch = "wasm32")]
            result_tx,
        }
    }

    pub fn state(&self) -> &ControllerState {
        self.controller.state()
    }

    pub fn controller_mut(&mut self) -> &mut ModeController {
        &mut self.controller
    }

    pub fn is_busy(&self) -> bool {
        self.state().is_busy() || self.lookup.pending > 0 || self.batch_loading.is_some()
    }

    fn dispatch(&self, job: JobRequest) {
        #[cfg(not(target_arch = "wasm32"))]
        if self.job_tx.send(job).is_err() {
            log::error!("ENGINE: worker thread is gone, job dropped");
        }

        #[cfg(target_arch = "wasm32")]
        worker::spawn_local_job(job, self.result_tx.clone(), self.services.clone());
    }

    /// Drain finished jobs. Call once per frame.
    pub fn update(&mut self) {
        while let Ok(result) = self.result_rx.try_recv() {
            self.handle_result(result);
        }
    }

    fn handle_result(&mut self, result: JobResult) {
        match result {
            JobResult::Analysis {
                ticket,
                outcome,
                duration_ms,
            } => {
                #[cfg(debug_assertions)]
                if DF.log_controller {
                    log::info!(
                        "ENGINE: {} finished in {}ms",
                        ticket.request.describe(),
                        duration_ms
                    );
                }
                self.last_duration_ms = Some(duration_ms);
                self.controller.finish_analysis(ticket, outcome);
            }
            JobResult::Search { query, outcome } => {
                self.lookup.pending = self.lookup.pending.saturating_sub(1);
                if query != self.lookup.query.trim() {
                    return;
                }
                match outcome {
                    Ok(candidates) => {
                        self.lookup.error = None;
                        if let [only] = candidates.as_slice() {
                            self.fetch_protein(&only.accession);
                        }
                        self.lookup.candidates = candidates;
                    }
                    Err(e) => {
                        log::warn!("ENGINE: search {:?} failed: {}", query, e);
                        self.lookup.candidates.clear();
                        self.lookup.error = Some(e.user_message());
                    }
                }
            }
            JobResult::Fetched {
                accession,
                generation,
                outcome,
            } => {
                self.lookup.pending = self.lookup.pending.saturating_sub(1);
                if generation != self.state().generation {
                    log::info!("ENGINE: dropping late protein {}", accession);
                    return;
                }
                match outcome {
                    Ok(protein) => {
                        if let Err(e) = self.controller.select_protein(Some(protein)) {
                            log::warn!("ENGINE: protein {} arrived in wrong mode: {}", accession, e);
                        }
                    }
                    Err(e) => self.lookup.error = Some(e.user_message()),
                }
            }
            JobResult::BatchResolved {
                file_name,
                generation,
                resolution,
            } => {
                self.batch_loading = None;
                if generation != self.state().generation {
                    return;
                }
                if resolution.found.is_empty() {
                    self.controller
                        .report_input_error(&ValidationError::NoProteinsFound {
                            requested: resolution.not_found.len(),
                        });
                    return;
                }
                let found = resolution.accessions();
                if let Err(e) = self
                    .controller
                    .upload_batch(found, resolution.not_found, file_name)
                {
                    log::warn!("ENGINE: batch upload refused: {}", e);
                }
            }
        }
    }

    pub fn switch_mode(&mut self, mode: AnalysisMode) {
        self.controller.switch_mode(mode);
        self.lookup = LookupState::default();
        self.batch_loading = None;
    }

    pub fn search(&mut self, query: &str, kind: SearchKind) {
        let query = query.trim();
        self.lookup.query = query.to_string();
        self.lookup.kind = kind;
        if query.chars().count() < SERVICE.min_search_chars {
            return;
        }
        self.lookup.candidates.clear();
        self.lookup.has_searched = true;
        self.lookup.pending += 1;
        self.dispatch(JobRequest::Search {
            query: query.to_string(),
            kind,
            limit: SERVICE.search_limit,
        });
    }

    pub fn fetch_protein(&mut self, accession: &str) {
        self.lookup.pending += 1;
        self.dispatch(JobRequest::Fetch {
            accession: accession.to_string(),
            generation: self.state().generation,
        });
    }

    /// Validate pasted FASTA text and hand the outcome to the controller.
    pub fn input_fasta(&mut self, text: &str) -> Result<(), TransitionError> {
        match validate_fasta(text) {
            Ok(sequence) => self.controller.validate_fasta(Some(sequence)),
            Err(ValidationError::EmptyInput) => self.controller.validate_fasta(None),
            Err(e) => {
                self.controller.validate_fasta(None)?;
                self.controller.report_input_error(&e);
                Err(e.into())
            }
        }
    }

    /// Check an uploaded accession list locally, then confirm each id with the lookup service.
    pub fn load_batch_file(&mut self, file_name: &str, text: &str) -> Result<(), TransitionError> {
        if self.mode() != AnalysisMode::Batch {
            return Err(TransitionError::WrongMode {
                action: "Batch upload",
                expected: AnalysisMode::Batch,
                actual: self.mode(),
            });
        }
        let accessions = check_batch_file_name(file_name, &VALIDATION)
            .and_then(|_| validate_batch_list(text))
            .inspect_err(|e| self.controller.report_input_error(e))?;

        self.batch_loading = Some(file_name.to_string());
        self.dispatch(JobRequest::ResolveBatch {
            accessions,
            file_name: file_name.to_string(),
            generation: self.state().generation,
        });
        Ok(())
    }

    pub fn analyze(&mut self) -> Result<(), TransitionError> {
        let ticket = self.controller.begin_analysis()?;
        self.dispatch(JobRequest::Analyze(ticket));
        Ok(())
    }

    pub fn clear(&mut self, confirmed: bool) -> Confirmation {
        let outcome = self.controller.clear(confirmed);
        if outcome == Confirmation::Done {
            self.lookup = LookupState::default();
            self.batch_loading = None;
        }
        outcome
    }

    pub fn new_analysis(&mut self, confirmed: bool) -> Confirmation {
        let outcome = self.controller.new_analysis(confirmed);
        if outcome == Confirmation::Done {
            self.lookup = LookupState::default();
            self.batch_loading = None;
        }
        outcome
    }

    pub fn mode(&self) -> AnalysisMode {
        self.controller.mode()
    }

    /// Render the current results, if any.
    pub fn export(&self) -> Option<anyhow::Result<CsvDocument>> {
        self.state()
            .results
            .as_ref()
            .map(|results| export_results(results, EXPORT.quoting))
    }
}
