use std::sync::Arc;

use crate::config::DETECTION;
use crate::domain::{DetectionMode, DetectionParameters, ProteinRef, ValidatedSequence};
use crate::models::{AnalysisMode, AnalysisResultSet};

/// Mode-specific input. Cross-mode combinations cannot be represented.
#[derive(Debug, Clone, PartialEq)]
pub enum ModeState {
    Single {
        protein: Option<ProteinRef>,
    },
    Fasta {
        sequence: Option<ValidatedSequence>,
    },
    Batch {
        /// Accessions confirmed by the lookup service; these are sent.
        accessions: Vec<String>,
        /// Valid accessions the lookup service did not know. Reported as failures.
        not_found: Vec<String>,
        file_name: Option<String>,
    },
}

impl ModeState {
    pub fn empty(mode: AnalysisMode) -> Self {
        match mode {
            AnalysisMode::Single => Self::Single { protein: None },
            AnalysisMode::Fasta => Self::Fasta { sequence: None },
            AnalysisMode::Batch => Self::Batch {
                accessions: Vec::new(),
                not_found: Vec::new(),
                file_name: None,
            },
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::Single { .. } => AnalysisMode::Single,
            Self::Fasta { .. } => AnalysisMode::Fasta,
            Self::Batch { .. } => AnalysisMode::Batch,
        }
    }

    pub fn has_target(&self) -> bool {
        match self {
            Self::Single { protein } => protein.is_some(),
            Self::Fasta { sequence } => sequence.is_some(),
            Self::Batch { accessions, .. } => !accessions.is_empty(),
        }
    }
}

/// Everything the mode controller owns. Replaced whole on every transition.
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerState {
    pub mode_state: ModeState,
    pub params: DetectionParameters,
    pub detection_mode: DetectionMode,
    /// Parameters suggested by the lookup service for the selected protein.
    pub recommended: Option<DetectionParameters>,
    /// The UI reads this every frame; a finished run swaps in a new pointer.
    pub results: Option<Arc<AnalysisResultSet>>,
    pub error: Option<String>,
    /// Non-fatal notice shown alongside results (partial batch failure, unknown accessions).
    pub warning: Option<String>,
    /// Generation of the request currently on the wire, if any.
    pub in_flight: Option<u64>,
    /// Bumped by every transition that invalidates outstanding work.
    pub generation: u64,
}

impl ControllerState {
    /// Fresh state for `mode`, keeping only the generation counter.
    pub fn initial(mode: AnalysisMode, generation: u64, in_flight: Option<u64>) -> Self {
        Self {
            mode_state: ModeState::empty(mode),
            params: DETECTION.fasta,
            detection_mode: DETECTION.mode,
            recommended: None,
            results: None,
            error: None,
            warning: None,
            in_flight,
            generation,
        }
    }

    pub fn mode(&self) -> AnalysisMode {
        self.mode_state.mode()
    }

    pub fn is_busy(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn can_analyze(&self) -> bool {
        !self.is_busy() && self.mode_state.has_target()
    }

    /// True when a recommendation exists and the current parameters differ from it.
    pub fn params_diverged(&self) -> bool {
        self.recommended.is_some_and(|rec| rec != self.params)
    }
}

impl Default for ControllerState {
    fn default() -> Self {
        Self::initial(AnalysisMode::default(), 0, None)
    }
}
