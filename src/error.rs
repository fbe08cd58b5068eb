//! Error types for the analysis client.
//!
//! Local input checks ([`ValidationError`]), the HTTP boundary ([`GatewayError`]), whole-run
//! outcomes ([`AnalysisError`]) and refused controller operations ([`TransitionError`]).

use {crate::models::AnalysisMode, thiserror::Error};

/// Rejected input. Never reaches the network.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("No sequence provided")]
    EmptyInput,

    #[error("Invalid characters found: {chars}. Only amino acids (A-Z) are allowed.")]
    InvalidCharacters { chars: String },

    #[error("Sequence too short ({length} aa). Minimum {minimum} amino acids required.")]
    TooShort { length: usize, minimum: usize },

    #[error("Unexpected extra header line: {line}")]
    MalformedHeader { line: String },

    #[error("Sequence contains non-standard residues: {residues}")]
    NonStandardResidues { residues: String },

    #[error("File must be .txt format ({file_name})")]
    InvalidFileFormat { file_name: String },

    #[error("File is empty")]
    EmptyFile,

    #[error("Too many proteins ({count}, max {max})")]
    TooManyEntries { count: usize, max: usize },

    #[error("File contains no valid UniProt IDs")]
    NoValidAccessions,

    #[error("None of the {requested} proteins were found")]
    NoProteinsFound { requested: usize },

    #[error("Nothing to analyze in {mode} mode")]
    NoTarget { mode: AnalysisMode },
}

/// Failure of a single HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GatewayError {
    /// No response at all: DNS, refused connection, timeout, CORS.
    #[error("Cannot reach API server. Check your connection. ({reason})")]
    NetworkUnreachable { reason: String },

    #[error("{message}")]
    Service { status: u16, message: String },

    #[error("{status_text}")]
    ServiceUndecodable { status: u16, status_text: String },

    /// 2xx with a body that does not match the expected shape.
    #[error("Invalid response from server: {reason}")]
    InvalidResponse { reason: String },

    #[error("Not found: {what}")]
    NotFound { what: String },
}

impl GatewayError {
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::NetworkUnreachable { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Gateway(#[from] GatewayError),

    #[error("No proteins were successfully analyzed ({submitted} submitted)")]
    BatchTotalFailure { submitted: usize },

    #[error("Peptide #{index} has inconsistent coordinates: {reason}")]
    InvalidPeptide { index: usize, reason: String },
}

/// A controller operation that is not allowed in the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TransitionError {
    #[error("{action} is only available in {expected} mode (currently {actual})")]
    WrongMode {
        action: &'static str,
        expected: AnalysisMode,
        actual: AnalysisMode,
    },

    #[error("An analysis is already running")]
    Busy,

    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl ValidationError {
    pub fn user_message(&self) -> String {
        self.to_string()
    }
}

impl GatewayError {
    pub fn user_message(&self) -> String {
        match self {
            Self::NetworkUnreachable { .. } => {
                "Error: Cannot reach API server. Check your connection.".to_string()
            }
            other => format!("Error: {}", other),
        }
    }
}

impl AnalysisError {
    /// The string the controller stores and the UI renders.
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(e) => e.user_message(),
            Self::Gateway(e) => e.user_message(),
            other => format!("Error: {}", other),
        }
    }
}
