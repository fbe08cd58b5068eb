use {
    crate::domain::{DetectionMode, DetectionParameters, ValidatedSequence},
    strum_macros::{Display, EnumIter},
};

/// The three workflows. Exactly one is active at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumIter)]
pub enum AnalysisMode {
    #[default]
    #[strum(to_string = "UniProt")]
    Single,
    #[strum(to_string = "FASTA")]
    Fasta,
    #[strum(to_string = "Batch")]
    Batch,
}

/// One submission to the analysis service.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisRequest {
    Single {
        protein_id: String,
        params: DetectionParameters,
        mode: DetectionMode,
    },
    Fasta {
        sequence: ValidatedSequence,
        params: DetectionParameters,
        mode: DetectionMode,
    },
    /// Batch runs use the service-side defaults per accession.
    Batch {
        protein_ids: Vec<String>,
        mode: DetectionMode,
    },
}

impl AnalysisRequest {
    pub fn analysis_mode(&self) -> AnalysisMode {
        match self {
            Self::Single { .. } => AnalysisMode::Single,
            Self::Fasta { .. } => AnalysisMode::Fasta,
            Self::Batch { .. } => AnalysisMode::Batch,
        }
    }

    pub fn detection_mode(&self) -> DetectionMode {
        match self {
            Self::Single { mode, .. } | Self::Fasta { mode, .. } | Self::Batch { mode, .. } => *mode,
        }
    }

    /// Short label for logs.
    pub fn describe(&self) -> String {
        match self {
            Self::Single { protein_id, mode, .. } => format!("single {} [{}]", protein_id, mode),
            Self::Fasta { sequence, mode, .. } => {
                format!("fasta {} aa [{}]", sequence.len(), mode)
            }
            Self::Batch { protein_ids, mode } => {
                format!("batch of {} [{}]", protein_ids.len(), mode)
            }
        }
    }
}
