use crate::domain::{DetectionMode, DetectionParameters};

/// Parameter defaults per workflow.
pub struct DetectionDefaults {
    pub single: DetectionParameters,
    pub fasta: DetectionParameters,
    pub mode: DetectionMode,
    /// Peptide lengths the service counts as "in range" (inclusive).
    pub optimal_length: (usize, usize),
}

pub const DETECTION: DetectionDefaults = DetectionDefaults {
    single: DetectionParameters {
        signal_peptide_length: 20,
        min_cleavage_sites: 4,
        min_cleavage_spacing: 5,
        max_peptide_length: 100,
    },
    fasta: DetectionParameters {
        signal_peptide_length: 20,
        min_cleavage_sites: 4,
        min_cleavage_spacing: 5,
        max_peptide_length: 100,
    },
    mode: DetectionMode::Permissive,
    optimal_length: (3, 50),
};
