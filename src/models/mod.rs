// Analysis payloads and results
mod peptide;
mod request;
mod result_set;

pub use peptide::{
    BioactivitySource, BrainPeptide, DetectionConfidence, PeptideResult, Ptm, SizeCategory,
    UniprotStatus,
};
pub use request::{AnalysisMode, AnalysisRequest};
pub use result_set::{
    AnalysisResultSet, BatchEntry, BatchOutcome, BatchResult, BatchStats, SingleResult,
    motif_histogram,
};

pub(crate) use result_set::check_peptides;

#[cfg(test)]
pub(crate) use peptide::fixtures;
