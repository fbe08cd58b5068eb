//! JSON bodies exchanged with the analysis and lookup services.

use {
    crate::{
        domain::DetectionMode,
        models::PeptideResult,
    },
    serde::{Deserialize, Serialize},
};

/// Response to a single-protein or FASTA submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SingleResponse {
    pub sequence_length: usize,
    pub cleavage_sites_count: usize,
    #[serde(default)]
    pub peptides: Vec<PeptideResult>,
    #[serde(default)]
    pub peptides_in_range: usize,
    #[serde(default)]
    pub protein_id: Option<String>,
    #[serde(default)]
    pub gene_name: Option<String>,
    #[serde(default)]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub mode: Option<DetectionMode>,
    #[serde(default)]
    pub fasta_header: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    Success,
    #[serde(other)]
    Error,
}

/// One accession's outcome inside a batch response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchItem {
    pub status: ItemStatus,
    #[serde(default)]
    pub accession: Option<String>,
    #[serde(default)]
    pub protein_id: Option<String>,
    #[serde(default)]
    pub gene_name: Option<String>,
    #[serde(default)]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub peptides: Option<Vec<PeptideResult>>,
    #[serde(default)]
    pub error: Option<String>,
}

impl BatchItem {
    /// The identifier the service echoed back, preferring `accession`.
    pub fn identifier(&self) -> Option<&str> {
        self.accession.as_deref().or(self.protein_id.as_deref())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchResponse {
    #[serde(default)]
    pub results: Vec<BatchItem>,
    #[serde(default)]
    pub total_proteins: usize,
    #[serde(default)]
    pub successful_proteins: usize,
    #[serde(default)]
    pub failed_proteins: usize,
}

/// Decoded body of a successful `/analyze` call.
#[derive(Debug, Clone, PartialEq)]
pub enum RawResponse {
    Single(SingleResponse),
    Batch(BatchResponse),
}

/// Error body the service attaches to non-2xx responses.
#[derive(Debug, Clone, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<serde_json::Value>,
}
