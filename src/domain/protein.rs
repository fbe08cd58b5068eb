use {
    crate::domain::DetectionParameters,
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// What the search box is matching against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum SearchKind {
    #[default]
    #[serde(rename = "gene_name")]
    #[strum(to_string = "Gene name")]
    GeneName,
    #[serde(rename = "accession")]
    #[strum(to_string = "UniProt ID")]
    Accession,
}

impl SearchKind {
    pub fn as_query(&self) -> &'static str {
        match self {
            Self::GeneName => "gene_name",
            Self::Accession => "accession",
        }
    }
}

/// One row of a search result list; resolved to a full [`ProteinRef`] on selection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinCandidate {
    pub accession: String,
    #[serde(default)]
    pub gene_name: Option<String>,
    #[serde(default)]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub length: Option<usize>,
    #[serde(default)]
    pub signal_peptide_end: Option<u32>,
}

/// A UniProt-backed protein as returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProteinRef {
    pub accession: String,
    #[serde(default)]
    pub gene_name: String,
    #[serde(default)]
    pub protein_name: Option<String>,
    #[serde(default)]
    pub sequence: String,
    #[serde(default)]
    pub signal_peptide_end: Option<u32>,
    #[serde(default)]
    pub fasta_header: Option<String>,
    #[serde(default)]
    pub recommended_params: Option<DetectionParameters>,
}

impl ProteinRef {
    pub fn length(&self) -> usize {
        self.sequence.len()
    }
}

impl std::fmt::Display for ProteinRef {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} ({}), {} aa, signal 1-{}",
            self.accession,
            if self.gene_name.is_empty() {
                "?"
            } else {
                &self.gene_name
            },
            self.length(),
            self.signal_peptide_end.unwrap_or(0)
        )
    }
}
