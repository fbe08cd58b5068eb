use {
    super::{AnalysisMode, PeptideResult},
    crate::{
        data::SingleResponse,
        domain::{DetectionMode, id_gene_name, parse_uniprot_triplet},
        error::AnalysisError,
    },
};

/// Outcome of one single-protein or FASTA run.
#[derive(Debug, Clone, PartialEq)]
pub struct SingleResult {
    pub sequence_length: usize,
    pub cleavage_sites_count: usize,
    pub peptides: Vec<PeptideResult>,
    pub peptides_in_range: usize,
    /// `ACCESSION|GENE_HUMAN`, when an identity is known.
    pub protein_id: Option<String>,
    pub accession: Option<String>,
    pub gene_name: Option<String>,
    pub protein_name: Option<String>,
    pub fasta_header: Option<String>,
    pub detection_mode: DetectionMode,
    /// Motif -> peptide count, in order of first appearance.
    pub cleavage_motif_counts: Vec<(String, usize)>,
}

impl SingleResult {
    /// Normalise a service response. Peptides with inconsistent coordinates reject the whole run.
    pub fn from_response(
        response: SingleResponse,
        origin: AnalysisMode,
        requested_mode: DetectionMode,
    ) -> Result<Self, AnalysisError> {
        check_peptides(&response.peptides)?;

        let fasta_header = response.fasta_header.filter(|h| !h.trim().is_empty());
        let accession = response.protein_id.filter(|id| !id.trim().is_empty());
        let gene_name = response.gene_name.filter(|g| !g.trim().is_empty());

        let protein_id = match origin {
            AnalysisMode::Fasta => fasta_header.as_deref().and_then(parse_uniprot_triplet),
            _ => accession
                .as_deref()
                .map(|acc| id_gene_name(acc, gene_name.as_deref())),
        };

        let cleavage_motif_counts = motif_histogram(&response.peptides);

        Ok(Self {
            sequence_length: response.sequence_length,
            cleavage_sites_count: response.cleavage_sites_count,
            peptides_in_range: response.peptides_in_range,
            peptides: response.peptides,
            protein_id,
            accession,
            gene_name,
            protein_name: response.protein_name,
            fasta_header,
            detection_mode: response.mode.unwrap_or(requested_mode),
            cleavage_motif_counts,
        })
    }
}

pub(crate) fn check_peptides(peptides: &[PeptideResult]) -> Result<(), AnalysisError> {
    for (i, peptide) in peptides.iter().enumerate() {
        peptide
            .check_coordinates()
            .map_err(|reason| AnalysisError::InvalidPeptide {
                index: i + 1,
                reason,
            })?;
    }
    Ok(())
}

pub fn motif_histogram(peptides: &[PeptideResult]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for motif in peptides.iter().map(|p| p.cleavage_motif.as_str()) {
        match counts.iter_mut().find(|(m, _)| m == motif) {
            Some((_, n)) => *n += 1,
            None => counts.push((motif.to_string(), 1)),
        }
    }
    counts
}

#[derive(Debug, Clone, PartialEq)]
pub enum BatchOutcome {
    Success(Vec<PeptideResult>),
    Failed(String),
}

/// One submitted accession, in submission order.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchEntry {
    pub accession: String,
    pub gene_name: Option<String>,
    pub protein_name: Option<String>,
    pub outcome: BatchOutcome,
}

impl BatchEntry {
    pub fn id_gene_name(&self) -> String {
        id_gene_name(&self.accession, self.gene_name.as_deref())
    }

    pub fn peptides(&self) -> &[PeptideResult] {
        match &self.outcome {
            BatchOutcome::Success(peptides) => peptides,
            BatchOutcome::Failed(_) => &[],
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, BatchOutcome::Success(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchStats {
    pub total_proteins: usize,
    pub total_peptides: usize,
    pub avg_peptides_per_protein: usize,
}

/// Aggregated batch outcome. Built only by the batch aggregator, which guarantees
/// `successful() + failed() == total_submitted` and at least one success.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchResult {
    pub entries: Vec<BatchEntry>,
    pub total_submitted: usize,
    pub failed_ids: Vec<String>,
    pub detection_mode: DetectionMode,
}

impl BatchResult {
    pub fn successes(&self) -> impl Iterator<Item = &BatchEntry> {
        self.entries.iter().filter(|e| e.is_success())
    }

    pub fn successful(&self) -> usize {
        self.successes().count()
    }

    pub fn failed(&self) -> usize {
        self.failed_ids.len()
    }

    /// Averages are over successful proteins, rounded to the nearest whole peptide.
    pub fn stats(&self) -> BatchStats {
        let total_proteins = self.successful();
        let total_peptides = self.successes().map(|e| e.peptides().len()).sum();
        let avg_peptides_per_protein = if total_proteins == 0 {
            0
        } else {
            (total_peptides as f64 / total_proteins as f64).round() as usize
        };
        BatchStats {
            total_proteins,
            total_peptides,
            avg_peptides_per_protein,
        }
    }
}

/// Whatever the last completed run produced. Replaced whole, never edited in place.
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisResultSet {
    Single(SingleResult),
    Fasta(SingleResult),
    Batch(BatchResult),
}

impl AnalysisResultSet {
    pub fn mode(&self) -> AnalysisMode {
        match self {
            Self::Single(_) => AnalysisMode::Single,
            Self::Fasta(_) => AnalysisMode::Fasta,
            Self::Batch(_) => AnalysisMode::Batch,
        }
    }

    pub fn detection_mode(&self) -> DetectionMode {
        match self {
            Self::Single(r) | Self::Fasta(r) => r.detection_mode,
            Self::Batch(b) => b.detection_mode,
        }
    }

    pub fn peptide_count(&self) -> usize {
        match self {
            Self::Single(r) | Self::Fasta(r) => r.peptides.len(),
            Self::Batch(b) => b.stats().total_peptides,
        }
    }
}
