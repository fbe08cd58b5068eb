use crate::{
    config::EXPORT,
    models::{AnalysisResultSet, BatchResult, SingleResult},
};

/// Base name (no extension) for an export. `suffix` supplies the 4-digit fallback number.
pub fn export_file_name(result: &AnalysisResultSet, suffix: impl FnOnce() -> u16) -> String {
    match result {
        AnalysisResultSet::Single(r) | AnalysisResultSet::Fasta(r) => single_file_name(r, suffix),
        AnalysisResultSet::Batch(b) => batch_file_name(b, suffix),
    }
}

fn single_file_name(result: &SingleResult, suffix: impl FnOnce() -> u16) -> String {
    match result.protein_id.as_deref().map(sanitize).filter(|s| !s.is_empty()) {
        Some(id) => format!("{}{}", id, EXPORT.file_suffix),
        None => format!("{}_{}", EXPORT.single_prefix, suffix()),
    }
}

fn batch_file_name(result: &BatchResult, suffix: impl FnOnce() -> u16) -> String {
    let genes: Vec<String> = result
        .successes()
        .map(|e| sanitize(e.gene_name.as_deref().unwrap_or(&e.accession)))
        .collect();

    if !genes.is_empty() && genes.len() <= EXPORT.batch_name_gene_limit {
        format!("{}{}", genes.join("_"), EXPORT.file_suffix)
    } else {
        format!("{}_{}", EXPORT.batch_prefix, suffix())
    }
}

/// `|` becomes `_`; anything a file system might object to is dropped.
fn sanitize(raw: &str) -> String {
    raw.trim()
        .chars()
        .filter_map(|c| match c {
            '|' | ' ' => Some('_'),
            c if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' => Some(c),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::DetectionMode,
        models::{BatchEntry, BatchOutcome},
    };

    fn single(protein_id: Option<&str>) -> AnalysisResultSet {
        AnalysisResultSet::Single(SingleResult {
            sequence_length: 100,
            cleavage_sites_count: 0,
            peptides: vec![],
            peptides_in_range: 0,
            protein_id: protein_id.map(str::to_string),
            accession: None,
            gene_name: None,
            protein_name: None,
            fasta_header: None,
            detection_mode: DetectionMode::Strict,
            cleavage_motif_counts: vec![],
        })
    }

    fn batch(genes: &[&str]) -> AnalysisResultSet {
        AnalysisResultSet::Batch(BatchResult {
            entries: genes
                .iter()
                .enumerate()
                .map(|(i, g)| BatchEntry {
                    accession: format!("P0{:04}", i),
                    gene_name: Some(g.to_string()),
                    protein_name: None,
                    outcome: BatchOutcome::Success(vec![]),
                })
                .collect(),
            total_submitted: genes.len(),
            failed_ids: vec![],
            detection_mode: DetectionMode::Permissive,
        })
    }

    #[test]
    fn single_uses_accession_and_gene() {
        assert_eq!(
            export_file_name(&single(Some("P01189|POMC_HUMAN")), || 1234),
            "P01189_POMC_HUMAN_peptides"
        );
    }

    #[test]
    fn single_without_identity_is_random() {
        assert_eq!(export_file_name(&single(None), || 4821), "peptides_4821");
    }

    #[test]
    fn small_batch_joins_gene_names() {
        assert_eq!(
            export_file_name(&batch(&["POMC", "INS", "NPY"]), || 1000),
            "POMC_INS_NPY_peptides"
        );
    }

    #[test]
    fn large_batch_is_random() {
        assert_eq!(
            export_file_name(&batch(&["POMC", "INS", "NPY", "CARTPT"]), || 9999),
            "batch_analysis_9999"
        );
    }
}
