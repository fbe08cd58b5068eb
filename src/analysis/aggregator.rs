//! Partition a batch response into per-accession successes and failures.

use {
    crate::{
        config::DF,
        data::{BatchResponse, ItemStatus},
        domain::DetectionMode,
        error::AnalysisError,
        models::{BatchEntry, BatchOutcome, BatchResult, check_peptides},
    },
    itertools::Itertools,
};

/// Aggregated batch plus the non-fatal warning to show next to it, if any.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchSummary {
    pub result: BatchResult,
    pub warning: Option<String>,
}

/// Walk the submitted accessions in order and pair each with its outcome.
///
/// `not_found` lists accessions that passed validation but were unknown to the lookup service;
/// they were never sent and are recorded as failures after the submitted ones. Accessions the
/// service never mentions count as failures too, so the success and failure counts always add
/// up to `total_submitted`. Zero successes is an error, not an empty result.
pub fn aggregate_batch(
    submitted: &[String],
    not_found: &[String],
    response: BatchResponse,
    detection_mode: DetectionMode,
) -> Result<BatchSummary, AnalysisError> {
    let mut items = response.results;
    let total_submitted = submitted.len() + not_found.len();
    let mut entries = Vec::with_capacity(total_submitted);

    for accession in submitted {
        let position = items
            .iter()
            .position(|item| item.identifier().is_some_and(|id| id.eq_ignore_ascii_case(accession)));
        let item = position.map(|i| items.remove(i));

        let (gene_name, protein_name, outcome) = match item {
            Some(item) if item.status == ItemStatus::Success => {
                let peptides = item.peptides.unwrap_or_default();
                let outcome = match check_peptides(&peptides) {
                    Ok(()) => BatchOutcome::Success(peptides),
                    Err(e) => BatchOutcome::Failed(e.to_string()),
                };
                (item.gene_name, item.protein_name, outcome)
            }
            Some(item) => (
                item.gene_name,
                item.protein_name,
                BatchOutcome::Failed(item.error.unwrap_or_else(|| "analysis failed".to_string())),
            ),
            None => (None, None, BatchOutcome::Failed("missing from response".to_string())),
        };

        entries.push(BatchEntry {
            accession: accession.clone(),
            gene_name: gene_name.filter(|g| !g.is_empty()),
            protein_name,
            outcome,
        });
    }

    entries.extend(not_found.iter().map(|accession| BatchEntry {
        accession: accession.clone(),
        gene_name: None,
        protein_name: None,
        outcome: BatchOutcome::Failed("not found in protein database".to_string()),
    }));

    if !items.is_empty() {
        log::warn!(
            "AGGREGATOR: ignoring {} result(s) for unsubmitted ids: {}",
            items.len(),
            items.iter().filter_map(|i| i.identifier()).join(", ")
        );
    }

    let failed_ids: Vec<String> = entries
        .iter()
        .filter(|e| !e.is_success())
        .map(|e| e.accession.clone())
        .collect();
    let successes = entries.len() - failed_ids.len();

    #[cfg(debug_assertions)]
    if DF.log_controller {
        log::info!(
            "AGGREGATOR: {} submitted, {} ok, {} failed (service said {}/{})",
            total_submitted,
            successes,
            failed_ids.len(),
            response.successful_proteins,
            response.failed_proteins
        );
    }

    if successes == 0 {
        return Err(AnalysisError::BatchTotalFailure {
            submitted: total_submitted,
        });
    }

    let warning = (!failed_ids.is_empty()).then(|| {
        format!(
            "{} of {} proteins failed: {}",
            failed_ids.len(),
            total_submitted,
            failed_ids.join(", ")
        )
    });

    Ok(BatchSummary {
        result: BatchResult {
            entries,
            total_submitted,
            failed_ids,
            detection_mode,
        },
        warning,
    })
}
