//! In-memory stand-ins for the analysis and lookup services.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use serde_json::{Value, json};

use peptide_predictor::data::{
    AnalysisGateway, BatchResponse, ProteinLookup, RawResponse, SingleResponse,
};
use peptide_predictor::domain::{ProteinCandidate, ProteinRef, SearchKind};
use peptide_predictor::error::GatewayError;
use peptide_predictor::models::AnalysisRequest;

pub const POMC_SEQUENCE: &str = "MPRSCCSRSGALLLALLLQASMEVRGWCLESSQCQDLTTESNLLECIRACKPDLSAETPMFPGNGDEQPLTENPRKYVMGHFRWDRFGRRNSSSSGSSGAGQKREDVSAGEDCGPLPEGGPEPRSDGAKPGPREGKRSYSMEHFRWGKPVGKKRRPVKVYPNGAEDESAEAFPLEFKRELTGQRLREGDGPDGPADDGAGAQADLEHSLLVAAEKKDEGPYRMEHFRWGSPPKDKRYGGFMTSEKSQTPLVTLFKNAIIKNAYKKGE";

/// Peptide JSON as the service sends it. `end` and `length` follow from `start` and the sequence.
pub fn peptide_json(sequence: &str, start: usize, motif: &str, score: f64) -> Value {
    let length = sequence.len();
    json!({
        "sequence": sequence,
        "start": start,
        "end": start + length - 1,
        "length": length,
        "cleavageMotif": motif,
        "bioactivityScore": score,
        "bioactivitySource": "api",
        "inRange": (3..=50).contains(&length),
    })
}

pub fn pomc_peptides() -> Vec<Value> {
    vec![
        peptide_json("SYSMEHFRWGKPV", 138, "KR", 81.2),
        peptide_json("YVMGHFRWDRFG", 77, "KR", 64.0),
        peptide_json("YGGFMTSEKSQTPLVTLFKNAIIKNAYKKGE", 237, "KR", 43.5),
    ]
}

pub fn pomc_response() -> SingleResponse {
    let peptides = pomc_peptides();
    serde_json::from_value(json!({
        "sequenceLength": POMC_SEQUENCE.len(),
        "cleavageSitesCount": 8,
        "peptides": peptides,
        "peptidesInRange": 3,
        "proteinId": "P01189",
        "geneName": "POMC",
        "proteinName": "Pro-opiomelanocortin",
        "mode": "strict",
    }))
    .expect("fixture response")
}

pub fn pomc_protein() -> ProteinRef {
    serde_json::from_value(json!({
        "accession": "P01189",
        "geneName": "POMC",
        "proteinName": "Pro-opiomelanocortin",
        "sequence": POMC_SEQUENCE,
        "signalPeptideEnd": 26,
        "recommendedParams": {
            "signalPeptideLength": 26,
            "minCleavageSites": 3,
            "minCleavageSpacing": 5,
            "maxPeptideLength": 80
        }
    }))
    .expect("fixture protein")
}

pub fn protein(accession: &str, gene: &str) -> ProteinRef {
    serde_json::from_value(json!({
        "accession": accession,
        "geneName": gene,
        "sequence": "MALWMRLLPLLALLALWGPDPAAAFVNQHLCGSHLVEALYLVCGERGFFYTPKTRREAEDLQVGQVELGGGPGAGSLQPLALEGSLQKRGIVEQCCTSICSLYQLENYCN",
    }))
    .expect("fixture protein")
}

/// Batch body where `P01189` succeeds and everything else errors.
pub fn mixed_batch_response(accessions: &[String]) -> BatchResponse {
    let results: Vec<Value> = accessions
        .iter()
        .map(|acc| {
            if acc == "P01189" {
                json!({
                    "status": "success",
                    "accession": acc,
                    "proteinId": acc,
                    "geneName": "POMC",
                    "peptides": pomc_peptides(),
                })
            } else {
                json!({
                    "status": "error",
                    "accession": acc,
                    "error": "Analysis failed for this protein",
                })
            }
        })
        .collect();
    serde_json::from_value(json!({
        "results": results,
        "totalProteins": accessions.len(),
        "successfulProteins": 1,
        "failedProteins": accessions.len() - 1,
    }))
    .expect("fixture batch")
}

/// Answers single and FASTA requests with the POMC fixture, batches with [`mixed_batch_response`].
#[derive(Default)]
pub struct FakeGateway {
    pub requests: Mutex<Vec<AnalysisRequest>>,
    pub fail_with: Option<GatewayError>,
}

impl FakeGateway {
    pub fn failing(error: GatewayError) -> Self {
        Self {
            requests: Mutex::new(Vec::new()),
            fail_with: Some(error),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().map(|r| r.len()).unwrap_or(0)
    }
}

#[async_trait]
impl AnalysisGateway for FakeGateway {
    async fn submit(&self, request: &AnalysisRequest) -> Result<RawResponse, GatewayError> {
        if let Ok(mut log) = self.requests.lock() {
            log.push(request.clone());
        }
        if let Some(error) = &self.fail_with {
            return Err(error.clone());
        }
        Ok(match request {
            AnalysisRequest::Single { mode, .. } => {
                let mut response = pomc_response();
                response.mode = Some(*mode);
                RawResponse::Single(response)
            }
            AnalysisRequest::Fasta { sequence, mode, .. } => {
                let mut response = pomc_response();
                response.mode = Some(*mode);
                response.protein_id = None;
                response.gene_name = None;
                response.sequence_length = sequence.len();
                RawResponse::Single(response)
            }
            AnalysisRequest::Batch { protein_ids, .. } => {
                RawResponse::Batch(mixed_batch_response(protein_ids))
            }
        })
    }
}

/// Knows a fixed set of proteins; everything else is a 404.
pub struct FakeLookup {
    pub proteins: HashMap<String, ProteinRef>,
}

impl FakeLookup {
    pub fn with(proteins: Vec<ProteinRef>) -> Self {
        Self {
            proteins: proteins
                .into_iter()
                .map(|p| (p.accession.clone(), p))
                .collect(),
        }
    }
}

#[async_trait]
impl ProteinLookup for FakeLookup {
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: usize,
    ) -> Result<Vec<ProteinCandidate>, GatewayError> {
        let query = query.to_uppercase();
        let mut hits: Vec<ProteinCandidate> = self
            .proteins
            .values()
            .filter(|p| match kind {
                SearchKind::GeneName => p.gene_name.to_uppercase().starts_with(&query),
                SearchKind::Accession => p.accession.starts_with(&query),
            })
            .map(|p| ProteinCandidate {
                accession: p.accession.clone(),
                gene_name: Some(p.gene_name.clone()),
                protein_name: p.protein_name.clone(),
                length: Some(p.length()),
                signal_peptide_end: p.signal_peptide_end,
            })
            .collect();
        hits.sort_by(|a, b| a.accession.cmp(&b.accession));
        hits.truncate(limit);
        Ok(hits)
    }

    async fn fetch(&self, accession: &str) -> Result<ProteinRef, GatewayError> {
        self.proteins
            .get(accession)
            .cloned()
            .ok_or_else(|| GatewayError::NotFound {
                what: accession.to_string(),
            })
    }
}
