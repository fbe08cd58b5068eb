use crate::data::{BatchResolution, RawResponse};
use crate::domain::{ProteinCandidate, ProteinRef, SearchKind};
use crate::error::GatewayError;

use super::controller::AnalysisTicket;

/// Work for the worker. Everything that suspends on the network goes through here.
#[derive(Debug, Clone)]
pub enum JobRequest {
    Analyze(AnalysisTicket),
    Search {
        query: String,
        kind: SearchKind,
        limit: usize,
    },
    /// Resolve a search hit into a full protein. `generation` guards against late arrivals.
    Fetch {
        accession: String,
        generation: u64,
    },
    ResolveBatch {
        accessions: Vec<String>,
        file_name: String,
        generation: u64,
    },
}

/// The result returned by the worker
#[derive(Debug, Clone)]
pub enum JobResult {
    Analysis {
        ticket: AnalysisTicket,
        outcome: Result<RawResponse, GatewayError>,
        duration_ms: u128,
    },
    Search {
        query: String,
        outcome: Result<Vec<ProteinCandidate>, GatewayError>,
    },
    Fetched {
        accession: String,
        generation: u64,
        outcome: Result<ProteinRef, GatewayError>,
    },
    BatchResolved {
        file_name: String,
        generation: u64,
        resolution: BatchResolution,
    },
}
