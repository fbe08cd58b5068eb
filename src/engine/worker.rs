use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};

// Only import thread on non-WASM targets
#[cfg(not(target_arch = "wasm32"))]
use std::thread;

use super::controller::{Completion, ModeController};
use super::messages::{JobRequest, JobResult};

use crate::data::{AnalysisGateway, ProteinLookup, resolve_batch};
use crate::error::TransitionError;
use crate::utils::AppInstant;

/// Shared handles the worker needs to run a job.
#[derive(Clone)]
pub struct Services {
    pub gateway: Arc<dyn AnalysisGateway>,
    pub lookup: Arc<dyn ProteinLookup>,
}

/// NATIVE ONLY: Spawns a background thread that owns a tokio runtime and runs each job as a task.
#[cfg(not(target_arch = "wasm32"))]
pub fn spawn_worker_thread(rx: Receiver<JobRequest>, tx: Sender<JobResult>, services: Services) {
    thread::spawn(move || {
        let rt = match tokio::runtime::Runtime::new() {
            Ok(rt) => rt,
            Err(e) => {
                log::error!("WORKER: failed to start tokio runtime: {}", e);
                return;
            }
        };
        while let Ok(req) = rx.recv() {
            let tx = tx.clone();
            let services = services.clone();
            rt.spawn(async move {
                let result = process_request(req, &services).await;
                if tx.send(result).is_err() {
                    log::warn!("WORKER: engine dropped before job finished");
                }
            });
        }
    });
}

/// WASM ONLY: Run the job on the browser's event loop.
#[cfg(target_arch = "wasm32")]
pub fn spawn_local_job(req: JobRequest, tx: Sender<JobResult>, services: Services) {
    wasm_bindgen_futures::spawn_local(async move {
        let result = process_request(req, &services).await;
        let _ = tx.send(result);
    });
}

pub async fn process_request(req: JobRequest, services: &Services) -> JobResult {
    match req {
        JobRequest::Analyze(ticket) => {
            let start = AppInstant::now();
            let outcome = services.gateway.submit(&ticket.request).await;
            JobResult::Analysis {
                ticket,
                outcome,
                duration_ms: start.elapsed().as_millis(),
            }
        }
        JobRequest::Search { query, kind, limit } => {
            let outcome = services.lookup.search(&query, kind, limit).await;
            JobResult::Search { query, outcome }
        }
        JobRequest::Fetch {
            accession,
            generation,
        } => {
            let outcome = services.lookup.fetch(&accession).await;
            JobResult::Fetched {
                accession,
                generation,
                outcome,
            }
        }
        JobRequest::ResolveBatch {
            accessions,
            file_name,
            generation,
        } => {
            let resolution = resolve_batch(services.lookup.as_ref(), &accessions).await;
            JobResult::BatchResolved {
                file_name,
                generation,
                resolution,
            }
        }
    }
}

/// Run one analysis to completion against `gateway`, outside the job queue.
pub async fn run_analysis(
    controller: &mut ModeController,
    gateway: &dyn AnalysisGateway,
) -> Result<Completion, TransitionError> {
    let ticket = controller.begin_analysis()?;
    let outcome = crate::trace_time!("analysis round trip", 30_000_000, {
        gateway.submit(&ticket.request).await
    });
    Ok(controller.finish_analysis(ticket, outcome))
}
