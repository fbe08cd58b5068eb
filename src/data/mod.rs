// Remote service access
mod gateway;
mod lookup;
mod wire;

pub use {
    gateway::{AnalysisGateway, HttpGateway, build_payload, decode_response, decode_service_error},
    lookup::{BatchResolution, HttpLookup, ProteinLookup, not_found_warning, resolve_batch},
    wire::{BatchItem, BatchResponse, ItemStatus, RawResponse, SingleResponse},
};
