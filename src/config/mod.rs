//! Configuration module for the peptide predictor client.

// Can all be private now because we have a public re-export.
mod debug;
mod detection;
mod export;
mod service;
mod validation;

// Re-export commonly used items
pub use debug::{DF, LogFlags};
pub use detection::{DETECTION, DetectionDefaults};
pub use export::{CsvQuoting, EXPORT, ExportConfig};
pub use service::{SERVICE, ServiceConfig};
pub use validation::{VALIDATION, ValidationFlags};
