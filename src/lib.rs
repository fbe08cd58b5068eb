#![allow(clippy::collapsible_if)]
#![allow(clippy::collapsible_else_if)]
#![allow(clippy::too_many_arguments)]

// Core modules
pub mod analysis;
pub mod app;
pub mod config;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;
pub mod export;
pub mod models;
pub mod ui;
pub mod utils;

// Re-export commonly used types outside of crate (for the analyze binary and tests)
pub use app::App;
pub use data::{AnalysisGateway, HttpGateway, HttpLookup, ProteinLookup, resolve_batch};
pub use engine::{AnalysisEngine, ModeController, run_analysis};
pub use error::{AnalysisError, GatewayError, TransitionError, ValidationError};
pub use export::{CsvDocument, export_results};
pub use models::{AnalysisMode, AnalysisResultSet};

// CLI argument parsing
use clap::Parser;

use crate::config::SERVICE;

#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Base URL of the cleavage analysis service
    #[arg(long, default_value = SERVICE.base_url)]
    pub api_url: String,
}

impl Default for Cli {
    fn default() -> Self {
        Self {
            api_url: SERVICE.base_url.to_string(),
        }
    }
}

/// Main application entry point - creates the GUI app
pub fn run_app(cc: &eframe::CreationContext<'_>, args: Cli) -> App {
    App::new(cc, args)
}
