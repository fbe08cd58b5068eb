// CSV export of finished runs
mod csv_export;
mod file_name;

pub use {csv_export::serialize_results, file_name::export_file_name};

use {
    crate::{config::CsvQuoting, models::AnalysisResultSet, utils::random_suffix},
    anyhow::Result,
};

/// A rendered export, ready to be written or downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CsvDocument {
    pub file_name: String,
    pub content: String,
}

pub fn export_results(result: &AnalysisResultSet, quoting: CsvQuoting) -> Result<CsvDocument> {
    let content = crate::trace_time!("Serialize CSV", 2000, {
        serialize_results(result, quoting)?
    });
    Ok(CsvDocument {
        file_name: format!("{}.csv", export_file_name(result, random_suffix)),
        content,
    })
}
