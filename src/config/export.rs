use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

/// How CSV cells are quoted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, Display, EnumIter)]
pub enum CsvQuoting {
    /// Every cell wrapped in `"`, embedded quotes written as-is (historical output, byte-stable).
    #[default]
    #[strum(to_string = "Verbatim")]
    Verbatim,
    /// Every cell wrapped in `"`, embedded quotes doubled.
    #[strum(to_string = "RFC 4180")]
    Rfc4180,
}

pub struct ExportConfig {
    pub quoting: CsvQuoting,
    /// Batch exports with at most this many proteins are named after their genes.
    pub batch_name_gene_limit: usize,
    pub line_terminator: &'static str,
    pub file_suffix: &'static str,
    pub single_prefix: &'static str,
    pub batch_prefix: &'static str,
}

pub const EXPORT: ExportConfig = ExportConfig {
    quoting: CsvQuoting::Verbatim,
    batch_name_gene_limit: 3,
    line_terminator: "\n",
    file_suffix: "_peptides",
    single_prefix: "peptides",
    batch_prefix: "batch_analysis",
};
