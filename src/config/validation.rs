//! Input validation rules.
//!
//! The browser client shipped several revisions that disagree on a couple of rules, so those are
//! flags here rather than hard-coded behaviour.

#[derive(Debug, Clone, Copy)]
pub struct ValidationFlags {
    pub min_sequence_length: usize,
    pub max_batch_entries: usize,
    /// Allow `*` (stop codon) inside pasted sequences.
    pub accept_stop_codon: bool,
    /// Treat a second `>` header line inside one FASTA block as an error instead of ignoring it.
    pub reject_extra_headers: bool,
    pub batch_file_extension: &'static str,
}

pub const VALIDATION: ValidationFlags = ValidationFlags {
    min_sequence_length: 30,
    max_batch_entries: 15,
    accept_stop_codon: false,
    reject_extra_headers: false,
    batch_file_extension: ".txt",
};
