// Local validation and batch aggregation
mod aggregator;
mod validator;

pub use aggregator::{BatchSummary, aggregate_batch};
pub use validator::{
    check_batch_file_name, ensure_standard_residues, validate_batch_list, validate_batch_list_with,
    validate_fasta, validate_fasta_with,
};
