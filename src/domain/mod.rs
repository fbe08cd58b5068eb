// Domain types and value objects
mod accession;
mod params;
mod protein;
mod sequence;

// Re-export commonly used types to the world
pub use accession::{id_gene_name, is_uniprot_accession, parse_uniprot_triplet};
pub use params::{DetectionMode, DetectionParameters};
pub use protein::{ProteinCandidate, ProteinRef, SearchKind};
pub use sequence::ValidatedSequence;
