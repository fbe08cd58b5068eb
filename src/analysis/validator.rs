//! Local checks run before anything is sent to the service.

use {
    crate::{
        config::{DF, VALIDATION, ValidationFlags},
        domain::{ValidatedSequence, is_uniprot_accession},
        error::ValidationError,
    },
    itertools::Itertools,
};

/// The 20 standard amino-acid codes.
const STANDARD_RESIDUES: &str = "ACDEFGHIKLMNPQRSTVWY";

/// Validate a pasted FASTA block with the default rules.
pub fn validate_fasta(text: &str) -> Result<ValidatedSequence, ValidationError> {
    validate_fasta_with(text, &VALIDATION)
}

pub fn validate_fasta_with(
    text: &str,
    flags: &ValidationFlags,
) -> Result<ValidatedSequence, ValidationError> {
    if text.trim().is_empty() {
        return Err(ValidationError::EmptyInput);
    }

    let mut header: Option<String> = None;
    let mut sequence = String::with_capacity(text.len());

    for line in text.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some(rest) = line.strip_prefix('>') {
            if header.is_none() {
                header = Some(rest.trim().to_string());
            } else if flags.reject_extra_headers {
                return Err(ValidationError::MalformedHeader {
                    line: line.to_string(),
                });
            } else {
                #[cfg(debug_assertions)]
                if DF.log_validation {
                    log::warn!("VALIDATOR: ignoring extra header line {:?}", line);
                }
            }
        } else {
            sequence.push_str(&line.to_ascii_uppercase());
        }
    }

    let allowed = |c: char| c.is_ascii_uppercase() || (flags.accept_stop_codon && c == '*');
    let invalid = sequence.chars().filter(|c| !allowed(*c)).unique().join(", ");
    if !invalid.is_empty() {
        return Err(ValidationError::InvalidCharacters { chars: invalid });
    }

    if sequence.len() < flags.min_sequence_length {
        return Err(ValidationError::TooShort {
            length: sequence.len(),
            minimum: flags.min_sequence_length,
        });
    }

    #[cfg(debug_assertions)]
    if DF.log_validation {
        log::info!(
            "VALIDATOR: accepted {} aa (header: {:?})",
            sequence.len(),
            header
        );
    }

    Ok(ValidatedSequence::new(sequence, header))
}

/// Stricter residue check applied right before a FASTA submission.
pub fn ensure_standard_residues(
    sequence: &ValidatedSequence,
    flags: &ValidationFlags,
) -> Result<(), ValidationError> {
    let residues = sequence
        .sequence()
        .chars()
        .filter(|c| !(STANDARD_RESIDUES.contains(*c) || (flags.accept_stop_codon && *c == '*')))
        .unique()
        .join(", ");
    if residues.is_empty() {
        Ok(())
    } else {
        Err(ValidationError::NonStandardResidues { residues })
    }
}

/// Uploaded batch files must carry the configured extension.
pub fn check_batch_file_name(file_name: &str, flags: &ValidationFlags) -> Result<(), ValidationError> {
    if file_name
        .to_ascii_lowercase()
        .ends_with(flags.batch_file_extension)
    {
        Ok(())
    } else {
        Err(ValidationError::InvalidFileFormat {
            file_name: file_name.to_string(),
        })
    }
}

/// Parse an uploaded accession list with the default rules.
pub fn validate_batch_list(text: &str) -> Result<Vec<String>, ValidationError> {
    validate_batch_list_with(text, &VALIDATION)
}

/// Non-blank trimmed lines, capped, filtered to the accession grammar, de-duplicated in
/// first-seen order. The cap applies to raw lines, before filtering.
pub fn validate_batch_list_with(
    text: &str,
    flags: &ValidationFlags,
) -> Result<Vec<String>, ValidationError> {
    let lines: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();

    if lines.is_empty() {
        return Err(ValidationError::EmptyFile);
    }
    if lines.len() > flags.max_batch_entries {
        return Err(ValidationError::TooManyEntries {
            count: lines.len(),
            max: flags.max_batch_entries,
        });
    }

    let accessions: Vec<String> = lines
        .iter()
        .copied()
        .filter(|l| is_uniprot_accession(l))
        .unique()
        .map(str::to_string)
        .collect();

    #[cfg(debug_assertions)]
    if DF.log_validation {
        log::info!(
            "VALIDATOR: batch file {} lines -> {} accessions",
            lines.len(),
            accessions.len()
        );
    }

    if accessions.is_empty() {
        return Err(ValidationError::NoValidAccessions);
    }
    Ok(accessions)
}
