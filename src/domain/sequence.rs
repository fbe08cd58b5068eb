use serde::{Deserialize, Serialize};

/// A pasted FASTA block that passed local validation.
///
/// Only the validator builds these, so `length` always equals `sequence.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidatedSequence {
    pub(crate) sequence: String,
    pub(crate) header: Option<String>,
    pub(crate) length: usize,
}

impl ValidatedSequence {
    pub(crate) fn new(sequence: String, header: Option<String>) -> Self {
        let length = sequence.len();
        Self {
            sequence,
            header,
            length,
        }
    }

    pub fn sequence(&self) -> &str {
        &self.sequence
    }

    pub fn header(&self) -> Option<&str> {
        self.header.as_deref()
    }

    pub fn len(&self) -> usize {
        self.length
    }

    pub fn is_empty(&self) -> bool {
        self.length == 0
    }
}
