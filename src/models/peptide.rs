use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Where a bioactivity score came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum BioactivitySource {
    #[serde(rename = "api")]
    Api,
    #[default]
    #[serde(rename = "model", other)]
    LocalModel,
}

impl BioactivitySource {
    pub fn export_label(&self) -> &'static str {
        match self {
            Self::Api => "PeptideRanker API",
            Self::LocalModel => "Lab ML Bioactivity Model",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum UniprotStatus {
    #[serde(rename = "exact")]
    Exact,
    #[serde(rename = "partial")]
    Partial,
    #[default]
    #[serde(rename = "unknown", other)]
    Unknown,
}

impl UniprotStatus {
    pub fn export_label(&self) -> &'static str {
        match self {
            Self::Exact => "Exact match",
            Self::Partial => "Partial match",
            Self::Unknown => "Unknown",
        }
    }
}

/// A post-translational modification the service attached to a peptide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Ptm {
    #[serde(default)]
    pub short_name: String,
    #[serde(default)]
    pub emoji: String,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default)]
    pub enzyme: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub position: Option<String>,
}

/// LC-MS/MS evidence that the peptide was observed in human brain tissue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrainPeptide {
    #[serde(default)]
    pub found: bool,
    #[serde(default)]
    pub msms_count: u32,
    #[serde(default)]
    pub mascot_score: Option<f64>,
    #[serde(default)]
    pub protein_name: Option<String>,
    /// `;` separated accessions.
    #[serde(default)]
    pub uniprot: Option<String>,
    #[serde(default)]
    pub is_prohormone: bool,
    #[serde(default)]
    pub is_amidated: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Display, EnumIter)]
pub enum DetectionConfidence {
    #[strum(to_string = "Low")]
    Low,
    #[strum(to_string = "Medium")]
    Medium,
    #[strum(to_string = "High")]
    High,
    #[strum(to_string = "Very High")]
    VeryHigh,
}

impl BrainPeptide {
    pub fn detection_confidence(&self) -> DetectionConfidence {
        match self.msms_count {
            100.. => DetectionConfidence::VeryHigh,
            50..=99 => DetectionConfidence::High,
            10..=49 => DetectionConfidence::Medium,
            _ => DetectionConfidence::Low,
        }
    }

    pub fn accessions(&self) -> Vec<&str> {
        self.uniprot
            .as_deref()
            .map(|s| s.split(';').map(str::trim).filter(|a| !a.is_empty()).collect())
            .unwrap_or_default()
    }
}

/// Length bucket used by the table and the export.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter)]
pub enum SizeCategory {
    Tiny,
    Small,
    Medium,
    Large,
    #[strum(to_string = "X-Large")]
    XLarge,
}

impl SizeCategory {
    pub fn from_length(length: usize) -> Self {
        match length {
            0..=2 => Self::Tiny,
            3..=20 => Self::Small,
            21..=50 => Self::Medium,
            51..=100 => Self::Large,
            _ => Self::XLarge,
        }
    }

    pub fn range_label(&self) -> &'static str {
        match self {
            Self::Tiny => "<3 aa",
            Self::Small => "3-20 aa",
            Self::Medium => "21-50 aa",
            Self::Large => "51-100 aa",
            Self::XLarge => ">100 aa",
        }
    }
}

/// One predicted peptide. Positions are 1-based and inclusive.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeptideResult {
    pub sequence: String,
    pub start: usize,
    pub end: usize,
    pub length: usize,
    #[serde(default)]
    pub cleavage_motif: String,
    #[serde(default)]
    pub bioactivity_score: f64,
    #[serde(default)]
    pub bioactivity_source: BioactivitySource,
    #[serde(default)]
    pub uniprot_status: Option<UniprotStatus>,
    #[serde(default)]
    pub uniprot_name: Option<String>,
    #[serde(default)]
    pub uniprot_note: Option<String>,
    #[serde(default)]
    pub uniprot_accession: Option<String>,
    #[serde(default)]
    pub ptms: Vec<Ptm>,
    #[serde(default)]
    pub modified_sequence: Option<String>,
    #[serde(default)]
    pub brain_peptide: Option<BrainPeptide>,
    #[serde(default)]
    pub confidence_score: Option<f64>,
    #[serde(default)]
    pub confidence_level: Option<String>,
    #[serde(default)]
    pub in_range: bool,
}

impl PeptideResult {
    /// Reject coordinates that break `start <= end` and `length == end - start + 1`.
    pub fn check_coordinates(&self) -> Result<(), String> {
        if self.start > self.end {
            return Err(format!("start {} is after end {}", self.start, self.end));
        }
        let expected = self.end - self.start + 1;
        if self.length != expected {
            return Err(format!(
                "length {} does not match span {}-{} ({} aa)",
                self.length, self.start, self.end, expected
            ));
        }
        Ok(())
    }

    pub fn size_category(&self) -> SizeCategory {
        SizeCategory::from_length(self.length)
    }

    pub fn position_label(&self) -> String {
        format!("{}-{}", self.start, self.end)
    }

    /// `None` when no PTMs, otherwise the short names joined with `; `.
    pub fn ptm_label(&self) -> String {
        if self.ptms.is_empty() {
            "None".to_string()
        } else {
            self.ptms
                .iter()
                .map(|p| p.short_name.as_str())
                .collect::<Vec<_>>()
                .join("; ")
        }
    }

    pub fn confidence_label(&self) -> String {
        match (self.confidence_score, self.confidence_level.as_deref()) {
            (Some(score), Some(level)) => format!("{:.1} ({})", score, level),
            (Some(score), None) => format!("{:.1}", score),
            (None, Some(level)) => level.to_string(),
            (None, None) => "N/A".to_string(),
        }
    }

    pub fn detected_in_brain(&self) -> bool {
        self.brain_peptide.as_ref().is_some_and(|b| b.found)
    }
}
