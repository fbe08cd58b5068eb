use {
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Stringency of the remote cleavage-site detection.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumIter,
)]
pub enum DetectionMode {
    #[serde(rename = "strict")]
    #[strum(to_string = "Strict")]
    Strict,

    #[default]
    #[serde(rename = "permissive")]
    #[strum(to_string = "Permissive")]
    Permissive,

    /// Single basic sites and RFamide precursors; the only mode that returns confidence scores.
    #[serde(rename = "ultra-permissive")]
    #[strum(to_string = "Ultra-Permissive")]
    UltraPermissive,
}

impl DetectionMode {
    /// Value sent on the wire.
    pub fn as_wire(&self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Permissive => "permissive",
            Self::UltraPermissive => "ultra-permissive",
        }
    }

    /// Label written to the "Detection Mode" export column.
    pub fn export_label(&self) -> &'static str {
        match self {
            Self::Strict => "STRICT",
            Self::Permissive => "PERMISSIVE",
            Self::UltraPermissive => "ULTRA-PERMISSIVE",
        }
    }

    pub fn reports_confidence(&self) -> bool {
        matches!(self, Self::UltraPermissive)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectionParameters {
    pub signal_peptide_length: u32,
    pub min_cleavage_sites: u32,
    pub min_cleavage_spacing: u32,
    pub max_peptide_length: u32,
}

impl DetectionParameters {
    /// Clamp values the service would reject; the input widgets fall back the same way.
    pub fn sanitized(self) -> Self {
        Self {
            signal_peptide_length: self.signal_peptide_length,
            min_cleavage_sites: self.min_cleavage_sites.max(1),
            min_cleavage_spacing: self.min_cleavage_spacing.max(1),
            max_peptide_length: self.max_peptide_length.max(1),
        }
    }
}
