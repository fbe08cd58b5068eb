use crate::{
    domain::{DetectionMode, DetectionParameters},
    models::{AnalysisMode, PeptideResult},
};

/// Everything a panel can ask for. Panels only read state; the app applies these after drawing.
#[derive(Debug, Clone)]
pub(crate) enum UiAction {
    SwitchMode(AnalysisMode),
    Search,
    SelectCandidate(String),
    FastaEdited,
    LoadBatchFile { file_name: String, text: String },
    RemoveAccession(String),
    SetParams(DetectionParameters),
    SetDetectionMode(DetectionMode),
    ResetParams,
    Analyze,
    Clear,
    NewAnalysis,
    Confirm,
    CancelConfirm,
    Download,
    ShowPeptide(PeptideResult),
}
