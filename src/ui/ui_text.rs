use std::sync::LazyLock;

pub const ICON_SEARCH: &str = "\u{1F50D}";
pub const ICON_DOWNLOAD: &str = "\u{2B07}";
pub const ICON_CLOSE: &str = "\u{2715}";
pub const ICON_WARNING: &str = "\u{26A0}";
pub const ICON_ERROR: &str = "\u{2716}";
pub const ICON_OK: &str = "\u{2714}";
pub const ICON_BRAIN: &str = "\u{1F9E0}";
pub const ICON_RESET: &str = "\u{21BA}";

pub struct UiText {
    pub app_title: String,
    pub app_subtitle: String,

    // --- Mode tabs ---
    pub tab_single: String,
    pub tab_fasta: String,
    pub tab_batch: String,

    // --- Single mode ---
    pub search_title: String,
    pub search_hint_gene: String,
    pub search_hint_accession: String,
    pub search_button: String,
    pub search_by: String,
    pub search_no_results: String,
    pub search_select_prompt: String,
    pub selected_protein: String,
    pub show_sequence: String,

    // --- FASTA mode ---
    pub fasta_title: String,
    pub fasta_hint: String,
    pub fasta_valid: String,

    // --- Batch mode ---
    pub batch_title: String,
    pub batch_hint: String,
    pub batch_drop_prompt: String,
    pub batch_checking: String,
    pub batch_not_found: String,
    pub batch_defaults_note: String,

    // --- Parameters ---
    pub params_title: String,
    pub params_mode: String,
    pub params_signal: String,
    pub params_sites: String,
    pub params_spacing: String,
    pub params_max_len: String,
    pub params_reset: String,
    pub params_modified: String,

    // --- Actions ---
    pub analyze_button: String,
    pub analyzing: String,
    pub clear_button: String,
    pub new_analysis_button: String,
    pub download_button: String,

    // --- Results ---
    pub results_title: String,
    pub results_empty: String,
    pub results_sequence_length: String,
    pub results_cleavage_sites: String,
    pub results_peptides: String,
    pub results_in_range: String,
    pub results_motifs: String,
    pub results_batch_proteins: String,
    pub results_batch_avg: String,
    pub results_batch_failed: String,

    // --- Table ---
    pub col_index: String,
    pub col_sequence: String,
    pub col_position: String,
    pub col_length: String,
    pub col_score: String,
    pub col_size: String,
    pub col_uniprot: String,
    pub col_ptms: String,
    pub col_motif: String,
    pub col_brain: String,
    pub col_confidence: String,

    // --- Dialogs ---
    pub confirm_title: String,
    pub confirm_clear: String,
    pub confirm_new: String,
    pub confirm_yes: String,
    pub confirm_no: String,
    pub details_title: String,
    pub details_ptms: String,
    pub details_brain: String,
    pub details_msms: String,
    pub details_mascot: String,

    pub saved_to: String,
    pub startup_failed: String,
}

pub static UI_TEXT: LazyLock<UiText> = LazyLock::new(|| UiText {
    app_title: "Peptide Predictor".to_string(),
    app_subtitle: "Proteolytic cleavage and bioactive peptide prediction".to_string(),

    tab_single: "UniProt".to_string(),
    tab_fasta: "FASTA".to_string(),
    tab_batch: "Batch".to_string(),

    search_title: ICON_SEARCH.to_string() + " Protein search",
    search_hint_gene: "Gene name, e.g. POMC".to_string(),
    search_hint_accession: "UniProt ID, e.g. P01189".to_string(),
    search_button: "Search".to_string(),
    search_by: "Search by".to_string(),
    search_no_results: "No protein found".to_string(),
    search_select_prompt: "Select the correct protein".to_string(),
    selected_protein: ICON_OK.to_string() + " Selected protein",
    show_sequence: "Show sequence".to_string(),

    fasta_title: "Paste a protein sequence (FASTA)".to_string(),
    fasta_hint: ">sp|P01189|COLI_HUMAN\nMPRSCCSRSGALLLALLLQASMEVRGWCLESSQCQ...".to_string(),
    fasta_valid: ICON_OK.to_string() + " Valid sequence",

    batch_title: "Batch analysis".to_string(),
    batch_hint: "One UniProt ID per line (max 15) · .txt files only".to_string(),
    batch_drop_prompt: "Drop a .txt file here".to_string(),
    batch_checking: "Checking proteins...".to_string(),
    batch_not_found: "Not found in the protein database; reported as failed".to_string(),
    batch_defaults_note: "Batch runs use the service defaults for each protein".to_string(),

    params_title: "Detection parameters".to_string(),
    params_mode: "Detection mode".to_string(),
    params_signal: "Signal peptide length".to_string(),
    params_sites: "Min. cleavage sites".to_string(),
    params_spacing: "Min. cleavage spacing".to_string(),
    params_max_len: "Max. peptide length".to_string(),
    params_reset: ICON_RESET.to_string() + " Reset to recommended",
    params_modified: "Modified from recommended values".to_string(),

    analyze_button: "Analyze".to_string(),
    analyzing: "Analyzing...".to_string(),
    clear_button: "Clear".to_string(),
    new_analysis_button: "New analysis".to_string(),
    download_button: ICON_DOWNLOAD.to_string() + " Download CSV",

    results_title: "Results".to_string(),
    results_empty: "Results will appear here after analysis".to_string(),
    results_sequence_length: "Sequence length".to_string(),
    results_cleavage_sites: "Cleavage sites".to_string(),
    results_peptides: "Predicted peptides".to_string(),
    results_in_range: "Peptides in optimal range".to_string(),
    results_motifs: "Cleavage motifs".to_string(),
    results_batch_proteins: "Proteins analyzed".to_string(),
    results_batch_avg: "Avg. peptides per protein".to_string(),
    results_batch_failed: "Failed".to_string(),

    col_index: "#".to_string(),
    col_sequence: "Sequence".to_string(),
    col_position: "Position".to_string(),
    col_length: "Length".to_string(),
    col_score: "Bioactivity".to_string(),
    col_size: "Size".to_string(),
    col_uniprot: "UniProt".to_string(),
    col_ptms: "PTMs".to_string(),
    col_motif: "Motif".to_string(),
    col_brain: ICON_BRAIN.to_string(),
    col_confidence: "Confidence".to_string(),

    confirm_title: ICON_WARNING.to_string() + " Confirm",
    confirm_clear: "Clear the current results?".to_string(),
    confirm_new: "Start a new analysis? Current results will be lost.".to_string(),
    confirm_yes: "Yes".to_string(),
    confirm_no: "Cancel".to_string(),
    details_title: "Peptide details".to_string(),
    details_ptms: "Post-translational modifications".to_string(),
    details_brain: ICON_BRAIN.to_string() + " Detected in human brain (LC-MS/MS)",
    details_msms: "MS/MS spectra".to_string(),
    details_mascot: "Mascot score".to_string(),

    saved_to: "Saved".to_string(),
    startup_failed: ICON_ERROR.to_string() + " Could not start",
});
