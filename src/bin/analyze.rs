//! Headless runner: one analysis against the service, summary to stdout, CSV to disk.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tabled::{Table, Tabled, settings::Style};

use peptide_predictor::analysis::{check_batch_file_name, validate_batch_list, validate_fasta};
use peptide_predictor::config::{CsvQuoting, SERVICE, VALIDATION};
use peptide_predictor::domain::DetectionMode;
use peptide_predictor::engine::Completion;
use peptide_predictor::models::{AnalysisResultSet, PeptideResult};
use peptide_predictor::{
    HttpGateway, HttpLookup, ModeController, ProteinLookup, export_results, resolve_batch,
    run_analysis,
};

#[derive(Parser, Debug)]
#[command(author, version, about = "Run a cleavage analysis without the GUI")]
struct Cli {
    /// Base URL of the cleavage analysis service
    #[arg(long, global = true, default_value = SERVICE.base_url)]
    api_url: String,

    #[arg(long, global = true, value_enum, default_value_t = ModeArg::Permissive)]
    mode: ModeArg,

    /// Directory the CSV export is written to
    #[arg(long, global = true, default_value = ".")]
    out: PathBuf,

    /// Escape embedded quotes (RFC 4180) instead of writing cells verbatim
    #[arg(long, global = true, default_value_t = false)]
    rfc4180: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Analyze one UniProt protein
    Single {
        accession: String,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Analyze a pasted sequence stored in a FASTA file
    Fasta {
        file: PathBuf,
        #[command(flatten)]
        params: ParamArgs,
    },
    /// Analyze a .txt list of UniProt accessions (one per line)
    Batch { file: PathBuf },
}

#[derive(Args, Debug, Default)]
struct ParamArgs {
    #[arg(long)]
    signal_peptide_length: Option<u32>,
    #[arg(long)]
    min_cleavage_sites: Option<u32>,
    #[arg(long)]
    min_cleavage_spacing: Option<u32>,
    #[arg(long)]
    max_peptide_length: Option<u32>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ModeArg {
    Strict,
    Permissive,
    UltraPermissive,
}

impl From<ModeArg> for DetectionMode {
    fn from(arg: ModeArg) -> Self {
        match arg {
            ModeArg::Strict => DetectionMode::Strict,
            ModeArg::Permissive => DetectionMode::Permissive,
            ModeArg::UltraPermissive => DetectionMode::UltraPermissive,
        }
    }
}

#[derive(Tabled)]
struct PeptideRow {
    #[tabled(rename = "#")]
    index: usize,
    #[tabled(rename = "Protein")]
    protein: String,
    #[tabled(rename = "Sequence")]
    sequence: String,
    #[tabled(rename = "Position")]
    position: String,
    #[tabled(rename = "Length")]
    length: usize,
    #[tabled(rename = "Bioactivity")]
    bioactivity: String,
    #[tabled(rename = "Motif")]
    motif: String,
    #[tabled(rename = "PTMs")]
    ptms: String,
}

impl PeptideRow {
    fn new(index: usize, protein: &str, peptide: &PeptideResult) -> Self {
        Self {
            index,
            protein: protein.to_string(),
            sequence: peptide.sequence.clone(),
            position: peptide.position_label(),
            length: peptide.length,
            bioactivity: format!("{:.1}%", peptide.bioactivity_score),
            motif: peptide.cleavage_motif.clone(),
            ptms: peptide.ptm_label(),
        }
    }
}

fn apply_params(controller: &mut ModeController, args: &ParamArgs) {
    let mut params = controller.state().params;
    if let Some(v) = args.signal_peptide_length {
        params.signal_peptide_length = v;
    }
    if let Some(v) = args.min_cleavage_sites {
        params.min_cleavage_sites = v;
    }
    if let Some(v) = args.min_cleavage_spacing {
        params.min_cleavage_spacing = v;
    }
    if let Some(v) = args.max_peptide_length {
        params.max_peptide_length = v;
    }
    controller.set_params(params);
}

fn file_name_of(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

fn summary_rows(results: &AnalysisResultSet) -> Vec<PeptideRow> {
    match results {
        AnalysisResultSet::Single(r) | AnalysisResultSet::Fasta(r) => {
            let protein = r.protein_id.clone().unwrap_or_else(|| "-".to_string());
            r.peptides
                .iter()
                .enumerate()
                .map(|(i, p)| PeptideRow::new(i + 1, &protein, p))
                .collect()
        }
        AnalysisResultSet::Batch(batch) => batch
            .successes()
            .flat_map(|entry| {
                let protein = entry.id_gene_name();
                entry
                    .peptides()
                    .iter()
                    .map(move |p| (protein.clone(), p))
            })
            .enumerate()
            .map(|(i, (protein, p))| PeptideRow::new(i + 1, &protein, p))
            .collect(),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let gateway = HttpGateway::new(&cli.api_url).context("Failed to build HTTP client")?;
    let lookup = HttpLookup::new(&cli.api_url).context("Failed to build HTTP client")?;
    let mut controller = ModeController::new();

    match &cli.command {
        Command::Single { accession, params } => {
            let protein = lookup
                .fetch(accession.trim())
                .await
                .map_err(|e| anyhow::anyhow!(e.user_message()))
                .with_context(|| format!("Protein {} could not be loaded", accession))?;
            log::info!("Loaded {}", protein);
            controller.select_protein(Some(protein))?;
            apply_params(&mut controller, params);
        }
        Command::Fasta { file, params } => {
            let text = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let sequence = validate_fasta(&text).map_err(|e| anyhow::anyhow!(e.user_message()))?;
            log::info!("Validated sequence of {} aa", sequence.len());
            controller.switch_mode(peptide_predictor::AnalysisMode::Fasta);
            controller.validate_fasta(Some(sequence))?;
            apply_params(&mut controller, params);
        }
        Command::Batch { file } => {
            let file_name = file_name_of(file);
            check_batch_file_name(&file_name, &VALIDATION)
                .map_err(|e| anyhow::anyhow!(e.user_message()))?;
            let text = tokio::fs::read_to_string(file)
                .await
                .with_context(|| format!("Failed to read {}", file.display()))?;
            let accessions =
                validate_batch_list(&text).map_err(|e| anyhow::anyhow!(e.user_message()))?;

            let resolution = resolve_batch(&lookup, &accessions).await;
            if let Some(warning) = resolution.warning() {
                log::warn!("{}", warning);
            }
            if resolution.found.is_empty() {
                bail!("None of the {} proteins could be found", accessions.len());
            }
            controller.switch_mode(peptide_predictor::AnalysisMode::Batch);
            controller.upload_batch(resolution.accessions(), resolution.not_found, file_name)?;
        }
    }

    controller.set_detection_mode(cli.mode.into());

    let completion = run_analysis(&mut controller, &gateway).await?;
    if completion == Completion::Stale {
        bail!("Analysis result was superseded");
    }

    let state = controller.state();
    if let Some(error) = &state.error {
        bail!("{}", error);
    }
    let Some(results) = &state.results else {
        bail!("The service returned no results");
    };
    if let Some(warning) = &state.warning {
        log::warn!("{}", warning);
    }

    println!("{}", Table::new(summary_rows(results)).with(Style::rounded()));
    println!(
        "{} peptides, detection mode {}",
        results.peptide_count(),
        results.detection_mode()
    );

    let quoting = if cli.rfc4180 {
        CsvQuoting::Rfc4180
    } else {
        CsvQuoting::Verbatim
    };
    let document = export_results(results, quoting)?;
    tokio::fs::create_dir_all(&cli.out)
        .await
        .with_context(|| format!("Failed to create {}", cli.out.display()))?;
    let path = cli.out.join(&document.file_name);
    tokio::fs::write(&path, document.content.as_bytes())
        .await
        .with_context(|| format!("Failed to write {}", path.display()))?;
    println!("Saved {}", path.display());

    Ok(())
}
