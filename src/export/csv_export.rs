//! CSV rendering of a finished result set.
//!
//! The column layout is fixed by where the result came from: a bare sequence, a UniProt protein or
//! a batch. Ultra-permissive runs add a Confidence column before Detection Mode.

use {
    crate::{
        config::{CsvQuoting, DF, EXPORT},
        domain::DetectionMode,
        models::{AnalysisResultSet, PeptideResult},
    },
    anyhow::{Context, Result},
    itertools::Itertools,
    strum_macros::Display,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
enum Column {
    #[strum(to_string = "#")]
    Index,
    #[strum(to_string = "ID - Gene Name")]
    IdGeneName,
    Sequence,
    Position,
    Length,
    #[strum(to_string = "Bioactivity Score")]
    BioactivityScore,
    #[strum(to_string = "Bioactivity Source")]
    BioactivitySource,
    Size,
    #[strum(to_string = "UniProt Status")]
    UniprotStatus,
    #[strum(to_string = "UniProt Name")]
    UniprotName,
    #[strum(to_string = "PTMs")]
    Ptms,
    #[strum(to_string = "Modified Sequence")]
    ModifiedSequence,
    #[strum(to_string = "Cleavage Motif")]
    CleavageMotif,
    Confidence,
    #[strum(to_string = "Detection Mode")]
    DetectionMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Schema {
    SequenceOnly,
    Uniprot,
}

fn columns(schema: Schema, detection_mode: DetectionMode) -> Vec<Column> {
    use Column::*;
    let mut cols = vec![Index];
    if schema == Schema::Uniprot {
        cols.push(IdGeneName);
    }
    cols.extend([Sequence, Position, Length, BioactivityScore, BioactivitySource, Size]);
    if schema == Schema::Uniprot {
        cols.extend([UniprotStatus, UniprotName]);
    }
    cols.extend([Ptms, ModifiedSequence, CleavageMotif]);
    if detection_mode.reports_confidence() {
        cols.push(Confidence);
    }
    cols.push(DetectionMode);
    cols
}

fn or_na(value: Option<&str>) -> String {
    value
        .filter(|v| !v.is_empty())
        .unwrap_or("N/A")
        .to_string()
}

fn cell(
    column: Column,
    index: usize,
    id_gene_name: &str,
    peptide: &PeptideResult,
    detection_mode: DetectionMode,
) -> String {
    match column {
        Column::Index => index.to_string(),
        Column::IdGeneName => id_gene_name.to_string(),
        Column::Sequence => peptide.sequence.clone(),
        Column::Position => peptide.position_label(),
        Column::Length => peptide.length.to_string(),
        Column::BioactivityScore => format!("{:.1}", peptide.bioactivity_score),
        Column::BioactivitySource => peptide.bioactivity_source.export_label().to_string(),
        Column::Size => peptide.size_category().to_string(),
        Column::UniprotStatus => peptide
            .uniprot_status
            .unwrap_or_default()
            .export_label()
            .to_string(),
        Column::UniprotName => or_na(peptide.uniprot_name.as_deref()),
        Column::Ptms => peptide.ptm_label(),
        Column::ModifiedSequence => or_na(peptide.modified_sequence.as_deref()),
        Column::CleavageMotif => peptide.cleavage_motif.clone(),
        Column::Confidence => peptide.confidence_label(),
        Column::DetectionMode => detection_mode.export_label().to_string(),
    }
}

/// Header row plus one row per exported peptide.
fn table(result: &AnalysisResultSet) -> Vec<Vec<String>> {
    let detection_mode = result.detection_mode();

    // (id-gene-name, peptides) blocks in export order.
    let (schema, blocks): (Schema, Vec<(String, &[PeptideResult])>) = match result {
        AnalysisResultSet::Fasta(r) => (Schema::SequenceOnly, vec![(String::new(), &r.peptides[..])]),
        AnalysisResultSet::Single(r) => match &r.protein_id {
            Some(id) => (Schema::Uniprot, vec![(id.clone(), &r.peptides[..])]),
            None => (Schema::SequenceOnly, vec![(String::new(), &r.peptides[..])]),
        },
        AnalysisResultSet::Batch(b) => (
            Schema::Uniprot,
            b.successes().map(|e| (e.id_gene_name(), e.peptides())).collect(),
        ),
    };

    let cols = columns(schema, detection_mode);
    let mut rows = vec![cols.iter().map(Column::to_string).collect::<Vec<_>>()];

    let peptides = blocks
        .iter()
        .flat_map(|(id, peptides)| peptides.iter().map(move |p| (id.as_str(), p)));
    for (i, (id, peptide)) in peptides.enumerate() {
        rows.push(
            cols.iter()
                .map(|c| cell(*c, i + 1, id, peptide, detection_mode))
                .collect(),
        );
    }
    rows
}

/// Every cell double-quoted, embedded quotes left untouched.
fn write_verbatim(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| row.iter().map(|c| format!("\"{}\"", c)).join(","))
        .join(EXPORT.line_terminator)
}

fn write_rfc4180(rows: &[Vec<String>]) -> Result<String> {
    let terminator = EXPORT.line_terminator.as_bytes();
    let mut writer = csv::WriterBuilder::new()
        .quote_style(csv::QuoteStyle::Always)
        .terminator(match terminator {
            b"\r\n" => csv::Terminator::CRLF,
            [b] => csv::Terminator::Any(*b),
            _ => csv::Terminator::Any(b'\n'),
        })
        .from_writer(Vec::new());
    for row in rows {
        writer.write_record(row).context("Failed to write CSV record")?;
    }
    let bytes = writer.into_inner().context("Failed to flush CSV writer")?;
    let text = String::from_utf8(bytes).context("CSV output is not UTF-8")?;
    Ok(text
        .strip_suffix(EXPORT.line_terminator)
        .unwrap_or(&text)
        .to_string())
}

/// Render a result set. The same input always yields the same bytes.
pub fn serialize_results(result: &AnalysisResultSet, quoting: CsvQuoting) -> Result<String> {
    let rows = crate::trace_time!("CSV table", 20_000, { table(result) });

    #[cfg(debug_assertions)]
    if DF.log_export {
        log::info!(
            "EXPORT: {} mode, {} data rows, {} quoting",
            result.mode(),
            rows.len().saturating_sub(1),
            quoting
        );
    }

    match quoting {
        CsvQuoting::Verbatim => Ok(write_verbatim(&rows)),
        CsvQuoting::Rfc4180 => write_rfc4180(&rows),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        BatchEntry, BatchOutcome, BatchResult, Ptm, SingleResult, UniprotStatus,
        fixtures::peptide,
    };
    use rstest::rstest;

    fn single(mode: DetectionMode, protein_id: Option<&str>, peptides: Vec<PeptideResult>) -> SingleResult {
        SingleResult {
            sequence_length: 267,
            cleavage_sites_count: peptides.len(),
            peptides_in_range: peptides.len(),
            peptides,
            protein_id: protein_id.map(str::to_string),
            accession: None,
            gene_name: None,
            protein_name: None,
            fasta_header: None,
            detection_mode: mode,
            cleavage_motif_counts: vec![],
        }
    }

    fn lines(csv: &str) -> Vec<&str> {
        csv.split('\n').collect()
    }

    #[test]
    fn fasta_schema() {
        let result = AnalysisResultSet::Fasta(single(
            DetectionMode::Permissive,
            None,
            vec![peptide("YGGFM", 237, "KK")],
        ));
        let csv = serialize_results(&result, CsvQuoting::Verbatim).unwrap();
        assert_eq!(
            lines(&csv),
            vec![
                r##""#","Sequence","Position","Length","Bioactivity Score","Bioactivity Source","Size","PTMs","Modified Sequence","Cleavage Motif","Detection Mode""##,
                r#""1","YGGFM","237-241","5","42.3","PeptideRanker API","Small","None","N/A","KK","PERMISSIVE""#,
            ]
        );
    }

    #[test]
    fn uniprot_schema_inserts_identity_and_uniprot_columns() {
        let mut p = peptide("YGGFMTSEKSQTPLVTLFKNAIIKNAYKKGE", 237, "KR");
        p.uniprot_status = Some(UniprotStatus::Exact);
        p.uniprot_name = Some("Beta-endorphin".into());
        p.ptms = vec![Ptm {
            short_name: "Amidation".into(),
            emoji: String::new(),
            kind: None,
            enzyme: None,
            description: None,
            position: None,
        }];
        let result = AnalysisResultSet::Single(single(
            DetectionMode::Strict,
            Some("P01189|POMC_HUMAN"),
            vec![p],
        ));
        let csv = serialize_results(&result, CsvQuoting::Verbatim).unwrap();
        let rows = lines(&csv);
        assert_eq!(rows.len(), 2);
        assert!(rows[0].starts_with(r##""#","ID - Gene Name","Sequence""##));
        assert!(rows[0].contains(r#""Size","UniProt Status","UniProt Name","PTMs""#));
        assert!(rows[1].contains(r#""P01189|POMC_HUMAN""#));
        assert!(rows[1].contains(r#""Medium","Exact match","Beta-endorphin","Amidation""#));
        assert!(rows[1].ends_with(r#""STRICT""#));
    }

    #[test]
    fn ultra_permissive_adds_confidence() {
        let mut p = peptide("YGGFM", 1, "R");
        p.confidence_score = Some(87.3);
        p.confidence_level = Some("High".into());
        let result = AnalysisResultSet::Fasta(single(
            DetectionMode::UltraPermissive,
            None,
            vec![p, peptide("AAAAA", 10, "K")],
        ));
        let csv = serialize_results(&result, CsvQuoting::Verbatim).unwrap();
        let rows = lines(&csv);
        assert!(rows[0].ends_with(r#""Cleavage Motif","Confidence","Detection Mode""#));
        assert!(rows[1].ends_with(r#""R","87.3 (High)","ULTRA-PERMISSIVE""#));
        assert!(rows[2].ends_with(r#""K","N/A","ULTRA-PERMISSIVE""#));
    }

    #[test]
    fn batch_counter_is_global_and_failures_skipped() {
        let entry = |acc: &str, gene: &str, outcome| BatchEntry {
            accession: acc.into(),
            gene_name: Some(gene.into()),
            protein_name: None,
            outcome,
        };
        let result = AnalysisResultSet::Batch(BatchResult {
            entries: vec![
                entry(
                    "P01189",
                    "POMC",
                    BatchOutcome::Success(vec![peptide("AAAAA", 1, "KR"), peptide("CCCCC", 9, "KR")]),
                ),
                entry("P01308", "INS", BatchOutcome::Failed("not found".into())),
                entry("P01303", "NPY", BatchOutcome::Success(vec![peptide("DDDDD", 30, "RR")])),
            ],
            total_submitted: 3,
            failed_ids: vec!["P01308".into()],
            detection_mode: DetectionMode::Permissive,
        });
        let csv = serialize_results(&result, CsvQuoting::Verbatim).unwrap();
        let rows = lines(&csv);
        assert_eq!(rows.len(), 4);
        assert_eq!(rows.iter().filter(|r| r.starts_with(r##""#""##)).count(), 1);
        assert!(rows[1].starts_with(r#""1","P01189|POMC_HUMAN""#));
        assert!(rows[2].starts_with(r#""2","P01189|POMC_HUMAN""#));
        assert!(rows[3].starts_with(r#""3","P01303|NPY_HUMAN""#));
    }

    #[rstest]
    #[case(CsvQuoting::Verbatim, r#""say "hi"""#)]
    #[case(CsvQuoting::Rfc4180, r#""say ""hi""""#)]
    fn embedded_quotes(#[case] quoting: CsvQuoting, #[case] expected_cell: &str) {
        let mut p = peptide("YGGFM", 1, "KR");
        p.modified_sequence = Some(r#"say "hi""#.into());
        let result = AnalysisResultSet::Fasta(single(DetectionMode::Strict, None, vec![p]));
        let csv = serialize_results(&result, quoting).unwrap();
        assert!(csv.contains(expected_cell), "{}", csv);
        assert!(!csv.ends_with('\n'));
    }

    #[rstest]
    #[case(CsvQuoting::Verbatim)]
    #[case(CsvQuoting::Rfc4180)]
    fn serialization_is_idempotent(#[case] quoting: CsvQuoting) {
        let result = AnalysisResultSet::Single(single(
            DetectionMode::Permissive,
            Some("P01189|POMC_HUMAN"),
            vec![peptide("YGGFM", 1, "KR"), peptide("AAAAAAAAAAAAAAAAAAAAAAAAA", 20, "RR")],
        ));
        assert_eq!(
            serialize_results(&result, quoting).unwrap(),
            serialize_results(&result, quoting).unwrap()
        );
    }
}
