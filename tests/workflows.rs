//! End-to-end runs through the mode controller against in-memory services.

mod common;

use rstest::rstest;

use common::{FakeGateway, FakeLookup, POMC_SEQUENCE, pomc_protein, protein};
use peptide_predictor::analysis::{validate_batch_list, validate_fasta};
use peptide_predictor::config::{CsvQuoting, DETECTION};
use peptide_predictor::domain::DetectionMode;
use peptide_predictor::engine::{Completion, Confirmation, ModeState};
use peptide_predictor::error::{GatewayError, TransitionError};
use peptide_predictor::export::serialize_results;
use peptide_predictor::models::{AnalysisMode, AnalysisRequest, AnalysisResultSet};
use peptide_predictor::{ModeController, export_results, resolve_batch, run_analysis};

fn fasta_text() -> String {
    let body: Vec<&str> = POMC_SEQUENCE
        .as_bytes()
        .chunks(60)
        .map(|c| std::str::from_utf8(c).unwrap())
        .collect();
    format!(">sp|P01189|COLI_HUMAN Pro-opiomelanocortin\n{}\n", body.join("\n"))
}

#[tokio::test]
async fn single_protein_strict_run_exports_one_row_per_peptide() {
    let gateway = FakeGateway::default();
    let mut controller = ModeController::new();

    controller.select_protein(Some(pomc_protein())).unwrap();
    controller.set_detection_mode(DetectionMode::Strict);

    let completion = run_analysis(&mut controller, &gateway).await.unwrap();
    assert_eq!(completion, Completion::Applied);

    let state = controller.state();
    assert!(state.error.is_none());
    assert!(!state.is_busy());
    let results = state.results.as_ref().expect("results stored");

    let AnalysisResultSet::Single(single) = results.as_ref() else {
        panic!("expected single result, got {:?}", results.mode());
    };
    assert_eq!(single.protein_id.as_deref(), Some("P01189|POMC_HUMAN"));
    assert_eq!(single.detection_mode, DetectionMode::Strict);
    assert!(single.peptides.iter().all(|p| p.start <= p.end));

    let csv = serialize_results(results, CsvQuoting::Verbatim).unwrap();
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), single.peptides.len() + 1);
    assert!(lines[0].starts_with(r##""#","ID - Gene Name","Sequence""##));
    assert!(lines[1].contains(r#""P01189|POMC_HUMAN""#));
    assert!(lines.iter().skip(1).all(|l| l.ends_with(r#""STRICT""#)));
}

#[tokio::test]
async fn selecting_a_protein_adopts_its_recommended_parameters() {
    let mut controller = ModeController::new();
    let protein = pomc_protein();
    let recommended = protein.recommended_params.unwrap();

    controller.select_protein(Some(protein)).unwrap();
    assert_eq!(controller.state().params, recommended);
    assert!(!controller.state().params_diverged());

    let mut tweaked = recommended;
    tweaked.max_peptide_length = 40;
    controller.set_params(tweaked);
    assert!(controller.state().params_diverged());

    assert!(controller.reset_to_recommended());
    assert_eq!(controller.state().params, recommended);

    let gateway = FakeGateway::default();
    run_analysis(&mut controller, &gateway).await.unwrap();
    let sent = gateway.requests.lock().unwrap();
    match &sent[0] {
        AnalysisRequest::Single {
            protein_id, params, ..
        } => {
            assert_eq!(protein_id, "P01189");
            assert_eq!(*params, recommended);
        }
        other => panic!("unexpected request {:?}", other),
    }
}

#[tokio::test]
async fn fasta_run_uses_the_header_for_identity() {
    let gateway = FakeGateway::default();
    let mut controller = ModeController::new();
    controller.switch_mode(AnalysisMode::Fasta);

    let sequence = validate_fasta(&fasta_text()).unwrap();
    assert_eq!(sequence.len(), POMC_SEQUENCE.len());
    controller.validate_fasta(Some(sequence)).unwrap();
    assert_eq!(controller.state().params, DETECTION.fasta);

    run_analysis(&mut controller, &gateway).await.unwrap();

    let state = controller.state();
    let results = state.results.as_ref().expect("results stored");
    let AnalysisResultSet::Fasta(single) = results.as_ref() else {
        panic!("expected FASTA result");
    };
    assert_eq!(single.protein_id.as_deref(), Some("P01189|COLI_HUMAN"));
    assert_eq!(single.sequence_length, POMC_SEQUENCE.len());
    assert_eq!(single.detection_mode, DETECTION.mode);
}

#[tokio::test]
async fn batch_with_one_unknown_and_one_failing_protein() {
    let lookup = FakeLookup::with(vec![pomc_protein(), protein("P01308", "INS")]);
    let gateway = FakeGateway::default();
    let mut controller = ModeController::new();
    controller.switch_mode(AnalysisMode::Batch);

    let accessions = validate_batch_list("P01189\nP01308\nINVALIDID\n").unwrap();
    assert_eq!(accessions, vec!["P01189", "P01308"]);

    let resolution = resolve_batch(&lookup, &accessions).await;
    assert!(resolution.not_found.is_empty());
    controller
        .upload_batch(
            resolution.accessions(),
            resolution.not_found,
            "proteins.txt".to_string(),
        )
        .unwrap();

    run_analysis(&mut controller, &gateway).await.unwrap();

    let state = controller.state();
    assert!(state.error.is_none(), "unexpected error {:?}", state.error);
    let results = state.results.as_ref().expect("partial batch still yields results");
    let AnalysisResultSet::Batch(batch) = results.as_ref() else {
        panic!("expected batch result");
    };
    assert_eq!(batch.total_submitted, 2);
    assert_eq!(batch.successful(), 1);
    assert_eq!(batch.failed(), 1);
    assert_eq!(batch.failed_ids, vec!["P01308"]);
    assert!(state.warning.as_deref().unwrap_or("").contains("P01308"));

    let stats = batch.stats();
    assert_eq!(stats.total_proteins, 1);
    assert_eq!(stats.total_peptides, 3);
}

#[tokio::test]
async fn batch_accession_unknown_to_lookup_is_reported_as_failed() {
    let lookup = FakeLookup::with(vec![pomc_protein()]);
    let gateway = FakeGateway::default();
    let mut controller = ModeController::new();
    controller.switch_mode(AnalysisMode::Batch);

    let accessions = validate_batch_list("P01189\nP01308\nINVALIDID\n").unwrap();
    let resolution = resolve_batch(&lookup, &accessions).await;
    assert_eq!(resolution.not_found, vec!["P01308"]);
    controller
        .upload_batch(
            resolution.accessions(),
            resolution.not_found,
            "proteins.txt".to_string(),
        )
        .unwrap();

    run_analysis(&mut controller, &gateway).await.unwrap();

    // Only the confirmed accession goes over the wire.
    let sent = gateway.requests.lock().unwrap();
    assert!(matches!(
        sent.as_slice(),
        [AnalysisRequest::Batch { protein_ids, .. }] if protein_ids == &vec!["P01189".to_string()]
    ));

    let state = controller.state();
    let results = state.results.as_ref().expect("partial batch still yields results");
    let AnalysisResultSet::Batch(batch) = results.as_ref() else {
        panic!("expected batch result");
    };
    assert_eq!(batch.total_submitted, 2);
    assert_eq!(batch.successful(), 1);
    assert_eq!(batch.failed(), 1);
    assert_eq!(batch.failed_ids, vec!["P01308"]);
    let warning = state.warning.as_deref().unwrap_or("");
    assert!(warning.contains("P01308"), "{}", warning);
}

#[tokio::test]
async fn batch_lookup_drops_unknown_accessions_with_a_warning() {
    let lookup = FakeLookup::with(vec![pomc_protein()]);
    let accessions = vec!["P01189".to_string(), "Q99999".to_string()];

    let resolution = resolve_batch(&lookup, &accessions).await;

    assert_eq!(resolution.accessions(), vec!["P01189"]);
    assert_eq!(resolution.not_found, vec!["Q99999"]);
    assert_eq!(
        resolution.warning().as_deref(),
        Some("1 proteins not found: Q99999")
    );
}

#[tokio::test]
async fn batch_where_every_protein_fails_stores_an_error() {
    let gateway = FakeGateway::default();
    let mut controller = ModeController::new();
    controller.switch_mode(AnalysisMode::Batch);
    controller
        .upload_batch(vec!["P01308".to_string()], vec![], "ins.txt".to_string())
        .unwrap();

    run_analysis(&mut controller, &gateway).await.unwrap();

    let state = controller.state();
    assert!(state.results.is_none());
    let error = state.error.as_deref().expect("error stored");
    assert!(error.contains("No proteins were successfully analyzed"), "{}", error);
}

#[tokio::test]
async fn switching_modes_discards_everything() {
    let gateway = FakeGateway::default();
    let mut controller = ModeController::new();
    controller.switch_mode(AnalysisMode::Batch);
    controller
        .upload_batch(vec!["P01189".to_string()], vec![], "one.txt".to_string())
        .unwrap();
    run_analysis(&mut controller, &gateway).await.unwrap();
    assert!(controller.state().results.is_some());

    controller.switch_mode(AnalysisMode::Single);
    let state = controller.state();
    assert_eq!(state.mode(), AnalysisMode::Single);
    assert_eq!(state.mode_state, ModeState::Single { protein: None });
    assert!(state.results.is_none());
    assert!(state.error.is_none());
    assert!(state.warning.is_none());

    controller.switch_mode(AnalysisMode::Batch);
    assert_eq!(
        controller.state().mode_state,
        ModeState::Batch {
            accessions: Vec::new(),
            not_found: Vec::new(),
            file_name: None
        }
    );
}

#[tokio::test]
async fn response_for_a_superseded_target_is_discarded() {
    let mut controller = ModeController::new();
    controller.select_protein(Some(pomc_protein())).unwrap();

    let ticket = controller.begin_analysis().unwrap();
    assert!(controller.state().is_busy());
    assert!(matches!(
        controller.begin_analysis(),
        Err(TransitionError::Busy)
    ));

    // User picks another protein while the first request is on the wire.
    controller
        .select_protein(Some(protein("P01308", "INS")))
        .unwrap();

    let gateway = FakeGateway::default();
    let outcome = peptide_predictor::data::AnalysisGateway::submit(&gateway, &ticket.request).await;
    let completion = controller.finish_analysis(ticket, outcome);

    assert_eq!(completion, Completion::Stale);
    let state = controller.state();
    assert!(state.results.is_none());
    assert!(!state.is_busy());
    assert!(state.can_analyze());
}

#[rstest]
#[case::unreachable(
    GatewayError::NetworkUnreachable { reason: "connection refused".into() },
    "Error: Cannot reach API server. Check your connection."
)]
#[case::service(
    GatewayError::Service { status: 422, message: "Sequence too long".into() },
    "Error: Sequence too long"
)]
#[tokio::test]
async fn gateway_failures_become_user_messages(
    #[case] error: GatewayError,
    #[case] expected: &str,
) {
    let gateway = FakeGateway::failing(error);
    let mut controller = ModeController::new();
    controller.select_protein(Some(pomc_protein())).unwrap();

    run_analysis(&mut controller, &gateway).await.unwrap();

    let state = controller.state();
    assert_eq!(state.error.as_deref(), Some(expected));
    assert!(state.results.is_none());
    assert!(!state.is_busy());
}

#[tokio::test]
async fn clear_asks_first_only_when_results_exist() {
    let mut controller = ModeController::new();
    controller.select_protein(Some(pomc_protein())).unwrap();
    assert_eq!(controller.clear(false), Confirmation::Done);
    assert!(!controller.state().mode_state.has_target());

    controller.select_protein(Some(pomc_protein())).unwrap();
    run_analysis(&mut controller, &FakeGateway::default())
        .await
        .unwrap();
    assert_eq!(controller.clear(false), Confirmation::NeedsConfirmation);
    assert!(controller.state().results.is_some());
    assert_eq!(controller.clear(true), Confirmation::Done);
    assert!(controller.state().results.is_none());
}

#[tokio::test]
async fn export_content_is_stable_across_calls() {
    let mut controller = ModeController::new();
    controller.select_protein(Some(pomc_protein())).unwrap();
    run_analysis(&mut controller, &FakeGateway::default())
        .await
        .unwrap();
    let results = controller.state().results.clone().unwrap();

    let first = export_results(&results, CsvQuoting::Verbatim).unwrap();
    let second = export_results(&results, CsvQuoting::Verbatim).unwrap();

    assert_eq!(first.content, second.content);
    assert_eq!(first.file_name, "P01189_POMC_HUMAN_peptides.csv");
    assert_eq!(first.file_name, second.file_name);
}
