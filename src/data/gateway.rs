//! The one HTTP call behind every analysis run.

use {
    super::wire::{BatchResponse, ErrorBody, RawResponse, SingleResponse},
    crate::{
        config::{DF, SERVICE},
        error::GatewayError,
        models::AnalysisRequest,
    },
    anyhow::{Context, Result},
    async_trait::async_trait,
    serde_json::{Value, json},
};

/// Submits analysis requests to the remote service. One attempt per call, no retries.
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait AnalysisGateway: Send + Sync {
    async fn submit(&self, request: &AnalysisRequest) -> Result<RawResponse, GatewayError>;
}

pub struct HttpGateway {
    client: reqwest::Client,
    base_url: String,
}

impl HttpGateway {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

pub(crate) fn build_client() -> Result<reqwest::Client> {
    #[cfg_attr(target_arch = "wasm32", allow(unused_mut))]
    let mut builder = reqwest::Client::builder();

    #[cfg(not(target_arch = "wasm32"))]
    {
        builder = builder
            .timeout(std::time::Duration::from_millis(SERVICE.timeout_ms))
            .user_agent(SERVICE.user_agent);
    }

    builder.build().context("Failed to create HTTP client")
}

/// JSON body for each request shape. Batch bodies omit detection parameters.
pub fn build_payload(request: &AnalysisRequest) -> Value {
    match request {
        AnalysisRequest::Single {
            protein_id,
            params,
            mode,
        } => json!({
            "proteinId": protein_id,
            "mode": mode.as_wire(),
            "signalPeptideLength": params.signal_peptide_length,
            "minCleavageSites": params.min_cleavage_sites,
            "minCleavageSpacing": params.min_cleavage_spacing,
            "maxPeptideLength": params.max_peptide_length,
        }),
        AnalysisRequest::Fasta {
            sequence,
            params,
            mode,
        } => json!({
            "fastaSequence": sequence.sequence(),
            "fastaHeader": sequence.header(),
            "mode": mode.as_wire(),
            "signalPeptideLength": params.signal_peptide_length,
            "minCleavageSites": params.min_cleavage_sites,
            "minCleavageSpacing": params.min_cleavage_spacing,
            "maxPeptideLength": params.max_peptide_length,
        }),
        AnalysisRequest::Batch { protein_ids, mode } => json!({
            "proteinId": protein_ids,
            "mode": mode.as_wire(),
        }),
    }
}

/// Turn a non-2xx response into an error, preferring the service's own `detail`.
pub fn decode_service_error(status: u16, status_text: Option<&str>, body: &str) -> GatewayError {
    let detail = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.detail)
        .and_then(|detail| match detail {
            Value::String(s) if !s.trim().is_empty() => Some(s),
            Value::Null | Value::String(_) => None,
            other => Some(other.to_string()),
        });

    match detail {
        Some(message) => GatewayError::Service { status, message },
        None => GatewayError::ServiceUndecodable {
            status,
            status_text: status_text
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("HTTP {}", status)),
        },
    }
}

/// Decode a 2xx body according to the shape that was requested.
pub fn decode_response(request: &AnalysisRequest, body: &str) -> Result<RawResponse, GatewayError> {
    let invalid = |e: serde_json::Error| GatewayError::InvalidResponse {
        reason: e.to_string(),
    };
    match request {
        AnalysisRequest::Batch { .. } => serde_json::from_str::<BatchResponse>(body)
            .map(RawResponse::Batch)
            .map_err(invalid),
        _ => serde_json::from_str::<SingleResponse>(body)
            .map(RawResponse::Single)
            .map_err(invalid),
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl AnalysisGateway for HttpGateway {
    async fn submit(&self, request: &AnalysisRequest) -> Result<RawResponse, GatewayError> {
        let url = SERVICE.analyze_url(&self.base_url);
        let body = build_payload(request);

        #[cfg(debug_assertions)]
        if DF.log_gateway {
            log::info!("GATEWAY: POST {} ({})", url, request.describe());
        }

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| GatewayError::NetworkUnreachable {
                reason: e.to_string(),
            })?;

        let status = response.status();

        #[cfg(debug_assertions)]
        if DF.log_gateway {
            log::info!("GATEWAY: {} -> {}", request.describe(), status);
        }

        // A body that cannot be read still leaves the status to report.
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let err = decode_service_error(status.as_u16(), status.canonical_reason(), &text);
            log::warn!("GATEWAY: {} failed: {}", request.describe(), err);
            return Err(err);
        }

        decode_response(request, &text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        analysis::validate_fasta,
        config::DETECTION,
        domain::DetectionMode,
    };

    #[test]
    fn single_payload_carries_parameters() {
        let request = AnalysisRequest::Single {
            protein_id: "P01189".into(),
            params: DETECTION.single,
            mode: DetectionMode::Strict,
        };
        assert_eq!(
            build_payload(&request),
            json!({
                "proteinId": "P01189",
                "mode": "strict",
                "signalPeptideLength": 20,
                "minCleavageSites": 4,
                "minCleavageSpacing": 5,
                "maxPeptideLength": 100,
            })
        );
    }

    #[test]
    fn fasta_payload_has_nullable_header() {
        let sequence = validate_fasta(&"MPRSCCSRSGALLLALLLQASMEVRGWCLESSQ".repeat(2)).unwrap();
        let request = AnalysisRequest::Fasta {
            sequence,
            params: DETECTION.fasta,
            mode: DetectionMode::UltraPermissive,
        };
        let payload = build_payload(&request);
        assert_eq!(payload["fastaHeader"], Value::Null);
        assert_eq!(payload["mode"], "ultra-permissive");
        assert_eq!(payload["fastaSequence"].as_str().map(str::len), Some(66));
    }

    #[test]
    fn batch_payload_omits_parameters() {
        let request = AnalysisRequest::Batch {
            protein_ids: vec!["P01189".into(), "P01308".into()],
            mode: DetectionMode::Permissive,
        };
        assert_eq!(
            build_payload(&request),
            json!({ "proteinId": ["P01189", "P01308"], "mode": "permissive" })
        );
    }

    #[test]
    fn service_detail_is_used_verbatim() {
        let err = decode_service_error(404, Some("Not Found"), r#"{"detail": "Protein not found"}"#);
        assert_eq!(
            err,
            GatewayError::Service {
                status: 404,
                message: "Protein not found".into()
            }
        );
    }

    #[test]
    fn undecodable_body_falls_back_to_status_text() {
        let err = decode_service_error(502, Some("Bad Gateway"), "<html>upstream</html>");
        assert_eq!(
            err,
            GatewayError::ServiceUndecodable {
                status: 502,
                status_text: "Bad Gateway".into()
            }
        );
        let err = decode_service_error(599, None, "");
        assert_eq!(err.to_string(), "HTTP 599");
    }

    #[test]
    fn structured_detail_is_stringified() {
        let err = decode_service_error(422, Some("Unprocessable Entity"), r#"{"detail": [{"msg": "bad"}]}"#);
        assert!(matches!(err, GatewayError::Service { status: 422, ref message } if message.contains("bad")));
    }

    #[test]
    fn wrong_shape_is_invalid_response() {
        let request = AnalysisRequest::Batch {
            protein_ids: vec!["P01189".into()],
            mode: DetectionMode::Permissive,
        };
        assert!(matches!(
            decode_response(&request, "[1, 2, 3]"),
            Err(GatewayError::InvalidResponse { .. })
        ));
    }
}
