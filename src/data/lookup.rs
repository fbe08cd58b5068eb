//! Protein metadata lookups (search box, selection, batch existence check).

use {
    super::gateway::build_client,
    crate::{
        config::{DF, SERVICE},
        domain::{ProteinCandidate, ProteinRef, SearchKind},
        error::GatewayError,
    },
    anyhow::Result,
    async_trait::async_trait,
};

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
pub trait ProteinLookup: Send + Sync {
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: usize,
    ) -> Result<Vec<ProteinCandidate>, GatewayError>;

    async fn fetch(&self, accession: &str) -> Result<ProteinRef, GatewayError>;
}

pub struct HttpLookup {
    client: reqwest::Client,
    base_url: String,
}

impl HttpLookup {
    pub fn new(base_url: &str) -> Result<Self> {
        Ok(Self {
            client: build_client()?,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_json<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
        what: &str,
    ) -> Result<T, GatewayError> {
        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::NetworkUnreachable {
                reason: e.to_string(),
            })?;
        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(GatewayError::NotFound {
                what: what.to_string(),
            });
        }
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(super::gateway::decode_service_error(
                status.as_u16(),
                status.canonical_reason(),
                &text,
            ));
        }
        response
            .json::<T>()
            .await
            .map_err(|e| GatewayError::InvalidResponse {
                reason: e.to_string(),
            })
    }
}

#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
impl ProteinLookup for HttpLookup {
    async fn search(
        &self,
        query: &str,
        kind: SearchKind,
        limit: usize,
    ) -> Result<Vec<ProteinCandidate>, GatewayError> {
        let query = query.trim();
        if query.chars().count() < SERVICE.min_search_chars {
            return Ok(Vec::new());
        }

        #[cfg(debug_assertions)]
        if DF.log_lookup {
            log::info!("LOOKUP: search {:?} by {}", query, kind);
        }

        let limit = limit.to_string();
        let request = self.client.get(SERVICE.search_url(&self.base_url)).query(&[
            ("q", query),
            ("type", kind.as_query()),
            ("limit", limit.as_str()),
        ]);
        self.get_json(request, query).await
    }

    async fn fetch(&self, accession: &str) -> Result<ProteinRef, GatewayError> {
        #[cfg(debug_assertions)]
        if DF.log_lookup {
            log::info!("LOOKUP: fetch {}", accession);
        }

        let request = self
            .client
            .get(SERVICE.protein_url(&self.base_url, accession));
        self.get_json(request, accession).await
    }
}

/// Accessions split by whether the lookup service knows them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct BatchResolution {
    pub found: Vec<ProteinRef>,
    pub not_found: Vec<String>,
}

impl BatchResolution {
    pub fn accessions(&self) -> Vec<String> {
        self.found.iter().map(|p| p.accession.clone()).collect()
    }

    pub fn warning(&self) -> Option<String> {
        not_found_warning(&self.not_found)
    }
}

/// "N proteins not found: A, B", or `None` when everything resolved.
pub fn not_found_warning(not_found: &[String]) -> Option<String> {
    (!not_found.is_empty()).then(|| {
        format!(
            "{} proteins not found: {}",
            not_found.len(),
            not_found.join(", ")
        )
    })
}

/// Fetch each accession in order. Any failure, transport included, marks that accession missing.
pub async fn resolve_batch(lookup: &dyn ProteinLookup, accessions: &[String]) -> BatchResolution {
    let mut resolution = BatchResolution::default();
    for accession in accessions {
        match lookup.fetch(accession).await {
            Ok(protein) => resolution.found.push(protein),
            Err(e) => {
                log::warn!("LOOKUP: {} not resolved: {}", accession, e);
                resolution.not_found.push(accession.clone());
            }
        }
    }
    resolution
}
