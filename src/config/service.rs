pub struct ServiceConfig {
    pub base_url: &'static str,
    /// Single, FASTA and batch bodies all go to this endpoint; the body shape discriminates them.
    pub analyze_path: &'static str,
    pub search_path: &'static str,
    pub protein_path: &'static str,
    pub search_limit: usize,
    /// Shortest query the search box will send.
    pub min_search_chars: usize,
    pub timeout_ms: u64,
    pub user_agent: &'static str,
}

pub const SERVICE: ServiceConfig = ServiceConfig {
    base_url: "http://localhost:8000",
    analyze_path: "/analyze",
    search_path: "/api/proteins/search",
    protein_path: "/api/proteins",
    search_limit: 10,
    min_search_chars: 2,
    timeout_ms: 120_000, // Ultra-permissive runs on large proteins can take a while
    user_agent: "peptide-predictor/0.1",
};

impl ServiceConfig {
    pub fn analyze_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.analyze_path)
    }

    pub fn search_url(&self, base_url: &str) -> String {
        format!("{}{}", base_url.trim_end_matches('/'), self.search_path)
    }

    pub fn protein_url(&self, base_url: &str, accession: &str) -> String {
        format!(
            "{}{}/{}",
            base_url.trim_end_matches('/'),
            self.protein_path,
            accession
        )
    }
}
