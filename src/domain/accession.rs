use {regex::Regex, std::sync::LazyLock};

/// UniProt accession grammar (both the 6 and 10 character forms).
static ACCESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[OPQ][0-9][A-Z0-9]{3}[0-9]|[A-NR-Z][0-9](?:[A-Z][A-Z0-9]{2}[0-9]){1,2})$")
        .expect("accession pattern is valid")
});

/// `db|ACCESSION|ENTRY_NAME` as found at the start of UniProt FASTA headers.
static UNIPROT_TRIPLET: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^>?\s*[A-Za-z]{2}\|([^|\s]+)\|([^\s|]+)").expect("triplet pattern is valid")
});

pub fn is_uniprot_accession(candidate: &str) -> bool {
    ACCESSION.is_match(candidate)
}

/// Pull `ACCESSION|ENTRY_NAME` out of a UniProt style header.
///
/// Anything that does not look like a triplet yields `None`; callers fall back to their own
/// naming instead of failing.
pub fn parse_uniprot_triplet(header: &str) -> Option<String> {
    let caps = UNIPROT_TRIPLET.captures(header.trim())?;
    Some(format!("{}|{}", &caps[1], &caps[2]))
}

/// Display identity used in tables and exports, e.g. `P01189|POMC_HUMAN`.
pub fn id_gene_name(accession: &str, gene_name: Option<&str>) -> String {
    match gene_name.map(str::trim).filter(|g| !g.is_empty()) {
        Some(gene) if gene.ends_with("_HUMAN") => format!("{}|{}", accession, gene),
        Some(gene) => format!("{}|{}_HUMAN", accession, gene),
        None => accession.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("P01189", true)]
    #[case("P01308", true)]
    #[case("Q9Y6K9", true)]
    #[case("A0A023GPI8", true)]
    #[case("INVALIDID", false)]
    #[case("p01189", false)]
    #[case("P0118", false)]
    #[case(" P01189", false)]
    fn accession_grammar(#[case] input: &str, #[case] expected: bool) {
        assert_eq!(is_uniprot_accession(input), expected);
    }

    #[test]
    fn triplet_is_extracted_from_header() {
        assert_eq!(
            parse_uniprot_triplet("sp|P01189|COLI_HUMAN Pro-opiomelanocortin OS=Homo sapiens"),
            Some("P01189|COLI_HUMAN".to_string())
        );
        assert_eq!(
            parse_uniprot_triplet(">tr|A0A024R161|A0A024R161_HUMAN"),
            Some("A0A024R161|A0A024R161_HUMAN".to_string())
        );
    }

    #[test]
    fn non_triplet_header_degrades_to_none() {
        assert_eq!(parse_uniprot_triplet("my custom protein"), None);
        assert_eq!(parse_uniprot_triplet(""), None);
    }

    #[test]
    fn id_gene_name_appends_species_once() {
        assert_eq!(id_gene_name("P01189", Some("POMC")), "P01189|POMC_HUMAN");
        assert_eq!(id_gene_name("P01189", Some("POMC_HUMAN")), "P01189|POMC_HUMAN");
        assert_eq!(id_gene_name("P01189", Some("  ")), "P01189");
        assert_eq!(id_gene_name("P01189", None), "P01189");
    }
}
