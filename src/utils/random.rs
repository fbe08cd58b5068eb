/// Four-digit number (1000-9999) for fallback export names.
pub fn random_suffix() -> u16 {
    let raw = getrandom::u32().unwrap_or_else(|e| {
        log::warn!("getrandom failed ({}), using clock for file suffix", e);
        web_time::SystemTime::now()
            .duration_since(web_time::UNIX_EPOCH)
            .map(|d| d.subsec_nanos())
            .unwrap_or(0)
    });
    1000 + (raw % 9000) as u16
}
