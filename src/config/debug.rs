//! Debugging feature flags.

#[allow(dead_code)]
pub struct LogFlags {
    /// Request bodies and response status codes.
    pub log_gateway: bool,

    /// Protein search / fetch traffic.
    pub log_lookup: bool,

    /// Every state transition of the mode controller.
    pub log_controller: bool,

    pub log_validation: bool,

    pub log_export: bool,

    /// Activate trace_time macro (for cool scope-level timing)
    pub log_performance: bool,
}

pub const DF: LogFlags = LogFlags {
    log_controller: true,
    log_gateway: true,

    log_lookup: false,
    log_validation: false,
    log_export: false,
    log_performance: false,
};
