/// Time a block and log it when it runs past `$threshold_micros`. No-op unless
/// `DF.log_performance` is set.
#[macro_export]
macro_rules! trace_time {
    ($name:expr, $threshold_micros:expr, $block:block) => {{
        if $crate::config::DF.log_performance {
            let start = $crate::utils::AppInstant::now();
            let result = $block;
            let micros = start.elapsed().as_micros();
            if micros > $threshold_micros {
                log::warn!(
                    "SLOW [{}]: '{}' took {:.3}ms (threshold {:.3}ms)",
                    if cfg!(debug_assertions) { "debug" } else { "release" },
                    $name,
                    micros as f64 / 1000.0,
                    $threshold_micros as f64 / 1000.0
                );
            }
            result
        } else {
            $block
        }
    }};
}
