mod perf;
mod random;
mod time_utils;

pub use random::random_suffix;
pub use time_utils::{AppInstant, format_elapsed};
