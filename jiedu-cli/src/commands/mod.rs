//! CLI command implementations

pub mod read;
pub mod segment;
pub mod stats;

pub use read::ReadArgs;
pub use segment::SegmentArgs;
pub use stats::StatsArgs;

/// Initialize logging from the shared verbosity flags.
pub fn init_logging(verbose: u8, quiet: bool) {
    if quiet {
        return;
    }
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .try_init();
}
