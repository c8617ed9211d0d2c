use crate::args::InputArgs;

use ecsv::Result;

use log::LevelFilter;
use simple_logger::SimpleLogger;

/// Row-level tracing with `--verbose`, warnings only otherwise. `RUST_LOG` still wins.
pub fn configure_app(args: &InputArgs) -> Result {
    SimpleLogger::new()
        .with_level(log_level(args.verbose))
        .env()
        .init()?;

    return Ok(());
}

fn log_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    }
}
