use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use doc_template::{RunOptions, api};

use super::args::CliArgs;

/// Logs go to stderr so they never mix with rendered output on stdout.
/// `--log` forces debug output; otherwise `RUST_LOG` applies, defaulting to warnings.
fn init_logging(log: bool) {
    let filter = if log {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub fn run(args: CliArgs) -> doc_template::Result<()> {
    init_logging(args.log);

    let options = RunOptions::from(args);
    debug!("Run options: {:?}", options);

    let config = api::resolve(&options)?;
    info!(
        "Rendering {} template(s) from {:?}",
        config.templates.len(),
        config.config_file
    );

    let report = api::run_jobs(&config)?;
    info!("Rendered {} template(s)", report.rendered);

    Ok(())
}
