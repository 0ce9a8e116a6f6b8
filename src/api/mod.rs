//! High-level run API: resolve the final configuration from the config file
//! and run options, then render every job in order. Prefer these entrypoints
//! over the lower-level `core` and `io` modules when embedding doc-template.
use std::io;

use tracing::{debug, info};

use crate::core::args::{parse_args, parse_json};
use crate::core::config::{Configuration, Job};
use crate::core::params::RunOptions;
use crate::error::{Error, LoadError, Result};
use crate::io::json::read_data_file;
use crate::io::{Destination, DocTemplate};
use crate::types::DataContext;

/// Outcome of a successful run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RunReport {
    pub rendered: usize,
}

/// Resolve options and render every job.
pub fn run(options: &RunOptions) -> Result<RunReport> {
    let config = resolve(options)?;
    run_jobs(&config)
}

/// Build the final configuration for a run.
///
/// CLI options override the config file's top-level fields. A resolved
/// single template replaces the job set. Each job then gets data from
/// exactly one source, highest precedence first: inline JSON, the shared
/// data file, the job's own data file, positional `key=value` arguments,
/// and finally the job's literal data. A resolved output path applies to
/// every job.
pub fn resolve(options: &RunOptions) -> Result<Configuration> {
    let mut config = load_configuration(options)?;

    // An explicitly empty `--data` must still fail to decode.
    let inline = match options.data.as_deref() {
        Some(data) => Some(data.to_string()),
        None if !config.data.is_empty() => Some(config.data.clone()),
        None => None,
    };
    merge_options(&mut config, options);

    if !config.file.as_os_str().is_empty() {
        debug!("Using single template {:?}", config.file);
        config.templates = vec![Job::new(config.file.clone())];
    }
    if config.templates.is_empty() {
        return Err(Error::NoTemplates);
    }

    let inline = inline.as_deref().map(parse_json).transpose()?;
    let shared = if config.data_file.as_os_str().is_empty() {
        None
    } else {
        Some(read_data_file(&config.data_file)?)
    };
    let positional = parse_args(&options.args)?;

    for (index, job) in config.templates.iter_mut().enumerate() {
        if let Some(data) = resolve_job_data(job, inline.as_ref(), shared.as_ref(), &positional)
            .map_err(|e| e.in_job(index, &job.file))?
        {
            job.data = data;
        }
        if !config.output.as_os_str().is_empty() {
            job.output = config.output.clone();
        }
    }

    Ok(config)
}

/// Render every job in order, stopping at the first failure.
pub fn run_jobs(config: &Configuration) -> Result<RunReport> {
    let mut report = RunReport::default();

    for (index, job) in config.templates.iter().enumerate() {
        render_job(job, config.strict).map_err(|e| e.in_job(index, &job.file))?;
        info!(
            "Rendered {:?} -> {}",
            job.file,
            if job.writes_to_stdout() {
                "stdout".to_string()
            } else {
                job.output.display().to_string()
            }
        );
        report.rendered += 1;
    }

    Ok(report)
}

/// Render a single job to its output.
///
/// The template is parsed before the output is created, so a broken template
/// never leaves a file behind. A render failure takes precedence over any
/// failure to close the output. On either failure the partial output file is
/// removed.
pub fn render_job(job: &Job, strict: bool) -> Result<()> {
    let template = DocTemplate::open_with(&job.file, strict)?;
    let mut destination = Destination::open(&job.output)?;

    match template.render(&job.data, &mut destination) {
        Ok(()) => destination.finish(),
        Err(Error::Output { source, .. }) => {
            let target = destination.label();
            destination.abandon();
            Err(Error::Output { target, source })
        }
        Err(err) => {
            destination.abandon();
            Err(err)
        }
    }
}

fn load_configuration(options: &RunOptions) -> Result<Configuration> {
    let path = options.config_path();
    match Configuration::load(&path) {
        Ok(config) => Ok(config),
        Err(Error::ConfigLoad {
            source: LoadError::Io(err),
            ..
        }) if options.config.is_none() && err.kind() == io::ErrorKind::NotFound => {
            info!("No config file at {:?}, continuing without one", path);
            Ok(Configuration {
                config_file: path,
                ..Configuration::new()
            })
        }
        Err(err) => Err(err),
    }
}

fn merge_options(config: &mut Configuration, options: &RunOptions) {
    if let Some(file) = &options.file {
        config.file = file.clone();
    }
    if let Some(output) = &options.output {
        config.output = output.clone();
    }
    if let Some(data_file) = &options.data_file {
        config.data_file = data_file.clone();
    }
    if let Some(data) = &options.data {
        config.data = data.clone();
    }
    if options.strict {
        config.strict = true;
    }
}

fn resolve_job_data(
    job: &Job,
    inline: Option<&DataContext>,
    shared: Option<&DataContext>,
    positional: &DataContext,
) -> Result<Option<DataContext>> {
    if let Some(data) = inline {
        debug!("{:?}: using inline data", job.file);
        return Ok(Some(data.clone()));
    }
    if let Some(data) = shared {
        debug!("{:?}: using shared data file", job.file);
        return Ok(Some(data.clone()));
    }
    if !job.data_file.as_os_str().is_empty() {
        debug!("{:?}: using data file {:?}", job.file, job.data_file);
        return read_data_file(&job.data_file).map(Some);
    }
    if !positional.is_empty() {
        debug!("{:?}: using {} argument value(s)", job.file, positional.len());
        return Ok(Some(positional.clone()));
    }
    Ok(None)
}
