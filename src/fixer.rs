//! Parameter header generation pipeline
//!
//! Drives one generation run:
//!
//! 1. Read each source file in order and merge it without overwriting, so the
//!    first file defining a name wins. Missing files are skipped.
//! 2. Decode each extra parameter as a config line and merge with
//!    overwriting, so extras always win.
//! 3. Inject the build date and build user.
//! 4. Write the header, then the depfile.

use crate::config::FixerConfig;
use crate::depfile::{write_depfile, DepfileError};
use crate::header::{read_header, write_header, HeaderError};
use crate::params::{decode_cfg_line, read_cfg_file, MergePolicy, ParamDict};
use crate::provenance::Provenance;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

/// Error during a generation run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum FixError {
    /// A source file exists but could not be read
    #[error("Failed to read source {}: {source}", .path.display())]
    Source {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    /// Header output failed
    #[error(transparent)]
    Header(#[from] HeaderError),
    /// Depfile output failed
    #[error(transparent)]
    Depfile(#[from] DepfileError),
}

/// Inputs for one generation run.
#[derive(Debug, Clone, Default)]
pub struct FixOptions {
    /// Header file to generate
    pub output: PathBuf,
    /// Config files, lowest index has the highest priority
    pub source_files: Vec<PathBuf>,
    /// `name=value` overrides applied after all source files
    pub extra_parameters: Vec<String>,
    /// Depfile to write, if any
    pub depfile: Option<PathBuf>,
    /// Header layout and provenance keys
    pub config: FixerConfig,
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct FixReport {
    /// Final dictionary as written to the header
    pub params: ParamDict,
    /// Source files that were read
    pub sources_read: Vec<PathBuf>,
    /// Source files that did not exist
    pub sources_missing: Vec<PathBuf>,
    /// Parameters that differ from the previously generated header, ignoring
    /// provenance fields. `None` if there was no previous header.
    pub changed_since_last: Option<usize>,
}

/// Merged source files with the paths that contributed to them.
#[derive(Debug, Clone, Default)]
pub struct SourceParams {
    pub params: ParamDict,
    pub read: Vec<PathBuf>,
    pub missing: Vec<PathBuf>,
}

/// Read and merge source files. The first file defining a name wins.
pub fn collect_sources(sources: &[PathBuf]) -> Result<SourceParams, FixError> {
    let mut collected = SourceParams::default();

    for path in sources {
        info!("source {}", path.display());
        let dict = read_cfg_file(path)
            .map_err(|source| FixError::Source { path: path.clone(), source })?;
        let Some(dict) = dict else {
            debug!("source {} does not exist, skipping", path.display());
            collected.missing.push(path.clone());
            continue;
        };

        for (name, value) in dict.iter() {
            debug!("sample file name={{{} {}}}", name, value);
        }
        collected.params.merge(&dict, MergePolicy::KeepExisting);
        collected.read.push(path.clone());
    }

    Ok(collected)
}

/// Decode extra parameters. Invalid lines are ignored; later duplicates win.
pub fn collect_extras(extras: &[String]) -> ParamDict {
    extras
        .iter()
        .filter_map(|line| {
            let entry = decode_cfg_line(line);
            match &entry {
                Some(e) => info!("extra parameter {{{} {}}}", e.name, e.value),
                None => debug!("ignoring extra parameter '{}'", line),
            }
            entry
        })
        .collect()
}

/// Build the final dictionary from sources, extras, and provenance.
pub fn build_params(
    sources: &ParamDict,
    extras: &ParamDict,
    provenance: &Provenance,
    config: &FixerConfig,
) -> ParamDict {
    let mut params = ParamDict::new();
    params.merge(sources, MergePolicy::KeepExisting).merge(extras, MergePolicy::Overwrite);
    provenance.inject(&mut params, &config.provenance);
    params
}

fn without_provenance(params: &ParamDict, config: &FixerConfig) -> ParamDict {
    let mut stripped = params.clone();
    stripped.remove(&config.provenance.date_key);
    stripped.remove(&config.provenance.user_key);
    stripped
}

fn compare_with_previous(output: &Path, params: &ParamDict, config: &FixerConfig) -> Option<usize> {
    // Unreadable previous output only costs the change summary
    let previous = match read_header(output) {
        Ok(previous) => previous?,
        Err(e) => {
            debug!("could not read previous header: {}", e);
            return None;
        }
    };
    let before = without_provenance(&previous, config);
    let after = without_provenance(params, config);
    Some(before.count_changes(&after))
}

/// Run one generation with the given provenance.
pub fn fix_parameter_config_with(
    options: &FixOptions,
    provenance: &Provenance,
) -> Result<FixReport, FixError> {
    info!("out_file {}", options.output.display());

    let sources = collect_sources(&options.source_files)?;
    let extras = collect_extras(&options.extra_parameters);
    let params = build_params(&sources.params, &extras, provenance, &options.config);

    for (name, value) in params.iter() {
        debug!("parameter {} = {}", name, value);
    }

    let changed_since_last = compare_with_previous(&options.output, &params, &options.config);
    write_header(&options.output, &params, &options.config.header)?;
    info!("wrote {} parameters to {}", params.len(), options.output.display());

    if let Some(depfile) = &options.depfile {
        write_depfile(depfile, &options.output, &options.source_files)?;
        debug!("wrote depfile {}", depfile.display());
    }

    Ok(FixReport {
        params,
        sources_read: sources.read,
        sources_missing: sources.missing,
        changed_since_last,
    })
}

/// Run one generation, capturing the current time and user.
pub fn fix_parameter_config(options: &FixOptions) -> Result<FixReport, FixError> {
    fix_parameter_config_with(options, &Provenance::capture())
}
