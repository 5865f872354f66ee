// VendorCfg: Vendor configuration extraction written in Rust
// Copyright (C) 2022-2023 Tibor Schneider <sctibor@ethz.ch>
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

use std::{
    collections::HashSet,
    fs::{create_dir_all, read_to_string, OpenOptions},
    io::Write,
    path::{Path, PathBuf},
};

use clap::Parser;
use itertools::Itertools;
use rayon::prelude::*;
use thiserror::Error;

use vendorcfg::{
    parse_vendor_config, settings::Settings, ConfigFormat, Extraction, VendorConfigError,
};

/// Extract the vendor configuration of network device configuration files, and write it as JSON.
#[derive(Debug, Parser)]
struct Cli {
    /// Configuration files to extract.
    #[clap(required = true)]
    files: Vec<PathBuf>,
    /// Format of all files. If omitted, the format is detected for every file.
    #[clap(short, long)]
    format: Option<ConfigFormat>,
    /// Write `<DIR>/<file>.json` for every file instead of printing to stdout.
    #[clap(short, long, value_name = "DIR")]
    output: Option<PathBuf>,
    /// Number of worker threads. Defaults to the number of CPUs.
    #[clap(short, long)]
    jobs: Option<usize>,
    #[clap(flatten)]
    settings: Settings,
}

/// Failure to process a single file.
#[derive(Debug, Error)]
enum FileError {
    /// Reading or writing failed.
    #[error("{0}")]
    Io(#[from] std::io::Error),
    /// The configuration could not be extracted.
    #[error("{0}")]
    Config(#[from] VendorConfigError),
    /// The result could not be serialized.
    #[error("{0}")]
    Json(#[from] serde_json::Error),
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    pretty_env_logger::init_timed();

    let args = Cli::parse();

    let threads = args.jobs.unwrap_or_else(num_cpus::get);
    rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()?;

    if let Some(dir) = args.output.as_ref() {
        let clashes = clashing_outputs(&args.files);
        if !clashes.is_empty() {
            return Err(format!(
                "several input files would be written to the same output file: {}",
                clashes.iter().join(", ")
            )
            .into());
        }
        create_dir_all(dir)?;
    }

    let mut results: Vec<(&PathBuf, Result<String, FileError>)> = Vec::new();
    args.files
        .par_iter()
        .map(|file| (file, process(file, &args)))
        .collect_into_vec(&mut results);

    let mut failed = Vec::new();
    for (file, result) in results {
        match result {
            Ok(json) if args.output.is_none() => println!("{json}"),
            Ok(_) => {}
            Err(e) => {
                log::error!("{}: {e}", file.display());
                failed.push(file.display().to_string());
            }
        }
    }

    if failed.is_empty() {
        Ok(())
    } else {
        Err(format!(
            "{} of {} files failed: {}",
            failed.len(),
            args.files.len(),
            failed.iter().join(", ")
        )
        .into())
    }
}

/// Extract a single file, and either write the result to the output directory or return it.
fn process(file: &Path, args: &Cli) -> Result<String, FileError> {
    let text = read_to_string(file)?;
    let format = args.format.unwrap_or_else(|| ConfigFormat::detect(&text));
    log::debug!("{}: reading as {:?}", file.display(), format);

    let extraction = parse_vendor_config(&text, format, &args.settings)?;
    summary(file, &extraction);
    let json = serde_json::to_string_pretty(&extraction)?;

    if let Some(dir) = args.output.as_ref() {
        let path = dir.join(output_name(file));
        let mut f = OpenOptions::new()
            .create(true)
            .truncate(true)
            .write(true)
            .open(&path)?;
        writeln!(f, "{json}")?;
        log::debug!("{}: written to {}", file.display(), path.display());
    }
    Ok(json)
}

/// Name of the JSON file written for `file` into the output directory.
fn output_name(file: &Path) -> String {
    let name = file
        .file_name()
        .map(|x| x.to_string_lossy().into_owned())
        .unwrap_or_else(|| "config".to_string());
    format!("{name}.json")
}

/// Output names shared by more than one input file, in the order they first clash.
fn clashing_outputs(files: &[PathBuf]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut clashes = Vec::new();
    for name in files.iter().map(|f| output_name(f)) {
        if !seen.insert(name.clone()) && !clashes.contains(&name) {
            clashes.push(name);
        }
    }
    clashes
}

/// Log what was extracted from a file.
fn summary(file: &Path, extraction: &Extraction) {
    let config = &extraction.config;
    log::info!(
        "{}: {} ({}), {} interfaces, {} bgp processes, ospf: {}, {} route-maps",
        file.display(),
        config.hostname.as_deref().unwrap_or("<no hostname>"),
        config.vendor,
        config.interfaces.len(),
        config.bgp_processes.len(),
        config.ospf_process.is_some(),
        config.route_maps.len(),
    );
    let w = &extraction.warnings;
    if !w.is_empty() {
        log::info!(
            "{}: {} red flags, {} pedantic, {} unimplemented ({})",
            file.display(),
            w.red_flags.len(),
            w.pedantic.len(),
            w.unimplemented.len(),
            config.unimplemented_features.iter().join(", "),
        );
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn output_names_clash_on_equal_file_names() {
        let files: Vec<PathBuf> = ["a/r1.cfg", "b/r1.cfg", "a/r2.cfg", "c/r1.cfg"]
            .into_iter()
            .map(PathBuf::from)
            .collect();
        assert_eq!(output_name(&files[0]), "r1.cfg.json");
        assert_eq!(clashing_outputs(&files), vec!["r1.cfg.json".to_string()]);
        assert!(clashing_outputs(&files[1..3]).is_empty());
    }
}
