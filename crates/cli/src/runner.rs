//! Batch and conformance runners.
//!
//! Batch convention (reference harness):
//!   <input_dir>/inputNN.txt   -- token records, NN = 01..jobs
//!   <output_dir>/outputNN.txt -- rendered tree, then a blank line and the
//!                                first diagnostic when there is one
//!
//! Conformance suite convention:
//!   <suite>/inputs/inputNN.txt
//!   <suite>/expected/outputNN.txt
use std::path::{Path, PathBuf};

use jtree_core::{lex, Parse, Parser, ParserConfig};

use crate::error::DriverError;
use crate::tap::Tap;

#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub jobs: usize,
    pub indent: usize,
    pub parser: ParserConfig,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    /// Jobs whose output file was written, diagnostics or not.
    pub written: usize,
    /// Jobs that recorded a syntax diagnostic.
    pub with_errors: usize,
    /// Jobs that could not be read or written.
    pub failures: Vec<DriverError>,
}

pub fn input_name(job: usize) -> String {
    format!("input{:02}.txt", job)
}

pub fn output_name(job: usize) -> String {
    format!("output{:02}.txt", job)
}

/// Parse a token record file.
pub fn parse_file(path: &Path, config: ParserConfig) -> Result<Parse, DriverError> {
    let src = std::fs::read_to_string(path).map_err(|source| DriverError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let tokens = lex(&src);
    log::debug!("{}: {} token(s)", path.display(), tokens.len());
    Ok(Parser::new(tokens).with_config(config).parse())
}

/// Run one job: parse `input` and write the rendered result to `output`.
pub fn run_job(
    input: &Path,
    output: &Path,
    indent: usize,
    config: ParserConfig,
) -> Result<Parse, DriverError> {
    let parse = parse_file(input, config)?;
    std::fs::write(output, parse.render(indent)).map_err(|source| DriverError::Write {
        path: output.to_path_buf(),
        source,
    })?;
    Ok(parse)
}

/// Run every job. Both folders must exist before anything is read or written;
/// after that a failing job is recorded and the batch continues.
pub fn run_batch(opts: &BatchOptions) -> Result<BatchReport, DriverError> {
    if !opts.input_dir.is_dir() {
        return Err(DriverError::MissingDir {
            role: "input",
            path: opts.input_dir.clone(),
        });
    }
    if !opts.output_dir.is_dir() {
        return Err(DriverError::MissingDir {
            role: "output",
            path: opts.output_dir.clone(),
        });
    }

    let mut report = BatchReport::default();
    for job in 1..=opts.jobs {
        let input = opts.input_dir.join(input_name(job));
        let output = opts.output_dir.join(output_name(job));
        match run_job(&input, &output, opts.indent, opts.parser) {
            Ok(parse) => {
                report.written += 1;
                if let Some(err) = parse.errors.first() {
                    report.with_errors += 1;
                    log::info!("{}: {}", input.display(), err);
                } else {
                    log::info!("{}: ok", input.display());
                }
            }
            Err(e) => {
                log::warn!("job {} failed: {}", job, e);
                report.failures.push(e);
            }
        }
    }
    Ok(report)
}

pub struct RunResult {
    pub failed: usize,
}

/// Compare every `inputs/inputNN.txt` against `expected/outputNN.txt` and
/// print a TAP report.
pub fn run_suite(suite_dir: &Path, indent: usize, config: ParserConfig) -> RunResult {
    let mut tap = Tap::new();
    let inputs = suite_dir.join("inputs");
    let expected_dir = suite_dir.join("expected");

    for input in glob_input_files(&inputs) {
        let stem = stem(&input);
        let test_name = format!("inputs/{}", stem);
        let expected_name = format!("{}.txt", stem.replacen("input", "output", 1));
        let expected_path = expected_dir.join(expected_name);

        let expected = match std::fs::read_to_string(&expected_path) {
            Ok(s) => s,
            Err(_) => {
                tap.not_ok(
                    &test_name,
                    format!("missing expected file: {}", expected_path.display()),
                );
                continue;
            }
        };

        match parse_file(&input, config) {
            Ok(parse) => {
                let got = parse.render(indent);
                if got == expected {
                    tap.ok(&test_name);
                } else {
                    tap.not_ok(&test_name, text_diff(&expected, &got));
                }
            }
            Err(e) => tap.not_ok(&test_name, e.to_string()),
        }
    }

    let failed = tap.failure_count();
    tap.finish();
    RunResult { failed }
}

// -- Helpers --

fn glob_input_files(dir: &Path) -> Vec<PathBuf> {
    let mut results = Vec::new();
    if let Ok(entries) = std::fs::read_dir(dir) {
        for entry in entries.flatten() {
            let path = entry.path();
            let name = stem(&path);
            if name.starts_with("input")
                && path.extension().and_then(|e| e.to_str()) == Some("txt")
            {
                results.push(path);
            }
        }
    }
    results.sort();
    results
}

fn stem(path: &Path) -> String {
    path.file_stem()
        .unwrap_or_default()
        .to_string_lossy()
        .to_string()
}

fn text_diff(expected: &str, got: &str) -> String {
    format!("--- expected\n{}\n+++ got\n{}", expected, got)
}
