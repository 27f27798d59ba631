use std::process;

use crate::runner::{run_batch, BatchOptions};
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_batch(opts: &BatchOptions, output: OutputFormat, quiet: bool) {
    let report = match run_batch(opts) {
        Ok(r) => r,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    for failure in &report.failures {
        report_error(&format!("error: {}", failure), output, quiet);
    }

    if !quiet {
        match output {
            OutputFormat::Text => println!(
                "wrote {} of {} output(s) to {} ({} with syntax errors)",
                report.written,
                opts.jobs,
                opts.output_dir.display(),
                report.with_errors
            ),
            OutputFormat::Json => println!(
                "{}",
                serde_json::json!({
                    "written": report.written,
                    "jobs": opts.jobs,
                    "with_errors": report.with_errors,
                    "failed": report.failures.len(),
                })
            ),
        }
    }

    if !report.failures.is_empty() {
        process::exit(1);
    }
}
