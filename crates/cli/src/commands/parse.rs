use std::path::Path;
use std::process;

use jtree_core::ParserConfig;

use crate::runner::parse_file;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_parse(
    file: &Path,
    indent: usize,
    config: ParserConfig,
    output: OutputFormat,
    quiet: bool,
) {
    let parse = match parse_file(file, config) {
        Ok(p) => p,
        Err(e) => {
            report_error(&format!("error: {}", e), output, quiet);
            process::exit(1);
        }
    };

    match output {
        OutputFormat::Text => print!("{}", parse.render(indent)),
        OutputFormat::Json => {
            let pretty = serde_json::to_string_pretty(&parse)
                .unwrap_or_else(|e| format!("serialization error: {}", e));
            println!("{}", pretty);
        }
    }

    if !parse.is_ok() {
        process::exit(1);
    }
}
