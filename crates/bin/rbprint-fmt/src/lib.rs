pub mod diagnostics;
pub mod doc;
pub mod print;
pub mod render;
mod tree_print;

use std::fs;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use rbprint_tree::utils::error::{ReportableError, report};

pub use tree_print::{pretty_print, pretty_print_with, print_tree};

/// Layout settings shared by the printer and the renderer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FormatConfig {
    /// Preferred line width.
    pub width: usize,
    /// Columns per indentation level.
    pub indent_size: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            width: 80,
            indent_size: 2,
        }
    }
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// JSON syntax tree to format (if not specified, reads from stdin)
    #[clap(value_parser)]
    file: Option<PathBuf>,
    /// Width of the editor
    #[arg(long, default_value = "80")]
    width: usize,
    /// Indentation size
    #[arg(long, default_value = "2")]
    indent_size: usize,
    /// Fail when the tree contains node kinds the printer does not know
    #[arg(long)]
    strict: bool,
}

impl Args {
    pub fn config(&self) -> FormatConfig {
        FormatConfig {
            width: self.width,
            indent_size: self.indent_size,
        }
    }
}

fn read_input(file: Option<&PathBuf>) -> std::io::Result<String> {
    match file {
        Some(path) => fs::read_to_string(path),
        None => {
            let mut buf = String::new();
            eprintln!("No file specified. Reading from stdin...");
            std::io::stdin().read_to_string(&mut buf)?;
            Ok(buf)
        }
    }
}

pub fn lib_main() -> ExitCode {
    let args = Args::parse();
    let config = args.config();
    log::debug!("formatting with {config:?}");

    let code = match read_input(args.file.as_ref()) {
        Ok(code) => code,
        Err(e) => {
            match &args.file {
                Some(path) => eprintln!("Unable to read {}: {e}", path.display()),
                None => eprintln!("Unable to read from stdin: {e}"),
            }
            return ExitCode::FAILURE;
        }
    };

    let sink = diagnostics::CollectDiagnostics::new();
    let path = args.file.clone().unwrap_or_default();
    match pretty_print_with(&code, &args.file, &config, &sink) {
        Ok(rendered) => {
            print!("{rendered}");
            let unsupported = sink.take();
            if args.strict && !unsupported.is_empty() {
                let errs: Vec<Box<dyn ReportableError>> = unsupported
                    .into_iter()
                    .map(|u| Box::new(u) as Box<dyn ReportableError>)
                    .collect();
                report(&code, path, &errs);
                return ExitCode::FAILURE;
            }
            ExitCode::SUCCESS
        }
        Err(errs) => {
            report(&code, path, &errs);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn args_defaults() {
        let args = Args::try_parse_from(["rbprint-fmt"]).unwrap();
        assert_eq!(args.config(), FormatConfig::default());
        assert!(!args.strict);
        assert!(args.file.is_none());
    }

    #[test]
    fn args_override() {
        let args = Args::try_parse_from([
            "rbprint-fmt",
            "tree.json",
            "--width",
            "40",
            "--indent-size",
            "4",
            "--strict",
        ])
        .unwrap();
        assert_eq!(
            args.config(),
            FormatConfig {
                width: 40,
                indent_size: 4
            }
        );
        assert!(args.strict);
        assert_eq!(args.file, Some(PathBuf::from("tree.json")));
    }
}
