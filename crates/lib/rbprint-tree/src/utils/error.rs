use std::io::{self, Write};
use std::path::PathBuf;

use ariadne::{ColorGenerator, Config, IndexType, Label, Report, ReportKind, Source};

use super::metadata::Location;

/// A dynamic error type that can hold specific error messages and the location where the error happened.
pub trait ReportableError: std::error::Error {
    /// message is used for reporting verbose message for `ariadne`.
    fn get_message(&self) -> String {
        self.to_string()
    }
    /// Label is used for indicating error with the specific position for `ariadne`.
    /// Errors that are not tied to a position in the input return no labels.
    fn get_labels(&self) -> Vec<(Location, String)>;
}

struct FileCache<'a> {
    path: &'a PathBuf,
    source: Source<&'a str>,
}

impl<'a> ariadne::Cache<PathBuf> for FileCache<'a> {
    type Storage = &'a str;

    fn fetch(&mut self, id: &PathBuf) -> Result<&Source<Self::Storage>, impl std::fmt::Debug> {
        if id == self.path {
            Ok(&self.source)
        } else {
            Err(format!("File not found: {}", id.display()))
        }
    }

    fn display<'b>(&self, id: &'b PathBuf) -> Option<impl std::fmt::Display + 'b> {
        Some(id.display())
    }
}

/// Print `errs` to stderr, labelled against `src`.
pub fn report(src: &str, path: PathBuf, errs: &[Box<dyn ReportableError + '_>]) {
    let config = Config::default().with_index_type(IndexType::Byte);
    if let Err(io_err) = write_reports(src, &path, errs, config, &mut io::stderr()) {
        log::error!("failed to print diagnostics: {io_err}");
    }
}

/// Label spans are byte offsets into `src`; `config` must index by byte.
pub fn write_reports(
    src: &str,
    path: &PathBuf,
    errs: &[Box<dyn ReportableError + '_>],
    config: Config,
    out: &mut impl Write,
) -> io::Result<()> {
    let mut colors = ColorGenerator::new();
    for e in errs {
        let rawlabels = e.get_labels();
        let Some((first, _)) = rawlabels.first() else {
            writeln!(out, "Error: {}", e.get_message())?;
            continue;
        };
        let labels = rawlabels.iter().map(|(loc, message)| {
            Label::new(loc.clone())
                .with_message(message)
                .with_color(colors.next())
        });
        let report = Report::build(ReportKind::Error, first.clone())
            .with_config(config)
            .with_message(e.get_message())
            .with_labels(labels)
            .finish();
        let mut cache = FileCache {
            path,
            source: Source::from(src),
        };
        report.write(&mut cache, &mut *out)?;
    }
    Ok(())
}

pub fn dump_to_string(errs: &[Box<dyn ReportableError + '_>]) -> String {
    errs.iter()
        .map(|e| e.get_message())
        .collect::<Vec<_>>()
        .join("\n")
}
