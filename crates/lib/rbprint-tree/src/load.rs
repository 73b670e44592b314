//! Reading a syntax tree from its JSON dump.

use std::fmt;
use std::path::PathBuf;

use crate::node::Node;
use crate::utils::error::ReportableError;
use crate::utils::metadata::Location;

#[derive(Debug)]
pub struct TreeError {
    pub location: Location,
    pub source: serde_json::Error,
}

impl fmt::Display for TreeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid syntax tree: {}", self.source)
    }
}

impl std::error::Error for TreeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl ReportableError for TreeError {
    fn get_labels(&self) -> Vec<(Location, String)> {
        let label = match self.source.classify() {
            serde_json::error::Category::Syntax => "malformed JSON",
            serde_json::error::Category::Eof => "unexpected end of input",
            serde_json::error::Category::Data => "not a syntax tree node",
            serde_json::error::Category::Io => "could not read input",
        };
        vec![(self.location.clone(), label.to_string())]
    }
}

/// Parse the JSON dump of a tree. `path` is only used to label errors.
pub fn parse_tree(src: &str, path: PathBuf) -> Result<Node, Vec<Box<dyn ReportableError>>> {
    serde_json::from_str::<Node>(src).map_err(|source| {
        let location = Location::from_line_column(src, source.line(), source.column(), path);
        log::debug!("rejected syntax tree at {:?}: {source}", location.span);
        let err: Box<dyn ReportableError> = Box::new(TreeError { location, source });
        vec![err]
    })
}
