//! Where the printer sends nodes it has no rule for.

use std::cell::RefCell;
use std::fmt;

use rbprint_tree::Node;
use rbprint_tree::utils::error::ReportableError;
use rbprint_tree::utils::metadata::Location;

/// A node the printer skipped.
#[derive(Clone, Copy, Debug)]
pub struct Unsupported<'r> {
    pub node: &'r Node,
    /// Route from the root, see [`rbprint_tree::AstPath::describe`].
    pub route: &'r str,
}

pub trait Diagnostics {
    fn unsupported(&self, report: Unsupported<'_>);
}

/// Sends every report to the `log` facade.
#[derive(Clone, Copy, Debug, Default)]
pub struct LogDiagnostics;

impl Diagnostics for LogDiagnostics {
    fn unsupported(&self, report: Unsupported<'_>) {
        log::warn!(
            "unsupported node `{}` at {}: {}",
            report.node.kind,
            report.route,
            report.node.to_json()
        );
    }
}

/// Owned copy of an [`Unsupported`] report.
#[derive(Clone, Debug, PartialEq)]
pub struct UnsupportedNode {
    pub kind: String,
    pub route: String,
    /// The node serialized back to JSON.
    pub node: String,
}

impl fmt::Display for UnsupportedNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unsupported node `{}` at {}", self.kind, self.route)
    }
}

impl std::error::Error for UnsupportedNode {}

impl ReportableError for UnsupportedNode {
    fn get_labels(&self) -> Vec<(Location, String)> {
        vec![]
    }
}

/// Keeps every report; also forwards them to the log.
#[derive(Debug, Default)]
pub struct CollectDiagnostics {
    reports: RefCell<Vec<UnsupportedNode>>,
}

impl CollectDiagnostics {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn len(&self) -> usize {
        self.reports.borrow().len()
    }
    pub fn is_empty(&self) -> bool {
        self.reports.borrow().is_empty()
    }
    pub fn take(&self) -> Vec<UnsupportedNode> {
        self.reports.take()
    }
}

impl Diagnostics for CollectDiagnostics {
    fn unsupported(&self, report: Unsupported<'_>) {
        LogDiagnostics.unsupported(report);
        self.reports.borrow_mut().push(UnsupportedNode {
            kind: report.node.kind.to_string(),
            route: report.route.to_string(),
            node: report.node.to_json(),
        });
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn collects_in_order() {
        let sink = CollectDiagnostics::new();
        let a = Node::leaf("@heredoc_end", "EOS");
        let b = Node::new("while", vec![]);
        sink.unsupported(Unsupported {
            node: &a,
            route: "program[0][0]",
        });
        sink.unsupported(Unsupported {
            node: &b,
            route: "program[0][1]",
        });
        assert_eq!(sink.len(), 2);
        let reports = sink.take();
        assert!(sink.is_empty());
        assert_eq!(reports[0].kind, "@heredoc_end");
        assert_eq!(reports[0].node, r#"{"type":"@heredoc_end","body":"EOS"}"#);
        assert_eq!(
            reports[1].to_string(),
            "unsupported node `while` at program[0][1]"
        );
    }
}
