use std::path::PathBuf;

use rbprint_tree::utils::error::ReportableError;
use rbprint_tree::{AstPath, Node, load};

use crate::FormatConfig;
use crate::diagnostics::{Diagnostics, LogDiagnostics};
use crate::print::Printer;
use crate::render::render;

type Errors = Vec<Box<dyn ReportableError>>;

/// Format an already loaded tree. Leading blank lines are dropped and the
/// text ends with exactly one newline, unless nothing was printed at all.
pub fn print_tree(
    tree: &Node,
    config: &FormatConfig,
    diagnostics: &dyn Diagnostics,
) -> Result<String, Errors> {
    let doc = Printer::new(diagnostics)
        .print(&mut AstPath::new(tree))
        .map_err(|e| vec![Box::new(e) as Box<dyn ReportableError>])?;
    log::debug!("document built, rendering at width {}", config.width);
    let rendered = render(&doc, config).map_err(|e| vec![Box::new(e) as Box<dyn ReportableError>])?;
    let body = rendered.trim_start_matches('\n').trim_end_matches('\n');
    if body.is_empty() {
        Ok(String::new())
    } else {
        Ok(format!("{body}\n"))
    }
}

/// JSON syntax tree in, Ruby source out. Unsupported nodes go to the log.
pub fn pretty_print(
    src: &str,
    file_path: &Option<PathBuf>,
    config: &FormatConfig,
) -> Result<String, Errors> {
    pretty_print_with(src, file_path, config, &LogDiagnostics)
}

pub fn pretty_print_with(
    src: &str,
    file_path: &Option<PathBuf>,
    config: &FormatConfig,
    diagnostics: &dyn Diagnostics,
) -> Result<String, Errors> {
    let tree = load::parse_tree(src, file_path.clone().unwrap_or_default())?;
    log::debug!("loaded `{}` tree", tree.kind);
    print_tree(&tree, config, diagnostics)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::diagnostics::CollectDiagnostics;
    use rbprint_tree::utils::error::dump_to_string;
    use pretty_assertions::assert_eq;

    #[test]
    fn ends_with_single_newline() {
        let src = r#"{"type":"program","body":[[
            {"type":"module","body":[
                {"type":"const_ref","body":[{"type":"@const","body":"Foo"}]},
                {"type":"bodystmt","body":[[{"type":"void_stmt","body":[]}],null,null,null]}
            ]}
        ]]}"#;
        let res = pretty_print(src, &None, &FormatConfig::default()).unwrap();
        assert_eq!(res, "module Foo\nend\n");
    }

    #[test]
    fn empty_program_prints_nothing() {
        let src = r#"{"type":"program","body":[[{"type":"void_stmt","body":[]}]]}"#;
        let res = pretty_print(src, &None, &FormatConfig::default()).unwrap();
        assert_eq!(res, "");
    }

    #[test]
    fn unsupported_nodes_reach_the_sink() {
        let src = r#"{"type":"program","body":[[
            {"type":"vcall","body":[{"type":"@ident","body":"foo"}]},
            {"type":"heredoc","body":"EOS"}
        ]]}"#;
        let sink = CollectDiagnostics::new();
        let res = pretty_print_with(src, &None, &FormatConfig::default(), &sink).unwrap();
        assert_eq!(res, "foo\n");
        assert_eq!(sink.take()[0].route, "program[0][1] > heredoc");
    }

    #[test]
    fn bad_json_is_reported() {
        let errs = pretty_print("{\"type\": ", &Some("broken.json".into()), &FormatConfig::default())
            .unwrap_err();
        assert_eq!(errs.len(), 1);
        assert!(dump_to_string(&errs).starts_with("invalid syntax tree: EOF"));
    }

    #[test]
    fn malformed_node_is_reported() {
        let src = r#"{"type":"binary","body":[{"type":"@int","body":"1"}]}"#;
        let errs = pretty_print(src, &None, &FormatConfig::default()).unwrap_err();
        assert_eq!(
            errs[0].get_message(),
            "malformed syntax tree at binary: `binary` has no slot at [1]"
        );
    }
}
