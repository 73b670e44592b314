use std::fmt;

use serde::{Deserialize, Serialize};

/// Discriminator of a syntax tree node.
///
/// Wire names follow the tree dumped by Ruby's Ripper: scanner events (leaf
/// tokens) carry a leading `@`, parser events are bare words. Any name that is
/// not part of this set is kept verbatim in [`NodeKind::Other`] so the printer
/// can report it instead of refusing the whole tree.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    // Scanner events
    Const,
    Ident,
    Int,
    Float,
    Ivar,
    Gvar,
    Cvar,
    Keyword,
    Label,
    Period,
    Op,
    TStringContent,
    // Parser events
    Alias,
    ArgsAddBlock,
    Assign,
    Binary,
    BlockArg,
    BodyStmt,
    Call,
    Class,
    Command,
    ConstRef,
    Def,
    KwRestParam,
    Module,
    Params,
    Paren,
    Program,
    RestParam,
    StringContent,
    StringEmbexpr,
    StringLiteral,
    Symbol,
    SymbolLiteral,
    VarField,
    VarRef,
    VCall,
    VoidStmt,
    Other(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Const => "@const",
            NodeKind::Ident => "@ident",
            NodeKind::Int => "@int",
            NodeKind::Float => "@float",
            NodeKind::Ivar => "@ivar",
            NodeKind::Gvar => "@gvar",
            NodeKind::Cvar => "@cvar",
            NodeKind::Keyword => "@kw",
            NodeKind::Label => "@label",
            NodeKind::Period => "@period",
            NodeKind::Op => "@op",
            NodeKind::TStringContent => "@tstring_content",
            NodeKind::Alias => "alias",
            NodeKind::ArgsAddBlock => "args_add_block",
            NodeKind::Assign => "assign",
            NodeKind::Binary => "binary",
            NodeKind::BlockArg => "blockarg",
            NodeKind::BodyStmt => "bodystmt",
            NodeKind::Call => "call",
            NodeKind::Class => "class",
            NodeKind::Command => "command",
            NodeKind::ConstRef => "const_ref",
            NodeKind::Def => "def",
            NodeKind::KwRestParam => "kwrest_param",
            NodeKind::Module => "module",
            NodeKind::Params => "params",
            NodeKind::Paren => "paren",
            NodeKind::Program => "program",
            NodeKind::RestParam => "rest_param",
            NodeKind::StringContent => "string_content",
            NodeKind::StringEmbexpr => "string_embexpr",
            NodeKind::StringLiteral => "string_literal",
            NodeKind::Symbol => "symbol",
            NodeKind::SymbolLiteral => "symbol_literal",
            NodeKind::VarField => "var_field",
            NodeKind::VarRef => "var_ref",
            NodeKind::VCall => "vcall",
            NodeKind::VoidStmt => "void_stmt",
            NodeKind::Other(name) => name,
        }
    }
}

/// Scanner event names without the `@` sigil.
fn scanner_event(bare: &str) -> Option<NodeKind> {
    Some(match bare {
        "const" => NodeKind::Const,
        "ident" => NodeKind::Ident,
        "int" => NodeKind::Int,
        "float" => NodeKind::Float,
        "ivar" => NodeKind::Ivar,
        "gvar" => NodeKind::Gvar,
        "cvar" => NodeKind::Cvar,
        "kw" | "keyword" => NodeKind::Keyword,
        "label" => NodeKind::Label,
        "period" => NodeKind::Period,
        "op" => NodeKind::Op,
        "tstring_content" => NodeKind::TStringContent,
        _ => return None,
    })
}

fn parser_event(name: &str) -> Option<NodeKind> {
    Some(match name {
        "alias" => NodeKind::Alias,
        "args_add_block" => NodeKind::ArgsAddBlock,
        "assign" => NodeKind::Assign,
        "binary" => NodeKind::Binary,
        "blockarg" => NodeKind::BlockArg,
        "bodystmt" => NodeKind::BodyStmt,
        "call" => NodeKind::Call,
        "class" => NodeKind::Class,
        "command" => NodeKind::Command,
        "const_ref" => NodeKind::ConstRef,
        "def" => NodeKind::Def,
        "kwrest_param" => NodeKind::KwRestParam,
        "module" => NodeKind::Module,
        "params" => NodeKind::Params,
        "paren" => NodeKind::Paren,
        "program" => NodeKind::Program,
        "rest_param" => NodeKind::RestParam,
        "string_content" => NodeKind::StringContent,
        "string_embexpr" => NodeKind::StringEmbexpr,
        "string_literal" => NodeKind::StringLiteral,
        "symbol" => NodeKind::Symbol,
        "symbol_literal" => NodeKind::SymbolLiteral,
        "var_field" => NodeKind::VarField,
        "var_ref" => NodeKind::VarRef,
        "vcall" => NodeKind::VCall,
        "void_stmt" => NodeKind::VoidStmt,
        _ => return None,
    })
}

impl From<&str> for NodeKind {
    fn from(name: &str) -> Self {
        // Scanner events are also accepted without the sigil, parser events
        // never carry one.
        let kind = match name.strip_prefix('@') {
            Some(bare) => scanner_event(bare),
            None => scanner_event(name).or_else(|| parser_event(name)),
        };
        kind.unwrap_or_else(|| NodeKind::Other(name.to_string()))
    }
}

impl From<String> for NodeKind {
    fn from(name: String) -> Self {
        match NodeKind::from(name.as_str()) {
            NodeKind::Other(_) => NodeKind::Other(name),
            kind => kind,
        }
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Other(name) => name,
            kind => kind.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn wire_names_roundtrip() {
        for kind in [
            NodeKind::Const,
            NodeKind::Keyword,
            NodeKind::TStringContent,
            NodeKind::ArgsAddBlock,
            NodeKind::BodyStmt,
            NodeKind::VCall,
        ] {
            assert_eq!(NodeKind::from(kind.as_str()), kind);
        }
    }

    #[test]
    fn sigil_is_optional_for_leaves() {
        assert_eq!(NodeKind::from("ident"), NodeKind::Ident);
        assert_eq!(NodeKind::from("keyword"), NodeKind::Keyword);
        assert_eq!(NodeKind::from("@int"), NodeKind::Int);
    }

    #[test]
    fn parser_events_reject_the_sigil() {
        assert_eq!(NodeKind::from("class"), NodeKind::Class);
        for name in ["@class", "@program", "@void_stmt"] {
            assert_eq!(NodeKind::from(name), NodeKind::Other(name.to_string()));
            assert_eq!(NodeKind::from(name.to_string()).to_string(), name);
        }
    }

    #[test]
    fn unknown_names_are_preserved() {
        let kind = NodeKind::from("@heredoc_end".to_string());
        assert_eq!(kind, NodeKind::Other("@heredoc_end".to_string()));
        assert_eq!(kind.to_string(), "@heredoc_end");
    }
}
