use std::fmt;

use rbprint_tree::utils::error::ReportableError;
use rbprint_tree::utils::metadata::Location;
use rbprint_tree::{AstPath, NodeKind, PathError, Slot, Target};

use crate::diagnostics::{Diagnostics, Unsupported};
use crate::doc::{Doc, concat, hardline, join, line, literalline, nil, text};

pub type PrintResult<'t> = Result<Doc<'t>, PrintError>;

/// A node whose body does not have the shape its rule relies on.
#[derive(Clone, Debug, PartialEq)]
pub struct PrintError {
    /// Route to the innermost node being printed when the lookup failed.
    pub route: String,
    pub reason: PathError,
}

impl From<PathError> for PrintError {
    fn from(reason: PathError) -> Self {
        Self {
            route: String::new(),
            reason,
        }
    }
}

impl fmt::Display for PrintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "malformed syntax tree at {}: {}", self.route, self.reason)
    }
}

impl std::error::Error for PrintError {}

impl ReportableError for PrintError {
    fn get_labels(&self) -> Vec<(Location, String)> {
        vec![]
    }
}

/// Turns a syntax tree into a [`Doc`], one rule per node kind.
pub struct Printer<'d> {
    diagnostics: &'d dyn Diagnostics,
}

impl<'d> Printer<'d> {
    pub fn new(diagnostics: &'d dyn Diagnostics) -> Self {
        Self { diagnostics }
    }

    /// Print the node under the cursor.
    pub fn print<'t>(&self, path: &mut AstPath<'t>) -> PrintResult<'t> {
        let node = path.node();
        log::trace!("printing `{}` at depth {}", node.kind, path.depth());
        let res = match &node.kind {
            NodeKind::Const
            | NodeKind::Ident
            | NodeKind::Int
            | NodeKind::Float
            | NodeKind::Ivar
            | NodeKind::Gvar
            | NodeKind::Cvar
            | NodeKind::Keyword
            | NodeKind::Label
            | NodeKind::Period
            | NodeKind::Op
            | NodeKind::TStringContent => literals::pretty(path),
            NodeKind::Alias => expr::alias(path, self),
            NodeKind::ArgsAddBlock => expr::args_add_block(path, self),
            NodeKind::Assign => expr::assign(path, self),
            NodeKind::Binary => expr::binary(path, self),
            NodeKind::Call => expr::call(path, self),
            NodeKind::Command => expr::command(path, self),
            NodeKind::Paren => expr::paren(path, self),
            NodeKind::VarField | NodeKind::VCall => self.concat_body(path),
            NodeKind::VarRef | NodeKind::ConstRef => self.child(path, &[0]),
            NodeKind::StringLiteral | NodeKind::SymbolLiteral => self.concat_body(path),
            NodeKind::StringContent => strings::content(path, self),
            NodeKind::StringEmbexpr => strings::embexpr(path, self),
            NodeKind::Symbol => strings::symbol(path, self),
            NodeKind::Class => definitions::class(path, self),
            NodeKind::Module => definitions::module(path, self),
            NodeKind::Def => definitions::def(path, self),
            NodeKind::Params => definitions::params(path, self),
            NodeKind::RestParam => definitions::prefixed("*", path, self),
            NodeKind::KwRestParam => definitions::prefixed("**", path, self),
            NodeKind::BlockArg => definitions::prefixed("&", path, self),
            NodeKind::Program => statements::program(path, self),
            NodeKind::BodyStmt => statements::bodystmt(path, self),
            NodeKind::VoidStmt => Ok(nil()),
            NodeKind::Other(_) => Ok(self.unsupported(path)),
        };
        res.map_err(|mut e| {
            if e.route.is_empty() {
                e.route = path.describe();
            }
            e
        })
    }

    fn child<'t>(&self, path: &mut AstPath<'t>, slots: &[usize]) -> PrintResult<'t> {
        path.call(slots, |p| self.print(p))
    }

    fn children<'t>(
        &self,
        path: &mut AstPath<'t>,
        slots: &[usize],
    ) -> Result<Vec<Doc<'t>>, PrintError> {
        path.map(slots, |p| self.print(p))
    }

    fn concat_body<'t>(&self, path: &mut AstPath<'t>) -> PrintResult<'t> {
        Ok(concat(self.children(path, &[])?))
    }

    fn unsupported<'t>(&self, path: &AstPath<'t>) -> Doc<'t> {
        let route = path.describe();
        self.diagnostics.unsupported(Unsupported {
            node: path.node(),
            route: &route,
        });
        nil()
    }
}

/// Number of elements of the list at `slot`, 0 if absent.
fn list_len(path: &AstPath<'_>, slot: usize) -> usize {
    match path.slot(&[slot]) {
        Ok(Target::List(items)) => items.len(),
        _ => 0,
    }
}

mod literals {
    use super::*;

    pub(super) fn pretty<'t>(path: &AstPath<'t>) -> PrintResult<'t> {
        let node = path.node();
        match node.literal() {
            Some(s) => Ok(text(s)),
            None => Err(PathError::Shape {
                kind: node.kind.to_string(),
                slots: vec![],
                expected: "a literal token",
            }
            .into()),
        }
    }
}

mod expr {
    use super::*;

    pub(super) fn alias<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let operands = printer.children(path, &[])?;
        Ok(text("alias ").append(join(text(" "), operands)))
    }

    pub(super) fn args_add_block<'t>(
        path: &mut AstPath<'t>,
        printer: &Printer<'_>,
    ) -> PrintResult<'t> {
        let mut doc = join(text(", "), printer.children(path, &[0])?);
        if path.has(&[1]) {
            doc = doc.append(printer.child(path, &[1])?);
        }
        Ok(doc.group())
    }

    pub(super) fn assign<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        Ok(join(text(" = "), printer.children(path, &[])?))
    }

    pub(super) fn binary<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let op = path.token(&[1])?;
        let lhs = printer.child(path, &[0])?;
        let rhs = printer.child(path, &[2])?;
        Ok(join(concat([text(" "), text(op), text(" ")]), [lhs, rhs]))
    }

    pub(super) fn call<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let connector = path.token(&[1])?;
        let receiver = printer.child(path, &[0])?;
        let method = printer.child(path, &[2])?;
        Ok(join(text(connector), [receiver, method]))
    }

    pub(super) fn command<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        Ok(join(text(" "), printer.children(path, &[])?))
    }

    /// Every slot in order, lists flattened, between parentheses.
    pub(super) fn paren<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let mut parts = vec![text("(")];
        for (index, slot) in path.node().slots().iter().enumerate() {
            match slot {
                Slot::Node(_) => parts.push(printer.child(path, &[index])?),
                Slot::List(_) => parts.extend(printer.children(path, &[index])?),
                Slot::Token(token) => parts.push(text(token.as_str())),
                Slot::Empty => {}
            }
        }
        parts.push(text(")"));
        Ok(concat(parts))
    }
}

mod strings {
    use super::*;

    /// Double quotes only when the string interpolates.
    pub(super) fn content<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let interpolated = path.node().slots().iter().any(|slot| {
            slot.as_node()
                .is_some_and(|n| n.kind == NodeKind::StringEmbexpr)
        });
        let quote = if interpolated { "\"" } else { "'" };
        let parts = printer.children(path, &[])?;
        Ok(text(quote).append(concat(parts)).append(text(quote)))
    }

    pub(super) fn embexpr<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let stmts = printer.children(path, &[0])?;
        Ok(text("#{").append(concat(stmts)).append(text("}")))
    }

    pub(super) fn symbol<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        Ok(text(":").append(concat(printer.children(path, &[])?)))
    }
}

mod definitions {
    use super::*;

    /// Puts a class or module body on the line after the header. A leading
    /// `def` breaks the line itself and an empty body prints nothing.
    fn own_line<'t>(path: &AstPath<'t>, slot: usize, body: Doc<'t>) -> Doc<'t> {
        let first = match path.slot(&[slot]) {
            Ok(Target::Node(stmts)) => match stmts.slots().first() {
                Some(Slot::List(items)) => items.iter().find_map(Slot::as_node),
                _ => None,
            },
            _ => None,
        };
        match first {
            Some(node) if !matches!(node.kind, NodeKind::Def | NodeKind::VoidStmt) => {
                hardline().append(body)
            }
            _ => body,
        }
    }

    pub(super) fn class<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let mut header = text("class ").append(printer.child(path, &[0])?);
        if path.has(&[1]) {
            header = header
                .append(text(" < "))
                .append(printer.child(path, &[1])?);
        }
        let body = printer.child(path, &[2])?;
        let body = own_line(path, 2, body);
        Ok(concat([
            header.group(),
            body.indent(),
            hardline().append(text("end")).group(),
            literalline(),
        ]))
    }

    pub(super) fn module<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let name = printer.child(path, &[0])?;
        let body = printer.child(path, &[1])?;
        let body = own_line(path, 1, body);
        Ok(concat([
            hardline().append(text("module ")).append(name),
            body.indent(),
            hardline().append(text("end")),
            literalline(),
        ]))
    }

    pub(super) fn def<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let name = printer.child(path, &[0])?;
        let params = printer.child(path, &[1])?;
        let body = printer.child(path, &[2])?;
        Ok(concat([
            hardline()
                .append(text("def "))
                .append(name)
                .append(params)
                .group(),
            hardline().append(body).indent(),
            hardline().append(text("end")).group(),
        ]))
    }

    /// Ripper's params slots: required, optional `[name, default]` pairs,
    /// rest, post-required, keyword `[label, default]` pairs, keyword rest,
    /// block.
    pub(super) fn params<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let mut parts = Vec::new();
        if path.has(&[0]) {
            parts.extend(printer.children(path, &[0])?);
        }
        for index in 0..list_len(path, 1) {
            let name = printer.child(path, &[1, index, 0])?;
            let default = printer.child(path, &[1, index, 1])?;
            parts.push(concat([name, text(" = "), default]));
        }
        if path.has(&[2]) {
            parts.push(printer.child(path, &[2])?);
        }
        if path.has(&[3]) {
            parts.extend(printer.children(path, &[3])?);
        }
        for index in 0..list_len(path, 4) {
            let label = printer.child(path, &[4, index, 0])?;
            if path.has(&[4, index, 1]) {
                let default = printer.child(path, &[4, index, 1])?;
                parts.push(concat([label, text(" "), default]));
            } else {
                parts.push(label);
            }
        }
        for slot in [5, 6] {
            if path.has(&[slot]) {
                parts.push(printer.child(path, &[slot])?);
            }
        }
        Ok(join(text(", "), parts))
    }

    /// `*rest`, `**opts` and `&block`; the name is optional.
    pub(super) fn prefixed<'t>(
        sigil: &'static str,
        path: &mut AstPath<'t>,
        printer: &Printer<'_>,
    ) -> PrintResult<'t> {
        let name = if path.has(&[0]) {
            printer.child(path, &[0])?
        } else {
            nil()
        };
        Ok(text(sigil).append(name))
    }
}

mod statements {
    use super::*;

    pub(super) fn program<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        let stmts = printer.children(path, &[0])?;
        Ok(join(hardline(), stmts).mark_as_root())
    }

    pub(super) fn bodystmt<'t>(path: &mut AstPath<'t>, printer: &Printer<'_>) -> PrintResult<'t> {
        Ok(join(line(), printer.children(path, &[0])?))
    }
}
