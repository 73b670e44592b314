//! Layout documents.
//!
//! [`Doc`] is the vocabulary the node printer speaks: text, concatenation,
//! breakable and forced line breaks, groups and indentation changes. It is a
//! plain immutable tree with structural equality; [`crate::render`] lowers it
//! onto the `pretty` crate which decides where breakable lines actually break.

use std::borrow::Cow;

use itertools::Itertools;

#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum Doc<'a> {
    #[default]
    Nil,
    Text(Cow<'a, str>),
    Concat(Vec<Doc<'a>>),
    /// A space when the enclosing group fits on the line, a newline otherwise.
    Line,
    HardLine,
    /// Newline that starts at the column of the nearest enclosing root
    /// instead of the current indentation.
    LiteralLine,
    Group(Box<Doc<'a>>),
    Indent(Box<Doc<'a>>),
    Dedent(Box<Doc<'a>>),
    Align(usize, Box<Doc<'a>>),
    /// Marks the indentation in effect as the one `LiteralLine` returns to.
    Root(Box<Doc<'a>>),
}

pub fn nil<'a>() -> Doc<'a> {
    Doc::Nil
}

pub fn text<'a>(s: impl Into<Cow<'a, str>>) -> Doc<'a> {
    Doc::Text(s.into())
}

pub fn concat<'a>(docs: impl IntoIterator<Item = Doc<'a>>) -> Doc<'a> {
    Doc::Concat(docs.into_iter().collect())
}

pub fn line<'a>() -> Doc<'a> {
    Doc::Line
}

pub fn hardline<'a>() -> Doc<'a> {
    Doc::HardLine
}

pub fn literalline<'a>() -> Doc<'a> {
    Doc::LiteralLine
}

/// Interleave `separator` between `docs`.
pub fn join<'a>(separator: Doc<'a>, docs: impl IntoIterator<Item = Doc<'a>>) -> Doc<'a> {
    concat(Itertools::intersperse(docs.into_iter(), separator))
}

impl<'a> Doc<'a> {
    pub fn is_nil(&self) -> bool {
        matches!(self, Doc::Nil)
    }

    pub fn append(self, other: impl Into<Doc<'a>>) -> Self {
        match self {
            Doc::Nil => other.into(),
            Doc::Concat(mut parts) => {
                parts.push(other.into());
                Doc::Concat(parts)
            }
            doc => Doc::Concat(vec![doc, other.into()]),
        }
    }

    pub fn group(self) -> Self {
        Doc::Group(Box::new(self))
    }

    pub fn indent(self) -> Self {
        Doc::Indent(Box::new(self))
    }

    pub fn dedent(self) -> Self {
        Doc::Dedent(Box::new(self))
    }

    pub fn align(self, columns: usize) -> Self {
        Doc::Align(columns, Box::new(self))
    }

    pub fn mark_as_root(self) -> Self {
        Doc::Root(Box::new(self))
    }
}

impl<'a> From<&'a str> for Doc<'a> {
    fn from(s: &'a str) -> Self {
        text(s)
    }
}

impl From<String> for Doc<'_> {
    fn from(s: String) -> Self {
        text(s)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn join_interleaves() {
        let doc = join(text(", "), [text("a"), text("b"), text("c")]);
        assert_eq!(
            doc,
            concat([text("a"), text(", "), text("b"), text(", "), text("c")])
        );
        assert_eq!(join(text(", "), []), concat([]));
        assert_eq!(join(line(), [text("x")]), concat([text("x")]));
    }

    #[test]
    fn append_flattens_into_concat() {
        let doc = text("def ").append("foo").append(text("(a)"));
        assert_eq!(doc, concat([text("def "), text("foo"), text("(a)")]));
        assert_eq!(nil().append("x"), text("x"));
    }

    #[test]
    fn borrowed_and_owned_text_compare_equal() {
        let owned = String::from("foo");
        assert_eq!(text(owned.as_str()), text(String::from("foo")));
    }
}
