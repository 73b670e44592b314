//! Lowering of [`Doc`] onto the `pretty` crate.
//!
//! `pretty` only knows relative nesting, so indentation is tracked while
//! lowering: `Indent`/`Dedent`/`Align` become `nest` with the matching offset.
//! A hardline takes its indentation from the command queued after it, so a
//! `LiteralLine` is a hardline followed by an empty document nested back to
//! the root column.

use std::fmt;

use pretty::{Arena, DocAllocator, DocBuilder, Pretty, Render, RenderAnnotated};
use rbprint_tree::utils::error::ReportableError;
use rbprint_tree::utils::metadata::Location;

use crate::FormatConfig;
use crate::doc::Doc;

#[derive(Clone, Copy, Debug)]
struct Indentation {
    current: usize,
    root: usize,
    step: usize,
}

impl Indentation {
    fn with_current(self, current: usize) -> Self {
        Self { current, ..self }
    }
}

fn lower<'a, D, A>(doc: &'a Doc<'_>, allocator: &'a D, ind: Indentation) -> DocBuilder<'a, D, A>
where
    D: DocAllocator<'a, A>,
    D::Doc: Clone + Pretty<'a, D, A>,
    A: Clone,
{
    match doc {
        Doc::Nil => allocator.nil(),
        Doc::Text(s) => allocator.text(&**s),
        Doc::Concat(parts) => allocator.concat(parts.iter().map(|p| lower(p, allocator, ind))),
        Doc::Line => allocator.line(),
        Doc::HardLine => allocator.hardline(),
        // `nil` would be folded away by `append`, `nesting` is kept as a command.
        Doc::LiteralLine => allocator
            .hardline()
            .append(allocator.nesting(move |_| allocator.nil().into_doc()))
            .nest(ind.root as isize - ind.current as isize),
        Doc::Group(inner) => lower(inner, allocator, ind).group(),
        Doc::Indent(inner) => lower(inner, allocator, ind.with_current(ind.current + ind.step))
            .nest(ind.step as isize),
        Doc::Dedent(inner) => {
            let current = ind.current.saturating_sub(ind.step);
            lower(inner, allocator, ind.with_current(current))
                .nest(current as isize - ind.current as isize)
        }
        Doc::Align(columns, inner) => {
            lower(inner, allocator, ind.with_current(ind.current + columns))
                .nest(*columns as isize)
        }
        Doc::Root(inner) => lower(
            inner,
            allocator,
            Indentation {
                root: ind.current,
                ..ind
            },
        ),
    }
}

/// The layout engine gave up on the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RenderError;

impl fmt::Display for RenderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "failed to render document")
    }
}

impl std::error::Error for RenderError {}

impl ReportableError for RenderError {
    fn get_labels(&self) -> Vec<(Location, String)> {
        vec![]
    }
}

/// Collects rendered text. `pretty` writes indentation right after every
/// newline; it is held back until something else lands on the line, so lines
/// left empty carry no trailing spaces. Text is written unchanged.
#[derive(Debug, Default)]
struct LineWriter {
    out: String,
    pending: usize,
}

impl Render for LineWriter {
    type Error = RenderError;

    // Only indentation reaches `write_str`, text goes through `write_str_all`.
    fn write_str(&mut self, s: &str) -> Result<usize, Self::Error> {
        if s.bytes().all(|b| b == b' ') {
            self.pending += s.len();
        } else {
            self.write_str_all(s)?;
        }
        Ok(s.len())
    }

    fn write_str_all(&mut self, s: &str) -> Result<(), Self::Error> {
        if !s.starts_with('\n') {
            self.out.extend(std::iter::repeat_n(' ', self.pending));
        }
        self.pending = 0;
        self.out.push_str(s);
        Ok(())
    }

    fn fail_doc(&self) -> Self::Error {
        RenderError
    }
}

impl<A> RenderAnnotated<'_, A> for LineWriter {
    fn push_annotation(&mut self, _: &A) -> Result<(), Self::Error> {
        Ok(())
    }

    fn pop_annotation(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Render `doc` at `config.width` columns.
pub fn render(doc: &Doc<'_>, config: &FormatConfig) -> Result<String, RenderError> {
    let allocator: Arena<'_, ()> = Arena::new();
    let ind = Indentation {
        current: 0,
        root: 0,
        step: config.indent_size,
    };
    let lowered = lower::<_, ()>(doc, &allocator, ind);
    let mut w = LineWriter::default();
    lowered.render_raw(config.width, &mut w)?;
    Ok(w.out)
}
