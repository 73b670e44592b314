use std::path::PathBuf;

pub type Span = std::ops::Range<usize>;

#[derive(Clone, Debug, PartialEq)]
pub struct Location {
    pub span: Span,
    pub path: PathBuf,
}
impl Location {
    /// Location of a 1-based line and byte column inside `src`, covering one
    /// character. A column of 0 points at the end of the previous line, which
    /// is what `serde_json` reports for errors at a line break or at the end
    /// of input.
    pub fn from_line_column(src: &str, line: usize, column: usize, path: PathBuf) -> Self {
        let line_start: usize = src
            .split_inclusive('\n')
            .take(line.saturating_sub(1))
            .map(str::len)
            .sum();
        let mut start = (line_start + column.saturating_sub(1)).min(src.len());
        while !src.is_char_boundary(start) {
            start -= 1;
        }
        let end = src[start..].chars().next().map_or(start, |c| start + c.len_utf8());
        Self {
            span: start..end,
            path,
        }
    }
}
impl Default for Location {
    fn default() -> Self {
        Self {
            span: 0..0,
            path: PathBuf::new(),
        }
    }
}

impl ariadne::Span for Location {
    type SourceId = PathBuf;

    fn source(&self) -> &Self::SourceId {
        &self.path
    }

    fn start(&self) -> usize {
        self.span.start
    }

    fn end(&self) -> usize {
        self.span.end
    }
}
