//! Source location spans.
//!
//! A span names the file it came from plus 1-based start and end
//! line/column positions. Diagnostics render spans as `path:line:col` by
//! looking the file up in a [`SourceMap`].

use std::fmt;

/// Identity of a source file within one compile request.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Default)]
#[repr(transparent)]
pub struct FileId(u32);

impl FileId {
    /// File id used for generated code and tests without a real file.
    pub const SYNTHETIC: FileId = FileId(u32::MAX);

    #[inline]
    pub const fn new(raw: u32) -> Self {
        FileId(raw)
    }

    #[inline]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for FileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if *self == Self::SYNTHETIC {
            write!(f, "FileId::SYNTHETIC")
        } else {
            write!(f, "FileId({})", self.0)
        }
    }
}

/// A 1-based line/column position.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd, Debug, Default)]
pub struct LineCol {
    pub line: u32,
    pub column: u32,
}

impl LineCol {
    #[inline]
    pub const fn new(line: u32, column: u32) -> Self {
        LineCol { line, column }
    }
}

impl fmt::Display for LineCol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Source location span.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct Span {
    pub file: FileId,
    pub start: LineCol,
    pub end: LineCol,
}

impl Span {
    /// Dummy span for generated code.
    pub const DUMMY: Span = Span {
        file: FileId::SYNTHETIC,
        start: LineCol::new(0, 0),
        end: LineCol::new(0, 0),
    };

    #[inline]
    pub const fn new(file: FileId, start: LineCol, end: LineCol) -> Self {
        Span { file, start, end }
    }

    /// A zero-width span at a single position.
    #[inline]
    pub const fn point(file: FileId, line: u32, column: u32) -> Self {
        let pos = LineCol::new(line, column);
        Span {
            file,
            start: pos,
            end: pos,
        }
    }

    #[inline]
    pub fn is_dummy(&self) -> bool {
        *self == Self::DUMMY
    }

    /// Merge two spans of the same file into one covering both.
    ///
    /// Spans from different files cannot be merged; `self` is returned.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        if self.file != other.file {
            return self;
        }
        Span {
            file: self.file,
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }

    /// Check if another span lies fully within this one.
    #[inline]
    pub fn contains_span(&self, other: Span) -> bool {
        self.file == other.file && self.start <= other.start && other.end <= self.end
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}..{}", self.file, self.start, self.end)
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.start)
    }
}

/// Trait for types with a source location.
pub trait Spanned {
    fn span(&self) -> Span;
}

impl Spanned for Span {
    fn span(&self) -> Span {
        *self
    }
}

/// Maps file ids to display paths.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SourceMap {
    paths: Vec<String>,
}

impl SourceMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a file and return its id.
    pub fn add_file(&mut self, path: impl Into<String>) -> FileId {
        let index = u32::try_from(self.paths.len()).unwrap_or(u32::MAX - 1);
        self.paths.push(path.into());
        FileId::new(index)
    }

    /// Path registered for `file`, if any.
    pub fn path(&self, file: FileId) -> Option<&str> {
        self.paths.get(file.raw() as usize).map(String::as_str)
    }

    /// Render a span as `path:line:col`.
    ///
    /// Unknown and synthetic files render as `<unknown>`.
    pub fn location(&self, span: Span) -> String {
        let path = self.path(span.file).unwrap_or("<unknown>");
        format!("{path}:{}", span.start)
    }
}

#[cfg(test)]
mod tests;
