//! Embedded error documentation for `explain` support.
//!
//! Each error code has a markdown file in this directory explaining the
//! diagnostic with an example and a fix. The files are embedded at compile
//! time and looked up with [`ErrorDocs::get`].
//!
//! # Adding New Documentation
//!
//! 1. Create `XNNNN.md` in this directory
//! 2. Add an entry to the `DOCS` array below

use crate::ErrorCode;

/// Registry of embedded error documentation.
pub struct ErrorDocs;

impl ErrorDocs {
    /// Markdown documentation for `code`, if any.
    pub fn get(code: ErrorCode) -> Option<&'static str> {
        DOCS.iter().find(|(c, _)| *c == code).map(|(_, doc)| *doc)
    }

    /// All documented error codes.
    pub fn all_codes() -> impl Iterator<Item = ErrorCode> {
        DOCS.iter().map(|(code, _)| *code)
    }

    pub fn has_docs(code: ErrorCode) -> bool {
        DOCS.iter().any(|(c, _)| *c == code)
    }
}

static DOCS: &[(ErrorCode, &str)] = &[
    (ErrorCode::E2001, include_str!("E2001.md")),
    (ErrorCode::E2002, include_str!("E2002.md")),
    (ErrorCode::E2003, include_str!("E2003.md")),
    (ErrorCode::E2004, include_str!("E2004.md")),
    (ErrorCode::E2005, include_str!("E2005.md")),
    (ErrorCode::E2006, include_str!("E2006.md")),
    (ErrorCode::E2007, include_str!("E2007.md")),
    (ErrorCode::E2008, include_str!("E2008.md")),
    (ErrorCode::E2009, include_str!("E2009.md")),
    (ErrorCode::E2010, include_str!("E2010.md")),
    (ErrorCode::E2011, include_str!("E2011.md")),
    (ErrorCode::W2001, include_str!("W2001.md")),
    (ErrorCode::I0001, include_str!("I0001.md")),
];

#[cfg(test)]
mod tests;
