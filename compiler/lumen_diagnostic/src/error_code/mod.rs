//! Error codes for all analysis diagnostics.
//!
//! Each code has a stable identifier (`E2001`) used for `explain` lookups and
//! a symbolic name (`ErrorBinaryTypeDeduction`) matching the message table the
//! engine's tooling already knows.

use std::fmt;

/// Error codes for all analysis diagnostics.
///
/// Format: `X####` where the letter is the default severity:
/// - E2xxx: semantic/type errors
/// - W2xxx: semantic warnings
/// - I0xxx: informational notes
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ErrorCode {
    // Semantic Errors (E2xxx)
    /// No implicit conversion combines the two operand types
    E2001,
    /// Two scalar kinds have no common promotion
    E2002,
    /// Identifier is not declared in any enclosing scope
    E2003,
    /// Call target is neither a user function nor a type constructor
    E2004,
    /// Type name does not name a builtin, struct or typedef
    E2005,
    /// Struct has no such field, or the swizzle is invalid
    E2006,
    /// Indexing a value that is neither a vector nor a matrix
    E2007,
    /// Value cannot be converted to the declared type
    E2008,
    /// Operator applied to an operand type it does not accept
    E2009,
    /// Wrong number of call arguments
    E2010,
    /// Name defined twice at the same scope
    E2011,

    // Warnings
    /// Implicit narrowing scalar conversion
    W2001,

    // Informational
    /// Free-form informational note
    I0001,
}

impl ErrorCode {
    /// All error code variants, for iteration and lookup.
    pub const ALL: &[ErrorCode] = &[
        ErrorCode::E2001,
        ErrorCode::E2002,
        ErrorCode::E2003,
        ErrorCode::E2004,
        ErrorCode::E2005,
        ErrorCode::E2006,
        ErrorCode::E2007,
        ErrorCode::E2008,
        ErrorCode::E2009,
        ErrorCode::E2010,
        ErrorCode::E2011,
        ErrorCode::W2001,
        ErrorCode::I0001,
    ];

    /// Get the string representation of this code.
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "E2001",
            ErrorCode::E2002 => "E2002",
            ErrorCode::E2003 => "E2003",
            ErrorCode::E2004 => "E2004",
            ErrorCode::E2005 => "E2005",
            ErrorCode::E2006 => "E2006",
            ErrorCode::E2007 => "E2007",
            ErrorCode::E2008 => "E2008",
            ErrorCode::E2009 => "E2009",
            ErrorCode::E2010 => "E2010",
            ErrorCode::E2011 => "E2011",
            ErrorCode::W2001 => "W2001",
            ErrorCode::I0001 => "I0001",
        }
    }

    /// Symbolic message name.
    pub fn name(&self) -> &'static str {
        match self {
            ErrorCode::E2001 => "ErrorBinaryTypeDeduction",
            ErrorCode::E2002 => "ErrorScalarTypeConversion",
            ErrorCode::E2003 => "ErrorUnknownIdentifier",
            ErrorCode::E2004 => "ErrorUnknownFunction",
            ErrorCode::E2005 => "ErrorUnknownType",
            ErrorCode::E2006 => "ErrorUnknownMember",
            ErrorCode::E2007 => "ErrorInvalidIndex",
            ErrorCode::E2008 => "ErrorTypeMismatch",
            ErrorCode::E2009 => "ErrorInvalidOperand",
            ErrorCode::E2010 => "ErrorArgumentCount",
            ErrorCode::E2011 => "ErrorDuplicateDefinition",
            ErrorCode::W2001 => "WarningImplicitTruncation",
            ErrorCode::I0001 => "InfoNote",
        }
    }

    /// Check if this is a warning code (Wxxxx range).
    pub fn is_warning(&self) -> bool {
        matches!(self, ErrorCode::W2001)
    }

    /// Check if this is an informational code (Ixxxx range).
    pub fn is_info(&self) -> bool {
        matches!(self, ErrorCode::I0001)
    }

    /// Check if this is a semantic error (E2xxx range).
    pub fn is_semantic_error(&self) -> bool {
        !self.is_warning() && !self.is_info()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parse either a code (`"E2001"`, case-insensitive) or its symbolic name
/// (`"ErrorBinaryTypeDeduction"`).
impl std::str::FromStr for ErrorCode {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .iter()
            .find(|code| code.as_str().eq_ignore_ascii_case(s) || code.name() == s)
            .copied()
            .ok_or(())
    }
}

#[cfg(test)]
mod tests;
