//! Scalar kinds.

use std::fmt;

/// Scalar element kinds.
///
/// Variants are declared in promotion order, so the derived `Ord` is the
/// promotion order: `Bool < Int < UInt < Half < Float < Double`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ScalarKind {
    Bool,
    Int,
    UInt,
    Half,
    Float,
    Double,
}

impl ScalarKind {
    /// All kinds in promotion order.
    pub const ALL: [ScalarKind; 6] = [
        ScalarKind::Bool,
        ScalarKind::Int,
        ScalarKind::UInt,
        ScalarKind::Half,
        ScalarKind::Float,
        ScalarKind::Double,
    ];

    /// Source-level type name.
    pub fn name(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::UInt => "uint",
            ScalarKind::Half => "half",
            ScalarKind::Float => "float",
            ScalarKind::Double => "double",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.name() == name)
    }

    /// Position in the promotion order.
    #[inline]
    pub fn rank(self) -> u8 {
        self as u8
    }

    /// The common kind two scalars promote to: the wider of the two.
    #[inline]
    #[must_use]
    pub fn promote(self, other: ScalarKind) -> ScalarKind {
        self.max(other)
    }

    /// Converting `self` into `target` loses range or precision.
    #[inline]
    pub fn narrows_to(self, target: ScalarKind) -> bool {
        self > target
    }

    pub fn is_floating(self) -> bool {
        matches!(
            self,
            ScalarKind::Half | ScalarKind::Float | ScalarKind::Double
        )
    }

    pub fn is_integral(self) -> bool {
        matches!(self, ScalarKind::Int | ScalarKind::UInt)
    }
}

impl fmt::Display for ScalarKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
