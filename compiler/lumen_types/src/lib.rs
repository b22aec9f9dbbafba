//! Shader type descriptors and implicit conversion rules.
//!
//! - [`ScalarKind`]: the scalar kinds, in promotion order
//! - [`Type`]: scalars, vectors, matrices, samplers, structs and aliases
//! - [`convert`]: pure rule tables deciding the combined type of two
//!   operands, independent of spans and diagnostics
//!
//! Every rule entry point resolves aliases first, so rule bodies only ever
//! see concrete variants.

pub mod convert;
mod scalar;
mod ty;

pub use convert::{
    assignment_conversion, binary_implicit_conversion, binary_implicit_scalar_conversion,
    divide_implicit_conversion, multiply_implicit_conversion, Conversion,
};
pub use scalar::ScalarKind;
pub use ty::{Type, MAX_DIMENSION};
