//! Builtin functions callable from shader code.

/// How an intrinsic's result type follows from its arguments.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(super) enum Intrinsic {
    /// `abs(x)`, `sin(x)`: same shape as the argument.
    Componentwise,
    /// `length(v)`: scalar of the argument's element kind.
    Length,
    /// `dot(a, b)`: scalar of the combined element kind.
    Dot,
    /// `min(a, b)`: combined type of both arguments.
    Pairwise,
    /// `lerp(a, b, t)`: combined type of all three arguments.
    Interpolate,
    /// `mul(a, b)`: matrix algebra.
    Multiply,
    Cross,
    /// `tex2D(s, uv)`: a `float4` sample.
    Sample,
}

/// Look up an intrinsic and its arity.
pub(super) fn lookup(name: &str) -> Option<(Intrinsic, usize)> {
    let entry = match name {
        "abs" | "ceil" | "cos" | "ddx" | "ddy" | "exp" | "exp2" | "floor" | "frac" | "log"
        | "log2" | "normalize" | "round" | "rsqrt" | "saturate" | "sin" | "sqrt" | "tan" => {
            (Intrinsic::Componentwise, 1)
        }
        "length" => (Intrinsic::Length, 1),
        "dot" | "distance" => (Intrinsic::Dot, 2),
        "atan2" | "fmod" | "max" | "min" | "pow" | "reflect" | "step" => (Intrinsic::Pairwise, 2),
        "clamp" | "lerp" | "smoothstep" => (Intrinsic::Interpolate, 3),
        "mul" => (Intrinsic::Multiply, 2),
        "cross" => (Intrinsic::Cross, 2),
        "tex2D" | "sample" => (Intrinsic::Sample, 2),
        _ => return None,
    };
    Some(entry)
}
