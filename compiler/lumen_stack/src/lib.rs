//! Stack growth guard for deep recursion.
//!
//! Both halves of the front end recurse on user-controlled structure: the
//! semantic analyzer walks arbitrarily nested expressions, and mixin
//! expansion follows generator call chains. Wrap each recursive step in
//! [`ensure_sufficient_stack`] so a deeply nested shader or a long
//! composition chain grows the stack instead of overflowing it.
//!
//! ```text
//! fn expand(&mut self, name: &str) -> Result<(), MixinError> {
//!     ensure_sufficient_stack(|| self.expand_inner(name))
//! }
//! ```

/// Minimum stack space to keep available (100KB red zone).
const RED_ZONE: usize = 100 * 1024;

/// Stack space to allocate when growing (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack; call through.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
