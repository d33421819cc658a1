//! Stack growth guard for recursive descent.
//!
//! The interpreter walks parse trees iteratively and never needs this, but
//! the parser descends once per nesting level of the source text. Deeply
//! nested input such as `((((...))))` or long prefix-operator chains would
//! otherwise overflow the native stack.
//!
//! On native targets [`ensure_sufficient_stack`] grows the stack through
//! `stacker` once less than [`RED_ZONE`] bytes remain. On `wasm32` it calls
//! the closure directly.

/// Remaining stack below which a new segment is allocated.
pub const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
pub const STACK_SEGMENT: usize = 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_SEGMENT, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nesting_depth(text: &[u8]) -> usize {
        ensure_sufficient_stack(|| match text.split_first() {
            Some((b'(', rest)) => 1 + nesting_depth(rest),
            _ => 0,
        })
    }

    #[test]
    fn test_passes_result_through() {
        let parsed: Result<u8, String> = ensure_sufficient_stack(|| Ok(7));
        assert_eq!(parsed, Ok(7));
    }

    #[test]
    fn test_deeply_nested_input() {
        let text = vec![b'('; 200_000];
        assert_eq!(nesting_depth(&text), 200_000);
    }
}
