//! Stack growth guard.
//!
//! Parsing, compiling, evaluating and unparsing all recurse on nesting depth,
//! and a script like `(((((...)))))` or a long chain of closure calls can go
//! deep enough to exhaust a worker thread's stack. Each recursive step wraps
//! itself in [`ensure_sufficient_stack`], which switches to a freshly
//! allocated segment when the remaining stack gets low.
//!
//! On wasm32 the guard is a plain call.

#[cfg(not(target_arch = "wasm32"))]
/// Grow when less than this much stack remains.
const RED_ZONE: usize = 128 * 1024;

#[cfg(not(target_arch = "wasm32"))]
/// Size of each newly allocated stack segment.
const SEGMENT_SIZE: usize = 1024 * 1024;

/// Run `f`, first moving to a new stack segment if the current one is nearly full.
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn nested_depth_survives() {
        fn depth(n: u32) -> u32 {
            ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
        }

        assert_eq!(depth(200_000), 200_000);
    }

    #[test]
    fn passes_results_through() {
        let result: Result<u8, &str> = ensure_sufficient_stack(|| Err("boom"));
        assert_eq!(result, Err("boom"));
    }
}
