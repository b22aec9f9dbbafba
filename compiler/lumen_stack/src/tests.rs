use super::*;

#[test]
fn nested_depth_is_counted() {
    fn depth(n: u32) -> u32 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
    }

    assert_eq!(depth(64), 64);
}

#[test]
fn deep_recursion_does_not_overflow() {
    // Deep enough to blow a default 8MB stack without growth.
    fn deep(n: u64) -> u64 {
        ensure_sufficient_stack(|| if n == 0 { 0 } else { deep(n - 1) + 1 })
    }

    assert_eq!(deep(100_000), 100_000);
}

#[test]
fn propagates_result_values() {
    let ok: Result<u8, &str> = ensure_sufficient_stack(|| Ok(7));
    assert_eq!(ok, Ok(7));

    let err: Result<u8, &str> = ensure_sufficient_stack(|| Err("unbalanced"));
    assert_eq!(err, Err("unbalanced"));
}
