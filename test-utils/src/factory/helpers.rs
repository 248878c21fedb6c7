//! Shared helper utilities for factory methods.

/// Counter for generating unique ids in tests.
///
/// Starts well above zero so generated ids look like snowflakes and never collide
/// with the small literal ids tests use directly.
static COUNTER: std::sync::atomic::AtomicI64 = std::sync::atomic::AtomicI64::new(100_000);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `i64` - Next unique counter value
pub fn next_id() -> i64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}
