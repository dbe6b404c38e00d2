//! Shared helper utilities for factory methods.

/// Counter for generating unique IDs in tests.
static COUNTER: std::sync::atomic::AtomicU64 = std::sync::atomic::AtomicU64::new(1);

/// Gets the next unique counter value for test data.
///
/// # Returns
/// - `u64` - Next unique counter value
pub fn next_id() -> u64 {
    COUNTER.fetch_add(1, std::sync::atomic::Ordering::SeqCst)
}

/// Generates a unique numeric string shaped like a Discord snowflake.
pub fn next_snowflake() -> String {
    format!("{}", 100_000_000_000_000_000u64 + next_id())
}
