//! Fibonacci lookup for primary-token credits

use std::sync::OnceLock;

/// Largest index whose Fibonacci number fits in a u64
pub const MAX_FIB_INDEX: usize = 93;

fn table() -> &'static [u64; MAX_FIB_INDEX + 1] {
    static TABLE: OnceLock<[u64; MAX_FIB_INDEX + 1]> = OnceLock::new();
    TABLE.get_or_init(|| {
        let mut values = [0u64; MAX_FIB_INDEX + 1];
        values[1] = 1;
        for i in 2..=MAX_FIB_INDEX {
            values[i] = values[i - 1] + values[i - 2];
        }
        values
    })
}

/// `F(0) = 0, F(1) = 1, F(n) = F(n-1) + F(n-2)`; `None` past u64 range
pub fn fibonacci(index: usize) -> Option<u64> {
    table().get(index).copied()
}
