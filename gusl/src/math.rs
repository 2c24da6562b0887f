//! Number tables shared by every interpreter run.
//!
//! Primes are generated lazily by ascending trial division and kept in a
//! process-wide table. Readers share the lock; the table only grows under
//! the write lock, so concurrent interpreters observe a consistent prefix.
use log::debug;
use parking_lot::{RwLock, const_rwlock};

/// Highest prime index accepted by the `P` atom.
pub const MAX_PRIME_INDEX: i32 = 100;

/// Highest argument accepted by the `F` atom (`13!` exceeds `i32::MAX`).
pub const MAX_FACTORIAL: i32 = 12;

static PRIMES: RwLock<Vec<i32>> = const_rwlock(Vec::new());

/// Returns the `n`th prime (1-based), or `None` when `n` is outside
/// `1..=MAX_PRIME_INDEX`.
pub fn nth_prime(n: i32) -> Option<i32> {
    if !(1..=MAX_PRIME_INDEX).contains(&n) {
        return None;
    }
    let index = (n - 1) as usize;

    if let Some(prime) = PRIMES.read().get(index) {
        return Some(*prime);
    }

    let mut table = PRIMES.write();
    extend_primes(&mut table, index + 1);
    table.get(index).copied()
}

/// Fill the prime table up to [`MAX_PRIME_INDEX`] entries.
///
/// Call this before sharing work between threads so that no interpreter has
/// to take the write lock.
pub fn prewarm_primes() {
    let mut table = PRIMES.write();
    extend_primes(&mut table, MAX_PRIME_INDEX as usize);
}

fn extend_primes(table: &mut Vec<i32>, count: usize) {
    if table.len() >= count {
        return;
    }
    let mut candidate = table.last().map_or(2, |last| last + 1);
    while table.len() < count {
        if is_prime(candidate) {
            table.push(candidate);
        }
        candidate += 1;
    }
    debug!("Prime table extended to {} entries (largest {}).", table.len(), candidate - 1);
}

/// Trial division primality test.
pub fn is_prime(n: i32) -> bool {
    if n < 2 {
        return false;
    }
    let mut divisor = 2;
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 1;
    }
    true
}

/// Returns `n!`, or `None` when `n` exceeds [`MAX_FACTORIAL`].
///
/// Non-positive arguments yield the empty product, `1`.
pub fn factorial(n: i32) -> Option<i32> {
    if n > MAX_FACTORIAL {
        return None;
    }
    Some((1..=n).product())
}
