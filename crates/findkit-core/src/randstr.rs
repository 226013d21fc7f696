//! Fast random letter strings via bit-cache extraction.
//!
//! One 63-bit draw from a [`BitSource`] is sliced into ten 6-bit groups. Each
//! group indexes [`LETTERS`]; indices 52..=63 are rejected and the group is
//! skipped rather than folded back with a modulo, so every letter stays
//! equally likely.
//!
//! Output is **not** suitable for secrets. Use it for ids, nonces in test
//! fixtures, and similar throwaway identifiers.

use std::sync::{LazyLock, Mutex, PoisonError};
use std::time::{SystemTime, UNIX_EPOCH};

use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

/// The 52-letter alphabet, lowercase first.
pub const LETTERS: &[u8; 52] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Bits needed to index [`LETTERS`].
const LETTER_IDX_BITS: u32 = 6;
/// Low-bit mask for one index.
const LETTER_IDX_MASK: u64 = (1 << LETTER_IDX_BITS) - 1;
/// Index groups that fit in one 63-bit draw.
const LETTER_IDX_MAX: u32 = 63 / LETTER_IDX_BITS;

/// A supplier of 63-bit non-negative random integers.
pub trait BitSource {
    /// Next value in `0..2^63`.
    fn next_i63(&mut self) -> u64;
}

/// Default [`BitSource`]: a `StdRng` seeded from the wall clock.
#[derive(Debug, Clone)]
pub struct ClockSeededSource {
    rng: StdRng,
}

impl ClockSeededSource {
    /// Seed from the current wall-clock time in nanoseconds.
    pub fn new() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos();
        Self::from_seed(nanos as u64)
    }

    /// Reproducible source for a fixed seed.
    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for ClockSeededSource {
    fn default() -> Self {
        Self::new()
    }
}

impl BitSource for ClockSeededSource {
    fn next_i63(&mut self) -> u64 {
        self.rng.next_u64() >> 1
    }
}

static SHARED_SOURCE: LazyLock<Mutex<ClockSeededSource>> =
    LazyLock::new(|| Mutex::new(ClockSeededSource::new()));

/// Generate `n` letters from `source`.
///
/// Draws from `source` lazily: `n == 0` consumes nothing, and each draw
/// yields up to ten candidate indices (about 8.1 accepted letters on average).
pub fn random_string<S: BitSource + ?Sized>(source: &mut S, n: usize) -> String {
    let mut out = Vec::with_capacity(n);
    let mut cache = 0u64;
    let mut remain = 0u32;
    while out.len() < n {
        if remain == 0 {
            cache = source.next_i63();
            remain = LETTER_IDX_MAX;
        }
        let idx = (cache & LETTER_IDX_MASK) as usize;
        if idx < LETTERS.len() {
            out.push(LETTERS[idx]);
        }
        cache >>= LETTER_IDX_BITS;
        remain -= 1;
    }
    // Every byte came from LETTERS, which is ASCII.
    out.into_iter().map(char::from).collect()
}

/// Generate `n` letters from the process-wide clock-seeded source.
///
/// Calls are serialized on a mutex; hot loops on many threads should own a
/// [`ClockSeededSource`] each and call [`random_string`] instead.
pub fn rand_string(n: usize) -> String {
    let mut source = SHARED_SOURCE
        .lock()
        .unwrap_or_else(PoisonError::into_inner);
    random_string(&mut *source, n)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Replays fixed draws and counts how many were taken.
    struct Replay {
        values: Vec<u64>,
        calls: usize,
    }

    impl Replay {
        fn new(values: Vec<u64>) -> Self {
            Self { values, calls: 0 }
        }
    }

    impl BitSource for Replay {
        fn next_i63(&mut self) -> u64 {
            let v = self.values[self.calls % self.values.len()];
            self.calls += 1;
            v
        }
    }

    /// Pack 6-bit groups into one draw, first group in the low bits.
    fn pack(groups: &[u64]) -> u64 {
        groups
            .iter()
            .rev()
            .fold(0u64, |acc, &g| (acc << LETTER_IDX_BITS) | g)
    }

    #[test]
    fn test_zero_length_draws_nothing() {
        let mut src = Replay::new(vec![0]);
        assert_eq!(random_string(&mut src, 0), "");
        assert_eq!(src.calls, 0);
    }

    #[test]
    fn test_groups_map_to_letters_in_order() {
        let mut src = Replay::new(vec![pack(&[0, 1, 25, 26, 51])]);
        assert_eq!(random_string(&mut src, 5), "abzAZ");
        assert_eq!(src.calls, 1);
    }

    #[test]
    fn test_out_of_range_groups_are_rejected_not_wrapped() {
        // 52 % 52 would be 'a' and 63 % 52 would be 'l' under modulo reduction.
        let mut src = Replay::new(vec![pack(&[52, 63, 2, 60, 3])]);
        assert_eq!(random_string(&mut src, 2), "cd");
    }

    #[test]
    fn test_refills_after_ten_groups() {
        let first = pack(&[0; 10]);
        let second = pack(&[1, 1]);
        let mut src = Replay::new(vec![first, second]);
        let s = random_string(&mut src, 12);
        assert_eq!(s, "aaaaaaaaaabb");
        assert_eq!(src.calls, 2);
    }

    #[test]
    fn test_all_rejected_draw_forces_new_draw() {
        let rejected = pack(&[63; 10]);
        let mut src = Replay::new(vec![rejected, pack(&[4])]);
        assert_eq!(random_string(&mut src, 1), "e");
        assert_eq!(src.calls, 2);
    }

    #[test]
    fn test_seeded_source_is_reproducible() {
        let a = random_string(&mut ClockSeededSource::from_seed(7), 64);
        let b = random_string(&mut ClockSeededSource::from_seed(7), 64);
        let c = random_string(&mut ClockSeededSource::from_seed(8), 64);
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_source_stays_within_63_bits() {
        let mut src = ClockSeededSource::from_seed(1);
        for _ in 0..10_000 {
            assert!(src.next_i63() < 1 << 63);
        }
    }

    #[test]
    fn test_shared_length_and_alphabet() {
        for n in [0, 1, 9, 10, 11, 100, 1000] {
            let s = rand_string(n);
            assert_eq!(s.len(), n);
            assert!(s.bytes().all(|b| b.is_ascii_alphabetic()));
        }
    }
}
