//! RNG oracle for deterministic random number generation.
//!
//! This module provides a trait-based RNG system that ensures deterministic
//! random number generation for spawn placement and spawn values.
//!
//! # Determinism
//!
//! All RNG implementations must be deterministic: given the same seed,
//! they must produce the same sequence of random numbers. A game is therefore
//! fully reproducible from its seed and the list of submitted moves.

/// RNG oracle for deterministic random number generation.
///
/// Implementations must be deterministic and produce the same values
/// given the same seed.
pub trait RngOracle: Send + Sync {
    /// Generate a random u32 value from a seed.
    fn next_u32(&self, seed: u64) -> u32;

    /// Roll a d100 (1-100 inclusive).
    ///
    /// Used for percentage-based mechanics like the 4-tile spawn chance.
    fn roll_d100(&self, seed: u64) -> u32 {
        (self.next_u32(seed) % 100) + 1
    }

    /// Pick an index in `0..len`. `len` must be non-zero.
    fn index(&self, seed: u64, len: usize) -> usize {
        debug_assert!(len > 0, "cannot pick from an empty range");
        (self.next_u32(seed) as usize) % len.max(1)
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG is a family of simple, fast, space-efficient RNGs with excellent
/// statistical quality. This implementation uses PCG-XSH-RR, which produces
/// 32-bit output from 64-bit state.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, Default)]
pub struct PcgRng;

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Advance the PCG state by one step.
    ///
    /// `state' = (state * multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&self, seed: u64) -> u32 {
        let state = Self::pcg_step(seed);
        Self::pcg_output(state)
    }
}

/// Roll contexts used by the spawn policy.
///
/// Each spawn needs two independent rolls; every spawn in the same move (or
/// during a reset) takes its own `slot` so rolls never collide.
pub mod context {
    /// Roll choosing the empty cell.
    pub const SPAWN_CELL: u32 = 0;
    /// Roll choosing between a 2 and a 4.
    pub const SPAWN_VALUE: u32 = 1;

    /// Context for roll `kind` of the `slot`-th spawn.
    pub const fn spawn(slot: u32, kind: u32) -> u32 {
        slot * 2 + kind
    }
}

/// Compute deterministic seed from game state components.
///
/// # Arguments
///
/// * `game_seed` - Base seed set at game start (for replay/determinism)
/// * `nonce` - Accepted move count (increments each board-changing move)
/// * `context` - Distinguishes independent rolls within one move
pub fn compute_seed(game_seed: u64, nonce: u64, context: u32) -> u64 {
    // SplitMix64 and FxHash multipliers
    let mut hash = game_seed;

    hash ^= nonce.wrapping_mul(0x9e3779b97f4a7c15);
    hash ^= (context as u64).wrapping_mul(0x85ebca6b);

    // Final avalanche step
    hash ^= hash >> 33;
    hash = hash.wrapping_mul(0xff51afd7ed558ccd);
    hash ^= hash >> 33;

    hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pcg_is_deterministic() {
        let rng = PcgRng;
        assert_eq!(rng.next_u32(42), rng.next_u32(42));
        assert_ne!(rng.next_u32(42), rng.next_u32(43));
    }

    #[test]
    fn d100_stays_in_range() {
        let rng = PcgRng;
        for seed in 0..1_000 {
            let roll = rng.roll_d100(compute_seed(7, seed, 0));
            assert!((1..=100).contains(&roll));
        }
    }

    #[test]
    fn index_stays_in_range() {
        let rng = PcgRng;
        for seed in 0..1_000 {
            assert!(rng.index(compute_seed(7, seed, 1), 5) < 5);
        }
    }

    #[test]
    fn seeds_differ_per_context_and_nonce() {
        let base = compute_seed(1, 1, context::spawn(0, context::SPAWN_CELL));
        assert_ne!(base, compute_seed(1, 1, context::spawn(0, context::SPAWN_VALUE)));
        assert_ne!(base, compute_seed(1, 1, context::spawn(1, context::SPAWN_CELL)));
        assert_ne!(base, compute_seed(1, 2, context::spawn(0, context::SPAWN_CELL)));
    }
}
