//! Uniform random integers.
//!
//! Everything random in a round (deck shuffle, impostor seats, decoy pick) goes
//! through [`RandomSource`], so tests can script the exact values a round sees.

use rand::rngs::{OsRng, SmallRng};
use rand::{Rng, SeedableRng, TryRngCore};

/// Source of uniformly distributed integers.
pub trait RandomSource {
    /// Uniform integer in `min..=max_inclusive`.
    /// Returns `min` when the range holds at most one value.
    fn random_int(&mut self, min: u32, max_inclusive: u32) -> u32;
}

impl<F> RandomSource for F
where
    F: FnMut(u32, u32) -> u32,
{
    fn random_int(&mut self, min: u32, max_inclusive: u32) -> u32 {
        self(min, max_inclusive)
    }
}

/// OS-backed generator with rejection sampling.
///
/// If the OS source ever fails, switches permanently to a clock-seeded
/// [`SmallRng`] and logs once.
#[derive(Debug, Default)]
pub struct SecureRandom {
    fallback: Option<SmallRng>,
}

impl SecureRandom {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    fn next_u32(&mut self) -> u32 {
        if let Some(rng) = self.fallback.as_mut() {
            return rng.random();
        }

        match OsRng.try_next_u32() {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(
                    "Secure random source unavailable ({}), falling back to pseudo-random",
                    e
                );
                let mut rng = SmallRng::seed_from_u64(clock_seed());
                let value = rng.random();
                self.fallback = Some(rng);
                value
            }
        }
    }
}

impl RandomSource for SecureRandom {
    fn random_int(&mut self, min: u32, max_inclusive: u32) -> u32 {
        if max_inclusive <= min {
            return min;
        }

        let range = u64::from(max_inclusive - min) + 1;
        // Largest multiple of `range` that fits in 2^32; values at or above it are rejected
        let zone = (1u64 << 32) - ((1u64 << 32) % range);
        loop {
            let x = u64::from(self.next_u32());
            if x < zone {
                return min + (x % range) as u32;
            }
        }
    }
}

fn clock_seed() -> u64 {
    chrono::Utc::now()
        .timestamp_nanos_opt()
        .map(|nanos| nanos as u64)
        .unwrap_or_default()
}

/// Adapts any [`rand::Rng`], e.g. a seeded `StdRng` for reproducible sessions.
#[derive(Debug, Clone)]
pub struct RngSource<R>(pub R);

impl<R: Rng> RandomSource for RngSource<R> {
    fn random_int(&mut self, min: u32, max_inclusive: u32) -> u32 {
        if max_inclusive <= min {
            return min;
        }
        self.0.random_range(min..=max_inclusive)
    }
}

/// Replays a fixed list of values, repeating the last one once exhausted.
///
/// Values are clamped into the requested range so a script written for one
/// call site can't produce out-of-range results at another.
#[derive(Debug, Clone)]
pub struct ScriptedRandom {
    values: Vec<u32>,
    next: usize,
}

impl ScriptedRandom {
    pub fn new(values: impl Into<Vec<u32>>) -> Self {
        Self {
            values: values.into(),
            next: 0,
        }
    }

    /// How many values have been handed out so far
    pub fn calls(&self) -> usize {
        self.next
    }
}

impl RandomSource for ScriptedRandom {
    fn random_int(&mut self, min: u32, max_inclusive: u32) -> u32 {
        let idx = self.next.min(self.values.len().saturating_sub(1));
        self.next += 1;
        let value = self.values.get(idx).copied().unwrap_or(min);
        value.clamp(min, max_inclusive.max(min))
    }
}
