//! Randomized phase timer.
//!
//! The timer is the pure half of the cycling worker: it counts ticks and
//! reports when the current randomly drawn threshold has been reached. It
//! never sleeps; the caller decides what a tick is.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Build the worker's random source.
///
/// A fixed seed gives a reproducible threshold sequence; `None` seeds from
/// OS entropy so separate runs cycle differently.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}

/// Tick accumulator with a threshold drawn uniformly from `[min, max]`.
///
/// # Example
///
/// ```rust
/// use light_cycle::core::{seeded_rng, PhaseTimer};
///
/// let mut timer = PhaseTimer::new(seeded_rng(Some(7)), 3, 5);
/// let threshold = timer.threshold();
///
/// let mut fired = None;
/// for _ in 0..threshold {
///     fired = timer.tick();
/// }
/// assert_eq!(fired, Some(threshold));
/// assert_eq!(timer.elapsed(), 0);
/// ```
#[derive(Debug)]
pub struct PhaseTimer<R> {
    rng: R,
    min: u64,
    max: u64,
    elapsed: u64,
    threshold: u64,
}

impl<R: Rng> PhaseTimer<R> {
    /// Create a timer and draw its first threshold.
    ///
    /// `max` below `min` is treated as `min`; configuration validation
    /// rejects that case before a timer is ever built.
    pub fn new(mut rng: R, min: u64, max: u64) -> Self {
        let max = max.max(min);
        let threshold = rng.random_range(min..=max);
        Self {
            rng,
            min,
            max,
            elapsed: 0,
            threshold,
        }
    }

    /// Advance by one tick.
    ///
    /// Returns `Some(ticks)` when the threshold is reached, after resetting
    /// the elapsed count and drawing a fresh threshold.
    pub fn tick(&mut self) -> Option<u64> {
        self.elapsed += 1;
        if self.elapsed < self.threshold {
            return None;
        }
        let ticks = self.elapsed;
        self.elapsed = 0;
        self.threshold = self.rng.random_range(self.min..=self.max);
        Some(ticks)
    }

    /// Ticks counted since the last flip.
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }

    /// Ticks required for the next flip.
    pub fn threshold(&self) -> u64 {
        self.threshold
    }

    /// Inclusive threshold bounds.
    pub fn bounds(&self) -> (u64, u64) {
        (self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_threshold_is_in_range() {
        let timer = PhaseTimer::new(seeded_rng(Some(1)), 4000, 6000);
        assert!((4000..=6000).contains(&timer.threshold()));
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn fires_exactly_at_threshold() {
        let mut timer = PhaseTimer::new(seeded_rng(Some(2)), 10, 20);
        let threshold = timer.threshold();

        for _ in 1..threshold {
            assert_eq!(timer.tick(), None);
        }
        assert_eq!(timer.tick(), Some(threshold));
        assert_eq!(timer.elapsed(), 0);
    }

    #[test]
    fn every_interval_stays_within_bounds() {
        let mut timer = PhaseTimer::new(seeded_rng(Some(3)), 40, 60);
        let fired: Vec<u64> = (0..10_000).filter_map(|_| timer.tick()).collect();

        assert!(!fired.is_empty());
        assert!(fired.iter().all(|ticks| (40..=60).contains(ticks)));
    }

    #[test]
    fn equal_bounds_fire_periodically() {
        let mut timer = PhaseTimer::new(seeded_rng(None), 5, 5);
        let fired: Vec<u64> = (0..25).filter_map(|_| timer.tick()).collect();
        assert_eq!(fired, vec![5; 5]);
    }

    #[test]
    fn inverted_bounds_collapse_to_min() {
        let timer = PhaseTimer::new(seeded_rng(Some(4)), 9, 3);
        assert_eq!(timer.bounds(), (9, 9));
        assert_eq!(timer.threshold(), 9);
    }

    #[test]
    fn same_seed_gives_same_sequence() {
        let mut a = PhaseTimer::new(seeded_rng(Some(99)), 1, 100);
        let mut b = PhaseTimer::new(seeded_rng(Some(99)), 1, 100);

        let run = |t: &mut PhaseTimer<StdRng>| -> Vec<u64> {
            (0..2_000).filter_map(|_| t.tick()).collect()
        };
        assert_eq!(run(&mut a), run(&mut b));
    }
}
