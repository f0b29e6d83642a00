//! Seeded reset positions and staggered reset slices.
//!
//! The batch is divided into `episode_length` contiguous slices. Each
//! staggered reset re-randomizes the slice for the current step counter
//! and then advances the counter modulo `episode_length`, so over one full
//! episode length every instance is reset exactly once and resets never
//! happen for the whole batch at the same step.
//!
//! Positions are drawn from a ChaCha8 RNG seeded once at construction;
//! equal seeds give equal reset sequences.

use std::ops::Range;

use maze_core::{Position, RoomCatalog};
use rand::{RngExt, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Draws reset positions and tracks the staggered reset counter.
#[derive(Clone, Debug)]
pub struct ResetScheduler {
    num_envs: usize,
    episode_length: usize,
    step_number: usize,
    capacities: Vec<(i32, i32)>,
    rng: ChaCha8Rng,
    scratch: Vec<Position>,
}

impl ResetScheduler {
    /// Create a scheduler for `catalog` on a `map_width × map_height` map.
    ///
    /// Rooms are assumed to leave a positive capacity on both axes; see
    /// [`EnvConfig::validate_for`](crate::EnvConfig::validate_for).
    pub fn new(
        catalog: &RoomCatalog,
        map_width: u32,
        map_height: u32,
        num_envs: usize,
        episode_length: usize,
        seed: u64,
    ) -> Self {
        let capacities: Vec<_> = catalog
            .iter()
            .map(|room| {
                (
                    map_width as i32 - room.width() as i32,
                    map_height as i32 - room.height() as i32,
                )
            })
            .collect();
        let scratch = vec![Position::default(); num_envs * capacities.len()];
        Self {
            num_envs,
            episode_length,
            step_number: 0,
            capacities,
            rng: ChaCha8Rng::seed_from_u64(seed),
            scratch,
        }
    }

    /// Slice of the batch reset at `step_number`:
    /// `[⌊step·n/len⌋, ⌊(step+1)·n/len⌋)`.
    pub fn slice_for(step_number: usize, num_envs: usize, episode_length: usize) -> Range<usize> {
        let start = step_number * num_envs / episode_length;
        let end = (step_number + 1) * num_envs / episode_length;
        start..end
    }

    /// Counter used by the next staggered reset, in `[0, episode_length)`.
    pub fn step_number(&self) -> usize {
        self.step_number
    }

    /// Steps per episode.
    pub fn episode_length(&self) -> usize {
        self.episode_length
    }

    /// Per-room `(capacity_x, capacity_y)`: the largest legal top-left
    /// coordinate on each axis.
    pub fn capacities(&self) -> &[(i32, i32)] {
        &self.capacities
    }

    /// Return the slice for the current counter and advance the counter.
    pub fn next_slice(&mut self) -> Range<usize> {
        let range = Self::slice_for(self.step_number, self.num_envs, self.episode_length);
        self.step_number = (self.step_number + 1) % self.episode_length;
        range
    }

    /// Draw uniform positions in `[0, cap_x] × [0, cap_y]` for every room
    /// of `count` instances. Returns `[env][room]`, reusing an internal
    /// buffer.
    ///
    /// # Panics
    ///
    /// Panics if `count > num_envs`.
    pub fn draw(&mut self, count: usize) -> &[Position] {
        assert!(count <= self.num_envs, "cannot draw {count} instances");
        let n_rooms = self.capacities.len();
        let out = &mut self.scratch[..count * n_rooms];
        for (i, slot) in out.iter_mut().enumerate() {
            let (cap_x, cap_y) = self.capacities[i % n_rooms];
            *slot = Position::new(
                self.rng.random_range(0..=cap_x),
                self.rng.random_range(0..=cap_y),
            );
        }
        out
    }
}
