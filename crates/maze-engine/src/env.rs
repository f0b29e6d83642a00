//! The batched room-placement environment.
//!
//! [`MazeEnv`] owns every batch-wide buffer: the rolling
//! [`StateHistory`], the rasterizer canvas, and the scratch arrays used
//! by a step. Buffers are allocated once in [`MazeEnv::new`].
//!
//! # Step pipeline
//!
//! 1. Validate the action batch (length and range) before touching state.
//! 2. Copy slot-0 positions into scratch, decode every action, and move
//!    the selected room of each instance, clamped to its capacity.
//! 3. Rasterize the moved layout and score every canvas.
//! 4. Shift the history and write positions, actions and rewards at
//!    slot 0.
//!
//! Staggered resets are driven by the caller, once per step, through
//! [`MazeEnv::staggered_reset`].

use std::ops::Range;
use std::time::Instant;

use maze_core::{Position, RoomCatalog, RoomDef};

use crate::codec::{ActionCodec, DecodedAction, Displacement};
use crate::config::{ConfigError, EnvConfig};
use crate::history::StateHistory;
use crate::metrics::StepMetrics;
use crate::raster::MapRasterizer;
use crate::render::{MapRenderer, RenderFrame};
use crate::reset::ResetScheduler;
use crate::reward::RewardEvaluator;

// ── Error type ──────────────────────────────────────────────────

/// A call that violated the environment's documented input contract.
///
/// Rejected calls leave the environment unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvError {
    /// The action batch does not have one entry per instance.
    BatchSizeMismatch {
        /// Expected length (`num_envs`).
        expected: usize,
        /// Length received.
        found: usize,
    },
    /// An action lies outside `[0, num_actions)`.
    ActionOutOfRange {
        /// Instance the action was meant for.
        env_index: usize,
        /// The rejected action.
        action: u32,
        /// Size of the flat action space.
        num_actions: u32,
    },
    /// A reset range is reversed or extends past the batch.
    InvalidRange {
        /// Requested start.
        start: usize,
        /// Requested end (exclusive).
        end: usize,
        /// Total number of instances.
        num_envs: usize,
    },
    /// Instance index out of bounds.
    InvalidIndex {
        /// The requested index.
        env_index: usize,
        /// Total number of instances.
        num_envs: usize,
    },
}

impl std::fmt::Display for EnvError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EnvError::BatchSizeMismatch { expected, found } => {
                write!(f, "action batch has {found} entries, expected {expected}")
            }
            EnvError::ActionOutOfRange {
                env_index,
                action,
                num_actions,
            } => write!(
                f,
                "env {env_index}: action {action} out of range (num_actions={num_actions})"
            ),
            EnvError::InvalidRange {
                start,
                end,
                num_envs,
            } => write!(
                f,
                "reset range {start}..{end} invalid (num_envs={num_envs})"
            ),
            EnvError::InvalidIndex {
                env_index,
                num_envs,
            } => write!(
                f,
                "env index {env_index} out of range (num_envs={num_envs})"
            ),
        }
    }
}

impl std::error::Error for EnvError {}

// ── MazeEnv ─────────────────────────────────────────────────────

/// Batched room-placement environment.
///
/// # Examples
///
/// ```
/// use maze_core::RoomDef;
/// use maze_engine::{EnvConfig, MazeEnv};
///
/// let rooms = vec![
///     RoomDef::new(1, "hall", vec![vec![1, 1, 1]]),
///     RoomDef::new(2, "shaft", vec![vec![1], vec![1], vec![1]]),
/// ];
/// let config = EnvConfig {
///     map_width: 8,
///     map_height: 8,
///     action_radius: 1,
///     num_envs: 4,
///     history_size: 3,
///     episode_length: 4,
///     seed: 7,
/// };
/// let mut env = MazeEnv::from_defs(rooms, config).unwrap();
/// assert_eq!(env.num_actions(), 16);
///
/// env.staggered_reset();
/// env.step(&[0, 5, 9, 15]).unwrap();
/// assert!(env.current_rewards().iter().all(|&r| r <= 0.0));
/// ```
pub struct MazeEnv {
    config: EnvConfig,
    rooms: RoomCatalog,
    codec: ActionCodec,
    history: StateHistory,
    rasterizer: MapRasterizer,
    evaluator: RewardEvaluator,
    scheduler: ResetScheduler,
    positions: Vec<Position>,
    decoded: Vec<DecodedAction>,
    costs: Vec<u32>,
    rewards: Vec<f32>,
    pending_resets: usize,
    total_steps: u64,
}

// Compile-time assertion: independent environments can move to worker
// threads.
const _: fn() = || {
    fn assert<T: Send>() {}
    assert::<MazeEnv>();
};

impl MazeEnv {
    /// Build an environment and randomize every instance.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config is invalid or any room leaves
    /// no capacity on the map.
    pub fn new(rooms: RoomCatalog, config: EnvConfig) -> Result<Self, ConfigError> {
        config.validate_for(&rooms)?;

        let num_envs = config.num_envs;
        let num_rooms = rooms.len();
        let map_width = config.map_width as usize;
        let map_height = config.map_height as usize;

        let codec = ActionCodec::new(config.action_radius, num_rooms);
        let history = StateHistory::new(num_envs, config.history_size, num_rooms);
        let rasterizer = MapRasterizer::new(&rooms, map_width, map_height, num_envs);
        let evaluator = RewardEvaluator::new(rasterizer.cells());
        let scheduler = ResetScheduler::new(
            &rooms,
            config.map_width,
            config.map_height,
            num_envs,
            config.episode_length,
            config.seed,
        );

        log::info!(
            "maze env: {num_envs} envs, {num_rooms} rooms, {}x{} map, {} actions, history {}",
            map_width,
            map_height,
            codec.num_actions(),
            config.history_size,
        );

        let mut env = Self {
            codec,
            history,
            rasterizer,
            evaluator,
            scheduler,
            positions: vec![Position::default(); num_envs * num_rooms],
            decoded: vec![
                DecodedAction {
                    room: 0,
                    displacement: Displacement::default(),
                };
                num_envs
            ],
            costs: vec![0; num_envs],
            rewards: vec![0.0; num_envs],
            pending_resets: 0,
            total_steps: 0,
            rooms,
            config,
        };
        env.reset_slice(0..num_envs);
        Ok(env)
    }

    /// Populate a catalog from raw definitions and build an environment.
    pub fn from_defs(defs: Vec<RoomDef>, config: EnvConfig) -> Result<Self, ConfigError> {
        Self::new(RoomCatalog::new(defs)?, config)
    }

    // ── Stepping ────────────────────────────────────────────────

    /// Apply one action per instance.
    ///
    /// Each action must lie in `[0, num_actions())`. The batch is checked
    /// in full before any state changes.
    ///
    /// # Errors
    ///
    /// [`EnvError::BatchSizeMismatch`] if `actions.len() != num_envs()`,
    /// [`EnvError::ActionOutOfRange`] for the first out-of-range action.
    pub fn step(&mut self, actions: &[u32]) -> Result<StepMetrics, EnvError> {
        self.validate_actions(actions)?;
        let start = Instant::now();

        let n_rooms = self.rooms.len();
        self.history.copy_current_positions(&mut self.positions);
        self.codec.decode_batch(actions, &mut self.decoded);
        let capacities = self.scheduler.capacities();
        for (env, decoded) in self.decoded.iter().enumerate() {
            let (cap_x, cap_y) = capacities[decoded.room];
            let d = decoded.displacement;
            let slot = &mut self.positions[env * n_rooms + decoded.room];
            *slot = slot.offset_clamped(d.dx, d.dy, cap_x, cap_y);
        }
        let moved = Instant::now();

        self.rasterizer.rasterize(&self.positions);
        let rasterized = Instant::now();

        self.evaluator
            .evaluate(self.rasterizer.canvas(), &mut self.costs, &mut self.rewards);
        let scored = Instant::now();

        self.history.shift();
        self.history.write(&self.positions, actions, &self.rewards);
        self.total_steps += 1;

        let total_overlap: u64 = self.costs.iter().map(|&c| u64::from(c)).sum();
        let metrics = StepMetrics {
            total_us: start.elapsed().as_micros() as u64,
            update_us: (moved - start).as_micros() as u64,
            raster_us: (rasterized - moved).as_micros() as u64,
            reward_us: (scored - rasterized).as_micros() as u64,
            total_overlap,
            mean_reward: -(total_overlap as f32) / self.config.num_envs as f32,
            instances_reset: std::mem::take(&mut self.pending_resets),
        };
        log::trace!(
            "step {}: overlap {} mean reward {:.3} ({} us)",
            self.total_steps,
            metrics.total_overlap,
            metrics.mean_reward,
            metrics.total_us,
        );
        Ok(metrics)
    }

    fn validate_actions(&self, actions: &[u32]) -> Result<(), EnvError> {
        let n = self.config.num_envs;
        if actions.len() != n {
            return Err(EnvError::BatchSizeMismatch {
                expected: n,
                found: actions.len(),
            });
        }
        let num_actions = self.codec.num_actions();
        if let Some((env_index, &action)) = actions
            .iter()
            .enumerate()
            .find(|&(_, &a)| !self.codec.contains(a))
        {
            return Err(EnvError::ActionOutOfRange {
                env_index,
                action,
                num_actions,
            });
        }
        Ok(())
    }

    // ── Resets ──────────────────────────────────────────────────

    /// Reset the next slice of the batch and advance the reset counter.
    ///
    /// Call once per step. Over `episode_length` consecutive calls every
    /// instance is reset exactly once. Returns the range that was reset,
    /// which is empty when the batch is smaller than the episode length
    /// and this step's slice holds no instances.
    pub fn staggered_reset(&mut self) -> Range<usize> {
        let step_number = self.scheduler.step_number();
        let range = self.scheduler.next_slice();
        log::debug!(
            "staggered reset at step_number {step_number}: envs {}..{}",
            range.start,
            range.end
        );
        self.reset_slice(range.clone());
        range
    }

    /// Re-randomize instances `[start, end)` and invalidate their history.
    ///
    /// # Errors
    ///
    /// [`EnvError::InvalidRange`] if `start > end` or `end > num_envs()`.
    pub fn partial_reset(&mut self, start: usize, end: usize) -> Result<(), EnvError> {
        let num_envs = self.config.num_envs;
        if start > end || end > num_envs {
            return Err(EnvError::InvalidRange {
                start,
                end,
                num_envs,
            });
        }
        self.reset_slice(start..end);
        Ok(())
    }

    fn reset_slice(&mut self, range: Range<usize>) {
        let positions = self.scheduler.draw(range.len());
        self.history.reset_range(range.start, range.end, positions);
        self.pending_resets += range.len();
    }

    // ── Accessors ───────────────────────────────────────────────

    /// Configuration this environment was built from.
    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// The room catalog.
    pub fn rooms(&self) -> &RoomCatalog {
        &self.rooms
    }

    /// The action codec.
    pub fn codec(&self) -> &ActionCodec {
        &self.codec
    }

    /// Read-only view of the rolling history.
    pub fn history(&self) -> &StateHistory {
        &self.history
    }

    /// Number of instances.
    pub fn num_envs(&self) -> usize {
        self.config.num_envs
    }

    /// Number of rooms.
    pub fn num_rooms(&self) -> usize {
        self.rooms.len()
    }

    /// Actions per room.
    pub fn actions_per_room(&self) -> u32 {
        self.codec.actions_per_room()
    }

    /// Size of the flat action space.
    pub fn num_actions(&self) -> u32 {
        self.codec.num_actions()
    }

    /// `(capacity_x, capacity_y)` of a room.
    pub fn capacity(&self, room: usize) -> Option<(i32, i32)> {
        self.scheduler.capacities().get(room).copied()
    }

    /// Counter the next staggered reset will use.
    pub fn step_number(&self) -> usize {
        self.scheduler.step_number()
    }

    /// Successful steps since construction.
    pub fn total_steps(&self) -> u64 {
        self.total_steps
    }

    /// Current room positions of one instance.
    pub fn positions(&self, env_index: usize) -> Result<&[Position], EnvError> {
        self.history
            .positions(env_index, 0)
            .ok_or(self.invalid_index(env_index))
    }

    /// Rewards of one instance, newest first.
    pub fn reward_history(&self, env_index: usize) -> Result<Vec<f32>, EnvError> {
        self.history
            .reward_history(env_index)
            .ok_or(self.invalid_index(env_index))
    }

    /// Validity mask of one instance, newest first.
    pub fn valid_history(&self, env_index: usize) -> Result<Vec<bool>, EnvError> {
        self.history
            .valid_history(env_index)
            .ok_or(self.invalid_index(env_index))
    }

    /// Most recent reward of every instance.
    pub fn current_rewards(&self) -> Vec<f32> {
        self.history.current_rewards()
    }

    /// Most recent validity of every instance.
    pub fn current_valid(&self) -> Vec<bool> {
        self.history.current_valid()
    }

    /// Overlap cost of every instance's current layout.
    ///
    /// Unlike [`current_rewards`](Self::current_rewards), this reflects
    /// resets made since the last step.
    pub fn overlap_costs(&mut self) -> Vec<u32> {
        self.refresh_canvas();
        self.costs.clone()
    }

    /// Occupancy counts of one instance's current layout, `[y][x]`.
    pub fn occupancy(&mut self, env_index: usize) -> Result<Vec<u32>, EnvError> {
        if env_index >= self.config.num_envs {
            return Err(self.invalid_index(env_index));
        }
        self.refresh_canvas();
        self.rasterizer
            .instance(env_index)
            .map(<[u32]>::to_vec)
            .ok_or(self.invalid_index(env_index))
    }

    fn refresh_canvas(&mut self) {
        self.history.copy_current_positions(&mut self.positions);
        self.rasterizer.rasterize(&self.positions);
        self.evaluator
            .evaluate(self.rasterizer.canvas(), &mut self.costs, &mut self.rewards);
    }

    /// Hand one instance's current layout to `renderer`.
    pub fn render<R: MapRenderer + ?Sized>(
        &self,
        env_index: usize,
        renderer: &mut R,
    ) -> Result<(), EnvError> {
        let positions = self.positions(env_index)?;
        renderer.render(&RenderFrame {
            env_index,
            map_width: self.config.map_width as usize,
            map_height: self.config.map_height as usize,
            rooms: &self.rooms,
            positions,
        });
        Ok(())
    }

    fn invalid_index(&self, env_index: usize) -> EnvError {
        EnvError::InvalidIndex {
            env_index,
            num_envs: self.config.num_envs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::TextRenderer;
    use maze_core::RoomDef;

    fn unit_rooms(n: u32) -> Vec<RoomDef> {
        (0..n)
            .map(|i| RoomDef::new(i, format!("unit{i}"), vec![vec![1]]))
            .collect()
    }

    fn config(num_envs: usize) -> EnvConfig {
        EnvConfig {
            map_width: 6,
            map_height: 5,
            action_radius: 1,
            num_envs,
            history_size: 3,
            episode_length: 4,
            seed: 11,
        }
    }

    fn snapshot(env: &MazeEnv, slot: usize) -> Vec<(Vec<Position>, u32, f32, bool)> {
        let h = env.history();
        (0..env.num_envs())
            .map(|e| {
                (
                    h.positions(e, slot).unwrap().to_vec(),
                    h.action(e, slot).unwrap(),
                    h.reward(e, slot).unwrap(),
                    h.valid(e, slot).unwrap(),
                )
            })
            .collect()
    }

    // ── Construction ──────────────────────────────────────────

    #[test]
    fn construction_randomizes_all_instances_invalid() {
        let env = MazeEnv::from_defs(unit_rooms(3), config(5)).unwrap();
        assert_eq!(env.num_envs(), 5);
        assert_eq!(env.num_rooms(), 3);
        assert_eq!(env.actions_per_room(), 8);
        assert_eq!(env.num_actions(), 24);
        assert_eq!(env.capacity(0), Some((5, 4)));
        assert_eq!(env.capacity(3), None);
        for e in 0..5 {
            assert_eq!(env.valid_history(e).unwrap(), vec![false; 3]);
            assert_eq!(env.positions(e).unwrap().len(), 3);
        }
    }

    #[test]
    fn room_as_wide_as_map_rejected() {
        let mut defs = unit_rooms(1);
        defs.push(RoomDef::new(9, "wide", vec![vec![1; 6]]));
        let err = MazeEnv::from_defs(defs, config(1)).err().unwrap();
        assert!(matches!(err, ConfigError::RoomTooLarge { .. }));
    }

    #[test]
    fn catalog_error_surfaces_as_config_error() {
        let err = MazeEnv::from_defs(vec![], config(1)).err().unwrap();
        assert!(matches!(err, ConfigError::Catalog(_)));
    }

    // ── Stepping ──────────────────────────────────────────────

    #[test]
    fn step_marks_slot_zero_valid_and_records_action() {
        let mut env = MazeEnv::from_defs(unit_rooms(2), config(3)).unwrap();
        env.step(&[0, 9, 15]).unwrap();
        assert_eq!(env.current_valid(), vec![true; 3]);
        assert_eq!(env.history().action(1, 0), Some(9));
        assert_eq!(env.valid_history(0).unwrap(), vec![true, false, false]);
        assert_eq!(env.total_steps(), 1);
    }

    #[test]
    fn step_shifts_history() {
        let mut env = MazeEnv::from_defs(unit_rooms(3), config(4)).unwrap();
        env.step(&[1, 2, 3, 4]).unwrap();
        let before = snapshot(&env, 0);
        env.step(&[5, 6, 7, 8]).unwrap();
        assert_eq!(snapshot(&env, 1), before);
    }

    #[test]
    fn only_selected_room_moves() {
        let mut env = MazeEnv::from_defs(unit_rooms(3), config(1)).unwrap();
        let before = env.positions(0).unwrap().to_vec();
        let action = env.codec().encode(2, Displacement::new(1, 0)).unwrap();
        env.step(&[action]).unwrap();
        let after = env.positions(0).unwrap();
        assert_eq!(after[0], before[0]);
        assert_eq!(after[1], before[1]);
        assert_eq!(after[2].x, (before[2].x + 1).min(5));
        assert_eq!(after[2].y, before[2].y);
    }

    #[test]
    fn moves_clamp_at_map_edge() {
        let mut env = MazeEnv::from_defs(unit_rooms(1), config(2)).unwrap();
        let up_left = env.codec().encode(0, Displacement::new(-1, -1)).unwrap();
        for _ in 0..6 {
            env.step(&[up_left, up_left]).unwrap();
        }
        for e in 0..2 {
            assert_eq!(env.positions(e).unwrap()[0], Position::new(0, 0));
        }
    }

    #[test]
    fn two_unit_rooms_stacked_cost_one() {
        let cfg = EnvConfig {
            map_width: 2,
            map_height: 2,
            ..config(1)
        };
        let mut env = MazeEnv::from_defs(unit_rooms(2), cfg).unwrap();
        let corner = Displacement::new(-1, -1);
        let a0 = env.codec().encode(0, corner).unwrap();
        let a1 = env.codec().encode(1, corner).unwrap();
        env.step(&[a0]).unwrap();
        let metrics = env.step(&[a1]).unwrap();

        assert_eq!(env.positions(0).unwrap(), &[Position::new(0, 0); 2]);
        assert_eq!(env.current_rewards(), vec![-1.0]);
        assert_eq!(metrics.total_overlap, 1);
        assert_eq!(metrics.mean_reward, -1.0);
        assert_eq!(env.occupancy(0).unwrap(), vec![2, 0, 0, 0]);
    }

    // ── Contract violations ───────────────────────────────────

    #[test]
    fn wrong_batch_size_rejected() {
        let mut env = MazeEnv::from_defs(unit_rooms(2), config(3)).unwrap();
        let err = env.step(&[0, 1]).unwrap_err();
        assert_eq!(
            err,
            EnvError::BatchSizeMismatch {
                expected: 3,
                found: 2
            }
        );
    }

    #[test]
    fn out_of_range_action_rejected_without_mutation() {
        let mut env = MazeEnv::from_defs(unit_rooms(2), config(3)).unwrap();
        env.step(&[0, 1, 2]).unwrap();
        let before = snapshot(&env, 0);

        let err = env.step(&[3, 16, 4]).unwrap_err();
        assert_eq!(
            err,
            EnvError::ActionOutOfRange {
                env_index: 1,
                action: 16,
                num_actions: 16
            }
        );
        assert_eq!(snapshot(&env, 0), before);
        assert_eq!(env.total_steps(), 1);
    }

    #[test]
    fn invalid_reset_ranges_rejected() {
        let mut env = MazeEnv::from_defs(unit_rooms(1), config(3)).unwrap();
        assert!(matches!(
            env.partial_reset(2, 1),
            Err(EnvError::InvalidRange { .. })
        ));
        assert!(matches!(
            env.partial_reset(0, 4),
            Err(EnvError::InvalidRange { .. })
        ));
        env.partial_reset(3, 3).unwrap();
    }

    #[test]
    fn invalid_index_rejected() {
        let mut env = MazeEnv::from_defs(unit_rooms(1), config(2)).unwrap();
        assert!(matches!(
            env.positions(2),
            Err(EnvError::InvalidIndex { env_index: 2, .. })
        ));
        assert!(env.reward_history(5).is_err());
        assert!(env.occupancy(2).is_err());
        let mut r = TextRenderer::new();
        assert!(env.render(2, &mut r).is_err());
    }

    // ── Resets ────────────────────────────────────────────────

    #[test]
    fn partial_reset_invalidates_range_only() {
        let mut env = MazeEnv::from_defs(unit_rooms(2), config(4)).unwrap();
        env.step(&[0; 4]).unwrap();
        env.step(&[1; 4]).unwrap();
        env.partial_reset(1, 3).unwrap();
        assert_eq!(env.current_valid(), vec![true, false, false, true]);
        assert_eq!(env.valid_history(2).unwrap(), vec![false; 3]);
        assert_eq!(env.valid_history(3).unwrap(), vec![true, true, false]);
    }

    #[test]
    fn staggered_reset_cycles_through_batch() {
        let mut env = MazeEnv::from_defs(unit_rooms(1), config(4)).unwrap();
        let ranges: Vec<_> = (0..4).map(|_| env.staggered_reset()).collect();
        assert_eq!(ranges, vec![0..1, 1..2, 2..3, 3..4]);
        assert_eq!(env.step_number(), 0);
        assert_eq!(env.staggered_reset(), 0..1);
    }

    #[test]
    fn metrics_count_resets_since_last_step() {
        let mut env = MazeEnv::from_defs(unit_rooms(1), config(4)).unwrap();
        // Construction reset all four.
        assert_eq!(env.step(&[0; 4]).unwrap().instances_reset, 4);
        env.staggered_reset();
        env.staggered_reset();
        assert_eq!(env.step(&[0; 4]).unwrap().instances_reset, 2);
        assert_eq!(env.step(&[0; 4]).unwrap().instances_reset, 0);
    }

    #[test]
    fn overlap_costs_match_step_rewards() {
        let mut env = MazeEnv::from_defs(unit_rooms(6), config(8)).unwrap();
        env.step(&[3; 8]).unwrap();
        let costs = env.overlap_costs();
        let rewards = env.current_rewards();
        for (c, r) in costs.iter().zip(&rewards) {
            assert_eq!(-(*c as f32), *r);
        }
    }

    #[test]
    fn render_draws_current_layout() {
        let cfg = EnvConfig {
            map_width: 2,
            map_height: 2,
            ..config(1)
        };
        let mut env = MazeEnv::from_defs(unit_rooms(1), cfg).unwrap();
        let a = env.codec().encode(0, Displacement::new(1, 1)).unwrap();
        env.step(&[a]).unwrap();
        let mut r = TextRenderer::new();
        env.render(0, &mut r).unwrap();
        assert_eq!(r.output(), "..\n.0");
    }

    #[test]
    fn same_seed_same_trajectory() {
        let run = || {
            let mut env = MazeEnv::from_defs(unit_rooms(4), config(6)).unwrap();
            let mut out = Vec::new();
            for t in 0..10u32 {
                env.staggered_reset();
                let actions: Vec<u32> = (0..6).map(|e| (t * 7 + e * 3) % 32).collect();
                env.step(&actions).unwrap();
                out.push(snapshot(&env, 0));
            }
            out
        };
        assert_eq!(run(), run());
    }
}
