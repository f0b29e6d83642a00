//! Fixed-depth rolling history shared by every instance of the batch.
//!
//! [`StateHistory`] stores one flat buffer per quantity, indexed
//! `[instance, physical_slot, room]`. All instances shift in lockstep, so a
//! single batch-wide ring head maps logical slots to physical ones:
//! logical slot `k` lives at physical slot `(head + k) % history_size`.
//! Shifting moves the head back one slot and costs O(1); the slot that
//! becomes logical 0 previously held the oldest entry, which is discarded
//! when [`write`](StateHistory::write) overwrites it.
//!
//! Mutation goes through three whole-batch or whole-range entry points:
//! [`shift`](StateHistory::shift), [`write`](StateHistory::write) and
//! [`reset_range`](StateHistory::reset_range). Nothing is allocated after
//! construction.

use maze_core::Position;

/// Per-instance rolling history of positions, actions, rewards and
/// validity. Slot 0 is the most recent entry.
#[derive(Clone, Debug)]
pub struct StateHistory {
    num_envs: usize,
    history_size: usize,
    num_rooms: usize,
    head: usize,
    positions: Vec<Position>,
    actions: Vec<u32>,
    rewards: Vec<f32>,
    valid: Vec<bool>,
}

impl StateHistory {
    /// Allocate a zeroed history. Every slot starts invalid.
    ///
    /// # Panics
    ///
    /// Panics if `history_size < 2`.
    pub fn new(num_envs: usize, history_size: usize, num_rooms: usize) -> Self {
        assert!(
            history_size >= 2,
            "StateHistory size must be >= 2, got {history_size}"
        );
        let slots = num_envs * history_size;
        Self {
            num_envs,
            history_size,
            num_rooms,
            head: 0,
            positions: vec![Position::default(); slots * num_rooms],
            actions: vec![0; slots],
            rewards: vec![0.0; slots],
            valid: vec![false; slots],
        }
    }

    /// Number of instances.
    pub fn num_envs(&self) -> usize {
        self.num_envs
    }

    /// Slots kept per instance.
    pub fn history_size(&self) -> usize {
        self.history_size
    }

    /// Rooms per position entry.
    pub fn num_rooms(&self) -> usize {
        self.num_rooms
    }

    fn physical(&self, slot: usize) -> usize {
        (self.head + slot) % self.history_size
    }

    fn row(&self, env: usize, slot: usize) -> usize {
        env * self.history_size + self.physical(slot)
    }

    fn in_range(&self, env: usize, slot: usize) -> bool {
        env < self.num_envs && slot < self.history_size
    }

    /// Move every instance's history one slot older.
    ///
    /// The entry previously at the oldest slot becomes slot 0 and is
    /// stale until the following [`write`](Self::write).
    pub fn shift(&mut self) {
        self.head = (self.head + self.history_size - 1) % self.history_size;
    }

    /// Overwrite slot 0 of every instance and mark it valid.
    ///
    /// `positions` is `[env][room]`, `actions` and `rewards` are `[env]`.
    ///
    /// # Panics
    ///
    /// Panics if any slice length does not match the batch shape.
    pub fn write(&mut self, positions: &[Position], actions: &[u32], rewards: &[f32]) {
        assert_eq!(positions.len(), self.num_envs * self.num_rooms);
        assert_eq!(actions.len(), self.num_envs);
        assert_eq!(rewards.len(), self.num_envs);

        let n_rooms = self.num_rooms;
        for env in 0..self.num_envs {
            let row = self.row(env, 0);
            self.positions[row * n_rooms..(row + 1) * n_rooms]
                .copy_from_slice(&positions[env * n_rooms..(env + 1) * n_rooms]);
            self.actions[row] = actions[env];
            self.rewards[row] = rewards[env];
            self.valid[row] = true;
        }
    }

    /// Install fresh slot-0 positions for instances `[start, end)` and
    /// invalidate every slot of those instances.
    ///
    /// `positions` is `[env - start][room]`. The synthetic slot 0 gets
    /// action 0 and reward 0.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`, `end > num_envs`, or `positions` does not
    /// hold `(end - start) * num_rooms` entries.
    pub fn reset_range(&mut self, start: usize, end: usize, positions: &[Position]) {
        assert!(start <= end && end <= self.num_envs, "bad reset range {start}..{end}");
        assert_eq!(positions.len(), (end - start) * self.num_rooms);

        let n_rooms = self.num_rooms;
        let h = self.history_size;
        self.valid[start * h..end * h].fill(false);
        for (i, env) in (start..end).enumerate() {
            let row = self.row(env, 0);
            self.positions[row * n_rooms..(row + 1) * n_rooms]
                .copy_from_slice(&positions[i * n_rooms..(i + 1) * n_rooms]);
            self.actions[row] = 0;
            self.rewards[row] = 0.0;
        }
    }

    /// Room positions of one instance at one slot.
    pub fn positions(&self, env: usize, slot: usize) -> Option<&[Position]> {
        if !self.in_range(env, slot) {
            return None;
        }
        let row = self.row(env, slot);
        Some(&self.positions[row * self.num_rooms..(row + 1) * self.num_rooms])
    }

    /// Action recorded at one slot.
    pub fn action(&self, env: usize, slot: usize) -> Option<u32> {
        self.in_range(env, slot)
            .then(|| self.actions[self.row(env, slot)])
    }

    /// Reward recorded at one slot.
    pub fn reward(&self, env: usize, slot: usize) -> Option<f32> {
        self.in_range(env, slot)
            .then(|| self.rewards[self.row(env, slot)])
    }

    /// Whether one slot holds a real transition.
    pub fn valid(&self, env: usize, slot: usize) -> Option<bool> {
        self.in_range(env, slot).then(|| self.valid[self.row(env, slot)])
    }

    /// Copy slot-0 positions of every instance into `out` (`[env][room]`).
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != num_envs * num_rooms`.
    pub fn copy_current_positions(&self, out: &mut [Position]) {
        assert_eq!(out.len(), self.num_envs * self.num_rooms);
        let n_rooms = self.num_rooms;
        for env in 0..self.num_envs {
            let row = self.row(env, 0);
            out[env * n_rooms..(env + 1) * n_rooms]
                .copy_from_slice(&self.positions[row * n_rooms..(row + 1) * n_rooms]);
        }
    }

    /// Rewards of one instance, newest first.
    pub fn reward_history(&self, env: usize) -> Option<Vec<f32>> {
        (env < self.num_envs).then(|| {
            (0..self.history_size)
                .map(|slot| self.rewards[self.row(env, slot)])
                .collect()
        })
    }

    /// Validity of one instance, newest first.
    pub fn valid_history(&self, env: usize) -> Option<Vec<bool>> {
        (env < self.num_envs).then(|| {
            (0..self.history_size)
                .map(|slot| self.valid[self.row(env, slot)])
                .collect()
        })
    }

    /// Slot-0 reward of every instance.
    pub fn current_rewards(&self) -> Vec<f32> {
        (0..self.num_envs)
            .map(|env| self.rewards[self.row(env, 0)])
            .collect()
    }

    /// Slot-0 validity of every instance.
    pub fn current_valid(&self) -> Vec<bool> {
        (0..self.num_envs)
            .map(|env| self.valid[self.row(env, 0)])
            .collect()
    }
}
