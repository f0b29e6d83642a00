//! Overlap cost and reward.
//!
//! The cost of one instance is the occupancy beyond the first occupant,
//! summed over its canvas: `Σ max(count - 1, 0)`. Empty and singly
//! occupied cells cost nothing. Reward is the negated cost.

/// Reduces occupancy canvases to per-instance costs and rewards.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RewardEvaluator {
    cells: usize,
}

impl RewardEvaluator {
    /// Evaluator for canvases of `cells` cells per instance.
    pub fn new(cells: usize) -> Self {
        Self { cells }
    }

    /// Cells per instance canvas.
    pub fn cells(&self) -> usize {
        self.cells
    }

    /// Overlap cost of a single instance canvas.
    pub fn overlap_cost(canvas: &[u32]) -> u32 {
        canvas.iter().map(|&c| c.saturating_sub(1)).sum()
    }

    /// Score every instance of a batch canvas.
    ///
    /// # Panics
    ///
    /// Panics if `canvas.len() != costs.len() * cells` or
    /// `rewards.len() != costs.len()`.
    pub fn evaluate(&self, canvas: &[u32], costs: &mut [u32], rewards: &mut [f32]) {
        assert_eq!(canvas.len(), costs.len() * self.cells);
        assert_eq!(rewards.len(), costs.len());
        for ((instance, cost), reward) in canvas
            .chunks_exact(self.cells)
            .zip(costs.iter_mut())
            .zip(rewards.iter_mut())
        {
            *cost = Self::overlap_cost(instance);
            *reward = -(*cost as f32);
        }
    }
}
