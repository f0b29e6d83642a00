//! Per-step timing and summary metrics.
//!
//! [`StepMetrics`] is returned by every successful
//! [`MazeEnv::step`](crate::MazeEnv::step) for telemetry and profiling.

/// Timing and summary values collected during a single step.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall-clock time for the whole step, in microseconds.
    pub total_us: u64,
    /// Time spent decoding actions and moving rooms, in microseconds.
    pub update_us: u64,
    /// Time spent rasterizing the batch, in microseconds.
    pub raster_us: u64,
    /// Time spent scoring canvases, in microseconds.
    pub reward_us: u64,
    /// Overlap cost summed over the batch.
    pub total_overlap: u64,
    /// Mean reward over the batch.
    pub mean_reward: f32,
    /// Instances reset since the previous step.
    pub instances_reset: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = StepMetrics::default();
        assert_eq!(m.total_us, 0);
        assert_eq!(m.update_us, 0);
        assert_eq!(m.raster_us, 0);
        assert_eq!(m.reward_us, 0);
        assert_eq!(m.total_overlap, 0);
        assert_eq!(m.mean_reward, 0.0);
        assert_eq!(m.instances_reset, 0);
    }
}
