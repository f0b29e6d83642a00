//! Batched room-placement environment.
//!
//! [`MazeEnv`] owns `num_envs` independent layouts of the same room
//! catalog and advances them together. Each step decodes one flat action
//! per instance into a (room, displacement) pair, moves that room with
//! clamping, rasterizes every room into a per-instance occupancy canvas,
//! and scores the overlap. A rolling per-instance history records
//! positions, actions, rewards and validity for the learning loop.
//!
//! The pieces are usable on their own:
//!
//! - [`StateHistory`]: fixed-depth rolling history with a shared ring head.
//! - [`ActionCodec`]: bijective flat-action encoding that skips the zero
//!   displacement.
//! - [`MapRasterizer`]: scatter-add of precompiled room footprints.
//! - [`RewardEvaluator`]: overlap cost and reward.
//! - [`ResetScheduler`]: seeded position sampling and staggered reset
//!   slices.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod codec;
pub mod config;
pub mod env;
pub mod history;
pub mod metrics;
pub mod raster;
pub mod render;
pub mod reset;
pub mod reward;

pub use codec::{ActionCodec, DecodedAction, Displacement};
pub use config::{Axis, ConfigError, EnvConfig};
pub use env::{EnvError, MazeEnv};
pub use history::StateHistory;
pub use metrics::StepMetrics;
pub use raster::MapRasterizer;
pub use render::{MapRenderer, RenderFrame, TextRenderer};
pub use reset::ResetScheduler;
pub use reward::RewardEvaluator;
