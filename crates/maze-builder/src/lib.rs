//! Maze builder: a batched environment for learning room placement.
//!
//! This is the top-level facade crate that re-exports the public API of
//! the maze-builder sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use maze_builder::prelude::*;
//!
//! let rooms = vec![
//!     RoomDef::new(1, "corridor", vec![vec![1, 1, 1, 1]])
//!         .door(Direction::Left, 0, 0)
//!         .door(Direction::Right, 3, 0),
//!     RoomDef::new(2, "shaft", vec![vec![1], vec![1], vec![1]]).door(Direction::Up, 0, 0),
//!     RoomDef::new(3, "closet", vec![vec![1]]),
//! ];
//! let config = EnvConfig {
//!     map_width: 12,
//!     map_height: 8,
//!     action_radius: 2,
//!     num_envs: 8,
//!     history_size: 4,
//!     episode_length: 16,
//!     seed: 42,
//! };
//! let mut env = MazeEnv::from_defs(rooms, config).unwrap();
//!
//! for t in 0..32u32 {
//!     env.staggered_reset();
//!     let actions: Vec<u32> = (0..8).map(|e| (e * 5 + t) % env.num_actions()).collect();
//!     let metrics = env.step(&actions).unwrap();
//!     assert!(metrics.mean_reward <= 0.0);
//! }
//!
//! let mut text = TextRenderer::new();
//! env.render(0, &mut text).unwrap();
//! assert_eq!(text.output().lines().count(), 8);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `maze-core` | Rooms, doors, positions, the room catalog |
//! | [`engine`] | `maze-engine` | History, action codec, rasterizer, reward, resets, `MazeEnv` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Room definitions and the catalog (`maze-core`).
///
/// [`types::RoomDef`] describes a room; [`types::RoomCatalog`] validates
/// and owns the populated [`types::Room`]s.
pub use maze_core as types;

/// The batched environment and its components (`maze-engine`).
///
/// [`engine::MazeEnv`] ties together [`engine::StateHistory`],
/// [`engine::ActionCodec`], [`engine::MapRasterizer`],
/// [`engine::RewardEvaluator`] and [`engine::ResetScheduler`].
pub use maze_engine as engine;

/// Common imports for typical usage.
///
/// ```rust
/// use maze_builder::prelude::*;
/// ```
pub mod prelude {
    // Rooms
    pub use maze_core::{
        AreaTag, Direction, DoorIdentifier, Position, Room, RoomCatalog, RoomDef, RoomId,
    };

    // Errors
    pub use maze_core::CatalogError;
    pub use maze_engine::{ConfigError, EnvError};

    // Engine
    pub use maze_engine::{
        ActionCodec, Displacement, EnvConfig, MapRenderer, MazeEnv, RenderFrame, StepMetrics,
        TextRenderer,
    };
}
