//! Environment configuration, validation, and error types.
//!
//! [`EnvConfig`] holds the batch shape and map geometry for a
//! [`MazeEnv`](crate::MazeEnv). [`validate()`](EnvConfig::validate) checks
//! the scalar invariants; [`validate_for()`](EnvConfig::validate_for)
//! additionally checks that every room of a catalog has room to move.

use std::error::Error;
use std::fmt;

use maze_core::{CatalogError, RoomCatalog, RoomId};

use crate::codec::ActionCodec;

// ── Axis ───────────────────────────────────────────────────────────

/// Map axis, used to report which capacity was violated.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    /// Width axis (columns).
    X,
    /// Height axis (rows).
    Y,
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Axis::X => write!(f, "x"),
            Axis::Y => write!(f, "y"),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating an [`EnvConfig`] against a catalog.
///
/// All of these are fatal: an environment is never built from a config
/// that fails validation.
#[derive(Debug, PartialEq)]
pub enum ConfigError {
    /// The room catalog failed to populate.
    Catalog(CatalogError),
    /// A room does not leave a strictly positive capacity on some axis.
    RoomTooLarge {
        /// The offending room.
        room: RoomId,
        /// Axis on which the room does not fit.
        axis: Axis,
        /// Room extent on that axis.
        room_extent: usize,
        /// Map extent on that axis.
        map_extent: u32,
    },
    /// `num_envs` is zero.
    NoEnvs,
    /// `history_size` is below the minimum of 2.
    HistoryTooSmall {
        /// The configured size that was too small.
        configured: usize,
    },
    /// `episode_length` is zero.
    ZeroEpisodeLength,
    /// `action_radius` is zero, which leaves no legal actions.
    ZeroActionRadius,
    /// A map dimension is zero or exceeds `i32::MAX`.
    InvalidMapSize {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// `num_rooms * actions_per_room` does not fit in a `u32`.
    ActionSpaceOverflow {
        /// Configured action radius.
        action_radius: u32,
        /// Number of rooms in the catalog.
        num_rooms: usize,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Catalog(e) => write!(f, "catalog: {e}"),
            Self::RoomTooLarge {
                room,
                axis,
                room_extent,
                map_extent,
            } => write!(
                f,
                "room {room} has {axis}-extent {room_extent}, \
                 map {axis}-extent {map_extent} leaves no capacity"
            ),
            Self::NoEnvs => write!(f, "num_envs must be at least 1"),
            Self::HistoryTooSmall { configured } => {
                write!(f, "history_size {configured} is below minimum of 2")
            }
            Self::ZeroEpisodeLength => write!(f, "episode_length must be at least 1"),
            Self::ZeroActionRadius => write!(f, "action_radius must be at least 1"),
            Self::InvalidMapSize { width, height } => {
                write!(f, "map size {width}x{height} must be nonzero and fit in i32")
            }
            Self::ActionSpaceOverflow {
                action_radius,
                num_rooms,
            } => write!(
                f,
                "action space for radius {action_radius} and {num_rooms} rooms overflows u32"
            ),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Catalog(e) => Some(e),
            _ => None,
        }
    }
}

impl From<CatalogError> for ConfigError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

// ── EnvConfig ──────────────────────────────────────────────────────

/// Batch shape and map geometry for a [`MazeEnv`](crate::MazeEnv).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    /// Map width in tiles. Default: 40.
    pub map_width: u32,
    /// Map height in tiles. Default: 20.
    pub map_height: u32,
    /// Maximum per-axis displacement of a single action. Default: 2.
    pub action_radius: u32,
    /// Number of independent instances in the batch. Default: 16.
    pub num_envs: usize,
    /// Number of history slots kept per instance (minimum 2). Default: 5.
    pub history_size: usize,
    /// Steps per episode; one `1/episode_length` slice of the batch is
    /// reset per staggered reset. Default: 100.
    pub episode_length: usize,
    /// Seed for the reset position RNG. Default: 0.
    pub seed: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            map_width: 40,
            map_height: 20,
            action_radius: 2,
            num_envs: 16,
            history_size: 5,
            episode_length: 100,
            seed: 0,
        }
    }
}

impl EnvConfig {
    /// Check the catalog-independent invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_envs == 0 {
            return Err(ConfigError::NoEnvs);
        }
        if self.history_size < 2 {
            return Err(ConfigError::HistoryTooSmall {
                configured: self.history_size,
            });
        }
        if self.episode_length == 0 {
            return Err(ConfigError::ZeroEpisodeLength);
        }
        if self.action_radius == 0 {
            return Err(ConfigError::ZeroActionRadius);
        }
        let max = i32::MAX as u32;
        if self.map_width == 0
            || self.map_height == 0
            || self.map_width > max
            || self.map_height > max
        {
            return Err(ConfigError::InvalidMapSize {
                width: self.map_width,
                height: self.map_height,
            });
        }
        Ok(())
    }

    /// Check every invariant, including per-room capacities.
    ///
    /// A room of width `w` and height `h` needs
    /// `map_width - w > 0` and `map_height - h > 0`.
    pub fn validate_for(&self, catalog: &RoomCatalog) -> Result<(), ConfigError> {
        self.validate()?;
        if ActionCodec::checked_num_actions(self.action_radius, catalog.len()).is_none() {
            return Err(ConfigError::ActionSpaceOverflow {
                action_radius: self.action_radius,
                num_rooms: catalog.len(),
            });
        }
        for room in catalog.iter() {
            let checks = [
                (Axis::X, room.width(), self.map_width),
                (Axis::Y, room.height(), self.map_height),
            ];
            for (axis, room_extent, map_extent) in checks {
                if room_extent >= map_extent as usize {
                    return Err(ConfigError::RoomTooLarge {
                        room: room.id(),
                        axis,
                        room_extent,
                        map_extent,
                    });
                }
            }
        }
        Ok(())
    }

    /// Cells per instance canvas.
    pub fn cells(&self) -> usize {
        self.map_width as usize * self.map_height as usize
    }
}
