//! Benchmark profiles and reference data for maze-builder.
//!
//! - [`red_brinstar_rooms`]: twelve real room layouts with their doors.
//! - [`reference_profile`]: 40×20 map, radius-2 actions, the layout used
//!   for throughput measurements.
//! - [`stress_profile`]: same map with a large batch.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use maze_core::{AreaTag, CatalogError, Direction, RoomCatalog, RoomDef};
use maze_engine::EnvConfig;

const LEFT: Direction = Direction::Left;
const RIGHT: Direction = Direction::Right;
const UP: Direction = Direction::Up;

/// Area tag shared by every Red Brinstar room.
pub const RED_BRINSTAR: AreaTag = AreaTag(1);

/// Red Brinstar room definitions, in catalog order.
pub fn red_brinstar_rooms() -> Vec<RoomDef> {
    let column = |n: usize| vec![vec![1]; n];
    vec![
        RoomDef::new(66, "Red Tower", column(10))
            .door(LEFT, 0, 4)
            .door(LEFT, 0, 6)
            .door(LEFT, 0, 9)
            .door(RIGHT, 0, 0)
            .door(RIGHT, 0, 9),
        RoomDef::new(
            67,
            "Red Brinstar Fireflea Room",
            vec![vec![1; 8], vec![1, 1, 0, 0, 1, 1, 0, 0]],
        )
        .door(LEFT, 0, 0)
        .door(RIGHT, 7, 0),
        RoomDef::new(68, "X-Ray Scope Room", vec![vec![1, 1]]).door(RIGHT, 1, 0),
        RoomDef::new(69, "Bat Room", vec![vec![1, 1]])
            .door(LEFT, 0, 0)
            .door(RIGHT, 1, 0),
        RoomDef::new(70, "Below Spazer", vec![vec![1, 1], vec![1, 1]])
            .door(LEFT, 0, 1)
            .door(RIGHT, 1, 0)
            .door(RIGHT, 1, 1),
        RoomDef::new(71, "Spazer Room", column(1)).door(LEFT, 0, 0),
        RoomDef::new(74, "Hellway", vec![vec![1, 1, 1]])
            .door(LEFT, 0, 0)
            .door(RIGHT, 2, 0),
        RoomDef::new(
            75,
            "Caterpillar Room",
            vec![
                vec![1, 0, 0],
                vec![1, 0, 0],
                vec![1, 0, 0],
                vec![1, 1, 1],
                vec![1, 0, 0],
                vec![1, 0, 0],
                vec![1, 0, 0],
                vec![1, 0, 0],
            ],
        )
        .door(LEFT, 0, 3)
        .door(LEFT, 0, 5)
        .door(LEFT, 0, 7)
        .door(RIGHT, 2, 3)
        .door(RIGHT, 0, 4)
        .door(UP, 0, 0),
        RoomDef::new(76, "Alpha Power Bomb Room", vec![vec![1, 1, 1]]).door(RIGHT, 2, 0),
        RoomDef::new(77, "Beta Power Bomb Room", vec![vec![1, 1], vec![1, 0]])
            .door(RIGHT, 1, 0),
        RoomDef::new(320, "Caterpillar Save Room", column(1)).door(LEFT, 0, 0),
        RoomDef::new(319, "Sloaters Refill", column(1)).door(RIGHT, 0, 0),
    ]
    .into_iter()
    .map(|def| def.area(RED_BRINSTAR))
    .collect()
}

/// Populate [`red_brinstar_rooms`] into a catalog.
pub fn red_brinstar_catalog() -> Result<RoomCatalog, CatalogError> {
    RoomCatalog::new(red_brinstar_rooms())
}

/// Reference profile: 40×20 map, radius 2, history 5, episode length 100.
pub fn reference_profile(num_envs: usize, seed: u64) -> EnvConfig {
    EnvConfig {
        map_width: 40,
        map_height: 20,
        action_radius: 2,
        num_envs,
        history_size: 5,
        episode_length: 100,
        seed,
    }
}

/// Stress profile: [`reference_profile`] with 4096 instances.
pub fn stress_profile(seed: u64) -> EnvConfig {
    reference_profile(4096, seed)
}
