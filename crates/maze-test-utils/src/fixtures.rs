//! Reusable room, catalog and config fixtures.
//!
//! - [`unit_room`]: a single occupied tile.
//! - [`rect_room`]: a fully occupied rectangle.
//! - [`ell_room`]: an L-shaped room with a door on each arm.
//! - [`unit_catalog`] / [`mixed_catalog`]: ready-made catalogs.
//! - [`small_config`]: a config that fits every fixture room.

use maze_core::{AreaTag, Direction, RoomCatalog, RoomDef};
use maze_engine::EnvConfig;

/// A 1×1 room.
pub fn unit_room(id: u32) -> RoomDef {
    RoomDef::new(id, format!("unit{id}"), vec![vec![1]])
}

/// A `width × height` room with every tile occupied.
pub fn rect_room(id: u32, width: usize, height: usize) -> RoomDef {
    RoomDef::new(id, format!("rect{id}"), vec![vec![1; width]; height])
}

/// A 3×3 L-shaped room:
///
/// ```text
/// X..
/// X..
/// XXX
/// ```
///
/// with an up door at `(0, 0)` and a right door at `(2, 2)`.
pub fn ell_room(id: u32) -> RoomDef {
    RoomDef::new(
        id,
        format!("ell{id}"),
        vec![vec![1, 0, 0], vec![1, 0, 0], vec![1, 1, 1]],
    )
    .door(Direction::Up, 0, 0)
    .door(Direction::Right, 2, 2)
    .area(AreaTag(1))
}

/// `n` unit rooms with ids `0..n`.
pub fn unit_catalog(n: u32) -> RoomCatalog {
    build((0..n).map(unit_room).collect())
}

/// One unit room, one 2×2 room, one 4×1 corridor and one L room.
pub fn mixed_catalog() -> RoomCatalog {
    build(vec![
        unit_room(0),
        rect_room(1, 2, 2),
        rect_room(2, 4, 1),
        ell_room(3),
    ])
}

fn build(defs: Vec<RoomDef>) -> RoomCatalog {
    match RoomCatalog::new(defs) {
        Ok(catalog) => catalog,
        Err(e) => panic!("fixture catalog rejected: {e}"),
    }
}

/// A 10×8 map, radius-1 actions, `num_envs` instances, history 4,
/// episode length 5, fixed seed.
pub fn small_config(num_envs: usize) -> EnvConfig {
    EnvConfig {
        map_width: 10,
        map_height: 8,
        action_radius: 1,
        num_envs,
        history_size: 4,
        episode_length: 5,
        seed: 0x5eed,
    }
}
