//! Strongly-typed identifiers and the [`Position`] pair.

use std::fmt;

/// Identifies a room in the catalog.
///
/// Room IDs come from the room data and are not required to be dense;
/// the catalog keeps rooms in declaration order and maps IDs to that order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RoomId(pub u32);

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for RoomId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Opaque area/category tag attached to each room.
///
/// The engine never interprets this value. Renderers use it to pick a
/// colour or glyph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AreaTag(pub u8);

impl fmt::Display for AreaTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Top-left placement of a room on the map.
///
/// `x` indexes map columns (the width axis) and `y` indexes map rows
/// (the height axis). A room of size `w × h` at `(x, y)` covers the cells
/// `[x, x + w) × [y, y + h)`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    /// Column of the room's left edge.
    pub x: i32,
    /// Row of the room's top edge.
    pub y: i32,
}

impl Position {
    /// Create a position from its components.
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Translate by `(dx, dy)` and clamp each axis into `[0, cap]`.
    pub fn offset_clamped(self, dx: i32, dy: i32, cap_x: i32, cap_y: i32) -> Self {
        Self {
            x: self.x.saturating_add(dx).clamp(0, cap_x),
            y: self.y.saturating_add(dy).clamp(0, cap_y),
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}
