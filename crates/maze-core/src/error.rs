//! Error types for room catalog construction.

use std::error::Error;
use std::fmt;

use crate::id::RoomId;

/// Errors detected while populating a [`RoomCatalog`](crate::RoomCatalog).
///
/// All of these are fatal data errors: the catalog is built once and never
/// mutated, so there is nothing to retry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CatalogError {
    /// The catalog contains no rooms.
    EmptyCatalog,
    /// Two room definitions share the same ID.
    DuplicateRoomId {
        /// The repeated ID.
        room: RoomId,
    },
    /// A room's occupancy map has no rows or no columns.
    EmptyMap {
        /// The offending room.
        room: RoomId,
    },
    /// A row of a room's occupancy map has a different length than row 0.
    RaggedMap {
        /// The offending room.
        room: RoomId,
        /// Index of the mismatched row.
        row: usize,
        /// Width of row 0.
        expected: usize,
        /// Width of the mismatched row.
        found: usize,
    },
    /// A map cell holds something other than 0 or 1.
    InvalidMaskValue {
        /// The offending room.
        room: RoomId,
        /// Column of the cell.
        x: usize,
        /// Row of the cell.
        y: usize,
        /// The value found.
        value: u8,
    },
    /// A door tile lies outside the room's bounding box.
    DoorOutOfBounds {
        /// The offending room.
        room: RoomId,
        /// Column of the door tile.
        x: usize,
        /// Row of the door tile.
        y: usize,
    },
    /// A door tile lies on an unoccupied cell of the room.
    DoorOnEmptyTile {
        /// The offending room.
        room: RoomId,
        /// Column of the door tile.
        x: usize,
        /// Row of the door tile.
        y: usize,
    },
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyCatalog => write!(f, "room catalog is empty"),
            Self::DuplicateRoomId { room } => write!(f, "duplicate room id {room}"),
            Self::EmptyMap { room } => write!(f, "room {room}: occupancy map is empty"),
            Self::RaggedMap {
                room,
                row,
                expected,
                found,
            } => write!(
                f,
                "room {room}: row {row} has width {found}, expected {expected}"
            ),
            Self::InvalidMaskValue { room, x, y, value } => write!(
                f,
                "room {room}: cell ({x}, {y}) has value {value}, expected 0 or 1"
            ),
            Self::DoorOutOfBounds { room, x, y } => {
                write!(f, "room {room}: door at ({x}, {y}) is outside the room")
            }
            Self::DoorOnEmptyTile { room, x, y } => {
                write!(f, "room {room}: door at ({x}, {y}) is on an empty tile")
            }
        }
    }
}

impl Error for CatalogError {}
