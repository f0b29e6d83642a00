//! The immutable room catalog.
//!
//! [`RoomCatalog`] is populated once from a list of [`RoomDef`]s and then
//! only read. Rooms keep their declaration order, which is the room index
//! used by the engine's action encoding; lookup by [`RoomId`] is also
//! available for data tooling.

use indexmap::map::Entry;
use indexmap::IndexMap;

use crate::error::CatalogError;
use crate::id::RoomId;
use crate::room::{Room, RoomDef};

/// Ordered, validated collection of rooms.
#[derive(Clone, Debug)]
pub struct RoomCatalog {
    rooms: IndexMap<RoomId, Room>,
}

impl RoomCatalog {
    /// Populate every definition and collect them in declaration order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::EmptyCatalog`] for an empty list,
    /// [`CatalogError::DuplicateRoomId`] if two definitions share an ID, or
    /// the first per-room validation error.
    ///
    /// # Examples
    ///
    /// ```
    /// use maze_core::{Direction, RoomCatalog, RoomDef};
    ///
    /// let catalog = RoomCatalog::new(vec![
    ///     RoomDef::new(1, "hall", vec![vec![1, 1, 1]]).door(Direction::Left, 0, 0),
    ///     RoomDef::new(2, "shaft", vec![vec![1], vec![1]]),
    /// ])
    /// .unwrap();
    /// assert_eq!(catalog.len(), 2);
    /// assert_eq!(catalog.get(1).unwrap().height(), 2);
    /// ```
    pub fn new(defs: Vec<RoomDef>) -> Result<Self, CatalogError> {
        if defs.is_empty() {
            return Err(CatalogError::EmptyCatalog);
        }
        let mut rooms = IndexMap::with_capacity(defs.len());
        for def in defs {
            let room = Room::populate(def)?;
            match rooms.entry(room.id()) {
                Entry::Occupied(_) => {
                    return Err(CatalogError::DuplicateRoomId { room: room.id() });
                }
                Entry::Vacant(slot) => {
                    slot.insert(room);
                }
            }
        }
        Ok(Self { rooms })
    }

    /// Number of rooms.
    pub fn len(&self) -> usize {
        self.rooms.len()
    }

    /// Always `false`: construction rejects empty catalogs.
    pub fn is_empty(&self) -> bool {
        self.rooms.is_empty()
    }

    /// Room at declaration index `index`.
    pub fn get(&self, index: usize) -> Option<&Room> {
        self.rooms.get_index(index).map(|(_, room)| room)
    }

    /// Room with the given ID.
    pub fn by_id(&self, id: RoomId) -> Option<&Room> {
        self.rooms.get(&id)
    }

    /// Declaration index of the room with the given ID.
    pub fn index_of(&self, id: RoomId) -> Option<usize> {
        self.rooms.get_index_of(&id)
    }

    /// Iterate rooms in declaration order.
    pub fn iter(&self) -> impl ExactSizeIterator<Item = &Room> + '_ {
        self.rooms.values()
    }

    /// Widest room, in tiles.
    pub fn max_width(&self) -> usize {
        self.iter().map(Room::width).max().unwrap_or(0)
    }

    /// Tallest room, in tiles.
    pub fn max_height(&self) -> usize {
        self.iter().map(Room::height).max().unwrap_or(0)
    }
}
