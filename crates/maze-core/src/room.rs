//! Room definitions and their derived occupancy/door masks.
//!
//! A [`RoomDef`] is the raw data table entry: an occupancy map written as
//! rows (`map[y][x]`) and a list of [`DoorIdentifier`]s. [`Room::populate`]
//! validates the definition and derives the binary [`Mask`]s the engine
//! and renderers consume.

use smallvec::SmallVec;

use crate::error::CatalogError;
use crate::id::{AreaTag, RoomId};

/// Side of a room tile on which a door opens.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    /// Door on the left edge of its tile.
    Left = 0,
    /// Door on the right edge of its tile.
    Right = 1,
    /// Door on the bottom edge of its tile.
    Down = 2,
    /// Door on the top edge of its tile.
    Up = 3,
}

impl Direction {
    /// All directions, in door-mask order.
    pub const ALL: [Direction; 4] = [
        Direction::Left,
        Direction::Right,
        Direction::Down,
        Direction::Up,
    ];

    /// Index of this direction's mask in [`Room::door_masks`].
    pub fn index(self) -> usize {
        self as usize
    }
}

/// A door opening: which tile of the room it sits on and which side it
/// faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct DoorIdentifier {
    /// Side of the tile the door opens on.
    pub direction: Direction,
    /// Column of the door tile within the room.
    pub x: usize,
    /// Row of the door tile within the room.
    pub y: usize,
}

/// Inline storage for a room's doors; most rooms have four or fewer.
pub type DoorList = SmallVec<[DoorIdentifier; 4]>;

/// A raw room definition, before validation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RoomDef {
    /// Room identifier from the source data.
    pub room_id: RoomId,
    /// Human-readable room name.
    pub name: String,
    /// Occupancy rows, `map[y][x]`, each cell 0 or 1.
    pub map: Vec<Vec<u8>>,
    /// Door openings.
    pub doors: DoorList,
    /// Opaque area tag, passed through to renderers.
    pub area: AreaTag,
}

impl RoomDef {
    /// Start a definition with the given occupancy rows and no doors.
    pub fn new(room_id: impl Into<RoomId>, name: impl Into<String>, map: Vec<Vec<u8>>) -> Self {
        Self {
            room_id: room_id.into(),
            name: name.into(),
            map,
            doors: DoorList::new(),
            area: AreaTag::default(),
        }
    }

    /// Add a door at tile `(x, y)` facing `direction`.
    pub fn door(mut self, direction: Direction, x: usize, y: usize) -> Self {
        self.doors.push(DoorIdentifier { direction, x, y });
        self
    }

    /// Set the area tag.
    pub fn area(mut self, area: AreaTag) -> Self {
        self.area = area;
        self
    }
}

/// A dense, row-major binary mask of `width × height` cells.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Mask {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Mask {
    /// An all-zero mask.
    pub fn zeros(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Mask width (columns).
    pub fn width(&self) -> usize {
        self.width
    }

    /// Mask height (rows).
    pub fn height(&self) -> usize {
        self.height
    }

    /// Value at `(x, y)`, or `None` outside the mask.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x < self.width && y < self.height {
            Some(self.cells[y * self.width + x])
        } else {
            None
        }
    }

    /// Whether `(x, y)` is set. Out-of-range cells are unset.
    pub fn is_set(&self, x: usize, y: usize) -> bool {
        self.get(x, y) == Some(1)
    }

    /// Number of set cells.
    pub fn count_set(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Iterate `(x, y)` of every set cell in row-major order.
    pub fn iter_set(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let width = self.width;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(move |(i, _)| (i % width, i / width))
    }

    /// Row-major cell slice.
    pub fn as_slice(&self) -> &[u8] {
        &self.cells
    }

    fn set(&mut self, x: usize, y: usize) {
        self.cells[y * self.width + x] = 1;
    }
}

/// A validated room with its derived masks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Room {
    id: RoomId,
    name: String,
    area: AreaTag,
    map: Mask,
    doors: DoorList,
    door_masks: [Mask; 4],
}

impl Room {
    /// Validate a definition and derive its occupancy and door masks.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError`] if the map is empty or ragged, holds a value
    /// other than 0/1, or a door sits outside the room or on an empty tile.
    pub fn populate(def: RoomDef) -> Result<Self, CatalogError> {
        let room = def.room_id;
        let height = def.map.len();
        let width = def.map.first().map_or(0, Vec::len);
        if width == 0 || height == 0 {
            return Err(CatalogError::EmptyMap { room });
        }

        let mut map = Mask::zeros(width, height);
        for (y, row) in def.map.iter().enumerate() {
            if row.len() != width {
                return Err(CatalogError::RaggedMap {
                    room,
                    row: y,
                    expected: width,
                    found: row.len(),
                });
            }
            for (x, &value) in row.iter().enumerate() {
                match value {
                    0 => {}
                    1 => map.set(x, y),
                    _ => return Err(CatalogError::InvalidMaskValue { room, x, y, value }),
                }
            }
        }

        let mut door_masks = [
            Mask::zeros(width, height),
            Mask::zeros(width, height),
            Mask::zeros(width, height),
            Mask::zeros(width, height),
        ];
        for door in &def.doors {
            let (x, y) = (door.x, door.y);
            if x >= width || y >= height {
                return Err(CatalogError::DoorOutOfBounds { room, x, y });
            }
            if !map.is_set(x, y) {
                return Err(CatalogError::DoorOnEmptyTile { room, x, y });
            }
            door_masks[door.direction.index()].set(x, y);
        }

        Ok(Self {
            id: room,
            name: def.name,
            area: def.area,
            map,
            doors: def.doors,
            door_masks,
        })
    }

    /// Room identifier.
    pub fn id(&self) -> RoomId {
        self.id
    }

    /// Room name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Opaque area tag.
    pub fn area(&self) -> AreaTag {
        self.area
    }

    /// Width in tiles.
    pub fn width(&self) -> usize {
        self.map.width()
    }

    /// Height in tiles.
    pub fn height(&self) -> usize {
        self.map.height()
    }

    /// Occupancy mask.
    pub fn map(&self) -> &Mask {
        &self.map
    }

    /// Door openings as declared.
    pub fn doors(&self) -> &[DoorIdentifier] {
        &self.doors
    }

    /// Door mask for one direction.
    pub fn door_mask(&self, direction: Direction) -> &Mask {
        &self.door_masks[direction.index()]
    }

    /// All four door masks, indexed by [`Direction::index`].
    pub fn door_masks(&self) -> &[Mask; 4] {
        &self.door_masks
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fireflea() -> RoomDef {
        RoomDef::new(
            67,
            "Red Brinstar Fireflea Room",
            vec![vec![1, 1, 1, 1, 1, 1, 1, 1], vec![1, 1, 0, 0, 1, 1, 0, 0]],
        )
        .door(Direction::Left, 0, 0)
        .door(Direction::Right, 7, 0)
    }

    #[test]
    fn populate_derives_dimensions_and_masks() {
        let room = Room::populate(fireflea()).unwrap();
        assert_eq!(room.width(), 8);
        assert_eq!(room.height(), 2);
        assert_eq!(room.map().count_set(), 12);
        assert!(!room.map().is_set(2, 1));

        let left = room.door_mask(Direction::Left);
        assert_eq!(left.iter_set().collect::<Vec<_>>(), vec![(0, 0)]);
        let right = room.door_mask(Direction::Right);
        assert_eq!(right.iter_set().collect::<Vec<_>>(), vec![(7, 0)]);
        assert_eq!(room.door_mask(Direction::Up).count_set(), 0);
        assert_eq!(room.door_mask(Direction::Down).count_set(), 0);
    }

    #[test]
    fn door_masks_share_room_dimensions() {
        let room = Room::populate(fireflea()).unwrap();
        for mask in room.door_masks() {
            assert_eq!((mask.width(), mask.height()), (8, 2));
        }
    }

    #[test]
    fn iter_set_is_row_major() {
        let def = RoomDef::new(1, "corner", vec![vec![0, 1], vec![1, 1]]);
        let room = Room::populate(def).unwrap();
        let cells: Vec<_> = room.map().iter_set().collect();
        assert_eq!(cells, vec![(1, 0), (0, 1), (1, 1)]);
    }

    #[test]
    fn empty_map_rejected() {
        let err = Room::populate(RoomDef::new(3, "void", vec![])).unwrap_err();
        assert_eq!(err, CatalogError::EmptyMap { room: RoomId(3) });
        let err = Room::populate(RoomDef::new(3, "void", vec![vec![]])).unwrap_err();
        assert_eq!(err, CatalogError::EmptyMap { room: RoomId(3) });
    }

    #[test]
    fn ragged_map_rejected() {
        let def = RoomDef::new(4, "ragged", vec![vec![1, 1], vec![1]]);
        let err = Room::populate(def).unwrap_err();
        assert!(matches!(
            err,
            CatalogError::RaggedMap {
                row: 1,
                expected: 2,
                found: 1,
                ..
            }
        ));
    }

    #[test]
    fn non_binary_cell_rejected() {
        let def = RoomDef::new(5, "bad", vec![vec![1, 2]]);
        let err = Room::populate(def).unwrap_err();
        assert_eq!(
            err,
            CatalogError::InvalidMaskValue {
                room: RoomId(5),
                x: 1,
                y: 0,
                value: 2
            }
        );
    }

    #[test]
    fn door_outside_room_rejected() {
        let def = RoomDef::new(6, "tiny", vec![vec![1]]).door(Direction::Up, 0, 1);
        let err = Room::populate(def).unwrap_err();
        assert!(matches!(err, CatalogError::DoorOutOfBounds { x: 0, y: 1, .. }));
    }

    #[test]
    fn door_on_empty_tile_rejected() {
        let def = RoomDef::new(7, "gap", vec![vec![1, 0]]).door(Direction::Right, 1, 0);
        let err = Room::populate(def).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("empty tile"), "got: {msg}");
    }
}
