//! Occupancy rasterization.
//!
//! Every room's occupancy mask is compiled once into a footprint: the
//! flat canvas offsets `dy * map_width + dx` of its set cells. Rasterizing
//! a batch then clears one canvas buffer and, room by room, scatter-adds
//! each footprint at every instance's translated base index. Counts
//! accumulate, so overlapping rooms raise a cell above 1, and the result
//! does not depend on room order.

use maze_core::{Position, RoomCatalog};

/// Rasterizes room positions into per-instance occupancy counts.
#[derive(Clone, Debug)]
pub struct MapRasterizer {
    map_width: usize,
    map_height: usize,
    num_envs: usize,
    footprints: Vec<Vec<usize>>,
    canvas: Vec<u32>,
}

impl MapRasterizer {
    /// Compile footprints for `catalog` on a `map_width × map_height` map
    /// and allocate a canvas for `num_envs` instances.
    ///
    /// Rooms are assumed to fit the map; see
    /// [`EnvConfig::validate_for`](crate::EnvConfig::validate_for).
    pub fn new(catalog: &RoomCatalog, map_width: usize, map_height: usize, num_envs: usize) -> Self {
        let footprints = catalog
            .iter()
            .map(|room| {
                room.map()
                    .iter_set()
                    .map(|(x, y)| y * map_width + x)
                    .collect()
            })
            .collect();
        Self {
            map_width,
            map_height,
            num_envs,
            footprints,
            canvas: vec![0; num_envs * map_width * map_height],
        }
    }

    /// Cells per instance canvas.
    pub fn cells(&self) -> usize {
        self.map_width * self.map_height
    }

    /// Map width.
    pub fn map_width(&self) -> usize {
        self.map_width
    }

    /// Map height.
    pub fn map_height(&self) -> usize {
        self.map_height
    }

    /// Number of rooms with a compiled footprint.
    pub fn num_rooms(&self) -> usize {
        self.footprints.len()
    }

    /// Canvas offsets of one room's set cells, relative to its top-left.
    pub fn footprint(&self, room: usize) -> Option<&[usize]> {
        self.footprints.get(room).map(Vec::as_slice)
    }

    /// Rebuild every instance canvas from `positions` (`[env][room]`).
    ///
    /// Precondition: every position keeps its room inside the map, which
    /// holds for positions clamped to the room's capacity.
    ///
    /// # Panics
    ///
    /// Panics if `positions.len() != num_envs * num_rooms`, or if a
    /// position places a room outside the canvas buffer.
    pub fn rasterize(&mut self, positions: &[Position]) {
        let n_rooms = self.footprints.len();
        assert_eq!(positions.len(), self.num_envs * n_rooms);

        let cells = self.cells();
        self.canvas.fill(0);
        for (room, footprint) in self.footprints.iter().enumerate() {
            for env in 0..self.num_envs {
                let pos = positions[env * n_rooms + room];
                debug_assert!(pos.x >= 0 && pos.y >= 0, "negative position {pos}");
                let base = env * cells + pos.y as usize * self.map_width + pos.x as usize;
                let dst = &mut self.canvas[base..];
                for &offset in footprint {
                    dst[offset] += 1;
                }
            }
        }
    }

    /// All canvases, `[env][y][x]` flattened.
    pub fn canvas(&self) -> &[u32] {
        &self.canvas
    }

    /// One instance canvas, `[y][x]` flattened.
    pub fn instance(&self, env: usize) -> Option<&[u32]> {
        let cells = self.cells();
        (env < self.num_envs).then(|| &self.canvas[env * cells..(env + 1) * cells])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use maze_core::RoomDef;

    fn catalog() -> RoomCatalog {
        RoomCatalog::new(vec![
            RoomDef::new(1, "unit", vec![vec![1]]),
            RoomDef::new(2, "ell", vec![vec![1, 0], vec![1, 1]]),
        ])
        .unwrap()
    }

    fn p(x: i32, y: i32) -> Position {
        Position::new(x, y)
    }

    #[test]
    fn footprints_use_map_stride() {
        let r = MapRasterizer::new(&catalog(), 5, 4, 1);
        assert_eq!(r.footprint(0).unwrap(), &[0]);
        assert_eq!(r.footprint(1).unwrap(), &[0, 5, 6]);
        assert!(r.footprint(2).is_none());
    }

    #[test]
    fn stamps_each_room_at_its_position() {
        let mut r = MapRasterizer::new(&catalog(), 4, 3, 1);
        r.rasterize(&[p(3, 0), p(1, 1)]);
        #[rustfmt::skip]
        let expected = [
            0, 0, 0, 1,
            0, 1, 0, 0,
            0, 1, 1, 0,
        ];
        assert_eq!(r.instance(0).unwrap(), &expected);
    }

    #[test]
    fn overlap_accumulates() {
        let mut r = MapRasterizer::new(&catalog(), 4, 3, 1);
        r.rasterize(&[p(1, 2), p(1, 1)]);
        assert_eq!(r.instance(0).unwrap()[2 * 4 + 1], 2);
        assert_eq!(r.instance(0).unwrap().iter().sum::<u32>(), 4);
    }

    #[test]
    fn instances_are_independent() {
        let mut r = MapRasterizer::new(&catalog(), 3, 3, 2);
        r.rasterize(&[p(0, 0), p(0, 0), p(2, 2), p(1, 1)]);
        let a = r.instance(0).unwrap();
        let b = r.instance(1).unwrap();
        assert_eq!(a[0], 2);
        assert_eq!(b[0], 0);
        assert_eq!(b[2 * 3 + 2], 2);
        assert_eq!(r.canvas().len(), 18);
        assert!(r.instance(2).is_none());
    }

    #[test]
    fn rebuild_clears_previous_layout() {
        let mut r = MapRasterizer::new(&catalog(), 3, 3, 1);
        r.rasterize(&[p(0, 0), p(0, 0)]);
        r.rasterize(&[p(2, 0), p(0, 1)]);
        assert_eq!(r.instance(0).unwrap()[0], 0);
        assert_eq!(r.instance(0).unwrap().iter().sum::<u32>(), 4);
    }

    #[test]
    fn room_order_does_not_matter() {
        let forward = catalog();
        let reversed = RoomCatalog::new(vec![
            RoomDef::new(2, "ell", vec![vec![1, 0], vec![1, 1]]),
            RoomDef::new(1, "unit", vec![vec![1]]),
        ])
        .unwrap();
        let mut a = MapRasterizer::new(&forward, 4, 4, 1);
        let mut b = MapRasterizer::new(&reversed, 4, 4, 1);
        a.rasterize(&[p(2, 3), p(1, 2)]);
        b.rasterize(&[p(1, 2), p(2, 3)]);
        assert_eq!(a.canvas(), b.canvas());
    }
}
