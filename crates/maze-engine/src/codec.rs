//! Flat action encoding.
//!
//! Each room owns a `side × side` window of displacements centred on
//! `(0, 0)`, where `side = 2 * radius + 1`. The centre cell is not a
//! legal action, so a room has `side² - 1` actions and the flat action
//! space is `num_rooms * (side² - 1)` dense integers.
//!
//! Decoding re-inserts the gap left by the centre cell: local actions at
//! or past `(side² - 1) / 2` are shifted up by one before being split into
//! `(dx, dy)`. Encoding removes it again.

/// A nonzero room displacement in tiles.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Displacement {
    /// Horizontal offset.
    pub dx: i32,
    /// Vertical offset.
    pub dy: i32,
}

impl Displacement {
    /// Create a displacement.
    pub const fn new(dx: i32, dy: i32) -> Self {
        Self { dx, dy }
    }
}

/// A flat action split into its room and displacement.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodedAction {
    /// Index of the room in catalog order.
    pub room: usize,
    /// Displacement to apply.
    pub displacement: Displacement,
}

/// Bijection between flat actions and `(room, displacement)` pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ActionCodec {
    radius: u32,
    side: u32,
    actions_per_room: u32,
    num_rooms: u32,
}

impl ActionCodec {
    /// Total action count for `radius` and `num_rooms`, or `None` if it
    /// does not fit in a `u32`.
    pub fn checked_num_actions(radius: u32, num_rooms: usize) -> Option<u32> {
        let side = radius.checked_mul(2)?.checked_add(1)?;
        let per_room = side.checked_mul(side)? - 1;
        per_room.checked_mul(u32::try_from(num_rooms).ok()?)
    }

    /// Create a codec.
    ///
    /// # Panics
    ///
    /// Panics if `radius` is zero or the action space overflows `u32`
    /// (see [`checked_num_actions`](Self::checked_num_actions)).
    /// [`EnvConfig::validate_for`](crate::EnvConfig::validate_for) rejects
    /// both cases before an environment builds its codec.
    pub fn new(radius: u32, num_rooms: usize) -> Self {
        assert!(radius > 0, "action radius must be at least 1");
        let num_actions = Self::checked_num_actions(radius, num_rooms);
        assert!(
            num_actions.is_some(),
            "action space for radius {radius} and {num_rooms} rooms overflows u32"
        );
        let side = 2 * radius + 1;
        Self {
            radius,
            side,
            actions_per_room: side * side - 1,
            num_rooms: num_rooms as u32,
        }
    }

    /// Maximum absolute displacement per axis.
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Width of the displacement window, `2 * radius + 1`.
    pub fn side(&self) -> u32 {
        self.side
    }

    /// Actions per room, `side² - 1`.
    pub fn actions_per_room(&self) -> u32 {
        self.actions_per_room
    }

    /// Number of rooms covered by the flat action space.
    pub fn num_rooms(&self) -> usize {
        self.num_rooms as usize
    }

    /// Size of the flat action space.
    pub fn num_actions(&self) -> u32 {
        self.actions_per_room * self.num_rooms
    }

    /// Whether `action` lies in `[0, num_actions)`.
    pub fn contains(&self, action: u32) -> bool {
        action < self.num_actions()
    }

    /// Linear index of the excluded zero displacement in the full window.
    fn centre(&self) -> u32 {
        (self.side * self.side - 1) / 2
    }

    /// Decode a per-room action in `[0, actions_per_room)`.
    ///
    /// Precondition: `local < actions_per_room`. Larger values decode to
    /// displacements outside the window.
    pub fn decode_local(&self, local: u32) -> Displacement {
        debug_assert!(local < self.actions_per_room);
        let uncompressed = if local >= self.centre() {
            local + 1
        } else {
            local
        };
        let r = self.radius as i32;
        Displacement {
            dx: (uncompressed % self.side) as i32 - r,
            dy: (uncompressed / self.side) as i32 - r,
        }
    }

    /// Encode a displacement as a per-room action.
    ///
    /// Returns `None` for `(0, 0)` or anything outside the window.
    pub fn encode_local(&self, displacement: Displacement) -> Option<u32> {
        let r = self.radius as i32;
        let ux = displacement.dx.checked_add(r)?;
        let uy = displacement.dy.checked_add(r)?;
        let side = self.side as i32;
        if !(0..side).contains(&ux) || !(0..side).contains(&uy) {
            return None;
        }
        let uncompressed = (uy * side + ux) as u32;
        let centre = self.centre();
        match uncompressed.cmp(&centre) {
            std::cmp::Ordering::Less => Some(uncompressed),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(uncompressed - 1),
        }
    }

    /// Decode a flat action.
    ///
    /// Precondition: `action < num_actions()`. The environment checks
    /// this for every action before decoding a batch.
    pub fn decode(&self, action: u32) -> DecodedAction {
        debug_assert!(self.contains(action));
        DecodedAction {
            room: (action / self.actions_per_room) as usize,
            displacement: self.decode_local(action % self.actions_per_room),
        }
    }

    /// Encode a `(room, displacement)` pair as a flat action.
    ///
    /// Returns `None` if the room index is out of range or the
    /// displacement is not a legal action.
    pub fn encode(&self, room: usize, displacement: Displacement) -> Option<u32> {
        if room >= self.num_rooms() {
            return None;
        }
        let local = self.encode_local(displacement)?;
        Some(room as u32 * self.actions_per_room + local)
    }

    /// Decode a whole batch into `out`, one entry per action.
    ///
    /// # Panics
    ///
    /// Panics if `out.len() != actions.len()`.
    pub fn decode_batch(&self, actions: &[u32], out: &mut [DecodedAction]) {
        assert_eq!(actions.len(), out.len(), "decode_batch length mismatch");
        for (slot, &action) in out.iter_mut().zip(actions) {
            *slot = self.decode(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashSet;

    #[test]
    fn radius_one_has_eight_actions() {
        let codec = ActionCodec::new(1, 3);
        assert_eq!(codec.side(), 3);
        assert_eq!(codec.actions_per_room(), 8);
        assert_eq!(codec.num_actions(), 24);
    }

    #[test]
    fn radius_one_decodes_each_neighbour_once() {
        let codec = ActionCodec::new(1, 1);
        let seen: Vec<_> = (0..8).map(|a| codec.decode(a)).collect();
        assert!(seen.iter().all(|d| d.room == 0));
        let offsets: HashSet<_> = seen
            .iter()
            .map(|d| (d.displacement.dx, d.displacement.dy))
            .collect();
        let expected: HashSet<_> = (-1..=1)
            .flat_map(|dy| (-1..=1).map(move |dx| (dx, dy)))
            .filter(|&o| o != (0, 0))
            .collect();
        assert_eq!(offsets, expected);
        assert_eq!(offsets.len(), 8);
    }

    #[test]
    fn decode_order_skips_centre() {
        let codec = ActionCodec::new(1, 1);
        assert_eq!(codec.decode_local(0), Displacement::new(-1, -1));
        assert_eq!(codec.decode_local(3), Displacement::new(-1, 0));
        // Local 4 would have been the centre; it now means (+1, 0).
        assert_eq!(codec.decode_local(4), Displacement::new(1, 0));
        assert_eq!(codec.decode_local(7), Displacement::new(1, 1));
    }

    #[test]
    fn room_index_from_flat_action() {
        let codec = ActionCodec::new(2, 4);
        assert_eq!(codec.actions_per_room(), 24);
        let d = codec.decode(24 * 3 + 5);
        assert_eq!(d.room, 3);
        assert_eq!(d.displacement, codec.decode_local(5));
    }

    #[test]
    fn encode_rejects_zero_and_out_of_window() {
        let codec = ActionCodec::new(2, 2);
        assert_eq!(codec.encode_local(Displacement::new(0, 0)), None);
        assert_eq!(codec.encode_local(Displacement::new(3, 0)), None);
        assert_eq!(codec.encode_local(Displacement::new(0, -3)), None);
        assert_eq!(codec.encode(2, Displacement::new(1, 0)), None);
        assert_eq!(codec.encode(1, Displacement::new(-2, -2)), Some(24));
    }

    #[test]
    fn decode_batch_fills_every_slot() {
        let codec = ActionCodec::new(1, 2);
        let actions = [0, 8, 15];
        let mut out = [DecodedAction {
            room: 0,
            displacement: Displacement::default(),
        }; 3];
        codec.decode_batch(&actions, &mut out);
        assert_eq!(out[0].room, 0);
        assert_eq!(out[1].room, 1);
        assert_eq!(out[2].displacement, Displacement::new(1, 1));
    }

    #[test]
    fn checked_num_actions_detects_overflow() {
        assert_eq!(ActionCodec::checked_num_actions(1, 10), Some(80));
        assert_eq!(ActionCodec::checked_num_actions(u32::MAX / 2, 1), None);
        assert_eq!(ActionCodec::checked_num_actions(1000, usize::MAX), None);
    }

    #[test]
    #[should_panic(expected = "action radius")]
    fn zero_radius_panics() {
        let _ = ActionCodec::new(0, 1);
    }

    proptest! {
        #[test]
        fn local_round_trip(radius in 1u32..8, seed in 0u32..10_000) {
            let codec = ActionCodec::new(radius, 1);
            let local = seed % codec.actions_per_room();
            let d = codec.decode_local(local);
            prop_assert!(d != Displacement::new(0, 0));
            prop_assert!(d.dx.unsigned_abs() <= radius && d.dy.unsigned_abs() <= radius);
            prop_assert_eq!(codec.encode_local(d), Some(local));
        }

        #[test]
        fn window_round_trip(radius in 1u32..6, dx in -6i32..=6, dy in -6i32..=6) {
            let codec = ActionCodec::new(radius, 1);
            let d = Displacement::new(dx, dy);
            match codec.encode_local(d) {
                Some(local) => {
                    prop_assert!(local < codec.actions_per_room());
                    prop_assert_eq!(codec.decode_local(local), d);
                }
                None => {
                    let r = radius as i32;
                    prop_assert!((dx, dy) == (0, 0) || dx.abs() > r || dy.abs() > r);
                }
            }
        }

        #[test]
        fn flat_round_trip(radius in 1u32..5, rooms in 1usize..20, seed in 0u32..100_000) {
            let codec = ActionCodec::new(radius, rooms);
            let action = seed % codec.num_actions();
            let d = codec.decode(action);
            prop_assert!(d.room < rooms);
            prop_assert_eq!(codec.encode(d.room, d.displacement), Some(action));
        }
    }
}
