//! Rendering hook.
//!
//! The environment never owns a renderer. Callers construct one and pass
//! it to [`MazeEnv::render`](crate::MazeEnv::render), which hands over a
//! borrowed [`RenderFrame`] describing a single instance.

use maze_core::{AreaTag, Direction, Position, RoomCatalog};

/// Read-only view of one instance's current layout.
#[derive(Clone, Copy, Debug)]
pub struct RenderFrame<'a> {
    /// Instance being rendered.
    pub env_index: usize,
    /// Map width in tiles.
    pub map_width: usize,
    /// Map height in tiles.
    pub map_height: usize,
    /// Room catalog, in the same order as `positions`.
    pub rooms: &'a RoomCatalog,
    /// Current top-left position of each room.
    pub positions: &'a [Position],
}

/// A caller-supplied renderer.
pub trait MapRenderer {
    /// Draw one frame.
    fn render(&mut self, frame: &RenderFrame<'_>);
}

/// Renders a frame as a text grid, one line per map row.
///
/// `.` marks an empty cell and `#` a cell occupied by more than one room.
/// A singly occupied cell shows a door glyph (`<`, `>`, `v`, `^`) if a
/// door opens there, otherwise the base-36 digit of the room's area tag.
#[derive(Clone, Debug, Default)]
pub struct TextRenderer {
    output: String,
}

impl TextRenderer {
    /// Create a renderer with empty output.
    pub fn new() -> Self {
        Self::default()
    }

    /// Text of the most recent frame.
    pub fn output(&self) -> &str {
        &self.output
    }

    fn area_glyph(area: AreaTag) -> char {
        char::from_digit(u32::from(area.0) % 36, 36).unwrap_or('?')
    }

    fn door_glyph(direction: Direction) -> char {
        match direction {
            Direction::Left => '<',
            Direction::Right => '>',
            Direction::Down => 'v',
            Direction::Up => '^',
        }
    }
}

impl MapRenderer for TextRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        let (w, h) = (frame.map_width, frame.map_height);
        let mut counts = vec![0u32; w * h];
        let mut glyphs = vec!['.'; w * h];

        for (room, pos) in frame.rooms.iter().zip(frame.positions) {
            let (ox, oy) = (pos.x as usize, pos.y as usize);
            for (x, y) in room.map().iter_set() {
                let (cx, cy) = (ox + x, oy + y);
                if cx >= w || cy >= h {
                    continue;
                }
                let i = cy * w + cx;
                counts[i] += 1;
                glyphs[i] = Direction::ALL
                    .into_iter()
                    .find(|&d| room.door_mask(d).is_set(x, y))
                    .map_or_else(|| Self::area_glyph(room.area()), Self::door_glyph);
            }
        }

        self.output.clear();
        for y in 0..h {
            if y > 0 {
                self.output.push('\n');
            }
            for x in 0..w {
                let i = y * w + x;
                self.output.push(if counts[i] > 1 { '#' } else { glyphs[i] });
            }
        }
    }
}
