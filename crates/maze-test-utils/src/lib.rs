//! Test utilities for maze-builder development.
//!
//! Provides room and catalog fixtures ([`fixtures`]), small environment
//! configs, and a [`RecordingRenderer`] that captures every frame handed
//! to it by [`MazeEnv::render`](maze_engine::MazeEnv::render).

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

use maze_core::Position;
use maze_engine::{MapRenderer, RenderFrame};

/// One frame captured by [`RecordingRenderer`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RecordedFrame {
    pub env_index: usize,
    pub map_width: usize,
    pub map_height: usize,
    pub positions: Vec<Position>,
}

/// Mock implementation of [`MapRenderer`].
///
/// Stores an owned copy of every frame so tests can inspect what the
/// environment handed over.
#[derive(Debug, Default)]
pub struct RecordingRenderer {
    frames: Vec<RecordedFrame>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Frames in the order they were rendered.
    pub fn frames(&self) -> &[RecordedFrame] {
        &self.frames
    }

    pub fn last(&self) -> Option<&RecordedFrame> {
        self.frames.last()
    }
}

impl MapRenderer for RecordingRenderer {
    fn render(&mut self, frame: &RenderFrame<'_>) {
        self.frames.push(RecordedFrame {
            env_index: frame.env_index,
            map_width: frame.map_width,
            map_height: frame.map_height,
            positions: frame.positions.to_vec(),
        });
    }
}
