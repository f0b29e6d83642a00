//! Core types for the maze builder environment.
//!
//! This is the leaf crate with zero internal dependencies. It defines the
//! static room catalog consumed by the engine: room definitions, door
//! identifiers, the derived occupancy and door masks, and positions.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod catalog;
pub mod error;
pub mod id;
pub mod room;

pub use catalog::RoomCatalog;
pub use error::CatalogError;
pub use id::{AreaTag, Position, RoomId};
pub use room::{Direction, DoorIdentifier, Mask, Room, RoomDef};
