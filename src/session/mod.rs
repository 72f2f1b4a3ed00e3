//! Game sessions and their per-channel registries.
//!
//! - `GameSession`: board, side to move, pending selection
//! - `SessionRegistry`: single-owner map, `&mut` access serializes events
//! - `SharedRegistry`: concurrent map, one lock per session

pub mod channel;
pub mod game;
pub mod registry;
pub mod shared;

pub use channel::ChannelId;
pub use game::{GameSession, MoveRecord, SelectionState, TapOutcome};
pub use registry::SessionRegistry;
pub use shared::SharedRegistry;
