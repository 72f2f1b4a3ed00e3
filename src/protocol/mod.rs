//! Boundary types exchanged with the transport and presentation layers.
//!
//! Inbound payloads are parsed into typed events exactly once, here. The
//! engine never looks at raw transport data.
//!
//! ## Inbound
//!
//! - `InboundEvent::Start`: the user asked for a new game
//! - `InboundEvent::CellTapped`: the user tapped a board cell
//!
//! ## Outbound
//!
//! - `Outbound::Render`: redraw the board (once per completed move)
//! - `Outbound::Notify`: short transient status text
//! - `Outbound::Onboarding`: greeting plus launch button

pub mod render;

use serde::{Deserialize, Serialize};

use crate::core::board::Board;
use crate::core::coord::Coord;
use crate::core::error::EngineError;
use crate::session::ChannelId;

pub use render::{glyph, render_grid, render_text, RenderedCell};

/// Errors parsing transport payloads.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ProtocolError {
    #[error("malformed callback payload {payload:?}")]
    MalformedCallback { payload: String },
}

/// A tap on one board cell. Coordinates are not trusted to be in range.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CellTapped {
    pub channel: ChannelId,
    pub row: i32,
    pub col: i32,
}

impl CellTapped {
    #[must_use]
    pub fn new(channel: impl Into<ChannelId>, row: i32, col: i32) -> Self {
        Self {
            channel: channel.into(),
            row,
            col,
        }
    }

    /// Parse a `"row,col"` callback payload.
    ///
    /// ```
    /// use rust_checkers::protocol::CellTapped;
    ///
    /// let tap = CellTapped::from_callback("chat-1", "2, 1").unwrap();
    /// assert_eq!((tap.row, tap.col), (2, 1));
    ///
    /// assert!(CellTapped::from_callback("chat-1", "2;1").is_err());
    /// ```
    pub fn from_callback(
        channel: impl Into<ChannelId>,
        payload: &str,
    ) -> Result<Self, ProtocolError> {
        let malformed = || ProtocolError::MalformedCallback {
            payload: payload.to_string(),
        };

        let (row, col) = payload.split_once(',').ok_or_else(malformed)?;
        let row = row.trim().parse().map_err(|_| malformed())?;
        let col = col.trim().parse().map_err(|_| malformed())?;
        Ok(Self::new(channel, row, col))
    }

    #[must_use]
    pub fn coord(&self) -> Coord {
        Coord::new(self.row, self.col)
    }
}

/// An event arriving from the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InboundEvent {
    /// Start/new game request.
    Start { channel: ChannelId },
    CellTapped(CellTapped),
}

impl InboundEvent {
    #[must_use]
    pub fn channel(&self) -> &ChannelId {
        match self {
            InboundEvent::Start { channel } => channel,
            InboundEvent::CellTapped(tap) => &tap.channel,
        }
    }
}

/// Transient status shown to the player.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Notification {
    PieceSelected,
    ChooseOwnPiece,
    IllegalMove,
}

impl Notification {
    /// User-facing text.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Notification::PieceSelected => "piece selected",
            Notification::ChooseOwnPiece => "choose your own piece",
            Notification::IllegalMove => "illegal move",
        }
    }

    /// Notification for a refused tap.
    ///
    /// Out-of-range taps report as illegal moves.
    #[must_use]
    pub const fn for_error(err: &EngineError) -> Self {
        match err {
            EngineError::NotYourPiece { .. } => Notification::ChooseOwnPiece,
            EngineError::OutOfRange { .. }
            | EngineError::Illegal { .. }
            | EngineError::NothingSelected => Notification::IllegalMove,
        }
    }
}

impl std::fmt::Display for Notification {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.message())
    }
}

/// Full board snapshot for the presentation layer to draw.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderBoard {
    pub channel: ChannelId,
    pub board: Board,
}

/// Button that opens the external game surface.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchButton {
    pub label: String,
    pub url: String,
}

/// Reply to a start request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Onboarding {
    pub channel: ChannelId,
    pub message: String,
    pub launch: LaunchButton,
}

/// A command for the transport.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Outbound {
    Render(RenderBoard),
    Notify {
        channel: ChannelId,
        notification: Notification,
    },
    Onboarding(Onboarding),
}
