//! Inbound event handling.
//!
//! `EventHandler` resolves each inbound event against a session store and
//! produces exactly one outbound command:
//!
//! - Start: onboarding reply, no session is created
//! - Tap that selects a piece: "piece selected"
//! - Tap that completes a move: board render
//! - Any refused tap: "choose your own piece" or "illegal move"
//!
//! The store is borrowed, not global: build the registry once at startup
//! and hand the handler a reference.
//!
//! ```
//! use rust_checkers::core::OnboardingConfig;
//! use rust_checkers::handler::EventHandler;
//! use rust_checkers::protocol::{CellTapped, InboundEvent, Notification, Outbound};
//! use rust_checkers::session::SessionRegistry;
//!
//! let mut registry = SessionRegistry::new(0);
//! let mut handler = EventHandler::new(&mut registry, OnboardingConfig::default());
//!
//! let reply = handler.handle(InboundEvent::CellTapped(CellTapped::new("room", 2, 1)));
//! assert!(matches!(
//!     reply,
//!     Outbound::Notify { notification: Notification::PieceSelected, .. }
//! ));
//! ```

use std::sync::Arc;

use crate::core::config::OnboardingConfig;
use crate::protocol::{
    CellTapped, InboundEvent, LaunchButton, Notification, Onboarding, Outbound, RenderBoard,
};
use crate::session::{ChannelId, GameSession, SessionRegistry, SharedRegistry, TapOutcome};

/// Anything that can lend out a channel's session, creating it on demand.
pub trait SessionStore {
    /// Run `f` with exclusive access to the channel's session.
    fn with_session<R>(&mut self, channel: &ChannelId, f: impl FnOnce(&mut GameSession) -> R) -> R;
}

impl SessionStore for SessionRegistry {
    fn with_session<R>(&mut self, channel: &ChannelId, f: impl FnOnce(&mut GameSession) -> R) -> R {
        f(self.get_or_create(channel))
    }
}

impl SessionStore for &SharedRegistry {
    fn with_session<R>(&mut self, channel: &ChannelId, f: impl FnOnce(&mut GameSession) -> R) -> R {
        SharedRegistry::with_session(*self, channel, f)
    }
}

impl SessionStore for Arc<SharedRegistry> {
    fn with_session<R>(&mut self, channel: &ChannelId, f: impl FnOnce(&mut GameSession) -> R) -> R {
        SharedRegistry::with_session(&**self, channel, f)
    }
}

impl<S: SessionStore + ?Sized> SessionStore for &mut S {
    fn with_session<R>(&mut self, channel: &ChannelId, f: impl FnOnce(&mut GameSession) -> R) -> R {
        (**self).with_session(channel, f)
    }
}

/// Turns inbound events into outbound commands.
pub struct EventHandler<S> {
    store: S,
    onboarding: OnboardingConfig,
}

impl<S: SessionStore> EventHandler<S> {
    #[must_use]
    pub fn new(store: S, onboarding: OnboardingConfig) -> Self {
        Self { store, onboarding }
    }

    /// Handle one event.
    pub fn handle(&mut self, event: InboundEvent) -> Outbound {
        match event {
            InboundEvent::Start { channel } => self.start(channel),
            InboundEvent::CellTapped(tap) => self.tap(tap),
        }
    }

    /// Reply to a start request. Sessions are only created by taps.
    pub fn start(&self, channel: ChannelId) -> Outbound {
        tracing::debug!(%channel, "start requested");
        Outbound::Onboarding(Onboarding {
            channel,
            message: self.onboarding.message.clone(),
            launch: LaunchButton {
                label: self.onboarding.launch_label.clone(),
                url: self.onboarding.launch_url.clone(),
            },
        })
    }

    /// Feed a tap into the channel's session.
    pub fn tap(&mut self, tap: CellTapped) -> Outbound {
        let at = tap.coord();
        let CellTapped { channel, .. } = tap;

        self.store.with_session(&channel, |session| match session.tap(at) {
            TapOutcome::Selected(_) => Outbound::Notify {
                channel: channel.clone(),
                notification: Notification::PieceSelected,
            },
            TapOutcome::Moved(_) => Outbound::Render(RenderBoard {
                channel: channel.clone(),
                board: session.board().clone(),
            }),
            TapOutcome::Rejected(err) => {
                tracing::debug!(%channel, %at, error = %err, "tap rejected");
                Outbound::Notify {
                    channel: channel.clone(),
                    notification: Notification::for_error(&err),
                }
            }
        })
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Cell, Color};

    fn tap(channel: &str, row: i32, col: i32) -> InboundEvent {
        InboundEvent::CellTapped(CellTapped::new(channel, row, col))
    }

    fn notification(outbound: &Outbound) -> Option<Notification> {
        match outbound {
            Outbound::Notify { notification, .. } => Some(*notification),
            _ => None,
        }
    }

    #[test]
    fn test_start_does_not_create_session() {
        let mut registry = SessionRegistry::new(0);
        let reply = EventHandler::new(&mut registry, OnboardingConfig::default())
            .handle(InboundEvent::Start {
                channel: ChannelId::from("room"),
            });

        let Outbound::Onboarding(onboarding) = reply else {
            panic!("expected onboarding, got {reply:?}");
        };
        assert_eq!(onboarding.launch.label, OnboardingConfig::default().launch_label);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_move_emits_render() {
        let mut registry = SessionRegistry::new(0);
        let mut handler = EventHandler::new(&mut registry, OnboardingConfig::default());

        assert_eq!(
            notification(&handler.handle(tap("room", 2, 1))),
            Some(Notification::PieceSelected)
        );

        let reply = handler.handle(tap("room", 3, 2));
        let Outbound::Render(render) = reply else {
            panic!("expected render, got {reply:?}");
        };
        assert_eq!(render.channel, ChannelId::from("room"));
        assert_eq!(render.board.get(3, 2), Ok(Cell::DarkPiece));
        assert_eq!(render.board.get(2, 1), Ok(Cell::Empty));

        let session = registry.get(&ChannelId::from("room")).unwrap();
        assert_eq!(session.to_move(), Color::Light);
    }

    #[test]
    fn test_rejections_notify() {
        let mut registry = SessionRegistry::new(0);
        let mut handler = EventHandler::new(&mut registry, OnboardingConfig::default());

        assert_eq!(
            notification(&handler.handle(tap("room", 5, 0))),
            Some(Notification::ChooseOwnPiece)
        );
        assert_eq!(
            notification(&handler.handle(tap("room", 9, 9))),
            Some(Notification::IllegalMove)
        );

        handler.handle(tap("room", 2, 1));
        assert_eq!(
            notification(&handler.handle(tap("room", 4, 1))),
            Some(Notification::IllegalMove)
        );

        let session = registry.get(&ChannelId::from("room")).unwrap();
        assert_eq!(session.board(), &Board::new());
        assert_eq!(session.selection(), None);
    }

    #[test]
    fn test_shared_store() {
        let registry = SharedRegistry::new(0);
        let mut handler = EventHandler::new(&registry, OnboardingConfig::default());

        handler.handle(tap("room", 2, 1));
        let reply = handler.handle(tap("room", 3, 2));

        assert!(matches!(reply, Outbound::Render(_)));
        assert_eq!(
            registry.snapshot(&ChannelId::from("room")).unwrap().to_move(),
            Color::Light
        );
    }
}
