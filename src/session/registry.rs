//! Per-channel session storage.
//!
//! The registry owns every `GameSession`. Sessions are created lazily the
//! first time a channel is seen and live until evicted or removed.
//!
//! ## Capacity
//!
//! With `max_sessions > 0`, admitting a new channel into a full registry
//! first evicts the least recently touched session. Every `get_or_create`
//! counts as a touch.
//!
//! ## Example
//!
//! ```
//! use rust_checkers::core::{Color, Coord};
//! use rust_checkers::session::{ChannelId, SessionRegistry};
//!
//! let mut registry = SessionRegistry::new(2);
//! let alice = ChannelId::from("alice");
//!
//! registry.get_or_create(&alice).tap(Coord::new(2, 1));
//! registry.get_or_create(&alice).tap(Coord::new(3, 2));
//!
//! assert_eq!(registry.get(&alice).unwrap().to_move(), Color::Light);
//! ```

use std::collections::BTreeMap;

use rustc_hash::FxHashMap;

use super::channel::ChannelId;
use super::game::GameSession;
use crate::core::config::RegistryConfig;

#[derive(Clone, Debug)]
struct Slot {
    session: GameSession,
    last_touched: u64,
}

/// Channel id to session map with an optional LRU bound.
///
/// Touch stamps are unique and mirrored in `by_touch`, so finding the
/// eviction victim is O(log n) rather than a scan of every session.
#[derive(Clone, Debug)]
pub struct SessionRegistry {
    sessions: FxHashMap<ChannelId, Slot>,
    by_touch: BTreeMap<u64, ChannelId>,
    max_sessions: usize,
    clock: u64,
}

impl SessionRegistry {
    /// Registry holding at most `max_sessions` sessions (`0` = unbounded).
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: FxHashMap::default(),
            by_touch: BTreeMap::new(),
            max_sessions,
            clock: 0,
        }
    }

    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.max_sessions)
    }

    /// Session for `channel`, created in the starting position on first use.
    pub fn get_or_create(&mut self, channel: &ChannelId) -> &mut GameSession {
        self.clock += 1;
        let now = self.clock;

        if !self.sessions.contains_key(channel) {
            self.make_room();
            tracing::debug!(%channel, "creating session");
        }

        let slot = self.sessions.entry(channel.clone()).or_insert_with(|| Slot {
            session: GameSession::new(),
            last_touched: now,
        });
        self.by_touch.remove(&slot.last_touched);
        self.by_touch.insert(now, channel.clone());
        slot.last_touched = now;
        &mut slot.session
    }

    /// Existing session for `channel`. Does not count as a touch.
    #[must_use]
    pub fn get(&self, channel: &ChannelId) -> Option<&GameSession> {
        self.sessions.get(channel).map(|slot| &slot.session)
    }

    #[must_use]
    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.sessions.contains_key(channel)
    }

    /// Drop a channel's session, returning it.
    pub fn remove(&mut self, channel: &ChannelId) -> Option<GameSession> {
        let slot = self.sessions.remove(channel)?;
        self.by_touch.remove(&slot.last_touched);
        Some(slot.session)
    }

    /// Start a channel over with a fresh game.
    pub fn reset(&mut self, channel: &ChannelId) -> &mut GameSession {
        let session = self.get_or_create(channel);
        *session = GameSession::new();
        tracing::info!(%channel, "session reset");
        session
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    #[must_use]
    pub fn max_sessions(&self) -> usize {
        self.max_sessions
    }

    /// Evict least recently touched sessions until one more fits.
    fn make_room(&mut self) {
        if self.max_sessions == 0 {
            return;
        }
        while self.sessions.len() >= self.max_sessions {
            let Some((_, oldest)) = self.by_touch.pop_first() else {
                return;
            };
            self.sessions.remove(&oldest);
            tracing::info!(channel = %oldest, "evicted least recently used session");
        }
    }
}

impl Default for SessionRegistry {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}
