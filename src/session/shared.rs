//! Concurrent session registry.
//!
//! Distinct channels can be served in parallel; events for one channel are
//! serialized by that session's mutex. The map shard guard is always
//! dropped before the session lock is taken, so a slow session never
//! blocks lookups for other channels.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use dashmap::DashMap;
use parking_lot::Mutex;

use super::channel::ChannelId;
use super::game::GameSession;
use crate::core::config::RegistryConfig;

struct SharedSlot {
    session: Mutex<GameSession>,
    last_touched: AtomicU64,
}

/// Thread-safe channel id to session map with an optional LRU bound.
pub struct SharedRegistry {
    sessions: DashMap<ChannelId, Arc<SharedSlot>>,
    max_sessions: usize,
    clock: AtomicU64,
}

impl SharedRegistry {
    /// Registry holding at most `max_sessions` sessions (`0` = unbounded).
    #[must_use]
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: DashMap::new(),
            max_sessions,
            clock: AtomicU64::new(0),
        }
    }

    #[must_use]
    pub fn from_config(config: &RegistryConfig) -> Self {
        Self::new(config.max_sessions)
    }

    /// Run `f` with exclusive access to the channel's session, creating it
    /// on first use.
    pub fn with_session<R>(&self, channel: &ChannelId, f: impl FnOnce(&mut GameSession) -> R) -> R {
        let now = self.clock.fetch_add(1, Ordering::Relaxed) + 1;

        let existing = self.sessions.get(channel).map(|entry| Arc::clone(entry.value()));
        let slot = match existing {
            Some(slot) => slot,
            None => {
                self.make_room(channel);
                let slot = self
                    .sessions
                    .entry(channel.clone())
                    .or_insert_with(|| {
                        tracing::debug!(%channel, "creating session");
                        Arc::new(SharedSlot {
                            session: Mutex::new(GameSession::new()),
                            last_touched: AtomicU64::new(now),
                        })
                    });
                Arc::clone(slot.value())
            }
        };

        slot.last_touched.fetch_max(now, Ordering::Relaxed);
        let mut session = slot.session.lock();
        f(&mut session)
    }

    /// Copy of a channel's session, if it exists.
    #[must_use]
    pub fn snapshot(&self, channel: &ChannelId) -> Option<GameSession> {
        let slot = self.sessions.get(channel).map(|entry| Arc::clone(entry.value()))?;
        let session = slot.session.lock();
        Some(session.clone())
    }

    #[must_use]
    pub fn contains(&self, channel: &ChannelId) -> bool {
        self.sessions.contains_key(channel)
    }

    /// Drop a channel's session.
    pub fn remove(&self, channel: &ChannelId) -> bool {
        self.sessions.remove(channel).is_some()
    }

    /// Start a channel over with a fresh game.
    pub fn reset(&self, channel: &ChannelId) {
        self.with_session(channel, |session| *session = GameSession::new());
        tracing::info!(%channel, "session reset");
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

    /// Evict least recently touched idle sessions until `incoming` fits.
    ///
    /// A slot is idle when nobody holds its lock and no caller holds a
    /// clone of it. Busy slots are never evicted, so the bound is best
    /// effort: if every other session is in use, the map grows past it.
    /// Concurrent admissions may also overshoot by the number of racing
    /// threads.
    fn make_room(&self, incoming: &ChannelId) {
        if self.max_sessions == 0 {
            return;
        }
        while self.sessions.len() >= self.max_sessions {
            // Copy out of each entry so no shard guard outlives its step
            let oldest = self
                .sessions
                .iter()
                .filter(|entry| entry.key() != incoming && is_idle(entry.value()))
                .map(|entry| {
                    let stamp = entry.value().last_touched.load(Ordering::Relaxed);
                    (stamp, entry.key().clone())
                })
                .min_by_key(|(stamp, _)| *stamp)
                .map(|(_, channel)| channel);
            let Some(oldest) = oldest else {
                tracing::debug!("no idle session to evict");
                return;
            };
            // Clones are only taken under the shard lock, so the check is
            // stable while `remove_if` holds it
            if self.sessions.remove_if(&oldest, |_, slot| is_idle(slot)).is_some() {
                tracing::info!(channel = %oldest, "evicted least recently used session");
            }
        }
    }
}

fn is_idle(slot: &Arc<SharedSlot>) -> bool {
    Arc::strong_count(slot) == 1 && !slot.session.is_locked()
}

impl Default for SharedRegistry {
    fn default() -> Self {
        Self::from_config(&RegistryConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Board, Color, Coord};

    #[test]
    fn test_with_session_creates_lazily() {
        let registry = SharedRegistry::new(0);
        let channel = ChannelId::from("room");

        assert!(registry.snapshot(&channel).is_none());
        let to_move = registry.with_session(&channel, |session| session.to_move());

        assert_eq!(to_move, Color::Dark);
        assert!(registry.contains(&channel));
    }

    #[test]
    fn test_mutation_persists() {
        let registry = SharedRegistry::new(0);
        let channel = ChannelId::from("room");

        registry.with_session(&channel, |session| session.tap(Coord::new(2, 1)));
        registry.with_session(&channel, |session| session.tap(Coord::new(3, 2)));

        let session = registry.snapshot(&channel).unwrap();
        assert_eq!(session.to_move(), Color::Light);
        assert_eq!(session.history().len(), 1);
    }

    #[test]
    fn test_lru_eviction() {
        let registry = SharedRegistry::new(2);
        let (a, b, c) = (ChannelId::from("a"), ChannelId::from("b"), ChannelId::from("c"));

        registry.with_session(&a, |_| ());
        registry.with_session(&b, |_| ());
        registry.with_session(&a, |_| ());
        registry.with_session(&c, |_| ());

        assert_eq!(registry.len(), 2);
        assert!(registry.contains(&a));
        assert!(!registry.contains(&b));
        assert!(registry.contains(&c));
    }

    #[test]
    fn test_reset_and_remove() {
        let registry = SharedRegistry::new(0);
        let channel = ChannelId::from("room");

        registry.with_session(&channel, |session| session.tap(Coord::new(2, 1)));
        registry.reset(&channel);
        let session = registry.snapshot(&channel).unwrap();
        assert_eq!(session.selection(), None);
        assert_eq!(session.board(), &Board::new());

        assert!(registry.remove(&channel));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_locked_session_not_evicted() {
        let registry = SharedRegistry::new(1);
        let (busy, other) = (ChannelId::from("busy"), ChannelId::from("other"));

        registry.with_session(&busy, |session| {
            session.tap(Coord::new(2, 1));
            registry.with_session(&other, |_| ());
            session.tap(Coord::new(3, 2));
        });

        assert!(registry.contains(&busy));
        assert!(registry.contains(&other));
        assert_eq!(registry.snapshot(&busy).unwrap().to_move(), Color::Light);
    }
}
