//! Concurrent registry tests.
//!
//! Many threads drive distinct channels at once; each channel must end up
//! exactly as if its events had been processed alone.

use std::sync::mpsc;
use std::sync::Arc;
use std::thread;

use rust_checkers::core::{Board, Cell, Color, Coord, OnboardingConfig};
use rust_checkers::handler::EventHandler;
use rust_checkers::protocol::{CellTapped, InboundEvent, Outbound};
use rust_checkers::session::{ChannelId, SharedRegistry, TapOutcome};

/// Opening for Dark and Light that every channel replays.
const OPENING: [(i32, i32); 8] = [(2, 1), (3, 2), (5, 0), (4, 1), (2, 3), (3, 4), (5, 6), (4, 5)];

/// Distinct channels processed in parallel stay independent.
#[test]
fn test_parallel_channels_are_independent() {
    let registry = Arc::new(SharedRegistry::new(0));

    let handles: Vec<_> = (0..8)
        .map(|id| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                let channel = format!("channel-{id}");
                let mut handler = EventHandler::new(registry, OnboardingConfig::default());
                let mut renders = 0;
                for &(row, col) in &OPENING {
                    let tap = CellTapped::new(channel.as_str(), row, col);
                    let event = InboundEvent::CellTapped(tap);
                    if matches!(handler.handle(event), Outbound::Render(_)) {
                        renders += 1;
                    }
                }
                renders
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.join().unwrap(), 4);
    }

    assert_eq!(registry.len(), 8);
    for id in 0..8 {
        let session = registry.snapshot(&ChannelId::from(format!("channel-{id}"))).unwrap();
        assert_eq!(session.to_move(), Color::Dark);
        assert_eq!(session.history().len(), 4);
        assert_eq!(session.board().get(4, 5), Ok(Cell::LightPiece));
    }
}

/// Concurrent taps on one channel are serialized: each full move lands
/// exactly once.
#[test]
fn test_same_channel_serialized() {
    let registry = Arc::new(SharedRegistry::new(0));
    let channel = ChannelId::from("busy");

    // Every thread tries to play Dark's (2, 1) -> (3, 2) in one locked step
    let handles: Vec<_> = (0..16)
        .map(|_| {
            let registry = Arc::clone(&registry);
            let channel = channel.clone();
            thread::spawn(move || {
                registry.with_session(&channel, |session| {
                    if session.to_move() != Color::Dark {
                        return false;
                    }
                    if session.select(Coord::new(2, 1)).is_err() {
                        return false;
                    }
                    session.attempt_move(Coord::new(3, 2)).is_ok()
                })
            })
        })
        .collect();

    let successes = handles
        .into_iter()
        .map(|handle| handle.join().unwrap())
        .filter(|&moved| moved)
        .count();

    assert_eq!(successes, 1);
    let session = registry.snapshot(&channel).unwrap();
    assert_eq!(session.to_move(), Color::Light);
    assert_ne!(session.board(), &Board::new());
}

/// The bound holds when many channels arrive from many threads.
#[test]
fn test_bound_under_load() {
    let registry = Arc::new(SharedRegistry::new(16));

    let handles: Vec<_> = (0..4)
        .map(|worker| {
            let registry = Arc::clone(&registry);
            thread::spawn(move || {
                for id in 0..50 {
                    let channel = ChannelId::from(format!("w{worker}-{id}"));
                    registry.with_session(&channel, |_| ());
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    // Racing admissions may overshoot by at most one per worker
    assert!(registry.len() <= 16 + 4, "len {}", registry.len());
}

/// A session mid-move is not evicted when a new channel arrives, and the
/// move persists.
#[test]
fn test_eviction_spares_session_in_use() {
    let registry = Arc::new(SharedRegistry::new(1));
    let busy = ChannelId::from("busy");

    registry.with_session(&busy, |session| session.tap(Coord::new(2, 1)));

    let (entered_tx, entered_rx) = mpsc::channel();
    let (resume_tx, resume_rx) = mpsc::channel::<()>();

    let worker = {
        let registry = Arc::clone(&registry);
        let busy = busy.clone();
        thread::spawn(move || {
            registry.with_session(&busy, |session| {
                entered_tx.send(()).unwrap();
                resume_rx.recv().unwrap();
                session.tap(Coord::new(3, 2))
            })
        })
    };

    entered_rx.recv().unwrap();
    registry.with_session(&ChannelId::from("other"), |_| ());
    resume_tx.send(()).unwrap();

    let outcome = worker.join().unwrap();
    assert!(matches!(outcome, TapOutcome::Moved(_)), "outcome {outcome:?}");

    let session = registry.snapshot(&busy).unwrap();
    assert_eq!(session.to_move(), Color::Light);
    assert_eq!(session.history().len(), 1);
    assert_eq!(session.board().get(3, 2), Ok(Cell::DarkPiece));
}

/// Once the busy session is released, the next admission evicts it as
/// the least recently used idle slot.
#[test]
fn test_idle_session_evicted_after_release() {
    let registry = SharedRegistry::new(2);
    let (a, b, c) = (ChannelId::from("a"), ChannelId::from("b"), ChannelId::from("c"));

    registry.with_session(&a, |_| ());
    registry.with_session(&b, |_| ());
    registry.with_session(&c, |_| ());

    assert_eq!(registry.len(), 2);
    assert!(!registry.contains(&a));
}
