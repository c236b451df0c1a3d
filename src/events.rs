//! Discrete game events published by the simulation.
//!
//! The level never talks to a global event bus; every operation that can
//! publish takes an explicit [`EventSink`]. Dispatch is synchronous and
//! fire-and-forget, ordered by the frame's step order.

use glam::IVec2;

use crate::entity::ghost::GhostId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PacFoundFood { tile: IVec2 },
    PacGetsPower,
    PacStartsLosingPower,
    PacLostPower,
    BonusActivated { tile: IVec2 },
    BonusEaten { tile: IVec2 },
    BonusExpired { tile: IVec2 },
    GhostEaten { ghost: GhostId, tile: IVec2 },
    /// Points awarded to the external game model. Score and lives live there,
    /// not in the level.
    Scored { points: u32 },
}

/// Receiver for game events. Implemented by the outer game controller, the
/// sound layer, or a test recorder.
pub trait EventSink {
    fn publish(&mut self, event: GameEvent);
}

/// Sink that drops every event. Useful when the caller only cares about the
/// mutated level state.
#[derive(Debug, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn publish(&mut self, _event: GameEvent) {}
}

/// Sink that records every published event in order.
#[derive(Debug, Default)]
pub struct RecordingSink {
    pub events: Vec<GameEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Total points carried by `Scored` events so far.
    pub fn points(&self) -> u32 {
        self.events
            .iter()
            .map(|event| match event {
                GameEvent::Scored { points } => *points,
                _ => 0,
            })
            .sum()
    }

    pub fn contains(&self, event: &GameEvent) -> bool {
        self.events.contains(event)
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl EventSink for RecordingSink {
    fn publish(&mut self, event: GameEvent) {
        self.events.push(event);
    }
}
