//! Engine notifications for audio/visual collaborators and the drop timer.

/// Queued by the engine during a call; drained with
/// [`GameState::take_events`](crate::GameState::take_events).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineEvent {
    /// A turn scored; play the vanish effect.
    Vanish { points: u32 },
    /// The drop timer should switch to this interval.
    DropIntervalChanged { interval_ms: u32 },
    /// Spawn failed; stop background audio and show the end screen.
    GameOver,
}
