//! Recorded snapshot history with cursor navigation, plus the optional
//! auto-advance pacer.

use std::time::{Duration, Instant};

use super::Sequencer;
use super::step::AlgorithmStep;

/// Append-only list of emitted snapshots plus a cursor.
///
/// Navigating backward never discards future entries; advancing after a
/// retreat replays recorded snapshots instead of re-invoking the
/// algorithm. Owns the live sequencer, so building a new history for a
/// new search drops the previous sequencer - two sequencers are never
/// advanced concurrently.
pub struct StepHistory<'g> {
    steps: Vec<AlgorithmStep>,
    cursor: Option<usize>,
    sequencer: Option<Sequencer<'g>>,
}

impl<'g> StepHistory<'g> {
    #[must_use]
    pub fn new(sequencer: Sequencer<'g>) -> Self {
        Self {
            steps: Vec::new(),
            cursor: None,
            sequencer: Some(sequencer),
        }
    }

    /// Moves one snapshot forward: replays a recorded snapshot when the
    /// cursor is behind the end of history, otherwise pulls the next one
    /// from the live sequencer and records it. `None` once the sequencer
    /// is exhausted (or detached) and no recorded snapshot lies ahead.
    pub fn advance(&mut self) -> Option<&AlgorithmStep> {
        if let Some(index) = self.cursor {
            if index + 1 < self.steps.len() {
                self.cursor = Some(index + 1);
                return self.steps.get(index + 1);
            }
        }

        let step = self.sequencer.as_mut()?.next()?;
        self.steps.push(step);
        self.cursor = Some(self.steps.len() - 1);
        self.steps.last()
    }

    /// Moves one snapshot backward. Valid only when the cursor is past
    /// the first snapshot; history is never truncated.
    pub fn retreat(&mut self) -> Option<&AlgorithmStep> {
        let index = self.cursor?;
        if index == 0 {
            return None;
        }
        self.cursor = Some(index - 1);
        self.steps.get(index - 1)
    }

    /// Discards all history and detaches the live sequencer.
    pub fn reset(&mut self) {
        self.steps.clear();
        self.cursor = None;
        self.sequencer = None;
    }

    /// Snapshot under the cursor, if any.
    #[must_use]
    pub fn current(&self) -> Option<&AlgorithmStep> {
        self.steps.get(self.cursor?)
    }

    /// Zero-based cursor position; `None` while no snapshot has been
    /// recorded.
    #[must_use]
    pub fn position(&self) -> Option<usize> {
        self.cursor
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    #[must_use]
    pub fn can_retreat(&self) -> bool {
        self.cursor.is_some_and(|index| index > 0)
    }
}

/// Cooperative auto-advance driver: a convenience wrapper around
/// [`StepHistory::advance`] that fires at a fixed wall-clock cadence.
///
/// Purely a pacing device - it holds no reference to the history, so
/// cancelling it at any point just stops future advances and leaves all
/// recorded snapshots valid.
pub struct AutoPlayer {
    interval: Duration,
    next_due: Option<Instant>,
}

impl AutoPlayer {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_millis(500);

    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    pub fn start(&mut self) {
        self.next_due = Some(Instant::now());
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Advances `history` when the cadence interval has elapsed; `None`
    /// when idle or not yet due. Cancels itself once the finished
    /// snapshot has been returned or the sequencer is exhausted.
    pub fn poll<'a>(&mut self, history: &'a mut StepHistory<'_>) -> Option<&'a AlgorithmStep> {
        let due = self.next_due?;
        let now = Instant::now();
        if now < due {
            return None;
        }
        self.next_due = Some(now + self.interval);

        let step = history.advance();
        if step.is_none_or(|step| step.finished) {
            self.next_due = None;
        }
        step
    }
}

impl Default for AutoPlayer {
    fn default() -> Self {
        Self::new(Self::DEFAULT_INTERVAL)
    }
}
