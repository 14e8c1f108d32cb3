use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;
use std::time::Duration;

use crate::GameId;

/// Work that the engine resumes after a pause.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum Task {
    /// The reposition animation has settled; show the deck and start.
    StartPlay,
    NewTurn,
    /// Turn the two non-matching cards face down again.
    FlipBack,
    ComputerFlip,
    HideEndGameStatus,
}

#[derive(Debug)]
pub(crate) struct Scheduled {
    pub due: Duration,
    seq: u64,
    pub game: GameId,
    pub task: Task,
}

// Ordered by due time, then by the order of scheduling.
impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        (self.due, self.seq).cmp(&(other.due, other.seq))
    }
}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Scheduled {}

/// A virtual clock and the tasks waiting on it.
///
/// Nothing runs in parallel: the host moves the clock forward, and due tasks
/// run one after another in due order.
#[derive(Debug, Default)]
pub(crate) struct Scheduler {
    now: Duration,
    seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl Scheduler {
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Queues `task` to run `delay` after the current time.
    pub fn schedule(&mut self, game: GameId, delay: Duration, task: Task) {
        self.seq += 1;
        self.queue.push(Reverse(Scheduled {
            due: self.now + delay,
            seq: self.seq,
            game,
            task,
        }));
    }

    pub fn next_deadline(&self) -> Option<Duration> {
        self.queue.peek().map(|Reverse(scheduled)| scheduled.due)
    }

    /// Removes the next task if it is due at or before `until`, and moves
    /// the clock to its due time.
    pub fn pop_due(&mut self, until: Duration) -> Option<Scheduled> {
        if self.next_deadline()? > until {
            return None;
        }
        let Reverse(scheduled) = self.queue.pop()?;
        self.now = self.now.max(scheduled.due);
        Some(scheduled)
    }

    /// Moves the clock to `time` without running anything. Never goes back.
    pub fn set_now(&mut self, time: Duration) {
        self.now = self.now.max(time);
    }
}
