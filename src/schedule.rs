//! Delayed level events.
//!
//! Timers are plain data keyed by stable handles. Whoever handles a due
//! event looks the handle up again, so an event for an entity that is
//! already gone does nothing.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use crate::entities::EnemyId;
use crate::pool::ProjectileId;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TimedEvent {
    /// Clears the damage tint and cooldown.
    DamageCooldownEnd,
    /// Resets the hit counter and restarts the level after a fatal hit.
    DeathReset,
    /// Restarts the level after the player fell out of the world.
    FallRestart,
    /// The fade after collecting the egg finished.
    LevelComplete,
    ExpireProjectile(ProjectileId),
    RemoveEnemy(EnemyId),
}

#[derive(Clone, Debug)]
struct Scheduled {
    at_ms: u64,
    seq: u64,
    event: TimedEvent,
}

impl PartialEq for Scheduled {
    fn eq(&self, other: &Self) -> bool {
        self.at_ms == other.at_ms && self.seq == other.seq
    }
}

impl Eq for Scheduled {}

impl PartialOrd for Scheduled {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// Reversed so the max-heap pops the earliest deadline, ties in insertion order.
impl Ord for Scheduled {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .at_ms
            .cmp(&self.at_ms)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<Scheduled>,
    next_seq: u64,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(&mut self, at_ms: u64, event: TimedEvent) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.queue.push(Scheduled { at_ms, seq, event });
    }

    /// Next event whose deadline is at or before `now_ms`.
    pub fn pop_due(&mut self, now_ms: u64) -> Option<TimedEvent> {
        if self.queue.peek()?.at_ms <= now_ms {
            self.queue.pop().map(|s| s.event)
        } else {
            None
        }
    }

    pub fn is_pending(&self, event: TimedEvent) -> bool {
        self.queue.iter().any(|s| s.event == event)
    }
}
