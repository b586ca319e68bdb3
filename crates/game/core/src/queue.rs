//! FIFO backlog of skills awaiting a level-up announcement.
//!
//! The queue only records *that* a skill levelled; the level to announce is
//! recomputed when the skill is dequeued. Duplicates are kept: a skill that
//! levels twice before its first announcement is announced twice.

use std::collections::VecDeque;

use crate::skill::Skill;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LevelUpQueue {
    pending: VecDeque<Skill>,
}

impl LevelUpQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, skill: Skill) {
        self.pending.push_back(skill);
    }

    pub fn try_dequeue(&mut self) -> Option<Skill> {
        self.pending.pop_front()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    /// Drops every pending announcement.
    pub fn clear(&mut self) {
        self.pending.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = Skill> + '_ {
        self.pending.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dequeues_in_arrival_order() {
        let mut queue = LevelUpQueue::new();
        queue.enqueue(Skill::Cooking);
        queue.enqueue(Skill::Attack);
        queue.enqueue(Skill::Cooking);

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.try_dequeue(), Some(Skill::Cooking));
        assert_eq!(queue.try_dequeue(), Some(Skill::Attack));
        assert_eq!(queue.try_dequeue(), Some(Skill::Cooking));
        assert_eq!(queue.try_dequeue(), None);
        assert!(queue.is_empty());
    }

    #[test]
    fn clear_empties_backlog() {
        let mut queue = LevelUpQueue::new();
        queue.enqueue(Skill::Slayer);
        queue.clear();
        assert!(queue.is_empty());
        assert_eq!(queue.iter().count(), 0);
    }
}
