use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::formation::Slot;
use crate::player::PlayerId;
use crate::stats::StatCategory;


// Only the latest entry is ever offered to the user, but a few more are kept so that several
// misclicks in a row can be walked back.
pub const MAX_UNDO_ENTRIES: usize = 100;

// Compensating action for an undoable mutation. Each entry carries everything needed to revert
// itself; `MatchState::undo` executes it.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub enum UndoEntry {
    // Decrement the stat by one. Does not touch the score, even for goals.
    RevertStat {
        player: PlayerId,
        category: StatCategory,
    },
    // Put `player_a` back into `slot_a` and `player_b` into `slot_b`.
    RevertSwap {
        slot_a: Slot,
        slot_b: Slot,
        player_a: PlayerId,
        player_b: PlayerId,
    },
}

#[derive(Clone, Default, Debug)]
pub struct UndoStack {
    entries: VecDeque<UndoEntry>,
}

impl UndoStack {
    pub fn new() -> Self { UndoStack { entries: VecDeque::new() } }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn last(&self) -> Option<&UndoEntry> { self.entries.back() }

    pub fn push(&mut self, entry: UndoEntry) {
        self.entries.push_back(entry);
        while self.entries.len() > MAX_UNDO_ENTRIES {
            self.entries.pop_front();
        }
    }

    pub fn pop(&mut self) -> Option<UndoEntry> { self.entries.pop_back() }
}


#[cfg(test)]
mod tests {
    use super::*;

    fn revert_goal(player: usize) -> UndoEntry {
        UndoEntry::RevertStat {
            player: PlayerId(player),
            category: StatCategory::Goals,
        }
    }

    #[test]
    fn lifo() {
        let mut stack = UndoStack::new();
        assert_eq!(stack.pop(), None);
        stack.push(revert_goal(1));
        stack.push(revert_goal(2));
        assert_eq!(stack.last(), Some(&revert_goal(2)));
        assert_eq!(stack.pop(), Some(revert_goal(2)));
        assert_eq!(stack.pop(), Some(revert_goal(1)));
        assert!(stack.is_empty());
    }

    #[test]
    fn oldest_entries_are_dropped() {
        let mut stack = UndoStack::new();
        for i in 0..(MAX_UNDO_ENTRIES + 5) {
            stack.push(revert_goal(i));
        }
        assert_eq!(stack.len(), MAX_UNDO_ENTRIES);
        let mut last_popped = None;
        while let Some(entry) = stack.pop() {
            last_popped = Some(entry);
        }
        assert_eq!(last_popped, Some(revert_goal(5)));
    }
}
