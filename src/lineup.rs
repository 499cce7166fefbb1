// Who is where: the position slots of the active formation, the bench and pending substitutions.
//
// Invariant: every roster player is either in exactly one slot or on the bench, never both.
// Queued substitutes stay on the bench until the queue is applied.

use std::collections::BTreeMap;

use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::error::ActionError;
use crate::formation::Slot;
use crate::player::PlayerId;


#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Lineup {
    // In formation order.
    slots: Vec<(Slot, Option<PlayerId>)>,
    // In the order players came off the field; initially roster order.
    bench: Vec<PlayerId>,
}

impl Lineup {
    pub fn new(slots: Vec<Slot>, bench: Vec<PlayerId>) -> Self {
        Lineup {
            slots: slots.into_iter().map(|slot| (slot, None)).collect(),
            bench,
        }
    }

    pub fn slots(&self) -> impl Iterator<Item = (Slot, Option<PlayerId>)> + '_ {
        self.slots.iter().copied()
    }
    pub fn bench(&self) -> &[PlayerId] { &self.bench }
    pub fn on_field(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.slots.iter().filter_map(|&(_, occupant)| occupant)
    }

    pub fn has_slot(&self, slot: Slot) -> bool { self.slot_index(slot).is_some() }
    pub fn occupant(&self, slot: Slot) -> Option<PlayerId> {
        self.slot_index(slot).and_then(|idx| self.slots[idx].1)
    }
    pub fn slot_of(&self, player: PlayerId) -> Option<Slot> {
        self.slots.iter().find(|&&(_, occupant)| occupant == Some(player)).map(|&(slot, _)| slot)
    }
    pub fn is_on_bench(&self, player: PlayerId) -> bool { self.bench.contains(&player) }

    // Moves `player` from the bench into `slot`. The previous occupant, if any, goes to the
    // bench and is returned.
    pub fn place(&mut self, slot: Slot, player: PlayerId) -> Result<Option<PlayerId>, ActionError> {
        let idx = self.slot_index(slot).ok_or(ActionError::UnknownSlot)?;
        let bench_idx =
            self.bench.iter().position(|&p| p == player).ok_or(ActionError::PlayerNotOnBench)?;
        self.bench.remove(bench_idx);
        let previous = self.slots[idx].1.replace(player);
        if let Some(previous) = previous {
            self.bench.push(previous);
        }
        Ok(previous)
    }

    // Exchanges occupants of two slots. Either slot may be empty.
    pub fn swap(&mut self, a: Slot, b: Slot) -> Result<(), ActionError> {
        let idx_a = self.slot_index(a).ok_or(ActionError::UnknownSlot)?;
        let idx_b = self.slot_index(b).ok_or(ActionError::UnknownSlot)?;
        let occupant_a = self.slots[idx_a].1;
        self.slots[idx_a].1 = self.slots[idx_b].1;
        self.slots[idx_b].1 = occupant_a;
        Ok(())
    }

    // Empties every slot. Returns the players that were sent to the bench, in slot order.
    pub fn clear_field(&mut self) -> Vec<PlayerId> {
        let cleared =
            self.slots.iter_mut().filter_map(|(_, occupant)| occupant.take()).collect_vec();
        self.bench.extend(cleared.iter().copied());
        cleared
    }

    // Replaces the slot set. Everybody on the field goes to the bench.
    pub fn rebuild(&mut self, slots: Vec<Slot>) -> Vec<PlayerId> {
        let cleared = self.clear_field();
        self.slots = slots.into_iter().map(|slot| (slot, None)).collect();
        cleared
    }

    // Checks the partition invariant against a roster of `num_players` players.
    pub fn is_consistent(&self, num_players: usize) -> bool {
        let mut seen = vec![false; num_players];
        for player in self.on_field().chain(self.bench.iter().copied()) {
            match seen.get_mut(player.0) {
                Some(seen) if !*seen => *seen = true,
                _ => return false,
            }
        }
        seen.into_iter().all(|s| s)
    }

    fn slot_index(&self, slot: Slot) -> Option<usize> {
        self.slots.iter().position(|&(s, _)| s == slot)
    }
}


// Substitutions chosen while the clock is running. They are applied all at once, typically at
// a stoppage, so that nobody's minutes start counting before they actually step on the field.
#[derive(Clone, Default, Debug, Serialize, Deserialize)]
pub struct SubstitutionQueue {
    entries: BTreeMap<Slot, PlayerId>,
}

impl SubstitutionQueue {
    pub fn new() -> Self { SubstitutionQueue { entries: BTreeMap::new() } }

    pub fn len(&self) -> usize { self.entries.len() }
    pub fn is_empty(&self) -> bool { self.entries.is_empty() }
    pub fn iter(&self) -> impl Iterator<Item = (Slot, PlayerId)> + '_ {
        self.entries.iter().map(|(&slot, &player)| (slot, player))
    }
    pub fn incoming(&self, slot: Slot) -> Option<PlayerId> { self.entries.get(&slot).copied() }
    pub fn slot_of(&self, player: PlayerId) -> Option<Slot> {
        self.entries.iter().find(|&(_, &p)| p == player).map(|(&slot, _)| slot)
    }

    // Overwrites any earlier choice for the same slot. A player can only be queued for one slot
    // at a time: otherwise applying the queue would put them in two places.
    pub fn enqueue(&mut self, slot: Slot, player: PlayerId) -> Result<(), ActionError> {
        if let Some(queued_slot) = self.slot_of(player) {
            if queued_slot != slot {
                return Err(ActionError::AlreadyQueued);
            }
        }
        self.entries.insert(slot, player);
        Ok(())
    }

    pub fn remove_player(&mut self, player: PlayerId) {
        self.entries.retain(|_, &mut p| p != player);
    }

    pub fn clear(&mut self) { self.entries.clear(); }

    pub fn take(&mut self) -> Vec<(Slot, PlayerId)> {
        std::mem::take(&mut self.entries).into_iter().collect()
    }
}
