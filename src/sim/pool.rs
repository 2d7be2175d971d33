//! Bounded entity pool with generation-tagged slot ids
//!
//! Slots are allocated once up front and reused. Releasing a slot bumps its
//! generation, so an id handed out before the release never resolves again.
//! Active entries iterate in acquisition order.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SimError};

/// Handle to a pooled entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotId {
    index: u32,
    generation: u32,
}

impl SlotId {
    /// Rebuild a handle from its parts (e.g. when it comes back from the host)
    pub fn from_parts(index: u32, generation: u32) -> Self {
        Self { index, generation }
    }

    #[inline]
    pub fn index(&self) -> usize {
        self.index as usize
    }

    #[inline]
    pub fn generation(&self) -> u32 {
        self.generation
    }
}

#[derive(Debug, Clone)]
struct Slot<T> {
    generation: u32,
    value: Option<T>,
}

/// Fixed-capacity pool of reusable slots
#[derive(Debug, Clone)]
pub struct Pool<T> {
    name: &'static str,
    slots: Vec<Slot<T>>,
    /// Active slot indices, oldest first
    order: Vec<u32>,
}

impl<T> Pool<T> {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let slots = (0..capacity)
            .map(|_| Slot {
                generation: 0,
                value: None,
            })
            .collect();
        Self {
            name,
            slots,
            order: Vec::with_capacity(capacity),
        }
    }

    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of active slots
    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.order.len() == self.slots.len()
    }

    /// Activate a free slot holding `value`
    ///
    /// The lowest free index is reused first, so a slot released earlier in
    /// the same tick is the one handed back out.
    pub fn acquire(&mut self, value: T) -> Result<SlotId> {
        let Some(index) = self.slots.iter().position(|s| s.value.is_none()) else {
            return Err(SimError::PoolExhausted {
                pool: self.name,
                capacity: self.slots.len(),
            });
        };

        let slot = &mut self.slots[index];
        slot.value = Some(value);
        self.order.push(index as u32);

        Ok(SlotId {
            index: index as u32,
            generation: slot.generation,
        })
    }

    /// Deactivate a slot, returning its entity
    ///
    /// Stale or already-released ids are ignored and return `None`.
    pub fn release(&mut self, id: SlotId) -> Option<T> {
        let slot = self.slots.get_mut(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        let value = slot.value.take()?;
        slot.generation = slot.generation.wrapping_add(1);
        self.order.retain(|&i| i != id.index);
        Some(value)
    }

    /// Release every active slot matching `pred`, reporting each one to `on_release`
    pub fn release_where<F, R>(&mut self, mut pred: F, mut on_release: R) -> usize
    where
        F: FnMut(&T) -> bool,
        R: FnMut(SlotId, T),
    {
        let mut released = 0;
        let mut i = 0;
        while i < self.order.len() {
            let index = self.order[i] as usize;
            let slot = &mut self.slots[index];
            if slot.value.as_ref().is_some_and(&mut pred) {
                let id = SlotId {
                    index: index as u32,
                    generation: slot.generation,
                };
                if let Some(value) = slot.value.take() {
                    slot.generation = slot.generation.wrapping_add(1);
                    on_release(id, value);
                    released += 1;
                }
                self.order.remove(i);
            } else {
                i += 1;
            }
        }
        released
    }

    /// Release everything
    pub fn clear(&mut self) {
        self.release_where(|_| true, |_, _| {});
    }

    pub fn contains(&self, id: SlotId) -> bool {
        self.get(id).is_some()
    }

    pub fn get(&self, id: SlotId) -> Option<&T> {
        let slot = self.slots.get(id.index())?;
        if slot.generation != id.generation {
            return None;
        }
        slot.value.as_ref()
    }

    /// Oldest active entry
    pub fn first(&self) -> Option<(SlotId, &T)> {
        self.iter().next()
    }

    /// Active entries, oldest first
    pub fn iter(&self) -> impl Iterator<Item = (SlotId, &T)> + '_ {
        self.order.iter().filter_map(move |&index| {
            let slot = &self.slots[index as usize];
            slot.value.as_ref().map(|value| {
                (
                    SlotId {
                        index,
                        generation: slot.generation,
                    },
                    value,
                )
            })
        })
    }
}
