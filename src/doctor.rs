//! Doctor records and their per-doctor slot lists.

use serde::{Deserialize, Serialize};

use crate::types::{DoctorId, SlotId, TokenId};

/// Bookable time interval owned by one doctor. Times are opaque strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// Identifier, unique within the owning doctor.
    pub id: SlotId,
    /// Start time as entered.
    pub start: String,
    /// End time as entered.
    pub end: String,
    /// Routine token currently holding this slot.
    pub booked_by: Option<TokenId>,
}

impl Slot {
    /// True while an outstanding routine token holds this slot.
    pub fn is_booked(&self) -> bool {
        self.booked_by.is_some()
    }
}

impl std::fmt::Display for Slot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Slot[id={} {}-{} booked={}]",
            self.id,
            self.start,
            self.end,
            self.is_booked()
        )
    }
}

/// Ordered slot collection.
///
/// Scan order is most-recently-added first. Slots are stored in insertion
/// order and walked back to front, so adding a slot is a push.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotList {
    slots: Vec<Slot>,
}

impl SlotList {
    /// Adds an unbooked slot at the front of the scan order.
    pub fn add(&mut self, id: SlotId, start: impl Into<String>, end: impl Into<String>) {
        self.slots.push(Slot {
            id,
            start: start.into(),
            end: end.into(),
            booked_by: None,
        });
    }

    /// Removes the first slot in scan order matching `id`, booked or not.
    pub fn cancel(&mut self, id: SlotId) -> bool {
        match self.slots.iter().rposition(|s| s.id == id) {
            Some(pos) => {
                self.slots.remove(pos);
                true
            }
            None => false,
        }
    }

    /// First unbooked slot in scan order.
    pub fn find_next_free(&self) -> Option<&Slot> {
        self.iter().find(|s| !s.is_booked())
    }

    /// Books the slot [`SlotList::find_next_free`] would return for `token`.
    pub fn book_next_free(&mut self, token: TokenId) -> Option<SlotId> {
        let slot = self.slots.iter_mut().rev().find(|s| !s.is_booked())?;
        slot.booked_by = Some(token);
        Some(slot.id)
    }

    /// Frees slot `id` if `token` still holds it.
    ///
    /// A slot cancelled and re-added under the same id is held by a different
    /// token, or by none, and is left alone.
    pub fn release(&mut self, id: SlotId, token: TokenId) -> bool {
        match self
            .slots
            .iter_mut()
            .rev()
            .find(|s| s.id == id && s.booked_by == Some(token))
        {
            Some(slot) => {
                slot.booked_by = None;
                true
            }
            None => false,
        }
    }

    /// First slot in scan order matching `id`.
    pub fn get(&self, id: SlotId) -> Option<&Slot> {
        self.iter().find(|s| s.id == id)
    }

    /// Iterates slots in scan order.
    pub fn iter(&self) -> impl Iterator<Item = &Slot> {
        self.slots.iter().rev()
    }

    /// Count of slots currently booked.
    pub fn booked_count(&self) -> usize {
        self.slots.iter().filter(|s| s.is_booked()).count()
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// True when the doctor has no slots.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Doctor with an owned slot list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    /// Caller-supplied identifier.
    pub id: DoctorId,
    /// Display name.
    pub name: String,
    /// Specialization label.
    pub specialization: String,
    /// Bookable slots.
    pub slots: SlotList,
}

impl Doctor {
    /// Builds a doctor with no slots.
    pub fn new(id: DoctorId, name: impl Into<String>, specialization: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            specialization: specialization.into(),
            slots: SlotList::default(),
        }
    }
}

impl std::fmt::Display for Doctor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Doctor[id={},name={},spec={}]",
            self.id, self.name, self.specialization
        )
    }
}
