use chrono::{NaiveDate, NaiveTime};
use gokids_fleet::Vehicle;
use serde::{Deserialize, Serialize};

/// Morning/afternoon pickup times for one selected date. Either, both or
/// neither may be set; a date with neither is an incomplete selection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PickupSlots {
    pub morning: Option<NaiveTime>,
    pub afternoon: Option<NaiveTime>,
}

impl PickupSlots {
    pub fn slot_count(&self) -> u32 {
        self.morning.is_some() as u32 + self.afternoon.is_some() as u32
    }

    pub fn is_empty(&self) -> bool {
        self.slot_count() == 0
    }
}

/// One chosen calendar date with its pickup slots.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateSelection {
    pub date: NaiveDate,
    pub slots: PickupSlots,
}

impl DateSelection {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            slots: PickupSlots::default(),
        }
    }
}

/// Resolved pickup/drop addresses for a draft. Overrides have already been
/// applied; these are plain strings from here on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftAddresses {
    pub pickup: String,
    pub drop: String,
}

/// An assembled, unconfirmed schedule. Held in the transient draft store
/// between the builder and the confirmation step; cleared on success.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScheduleDraft {
    pub vehicle: Vehicle,
    pub dates: Vec<DateSelection>,
    pub addresses: DraftAddresses,
    pub total_rides: u32,
}

impl ScheduleDraft {
    /// Number of non-null pickup slots across all dates. `total_rides` must
    /// always equal this; it is stored denormalized for the hand-off only.
    pub fn counted_rides(&self) -> u32 {
        self.dates.iter().map(|d| d.slots.slot_count()).sum()
    }
}
