use chrono::{NaiveDate, NaiveTime};
use gokids_fleet::Vehicle;
use serde::{Deserialize, Serialize};

use crate::draft::{DateSelection, DraftAddresses, PickupSlots, ScheduleDraft};

/// Morning or afternoon pickup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Period {
    Morning,
    Afternoon,
}

impl Period {
    /// Time used when a slot is enabled without an explicit choice.
    pub fn default_time(&self) -> NaiveTime {
        match self {
            // 07:30 and 15:30 are always valid H:M values.
            Period::Morning => NaiveTime::from_hms_opt(7, 30, 0).unwrap(),
            Period::Afternoon => NaiveTime::from_hms_opt(15, 30, 0).unwrap(),
        }
    }
}

/// Which draft address an override applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressKind {
    Home,
    Class,
}

#[derive(Debug, thiserror::Error)]
pub enum ScheduleError {
    #[error("No dates selected")]
    EmptySelection,

    #[error("Date {0} has no pickup slot set")]
    MissingPickupSlots(NaiveDate),

    #[error("No vehicle selected")]
    NoVehicleSelected,

    #[error("Date {0} is not selected")]
    DateNotSelected(NaiveDate),

    #[error("Alternative {0:?} address is enabled but empty")]
    EmptyAddressOverride(AddressKind),
}

#[derive(Debug, Clone, Default)]
struct AddressOverride {
    use_alternative: bool,
    text: String,
}

impl AddressOverride {
    fn resolve<'a>(&'a self, profile: &'a str) -> &'a str {
        if self.use_alternative {
            &self.text
        } else {
            profile
        }
    }
}

/// Assembles a [`ScheduleDraft`]: date selection, per-date pickup slots,
/// vehicle choice and address overrides. Purely local state; nothing here
/// talks to the network.
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    home_address: String,
    class_address: String,
    selections: Vec<DateSelection>,
    vehicle: Option<Vehicle>,
    home_override: AddressOverride,
    class_override: AddressOverride,
}

impl ScheduleBuilder {
    /// Starts a builder seeded with the parent's profile addresses.
    pub fn new(home_address: impl Into<String>, class_address: impl Into<String>) -> Self {
        Self {
            home_address: home_address.into(),
            class_address: class_address.into(),
            selections: Vec::new(),
            vehicle: None,
            home_override: AddressOverride::default(),
            class_override: AddressOverride::default(),
        }
    }

    pub fn selections(&self) -> &[DateSelection] {
        &self.selections
    }

    pub fn selected_vehicle(&self) -> Option<&Vehicle> {
        self.vehicle.as_ref()
    }

    /// Selects a date, or removes it together with all of its slot state if
    /// it was already selected. A re-added date starts with both slots unset.
    pub fn toggle_date(&mut self, date: NaiveDate) {
        if let Some(pos) = self.selections.iter().position(|d| d.date == date) {
            self.selections.remove(pos);
        } else {
            self.selections.push(DateSelection::new(date));
        }
    }

    pub fn is_selected(&self, date: NaiveDate) -> bool {
        self.selections.iter().any(|d| d.date == date)
    }

    /// Sets or clears a pickup slot on an already-selected date.
    pub fn set_pickup_slot(
        &mut self,
        date: NaiveDate,
        period: Period,
        time: Option<NaiveTime>,
    ) -> Result<(), ScheduleError> {
        let selection = self
            .selections
            .iter_mut()
            .find(|d| d.date == date)
            .ok_or(ScheduleError::DateNotSelected(date))?;

        match period {
            Period::Morning => selection.slots.morning = time,
            Period::Afternoon => selection.slots.afternoon = time,
        }
        Ok(())
    }

    /// Enables a slot with the fixed default time (07:30 morning, 15:30
    /// afternoon).
    pub fn enable_slot(&mut self, date: NaiveDate, period: Period) -> Result<(), ScheduleError> {
        self.set_pickup_slot(date, period, Some(period.default_time()))
    }

    pub fn clear_slot(&mut self, date: NaiveDate, period: Period) -> Result<(), ScheduleError> {
        self.set_pickup_slot(date, period, None)
    }

    /// Single-select; replaces any prior vehicle choice.
    pub fn select_vehicle(&mut self, vehicle: Vehicle) {
        self.vehicle = Some(vehicle);
    }

    /// When `use_alternative` is on, `text` replaces the profile address for
    /// this draft; when off, the profile address is used verbatim.
    pub fn set_address_override(
        &mut self,
        which: AddressKind,
        use_alternative: bool,
        text: impl Into<String>,
    ) {
        let entry = match which {
            AddressKind::Home => &mut self.home_override,
            AddressKind::Class => &mut self.class_override,
        };
        entry.use_alternative = use_alternative;
        entry.text = text.into();
    }

    /// Derived total: one ride per set pickup slot.
    pub fn total_rides(&self) -> u32 {
        self.selections.iter().map(|d| d.slots.slot_count()).sum()
    }

    /// A draft is confirmable when at least one date is selected, every
    /// selected date has a pickup slot, and a vehicle is chosen. A slotless
    /// date stays in the list but blocks confirmation.
    pub fn validate(&self) -> Result<(), ScheduleError> {
        if self.selections.is_empty() {
            return Err(ScheduleError::EmptySelection);
        }
        if let Some(incomplete) = self.selections.iter().find(|d| d.slots.is_empty()) {
            return Err(ScheduleError::MissingPickupSlots(incomplete.date));
        }
        if self.vehicle.is_none() {
            return Err(ScheduleError::NoVehicleSelected);
        }
        if self.home_override.use_alternative && self.home_override.text.trim().is_empty() {
            return Err(ScheduleError::EmptyAddressOverride(AddressKind::Home));
        }
        if self.class_override.use_alternative && self.class_override.text.trim().is_empty() {
            return Err(ScheduleError::EmptyAddressOverride(AddressKind::Class));
        }
        Ok(())
    }

    pub fn is_confirmable(&self) -> bool {
        self.validate().is_ok()
    }

    /// Produces the draft for hand-off to the confirmation step.
    pub fn build(&self) -> Result<ScheduleDraft, ScheduleError> {
        self.validate()?;

        let vehicle = self
            .vehicle
            .clone()
            .ok_or(ScheduleError::NoVehicleSelected)?;

        let mut dates = self.selections.clone();
        dates.sort_by_key(|d| d.date);

        let total_rides = dates.iter().map(|d| d.slots.slot_count()).sum();

        Ok(ScheduleDraft {
            vehicle,
            dates,
            addresses: DraftAddresses {
                pickup: self.home_override.resolve(&self.home_address).to_string(),
                drop: self.class_override.resolve(&self.class_address).to_string(),
            },
            total_rides,
        })
    }
}
