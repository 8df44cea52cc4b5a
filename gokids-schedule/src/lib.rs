pub mod builder;
pub mod calendar;
pub mod draft;
pub mod store;

pub use builder::{AddressKind, Period, ScheduleBuilder, ScheduleError};
pub use calendar::CalendarWindow;
pub use draft::{DateSelection, DraftAddresses, PickupSlots, ScheduleDraft};
pub use store::DraftStore;
