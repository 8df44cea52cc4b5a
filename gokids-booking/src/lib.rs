pub mod confirmation;
pub mod models;
pub mod repository;
pub mod wallet;

pub use confirmation::{ConfirmError, ConfirmationService, Confirmed, Overview};
pub use models::{NewRide, Ride, RideDate};
pub use repository::{DebitOutcome, LedgerRepository, RideRepository};
pub use wallet::{default_packages, CreditPackage, TopUpError, TopUpService};
