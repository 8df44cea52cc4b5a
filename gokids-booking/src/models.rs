use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use gokids_schedule::ScheduleDraft;
use serde::{Deserialize, Serialize};

/// One scheduled day inside a persisted ride, as stored in the rides table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RideDate {
    pub date: NaiveDate,
    pub morning: Option<NaiveTime>,
    pub afternoon: Option<NaiveTime>,
}

/// A confirmed, persisted ride schedule. Created exactly once per confirmed
/// draft and never edited by this workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Ride {
    pub id: i64,
    pub user_id: i64,
    pub vehicle_name: String,
    pub seats: i32,
    pub price: String,
    pub dates: Vec<RideDate>,
    pub pickup_address: String,
    pub drop_address: String,
    pub driver_name: String,
    pub total_rides: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The insertable form of a ride, derived from a draft at confirmation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRide {
    pub user_id: i64,
    pub vehicle_name: String,
    pub seats: i32,
    pub price: String,
    pub dates: Vec<RideDate>,
    pub pickup_address: String,
    pub drop_address: String,
    pub driver_name: String,
    pub total_rides: i32,
}

impl NewRide {
    pub fn from_draft(user_id: i64, draft: &ScheduleDraft) -> Self {
        let dates = draft
            .dates
            .iter()
            .map(|d| RideDate {
                date: d.date,
                morning: d.slots.morning,
                afternoon: d.slots.afternoon,
            })
            .collect();

        Self {
            user_id,
            vehicle_name: draft.vehicle.name.clone(),
            seats: draft.vehicle.seats,
            price: draft.vehicle.price.clone(),
            dates,
            pickup_address: draft.addresses.pickup.clone(),
            drop_address: draft.addresses.drop.clone(),
            driver_name: draft.vehicle.driver.name.clone(),
            total_rides: draft.total_rides as i32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gokids_fleet::{Driver, Vehicle};
    use gokids_schedule::{DateSelection, DraftAddresses, PickupSlots};
    use uuid::Uuid;

    #[test]
    fn new_ride_carries_the_draft_over() {
        let draft = ScheduleDraft {
            vehicle: Vehicle {
                id: Uuid::new_v4(),
                name: "Kids Van".to_string(),
                seats: 6,
                price: "2.50€ / ride".to_string(),
                driver: Driver {
                    id: Uuid::new_v4(),
                    name: "Maria".to_string(),
                    rating: 4.9,
                    bio: String::new(),
                    image_url: None,
                },
            },
            dates: vec![DateSelection {
                date: NaiveDate::from_ymd_opt(2024, 3, 4).unwrap(),
                slots: PickupSlots {
                    morning: NaiveTime::from_hms_opt(7, 30, 0),
                    afternoon: None,
                },
            }],
            addresses: DraftAddresses {
                pickup: "Hauptstrasse 12".to_string(),
                drop: "Schulweg 3".to_string(),
            },
            total_rides: 1,
        };

        let ride = NewRide::from_draft(7, &draft);
        assert_eq!(ride.user_id, 7);
        assert_eq!(ride.vehicle_name, "Kids Van");
        assert_eq!(ride.driver_name, "Maria");
        assert_eq!(ride.total_rides, 1);
        assert_eq!(ride.dates.len(), 1);
        assert_eq!(ride.dates[0].morning, NaiveTime::from_hms_opt(7, 30, 0));
        assert_eq!(ride.dates[0].afternoon, None);
    }
}
