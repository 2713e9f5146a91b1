use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::truck_summary::TruckSummary;

/// A commercial truck listed for export sale.
/// This is the root entity of the catalog; the remote document store owns it
/// and the access layer never caches it beyond a single fetch cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Truck {
    /// Document id assigned by the remote store.
    /// Absent until the record has been persisted.
    pub id: Option<String>,

    /// Manufacturer, e.g. "Mercedes-Benz"
    pub brand: String,

    /// Model designation, e.g. "Actros 1845"
    pub model: String,

    /// Model year
    pub year: i32,

    /// Asking price in whole currency units
    pub price: i64,

    /// Odometer reading, free-form ("850,000 km")
    pub mileage: String,

    /// Current location of the vehicle
    pub location: String,

    /// Transmission description
    pub transmission: String,

    /// Engine power description
    pub engine_power: String,

    /// Fuel type, e.g. "Diesel"
    pub fuel_type: String,

    /// Feature tags
    pub features: Vec<String>,

    /// Gallery image URLs, in display order
    pub images: Vec<String>,

    /// Optional video URLs (not order-sensitive for display)
    pub videos: Vec<String>,

    /// Primary image URL; must be a member of `images`
    pub main_image: String,

    /// Lifecycle status
    pub status: TruckStatus,

    /// Optional free-form description
    pub description: Option<String>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

/// Lifecycle status of a listing.
///
/// Downstream the transitions are monotonic (available → reserved → sold),
/// but that ordering is enforced by the authoring workflow, not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TruckStatus {
    Available,
    Reserved,
    Sold,
}

impl TruckStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            TruckStatus::Available => "available",
            TruckStatus::Reserved => "reserved",
            TruckStatus::Sold => "sold",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "available" => Some(TruckStatus::Available),
            "reserved" => Some(TruckStatus::Reserved),
            "sold" => Some(TruckStatus::Sold),
            _ => None,
        }
    }
}

impl std::fmt::Display for TruckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A merge-update for an existing listing: only the provided fields are
/// written, everything else is left untouched by the remote store.
#[derive(Debug, Clone, Default)]
pub struct TruckUpdate {
    pub brand: Option<String>,
    pub model: Option<String>,
    pub year: Option<i32>,
    pub price: Option<i64>,
    pub mileage: Option<String>,
    pub location: Option<String>,
    pub transmission: Option<String>,
    pub engine_power: Option<String>,
    pub fuel_type: Option<String>,
    pub features: Option<Vec<String>>,
    pub images: Option<Vec<String>>,
    pub videos: Option<Vec<String>>,
    pub main_image: Option<String>,
    pub status: Option<TruckStatus>,
    pub description: Option<String>,
}

impl TruckUpdate {
    pub fn is_empty(&self) -> bool {
        self.brand.is_none()
            && self.model.is_none()
            && self.year.is_none()
            && self.price.is_none()
            && self.mileage.is_none()
            && self.location.is_none()
            && self.transmission.is_none()
            && self.engine_power.is_none()
            && self.fuel_type.is_none()
            && self.features.is_none()
            && self.images.is_none()
            && self.videos.is_none()
            && self.main_image.is_none()
            && self.status.is_none()
            && self.description.is_none()
    }
}

impl Truck {
    /// Minimal projection used by the preference lists.
    /// Only persisted records (with an id) can be projected.
    pub fn summary(&self) -> Option<TruckSummary> {
        let id = self.id.clone()?;
        Some(TruckSummary {
            id,
            brand: self.brand.clone(),
            model: self.model.clone(),
            year: self.year,
            image: self.main_image.clone(),
            status: self.status.to_string(),
            location: self.location.clone(),
            mileage: self.mileage.clone(),
        })
    }

    /// All blob URLs owned by this record (images then videos).
    pub fn asset_urls(&self) -> impl Iterator<Item = &str> {
        self.images
            .iter()
            .chain(self.videos.iter())
            .map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_truck;
    use super::*;

    #[test]
    fn test_summary_requires_a_persisted_id() {
        let mut truck = test_truck("t-1");
        let summary = truck.summary().unwrap();
        assert_eq!(summary.id, "t-1");
        assert_eq!(summary.image, truck.main_image);
        assert_eq!(summary.status, "available");

        truck.id = None;
        assert!(truck.summary().is_none());
    }

    #[test]
    fn test_asset_urls_cover_images_and_videos() {
        let mut truck = test_truck("t-1");
        truck.videos = vec!["https://blob.example/trucks/1/videos/v.mp4".to_string()];

        let urls: Vec<_> = truck.asset_urls().collect();
        assert_eq!(urls.len(), 3);
        assert_eq!(urls[2], "https://blob.example/trucks/1/videos/v.mp4");
    }

    #[test]
    fn test_empty_update_is_empty() {
        assert!(TruckUpdate::default().is_empty());
        let update = TruckUpdate {
            price: Some(1),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }

    #[test]
    fn test_status_parse_round_trip() {
        for status in [
            TruckStatus::Available,
            TruckStatus::Reserved,
            TruckStatus::Sold,
        ] {
            assert_eq!(TruckStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(TruckStatus::parse("exported"), None);
    }
}
