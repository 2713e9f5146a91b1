pub mod entity;
pub mod invariants;

pub use entity::{Truck, TruckStatus, TruckUpdate};
pub use invariants::validate_truck;

/// Canonical fixture record for unit tests.
#[cfg(test)]
pub fn test_truck(id: &str) -> Truck {
    use chrono::Utc;

    let now = Utc::now();
    Truck {
        id: Some(id.to_string()),
        brand: "Mercedes-Benz".to_string(),
        model: "Actros 1845".to_string(),
        year: 2016,
        price: 45_000,
        mileage: "850,000 km".to_string(),
        location: "Germany".to_string(),
        transmission: "PowerShift 3 - 12-speed".to_string(),
        engine_power: "450 HP".to_string(),
        fuel_type: "Diesel".to_string(),
        features: vec!["Retarder".to_string(), "ACC".to_string()],
        images: vec![
            "https://blob.example/trucks/1/images/a.jpg".to_string(),
            "https://blob.example/trucks/1/images/b.jpg".to_string(),
        ],
        videos: Vec::new(),
        main_image: "https://blob.example/trucks/1/images/a.jpg".to_string(),
        status: TruckStatus::Available,
        description: None,
        created_at: now,
        updated_at: now,
    }
}
