use super::entity::Truck;
use crate::domain::{DomainError, DomainResult};

/// Validates all Truck invariants
pub fn validate_truck(truck: &Truck) -> DomainResult<()> {
    validate_model(&truck.model)?;
    validate_year(truck.year)?;
    validate_main_image(truck)?;
    Ok(())
}

/// Model cannot be empty
fn validate_model(model: &str) -> DomainResult<()> {
    if model.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Truck model cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Year must be a plausible build year
fn validate_year(year: i32) -> DomainResult<()> {
    if !(1950..=2100).contains(&year) {
        return Err(DomainError::InvariantViolation(format!(
            "Implausible truck year: {}",
            year
        )));
    }
    Ok(())
}

/// The primary image must be a member of the gallery when a gallery exists
fn validate_main_image(truck: &Truck) -> DomainResult<()> {
    if truck.images.is_empty() {
        return Ok(());
    }
    if !truck.images.iter().any(|url| url == &truck.main_image) {
        return Err(DomainError::InvariantViolation(
            "Main image is not part of the image gallery".to_string(),
        ));
    }
    Ok(())
}

/// Invariants that must hold for the Truck domain:
///
/// 1. Identity is assigned by the remote store and immutable afterwards
/// 2. Model cannot be empty
/// 3. Main image must be a member of the image list (when images exist)
/// 4. Status ordering (available → reserved → sold) is an authoring-workflow
///    rule, not enforced by this crate
/// 5. Created timestamp never changes; updated reflects last modification
