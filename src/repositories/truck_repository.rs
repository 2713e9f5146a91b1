// src/repositories/truck_repository.rs
//
// Truck persistence against the remote document store.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::truck::{Truck, TruckStatus, TruckUpdate};
use crate::error::{AppError, AppResult};
use crate::integrations::firestore::{
    Document, FieldValue, FirestoreClient, StructuredQuery,
};

/// Collection holding the catalog documents.
pub const TRUCKS_COLLECTION: &str = "trucks";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait TruckRepository: Send + Sync {
    /// Fetch records, newest first. An optional status equality filter is
    /// the only predicate evaluated by the remote store.
    async fn list(&self, status: Option<TruckStatus>) -> AppResult<Vec<Truck>>;

    /// Point lookup; a stale or deleted id is `Ok(None)`, not an error.
    async fn get_by_id(&self, id: &str) -> AppResult<Option<Truck>>;

    /// Persist a new record and return the store-assigned id.
    async fn create(&self, truck: &Truck) -> AppResult<String>;

    /// Merge-update: only the fields present in `update` are written,
    /// plus a fresh `updatedAt` stamp.
    async fn update(&self, id: &str, update: &TruckUpdate) -> AppResult<()>;

    /// Remove the document. Media cleanup is the caller's concern.
    async fn delete(&self, id: &str) -> AppResult<()>;
}

pub struct RemoteTruckRepository {
    client: Arc<FirestoreClient>,
    collection: String,
}

impl RemoteTruckRepository {
    pub fn new(client: Arc<FirestoreClient>) -> Self {
        Self {
            client,
            collection: TRUCKS_COLLECTION.to_string(),
        }
    }

    /// Map a stored document to a Truck.
    fn doc_to_truck(doc: &Document) -> AppResult<Truck> {
        let id = doc
            .doc_id()
            .map(str::to_string)
            .ok_or_else(|| AppError::Other("Document has no resource name".to_string()))?;

        let status_raw = require_str(doc, "status")?;
        let status = TruckStatus::parse(&status_raw)
            .ok_or_else(|| AppError::Other(format!("Unknown truck status: {}", status_raw)))?;

        Ok(Truck {
            id: Some(id),
            brand: optional_str(doc, "brand").unwrap_or_default(),
            model: require_str(doc, "model")?,
            year: require_i64(doc, "year")? as i32,
            price: require_i64(doc, "price")?,
            mileage: require_str(doc, "mileage")?,
            location: require_str(doc, "location")?,
            transmission: require_str(doc, "transmission")?,
            engine_power: require_str(doc, "enginePower")?,
            fuel_type: require_str(doc, "fuelType")?,
            features: str_array(doc, "features"),
            images: str_array(doc, "images"),
            videos: str_array(doc, "videos"),
            main_image: require_str(doc, "mainImage")?,
            status,
            description: optional_str(doc, "description"),
            created_at: require_timestamp(doc, "createdAt")?,
            updated_at: require_timestamp(doc, "updatedAt")?,
        })
    }

    /// Full field map for a create.
    fn truck_to_fields(truck: &Truck) -> HashMap<String, FieldValue> {
        let mut fields = HashMap::new();
        fields.insert("brand".to_string(), FieldValue::string(&truck.brand));
        fields.insert("model".to_string(), FieldValue::string(&truck.model));
        fields.insert("year".to_string(), FieldValue::integer(truck.year as i64));
        fields.insert("price".to_string(), FieldValue::integer(truck.price));
        fields.insert("mileage".to_string(), FieldValue::string(&truck.mileage));
        fields.insert("location".to_string(), FieldValue::string(&truck.location));
        fields.insert(
            "transmission".to_string(),
            FieldValue::string(&truck.transmission),
        );
        fields.insert(
            "enginePower".to_string(),
            FieldValue::string(&truck.engine_power),
        );
        fields.insert("fuelType".to_string(), FieldValue::string(&truck.fuel_type));
        fields.insert(
            "features".to_string(),
            FieldValue::string_array(truck.features.iter().cloned()),
        );
        fields.insert(
            "images".to_string(),
            FieldValue::string_array(truck.images.iter().cloned()),
        );
        fields.insert(
            "videos".to_string(),
            FieldValue::string_array(truck.videos.iter().cloned()),
        );
        fields.insert(
            "mainImage".to_string(),
            FieldValue::string(&truck.main_image),
        );
        fields.insert(
            "status".to_string(),
            FieldValue::string(truck.status.as_str()),
        );
        if let Some(description) = &truck.description {
            fields.insert("description".to_string(), FieldValue::string(description));
        }
        fields.insert(
            "createdAt".to_string(),
            FieldValue::timestamp(truck.created_at),
        );
        fields.insert(
            "updatedAt".to_string(),
            FieldValue::timestamp(truck.updated_at),
        );
        fields
    }

    /// Field map + mask for a merge-update. `updatedAt` is always stamped.
    fn update_to_fields(update: &TruckUpdate) -> (HashMap<String, FieldValue>, Vec<String>) {
        let mut fields = HashMap::new();
        let mut mask = Vec::new();

        let mut put = |name: &str, value: FieldValue| {
            fields.insert(name.to_string(), value);
            mask.push(name.to_string());
        };

        if let Some(brand) = &update.brand {
            put("brand", FieldValue::string(brand));
        }
        if let Some(model) = &update.model {
            put("model", FieldValue::string(model));
        }
        if let Some(year) = update.year {
            put("year", FieldValue::integer(year as i64));
        }
        if let Some(price) = update.price {
            put("price", FieldValue::integer(price));
        }
        if let Some(mileage) = &update.mileage {
            put("mileage", FieldValue::string(mileage));
        }
        if let Some(location) = &update.location {
            put("location", FieldValue::string(location));
        }
        if let Some(transmission) = &update.transmission {
            put("transmission", FieldValue::string(transmission));
        }
        if let Some(engine_power) = &update.engine_power {
            put("enginePower", FieldValue::string(engine_power));
        }
        if let Some(fuel_type) = &update.fuel_type {
            put("fuelType", FieldValue::string(fuel_type));
        }
        if let Some(features) = &update.features {
            put("features", FieldValue::string_array(features.iter().cloned()));
        }
        if let Some(images) = &update.images {
            put("images", FieldValue::string_array(images.iter().cloned()));
        }
        if let Some(videos) = &update.videos {
            put("videos", FieldValue::string_array(videos.iter().cloned()));
        }
        if let Some(main_image) = &update.main_image {
            put("mainImage", FieldValue::string(main_image));
        }
        if let Some(status) = update.status {
            put("status", FieldValue::string(status.as_str()));
        }
        if let Some(description) = &update.description {
            put("description", FieldValue::string(description));
        }

        put("updatedAt", FieldValue::timestamp(Utc::now()));

        (fields, mask)
    }
}

#[async_trait]
impl TruckRepository for RemoteTruckRepository {
    async fn list(&self, status: Option<TruckStatus>) -> AppResult<Vec<Truck>> {
        let mut query =
            StructuredQuery::collection(&self.collection).order_by_desc("createdAt");
        if let Some(status) = status {
            query = query.where_eq("status", FieldValue::string(status.as_str()));
        }

        let documents = self.client.run_query(query).await?;
        documents.iter().map(Self::doc_to_truck).collect()
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<Truck>> {
        let document = self.client.get_document(&self.collection, id).await?;
        document.as_ref().map(Self::doc_to_truck).transpose()
    }

    async fn create(&self, truck: &Truck) -> AppResult<String> {
        let document = self
            .client
            .create_document(&self.collection, Self::truck_to_fields(truck))
            .await?;
        document
            .doc_id()
            .map(str::to_string)
            .ok_or_else(|| AppError::Other("Created document has no resource name".to_string()))
    }

    async fn update(&self, id: &str, update: &TruckUpdate) -> AppResult<()> {
        let (fields, mask) = Self::update_to_fields(update);
        self.client
            .patch_document(&self.collection, id, fields, &mask)
            .await
    }

    async fn delete(&self, id: &str) -> AppResult<()> {
        self.client.delete_document(&self.collection, id).await
    }
}

// ============================================================================
// Field extraction helpers (document → domain)
// ============================================================================

fn require_str(doc: &Document, key: &str) -> AppResult<String> {
    doc.fields
        .get(key)
        .and_then(FieldValue::as_str)
        .map(str::to_string)
        .ok_or_else(|| AppError::Other(format!("Document missing string field '{}'", key)))
}

fn optional_str(doc: &Document, key: &str) -> Option<String> {
    doc.fields
        .get(key)
        .and_then(FieldValue::as_str)
        .map(str::to_string)
}

fn require_i64(doc: &Document, key: &str) -> AppResult<i64> {
    doc.fields
        .get(key)
        .and_then(FieldValue::as_i64)
        .ok_or_else(|| AppError::Other(format!("Document missing numeric field '{}'", key)))
}

fn str_array(doc: &Document, key: &str) -> Vec<String> {
    doc.fields
        .get(key)
        .and_then(FieldValue::as_str_array)
        .unwrap_or_default()
}

fn require_timestamp(doc: &Document, key: &str) -> AppResult<DateTime<Utc>> {
    doc.fields
        .get(key)
        .and_then(FieldValue::as_timestamp)
        .or(doc.create_time)
        .ok_or_else(|| AppError::Other(format!("Document missing timestamp field '{}'", key)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::truck::test_truck;

    fn persisted_document(truck: &Truck) -> Document {
        Document {
            name: Some(format!(
                "projects/demo/databases/(default)/documents/trucks/{}",
                truck.id.as_deref().unwrap()
            )),
            fields: RemoteTruckRepository::truck_to_fields(truck),
            create_time: None,
            update_time: None,
        }
    }

    #[test]
    fn test_document_maps_back_to_truck() {
        let truck = test_truck("t-9");
        let doc = persisted_document(&truck);

        let mapped = RemoteTruckRepository::doc_to_truck(&doc).unwrap();
        assert_eq!(mapped.id.as_deref(), Some("t-9"));
        assert_eq!(mapped.model, truck.model);
        assert_eq!(mapped.price, truck.price);
        assert_eq!(mapped.status, truck.status);
        assert_eq!(mapped.images, truck.images);
        assert_eq!(mapped.main_image, truck.main_image);
    }

    #[test]
    fn test_missing_required_field_is_an_error() {
        let truck = test_truck("t-9");
        let mut doc = persisted_document(&truck);
        doc.fields.remove("model");

        assert!(RemoteTruckRepository::doc_to_truck(&doc).is_err());
    }

    #[test]
    fn test_unknown_status_is_an_error() {
        let truck = test_truck("t-9");
        let mut doc = persisted_document(&truck);
        doc.fields
            .insert("status".to_string(), FieldValue::string("scrapped"));

        assert!(RemoteTruckRepository::doc_to_truck(&doc).is_err());
    }

    #[test]
    fn test_update_mask_contains_only_provided_fields() {
        let update = TruckUpdate {
            price: Some(39_000),
            status: Some(TruckStatus::Reserved),
            ..Default::default()
        };

        let (fields, mask) = RemoteTruckRepository::update_to_fields(&update);
        assert_eq!(mask, vec!["price", "status", "updatedAt"]);
        assert_eq!(fields.get("price"), Some(&FieldValue::integer(39_000)));
        assert_eq!(
            fields.get("status"),
            Some(&FieldValue::string("reserved"))
        );
        assert!(fields.contains_key("updatedAt"));
    }
}
