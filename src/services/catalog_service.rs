// src/services/catalog_service.rs
use std::sync::Arc;

use chrono::Utc;
use uuid::Uuid;

use crate::domain::truck::{validate_truck, Truck, TruckStatus, TruckUpdate};
use crate::domain::SearchFilters;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, TruckCreated, TruckDeleted, TruckUpdated};
use crate::repositories::TruckRepository;
use crate::services::media_service::{MediaService, UploadFile};

#[derive(Debug, Clone)]
pub struct CreateTruckRequest {
    pub brand: String,
    pub model: String,
    pub year: i32,
    pub price: i64,
    pub mileage: String,
    pub location: String,
    pub transmission: String,
    pub engine_power: String,
    pub fuel_type: String,
    pub features: Vec<String>,
    pub images: Vec<String>,
    pub videos: Vec<String>,
    pub main_image: String,
    pub status: TruckStatus,
    pub description: Option<String>,
}

impl CreateTruckRequest {
    fn into_truck(self) -> Truck {
        let now = Utc::now();
        Truck {
            id: None,
            brand: self.brand,
            model: self.model,
            year: self.year,
            price: self.price,
            mileage: self.mileage,
            location: self.location,
            transmission: self.transmission,
            engine_power: self.engine_power,
            fuel_type: self.fuel_type,
            features: self.features,
            images: self.images,
            videos: self.videos,
            main_image: self.main_image,
            status: self.status,
            description: self.description,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Catalog operations: the read path for browsing and the write path for
/// the authoring workflow. Owns no retained state and never retries; a
/// transient remote failure surfaces to the caller as-is.
pub struct CatalogService {
    truck_repo: Arc<dyn TruckRepository>,
    media_service: Arc<MediaService>,
    event_bus: Arc<EventBus>,
}

impl CatalogService {
    pub fn new(
        truck_repo: Arc<dyn TruckRepository>,
        media_service: Arc<MediaService>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            truck_repo,
            media_service,
            event_bus,
        }
    }

    /// The main listing: available trucks, newest first.
    pub async fn list_available(&self) -> AppResult<Vec<Truck>> {
        self.truck_repo.list(Some(TruckStatus::Available)).await
    }

    /// Point lookup; a stale or deleted id yields `Ok(None)`.
    pub async fn get_truck(&self, id: &str) -> AppResult<Option<Truck>> {
        self.truck_repo.get_by_id(id).await
    }

    /// Filtered search. The remote store evaluates at most a status
    /// equality plus ordering; every range and fuel-type predicate is
    /// applied here over the full result set. Fine at storefront scale,
    /// and a known limit beyond it.
    pub async fn search(&self, filters: &SearchFilters) -> AppResult<Vec<Truck>> {
        let trucks = self.truck_repo.list(filters.status).await?;
        Ok(trucks
            .into_iter()
            .filter(|truck| filters.matches(truck))
            .collect())
    }

    /// Persist a new listing whose media URLs are already known.
    pub async fn create_truck(&self, request: CreateTruckRequest) -> AppResult<String> {
        let truck = request.into_truck();
        validate_truck(&truck).map_err(AppError::Domain)?;

        let id = self.truck_repo.create(&truck).await?;
        self.event_bus
            .emit(TruckCreated::new(id.clone(), truck.model.clone()));
        Ok(id)
    }

    /// Authoring flow: upload media first, then create the document.
    ///
    /// Images are uploaded sequentially so the resulting `images` array
    /// keeps the input order; the first image becomes the main image when
    /// the request does not name one. Media is addressed under a staging id
    /// because the document id does not exist yet.
    pub async fn create_truck_with_media(
        &self,
        mut request: CreateTruckRequest,
        images: Vec<UploadFile>,
        videos: Vec<UploadFile>,
    ) -> AppResult<String> {
        let staging_id = Uuid::new_v4().to_string();

        for (index, file) in images.iter().enumerate() {
            let url = self
                .media_service
                .upload_image(file, &staging_id, index)
                .await?;
            request.images.push(url);
        }
        for file in &videos {
            let url = self.media_service.upload_video(file, &staging_id).await?;
            request.videos.push(url);
        }

        if request.main_image.is_empty() {
            if let Some(first) = request.images.first() {
                request.main_image = first.clone();
            }
        }

        self.create_truck(request).await
    }

    /// Merge-update an existing listing.
    pub async fn update_truck(&self, id: &str, update: TruckUpdate) -> AppResult<()> {
        if update.is_empty() {
            return Ok(());
        }
        self.truck_repo.update(id, &update).await?;
        self.event_bus.emit(TruckUpdated::new(id.to_string()));
        Ok(())
    }

    /// Retire a listing: request deletion of every owned media asset, then
    /// delete the document. A failing asset delete is logged and skipped -
    /// one missing blob must never block removal of the catalog entry.
    pub async fn delete_truck(&self, id: &str) -> AppResult<()> {
        let truck = self
            .truck_repo
            .get_by_id(id)
            .await?
            .ok_or(AppError::NotFound)?;

        for url in truck.asset_urls() {
            if let Err(err) = self.media_service.delete_asset(url).await {
                log::warn!("Failed to delete asset {} of truck {}: {}", url, id, err);
            }
        }

        self.truck_repo.delete(id).await?;
        self.event_bus.emit(TruckDeleted::new(id.to_string()));
        Ok(())
    }
}
