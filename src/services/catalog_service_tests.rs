// src/services/catalog_service_tests.rs
//
// UNIT TESTS: catalog operations against mocked remote stores
//
// PURPOSE:
// - Prove range filters are applied client-side over the broad result set
// - Prove deletion survives per-asset media failures and still removes the
//   catalog document
// - Prove the authoring upload flow keeps gallery order and picks the
//   first image as the main image

#[cfg(test)]
mod catalog_tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};

    use crate::domain::truck::{test_truck, Truck, TruckStatus};
    use crate::domain::SearchFilters;
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::integrations::blobstore::client::MockBlobStore;
    use crate::repositories::MockTruckRepository;
    use crate::services::catalog_service::{CatalogService, CreateTruckRequest};
    use crate::services::media_service::{MediaService, UploadFile};

    fn service(repo: MockTruckRepository, blob: MockBlobStore) -> CatalogService {
        CatalogService::new(
            Arc::new(repo),
            Arc::new(MediaService::new(Arc::new(blob))),
            Arc::new(EventBus::new()),
        )
    }

    fn priced(id: &str, price: i64, status: TruckStatus) -> Truck {
        let mut truck = test_truck(id);
        truck.price = price;
        truck.status = status;
        truck
    }

    fn create_request() -> CreateTruckRequest {
        CreateTruckRequest {
            brand: "Volvo".to_string(),
            model: "FH16 750".to_string(),
            year: 2019,
            price: 62_000,
            mileage: "410,000 km".to_string(),
            location: "Sweden".to_string(),
            transmission: "I-Shift 12-speed".to_string(),
            engine_power: "750 HP".to_string(),
            fuel_type: "Diesel".to_string(),
            features: vec!["Hydraulics".to_string()],
            images: Vec::new(),
            videos: Vec::new(),
            main_image: String::new(),
            status: TruckStatus::Available,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_search_applies_price_range_client_side() {
        let mut repo = MockTruckRepository::new();
        repo.expect_list()
            .withf(|status| status.is_none())
            .returning(|_| {
                Ok(vec![
                    priced("t-40", 40_000, TruckStatus::Available),
                    priced("t-60", 60_000, TruckStatus::Sold),
                    priced("t-75", 75_000, TruckStatus::Reserved),
                    priced("t-90", 90_000, TruckStatus::Available),
                ])
            });

        let service = service(repo, MockBlobStore::new());
        let filters = SearchFilters {
            min_price: Some(50_000),
            max_price: Some(80_000),
            ..Default::default()
        };

        let hits = service.search(&filters).await.unwrap();
        let ids: Vec<_> = hits.iter().filter_map(|t| t.id.as_deref()).collect();
        // Status plays no part unless requested explicitly
        assert_eq!(ids, vec!["t-60", "t-75"]);
    }

    #[tokio::test]
    async fn test_search_pushes_status_equality_to_the_remote_query() {
        let mut repo = MockTruckRepository::new();
        repo.expect_list()
            .withf(|status| *status == Some(TruckStatus::Available))
            .returning(|_| Ok(vec![priced("t-1", 55_000, TruckStatus::Available)]));

        let service = service(repo, MockBlobStore::new());
        let filters = SearchFilters {
            status: Some(TruckStatus::Available),
            ..Default::default()
        };

        let hits = service.search(&filters).await.unwrap();
        assert_eq!(hits.len(), 1);
    }

    #[tokio::test]
    async fn test_delete_survives_a_failing_asset_delete() {
        let truck = test_truck("t-1"); // two images

        let mut repo = MockTruckRepository::new();
        let fixture = truck.clone();
        repo.expect_get_by_id()
            .withf(|id| id == "t-1")
            .returning(move |_| Ok(Some(fixture.clone())));
        repo.expect_delete()
            .times(1)
            .withf(|id| id == "t-1")
            .returning(|_| Ok(()));

        let attempts = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&attempts);
        let mut blob = MockBlobStore::new();
        // First asset delete fails, the second must still be attempted
        blob.expect_delete().times(2).returning(move |_| {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                Err(AppError::Remote {
                    status: 500,
                    message: "backend hiccup".to_string(),
                })
            } else {
                Ok(())
            }
        });

        let service = service(repo, blob);
        service.delete_truck("t-1").await.unwrap();

        assert_eq!(attempts.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_delete_of_missing_truck_is_not_found() {
        let mut repo = MockTruckRepository::new();
        repo.expect_get_by_id().returning(|_| Ok(None));

        let service = service(repo, MockBlobStore::new());
        assert!(matches!(
            service.delete_truck("gone").await,
            Err(AppError::NotFound)
        ));
    }

    #[tokio::test]
    async fn test_create_rejects_main_image_outside_gallery() {
        let mut request = create_request();
        request.images = vec!["https://blob.example/a.jpg".to_string()];
        request.main_image = "https://blob.example/elsewhere.jpg".to_string();

        // No repository expectations: the record must never reach the store
        let service = service(MockTruckRepository::new(), MockBlobStore::new());
        assert!(matches!(
            service.create_truck(request).await,
            Err(AppError::Domain(_))
        ));
    }

    #[tokio::test]
    async fn test_authoring_flow_keeps_gallery_order_and_main_image() {
        let mut blob = MockBlobStore::new();
        blob.expect_upload()
            .times(3)
            .returning(|path, _bytes, _content_type| {
                Ok(format!("https://blob.example/{}", path))
            });

        let created: Arc<Mutex<Option<Truck>>> = Arc::new(Mutex::new(None));
        let sink = Arc::clone(&created);
        let mut repo = MockTruckRepository::new();
        repo.expect_create().times(1).returning(move |truck| {
            *sink.lock().unwrap() = Some(truck.clone());
            Ok("t-new".to_string())
        });

        let service = service(repo, blob);

        let file = |name: &str, content_type: &str| UploadFile {
            file_name: name.to_string(),
            content_type: content_type.to_string(),
            bytes: vec![0u8; 4],
        };

        let id = service
            .create_truck_with_media(
                create_request(),
                vec![file("front.jpg", "image/jpeg"), file("rear.jpg", "image/jpeg")],
                vec![file("walkaround.mp4", "video/mp4")],
            )
            .await
            .unwrap();
        assert_eq!(id, "t-new");

        let truck = created.lock().unwrap().clone().unwrap();
        assert_eq!(truck.images.len(), 2);
        assert!(truck.images[0].contains("_0_front.jpg"));
        assert!(truck.images[1].contains("_1_rear.jpg"));
        assert_eq!(truck.main_image, truck.images[0]);
        assert_eq!(truck.videos.len(), 1);
        assert!(truck.videos[0].contains("walkaround.mp4"));
    }
}
