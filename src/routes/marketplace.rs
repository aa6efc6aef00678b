use actix_web::{web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Clock, FairPriceEstimator, FeedRanker};
use crate::models::{
    ErrorResponse, FairPriceRequest, FairPriceResponse, FeedEntry, FeedRequest, FeedResponse,
    HealthResponse, ListItemsRequest, ListItemsResponse, PricedItem,
};
use crate::services::CatalogStore;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub catalog: Option<Arc<dyn CatalogStore>>,
    pub ranker: FeedRanker,
    pub estimator: Arc<FairPriceEstimator>,
    pub clock: Arc<dyn Clock>,
    pub feed_limits: FeedLimits,
}

/// Default and maximum number of feed entries per request
#[derive(Debug, Clone, Copy)]
pub struct FeedLimits {
    pub default_limit: u16,
    pub max_limit: u16,
}

impl Default for FeedLimits {
    fn default() -> Self {
        Self {
            default_limit: 20,
            max_limit: 100,
        }
    }
}

/// Configure all marketplace routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/feed", web::post().to(personalized_feed))
        .route("/fair-price", web::post().to(fair_price))
        .route("/items", web::post().to(list_items));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let database = match &state.catalog {
        Some(catalog) => catalog.is_healthy().await.unwrap_or(false),
        None => false,
    };

    let status = if database { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
        database,
    })
}

/// Personalized feed endpoint
///
/// POST /api/v1/feed
///
/// Request body:
/// ```json
/// {
///   "user": { "explicitTags": ["CSE", "Sem 6"], "implicitTags": ["Cricket"] },
///   "inventory": [{ "title": "Algorithm Notes", "tags": ["CSE"], "price": 100 }],
///   "limit": 20
/// }
/// ```
///
/// Without `inventory` the whole catalog store is ranked instead; `limit`
/// only truncates the ranked feed.
async fn personalized_feed(
    state: web::Data<AppState>,
    req: web::Json<FeedRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let req = req.into_inner();
    let limit = req
        .limit
        .unwrap_or(state.feed_limits.default_limit)
        .min(state.feed_limits.max_limit) as usize;

    let inventory = match req.inventory {
        Some(items) => items,
        None => {
            let Some(catalog) = &state.catalog else {
                return store_unavailable();
            };

            match catalog.all_items().await {
                Ok(items) => items,
                Err(e) => {
                    tracing::error!("Failed to fetch catalog: {}", e);
                    return HttpResponse::InternalServerError().json(ErrorResponse {
                        error: "Failed to fetch catalog".to_string(),
                        message: e.to_string(),
                        status_code: 500,
                    });
                }
            }
        }
    };

    let result = state.ranker.rank_with_limit(&req.user, &inventory, limit);

    tracing::info!(
        "Returning {} feed items (from {} candidates)",
        result.items.len(),
        result.total_candidates
    );

    HttpResponse::Ok().json(FeedResponse {
        items: result.items.into_iter().map(FeedEntry::from).collect(),
        total_candidates: result.total_candidates,
    })
}

/// Fair price endpoint
///
/// POST /api/v1/fair-price
///
/// `currentYear` defaults to the server clock.
async fn fair_price(
    state: web::Data<AppState>,
    req: web::Json<FairPriceRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let current_year = req
        .current_year
        .unwrap_or_else(|| state.clock.current_year());

    let prices = req
        .items
        .iter()
        .map(|item| PricedItem {
            id: item.id,
            title: item.title.clone(),
            original_price: item.original_price,
            fair_price: state.estimator.estimate(item, current_year),
        })
        .collect();

    HttpResponse::Ok().json(FairPriceResponse {
        current_year,
        prices,
    })
}

/// List new items in the catalog, priced at their fair price
///
/// POST /api/v1/items
async fn list_items(
    state: web::Data<AppState>,
    req: web::Json<ListItemsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        return validation_failed(errors);
    }

    let Some(catalog) = &state.catalog else {
        return store_unavailable();
    };

    let priced = state
        .estimator
        .price_inventory(&req.items, state.clock.current_year());

    match catalog.add_items(&priced).await {
        Ok(inserted) => HttpResponse::Ok().json(ListItemsResponse { inserted }),
        Err(e) => {
            tracing::error!("Failed to insert items: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to insert items".to_string(),
                message: e.to_string(),
                status_code: 500,
            })
        }
    }
}

fn validation_failed(errors: validator::ValidationErrors) -> HttpResponse {
    tracing::info!("Validation failed: field_errors={:?}", errors);
    HttpResponse::BadRequest().json(ErrorResponse {
        error: "Validation failed".to_string(),
        message: errors.to_string(),
        status_code: 400,
    })
}

fn store_unavailable() -> HttpResponse {
    HttpResponse::ServiceUnavailable().json(ErrorResponse {
        error: "Catalog unavailable".to_string(),
        message: "No database connection is configured".to_string(),
        status_code: 503,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::FixedClock;
    use crate::models::CatalogItem;
    use crate::services::{BoxFuture, CatalogResult};
    use actix_web::{test, App};
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// Catalog kept in memory, standing in for PostgreSQL
    #[derive(Default)]
    struct InMemoryCatalog {
        items: Mutex<Vec<CatalogItem>>,
    }

    impl InMemoryCatalog {
        fn with_items(items: Vec<CatalogItem>) -> Self {
            Self {
                items: Mutex::new(items),
            }
        }
    }

    impl CatalogStore for InMemoryCatalog {
        fn all_items(&self) -> BoxFuture<'_, CatalogResult<Vec<CatalogItem>>> {
            let items = self.items.lock().unwrap().clone();
            Box::pin(async move { Ok(items) })
        }

        fn add_items<'a>(&'a self, items: &'a [CatalogItem]) -> BoxFuture<'a, CatalogResult<u64>> {
            Box::pin(async move {
                let mut stored = self.items.lock().unwrap();
                stored.extend_from_slice(items);
                Ok(items.len() as u64)
            })
        }

        fn is_healthy(&self) -> BoxFuture<'_, CatalogResult<bool>> {
            Box::pin(async { Ok(true) })
        }
    }

    fn listing(id: i64, tags: &[&str], price: f64) -> CatalogItem {
        CatalogItem {
            id: Some(id),
            title: format!("Listing {}", id),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            price,
            category: Some("Books".to_string()),
            original_price: price,
            purchase_year: 2024,
            condition: "Good".to_string(),
        }
    }

    fn test_state() -> AppState {
        AppState {
            catalog: None,
            ranker: FeedRanker::default(),
            estimator: Arc::new(FairPriceEstimator::default()),
            clock: Arc::new(FixedClock(2024)),
            feed_limits: FeedLimits::default(),
        }
    }

    fn state_with_catalog(catalog: Arc<InMemoryCatalog>) -> AppState {
        AppState {
            catalog: Some(catalog as Arc<dyn CatalogStore>),
            ..test_state()
        }
    }

    macro_rules! test_app {
        () => {
            test_app!(test_state())
        };
        ($state:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($state))
                    .service(web::scope("/api/v1").configure(configure)),
            )
            .await
        };
    }

    #[actix_web::test]
    async fn test_health_without_database_is_degraded() {
        let app = test_app!();
        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "degraded");
        assert_eq!(body["database"], false);
    }

    #[actix_web::test]
    async fn test_feed_drops_unrelated_items() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/feed")
            .set_json(json!({
                "user": { "signupTags": ["CSE", "Sem 6"], "viewHistoryTags": ["Cricket"] },
                "inventory": [
                    { "title": "Data Structures (Cormen)", "tags": ["CSE", "Sem 3"], "fairPrice": 300 },
                    { "title": "SS Cricket Bat", "tags": ["Sports", "Cricket"], "fairPrice": 800 },
                    { "title": "Maybelline Lipstick", "tags": ["Fashion"], "fairPrice": 500 },
                    { "title": "Algorithm Notes", "tags": ["CSE", "Sem 6"], "fairPrice": 100 },
                    { "title": "Engineering Physics", "tags": ["ECE", "Sem 1"], "fairPrice": 200 }
                ]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        let titles: Vec<&str> = body["items"]
            .as_array()
            .unwrap()
            .iter()
            .map(|i| i["title"].as_str().unwrap())
            .collect();

        // 2/3, then 1/4 at 300 and 1/4 at 800
        assert_eq!(titles, vec!["Algorithm Notes", "Data Structures (Cormen)", "SS Cricket Bat"]);
        assert_eq!(body["totalCandidates"], 5);
        assert_eq!(body["items"][0]["tier"], "highly_relevant");
    }

    #[actix_web::test]
    async fn test_feed_without_inventory_needs_store() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/feed")
            .set_json(json!({ "user": { "explicitTags": ["CSE"] } }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 503);
    }

    #[actix_web::test]
    async fn test_store_feed_ranks_whole_catalog() {
        // Only the last of 60 listings matches; a limited fetch would miss it
        let mut items: Vec<CatalogItem> = (1..60)
            .map(|id| listing(id, &["Fashion"], 100.0))
            .collect();
        items.push(listing(60, &["CSE", "Sem 6"], 900.0));
        let catalog = Arc::new(InMemoryCatalog::with_items(items));

        let app = test_app!(state_with_catalog(catalog));
        let req = test::TestRequest::post()
            .uri("/api/v1/feed")
            .set_json(json!({ "user": { "explicitTags": ["CSE", "Sem 6"] }, "limit": 1 }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["items"].as_array().unwrap().len(), 1);
        assert_eq!(body["items"][0]["title"], "Listing 60");
        assert_eq!(body["items"][0]["relevanceScore"], 1.0);
        assert_eq!(body["totalCandidates"], 60);
    }

    #[actix_web::test]
    async fn test_health_with_catalog_is_healthy() {
        let app = test_app!(state_with_catalog(Arc::new(InMemoryCatalog::default())));
        let req = test::TestRequest::get().uri("/api/v1/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "healthy");
        assert_eq!(body["database"], true);
    }

    #[actix_web::test]
    async fn test_listed_items_are_stored_at_fair_price() {
        let catalog = Arc::new(InMemoryCatalog::default());
        let app = test_app!(state_with_catalog(catalog.clone()));
        let req = test::TestRequest::post()
            .uri("/api/v1/items")
            .set_json(json!({
                "items": [{
                    "title": "Keyboard",
                    "tags": ["Tech"],
                    "category": "Electronics",
                    "originalPrice": 4297,
                    "purchaseYear": 2019,
                    "condition": "Like New"
                }]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["inserted"], 1);
        let stored = catalog.items.lock().unwrap();
        assert_eq!(stored[0].price, 1126.0);
    }

    #[actix_web::test]
    async fn test_fair_price_uses_clock_year() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/fair-price")
            .set_json(json!({
                "items": [{
                    "id": 1,
                    "title": "Keyboard",
                    "category": "Electronics",
                    "originalPrice": 4297,
                    "purchaseYear": 2019,
                    "condition": "Like New",
                    "tags": ["Tech", "Hostel Life"]
                }]
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["currentYear"], 2024);
        assert_eq!(body["prices"][0]["fairPrice"], 1126);
    }

    #[actix_web::test]
    async fn test_fair_price_rejects_empty_batch() {
        let app = test_app!();
        let req = test::TestRequest::post()
            .uri("/api/v1/fair-price")
            .set_json(json!({ "items": [] }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), 400);
    }
}
