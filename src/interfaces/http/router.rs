//! API Router with Swagger UI

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use metrics_exporter_prometheus::PrometheusHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::domain::{ReservationRepository, SharedReservationService};

use super::common::ApiResponse;
use super::modules::health::{self, HealthResponse, HealthState};
use super::modules::metrics::{http_metrics_middleware, prometheus_metrics, MetricsState};
use super::modules::request_id::request_id_middleware;
use super::modules::reservations::{
    self, CancelReservationResponse, CreateReservationRequest, ReservationAppState,
    ReservationDto,
};

/// OpenAPI documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Health
        health::health_check,
        // Reservations
        reservations::create_reservation,
        reservations::cancel_reservation,
        reservations::list_reservations_by_client,
        reservations::list_reservations_by_vehicle,
        reservations::list_reservations,
        reservations::get_reservation,
    ),
    components(
        schemas(
            ApiResponse<String>,
            HealthResponse,
            CreateReservationRequest,
            ReservationDto,
            CancelReservationResponse,
        )
    ),
    tags(
        (name = "Health", description = "Server health check endpoints"),
        (name = "Reservations", description = "Create, cancel and list vehicle reservations"),
    ),
    info(
        title = "Vehicle Reservation Service",
        description = "In-memory reservation tracking for clients and vehicles"
    )
)]
pub struct ApiDoc;

/// Build the full HTTP application.
///
/// `prometheus` is `None` when metrics are disabled; `/metrics` is then not
/// routed (counters are still recorded into whatever recorder is installed).
pub fn create_api_router(
    service: SharedReservationService,
    repository: Arc<dyn ReservationRepository>,
    prometheus: Option<PrometheusHandle>,
) -> Router {
    let reservation_state = ReservationAppState { service };

    let reservation_routes = Router::new()
        .route(
            "/reservations",
            get(reservations::list_reservations).post(reservations::create_reservation),
        )
        .route(
            "/reservations/{reservation_id}",
            get(reservations::get_reservation),
        )
        .route(
            "/reservations/{reservation_id}/cancel",
            post(reservations::cancel_reservation),
        )
        .route(
            "/clients/{client_id}/reservations",
            get(reservations::list_reservations_by_client),
        )
        .route(
            "/vehicles/{vehicle_id}/reservations",
            get(reservations::list_reservations_by_vehicle),
        )
        .with_state(reservation_state);

    let health_state = HealthState {
        repository,
        started_at: Arc::new(Instant::now()),
    };
    let health_routes = Router::new()
        .route("/health", get(health::health_check))
        .with_state(health_state);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let swagger_routes = SwaggerUi::new("/docs").url("/api-doc/openapi.json", ApiDoc::openapi());

    let mut router = Router::new()
        .merge(swagger_routes)
        .merge(health_routes)
        .nest("/api/v1", reservation_routes);

    if let Some(handle) = prometheus {
        router = router.merge(
            Router::new()
                .route("/metrics", get(prometheus_metrics))
                .with_state(MetricsState { handle }),
        );
    }

    router
        .layer(middleware::from_fn(http_metrics_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use crate::application::ReservationManager;
    use crate::infrastructure::InMemoryReservationStore;

    fn app(prometheus: Option<PrometheusHandle>) -> Router {
        let store = Arc::new(InMemoryReservationStore::new());
        let service = Arc::new(ReservationManager::new(store.clone()));
        create_api_router(service, store, prometheus)
    }

    #[test]
    fn openapi_lists_every_reservation_route() {
        let doc = ApiDoc::openapi();
        let paths: Vec<&String> = doc.paths.paths.keys().collect();
        for expected in [
            "/health",
            "/api/v1/reservations",
            "/api/v1/reservations/{reservation_id}",
            "/api/v1/reservations/{reservation_id}/cancel",
            "/api/v1/clients/{client_id}/reservations",
            "/api/v1/vehicles/{vehicle_id}/reservations",
        ] {
            assert!(
                paths.iter().any(|p| p.as_str() == expected),
                "missing {expected}"
            );
        }
    }

    #[tokio::test]
    async fn metrics_route_only_when_enabled() {
        let resp = app(None)
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let handle = metrics_exporter_prometheus::PrometheusBuilder::new()
            .build_recorder()
            .handle();
        let resp = app(Some(handle))
            .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn responses_carry_request_id() {
        let resp = app(None)
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(resp.headers().contains_key("x-request-id"));
    }
}
