//! Reservation HTTP handlers

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::Json;

use crate::domain::SharedReservationService;
use crate::interfaces::http::common::{ApiError, ApiJson, ApiPath, ApiResponse};

use super::dto::*;

/// Application state for reservation handlers.
#[derive(Clone)]
pub struct ReservationAppState {
    pub service: SharedReservationService,
}

fn to_dtos(reservations: Vec<crate::domain::Reservation>) -> Vec<ReservationDto> {
    reservations.into_iter().map(ReservationDto::from).collect()
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations",
    tag = "Reservations",
    request_body = CreateReservationRequest,
    responses(
        (status = 201, description = "Reservation created", body = ApiResponse<ReservationDto>),
        (status = 400, description = "Malformed body or timestamp")
    )
)]
pub async fn create_reservation(
    State(state): State<ReservationAppState>,
    ApiJson(request): ApiJson<CreateReservationRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ReservationDto>>), ApiError> {
    let (date_start, date_end) = request.parse_dates()?;

    let reservation = state
        .service
        .create_reservation(request.client_id, request.vehicle_id, date_start, date_end)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(ApiResponse::success(reservation.into())),
    ))
}

#[utoipa::path(
    post,
    path = "/api/v1/reservations/{reservation_id}/cancel",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Cancellation result; `cancelled` is false for unknown ids", body = ApiResponse<CancelReservationResponse>)
    )
)]
pub async fn cancel_reservation(
    State(state): State<ReservationAppState>,
    ApiPath(reservation_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<CancelReservationResponse>>, ApiError> {
    let cancelled = state.service.cancel_reservation(reservation_id).await?;
    Ok(Json(ApiResponse::success(CancelReservationResponse {
        cancelled,
    })))
}

#[utoipa::path(
    get,
    path = "/api/v1/clients/{client_id}/reservations",
    tag = "Reservations",
    params(("client_id" = i32, Path, description = "Client ID")),
    responses(
        (status = 200, description = "Client reservations in creation order", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations_by_client(
    State(state): State<ReservationAppState>,
    ApiPath(client_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError> {
    let reservations = state.service.reservations_by_client(client_id).await?;
    Ok(Json(ApiResponse::success(to_dtos(reservations))))
}

#[utoipa::path(
    get,
    path = "/api/v1/vehicles/{vehicle_id}/reservations",
    tag = "Reservations",
    params(("vehicle_id" = i32, Path, description = "Vehicle ID")),
    responses(
        (status = 200, description = "Vehicle reservations in creation order", body = ApiResponse<Vec<ReservationDto>>)
    )
)]
pub async fn list_reservations_by_vehicle(
    State(state): State<ReservationAppState>,
    ApiPath(vehicle_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError> {
    let reservations = state.service.reservations_by_vehicle(vehicle_id).await?;
    Ok(Json(ApiResponse::success(to_dtos(reservations))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations",
    tag = "Reservations",
    params(ReservationFilter),
    responses(
        (status = 200, description = "All reservations, optionally filtered by status", body = ApiResponse<Vec<ReservationDto>>),
        (status = 400, description = "Unknown status filter")
    )
)]
pub async fn list_reservations(
    State(state): State<ReservationAppState>,
    Query(filter): Query<ReservationFilter>,
) -> Result<Json<ApiResponse<Vec<ReservationDto>>>, ApiError> {
    let status = filter.parse_status()?;
    let reservations = state.service.list_reservations(status).await?;
    Ok(Json(ApiResponse::success(to_dtos(reservations))))
}

#[utoipa::path(
    get,
    path = "/api/v1/reservations/{reservation_id}",
    tag = "Reservations",
    params(("reservation_id" = i32, Path, description = "Reservation ID")),
    responses(
        (status = 200, description = "Reservation details", body = ApiResponse<ReservationDto>),
        (status = 404, description = "Not found")
    )
)]
pub async fn get_reservation(
    State(state): State<ReservationAppState>,
    ApiPath(reservation_id): ApiPath<i32>,
) -> Result<Json<ApiResponse<ReservationDto>>, ApiError> {
    let reservation = state.service.get_reservation(reservation_id).await?;
    Ok(Json(ApiResponse::success(reservation.into())))
}
