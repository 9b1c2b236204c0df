//! Users API handlers.
//!
//! ```text
//! GET    /api/users[?zipCode=10001][&includeWeather=true]
//! GET    /api/users/near?latitude=40.7&longitude=-74.0[&radiusKm=25]
//! GET    /api/users/{id}
//! POST   /api/users        {"name":"Ada Lovelace","zipCode":"10001"}
//! PUT    /api/users/{id}   {"zipCode":"90210"}
//! DELETE /api/users/{id}
//! ```

use actix_web::{HttpResponse, delete, get, post, put, web};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use crate::domain::ports::DEFAULT_NEAR_RADIUS_KM;
use crate::domain::{
    Coordinates, Error, GeoValidationError, User, UserId, UserWithWeather, ZipCode,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{self, FieldError};

const USER_NOT_FOUND: &str = "User not found";

/// Body for create and update requests.
///
/// Fields are kept loosely typed so type mismatches are reported per field.
#[derive(Debug, Default, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserPayload {
    /// Person's name; required on create.
    #[schema(value_type = Option<String>, example = "Ada Lovelace")]
    pub name: Option<Value>,
    /// US zip code; required on create.
    #[schema(value_type = Option<String>, example = "10001")]
    pub zip_code: Option<Value>,
}

/// Query parameters for `GET /api/users`.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct ListUsersParams {
    /// Only return users with this zip code.
    pub zip_code: Option<String>,
    /// Attach current weather to each user.
    pub include_weather: Option<bool>,
}

/// Query parameters for `GET /api/users/near`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct NearUsersParams {
    /// Centre latitude in degrees.
    pub latitude: f64,
    /// Centre longitude in degrees.
    pub longitude: f64,
    /// Search radius in kilometres; defaults to 50.
    pub radius_km: Option<f64>,
}

#[derive(Debug, Serialize)]
struct Envelope<T> {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl<T: Serialize> Envelope<T> {
    fn data(data: T, message: Option<String>) -> Self {
        Self {
            success: true,
            data: Some(data),
            message,
        }
    }
}

impl Envelope<()> {
    fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            data: None,
            message: Some(message.into()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum UserList {
    Plain(Vec<User>),
    WithWeather(Vec<UserWithWeather>),
}

impl UserList {
    fn len(&self) -> usize {
        match self {
            Self::Plain(users) => users.len(),
            Self::WithWeather(users) => users.len(),
        }
    }
}

fn found_message(count: usize) -> String {
    format!("Found {count} users")
}

/// A malformed identifier cannot name a stored user.
fn parse_user_id(raw: &str) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found(USER_NOT_FOUND))
}

fn coordinate_error(error: &GeoValidationError) -> FieldError {
    let field = match error {
        GeoValidationError::LongitudeOutOfRange { .. } => "longitude",
        _ => "latitude",
    };
    FieldError {
        field,
        message: error.to_string(),
    }
}

/// List users, optionally filtered by zip code and decorated with weather.
#[utoipa::path(
    get,
    path = "/api/users",
    params(ListUsersParams),
    responses(
        (status = 200, description = "Users", body = crate::inbound::http::schemas::UserListEnvelopeSchema),
        (status = 400, description = "Invalid filter", body = crate::inbound::http::schemas::ErrorResponseSchema),
        (status = 503, description = "User store unavailable", body = crate::inbound::http::schemas::ErrorResponseSchema),
        (status = 500, description = "Internal server error", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    state: web::Data<HttpState>,
    params: web::Query<ListUsersParams>,
) -> ApiResult<HttpResponse> {
    let ListUsersParams {
        zip_code,
        include_weather,
    } = params.into_inner();

    let users = match zip_code {
        Some(raw) => {
            let zip_code = ZipCode::new(raw)
                .map_err(|err| validation::validation_failed(&[FieldError::from(err)]))?;
            state.users.list_by_zip_code(&zip_code).await?
        }
        None => state.users.list_users().await?,
    };

    let list = if include_weather.unwrap_or(false) {
        UserList::WithWeather(state.weather.annotate(users).await)
    } else {
        UserList::Plain(users)
    };
    let message = found_message(list.len());
    Ok(HttpResponse::Ok().json(Envelope::data(list, Some(message))))
}

/// Users within a radius of a point, nearest first.
#[utoipa::path(
    get,
    path = "/api/users/near",
    params(NearUsersParams),
    responses(
        (status = 200, description = "Nearby users", body = crate::inbound::http::schemas::UserListEnvelopeSchema),
        (status = 400, description = "Invalid coordinates or radius", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "listUsersNear"
)]
#[get("/users/near")]
pub async fn list_users_near(
    state: web::Data<HttpState>,
    params: web::Query<NearUsersParams>,
) -> ApiResult<HttpResponse> {
    let centre = Coordinates::new(params.latitude, params.longitude)
        .map_err(|err| validation::validation_failed(&[coordinate_error(&err)]))?;
    let radius_km = params.radius_km.unwrap_or(DEFAULT_NEAR_RADIUS_KM);
    let users = state.users.list_near(centre, radius_km).await?;
    let message = found_message(users.len());
    Ok(HttpResponse::Ok().json(Envelope::data(users, Some(message))))
}

/// Fetch one user.
#[utoipa::path(
    get,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "User", body = crate::inbound::http::schemas::UserEnvelopeSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "getUser"
)]
#[get("/users/{id}")]
pub async fn get_user(state: web::Data<HttpState>, id: web::Path<String>) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&id)?;
    let user = state.users.get_user(&id).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(user, None)))
}

/// Create a user; the zip code is resolved to a location.
#[utoipa::path(
    post,
    path = "/api/users",
    request_body = UserPayload,
    responses(
        (status = 201, description = "Created", body = crate::inbound::http::schemas::UserEnvelopeSchema),
        (status = 400, description = "Validation failed", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "createUser"
)]
#[post("/users")]
pub async fn create_user(
    state: web::Data<HttpState>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let request = validation::create_request(payload.name.as_ref(), payload.zip_code.as_ref())?;
    let user = state.users_command.create_user(request).await?;
    info!(user_id = %user.id(), zip_code = %user.zip_code(), "user created");
    Ok(HttpResponse::Created().json(Envelope::data(
        user,
        Some("User created successfully".to_owned()),
    )))
}

/// Partially update a user.
#[utoipa::path(
    put,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    request_body = UserPayload,
    responses(
        (status = 200, description = "Updated", body = crate::inbound::http::schemas::UserEnvelopeSchema),
        (status = 400, description = "Validation failed", body = crate::inbound::http::schemas::ErrorResponseSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "updateUser"
)]
#[put("/users/{id}")]
pub async fn update_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
    payload: web::Json<UserPayload>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&id)?;
    let request = validation::update_request(payload.name.as_ref(), payload.zip_code.as_ref())?;
    let user = state.users_command.update_user(&id, request).await?;
    Ok(HttpResponse::Ok().json(Envelope::data(
        user,
        Some("User updated successfully".to_owned()),
    )))
}

/// Delete a user.
#[utoipa::path(
    delete,
    path = "/api/users/{id}",
    params(("id" = String, Path, description = "User identifier")),
    responses(
        (status = 200, description = "Deleted", body = crate::inbound::http::schemas::MessageEnvelopeSchema),
        (status = 404, description = "Unknown user", body = crate::inbound::http::schemas::ErrorResponseSchema)
    ),
    tags = ["users"],
    operation_id = "deleteUser"
)]
#[delete("/users/{id}")]
pub async fn delete_user(
    state: web::Data<HttpState>,
    id: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let id = parse_user_id(&id)?;
    state.users_command.delete_user(&id).await?;
    info!(user_id = %id, "user deleted");
    Ok(HttpResponse::Ok().json(Envelope::message("User deleted successfully")))
}

#[cfg(test)]
mod tests;
