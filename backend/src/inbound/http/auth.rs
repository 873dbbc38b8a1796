//! Authentication API handlers.
//!
//! ```text
//! POST /api/auth/register {"username":"abc","password":"password1","email":"a@b.com"}
//! POST /api/auth/login    {"username":"abc","password":"password1"}
//! ```
//!
//! Credential denials surface as `401` with a `{message}` body on login and
//! `409` on registration; storage failures travel through the generic error
//! channel untouched.

use actix_web::{HttpResponse, delete, get, post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{
    AuthOutcome, Error, LoginCredentials, SessionUser, SignupCredentials,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/auth/login`.
///
/// The `username` field also accepts an email address.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    /// Username or email to look up.
    pub username: String,
    /// Account password.
    pub password: String,
}

/// Registration request body for `POST /api/auth/register`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
pub struct RegisterRequest {
    /// Desired username.
    pub username: String,
    /// Account password.
    pub password: String,
    /// Contact email address.
    pub email: String,
}

/// Report the current session identity, or the literal `0` when anonymous.
///
/// Responds `200` either way so front-end session checks never trip error
/// interceptors.
#[utoipa::path(
    get,
    path = "/api/auth/authenticate",
    responses(
        (status = 200, description = "Session payload, or the literal `0` when anonymous", body = SessionUser),
    ),
    tags = ["auth"],
    operation_id = "authenticate",
    security([])
)]
#[get("/authenticate")]
pub async fn authenticate(session: SessionContext) -> HttpResponse {
    match session.current_user() {
        Some(user) => HttpResponse::Ok().json(user),
        None => HttpResponse::Ok().body("0"),
    }
}

/// Authenticate a user and establish a session.
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = SessionUser,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<SessionUser>> {
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(|reason| Error::unauthorized(reason.to_string()))?;

    match state.accounts.login(&credentials).await? {
        AuthOutcome::Granted(user) => {
            let identity = SessionUser::from(&user);
            session.persist_user(&identity)?;
            Ok(web::Json(identity))
        }
        AuthOutcome::Denied(reason) => Err(Error::unauthorized(reason.to_string())),
    }
}

/// Invalidate the session.
///
/// Always responds `401`, reused by clients as the "no longer
/// authenticated" signal rather than a literal error.
#[utoipa::path(
    post,
    path = "/api/auth/logout",
    responses(
        (status = 401, description = "Session invalidated"),
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.purge();
    HttpResponse::Unauthorized().finish()
}

/// Register a new account.
///
/// Validation and duplicate failures respond `409` with the reason; success
/// is `204` and does not log the new user in.
#[utoipa::path(
    post,
    path = "/api/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 204, description = "Account created"),
        (status = 409, description = "Validation or duplicate failure", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        SignupCredentials::try_from_parts(&payload.username, &payload.password, &payload.email)
            .map_err(|reason| Error::conflict(reason.to_string()))?;

    match state.accounts.signup(&credentials).await? {
        AuthOutcome::Granted(_) => Ok(HttpResponse::NoContent().finish()),
        AuthOutcome::Denied(reason) => Err(Error::conflict(reason.to_string())),
    }
}

/// Delete an account by username, email, or id. Admin only.
///
/// Idempotent: deleting an absent account still responds `204`.
#[utoipa::path(
    delete,
    path = "/api/auth/delete/{uid}",
    params(("uid" = String, Path, description = "Username, email, or textual UUID")),
    responses(
        (status = 204, description = "Account removed (or was already absent)"),
        (status = 401, description = "Not an administrator", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "deleteAccount"
)]
#[delete("/delete/{uid}")]
pub async fn delete_account(
    state: web::Data<HttpState>,
    session: SessionContext,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    session.require_admin()?;
    state.accounts.delete_account(&path.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

/// Return the raw session identity. Requires a session.
#[utoipa::path(
    get,
    path = "/api/auth/session",
    responses(
        (status = 200, description = "Session identity", body = SessionUser),
        (status = 401, description = "No session", body = Error)
    ),
    tags = ["auth"],
    operation_id = "sessionData"
)]
#[get("/session")]
pub async fn session_data(session: SessionContext) -> ApiResult<web::Json<SessionUser>> {
    Ok(web::Json(session.require_user()?))
}
