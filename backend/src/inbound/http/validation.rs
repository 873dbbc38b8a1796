//! Username validation endpoint used by signup forms.

use actix_web::{HttpResponse, get, web};
use serde::Serialize;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Probe result: whether the username already belongs to an account.
#[derive(Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UsernameProbe {
    /// True when the username is already registered.
    pub username_taken: bool,
}

/// Check whether a username is taken.
///
/// Responds `409` when taken and `404` when free; the body carries the
/// verdict either way so form validators read one shape.
#[utoipa::path(
    get,
    path = "/api/validate/username/{username}",
    params(("username" = String, Path, description = "Username to probe")),
    responses(
        (status = 404, description = "Username is free", body = UsernameProbe),
        (status = 409, description = "Username is taken", body = UsernameProbe),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["validation"],
    operation_id = "validateUsername",
    security([])
)]
#[get("/username/{username}")]
pub async fn validate_username(
    state: web::Data<HttpState>,
    path: web::Path<String>,
) -> ApiResult<HttpResponse> {
    let taken = state.accounts.username_taken(&path.into_inner()).await?;
    let response = if taken {
        HttpResponse::Conflict().json(UsernameProbe {
            username_taken: true,
        })
    } else {
        HttpResponse::NotFound().json(UsernameProbe {
            username_taken: false,
        })
    };
    Ok(response)
}
