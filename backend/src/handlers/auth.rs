use actix_web::{web, HttpRequest, HttpResponse, Result};

use crate::middleware::auth::extract_claims;
use crate::models::AppState;
use crate::services::auth::AuthError;
use shared::{
    ApiError, ApiSuccess, AuthResponse, ChangePasswordRequest, LoginRequest, RefreshRequest,
    RegisterRequest, User,
};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/refresh", web::post().to(refresh))
            .route("/logout", web::post().to(logout))
            .route("/change-password", web::post().to(change_password))
            .route("/me", web::get().to(me)),
    );
}

/// Map a service failure onto its HTTP status. Unexpected failures get a
/// generic body; detail stays in the server log.
fn error_response(err: AuthError) -> HttpResponse {
    match &err {
        AuthError::EmailTaken => HttpResponse::Conflict().json(ApiError {
            error: "conflict".to_string(),
            message: err.to_string(),
        }),
        AuthError::InvalidCredentials | AuthError::InvalidRefreshToken => {
            HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: err.to_string(),
            })
        }
        AuthError::AccountDisabled => HttpResponse::Forbidden().json(ApiError {
            error: "forbidden".to_string(),
            message: err.to_string(),
        }),
        AuthError::UserNotFound => HttpResponse::NotFound().json(ApiError {
            error: "not_found".to_string(),
            message: err.to_string(),
        }),
        AuthError::InvalidInput(_) => HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: err.to_string(),
        }),
        AuthError::DatabaseError(_) | AuthError::HashingError | AuthError::JwtError(_) => {
            log::error!("Auth service error: {:?}", err);
            HttpResponse::InternalServerError().json(ApiError {
                error: "internal_error".to_string(),
                message: "Internal server error".to_string(),
            })
        }
    }
}

/// Per-request gate for authenticated routes: token signature and account
/// standing are both checked.
async fn authenticate(state: &AppState, req: &HttpRequest) -> Result<User, HttpResponse> {
    let claims = match extract_claims(req, state.auth.tokens()) {
        Ok(claims) => claims,
        Err(_) => {
            return Err(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    let user_id = match claims.user_id() {
        Ok(id) => id,
        Err(_) => {
            return Err(HttpResponse::Unauthorized().json(ApiError {
                error: "unauthorized".to_string(),
                message: "Invalid or missing token".to_string(),
            }));
        }
    };

    match state.auth.get_user(&user_id).await {
        Ok(Some(user)) if user.status.is_active() => Ok(user),
        Ok(Some(_)) => Err(HttpResponse::Forbidden().json(ApiError {
            error: "forbidden".to_string(),
            message: "Account is not active".to_string(),
        })),
        Ok(None) => Err(HttpResponse::Unauthorized().json(ApiError {
            error: "unauthorized".to_string(),
            message: "Invalid or missing token".to_string(),
        })),
        Err(e) => Err(error_response(e)),
    }
}

async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterRequest>,
) -> Result<HttpResponse> {
    let request = body.into_inner();

    if request.email.is_empty() || request.password.is_empty() || request.company_name.is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiError {
            error: "validation_error".to_string(),
            message: "Email, password, and company name are required".to_string(),
        }));
    }

    match state.auth.register(&request).await {
        Ok((user, tokens)) => {
            Ok(HttpResponse::Created().json(ApiSuccess::new(AuthResponse { user, tokens })))
        }
        Err(e) => Ok(error_response(e)),
    }
}

async fn login(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse> {
    let client_key = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());

    if !state.login_rate_limiter.allow(&client_key) {
        return Ok(HttpResponse::TooManyRequests().json(ApiError {
            error: "rate_limited".to_string(),
            message: "Too many login attempts, try again later".to_string(),
        }));
    }

    match state.auth.login(&body.into_inner()).await {
        Ok((user, tokens)) => {
            state.login_rate_limiter.reset(&client_key);
            Ok(HttpResponse::Ok().json(ApiSuccess::new(AuthResponse { user, tokens })))
        }
        Err(e) => {
            if matches!(e, AuthError::InvalidCredentials) {
                state.login_rate_limiter.note_failure(&client_key);
            }
            Ok(error_response(e))
        }
    }
}

async fn refresh(
    state: web::Data<AppState>,
    body: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    match state.auth.refresh(&body.refresh_token).await {
        Ok(tokens) => Ok(HttpResponse::Ok().json(ApiSuccess::new(tokens))),
        Err(e) => Ok(error_response(e)),
    }
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let user = match authenticate(&state, &req).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match state.auth.logout(&user.id).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(error_response(e)),
    }
}

async fn change_password(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<ChangePasswordRequest>,
) -> Result<HttpResponse> {
    let user = match authenticate(&state, &req).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match state.auth.change_password(&user.id, &body.into_inner()).await {
        Ok(()) => Ok(HttpResponse::NoContent().finish()),
        Err(e) => Ok(error_response(e)),
    }
}

async fn me(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let user = match authenticate(&state, &req).await {
        Ok(user) => user,
        Err(response) => return Ok(response),
    };

    match state.auth.get_profile(&user.id).await {
        Ok(profile) => Ok(HttpResponse::Ok().json(ApiSuccess::new(profile))),
        Err(e) => Ok(error_response(e)),
    }
}
