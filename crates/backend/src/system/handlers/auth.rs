use axum::{extract::Json, http::StatusCode};
use chrono::Utc;
use contracts::system::auth::{
    RefreshRequest, RefreshResponse, SessionResponse, SignInRequest, SignUpRequest, UserInfo,
};
use contracts::system::users::{CreateUserDto, User};
use sea_orm::{ConnectionTrait, DatabaseBackend, DatabaseConnection, Statement};

use crate::shared::data::db::get_connection;
use crate::system::auth::extractor::CurrentUser;
use crate::system::auth::jwt;
use crate::system::users::service::{self as user_service, UserError};

fn user_info(user: User) -> UserInfo {
    UserInfo {
        id: user.id,
        username: user.username,
        full_name: user.full_name,
        email: user.email,
        is_admin: user.is_admin,
    }
}

/// Issues an access/refresh token pair for `user`.
async fn open_session(user: User) -> Result<SessionResponse, StatusCode> {
    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin)
        .await
        .map_err(|e| {
            tracing::error!("Failed to issue access token: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    let refresh_token = jwt::generate_refresh_token();
    store_refresh_token(get_connection(), &user.id, &refresh_token)
        .await
        .map_err(|e| {
            tracing::error!("Failed to store refresh token: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(SessionResponse {
        access_token,
        refresh_token,
        user: user_info(user),
    })
}

/// POST /api/system/auth/signin
pub async fn signin(
    Json(request): Json<SignInRequest>,
) -> Result<Json<SessionResponse>, StatusCode> {
    let user = user_service::verify_credentials(get_connection(), &request.username, &request.password)
        .await
        .map_err(|e| {
            tracing::error!("Credential check failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        })?
        .ok_or_else(|| {
            tracing::warn!("Rejected sign-in for '{}'", request.username);
            StatusCode::UNAUTHORIZED
        })?;

    tracing::info!("User '{}' signed in", user.username);
    open_session(user).await.map(Json)
}

/// POST /api/system/auth/signup
pub async fn signup(
    Json(request): Json<SignUpRequest>,
) -> Result<(StatusCode, Json<SessionResponse>), StatusCode> {
    let conn = get_connection();
    let dto = CreateUserDto {
        username: request.username,
        password: request.password,
        email: request.email,
        full_name: request.full_name,
        is_admin: false,
    };

    let user_id = user_service::create(conn, dto).await.map_err(|e| match e {
        UserError::UsernameTaken(_) => StatusCode::CONFLICT,
        UserError::Invalid(msg) => {
            tracing::warn!("Rejected sign-up: {}", msg);
            StatusCode::BAD_REQUEST
        }
        UserError::Other(e) => {
            tracing::error!("Sign-up failed: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    })?;

    let user = user_service::get_by_id(conn, &user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::INTERNAL_SERVER_ERROR)?;

    tracing::info!("User '{}' signed up", user.username);
    let session = open_session(user).await?;
    Ok((StatusCode::CREATED, Json(session)))
}

/// POST /api/system/auth/refresh
pub async fn refresh(
    Json(request): Json<RefreshRequest>,
) -> Result<Json<RefreshResponse>, StatusCode> {
    let conn = get_connection();
    let user_id = validate_refresh_token(conn, &request.refresh_token)
        .await
        .map_err(|_| StatusCode::UNAUTHORIZED)?;

    let user = user_service::get_by_id(conn, &user_id)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .filter(|u| u.is_active)
        .ok_or(StatusCode::UNAUTHORIZED)?;

    let access_token = jwt::generate_access_token(&user.id, &user.username, user.is_admin)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(Json(RefreshResponse { access_token }))
}

/// POST /api/system/auth/signout
pub async fn signout(Json(request): Json<RefreshRequest>) -> Result<StatusCode, StatusCode> {
    revoke_refresh_token(get_connection(), &request.refresh_token)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;

    Ok(StatusCode::OK)
}

/// GET /api/system/auth/session (protected by middleware)
pub async fn session(CurrentUser(claims): CurrentUser) -> Result<Json<UserInfo>, StatusCode> {
    let user = user_service::get_by_id(get_connection(), &claims.sub)
        .await
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
        .ok_or(StatusCode::NOT_FOUND)?;

    Ok(Json(user_info(user)))
}

// Refresh token persistence

async fn store_refresh_token(
    conn: &DatabaseConnection,
    user_id: &str,
    token: &str,
) -> anyhow::Result<()> {
    let token_id = uuid::Uuid::new_v4().to_string();
    let expires_at = jwt::calculate_refresh_token_expiration();
    let created_at = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "INSERT INTO sys_refresh_tokens (id, user_id, token_hash, expires_at, created_at)
         VALUES (?, ?, ?, ?, ?)",
        [
            token_id.into(),
            user_id.to_string().into(),
            hash_token(token).into(),
            expires_at.into(),
            created_at.into(),
        ],
    ))
    .await?;

    Ok(())
}

async fn validate_refresh_token(conn: &DatabaseConnection, token: &str) -> anyhow::Result<String> {
    let now = Utc::now().to_rfc3339();

    let result = conn
        .query_one(Statement::from_sql_and_values(
            DatabaseBackend::Sqlite,
            "SELECT user_id FROM sys_refresh_tokens
             WHERE token_hash = ? AND expires_at > ? AND revoked_at IS NULL",
            [hash_token(token).into(), now.into()],
        ))
        .await?;

    match result {
        Some(row) => Ok(row.try_get("", "user_id")?),
        None => Err(anyhow::anyhow!("Invalid or expired refresh token")),
    }
}

async fn revoke_refresh_token(conn: &DatabaseConnection, token: &str) -> anyhow::Result<()> {
    let revoked_at = Utc::now().to_rfc3339();

    conn.execute(Statement::from_sql_and_values(
        DatabaseBackend::Sqlite,
        "UPDATE sys_refresh_tokens SET revoked_at = ? WHERE token_hash = ? AND revoked_at IS NULL",
        [revoked_at.into(), hash_token(token).into()],
    ))
    .await?;

    Ok(())
}

fn hash_token(token: &str) -> String {
    use sha2::{Digest, Sha256};
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}
