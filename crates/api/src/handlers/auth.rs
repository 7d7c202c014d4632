//! Handlers for the `/auth` resource (signup, login, refresh, logout).
//!
//! Authentication failures carry localized user-facing messages; state
//! failures (missing profile, disapproved status) refuse token issuance with
//! a distinct message per class. Best-effort side effects (device-session
//! upsert on login, deactivation on logout) are logged but never block the
//! primary operation.

use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use chrono::Utc;
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};
use vitrine_core::approval::ApprovalStatus;
use vitrine_core::error::CoreError;
use vitrine_core::types::DbId;
use vitrine_db::models::auth_session::CreateAuthSession;
use vitrine_db::models::device_session::UpsertDeviceSession;
use vitrine_db::models::profile::CreateProfile;
use vitrine_db::models::user::{CreateUser, UserInfo};
use vitrine_db::repositories::{AuthSessionRepo, DeviceSessionRepo, ProfileRepo, UserRepo};

use crate::auth::jwt::{generate_access_token, generate_refresh_token, hash_refresh_token};
use crate::auth::password::{hash_password, verify_password};
use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// User-facing messages (pt-BR, matching the web client)
// ---------------------------------------------------------------------------

const MSG_INVALID_CREDENTIALS: &str = "E-mail ou senha incorretos.";
const MSG_EMAIL_UNCONFIRMED: &str = "Por favor, confirme seu e-mail antes de entrar.";
const MSG_PROFILE_ERROR: &str = "Erro ao verificar perfil do usuário.";
const MSG_AWAITING_APPROVAL: &str = "Seu cadastro ainda não foi aprovado pelo administrador.";
const MSG_REJECTED: &str = "Seu cadastro foi rejeitado. Contate o suporte.";
const MSG_UNKNOWN_STATUS: &str = "Status da conta desconhecido.";
const MSG_DEVICE_ERROR: &str = "Erro ao identificar dispositivo.";
const MSG_EMAIL_REQUIRED: &str = "E-mail é obrigatório.";
const MSG_EMAIL_TAKEN: &str = "E-mail já cadastrado.";
const MSG_ADMIN_NOT_CONFIGURED: &str = "Acesso administrativo não está configurado.";
const MSG_SESSION_EXPIRED: &str = "Sessão expirada. Faça login novamente.";

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

/// Request body for `POST /auth/signup`.
#[derive(Debug, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, message = "Nome completo é obrigatório."))]
    pub full_name: String,
    #[validate(email(message = "E-mail inválido."))]
    pub email: String,
    #[validate(length(min = 1, message = "CPF ou CNPJ é obrigatório."))]
    pub document: String,
    #[validate(length(min = 1, message = "Celular é obrigatório."))]
    pub phone: String,
    #[validate(length(min = 8, message = "A senha deve ter no mínimo 8 caracteres."))]
    pub password: String,
    #[validate(must_match(other = "password", message = "As senhas não coincidem."))]
    pub confirm_password: String,
}

/// Response body for `POST /auth/signup`.
#[derive(Debug, Serialize)]
pub struct SignupResponse {
    pub redirect_to: &'static str,
}

/// Request body for `POST /auth/login`.
///
/// In admin mode the email field is ignored: the configured administrator
/// email is used and only the password is caller-supplied.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: String,
    #[serde(default)]
    pub admin_mode: bool,
    /// Locally generated device fingerprint. Required for normal-mode login;
    /// unused in admin mode.
    pub device_id: Option<String>,
}

/// Request body for `POST /auth/refresh`.
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

/// Successful authentication response returned by login and refresh.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    /// Access token lifetime in seconds.
    pub expires_in: i64,
    /// Where the client should navigate next (login only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect_to: Option<&'static str>,
    pub user: UserInfo,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// POST /api/v1/auth/signup
///
/// Register a new account. Creates the user and its `pending` profile in one
/// transaction; the account cannot log in until an administrator approves it.
pub async fn signup(
    State(state): State<AppState>,
    Json(input): Json<SignupRequest>,
) -> AppResult<(StatusCode, Json<SignupResponse>)> {
    input
        .validate()
        .map_err(|e| AppError::Core(CoreError::Validation(first_validation_message(&e))))?;

    let hashed = hash_password(&input.password)
        .map_err(|e| AppError::InternalError(format!("Password hashing error: {e}")))?;

    let mut tx = state.pool.begin().await?;

    let user = UserRepo::create(
        &mut *tx,
        &CreateUser {
            email: input.email.clone(),
            password_hash: hashed,
        },
    )
    .await
    .map_err(map_duplicate_email)?;

    ProfileRepo::create(
        &mut *tx,
        &CreateProfile {
            user_id: user.id,
            full_name: input.full_name,
            email: input.email,
            document: input.document,
            phone: input.phone,
        },
    )
    .await?;

    tx.commit().await?;

    tracing::info!(user_id = user.id, "New registration awaiting approval");

    Ok((
        StatusCode::CREATED,
        Json(SignupResponse {
            redirect_to: "/cadastro-recebido",
        }),
    ))
}

/// POST /api/v1/auth/login
///
/// Authenticate with email + password. In normal mode the profile must be
/// approved; a successful login unconditionally overwrites the device-session
/// binding, kicking any other device. In admin mode neither the profile nor
/// the device binding is consulted; the caller proceeds to the admin gate.
pub async fn login(
    State(state): State<AppState>,
    Json(input): Json<LoginRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Resolve the login email. Admin mode swaps in the configured address.
    let email = if input.admin_mode {
        state
            .config
            .admin
            .email
            .clone()
            .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_ADMIN_NOT_CONFIGURED.into())))?
    } else {
        input
            .email
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .map(str::to_string)
            .ok_or_else(|| AppError::Core(CoreError::Validation(MSG_EMAIL_REQUIRED.into())))?
    };

    // 2. Verify credentials.
    let user = UserRepo::find_by_email(&state.pool, &email)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_INVALID_CREDENTIALS.into())))?;

    let password_valid = verify_password(&input.password, &user.password_hash)
        .map_err(|e| AppError::InternalError(format!("Password verification error: {e}")))?;
    if !password_valid {
        return Err(AppError::Core(CoreError::Unauthorized(
            MSG_INVALID_CREDENTIALS.into(),
        )));
    }

    if !user.email_confirmed {
        return Err(AppError::Core(CoreError::Unauthorized(
            MSG_EMAIL_UNCONFIRMED.into(),
        )));
    }

    // 3. Admin mode: straight to the admin gate. No profile-status check and
    //    no device binding on this path.
    if input.admin_mode {
        let response =
            create_auth_response(&state, user.id, &user.email, Some("/admin_gate")).await?;
        return Ok(Json(response));
    }

    // 4. Normal mode: the profile must exist and be approved before any
    //    tokens are issued.
    let profile = ProfileRepo::find_by_user(&state.pool, user.id)
        .await
        .ok()
        .flatten()
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_PROFILE_ERROR.into())))?;

    match profile.status.parse::<ApprovalStatus>() {
        Ok(ApprovalStatus::Approved) => {}
        Ok(ApprovalStatus::Pending) => {
            return Err(AppError::Core(CoreError::Forbidden(
                MSG_AWAITING_APPROVAL.into(),
            )));
        }
        Ok(ApprovalStatus::Rejected) => {
            return Err(AppError::Core(CoreError::Forbidden(MSG_REJECTED.into())));
        }
        Err(_) => {
            return Err(AppError::Core(CoreError::Forbidden(
                MSG_UNKNOWN_STATUS.into(),
            )));
        }
    }

    // 5. A device fingerprint is mandatory: authorization cannot be
    //    established without the binding.
    let device_id = input
        .device_id
        .as_deref()
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .ok_or_else(|| AppError::BadRequest(MSG_DEVICE_ERROR.into()))?;

    let response = create_auth_response(&state, user.id, &user.email, Some("/catalogo")).await?;

    // 6. Upsert the device binding. The unconditional overwrite is the kick:
    //    any other device's session is silently invalidated. The write is
    //    best-effort -- login proceeds even if it fails.
    let upsert = UpsertDeviceSession {
        user_id: user.id,
        device_id: device_id.to_string(),
    };
    if let Err(e) = DeviceSessionRepo::upsert(&state.pool, &upsert).await {
        tracing::warn!(user_id = user.id, error = %e, "Device session upsert failed; login proceeds");
    }

    Ok(Json(response))
}

/// POST /api/v1/auth/refresh
///
/// Exchange a valid refresh token for new access + refresh tokens.
pub async fn refresh(
    State(state): State<AppState>,
    Json(input): Json<RefreshRequest>,
) -> AppResult<Json<AuthResponse>> {
    // 1. Hash the provided refresh token.
    let token_hash = hash_refresh_token(&input.refresh_token);

    // 2. Find matching active session.
    let session = AuthSessionRepo::find_by_refresh_token_hash(&state.pool, &token_hash)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_SESSION_EXPIRED.into())))?;

    // 3. Revoke old session (token rotation).
    AuthSessionRepo::revoke(&state.pool, session.id).await?;

    // 4. Re-resolve the user.
    let user = UserRepo::find_by_id(&state.pool, session.user_id)
        .await?
        .ok_or_else(|| AppError::Core(CoreError::Unauthorized(MSG_SESSION_EXPIRED.into())))?;

    // 5. Generate new tokens and create a new session.
    let response = create_auth_response(&state, user.id, &user.email, None).await?;

    Ok(Json(response))
}

/// POST /api/v1/auth/logout
///
/// Always succeeds from the caller's perspective. Best-effort: deactivate the
/// device binding, then revoke all refresh sessions; a failed deactivation
/// never prevents the revocation, and a failed revocation is only logged.
pub async fn logout(State(state): State<AppState>, auth_user: AuthUser) -> StatusCode {
    if let Err(e) = DeviceSessionRepo::deactivate(&state.pool, auth_user.user_id).await {
        tracing::warn!(user_id = auth_user.user_id, error = %e, "Device session deactivation failed");
    }

    if let Err(e) = AuthSessionRepo::revoke_all_for_user(&state.pool, auth_user.user_id).await {
        tracing::error!(user_id = auth_user.user_id, error = %e, "Refresh session revocation failed");
    }

    StatusCode::NO_CONTENT
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generate access + refresh tokens, persist a session row, and build the response.
async fn create_auth_response(
    state: &AppState,
    user_id: DbId,
    email: &str,
    redirect_to: Option<&'static str>,
) -> AppResult<AuthResponse> {
    let access_token = generate_access_token(user_id, email, &state.config.jwt)
        .map_err(|e| AppError::InternalError(format!("Token generation error: {e}")))?;

    let (refresh_plaintext, refresh_hash) = generate_refresh_token();

    let expires_at =
        Utc::now() + chrono::Duration::days(state.config.jwt.refresh_token_expiry_days);

    let session_input = CreateAuthSession {
        user_id,
        refresh_token_hash: refresh_hash,
        expires_at,
    };
    AuthSessionRepo::create(&state.pool, &session_input).await?;

    let expires_in = state.config.jwt.access_token_expiry_mins * 60;

    Ok(AuthResponse {
        access_token,
        refresh_token: refresh_plaintext,
        expires_in,
        redirect_to,
        user: UserInfo {
            id: user_id,
            email: email.to_string(),
        },
    })
}

/// Map a unique-violation on the users email to the localized conflict.
fn map_duplicate_email(err: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &err {
        if db_err.code().as_deref() == Some("23505")
            && db_err.constraint() == Some("uq_users_email")
        {
            return AppError::Core(CoreError::Conflict(MSG_EMAIL_TAKEN.into()));
        }
    }
    AppError::Database(err)
}

/// Pull the first human-readable message out of a [`ValidationErrors`].
fn first_validation_message(errors: &ValidationErrors) -> String {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(_, errs)| errs.iter())
        .find_map(|e| e.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Dados de cadastro inválidos.".to_string())
}
