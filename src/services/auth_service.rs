use crate::{
    dto::auth::{LoginRequest, LoginResponse},
    error::{AppError, AppResult},
    middleware::auth::{AdminSession, ensure_admin},
    models::Profile,
    response::{ApiResponse, Meta},
    session::DashboardSession,
    state::AppState,
};

/// Logs in against the backend and opens a dashboard session, but only for
/// admins.
pub async fn login(state: &AppState, payload: LoginRequest) -> AppResult<ApiResponse<LoginResponse>> {
    let LoginRequest { email, password } = payload;
    if email.trim().is_empty() || password.is_empty() {
        return Err(AppError::BadRequest(
            "Please enter email and password".to_string(),
        ));
    }

    let credentials = state
        .backend
        .login(email.trim(), &password)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "backend login failed");
            AppError::backend("Login failed", err)
        })?;

    let profile = state
        .backend
        .profile(&credentials)
        .await
        .map_err(|err| AppError::backend("Please login to access dashboard", err))?;
    if let Err(err) = ensure_admin(&profile) {
        tracing::warn!(role = %profile.role, "non-admin login rejected");
        return Err(err);
    }

    let token = state
        .sessions
        .insert(DashboardSession::new(credentials, profile.clone()))
        .await;
    tracing::info!(session = %token, "dashboard session opened");

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse { token, profile },
        Some(Meta::empty()),
    ))
}

/// Re-checks the session's user with the backend. A session whose backend
/// login expired or lost its admin role is closed.
pub async fn profile(state: &AppState, admin: &AdminSession) -> AppResult<ApiResponse<Profile>> {
    let mut session = admin.session.lock().await;
    let checked = match state.backend.profile(&session.credentials).await {
        Ok(profile) => ensure_admin(&profile).map(|_| profile),
        Err(err) => {
            tracing::warn!(error = %err, "profile check failed");
            Err(AppError::Unauthorized)
        }
    };

    match checked {
        Ok(profile) => {
            session.profile = profile.clone();
            Ok(ApiResponse::success("Profile", profile, None))
        }
        Err(err) => {
            drop(session);
            state.sessions.remove(&admin.id).await;
            tracing::info!(session = %admin.id, "dashboard session closed by profile check");
            Err(err)
        }
    }
}

/// Logs out of the backend first; the dashboard session only ends when that
/// succeeded.
pub async fn logout(
    state: &AppState,
    admin: &AdminSession,
) -> AppResult<ApiResponse<serde_json::Value>> {
    let session = admin.session.lock().await;
    state
        .backend
        .logout(&session.credentials)
        .await
        .map_err(|err| {
            tracing::warn!(error = %err, "backend logout failed");
            AppError::backend("Logout failed", err)
        })?;
    drop(session);

    state.sessions.remove(&admin.id).await;
    tracing::info!(session = %admin.id, "dashboard session closed");

    Ok(ApiResponse::success(
        "Logged out successfully!",
        serde_json::json!({}),
        Some(Meta::empty()),
    ))
}
