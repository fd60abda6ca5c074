use axum::{extract::FromRequestParts, http::header};
use uuid::Uuid;

use crate::{error::AppError, models::Profile, session::SharedSession, state::AppState};

/// A request made inside a live dashboard session.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub id: Uuid,
    pub session: SharedSession,
}

pub fn ensure_role(profile: &Profile, role: &str) -> Result<(), AppError> {
    if profile.role != role {
        return Err(AppError::Forbidden);
    }
    Ok(())
}

pub fn ensure_admin(profile: &Profile) -> Result<(), AppError> {
    ensure_role(profile, "admin")
}

impl FromRequestParts<AppState> for AdminSession {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_str = parts
            .headers
            .get(header::AUTHORIZATION)
            .ok_or(AppError::Unauthorized)?
            .to_str()
            .map_err(|_| AppError::Unauthorized)?;

        let token = auth_str
            .strip_prefix("Bearer ")
            .ok_or(AppError::Unauthorized)?
            .trim();
        let id = Uuid::parse_str(token).map_err(|_| AppError::Unauthorized)?;

        let session = state.sessions.get(&id).await.ok_or(AppError::Unauthorized)?;
        Ok(AdminSession { id, session })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_admin_role_passes() {
        let mut profile = Profile {
            email: None,
            name: None,
            role: "admin".into(),
        };
        assert!(ensure_admin(&profile).is_ok());
        profile.role = "customer".into();
        assert!(matches!(ensure_admin(&profile), Err(AppError::Forbidden)));
    }
}
