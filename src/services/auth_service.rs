// src/services/auth_service.rs
//! Account registration, login and profile updates against the backend's user endpoints

use anyhow::{Context, Result};
use serde_json::Value;
use std::sync::Arc;
use tracing::{error, info};

use crate::core::{HttpStatusError, ServiceClient};
use crate::types::{
    response::{LoginRequest, ProfileUpdate, RegisterRequest, UserProfile},
    SessionContext, UserRole,
};

const USERS_ENDPOINT: &str = "/usuarios";
const LOGIN_ENDPOINT: &str = "/usuarios/login";

pub struct AuthService {
    client: Arc<ServiceClient>,
}

impl AuthService {
    pub fn new(client: Arc<ServiceClient>) -> Self {
        Self { client }
    }

    /// Create an account; `role` is free text (`recrutador`/`recruiter` grants recruiter access)
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        role: &str,
    ) -> Result<Value> {
        let role = UserRole::from_user_input(role);
        info!("Registering {} as {}", email, role.backend_code());

        let payload = RegisterRequest {
            nome: name,
            email,
            senha: password,
            tipo_usuario: role.backend_code(),
        };

        self.client
            .post_json(USERS_ENDPOINT, &payload)
            .await
            .context("Failed to create account")
    }

    /// Log in and build the session for the returned user
    pub async fn login(&self, email: &str, password: &str) -> Result<SessionContext> {
        let payload = LoginRequest {
            email,
            senha: password,
        };

        let body: Value = self
            .client
            .post_json(LOGIN_ENDPOINT, &payload)
            .await
            .map_err(|e| {
                error!("Login failed for {}: {:#}", email, e);
                login_error(e)
            })?;

        let session = session_from_login(body)?;
        info!("Logged in as {} ({})", session.user_id, session.role.as_str());
        Ok(session)
    }

    /// Update the user record and return the refreshed session
    pub async fn update_profile(
        &self,
        session: &SessionContext,
        update: &ProfileUpdate,
    ) -> Result<SessionContext> {
        if update.is_empty() {
            anyhow::bail!("Nothing to update");
        }

        let body: Value = self
            .client
            .put_json(&format!("{}/{}", USERS_ENDPOINT, session.user_id), update)
            .await
            .context("Failed to update profile")?;

        Ok(merge_profile(session, &body))
    }
}

/// Only a rejected request means bad credentials; transport and decode failures keep their cause
fn login_error(err: anyhow::Error) -> anyhow::Error {
    if HttpStatusError::find(&err).is_some() {
        anyhow::anyhow!("Invalid email or password")
    } else {
        err.context("Login failed")
    }
}

/// Login answers either `{usuario: {...}}` or the bare user object
fn session_from_login(body: Value) -> Result<SessionContext> {
    let user = match body {
        Value::Object(mut map) if map.get("usuario").is_some_and(Value::is_object) => {
            map.remove("usuario").unwrap_or_default()
        }
        other => other,
    };

    let profile: UserProfile =
        serde_json::from_value(user).context("Login response did not contain a user")?;
    Ok(profile.into())
}

/// Apply whichever of name/email/role the backend echoed back
fn merge_profile(session: &SessionContext, body: &Value) -> SessionContext {
    let mut updated = session.clone();

    if let Some(name) = body.get("nome").and_then(Value::as_str) {
        updated.name = name.to_string();
    }
    if let Some(email) = body.get("email").and_then(Value::as_str) {
        updated.email = Some(email.to_string());
    }
    if let Some(role) = body.get("tipoUsuario").and_then(Value::as_str) {
        updated.role = UserRole::from_backend(role);
    }

    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_unwraps_usuario() {
        let session = session_from_login(json!({
            "token": "ignored",
            "usuario": {"id": "r1", "nome": "Rita", "tipoUsuario": "RECRUITER"}
        }))
        .unwrap();

        assert_eq!(session.user_id, "r1");
        assert_eq!(session.role, UserRole::Recruiter);
    }

    #[test]
    fn test_login_accepts_bare_user() {
        let session = session_from_login(json!({
            "id": "c1",
            "nome": "Carla",
            "email": "carla@example.com",
            "tipoUsuario": "USER"
        }))
        .unwrap();

        assert_eq!(session.name, "Carla");
        assert_eq!(session.email.as_deref(), Some("carla@example.com"));
        assert_eq!(session.role, UserRole::Candidate);
    }

    #[test]
    fn test_login_without_user_id_fails() {
        assert!(session_from_login(json!({"message": "ok"})).is_err());
    }

    #[test]
    fn test_rejected_login_reports_invalid_credentials() {
        let rejected = anyhow::Error::from(HttpStatusError {
            status: reqwest::StatusCode::UNAUTHORIZED,
            body: r#"{"erro":"Credenciais inválidas"}"#.to_string(),
        })
        .context("Failed to POST to /usuarios/login");

        assert_eq!(login_error(rejected).to_string(), "Invalid email or password");
    }

    #[test]
    fn test_unreachable_backend_is_not_reported_as_bad_credentials() {
        let timeout = anyhow::anyhow!("operation timed out")
            .context("HTTP request failed")
            .context("Failed to POST to /usuarios/login");

        let err = login_error(timeout);
        assert_eq!(err.to_string(), "Login failed");
        assert!(err.chain().any(|cause| cause.to_string() == "operation timed out"));
    }

    #[test]
    fn test_merge_profile_keeps_unreturned_fields() {
        let session = SessionContext {
            user_id: "c1".to_string(),
            name: "Carla".to_string(),
            email: Some("carla@example.com".to_string()),
            role: UserRole::Candidate,
        };

        let updated = merge_profile(&session, &json!({"nome": "Carla Dias"}));
        assert_eq!(updated.name, "Carla Dias");
        assert_eq!(updated.email, session.email);
        assert_eq!(updated.role, UserRole::Candidate);
    }
}
