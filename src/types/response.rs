// src/types/response.rs
//! Request and response bodies exchanged with the recruiting backend

use serde::{Deserialize, Serialize};

use super::{null_as_default, SessionContext, UserRole};

// ===== Requests =====

#[derive(Debug, Serialize)]
pub struct RegisterRequest<'a> {
    pub nome: &'a str,
    pub email: &'a str,
    pub senha: &'a str,
    #[serde(rename = "tipoUsuario")]
    pub tipo_usuario: &'static str,
}

#[derive(Debug, Serialize)]
pub struct LoginRequest<'a> {
    pub email: &'a str,
    pub senha: &'a str,
}

#[derive(Debug, Default, Clone, Serialize)]
pub struct ProfileUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nome: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(rename = "tipoUsuario", skip_serializing_if = "Option::is_none")]
    pub tipo_usuario: Option<String>,
}

impl ProfileUpdate {
    pub fn is_empty(&self) -> bool {
        self.nome.is_none() && self.email.is_none() && self.tipo_usuario.is_none()
    }
}

#[derive(Debug, Serialize)]
pub struct NewQuestionRequest<'a> {
    pub texto: &'a str,
    pub tags: Vec<&'a str>,
    #[serde(rename = "usuarioId")]
    pub usuario_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewAnswerRequest<'a> {
    pub candidato: &'a str,
    #[serde(rename = "perguntaId")]
    pub pergunta_id: &'a str,
    pub resposta: &'a str,
    #[serde(rename = "usuarioId")]
    pub usuario_id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct AnalysisRequest<'a> {
    #[serde(rename = "respostaId")]
    pub resposta_id: &'a str,
    pub criterios: Vec<&'a str>,
    #[serde(rename = "contextoPergunta")]
    pub contexto_pergunta: &'a str,
}

// ===== Responses =====

/// User record as returned by login, registration and profile updates
#[derive(Debug, Clone, Deserialize)]
pub struct UserProfile {
    pub id: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub nome: String,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(rename = "tipoUsuario", default)]
    pub tipo_usuario: Option<String>,
}

impl UserProfile {
    pub fn role(&self) -> UserRole {
        self.tipo_usuario
            .as_deref()
            .map(UserRole::from_backend)
            .unwrap_or(UserRole::Candidate)
    }
}

impl From<UserProfile> for SessionContext {
    fn from(profile: UserProfile) -> Self {
        let role = profile.role();
        Self {
            user_id: profile.id,
            name: profile.nome,
            email: profile.email,
            role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_update_skips_unset_fields() {
        let update = ProfileUpdate {
            nome: Some("Ana".to_string()),
            ..Default::default()
        };
        let body = serde_json::to_value(&update).unwrap();
        assert_eq!(body, serde_json::json!({"nome": "Ana"}));
        assert!(!update.is_empty());
        assert!(ProfileUpdate::default().is_empty());
    }

    #[test]
    fn test_user_profile_into_session() {
        let profile: UserProfile = serde_json::from_value(serde_json::json!({
            "id": "r1",
            "nome": "Rita Lima",
            "email": "rita@example.com",
            "tipoUsuario": "RECRUITER"
        }))
        .unwrap();

        let session = SessionContext::from(profile);
        assert_eq!(session.user_id, "r1");
        assert!(session.is_recruiter());
    }
}
