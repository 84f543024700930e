// src/types/session.rs
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Recruiter,
    Candidate,
}

impl UserRole {
    /// Map the backend's `tipoUsuario`; only `RECRUITER` grants recruiter access
    pub fn from_backend(code: &str) -> Self {
        if code.trim().eq_ignore_ascii_case("RECRUITER") {
            Self::Recruiter
        } else {
            Self::Candidate
        }
    }

    /// Map a role typed by a user (`recrutador`, `recruiter`, anything else)
    pub fn from_user_input(input: &str) -> Self {
        match input.trim().to_lowercase().as_str() {
            "recrutador" | "recruiter" => Self::Recruiter,
            _ => Self::Candidate,
        }
    }

    pub fn backend_code(&self) -> &'static str {
        match self {
            Self::Recruiter => "RECRUITER",
            Self::Candidate => "USER",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Recruiter => "recruiter",
            Self::Candidate => "candidate",
        }
    }
}

/// Identity of the signed-in user, passed explicitly to whatever needs it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionContext {
    pub user_id: String,
    pub name: String,
    pub email: Option<String>,
    pub role: UserRole,
}

impl SessionContext {
    pub fn first_name(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    pub fn is_recruiter(&self) -> bool {
        self.role == UserRole::Recruiter
    }
}
