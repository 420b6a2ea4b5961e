//! Session - who is signed in and whether they may curate the catalog

use serde::{Deserialize, Serialize};
use thiserror::Error;

const ADMIN_EMAIL: &str = "treinofit@gmail.com";
const ADMIN_PASSWORD: &str = "admin";
const ADMIN_NAME: &str = "Administrador";
const DEFAULT_NAME: &str = "Atleta";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum LoginError {
    #[error("Preencha todos os campos.")]
    EmptyCredentials,
}

/// Signed-in user. The email doubles as the key of their stored plan.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Session {
    pub email: String,
    pub name: String,
    pub is_admin: bool,
}

impl Session {
    /// Fixed identity behind the "Google" button. No real OAuth happens.
    pub fn google() -> Self {
        Self {
            email: "google_user@gmail.com".to_string(),
            name: "Usuário Google".to_string(),
            is_admin: false,
        }
    }
}

/// Admin policy. Not a security boundary; swap for a real check here.
pub fn is_admin_credentials(email: &str, password: &str) -> bool {
    email == ADMIN_EMAIL && password == ADMIN_PASSWORD
}

pub fn login(email: &str, password: &str, name: &str) -> Result<Session, LoginError> {
    if is_admin_credentials(email, password) {
        return Ok(Session {
            email: email.to_string(),
            name: ADMIN_NAME.to_string(),
            is_admin: true,
        });
    }

    if email.is_empty() || password.is_empty() {
        return Err(LoginError::EmptyCredentials);
    }

    let name = if name.is_empty() { DEFAULT_NAME } else { name };
    Ok(Session {
        email: email.to_string(),
        name: name.to_string(),
        is_admin: false,
    })
}
