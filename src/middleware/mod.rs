use tracing::{info, warn};

use crate::directory::CustomerDirectory;
use crate::error::AuthError;

/// Account that gets the operator menu instead of the customer one.
pub const ADMIN_USERNAME: &str = "admin";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    Admin,
    Customer,
}

/// A user whose credentials were checked against the directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }
}

/// Check a username/password pair.
pub fn authenticate(directory: &CustomerDirectory, username: &str, password: &str) -> Result<AuthUser, AuthError> {
    let customer = directory
        .get(username)
        .ok_or_else(|| AuthError::UnknownUser(username.to_string()))?;

    if !customer.verify_password(password) {
        warn!("Invalid password for {}", username);
        return Err(AuthError::InvalidPassword);
    }

    let role = if username == ADMIN_USERNAME { Role::Admin } else { Role::Customer };
    info!("{} logged in as {:?}", username, role);
    Ok(AuthUser {
        username: username.to_string(),
        role,
    })
}
