use crate::error::AppError;
use bcrypt::{hash, verify};

/// Salted one-way password hashing with a fixed bcrypt work factor.
///
/// Failures here are infrastructure errors (`InternalServerError`), never a
/// "wrong password" outcome: a mismatch is `Ok(false)`.
#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, AppError> {
        hash(password, self.cost)
            .map_err(|e| AppError::InternalServerError(format!("Failed to hash password: {}", e)))
    }

    pub fn verify(&self, password: &str, hashed_password: &str) -> Result<bool, AppError> {
        verify(password, hashed_password).map_err(|e| {
            AppError::InternalServerError(format!("Failed to verify password: {}", e))
        })
    }
}
