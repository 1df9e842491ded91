use serde::Deserialize;

use crate::error::{GuardError, Result};

pub const CODE_LENGTH: usize = 6;

#[derive(Debug, Clone, Deserialize)]
pub struct AskCodeQuery {
    pub email: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetConfirmRequest {
    pub email: String,
    pub code: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub password: String,
}

impl AskCodeQuery {
    pub fn validate(&self) -> Result<()> {
        check_email(&self.email)
    }
}

impl LoginForm {
    pub fn validate(&self) -> Result<()> {
        if self.username.is_empty() || self.password.is_empty() {
            return Err(GuardError::invalid_parameter("username and password are required"));
        }
        Ok(())
    }
}

impl RegisterRequest {
    pub fn validate(&self) -> Result<()> {
        check_username(&self.username)?;
        check_length("password", &self.password, 6, 20)?;
        check_email(&self.email)?;
        check_code(&self.code)
    }
}

impl ResetConfirmRequest {
    pub fn validate(&self) -> Result<()> {
        check_email(&self.email)?;
        check_code(&self.code)
    }
}

impl ResetPasswordRequest {
    pub fn validate(&self) -> Result<()> {
        check_email(&self.email)?;
        check_code(&self.code)?;
        check_length("password", &self.password, 5, 20)
    }
}

fn check_email(email: &str) -> Result<()> {
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
                && !domain.contains('@')
        }
        None => false,
    };
    if valid {
        Ok(())
    } else {
        Err(GuardError::invalid_parameter(format!("invalid email address: {email}")))
    }
}

fn check_code(code: &str) -> Result<()> {
    if code.len() == CODE_LENGTH && code.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(GuardError::invalid_parameter("verification code must be 6 digits"))
    }
}

// 允许字母、数字及中文等 Unicode 字母
fn check_username(username: &str) -> Result<()> {
    check_length("username", username, 1, 10)?;
    if username.chars().all(char::is_alphanumeric) {
        Ok(())
    } else {
        Err(GuardError::invalid_parameter("username may only contain letters and digits"))
    }
}

fn check_length(field: &str, value: &str, min: usize, max: usize) -> Result<()> {
    let len = value.chars().count();
    if (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(GuardError::invalid_parameter(format!(
            "{field} must be between {min} and {max} characters"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_malformed_email() {
        assert!(check_email("a@x.com").is_ok());
        assert!(check_email("ax.com").is_err());
        assert!(check_email("@x.com").is_err());
        assert!(check_email("a@").is_err());
        assert!(check_email("a b@x.com").is_err());
    }

    #[test]
    fn code_must_be_six_digits() {
        assert!(check_code("123456").is_ok());
        assert!(check_code("12345").is_err());
        assert!(check_code("12345a").is_err());
    }

    #[test]
    fn username_allows_cjk() {
        assert!(check_username("张三").is_ok());
        assert!(check_username("alice_1").is_err());
        assert!(check_username("abcdefghijk").is_err());
    }
}
