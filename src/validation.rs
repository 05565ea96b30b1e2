//! Form checks that mirror the backend's own validation, so obviously bad input
//! is rejected before a request is made.

use crate::models::TaskDraft;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const TITLE_MAX: usize = 200;
pub const DESCRIPTION_MAX: usize = 1000;
pub const USERNAME_MIN: usize = 3;
pub const USERNAME_MAX: usize = 50;
pub const PASSWORD_MIN: usize = 6;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("task title is required")]
    TitleRequired,
    #[error("task title is too long (max {} characters)", TITLE_MAX)]
    TitleTooLong,
    #[error("description is too long (max {} characters)", DESCRIPTION_MAX)]
    DescriptionTooLong,
    #[error("all fields are required")]
    MissingFields,
    #[error("username must be at least {} characters", USERNAME_MIN)]
    UsernameTooShort,
    #[error("username is too long (max {} characters)", USERNAME_MAX)]
    UsernameTooLong,
    #[error("password must be at least {} characters", PASSWORD_MIN)]
    PasswordTooShort,
    #[error("passwords do not match")]
    PasswordMismatch,
    #[error("enter a valid email address")]
    InvalidEmail,
    #[error("enter a username and password")]
    MissingCredentials,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct RegistrationForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Registration {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

pub fn validate_task(title: &str, description: &str) -> Result<TaskDraft, ValidationError> {
    let title = title.trim();
    let description = description.trim();

    if title.is_empty() {
        return Err(ValidationError::TitleRequired);
    }
    if title.chars().count() > TITLE_MAX {
        return Err(ValidationError::TitleTooLong);
    }
    if description.chars().count() > DESCRIPTION_MAX {
        return Err(ValidationError::DescriptionTooLong);
    }

    Ok(TaskDraft {
        title: title.to_string(),
        description: description.to_string(),
    })
}

pub fn validate_registration(form: &RegistrationForm) -> Result<Registration, ValidationError> {
    let username = form.username.trim();
    let email = form.email.trim();

    if username.is_empty()
        || email.is_empty()
        || form.password.is_empty()
        || form.confirm_password.is_empty()
    {
        return Err(ValidationError::MissingFields);
    }

    let username_len = username.chars().count();
    if username_len < USERNAME_MIN {
        return Err(ValidationError::UsernameTooShort);
    }
    if username_len > USERNAME_MAX {
        return Err(ValidationError::UsernameTooLong);
    }
    if form.password.chars().count() < PASSWORD_MIN {
        return Err(ValidationError::PasswordTooShort);
    }
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if !email.contains('@') || !email.contains('.') {
        return Err(ValidationError::InvalidEmail);
    }

    Ok(Registration {
        username: username.to_string(),
        email: email.to_lowercase(),
        password: form.password.clone(),
    })
}

pub fn validate_login(form: &LoginForm) -> Result<Credentials, ValidationError> {
    let username = form.username.trim();
    if username.is_empty() || form.password.is_empty() {
        return Err(ValidationError::MissingCredentials);
    }

    Ok(Credentials {
        username: username.to_string(),
        password: form.password.clone(),
    })
}
