//! Built-in rule tables for the register and login pages.

use crate::config::FormConfig;
use crate::rules::FieldRule;

pub const REGISTER_FORM_ID: &str = "register-form";
pub const LOGIN_FORM_ID: &str = "login-form";

pub const USERNAME_FIELD: &str = "username";
pub const PASSWORD_FIELD: &str = "password";

pub const USERNAME_MIN_LENGTH: usize = 4;
pub const PASSWORD_MIN_LENGTH: usize = 8;

pub const USERNAME_TOO_SHORT: &str = "Имя пользователя должно содержать не менее 4 символов.";
pub const PASSWORD_TOO_SHORT: &str = "Пароль должен содержать не менее 8 символов.";

/// Username then password; order decides which field gets focus.
pub fn credential_rules() -> Vec<FieldRule> {
    vec![
        FieldRule::new(USERNAME_FIELD, USERNAME_MIN_LENGTH, USERNAME_TOO_SHORT),
        FieldRule::new(PASSWORD_FIELD, PASSWORD_MIN_LENGTH, PASSWORD_TOO_SHORT),
    ]
}

/// Registration form; invalid inputs are marked.
pub fn register_form() -> FormConfig {
    FormConfig {
        form_id: REGISTER_FORM_ID.to_string(),
        mark_invalid: true,
        fields: credential_rules(),
    }
}

/// Login form; only inline messages are shown.
pub fn login_form() -> FormConfig {
    FormConfig {
        form_id: LOGIN_FORM_ID.to_string(),
        mark_invalid: false,
        fields: credential_rules(),
    }
}

pub fn default_forms() -> Vec<FormConfig> {
    vec![register_form(), login_form()]
}
