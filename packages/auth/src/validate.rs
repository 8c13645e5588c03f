//! Registration input validation.

use std::sync::OnceLock;

use regex::Regex;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 6;

fn email_regex() -> &'static Regex {
    static EMAIL_RE: OnceLock<Regex> = OnceLock::new();
    EMAIL_RE.get_or_init(|| {
        Regex::new(r"^[a-zA-Z0-9._%+-]+@[a-zA-Z0-9.-]+\.[a-zA-Z]{2,}$")
            .expect("email regex is valid")
    })
}

/// Whether the string looks like an email address.
#[must_use]
pub fn validate_email(email: &str) -> bool {
    email_regex().is_match(email)
}

/// Validates a registration payload, returning the first failed rule as a
/// Russian message.
///
/// # Errors
///
/// Returns the message to show the client when a rule fails.
pub fn validate_registration(
    email: &str,
    name: &str,
    password: &str,
    confirm_password: &str,
    city: &str,
) -> Result<(), &'static str> {
    if email.is_empty() || name.is_empty() || password.is_empty() || city.is_empty() {
        return Err("Все поля обязательны для заполнения");
    }

    if password != confirm_password {
        return Err("Пароли не совпадают");
    }

    if password.chars().count() < PASSWORD_MIN_LEN {
        return Err("Пароль должен содержать минимум 6 символов");
    }

    if !validate_email(email) {
        return Err("Некорректный email");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_plausible_emails() {
        assert!(validate_email("user1@ecopulse.ru"));
        assert!(validate_email("ivan.petrov+test@mail.example.com"));
    }

    #[test]
    fn rejects_malformed_emails() {
        assert!(!validate_email("user"));
        assert!(!validate_email("user@"));
        assert!(!validate_email("user@host"));
        assert!(!validate_email("@host.ru"));
    }

    #[test]
    fn registration_rules_fire_in_order() {
        assert_eq!(
            validate_registration("", "Имя", "secret1", "secret1", "Барнаул"),
            Err("Все поля обязательны для заполнения")
        );
        assert_eq!(
            validate_registration("a@b.ru", "Имя", "secret1", "secret2", "Барнаул"),
            Err("Пароли не совпадают")
        );
        assert_eq!(
            validate_registration("a@b.ru", "Имя", "abc", "abc", "Барнаул"),
            Err("Пароль должен содержать минимум 6 символов")
        );
        assert_eq!(
            validate_registration("not-an-email", "Имя", "secret1", "secret1", "Барнаул"),
            Err("Некорректный email")
        );
        assert!(
            validate_registration("a@b.ru", "Имя", "secret1", "secret1", "Барнаул").is_ok()
        );
    }
}
