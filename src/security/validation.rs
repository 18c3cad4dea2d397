use once_cell::sync::Lazy;
use regex::Regex;

/// Letters, digits and `@ . + - _`, unicode letters included.
static USERNAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[\w.@+-]+$").unwrap()
});

static NUMERIC_REGEX: Lazy<Regex> = Lazy::new(|| {
    #[allow(clippy::unwrap_used)]
    Regex::new(r"^[0-9]+$").unwrap()
});

pub const USERNAME_MAX_LENGTH: usize = 150;
pub const PASSWORD_MIN_LENGTH: usize = 8;

/// Passwords rejected outright no matter what else they satisfy.
const COMMON_PASSWORDS: &[&str] = &[
    "123456",
    "123456789",
    "12345678",
    "password",
    "password1",
    "password123",
    "qwerty",
    "qwerty123",
    "qwertyuiop",
    "abc123",
    "111111",
    "1234567890",
    "iloveyou",
    "admin",
    "admin123",
    "letmein",
    "welcome",
    "welcome1",
    "monkey",
    "dragon",
    "football",
    "baseball",
    "sunshine",
    "princess",
    "trustno1",
    "superman",
    "starwars",
    "passw0rd",
    "master",
    "whatever",
    "bookstore",
    "changeme",
];

/// Input validation for accounts.
///
/// Every check returns the user facing message, which the registration form
/// displays verbatim.
pub struct Validator;

impl Validator {
    /// Validates the username rules in order and stops at the first failure.
    ///
    /// # Example
    /// ```
    /// use bookstore::security::Validator;
    ///
    /// assert!(Validator::validate_username("jane.doe@home").is_ok());
    /// assert_eq!(
    ///     Validator::validate_username("").unwrap_err(),
    ///     "Username is required."
    /// );
    /// ```
    pub fn validate_username(username: &str) -> Result<(), String> {
        if username.is_empty() {
            return Err("Username is required.".to_string());
        }

        if username.chars().count() > USERNAME_MAX_LENGTH {
            return Err(format!(
                "Username must be max {USERNAME_MAX_LENGTH} characters long."
            ));
        }

        if !USERNAME_REGEX.is_match(username) {
            return Err("Enter a valid username. This value may contain only letters, numbers, and @/./+/-/_ characters.".to_string());
        }

        Ok(())
    }

    /// Validates password strength against the account it belongs to.
    ///
    /// All violations are reported, in a fixed order.
    ///
    /// # Example
    /// ```
    /// use bookstore::security::Validator;
    ///
    /// assert!(Validator::validate_password("Sup3r-Secret!", "jane").is_ok());
    ///
    /// let errors = Validator::validate_password("1234", "jane").unwrap_err();
    /// assert_eq!(errors.len(), 3);
    /// ```
    pub fn validate_password(password: &str, username: &str) -> Result<(), Vec<String>> {
        let mut errors = Vec::new();

        if password.chars().count() < PASSWORD_MIN_LENGTH {
            errors.push(format!(
                "This password is too short. It must contain at least {PASSWORD_MIN_LENGTH} characters."
            ));
        }

        if NUMERIC_REGEX.is_match(password) {
            errors.push("This password is entirely numeric.".to_string());
        }

        if Self::too_similar(password, username) {
            errors.push("The password is too similar to the username.".to_string());
        }

        if Self::is_common(password) {
            errors.push("This password is too common.".to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    fn too_similar(password: &str, username: &str) -> bool {
        if username.len() < 3 {
            return false;
        }

        let password = password.to_lowercase();
        let username = username.to_lowercase();

        password.contains(&username) || username.contains(&password)
    }

    fn is_common(password: &str) -> bool {
        let lowered = password.to_lowercase();

        COMMON_PASSWORDS.iter().any(|common| *common == lowered)
    }
}
