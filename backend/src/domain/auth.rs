//! Authentication primitives: credential bounds, failure reasons, and the
//! validated credential value types.
//!
//! Handlers parse request payloads into [`SignupCredentials`] or
//! [`LoginCredentials`] before talking to the account service, so every
//! syntactic check runs before any storage access. Checks run in a fixed
//! order and the first violated constraint is the one reported.

use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use zeroize::Zeroizing;

/// Minimum allowed length for a username.
pub const USERNAME_MIN: usize = 3;
/// Maximum allowed length for a username.
pub const USERNAME_MAX: usize = 16;
/// Minimum allowed length for a password.
pub const PASSWORD_MIN: usize = 8;
/// Maximum allowed length for a password.
pub const PASSWORD_MAX: usize = 128;
/// Minimum allowed length for an email address.
pub const EMAIL_MIN: usize = 5;
/// Maximum allowed length for an email address.
pub const EMAIL_MAX: usize = 254;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Email grammar accepting `local@domain.tld` forms, including subdomains
/// and non-ASCII mailboxes. Length bounds are enforced separately; this
/// pattern constrains shape only, so strings with no `@`, no TLD, or
/// embedded whitespace fail.
fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let pattern = concat!(
            r"^([A-Za-z0-9._%+-]|[^\x00-\x7F])+",
            r"@([A-Za-z0-9.-]|[^\x00-\x7F])+",
            r"\.([A-Za-z]|[^\x00-\x7F]){2,63}$",
        );
        Regex::new(pattern)
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

fn in_bounds(input: &str, min: usize, max: usize) -> bool {
    let length = input.chars().count();
    length >= min && length <= max
}

/// Reason a credential check failed.
///
/// Exactly one reason is produced per attempt; the wire message for each is
/// fixed by [`fmt::Display`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CredentialFailure {
    /// Username length outside `[USERNAME_MIN, USERNAME_MAX]`.
    UsernameLength,
    /// Password length outside `[PASSWORD_MIN, PASSWORD_MAX]`.
    PasswordLength,
    /// Email length outside `[EMAIL_MIN, EMAIL_MAX]`.
    EmailLength,
    /// Email did not match the address grammar.
    EmailFormat,
    /// Login identifier (username or email) length out of bounds.
    IdentifierLength,
    /// Username or email already belongs to another account.
    AlreadyTaken,
    /// No account matches the supplied identifier.
    UnknownUser,
    /// The account exists but the password did not match.
    WrongPassword,
}

impl fmt::Display for CredentialFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::UsernameLength => "Invalid username length.",
            Self::PasswordLength => "Invalid password length.",
            Self::EmailLength => "Invalid email length.",
            Self::EmailFormat => "Invalid email address.",
            Self::IdentifierLength => "Invalid username/email length.",
            Self::AlreadyTaken => "That username/email is already taken.",
            Self::UnknownUser => {
                "That user was not found. Please enter valid user credentials."
            }
            Self::WrongPassword => "Invalid password entered.",
        };
        f.write_str(message)
    }
}

impl std::error::Error for CredentialFailure {}

/// Validated signup payload.
///
/// ## Invariants
/// - `username` and `email` are lower-cased and within bounds.
/// - `email` matches the address grammar.
/// - `password` is within bounds and zeroized on drop.
#[derive(Debug, Clone)]
pub struct SignupCredentials {
    username: String,
    email: String,
    password: Zeroizing<String>,
}

impl SignupCredentials {
    /// Check the signup payload in the contract order: username length,
    /// password length, email length, email format. The first violated
    /// constraint short-circuits.
    pub fn try_from_parts(
        username: &str,
        password: &str,
        email: &str,
    ) -> Result<Self, CredentialFailure> {
        if !in_bounds(username, USERNAME_MIN, USERNAME_MAX) {
            return Err(CredentialFailure::UsernameLength);
        }
        if !in_bounds(password, PASSWORD_MIN, PASSWORD_MAX) {
            return Err(CredentialFailure::PasswordLength);
        }
        if !in_bounds(email, EMAIL_MIN, EMAIL_MAX) {
            return Err(CredentialFailure::EmailLength);
        }
        if !email_regex().is_match(email) {
            return Err(CredentialFailure::EmailFormat);
        }

        Ok(Self {
            username: username.to_lowercase(),
            email: email.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Lower-cased username.
    pub fn username(&self) -> &str {
        self.username.as_str()
    }

    /// Lower-cased email address.
    pub fn email(&self) -> &str {
        self.email.as_str()
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validated login payload.
///
/// The identifier may be a username or an email, so its length bound widens
/// to the email maximum.
#[derive(Debug, Clone)]
pub struct LoginCredentials {
    identifier: String,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Check identifier and password lengths, in that order.
    pub fn try_from_parts(identifier: &str, password: &str) -> Result<Self, CredentialFailure> {
        if !in_bounds(identifier, USERNAME_MIN, EMAIL_MAX) {
            return Err(CredentialFailure::IdentifierLength);
        }
        if !in_bounds(password, PASSWORD_MIN, PASSWORD_MAX) {
            return Err(CredentialFailure::PasswordLength);
        }

        Ok(Self {
            identifier: identifier.to_lowercase(),
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Lower-cased username or email used for the lookup.
    pub fn identifier(&self) -> &str {
        self.identifier.as_str()
    }

    /// Plaintext password to verify against the stored digest.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("ab")]
    #[case("seventeen-chars-x")]
    fn signup_rejects_username_length_first(#[case] username: &str) {
        // Password and email are also invalid; username must win.
        let err = SignupCredentials::try_from_parts(username, "x", "@")
            .expect_err("out-of-bounds username must fail");
        assert_eq!(err, CredentialFailure::UsernameLength);
    }

    #[rstest]
    #[case("short")]
    #[case(&"x".repeat(129))]
    fn signup_rejects_password_length_second(#[case] password: &str) {
        let err = SignupCredentials::try_from_parts("abc", password, "@")
            .expect_err("out-of-bounds password must fail");
        assert_eq!(err, CredentialFailure::PasswordLength);
    }

    #[rstest]
    #[case("a@b")]
    #[case(&format!("{}@b.com", "x".repeat(250)))]
    fn signup_rejects_email_length_third(#[case] email: &str) {
        let err = SignupCredentials::try_from_parts("abc", "password1", email)
            .expect_err("out-of-bounds email must fail");
        assert_eq!(err, CredentialFailure::EmailLength);
    }

    #[rstest]
    #[case("no-at-sign.com")]
    #[case("spaced out@example.com")]
    #[case("user@example")]
    #[case("user@.com")]
    fn signup_rejects_malformed_emails_last(#[case] email: &str) {
        let err = SignupCredentials::try_from_parts("abc", "password1", email)
            .expect_err("malformed email must fail");
        assert_eq!(err, CredentialFailure::EmailFormat);
    }

    #[rstest]
    #[case("a@b.com")]
    #[case("first.last+tag@mail.example.co.uk")]
    #[case("méilleur@exémple.org")]
    fn signup_accepts_well_formed_emails(#[case] email: &str) {
        let creds = SignupCredentials::try_from_parts("abc", "password1", email)
            .expect("valid signup payload");
        assert_eq!(creds.email(), email.to_lowercase());
    }

    #[rstest]
    fn signup_lower_cases_username_and_email() {
        let creds = SignupCredentials::try_from_parts("AbC", "password1", "A@B.Com")
            .expect("valid signup payload");
        assert_eq!(creds.username(), "abc");
        assert_eq!(creds.email(), "a@b.com");
    }

    #[rstest]
    fn signup_accepts_boundary_lengths() {
        let username = "x".repeat(16);
        let password = "p".repeat(128);
        let creds = SignupCredentials::try_from_parts(&username, &password, "a@b.com")
            .expect("boundary lengths are inclusive");
        assert_eq!(creds.username().chars().count(), 16);
    }

    #[rstest]
    fn login_widens_identifier_bound_to_email_length() {
        let email_length_identifier = format!("{}@example.com", "x".repeat(60));
        let creds = LoginCredentials::try_from_parts(&email_length_identifier, "password1")
            .expect("email-length identifier accepted for login");
        assert_eq!(creds.identifier(), email_length_identifier.to_lowercase());
    }

    #[rstest]
    #[case("ab", "password1", CredentialFailure::IdentifierLength)]
    #[case(&"x".repeat(255), "password1", CredentialFailure::IdentifierLength)]
    #[case("abc", "short", CredentialFailure::PasswordLength)]
    fn login_reports_first_violated_constraint(
        #[case] identifier: &str,
        #[case] password: &str,
        #[case] expected: CredentialFailure,
    ) {
        let err = LoginCredentials::try_from_parts(identifier, password)
            .expect_err("invalid login payload must fail");
        assert_eq!(err, expected);
    }

    #[rstest]
    fn failure_messages_match_the_wire_contract() {
        assert_eq!(
            CredentialFailure::AlreadyTaken.to_string(),
            "That username/email is already taken."
        );
        assert_eq!(
            CredentialFailure::WrongPassword.to_string(),
            "Invalid password entered."
        );
        assert_eq!(
            CredentialFailure::UnknownUser.to_string(),
            "That user was not found. Please enter valid user credentials."
        );
        assert_eq!(
            CredentialFailure::IdentifierLength.to_string(),
            "Invalid username/email length."
        );
    }
}
