//! Authentication and registration input primitives.
//!
//! Keep inbound payload parsing outside the domain by exposing constructors
//! that validate string inputs before a handler talks to a service.

use std::fmt;

use zeroize::Zeroizing;

use super::user::{EmailAddress, Role, UserValidationError, Username};

/// Domain error returned when login payload values are invalid.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoginValidationError {
    /// Email was missing, blank, or malformed.
    InvalidEmail,
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for LoginValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidEmail => write!(f, "email must be a valid address"),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for LoginValidationError {}

/// Validated login credentials used by the account service.
///
/// ## Invariants
/// - `email` is trimmed, lowercased, and structurally valid.
/// - `password` is non-empty but otherwise kept as supplied to avoid
///   surprising credential comparisons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Zeroizing<String>,
}

impl LoginCredentials {
    /// Construct credentials from raw email/password inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, LoginValidationError> {
        let email = EmailAddress::new(email).map_err(|_| LoginValidationError::InvalidEmail)?;
        if password.is_empty() {
            return Err(LoginValidationError::EmptyPassword);
        }
        Ok(Self {
            email,
            password: Zeroizing::new(password.to_owned()),
        })
    }

    /// Email address used for the user lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Password string provided by the caller.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }
}

/// Validation errors raised while assembling a registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistrationValidationError {
    /// Username or email failed validation.
    User(UserValidationError),
    /// Password was blank.
    EmptyPassword,
}

impl fmt::Display for RegistrationValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::User(inner) => inner.fmt(f),
            Self::EmptyPassword => write!(f, "password must not be empty"),
        }
    }
}

impl std::error::Error for RegistrationValidationError {}

impl From<UserValidationError> for RegistrationValidationError {
    fn from(value: UserValidationError) -> Self {
        Self::User(value)
    }
}

/// Validated registration request.
///
/// The role defaults to [`Role::Candidate`] when the caller supplies none;
/// unrecognised role strings are rejected here rather than being defaulted
/// silently at dashboard-routing time.
#[derive(Debug, Clone)]
pub struct Registration {
    username: Username,
    email: EmailAddress,
    password: Zeroizing<String>,
    role: Role,
}

impl Registration {
    /// Construct a registration from raw form inputs.
    pub fn try_from_parts(
        username: &str,
        email: &str,
        password: &str,
        role: Option<&str>,
    ) -> Result<Self, RegistrationValidationError> {
        let username = Username::new(username)?;
        let email = EmailAddress::new(email)?;
        if password.is_empty() {
            return Err(RegistrationValidationError::EmptyPassword);
        }
        let role = match role {
            None => Role::Candidate,
            Some(raw) => raw.parse::<Role>()?,
        };
        Ok(Self {
            username,
            email,
            password: Zeroizing::new(password.to_owned()),
            role,
        })
    }

    /// Username chosen by the registrant.
    pub fn username(&self) -> &Username {
        &self.username
    }

    /// Email address to register.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plaintext password awaiting hashing.
    pub fn password(&self) -> &str {
        self.password.as_str()
    }

    /// Requested role.
    pub fn role(&self) -> Role {
        self.role
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("", "pw", LoginValidationError::InvalidEmail)]
    #[case("not-an-email", "pw", LoginValidationError::InvalidEmail)]
    #[case("user@example.com", "", LoginValidationError::EmptyPassword)]
    fn invalid_credentials(
        #[case] email: &str,
        #[case] password: &str,
        #[case] expected: LoginValidationError,
    ) {
        let err = LoginCredentials::try_from_parts(email, password)
            .expect_err("invalid inputs must fail");
        assert_eq!(err, expected);
    }

    #[test]
    fn credentials_normalise_email() {
        let creds = LoginCredentials::try_from_parts("  R1@X.com ", "secret")
            .expect("valid inputs should succeed");
        assert_eq!(creds.email().as_str(), "r1@x.com");
        assert_eq!(creds.password(), "secret");
    }

    #[rstest]
    #[case(None, Role::Candidate)]
    #[case(Some("candidate"), Role::Candidate)]
    #[case(Some("recruiter"), Role::Recruiter)]
    fn registration_role_defaults_to_candidate(
        #[case] role: Option<&str>,
        #[case] expected: Role,
    ) {
        let registration = Registration::try_from_parts("alice", "alice@example.com", "pw", role)
            .expect("valid registration");
        assert_eq!(registration.role(), expected);
    }

    #[test]
    fn registration_rejects_unknown_role() {
        let err = Registration::try_from_parts("alice", "alice@example.com", "pw", Some("admin"))
            .expect_err("unknown role must fail");
        assert!(matches!(
            err,
            RegistrationValidationError::User(UserValidationError::UnknownRole { .. })
        ));
    }

    #[test]
    fn registration_rejects_blank_password() {
        let err = Registration::try_from_parts("alice", "alice@example.com", "", None)
            .expect_err("blank password must fail");
        assert_eq!(err, RegistrationValidationError::EmptyPassword);
    }
}
