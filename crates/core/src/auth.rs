use serde::{Deserialize, Serialize};

/// Caller identity forwarded by the upstream authentication proxy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    employee_code: String,
    display_name: String,
    email: Option<String>,
}

impl UserIdentity {
    /// Creates a user identity from an employee code and profile data.
    #[must_use]
    pub fn new(
        employee_code: impl Into<String>,
        display_name: impl Into<String>,
        email: Option<String>,
    ) -> Self {
        Self {
            employee_code: employee_code.into(),
            display_name: display_name.into(),
            email,
        }
    }

    /// Returns the employee code the caller authenticated as.
    #[must_use]
    pub fn employee_code(&self) -> &str {
        self.employee_code.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the email, if the provider returned one.
    #[must_use]
    pub fn email(&self) -> Option<&str> {
        self.email.as_deref()
    }
}
