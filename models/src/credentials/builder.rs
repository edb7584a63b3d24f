use crate::error::model_error::ModelError;
use crate::{Credentials, ErrorLocation};

use common::RedactedSecret;

use std::panic::Location;

/// Builder for validated [`Credentials`].
///
/// Input is trimmed before validation, matching what an operator types into
/// the configuration form.
#[derive(Debug, Default)]
pub struct CredentialsBuilder {
    host: Option<String>,
    port: Option<String>,
    secret: Option<RedactedSecret>,
}

impl CredentialsBuilder {
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into().trim().to_string());
        self
    }

    pub fn with_port(mut self, port: impl Into<String>) -> Self {
        self.port = Some(port.into().trim().to_string());
        self
    }

    pub fn with_secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(RedactedSecret::new(secret.into().trim()));
        self
    }

    #[track_caller]
    pub fn build(self) -> Result<Credentials, ModelError> {
        let host = required(self.host, "server_ip", "Server IP")?;
        let port = required(self.port, "port", "Port")?;

        let secret = self.secret.ok_or_else(|| ModelError::Validation {
            field: "password",
            message: String::from("Password is required"),
            location: ErrorLocation::from(Location::caller()),
        })?;

        if secret.is_empty() {
            return Err(ModelError::Validation {
                field: "password",
                message: String::from("Password cannot be empty"),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Credentials { host, port, secret })
    }
}

#[track_caller]
fn required(
    value: Option<String>,
    field: &'static str,
    label: &str,
) -> Result<String, ModelError> {
    let value = value.ok_or_else(|| ModelError::Validation {
        field,
        message: format!("{label} is required"),
        location: ErrorLocation::from(Location::caller()),
    })?;

    if value.is_empty() {
        return Err(ModelError::Validation {
            field,
            message: format!("{label} cannot be empty"),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    Ok(value)
}
