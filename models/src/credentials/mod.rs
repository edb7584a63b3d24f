pub mod builder;

use common::RedactedSecret;

/// Server credentials used for every protocol invocation.
///
/// Replaced as a whole: the config store never patches a single field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credentials {
    pub host: String,
    pub port: String,
    pub secret: RedactedSecret,
}

impl Credentials {
    /// True when host, port and secret are all non-empty.
    pub fn is_complete(&self) -> bool {
        !self.host.is_empty() && !self.port.is_empty() && !self.secret.is_empty()
    }

    /// `host:port`, as shown in the panel header.
    pub fn endpoint(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
