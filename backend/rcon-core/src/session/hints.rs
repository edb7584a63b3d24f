use models::ErrorKind;

/// Troubleshooting line shown after a failed connection test.
pub(crate) fn hint_for(kind: ErrorKind) -> Option<&'static str> {
    match kind {
        ErrorKind::ConnectionRefused => Some("Tip: Check if RCON is enabled in server.properties"),
        ErrorKind::Timeout => Some("Tip: Check server IP and port settings"),
        ErrorKind::AuthFailure => Some("Tip: Verify RCON password is correct"),
        ErrorKind::InvocationError => {
            Some("Tip: Check server configuration and network connectivity")
        }
        ErrorKind::ClientMissing | ErrorKind::Unclassified => None,
    }
}
