// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Errors surfaced by the toast queue.
///
/// Only creation can fail. Dismissal of unknown or already-removed toasts is
/// a defined no-op rather than an error, since racing dismiss sources
/// (timer, click, keyboard, eviction) are expected.
#[derive(Debug, Clone)]
pub enum Error {
    /// The toast message was empty.
    InvalidMessage,
    /// The presentation port failed to mount a surface (e.g. its mount
    /// target is missing). The queue's bookkeeping is untouched when this
    /// is returned.
    Mount(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidMessage => write!(f, "toast message must not be empty"),
            Error::Mount(e) => write!(f, "Mount Error: {}", e),
        }
    }
}

impl From<String> for Error {
    fn from(message: String) -> Self {
        Error::Mount(message)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_formats_invalid_message() {
        let err = Error::InvalidMessage;
        assert_eq!(format!("{}", err), "toast message must not be empty");
    }

    #[test]
    fn display_formats_mount_error() {
        let err = Error::Mount("container missing".to_string());
        assert_eq!(format!("{}", err), "Mount Error: container missing");
    }

    #[test]
    fn mount_error_from_string() {
        let err: Error = "no anchor element".to_string().into();
        match err {
            Error::Mount(message) => assert!(message.contains("anchor")),
            Error::InvalidMessage => panic!("expected Mount variant"),
        }
    }
}
