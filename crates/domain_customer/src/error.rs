//! Customer domain errors

use std::num::ParseIntError;

use core_kernel::PortError;
use thiserror::Error;

/// Errors returned through the customer info contract
#[derive(Debug, Error)]
pub enum CustomerError {
    /// A customer id argument is not a valid integer
    #[error("Invalid argument '{input}': {source}")]
    InvalidArgument {
        input: String,
        #[source]
        source: ParseIntError,
    },

    /// The identity store or its client failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl CustomerError {
    /// Creates an InvalidArgument error for an unparsable customer id
    pub fn invalid_argument(input: impl Into<String>, source: ParseIntError) -> Self {
        CustomerError::InvalidArgument {
            input: input.into(),
            source,
        }
    }

    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, CustomerError::InvalidArgument { .. })
    }

    /// Returns the underlying port error, if any
    pub fn as_port_error(&self) -> Option<&PortError> {
        match self {
            CustomerError::Port(error) => Some(error),
            CustomerError::InvalidArgument { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_invalid_argument_wraps_parse_error() {
        let source = "abc".parse::<i32>().unwrap_err();
        let error = CustomerError::invalid_argument("abc", source);

        assert!(error.is_invalid_argument());
        assert!(error.to_string().contains("abc"));
        assert!(error.source().is_some());
        assert!(error.as_port_error().is_none());
    }

    #[test]
    fn test_port_error_is_transparent() {
        let error: CustomerError = PortError::validation("bad email").into();
        assert_eq!(error.to_string(), "Validation error: bad email");
        assert!(matches!(error.as_port_error(), Some(PortError::Validation { .. })));
    }
}
