// SPDX-FileCopyrightText: 2026 Opvault Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Classification of client errors.
//!
//! Only Read acts on the result (not-found drops the state row). The other
//! handlers use it to choose a log level and surface the message verbatim.

use opvault_core::OpError;
use strum::Display;

/// Substring 1Password Connect puts in every vault-mutation refusal.
pub const CONNECT_UNSUPPORTED_MARKER: &str = "not supported with 1Password Connect";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum ErrorClass {
    /// The remote object is gone.
    NotFound,
    /// The backend cannot perform this operation at all.
    Unsupported,
    /// The orchestrator cancelled the call.
    Cancelled,
    Other,
}

pub fn classify(err: &OpError) -> ErrorClass {
    if is_not_found(err) {
        ErrorClass::NotFound
    } else if is_unsupported(err) {
        ErrorClass::Unsupported
    } else if matches!(err, OpError::Cancelled) {
        ErrorClass::Cancelled
    } else {
        ErrorClass::Other
    }
}

pub fn is_not_found(err: &OpError) -> bool {
    matches!(
        err,
        OpError::NotFound { .. } | OpError::Api { status: 404, .. }
    )
}

pub fn is_unsupported(err: &OpError) -> bool {
    matches!(err, OpError::Unsupported { .. })
        || err.to_string().contains(CONNECT_UNSUPPORTED_MARKER)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_variants() {
        assert!(is_not_found(&OpError::vault_not_found("CCC")));
        assert!(is_not_found(&OpError::Api {
            status: 404,
            message: "vault not found".into(),
        }));
        assert!(!is_not_found(&OpError::Api {
            status: 403,
            message: "forbidden".into(),
        }));
    }

    #[test]
    fn unsupported_matches_variant_and_marker_text() {
        assert!(is_unsupported(&OpError::unsupported("creating vaults")));
        assert!(is_unsupported(&OpError::Api {
            status: 400,
            message: "vault creation is not supported with 1Password Connect".into(),
        }));
        assert!(!is_unsupported(&OpError::Internal("boom".into())));
    }

    #[test]
    fn classify_orders_checks() {
        assert_eq!(classify(&OpError::vault_not_found("x")), ErrorClass::NotFound);
        assert_eq!(
            classify(&OpError::unsupported("deleting vaults")),
            ErrorClass::Unsupported
        );
        assert_eq!(classify(&OpError::Cancelled), ErrorClass::Cancelled);
        assert_eq!(
            classify(&OpError::Transport {
                message: "connection refused".into(),
                source: None,
            }),
            ErrorClass::Other
        );
    }

    #[test]
    fn class_display_is_snake_case() {
        assert_eq!(ErrorClass::NotFound.to_string(), "not_found");
    }
}
