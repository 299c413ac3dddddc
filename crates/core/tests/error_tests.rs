// ═══════════════════════════════════════════════════════════════════
// Error Tests — CoreError variants, Display formatting, From impls
// ═══════════════════════════════════════════════════════════════════

use energy_marketplace_core::errors::CoreError;

// ── Display formatting ──────────────────────────────────────────────

mod display {
    use super::*;

    #[test]
    fn invalid_filter() {
        let err = CoreError::InvalidFilter("price_min must be a finite number, got NaN".into());
        assert_eq!(
            err.to_string(),
            "Invalid filter: price_min must be a finite number, got NaN"
        );
    }

    #[test]
    fn invalid_pagination() {
        let err = CoreError::InvalidPagination("limit must be positive".into());
        assert_eq!(err.to_string(), "Invalid pagination: limit must be positive");
    }

    #[test]
    fn config() {
        let err = CoreError::Config("page_size must be positive".into());
        assert_eq!(err.to_string(), "Invalid configuration: page_size must be positive");
    }

    #[test]
    fn overflow() {
        let err = CoreError::Overflow("total_cost exceeds the decimal range".into());
        assert_eq!(err.to_string(), "Arithmetic overflow: total_cost exceeds the decimal range");
    }

    #[test]
    fn not_found() {
        let err = CoreError::NotFound("Contract not in portfolio".into());
        assert_eq!(err.to_string(), "Not found: Contract not in portfolio");
    }

    #[test]
    fn conflict() {
        let err = CoreError::Conflict("Contract already in portfolio".into());
        assert_eq!(err.to_string(), "Conflict: Contract already in portfolio");
    }

    #[test]
    fn remote() {
        let err = CoreError::Remote {
            status: 503,
            detail: "Service Unavailable".into(),
        };
        assert_eq!(err.to_string(), "Remote error (HTTP 503): Service Unavailable");
    }

    #[test]
    fn network() {
        let err = CoreError::Network("connection refused".into());
        assert_eq!(err.to_string(), "Network error: connection refused");
    }

    #[test]
    fn deserialization() {
        let err = CoreError::Deserialization("missing field `total`".into());
        assert_eq!(err.to_string(), "Deserialization error: missing field `total`");
    }
}

// ── Classification ──────────────────────────────────────────────────

mod classification {
    use super::*;

    #[test]
    fn local_errors_are_not_remote() {
        assert!(!CoreError::InvalidFilter(String::new()).is_remote_failure());
        assert!(!CoreError::InvalidPagination(String::new()).is_remote_failure());
        assert!(!CoreError::Config(String::new()).is_remote_failure());
        assert!(!CoreError::Overflow(String::new()).is_remote_failure());
    }

    #[test]
    fn remote_errors_are_remote() {
        assert!(CoreError::NotFound(String::new()).is_remote_failure());
        assert!(CoreError::Conflict(String::new()).is_remote_failure());
        assert!(CoreError::Network(String::new()).is_remote_failure());
        assert!(CoreError::Deserialization(String::new()).is_remote_failure());
        assert!(CoreError::Remote {
            status: 500,
            detail: String::new()
        }
        .is_remote_failure());
    }

    #[test]
    fn not_found_is_distinguishable() {
        assert!(CoreError::NotFound("x".into()).is_not_found());
        assert!(!CoreError::Conflict("x".into()).is_not_found());
        assert!(!CoreError::Remote {
            status: 404,
            detail: "x".into()
        }
        .is_not_found());
    }
}

// ── From conversions ────────────────────────────────────────────────

mod conversions {
    use super::*;

    #[test]
    fn from_serde_json_error() {
        let json_err = serde_json::from_str::<serde_json::Value>("{not json").unwrap_err();
        let err: CoreError = json_err.into();
        assert!(matches!(err, CoreError::Deserialization(_)));
    }

    #[test]
    fn question_mark_propagates_json_errors() {
        fn parse(raw: &str) -> Result<u64, CoreError> {
            Ok(serde_json::from_str(raw)?)
        }
        assert_eq!(parse("42").unwrap(), 42);
        assert!(matches!(parse("\"x\""), Err(CoreError::Deserialization(_))));
    }

    #[test]
    fn errors_are_send_and_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<CoreError>();
    }

    #[test]
    fn implements_std_error() {
        let err: Box<dyn std::error::Error> = Box::new(CoreError::Network("down".into()));
        assert_eq!(err.to_string(), "Network error: down");
    }
}
