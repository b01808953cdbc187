// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Api(ApiError),
}

/// Classified failure from the shared HTTP client.
///
/// Every outbound request failure is folded into one of these classes so the
/// error interceptor can resolve a localized, user-facing message without
/// inspecting raw transport errors at each call site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// No response at all (connection refused, DNS failure, offline).
    Network(Option<String>),

    /// The request was aborted after its deadline elapsed (HTTP 408 or a
    /// client-side deadline).
    Timeout(Option<String>),

    /// HTTP 401: the caller must authenticate first.
    AuthRequired(Option<String>),

    /// HTTP 403. `resource` is the machine-readable key of the protected
    /// resource when the server supplied one.
    AccessDenied {
        resource: Option<String>,
        detail: Option<String>,
    },

    /// HTTP 404.
    NotFound(Option<String>),

    /// HTTP 5xx family.
    Server { status: u16, detail: Option<String> },

    /// Any other non-success HTTP status.
    Http { status: u16, detail: Option<String> },

    /// A non-network failure that reached the interceptor (programming
    /// error, malformed response handling, etc.).
    Unexpected(String),
}

/// Prefix the backend uses to tag 403 details with a resource key,
/// e.g. `no_access:media`.
const NO_ACCESS_PREFIX: &str = "no_access:";

impl ApiError {
    /// Classifies an HTTP status code, keeping any server-supplied detail.
    ///
    /// Status `0` is the transport convention for "no response received".
    pub fn from_status(status: u16, detail: Option<String>) -> Self {
        match status {
            0 => ApiError::Network(detail),
            401 => ApiError::AuthRequired(detail),
            403 => {
                let resource = detail
                    .as_deref()
                    .and_then(|d| d.strip_prefix(NO_ACCESS_PREFIX))
                    .map(|key| key.trim().to_string())
                    .filter(|key| !key.is_empty());
                ApiError::AccessDenied { resource, detail }
            }
            404 => ApiError::NotFound(detail),
            408 => ApiError::Timeout(detail),
            500..=599 => ApiError::Server { status, detail },
            _ => ApiError::Http { status, detail },
        }
    }

    /// Attempts to classify a raw transport error message.
    ///
    /// Used for failures that never produced an HTTP status.
    pub fn from_message(msg: &str) -> Self {
        let msg_lower = msg.to_lowercase();

        // A client-side deadline carries no server detail.
        if msg_lower.contains("timed out") || msg_lower.contains("timeout") {
            return ApiError::Timeout(None);
        }

        if msg_lower.contains("failed to fetch")
            || msg_lower.contains("connection refused")
            || msg_lower.contains("connection reset")
            || msg_lower.contains("dns")
            || msg_lower.contains("network")
        {
            return ApiError::Network(Some(msg.to_string()));
        }

        ApiError::Unexpected(msg.to_string())
    }

    /// Returns the i18n message key for this error class.
    pub fn i18n_key(&self) -> &'static str {
        match self {
            ApiError::Network(_) => "error-network-unreachable",
            ApiError::Timeout(_) => "error-request-timeout",
            ApiError::AuthRequired(_) => "error-auth-required",
            ApiError::AccessDenied { .. } => "error-access-denied",
            ApiError::NotFound(_) => "error-not-found",
            ApiError::Server { .. } => "error-server",
            ApiError::Http { .. } => "error-request-failed",
            ApiError::Unexpected(_) => "error-unexpected",
        }
    }

    /// Returns the HTTP status this error was classified from, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Network(_) => Some(0),
            ApiError::Timeout(_) => Some(408),
            ApiError::AuthRequired(_) => Some(401),
            ApiError::AccessDenied { .. } => Some(403),
            ApiError::NotFound(_) => Some(404),
            ApiError::Server { status, .. } | ApiError::Http { status, .. } => Some(*status),
            ApiError::Unexpected(_) => None,
        }
    }

    /// Returns the server-supplied detail message, if any.
    ///
    /// Access-denied details that only carry a resource tag are not
    /// considered human-readable detail.
    pub fn detail(&self) -> Option<&str> {
        let detail = match self {
            ApiError::Network(d)
            | ApiError::Timeout(d)
            | ApiError::AuthRequired(d)
            | ApiError::NotFound(d) => d.as_deref(),
            ApiError::AccessDenied { detail, resource } => {
                if resource.is_some() {
                    None
                } else {
                    detail.as_deref()
                }
            }
            ApiError::Server { detail, .. } | ApiError::Http { detail, .. } => detail.as_deref(),
            ApiError::Unexpected(_) => None,
        };
        detail.map(str::trim).filter(|d| !d.is_empty())
    }

    /// Returns the machine-readable resource key of a 403, if the server
    /// tagged one.
    pub fn resource(&self) -> Option<&str> {
        match self {
            ApiError::AccessDenied { resource, .. } => resource.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(Some(detail)) => write!(f, "Network unreachable: {}", detail),
            ApiError::Network(None) => write!(f, "Network unreachable"),
            ApiError::Timeout(_) => write!(f, "Request timed out"),
            ApiError::AuthRequired(_) => write!(f, "Authentication required"),
            ApiError::AccessDenied {
                resource: Some(resource),
                ..
            } => write!(f, "Access denied to {}", resource),
            ApiError::AccessDenied { .. } => write!(f, "Access denied"),
            ApiError::NotFound(_) => write!(f, "Resource not found"),
            ApiError::Server { status, .. } => write!(f, "Server error (HTTP {})", status),
            ApiError::Http { status, .. } => write!(f, "Request failed (HTTP {})", status),
            ApiError::Unexpected(msg) => write!(f, "Unexpected error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::Timeout(None);
        }
        if err.is_connect() {
            return ApiError::Network(Some(err.to_string()));
        }
        if let Some(status) = err.status() {
            return ApiError::from_status(status.as_u16(), None);
        }
        ApiError::from_message(&err.to_string())
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Api(e) => write!(f, "API Error: {}", e),
        }
    }
}

impl From<ApiError> for Error {
    fn from(err: ApiError) -> Self {
        Error::Api(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_status_maps_well_known_codes() {
        assert!(matches!(
            ApiError::from_status(0, None),
            ApiError::Network(None)
        ));
        assert!(matches!(
            ApiError::from_status(401, None),
            ApiError::AuthRequired(None)
        ));
        assert!(matches!(
            ApiError::from_status(404, None),
            ApiError::NotFound(None)
        ));
        assert!(matches!(
            ApiError::from_status(408, None),
            ApiError::Timeout(None)
        ));
    }

    #[test]
    fn timeout_keeps_server_supplied_detail() {
        let err = ApiError::from_status(408, Some("Upstream search query timed out".to_string()));
        assert!(matches!(err, ApiError::Timeout(Some(_))));
        assert_eq!(err.detail(), Some("Upstream search query timed out"));
        assert_eq!(err.status(), Some(408));
    }

    #[test]
    fn from_status_folds_5xx_into_server_family() {
        for status in [500, 502, 503, 599] {
            match ApiError::from_status(status, None) {
                ApiError::Server { status: s, .. } => assert_eq!(s, status),
                other => panic!("expected Server variant, got {:?}", other),
            }
        }
    }

    #[test]
    fn from_status_extracts_resource_key_from_403_detail() {
        let err = ApiError::from_status(403, Some("no_access:media".to_string()));
        assert_eq!(err.resource(), Some("media"));
        // A tagged detail is not human-readable detail.
        assert_eq!(err.detail(), None);
    }

    #[test]
    fn from_status_keeps_plain_403_detail() {
        let err = ApiError::from_status(403, Some("You shall not pass".to_string()));
        assert_eq!(err.resource(), None);
        assert_eq!(err.detail(), Some("You shall not pass"));
    }

    #[test]
    fn from_status_unlisted_code_is_generic_http() {
        match ApiError::from_status(418, Some("teapot".to_string())) {
            ApiError::Http { status, detail } => {
                assert_eq!(status, 418);
                assert_eq!(detail.as_deref(), Some("teapot"));
            }
            other => panic!("expected Http variant, got {:?}", other),
        }
    }

    #[test]
    fn from_message_classifies_transport_failures() {
        assert!(matches!(
            ApiError::from_message("Failed to fetch"),
            ApiError::Network(_)
        ));
        assert!(matches!(
            ApiError::from_message("operation timed out"),
            ApiError::Timeout(None)
        ));
        assert!(matches!(
            ApiError::from_message("index out of bounds"),
            ApiError::Unexpected(_)
        ));
    }

    #[test]
    fn detail_trims_and_drops_empty_strings() {
        let err = ApiError::from_status(500, Some("  ".to_string()));
        assert_eq!(err.detail(), None);

        let err = ApiError::from_status(500, Some(" disk full ".to_string()));
        assert_eq!(err.detail(), Some("disk full"));
    }

    #[test]
    fn i18n_keys_are_distinct_per_class() {
        let keys = [
            ApiError::Network(None).i18n_key(),
            ApiError::Timeout(None).i18n_key(),
            ApiError::AuthRequired(None).i18n_key(),
            ApiError::from_status(403, None).i18n_key(),
            ApiError::NotFound(None).i18n_key(),
            ApiError::from_status(500, None).i18n_key(),
            ApiError::from_status(418, None).i18n_key(),
            ApiError::Unexpected(String::new()).i18n_key(),
        ];
        for (i, a) in keys.iter().enumerate() {
            for b in keys.iter().skip(i + 1) {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn status_round_trips_for_protocol_errors() {
        assert_eq!(ApiError::from_status(503, None).status(), Some(503));
        assert_eq!(ApiError::from_status(401, None).status(), Some(401));
        assert_eq!(ApiError::Unexpected("boom".into()).status(), None);
    }

    #[test]
    fn display_formats_api_error() {
        let err = ApiError::from_status(403, Some("no_access:reports".to_string()));
        assert_eq!(format!("{}", err), "Access denied to reports");
    }

    #[test]
    fn crate_error_wraps_api_error() {
        let err: Error = ApiError::Timeout(None).into();
        assert_eq!(format!("{}", err), "API Error: Request timed out");
    }
}
