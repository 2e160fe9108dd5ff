//! Error taxonomy for the floor SVG pipeline.
//!
//! Every variant is terminal for the request that raised it. Callers map them
//! to user-facing statuses (see `web`).

use reqwest::StatusCode;

/// Failure of a floor SVG request.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// No floor row carries the requested number.
    #[error("floor {number} not found")]
    FloorNotFound {
        /// Requested floor number.
        number: i32,
    },

    /// The floor exists but owns no locations.
    #[error("locations for floor {number} not found")]
    NoLocations {
        /// Requested floor number.
        number: i32,
    },

    /// The metrics service rejected the credentials or returned no API key.
    #[error("failed to authenticate against metrics service{}: {message}", status_suffix(*.status))]
    Authentication {
        /// Upstream status, absent when the request never got a response.
        status: Option<StatusCode>,
        /// Upstream body or transport error.
        message: String,
    },

    /// The quarter-sales query failed or returned a malformed body.
    #[error("failed to fetch quarter sales{}: {message}", status_suffix(*.status))]
    RemoteFetch {
        /// Upstream status, absent for transport or decoding failures.
        status: Option<StatusCode>,
        /// Upstream body or decoding error.
        message: String,
    },

    /// The stored floor image could not be decoded.
    #[error("failed to decode floor image: {0}")]
    ImageDecode(#[from] ImageDecodeError),

    /// A stored location code is not an integer.
    #[error("invalid location code {code:?}")]
    InvalidLocationCode {
        /// The offending code as stored.
        code: String,
    },

    /// The floor store could not be queried.
    #[error("floor store query failed: {0}")]
    Store(#[from] sqlx::Error),
}

/// Underlying cause of an image decode failure.
#[derive(Debug, thiserror::Error)]
pub enum ImageDecodeError {
    /// The payload is not valid base64.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// The bytes are not a recognizable raster image.
    #[error("unreadable image: {0}")]
    Image(#[from] image::ImageError),

    /// The container format could not be guessed from the payload.
    #[error("unreadable image header: {0}")]
    Io(#[from] std::io::Error),

    /// The header declares an empty image.
    #[error("image declares zero dimension ({width}x{height})")]
    ZeroDimension {
        /// Declared width.
        width: u32,
        /// Declared height.
        height: u32,
    },
}

fn status_suffix(status: Option<StatusCode>) -> String {
    status.map_or_else(String::new, |s| format!(" ({})", s.as_u16()))
}

/// Result alias for pipeline operations.
pub type Result<T> = std::result::Result<T, PipelineError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_carry_context() {
        let err = PipelineError::FloorNotFound { number: 99 };
        assert_eq!(err.to_string(), "floor 99 not found");

        let err = PipelineError::Authentication {
            status: Some(StatusCode::UNAUTHORIZED),
            message: "bad credentials".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "failed to authenticate against metrics service (401): bad credentials"
        );

        let err = PipelineError::RemoteFetch {
            status: None,
            message: "missing key q3".to_string(),
        };
        assert_eq!(err.to_string(), "failed to fetch quarter sales: missing key q3");
    }

    #[test]
    fn test_image_decode_wraps_cause() {
        let err: PipelineError = ImageDecodeError::ZeroDimension {
            width: 0,
            height: 10,
        }
        .into();
        assert!(matches!(err, PipelineError::ImageDecode(_)));
        assert!(err.to_string().contains("0x10"));
    }
}
