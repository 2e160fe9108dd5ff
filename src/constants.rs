//! Application-wide constants.
//!
//! This module defines the application name, the remote metrics endpoints,
//! and the fixed reporting window used to bucket sales.

/// The display name of the application.
pub const APP_NAME: &str = "metabase-ws";

/// Directory name used under the platform config dir.
pub const CONFIG_DIR_NAME: &str = "metabase-ws";

/// Sign-in endpoint of the remote metrics service, relative to its host.
pub const SIGNIN_PATH: &str = "api/v1/auth/signin/";

/// Quarter-sales metrics endpoint, relative to the remote host.
pub const Q_SALES_PATH: &str = "api/v1/metrics/q-sales/";

/// First day of the sales reporting window (inclusive).
pub const SALES_START_DATE: &str = "2023-01-01";

/// Last day of the sales reporting window.
pub const SALES_END_DATE: &str = "2025-05-01";

/// MIME type assumed for floor images stored without one.
pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// Content type of composed floor documents.
pub const SVG_CONTENT_TYPE: &str = "image/svg+xml";
