//! Common constants used throughout the starter application.

use std::time::Duration;

/// Supported template configuration file names, in lookup order.
pub const CONFIG_FILES: [&str; 3] = ["starter.json", "starter.yml", "starter.yaml"];

/// Placeholder tokens substituted when the template has no configuration file.
pub const DEFAULT_PLACEHOLDERS: [&str; 3] = ["response-std", "response_std", "go-starter-template"];

/// Name of the template directory probed in local mode and inside archives.
pub const TEMPLATE_DIR: &str = "template";

/// File name of the downloaded archive, created in the working directory.
pub const ARCHIVE_FILE: &str = "template.zip";

/// Archive fetched in remote mode when no URL is given.
pub const DEFAULT_TEMPLATE_URL: &str =
    "https://github.com/go-starter/go-starter/archive/refs/heads/main.zip";

/// Client-level timeout for the archive download.
pub const DOWNLOAD_TIMEOUT: Duration = Duration::from_secs(30);

/// Permission bits used for files whose source mode is unknown.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

/// Prefix of the scratch directory used for archive extraction.
pub const SCRATCH_PREFIX: &str = "starter-";
