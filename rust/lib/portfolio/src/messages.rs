//! User-facing message strings.

pub const SESSION_EXPIRED: &str = "Session expired. Please log in again.";
pub const INVALID_LOGIN: &str = "Invalid username or password";
pub const LOGIN_UNREACHABLE: &str = "Login failed: server unreachable";
pub const LOAD_FAILED: &str = "Failed to load portfolio data";
pub const SAVE_FAILED: &str = "Failed to save";
pub const UPLOAD_FAILED: &str = "Upload failed";
pub const NOT_AN_IMAGE: &str = "Please select an image file (e.g. JPG, PNG).";
