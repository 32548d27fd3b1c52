//! Unicode-aware text helpers for terminal rendering, and validation of
//! cover locations before they reach the system opener.
//!
//! ```
//! use albumshelf::util::{display_width, truncate_to_width};
//!
//! let title = truncate_to_width("Asterix and the Big Fight", 12);
//! assert!(display_width(&title) <= 12);
//! ```

mod text;
mod url_validator;

pub use text::{display_width, pad_to_width, single_line, strip_control_chars, truncate_to_width};
pub use url_validator::{looks_like_url, validate_url_for_open, UrlValidationError};
