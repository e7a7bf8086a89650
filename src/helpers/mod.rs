//! Helper functions
//!
//! Small pure utilities shared by the normalizers, the HTTP client and
//! the CLI: URL/id handling, rich-text extraction and date display.

mod date;
mod text;
mod url;

pub use date::*;
pub use text::*;
pub use url::*;
