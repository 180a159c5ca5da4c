//! Helper functions for rendering
//!
//! Localized date formatting and URL generation shared by the
//! templates, the server and the terminal listing.

mod date;
mod url;

pub use self::date::*;
pub use self::url::*;
