//! URL resolution and filename derivation.
//!
//! Both work on plain strings: links scraped from a page are often not valid
//! URLs on their own, and the resolution rules are deliberately simple.

mod path;
mod resolve;
mod sanitize;

pub use path::{extract_filename, DEFAULT_FILENAME};
pub use resolve::resolve_url;
pub use sanitize::safe_filename;
