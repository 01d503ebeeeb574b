//! domkit utilities
//!
//! Dynamic values and their classifier, a thin query/mutation facade over
//! `domkit_dom::Document`, and string/array/date/URI helpers.

pub mod arrays;
pub mod classify;
pub mod dates;
pub mod dom;
pub mod strings;
pub mod uri;
mod value;

pub use classify::ValueKind;
pub use dates::DateError;
pub use uri::UriError;
pub use value::{Function, Value};
