//! domkit
//!
//! DOM query helpers and progressive-enhancement widgets over an in-memory
//! HTML document.
//!
//! # Example
//! ```rust,ignore
//! use domkit::{Config, Page};
//!
//! let mut page = Page::from_html(html, Config::default())?;
//! let report = page.ready();
//! page.click(".collapsible-header")?;
//! ```

mod config;
mod error;
pub mod logging;
mod page;

pub use config::{CollapsibleSection, Config, CounterSection, FloatingLabelSection};
pub use error::{ConfigError, PageError};
pub use page::{Page, ReadyReport};

// Re-export sub-crates for advanced usage
pub use domkit_dom as dom;
pub use domkit_html as html;
pub use domkit_util as util;
pub use domkit_widgets as widgets;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
