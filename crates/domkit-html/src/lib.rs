//! domkit HTML Parser
//!
//! HTML5 parsing built on html5ever. Markup is parsed into an `RcDom` and
//! then copied into a `domkit_dom::Document` arena.

mod parser;

pub use domkit_dom::Document;
pub use parser::HtmlParser;

/// Parse an HTML string into a `Document`
pub fn parse(html: &str) -> Result<Document, ParseError> {
    HtmlParser::new().parse(html)
}

/// Parse error
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("Failed to build document tree: {0}")]
    Tree(#[from] domkit_dom::DomError),
}
