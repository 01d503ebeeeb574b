//! HTML5 Parser implementation
//!
//! Uses html5ever's RcDom and converts it into the domkit arena.

use domkit_dom::{Document, Node, NodeId};
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData as RcNodeData, RcDom};

use crate::ParseError;

/// HTML5 parser
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlParser;

impl HtmlParser {
    pub fn new() -> Self {
        Self
    }

    /// Parse HTML string into a Document
    pub fn parse(&self, html: &str) -> Result<Document, ParseError> {
        self.parse_with_url(html, "about:blank")
    }

    /// Parse HTML with a document URL
    pub fn parse_with_url(&self, html: &str, url: &str) -> Result<Document, ParseError> {
        tracing::debug!("Parsing HTML document: {}", url);

        let dom = parse_document(RcDom::default(), Default::default()).one(html);

        let mut document = Document::empty(url);
        self.convert_node(&dom.document, &mut document, NodeId::ROOT)?;
        document.finalize();

        tracing::debug!("Parsed {} nodes", document.tree().len());
        Ok(document)
    }

    fn convert_node(&self, handle: &Handle, doc: &mut Document, parent: NodeId) -> Result<(), ParseError> {
        match &handle.data {
            RcNodeData::Document => {
                for child in handle.children.borrow().iter() {
                    self.convert_node(child, doc, parent)?;
                }
            }
            RcNodeData::Doctype { name, .. } => {
                let id = doc.tree_mut().push(Node::doctype(name.to_string()));
                doc.append_child(parent, id)?;
            }
            RcNodeData::Text { contents } => {
                let text = contents.borrow().to_string();
                if !text.trim().is_empty() {
                    let id = doc.create_text(&text);
                    doc.append_child(parent, id)?;
                }
            }
            RcNodeData::Comment { contents } => {
                let id = doc.tree_mut().create_comment(&contents.to_string());
                doc.append_child(parent, id)?;
            }
            RcNodeData::Element { name, attrs, .. } => {
                let id = doc.create_element(&name.local);
                if let Some(elem) = doc.element_mut(id) {
                    for attr in attrs.borrow().iter() {
                        elem.attrs.set(&attr.name.local, attr.value.to_string());
                    }
                    if elem.tag == "input" {
                        elem.value = elem.get_attr("value").unwrap_or_default().to_string();
                    }
                }
                doc.append_child(parent, id)?;

                for child in handle.children.borrow().iter() {
                    self.convert_node(child, doc, id)?;
                }

                if doc.tag_name(id) == Some("textarea") {
                    let text = doc.text_content(id);
                    doc.set_value(id, &text)?;
                }
            }
            RcNodeData::ProcessingInstruction { .. } => {}
        }
        Ok(())
    }
}
