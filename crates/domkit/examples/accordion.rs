//! Builds a small FAQ accordion and clicks through it.
//!
//! Run with `RUST_LOG=debug` to see activation and transitions.

use anyhow::Context;
use domkit::widgets::collapsible::state_of;
use domkit::{Config, Page};

const HTML: &str = r#"
<main id="faq">
    <section id="shipping" data-collapsible="collapsed" data-accordion="faq">
        <h2 class="collapsible-header">How long does shipping take?</h2>
        <div class="collapsible-content">Three to five working days.</div>
    </section>
    <section id="returns" data-collapsible="open" data-accordion="faq">
        <h2 class="collapsible-header">Can I return an item?</h2>
        <div class="collapsible-content">Within thirty days.</div>
    </section>
</main>
"#;

fn main() -> anyhow::Result<()> {
    domkit::logging::init("info,domkit_widgets=debug");

    let config = Config::from_toml_str("[collapsible]\naccordion = true").context("parsing config")?;
    let mut page = Page::from_html(HTML, config)?;
    page.on_toggle(|doc, state, container| {
        let id = doc.get_attribute(container, "id").unwrap_or("?");
        tracing::info!("{} is now {}", id, state);
    });

    let report = page.ready();
    tracing::info!("Activated {:?}", report.collapsibles);

    page.click("#shipping .collapsible-header")?;
    page.click("#shipping .collapsible-header")?;

    let doc = page.document();
    for id in ["shipping", "returns"] {
        let node = doc.get_element_by_id(id).context("missing section")?;
        println!("{id}: {:?}", state_of(doc, node));
    }
    Ok(())
}
