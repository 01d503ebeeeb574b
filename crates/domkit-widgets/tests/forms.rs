//! Counter and floating label on parsed forms

use domkit_html::parse;
use domkit_widgets::{CounterConfig, FloatingLabelConfig, counter, floating_label};

const FORM: &str = r##"
    <form>
        <div class="field" data-float-label>
            <label for="bio">Bio</label>
            <textarea id="bio" maxlength="10" data-counter="#bio-count">hi</textarea>
            <small id="bio-count"></small>
        </div>
        <div class="field" data-float-label>
            <label for="name">Name</label>
            <input id="name" data-counter="#name-count">
            <small id="name-count"></small>
        </div>
    </form>
"##;

#[test]
fn test_counters_render_initial_values() {
    let mut doc = parse(FORM).unwrap();
    let bound = counter::activate(&mut doc, None, &CounterConfig::default());
    assert_eq!(bound.len(), 2);

    let bio_count = doc.get_element_by_id("bio-count").unwrap();
    let name_count = doc.get_element_by_id("name-count").unwrap();
    assert_eq!(doc.text_content(bio_count), "2/10");
    assert_eq!(doc.text_content(name_count), "0");
}

#[test]
fn test_counter_over_limit() {
    let mut doc = parse(FORM).unwrap();
    counter::activate(&mut doc, None, &CounterConfig::default());
    let bio = doc.get_element_by_id("bio").unwrap();
    doc.input(bio, "hello world").unwrap();
    assert!(doc.has_class(bio, "over-limit"));
    assert_eq!(doc.text_content(doc.get_element_by_id("bio-count").unwrap()), "11/10");
}

#[test]
fn test_floating_labels() {
    let mut doc = parse(FORM).unwrap();
    let bound = floating_label::activate(&mut doc, None, &FloatingLabelConfig::default());
    assert_eq!(bound.len(), 2);
    let (bio_box, name_box) = (bound[0], bound[1]);
    assert!(doc.has_class(bio_box, "is-filled"));
    assert!(!doc.has_class(name_box, "is-filled"));

    let name = doc.get_element_by_id("name").unwrap();
    doc.focus(name);
    assert!(doc.has_class(name_box, "is-focused"));
    doc.input(name, "Ada").unwrap();

    let bio = doc.get_element_by_id("bio").unwrap();
    doc.focus(bio);
    assert!(!doc.has_class(name_box, "is-focused"));
    assert!(doc.has_class(name_box, "is-filled"));
    assert!(doc.has_class(bio_box, "is-focused"));
}

#[test]
fn test_prune_detached_fields() {
    let mut doc = parse(FORM).unwrap();
    counter::activate(&mut doc, None, &CounterConfig::default());
    floating_label::activate(&mut doc, None, &FloatingLabelConfig::default());
    let name = doc.get_element_by_id("name").unwrap();
    doc.remove(name).unwrap();

    assert_eq!(counter::prune_detached(&mut doc), 1);
    assert_eq!(floating_label::prune_detached(&mut doc), 1);
    assert_eq!(counter::prune_detached(&mut doc), 0);
    assert_eq!(doc.listener_count(name, &domkit_dom::EventType::Input), 0);
}
