//! Collapsible behaviour on parsed markup

use std::cell::RefCell;
use std::rc::Rc;

use domkit_dom::{Document, EventType, NodeId};
use domkit_html::parse;
use domkit_util::Value;
use domkit_widgets::collapsible::{self, activate, activate_within, state_of};
use domkit_widgets::{CollapsibleConfig, CollapsibleOptions, ToggleState};

fn section(id: &str, state: &str, group: Option<&str>) -> String {
    let group = group.map(|g| format!(r#" data-accordion="{g}""#)).unwrap_or_default();
    format!(
        r#"<div id="{id}" data-collapsible="{state}"{group}>
             <h3 class="collapsible-header"><span class="icon"></span>{id}</h3>
             <div class="collapsible-content"><p>body of {id}</p></div>
           </div>"#
    )
}

fn by_id(doc: &Document, id: &str) -> NodeId {
    doc.get_element_by_id(id).unwrap()
}

fn part(doc: &Document, container: NodeId, selector: &str) -> NodeId {
    doc.query_selector(selector, Some(container)).unwrap().unwrap()
}

fn states(doc: &Document, ids: &[&str]) -> Vec<Option<ToggleState>> {
    ids.iter().map(|id| state_of(doc, by_id(doc, id))).collect()
}

#[test]
fn test_collapsed_content_hidden_before_any_click() {
    let mut doc = parse(&section("a", "collapsed", None)).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    let a = by_id(&doc, "a");
    assert!(doc.is_hidden(part(&doc, a, ".collapsible-content")));
    assert_eq!(doc.get_attribute(a, "data-collapsible"), Some("collapsed"));
}

#[test]
fn test_open_or_unrecognised_content_visible() {
    let html = format!("{}{}", section("a", "open", None), section("b", "sideways", None));
    let mut doc = parse(&html).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    for id in ["a", "b"] {
        let c = by_id(&doc, id);
        assert!(!doc.is_hidden(part(&doc, c, ".collapsible-content")), "{id}");
        assert_eq!(state_of(&doc, c), Some(ToggleState::Open));
        assert!(doc.has_class(c, "expanded"));
    }
    assert_eq!(doc.get_attribute(by_id(&doc, "b"), "data-collapsible"), Some("open"));
}

fn styled_section(state: &str, display: &str) -> String {
    format!(
        r#"<div id="s" data-collapsible="{state}">
             <h3 class="collapsible-header">s</h3>
             <div class="collapsible-content" style="display: {display}"><p>body</p></div>
           </div>"#
    )
}

#[test]
fn test_open_content_shown_despite_uppercase_display_none() {
    let mut doc = parse(&styled_section("open", "NONE")).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    let s = by_id(&doc, "s");
    assert_eq!(state_of(&doc, s), Some(ToggleState::Open));
    assert!(!doc.is_hidden(part(&doc, s, ".collapsible-content")));
}

#[test]
fn test_click_open_shows_mixed_case_display_none() {
    let mut doc = parse(&styled_section("collapsed", "None")).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    let s = by_id(&doc, "s");
    let content = part(&doc, s, ".collapsible-content");
    assert!(doc.is_hidden(content));

    doc.click(content);
    assert_eq!(state_of(&doc, s), Some(ToggleState::Open));
    assert!(!doc.is_hidden(content));

    doc.click(part(&doc, s, "h3"));
    assert!(doc.is_hidden(content));
    doc.click(content);
    assert!(!doc.is_hidden(content));
}

#[test]
fn test_any_click_inside_collapsed_opens() {
    for target in [".icon", "h3", "p", ".collapsible-content"] {
        let mut doc = parse(&section("a", "collapsed", None)).unwrap();
        activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
        let a = by_id(&doc, "a");
        doc.click(part(&doc, a, target));
        assert_eq!(state_of(&doc, a), Some(ToggleState::Open), "clicked {target}");
        assert!(!doc.is_hidden(part(&doc, a, ".collapsible-content")));
        assert!(doc.has_class(a, "expanded"));
    }
}

#[test]
fn test_header_collapses_and_body_click_is_noop() {
    let mut doc = parse(&section("a", "open", None)).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    let a = by_id(&doc, "a");
    let content = part(&doc, a, ".collapsible-content");

    doc.click(part(&doc, a, "p"));
    doc.click(a);
    assert_eq!(state_of(&doc, a), Some(ToggleState::Open));
    assert!(!doc.is_hidden(content));

    doc.click(part(&doc, a, ".icon"));
    assert_eq!(state_of(&doc, a), Some(ToggleState::Collapsed));
    assert!(doc.is_hidden(content));
    assert!(!doc.has_class(a, "expanded"));
    assert_eq!(doc.get_attribute(a, "data-collapsible"), Some("collapsed"));
}

#[test]
fn test_accordion_scenario() {
    let html = [
        section("a", "collapsed", Some("faq")),
        section("b", "open", Some("faq")),
        section("c", "collapsed", Some("faq")),
    ]
    .concat();
    let mut doc = parse(&html).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new().accordion(true)).unwrap();
    let a = by_id(&doc, "a");

    doc.click(part(&doc, a, "p"));
    assert_eq!(
        states(&doc, &["a", "b", "c"]),
        [Some(ToggleState::Open), Some(ToggleState::Collapsed), Some(ToggleState::Collapsed)]
    );
    assert!(doc.is_hidden(part(&doc, by_id(&doc, "b"), ".collapsible-content")));

    doc.click(part(&doc, a, "h3"));
    assert_eq!(states(&doc, &["a", "b", "c"]), [Some(ToggleState::Collapsed); 3]);
}

#[test]
fn test_accordion_leaves_exactly_one_open() {
    let html: String = (0..5)
        .map(|i| section(&format!("s{i}"), if i % 2 == 0 { "open" } else { "collapsed" }, Some("g")))
        .collect();
    let ids: Vec<String> = (0..5).map(|i| format!("s{i}")).collect();
    let ids: Vec<&str> = ids.iter().map(String::as_str).collect();

    let mut doc = parse(&html).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new().accordion(true)).unwrap();

    for opened in [1, 3] {
        let c = by_id(&doc, ids[opened]);
        doc.click(part(&doc, c, "p"));
        let now = states(&doc, &ids);
        for (i, state) in now.iter().enumerate() {
            let expected = if i == opened { ToggleState::Open } else { ToggleState::Collapsed };
            assert_eq!(*state, Some(expected), "after opening {opened}, member {i}");
        }
    }
}

#[test]
fn test_accordion_groups_are_independent() {
    let html = [
        section("a1", "collapsed", Some("left")),
        section("a2", "open", Some("left")),
        section("b1", "open", Some("right")),
    ]
    .concat();
    let mut doc = parse(&html).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new().accordion(true)).unwrap();

    doc.click(by_id(&doc, "a1"));
    assert_eq!(
        states(&doc, &["a1", "a2", "b1"]),
        [Some(ToggleState::Open), Some(ToggleState::Collapsed), Some(ToggleState::Open)]
    );
}

#[test]
fn test_accordion_sees_members_added_later() {
    let mut doc = parse(&[section("a", "collapsed", Some("g")), section("b", "open", Some("g"))].concat()).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new().accordion(true)).unwrap();

    // Attached after activation and never activated itself
    let late = doc.create_element("div");
    doc.set_attribute(late, "data-collapsible", "open").unwrap();
    doc.set_attribute(late, "data-accordion", "g").unwrap();
    let late_content = doc.create_element("div");
    doc.set_attribute(late_content, "class", "collapsible-content").unwrap();
    let body = doc.body().unwrap();
    doc.append_child(body, late).unwrap();
    doc.append_child(late, late_content).unwrap();

    // Removed member no longer takes part
    let b = by_id(&doc, "b");
    doc.remove(b).unwrap();

    doc.click(by_id(&doc, "a"));
    assert_eq!(doc.get_attribute(late, "data-collapsible"), Some("collapsed"));
    assert!(doc.is_hidden(late_content));
    assert_eq!(state_of(&doc, b), Some(ToggleState::Open), "detached member untouched");
}

#[test]
fn test_prune_detached_releases_removed_containers() {
    let mut doc = parse(&[section("a", "open", None), section("b", "collapsed", None)].concat()).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    let a = by_id(&doc, "a");
    let b = by_id(&doc, "b");
    doc.remove(b).unwrap();

    assert_eq!(state_of(&doc, b), Some(ToggleState::Collapsed), "kept until pruned");
    assert_eq!(collapsible::prune_detached(&mut doc), 1);
    assert_eq!(state_of(&doc, b), None);
    assert_eq!(doc.listener_count(b, &EventType::Click), 0);
    assert_eq!(doc.component::<collapsible::CollapsibleRegistry>().map(|r| r.len()), Some(1));

    assert_eq!(collapsible::prune_detached(&mut doc), 0);
    assert_eq!(state_of(&doc, a), Some(ToggleState::Open));
}

#[test]
fn test_non_accordion_mode_ignores_group() {
    let html = [section("a", "collapsed", Some("g")), section("b", "open", Some("g"))].concat();
    let mut doc = parse(&html).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    doc.click(by_id(&doc, "a"));
    assert_eq!(states(&doc, &["a", "b"]), [Some(ToggleState::Open); 2]);
}

#[test]
fn test_nested_click_belongs_to_nearest_container() {
    let html = r#"
        <div id="outer" data-collapsible="open">
            <h3 class="collapsible-header">outer</h3>
            <div class="collapsible-content">
                <div id="inner" data-collapsible="open">
                    <h3 class="collapsible-header" id="inner-header">inner</h3>
                    <div class="collapsible-content">inner body</div>
                </div>
            </div>
        </div>"#;
    let mut doc = parse(html).unwrap();
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    let outer = by_id(&doc, "outer");
    let inner = by_id(&doc, "inner");

    let outer_header = collapsible::instance(&doc, outer).unwrap().header().unwrap();
    assert_eq!(doc.text_content(outer_header), "outer");

    doc.click(by_id(&doc, "inner-header"));
    assert_eq!(state_of(&doc, inner), Some(ToggleState::Collapsed));
    assert_eq!(state_of(&doc, outer), Some(ToggleState::Open));

    doc.click(by_id(&doc, "inner-header"));
    assert_eq!(state_of(&doc, inner), Some(ToggleState::Open));
    assert_eq!(state_of(&doc, outer), Some(ToggleState::Open));
}

#[test]
fn test_element_without_attribute_is_rejected() {
    let mut doc = parse(r#"<div id="plain"><h3 class="collapsible-header">h</h3></div>"#).unwrap();
    let plain = by_id(&doc, "plain");
    assert_eq!(activate(&mut doc, &Value::Element(plain), CollapsibleOptions::new()), None);
    assert_eq!(doc.listener_count(plain, &EventType::Click), 0);

    doc.click(part(&doc, plain, "h3"));
    assert!(!doc.has_attribute(plain, "data-collapsible"));
}

#[test]
fn test_target_shapes() {
    let mut doc = parse(&section("a", "open", None)).unwrap();
    let a = by_id(&doc, "a");
    let opts = CollapsibleOptions::new;

    assert_eq!(activate(&mut doc, &Value::from("#a"), opts()), Some(vec![a]));
    assert_eq!(activate(&mut doc, &Value::from("#missing"), opts()), None);
    assert_eq!(activate(&mut doc, &Value::from("[[bad"), opts()), None);
    assert_eq!(activate(&mut doc, &Value::from(""), opts()), None);
    assert_eq!(activate(&mut doc, &Value::from(42i64), opts()), None);
    assert_eq!(activate(&mut doc, &Value::Array(vec![]), opts()), None);
    assert_eq!(activate(&mut doc, &Value::Null, opts()), Some(vec![a]));
}

#[test]
fn test_no_containers_is_empty_not_none() {
    let mut doc = parse("<p>nothing here</p>").unwrap();
    assert_eq!(activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()), Some(vec![]));
}

#[test]
fn test_detached_element_is_rejected() {
    let mut doc = parse(&section("a", "open", None)).unwrap();
    let a = by_id(&doc, "a");
    doc.remove(a).unwrap();
    assert_eq!(activate(&mut doc, &Value::Element(a), CollapsibleOptions::new()), None);
}

#[test]
fn test_missing_parts_degrade() {
    let html = r#"
        <div id="bare" data-collapsible="collapsed"><p>no header or content</p></div>
        <div id="headless" data-collapsible="open"><div class="collapsible-content">c</div></div>"#;
    let mut doc = parse(html).unwrap();
    let activated = activate(&mut doc, &Value::Undefined, CollapsibleOptions::new()).unwrap();
    assert_eq!(activated.len(), 2);

    let bare = by_id(&doc, "bare");
    doc.click(part(&doc, bare, "p"));
    assert_eq!(state_of(&doc, bare), Some(ToggleState::Open));

    let headless = by_id(&doc, "headless");
    doc.click(part(&doc, headless, ".collapsible-content"));
    assert_eq!(state_of(&doc, headless), Some(ToggleState::Open));
}

#[test]
fn test_activate_within_scope() {
    let html = format!(
        r#"<section id="scope">{}</section>{}"#,
        section("inside", "collapsed", None),
        section("outside", "collapsed", None)
    );
    let mut doc = parse(&html).unwrap();
    let scope = by_id(&doc, "scope");
    let activated = activate_within(&mut doc, scope, CollapsibleOptions::new()).unwrap();
    assert_eq!(activated, vec![by_id(&doc, "inside")]);
    assert_eq!(state_of(&doc, by_id(&doc, "outside")), None);

    let stray = doc.create_text("stray");
    assert_eq!(activate_within(&mut doc, stray, CollapsibleOptions::new()), None);
}

#[test]
fn test_callbacks_in_accordion_order() {
    let html = [section("a", "collapsed", Some("g")), section("b", "open", Some("g"))].concat();
    let mut doc = parse(&html).unwrap();
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let options = CollapsibleOptions::new().accordion(true).on_toggle(move |doc, state, container| {
        let id = doc.get_attribute(container, "id").unwrap_or_default().to_string();
        sink.borrow_mut().push(format!("{id}:{state}"));
    });
    activate(&mut doc, &Value::Undefined, options).unwrap();
    assert!(log.borrow().is_empty(), "activation does not report transitions");

    doc.click(by_id(&doc, "a"));
    assert_eq!(*log.borrow(), ["b:collapsed", "a:open"]);
}

#[test]
fn test_custom_config() {
    let html = r#"
        <details-box id="x" data-fold="collapsed" data-set="one">
            <button class="toggle">t</button>
            <div class="panel">p</div>
        </details-box>"#;
    let mut doc = parse(html).unwrap();
    let config = CollapsibleConfig {
        toggle_attribute: "data-fold".into(),
        accordion_attribute: "data-set".into(),
        header_selector: ".toggle".into(),
        content_selector: ".panel".into(),
        expanded_class: "is-open".into(),
    };
    activate(&mut doc, &Value::Undefined, CollapsibleOptions::new().config(config)).unwrap();
    let x = by_id(&doc, "x");
    let panel = part(&doc, x, ".panel");
    assert!(doc.is_hidden(panel));

    doc.click(part(&doc, x, ".toggle"));
    assert!(doc.has_class(x, "is-open"));
    assert_eq!(doc.get_attribute(x, "data-fold"), Some("open"));
}
