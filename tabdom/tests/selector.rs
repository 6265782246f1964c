use tabdom::{Document, Element, Selector};

fn doc() -> Document {
    let root = Element::div().id("root").children([
        Element::div()
            .id("outer")
            .class("tabs")
            .class("primary")
            .attr("data-variant", "chip")
            .child(Element::button("One").id("one").role("tab").attr("aria-selected", "true")),
        Element::new("section").id("plain").class("tabs"),
        Element::button("Two").id("two").role("tab"),
    ]);
    Document::new(root, 300.0)
}

fn ids(doc: &Document, selector: &str) -> Vec<String> {
    let selector = Selector::parse(selector).unwrap_or_else(|| panic!("unparsable: {selector}"));
    doc.query_all(doc.root(), &selector)
        .into_iter()
        .map(|n| doc.node(n).unwrap().id().to_string())
        .collect()
}

// =============================================================================
// Parsing
// =============================================================================

#[test]
fn test_parse_supported_forms() {
    for source in [
        "div",
        "*",
        "#outer",
        ".tabs",
        "div.tabs.primary",
        "[role]",
        "[role=tab]",
        "[data-variant=\"chip\"]",
        "[data-variant='chip']",
        "button[role=tab]#one",
        ".tabs, #two",
    ] {
        assert!(Selector::parse(source).is_some(), "{source}");
    }
}

#[test]
fn test_parse_rejects_unsupported() {
    for source in ["", " ", ".tabs,", "div > span", "div span", ".", "#", "[role", ":hover"] {
        assert!(Selector::parse(source).is_none(), "{source:?}");
    }
}

#[test]
fn test_source_is_kept() {
    let selector = Selector::parse("  .tabs ").unwrap();
    assert_eq!(selector.as_str(), ".tabs");
}

// =============================================================================
// Matching
// =============================================================================

#[test]
fn test_match_by_class_and_tag() {
    let doc = doc();
    assert_eq!(ids(&doc, ".tabs"), ["outer", "plain"]);
    assert_eq!(ids(&doc, "section.tabs"), ["plain"]);
    assert_eq!(ids(&doc, ".tabs.primary"), ["outer"]);
    assert!(ids(&doc, "span.tabs").is_empty());
}

#[test]
fn test_match_by_id() {
    let doc = doc();
    assert_eq!(ids(&doc, "#two"), ["two"]);
    assert_eq!(ids(&doc, "*#two"), ["two"]);
}

#[test]
fn test_match_by_attribute() {
    let doc = doc();
    assert_eq!(ids(&doc, "[role=tab]"), ["one", "two"]);
    assert_eq!(ids(&doc, "[aria-selected]"), ["one"]);
    assert_eq!(ids(&doc, "[aria-selected=false]"), Vec::<String>::new());
    assert_eq!(ids(&doc, "[data-variant=\"chip\"]"), ["outer"]);
}

#[test]
fn test_selector_list_is_a_union() {
    let doc = doc();
    assert_eq!(ids(&doc, "#two, .primary"), ["outer", "two"]);
}

#[test]
fn test_closest_and_query() {
    let doc = doc();
    let one = doc.find_by_id("one").unwrap();
    let tabs = Selector::parse(".tabs").unwrap();

    assert_eq!(doc.closest(one, &tabs), doc.find_by_id("outer"));
    assert_eq!(doc.query(doc.root(), &tabs), doc.find_by_id("outer"));
    assert_eq!(doc.query(one, &tabs), None);
}
