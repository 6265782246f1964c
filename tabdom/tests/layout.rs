use tabdom::{BoxMetrics, Document, Element, NodeId, Position, Size, TextMetrics};

fn metrics(doc: &mut Document, name: &str) -> BoxMetrics {
    let id = doc.find_by_id(name).unwrap_or_else(|| panic!("no element #{name}"));
    doc.metrics(id)
}

fn fixed(name: &str, width: f32) -> Element {
    Element::div().id(name).width(Size::Fixed(width))
}

// =============================================================================
// Widths
// =============================================================================

#[test]
fn test_fill_takes_available_width() {
    let root = Element::div().id("root").child(Element::div().id("child"));
    let mut doc = Document::new(root, 320.0);

    assert_eq!(metrics(&mut doc, "root").width, 320.0);
    assert_eq!(metrics(&mut doc, "child").width, 320.0);
}

#[test]
fn test_percent_width_in_column() {
    let root = Element::div()
        .id("root")
        .child(Element::div().id("half").width(Size::Percent(0.5)));
    let mut doc = Document::new(root, 300.0);
    assert_eq!(metrics(&mut doc, "half").width, 150.0);
}

#[test]
fn test_padding_shrinks_content_box() {
    let root = Element::div()
        .id("root")
        .padding_x(10.0)
        .child(Element::div().id("child"));
    let mut doc = Document::new(root, 200.0);

    let child = metrics(&mut doc, "child");
    assert_eq!(child.x, 10.0);
    assert_eq!(child.width, 180.0);
}

#[test]
fn test_text_width_uses_char_width() {
    let root = Element::row().id("root").child(Element::text("hello").id("label"));
    let mut doc = Document::with_text_metrics(
        root,
        300.0,
        TextMetrics {
            char_width: 10.0,
            line_height: 18.0,
        },
    );

    let label = metrics(&mut doc, "label");
    assert_eq!(label.width, 50.0);
    assert_eq!(label.height, 18.0);
}

#[test]
fn test_style_width_overrides_declared() {
    let root = Element::div().id("root").child(fixed("child", 50.0));
    let mut doc = Document::new(root, 300.0);
    let child = doc.find_by_id("child").unwrap();

    doc.set_style_width(child, Some(75.0));
    assert_eq!(doc.metrics(child).width, 75.0);
}

// =============================================================================
// Rows
// =============================================================================

#[test]
fn test_row_places_children_side_by_side() {
    let root = Element::row()
        .id("root")
        .gap(4.0)
        .children([fixed("a", 60.0), fixed("b", 40.0), fixed("c", 60.0)]);
    let mut doc = Document::new(root, 300.0);

    assert_eq!(metrics(&mut doc, "a").x, 0.0);
    assert_eq!(metrics(&mut doc, "b").x, 64.0);
    let c = metrics(&mut doc, "c");
    assert_eq!(c.x, 108.0);
    assert_eq!(c.right(), 168.0);
    assert_eq!(c.center_x(), 138.0);
}

#[test]
fn test_fill_children_in_row_shrink_to_content() {
    let root = Element::row()
        .id("root")
        .children([Element::div().id("a").child(Element::text("abc")), fixed("b", 10.0)]);
    let mut doc = Document::new(root, 300.0);

    assert_eq!(metrics(&mut doc, "a").width, 24.0);
    assert_eq!(metrics(&mut doc, "b").x, 24.0);
}

#[test]
fn test_overflowing_row_scroll_width() {
    let root = Element::div().id("root").child(
        Element::row()
            .id("strip")
            .padding_x(5.0)
            .children((0..4).map(|i| fixed(&format!("t{i}"), 100.0))),
    );
    let mut doc = Document::new(root, 300.0);

    let strip = metrics(&mut doc, "strip");
    assert_eq!(strip.client_width, 300.0);
    assert_eq!(strip.scroll_width, 410.0);
    assert_eq!(strip.max_scroll_left(), 110.0);
}

#[test]
fn test_scroll_width_never_below_width() {
    let root = Element::div()
        .id("root")
        .child(Element::row().id("strip").child(fixed("t", 50.0)));
    let mut doc = Document::new(root, 300.0);

    let strip = metrics(&mut doc, "strip");
    assert_eq!(strip.scroll_width, 300.0);
    assert_eq!(strip.max_scroll_left(), 0.0);
}

#[test]
fn test_child_x_ignores_scroll_offset() {
    let root = Element::div().id("root").child(
        Element::row()
            .id("strip")
            .children((0..6).map(|i| fixed(&format!("t{i}"), 100.0))),
    );
    let mut doc = Document::new(root, 300.0);
    let strip = doc.find_by_id("strip").unwrap();

    doc.set_scroll_left(strip, 200.0);
    assert_eq!(metrics(&mut doc, "t3").x, 300.0);
}

// =============================================================================
// Columns
// =============================================================================

#[test]
fn test_column_stacks_heights() {
    let root = Element::div().id("root").children([
        Element::text("one").id("one"),
        Element::text("two").id("two"),
        Element::div().id("fixed").height(Size::Fixed(35.0)),
    ]);
    let mut doc = Document::new(root, 300.0);

    assert_eq!(metrics(&mut doc, "two").y, 20.0);
    assert_eq!(metrics(&mut doc, "fixed").y, 40.0);
    assert_eq!(metrics(&mut doc, "root").height, 75.0);
}

#[test]
fn test_style_height_clips_but_keeps_scroll_height() {
    let root = Element::div().id("root").child(
        Element::div()
            .id("content")
            .children([Element::text("a"), Element::text("b"), Element::text("c")]),
    );
    let mut doc = Document::new(root, 300.0);
    let content = doc.find_by_id("content").unwrap();

    doc.set_style_height(content, Some(0.0));
    let m = doc.metrics(content);
    assert_eq!(m.height, 0.0);
    assert_eq!(m.scroll_height, 60.0);
    assert_eq!(metrics(&mut doc, "root").height, 0.0);
}

// =============================================================================
// Out of flow
// =============================================================================

#[test]
fn test_hidden_subtree_measures_zero() {
    let root = Element::div().id("root").children([
        Element::div()
            .id("hidden")
            .hidden(true)
            .child(Element::text("inside").id("inside")),
        Element::text("after").id("after"),
    ]);
    let mut doc = Document::new(root, 300.0);

    assert!(metrics(&mut doc, "hidden").is_empty());
    assert!(metrics(&mut doc, "inside").is_empty());
    assert_eq!(metrics(&mut doc, "after").y, 0.0);
}

#[test]
fn test_absolute_children_leave_flow() {
    let root = Element::row().id("root").children([
        fixed("a", 60.0),
        Element::div()
            .id("marker")
            .position(Position::Absolute)
            .width(Size::Fixed(30.0))
            .left(12.0),
        fixed("b", 60.0),
    ]);
    let mut doc = Document::new(root, 300.0);

    assert_eq!(metrics(&mut doc, "b").x, 60.0);
    let marker = metrics(&mut doc, "marker");
    assert_eq!(marker.x, 12.0);
    assert_eq!(marker.width, 30.0);
}

#[test]
fn test_style_left_moves_absolute_node() {
    let root = Element::row().id("root").child(
        Element::div()
            .id("marker")
            .position(Position::Absolute)
            .width(Size::Fixed(0.0)),
    );
    let mut doc = Document::new(root, 300.0);
    let marker = doc.find_by_id("marker").unwrap();

    doc.set_style_left(marker, Some(120.0));
    doc.set_style_width(marker, Some(60.0));
    let m = doc.metrics(marker);
    assert_eq!((m.x, m.width), (120.0, 60.0));
}

// =============================================================================
// Laziness
// =============================================================================

#[test]
fn test_layout_runs_only_when_dirty() {
    let root = Element::div().id("root").child(fixed("a", 60.0));
    let mut doc = Document::new(root, 300.0);
    let a: NodeId = doc.find_by_id("a").unwrap();

    assert!(doc.is_dirty());
    doc.layout_if_dirty();
    assert!(!doc.is_dirty());

    doc.add_class(a, "styled");
    assert!(!doc.is_dirty(), "classes do not affect geometry");

    doc.set_hidden(a, true);
    assert!(doc.is_dirty());
    assert_eq!(doc.cached_metrics(a).width, 60.0, "stale until the next pass");
    assert_eq!(doc.metrics(a).width, 0.0);
}

#[test]
fn test_resize_relayouts() {
    let root = Element::div().id("root").child(Element::div().id("child"));
    let mut doc = Document::new(root, 300.0);
    assert_eq!(metrics(&mut doc, "child").width, 300.0);

    doc.resize(500.0);
    assert_eq!(doc.viewport_width(), 500.0);
    assert_eq!(metrics(&mut doc, "child").width, 500.0);
}
