use tabdom::{Element, NodeId, Overflow, Size};
use tabnav::widgets::{ScrollNavState, StripVariant};
use tabnav::{Runtime, TabsConfig};

const TOLERANCE: f32 = 1.0;

fn tab(i: usize) -> Element {
    Element::button(format!("Tab {i}"))
        .id(format!("t{i}"))
        .role("tab")
        .width(Size::Fixed(60.0))
}

/// `count` tabs of 60px in a 300px strip.
fn strip_page(count: usize, wrap: Element, container: Element) -> Element {
    Element::div().id("root").child(
        container.id("tabs").class("tabs").child(
            wrap.id("wrap").class("tabs-wrap").child(
                Element::row()
                    .id("strip")
                    .role("tablist")
                    .overflow_x(Overflow::Scroll)
                    .children((1..=count).map(tab)),
            ),
        ),
    )
}

fn arrows(count: usize) -> Element {
    strip_page(count, Element::div().class("has-arrows"), Element::div())
}

fn runtime(root: Element) -> (Runtime, NodeId) {
    let mut rt = Runtime::new(root, 300.0, TabsConfig::default());
    rt.init_all();
    rt.settle();
    let container = rt.find("tabs").unwrap();
    (rt, container)
}

fn controls(rt: &Runtime) -> (NodeId, NodeId) {
    let wrap = rt.find("wrap").unwrap();
    let doc = rt.document();
    let prev = doc.find_all(wrap, |n| n.has_class("scroll-prev"));
    let next = doc.find_all(wrap, |n| n.has_class("scroll-next"));
    assert_eq!(prev.len(), 1);
    assert_eq!(next.len(), 1);
    (prev[0], next[0])
}

fn strip_state(rt: &Runtime, container: NodeId) -> ScrollNavState {
    rt.tabs(container).unwrap().depth1_strip().nav.state()
}

// =============================================================================
// Visibility law
// =============================================================================

#[test]
fn test_state_without_overflow_hides_both() {
    for scroll_left in [0.0, 10.0, 500.0] {
        let state = ScrollNavState::compute(scroll_left, 300.0, 300.0, TOLERANCE);
        assert!(state.prev_hidden);
        assert!(state.next_hidden);
        assert!(!state.has_overflow());
    }
    let state = ScrollNavState::compute(0.0, 200.0, 300.0, TOLERANCE);
    assert_eq!(state.max, -100.0);
    assert!(state.prev_hidden && state.next_hidden);
}

#[test]
fn test_state_at_start() {
    let state = ScrollNavState::compute(0.0, 600.0, 300.0, TOLERANCE);
    assert_eq!(state.max, 300.0);
    assert!(state.prev_hidden);
    assert!(!state.next_hidden);

    // Within tolerance of the start still counts as the start.
    let state = ScrollNavState::compute(1.0, 600.0, 300.0, TOLERANCE);
    assert!(state.prev_hidden);
}

#[test]
fn test_state_in_middle() {
    let state = ScrollNavState::compute(150.0, 600.0, 300.0, TOLERANCE);
    assert!(!state.prev_hidden);
    assert!(!state.next_hidden);
}

#[test]
fn test_state_at_end() {
    let state = ScrollNavState::compute(300.0, 600.0, 300.0, TOLERANCE);
    assert!(!state.prev_hidden);
    assert!(state.next_hidden);

    let state = ScrollNavState::compute(299.5, 600.0, 300.0, TOLERANCE);
    assert!(state.next_hidden);
    let state = ScrollNavState::compute(298.0, 600.0, 300.0, TOLERANCE);
    assert!(!state.next_hidden);
}

// =============================================================================
// Attachment
// =============================================================================

#[test]
fn test_controls_created_in_wrap_with_arrows() {
    let (rt, container) = runtime(arrows(10));
    let (prev, next) = controls(&rt);

    let nav = &rt.tabs(container).unwrap().depth1_strip().nav;
    assert!(nav.is_attached());
    assert_eq!(nav.prev(), Some(prev));
    assert_eq!(nav.next(), Some(next));
    assert!(rt.document().is_hidden(prev));
    assert!(!rt.document().is_hidden(next));
    assert!(rt.document().has_class(rt.find("wrap").unwrap(), "is-scrollable"));
}

#[test]
fn test_wrap_without_arrows_is_inert() {
    let (mut rt, container) = runtime(strip_page(10, Element::div(), Element::div()));
    let wrap = rt.find("wrap").unwrap();

    let nav = rt.tabs(container).unwrap().depth1_strip().nav.clone();
    assert!(!nav.is_attached());
    assert!(rt.document().find_all(wrap, |n| n.has_class("scroll-prev")).is_empty());
    assert!(!rt.document().has_class(wrap, "is-scrollable"));

    rt.resize(200.0);
    rt.settle();
    assert_eq!(rt.document().children(wrap).len(), 1);
}

#[test]
fn test_existing_controls_are_reused() {
    let wrap = Element::div().class("has-arrows").children([
        Element::button("<").id("my-prev").class("scroll-prev"),
        Element::button(">").id("my-next").class("scroll-next"),
    ]);
    let (rt, container) = runtime(strip_page(10, wrap, Element::div()));

    let nav = &rt.tabs(container).unwrap().depth1_strip().nav;
    assert_eq!(nav.prev(), rt.find("my-prev"));
    assert_eq!(nav.next(), rt.find("my-next"));
    controls(&rt);
}

#[test]
fn test_chip_variant_keeps_scroll_nav() {
    let (rt, container) = runtime(strip_page(
        10,
        Element::div().class("has-arrows"),
        Element::div().attr("data-variant", "chip"),
    ));
    let tabs = rt.tabs(container).unwrap();

    assert_eq!(tabs.options().variant, StripVariant::Chip);
    assert!(tabs.depth1_strip().indicator.is_none());
    assert!(tabs.depth1_strip().nav.is_attached());
}

#[test]
fn test_no_overflow_hides_controls() {
    let (rt, container) = runtime(arrows(3));
    let (prev, next) = controls(&rt);

    assert!(rt.document().is_hidden(prev));
    assert!(rt.document().is_hidden(next));
    assert!(!strip_state(&rt, container).has_overflow());
    assert!(!rt.document().has_class(rt.find("wrap").unwrap(), "is-scrollable"));
}

// =============================================================================
// Scrolling
// =============================================================================

#[test]
fn test_next_scrolls_by_step() {
    let (mut rt, container) = runtime(arrows(10));
    let (prev, next) = controls(&rt);
    let strip = rt.find("strip").unwrap();

    assert!(rt.click(next).is_handled());
    assert!(rt.document().has_class(next, "is-active"));

    rt.settle();
    // 0.8 of the 300px client width.
    assert_eq!(rt.document().scroll_left(strip), 240.0);
    assert!(!rt.document().has_class(next, "is-active"));
    assert!(!rt.document().is_hidden(prev));
    assert!(!rt.document().is_hidden(next));
    assert_eq!(strip_state(&rt, container).scroll_left, 240.0);
}

#[test]
fn test_scroll_clamps_to_end() {
    let (mut rt, _) = runtime(arrows(10));
    let (prev, next) = controls(&rt);
    let strip = rt.find("strip").unwrap();

    rt.click(next);
    rt.settle();
    rt.click(next);
    rt.settle();

    assert_eq!(rt.document().scroll_left(strip), 300.0);
    assert!(rt.document().is_hidden(next));
    assert!(!rt.document().is_hidden(prev));

    rt.click(prev);
    rt.settle();
    assert_eq!(rt.document().scroll_left(strip), 60.0);
}

#[test]
fn test_scroll_below_tolerance_is_noop() {
    let (mut rt, container) = runtime(arrows(10));
    let (prev, _) = controls(&rt);

    // Already at the start: the clamped target equals the current offset.
    let handled = rt.click(prev);
    assert!(handled.is_handled());
    assert!(!rt.document().has_class(prev, "is-active"));
    assert!(rt.is_idle());
    assert_eq!(strip_state(&rt, container).scroll_left, 0.0);
}

#[test]
fn test_scroll_without_overflow_is_noop() {
    let (mut rt, _) = runtime(arrows(3));
    let (_, next) = controls(&rt);

    rt.click(next);
    assert!(!rt.document().has_class(next, "is-active"));
    assert!(rt.is_idle());
}

#[test]
fn test_user_scroll_updates_state() {
    let (mut rt, container) = runtime(arrows(10));
    let (prev, next) = controls(&rt);
    let strip = rt.find("strip").unwrap();

    assert!(rt.user_scroll(strip, 150.0).is_handled());
    assert!(!rt.document().is_hidden(prev));
    assert!(!rt.document().is_hidden(next));

    rt.user_scroll(strip, 1000.0);
    assert_eq!(rt.document().scroll_left(strip), 300.0);
    assert!(rt.document().is_hidden(next));
    assert_eq!(strip_state(&rt, container).max, 300.0);
}

#[test]
fn test_user_scroll_cancels_smooth_scroll() {
    let (mut rt, _) = runtime(arrows(10));
    let (_, next) = controls(&rt);
    let strip = rt.find("strip").unwrap();

    rt.click(next);
    rt.run_frame();
    rt.user_scroll(strip, 20.0);
    rt.settle();
    assert_eq!(rt.document().scroll_left(strip), 20.0);
}

#[test]
fn test_activation_centers_tab() {
    let (mut rt, container) = runtime(arrows(10));
    let strip = rt.find("strip").unwrap();

    // t5 spans 240..300; its center lands in the middle of the strip.
    rt.activate_tab(container, "t5", false);
    rt.settle();
    assert_eq!(rt.document().scroll_left(strip), 120.0);

    // Centering the last tab clamps at the end.
    rt.activate_tab(container, "t10", false);
    rt.settle();
    assert_eq!(rt.document().scroll_left(strip), 300.0);
    assert!(strip_state(&rt, container).next_hidden);
}

#[test]
fn test_hidden_wrap_defers_state_update() {
    let (mut rt, container) = runtime(arrows(10));
    let wrap = rt.find("wrap").unwrap();

    rt.document_mut().set_hidden(wrap, true);
    rt.resize(1000.0);
    rt.settle();
    assert!(strip_state(&rt, container).has_overflow(), "skipped while hidden");

    rt.document_mut().set_hidden(wrap, false);
    rt.resize(1000.0);
    assert!(!strip_state(&rt, container).has_overflow());
}

// =============================================================================
// Resize
// =============================================================================

#[test]
fn test_resize_rederives_state() {
    let (mut rt, container) = runtime(arrows(10));
    let (prev, next) = controls(&rt);

    rt.resize(1000.0);
    assert!(rt.document().is_hidden(prev));
    assert!(rt.document().is_hidden(next));
    assert!(!strip_state(&rt, container).has_overflow());

    rt.resize(300.0);
    assert!(!rt.document().is_hidden(next));
}

#[test]
fn test_single_resize_listener_for_all_containers() {
    let page = Element::div().id("root").children([
        Element::div().id("a").class("tabs").child(
            Element::div()
                .class("tabs-wrap")
                .class("has-arrows")
                .child(Element::row().role("tablist").children((1..=5).map(tab))),
        ),
        Element::div().id("b").class("tabs").child(
            Element::div()
                .class("tabs-wrap")
                .class("has-arrows")
                .child(Element::row().role("tablist").child(Element::button("x").id("x").role("tab"))),
        ),
    ]);
    let mut rt = Runtime::new(page, 300.0, TabsConfig::default());
    rt.init_all();

    let a = rt.find("a").unwrap();
    let b = rt.find("b").unwrap();
    let registry = rt.resize_registry();
    assert_eq!(registry.containers(), &[a, b]);
    assert_eq!(registry.listener_count(), 1);

    // Re-initializing does not register twice.
    rt.resync(a).unwrap();
    assert_eq!(rt.resize_registry().containers().len(), 2);

    rt.remove(a);
    assert_eq!(rt.resize_registry().listener_count(), 1);
    rt.remove(b);
    assert_eq!(rt.resize_registry().listener_count(), 0);
}
