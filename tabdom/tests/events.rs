use crossterm::event::{KeyCode, KeyModifiers};
use tabdom::{Document, Element, Event, FocusState, Key, Modifiers};

// ============================================================================
// Key conversion
// ============================================================================

#[test]
fn test_key_from_crossterm() {
    assert_eq!(Key::from(KeyCode::Left), Key::Left);
    assert_eq!(Key::from(KeyCode::Right), Key::Right);
    assert_eq!(Key::from(KeyCode::Home), Key::Home);
    assert_eq!(Key::from(KeyCode::End), Key::End);
    assert_eq!(Key::from(KeyCode::Enter), Key::Enter);
    assert_eq!(Key::from(KeyCode::Char(' ')), Key::Char(' '));
    assert_eq!(Key::from(KeyCode::Esc), Key::Escape);
}

#[test]
fn test_unsupported_key_is_placeholder() {
    assert_eq!(Key::from(KeyCode::F(5)), Key::Char('\0'));
}

#[test]
fn test_modifiers_from_crossterm() {
    let mods = Modifiers::from(KeyModifiers::SHIFT | KeyModifiers::CONTROL);
    assert!(mods.shift);
    assert!(mods.ctrl);
    assert!(!mods.alt);
    assert!(!mods.none());
    assert!(Modifiers::from(KeyModifiers::NONE).none());
}

#[test]
fn test_modifier_constructors() {
    assert!(Modifiers::new().none());
    assert!(Modifiers::shift().shift);
    assert!(Modifiers::ctrl().ctrl);
    assert!(Modifiers::alt().alt);
}

#[test]
fn test_event_equality() {
    let doc = Document::new(Element::div().id("root"), 100.0);
    let root = doc.root();
    assert_eq!(Event::Click { target: root }, Event::Click { target: root });
    assert_ne!(
        Event::Key {
            target: None,
            key: Key::Left,
            modifiers: Modifiers::new(),
        },
        Event::Key {
            target: Some(root),
            key: Key::Left,
            modifiers: Modifiers::new(),
        }
    );
}

// ============================================================================
// Focus
// ============================================================================

#[test]
fn test_focus_and_blur() {
    let doc = Document::new(
        Element::div().id("root").children([Element::button("a").id("a"), Element::button("b").id("b")]),
        100.0,
    );
    let a = doc.find_by_id("a").unwrap();
    let b = doc.find_by_id("b").unwrap();
    let mut focus = FocusState::new();

    assert_eq!(focus.focused(), None);
    assert!(focus.focus(a));
    assert!(!focus.focus(a), "already focused");
    assert!(focus.focus(b));
    assert_eq!(focus.focused(), Some(b));
    assert!(focus.blur());
    assert!(!focus.blur());
}

#[test]
fn test_focus_forgets_removed_nodes() {
    let mut doc = Document::new(
        Element::div().id("root").children([Element::button("a").id("a"), Element::button("b").id("b")]),
        100.0,
    );
    let a = doc.find_by_id("a").unwrap();
    let b = doc.find_by_id("b").unwrap();
    let mut focus = FocusState::new();
    focus.focus(a);

    focus.forget(&doc.remove(b));
    assert_eq!(focus.focused(), Some(a));
    focus.forget(&doc.remove(a));
    assert_eq!(focus.focused(), None);
}
