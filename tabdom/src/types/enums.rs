/// Box size along one axis, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Size {
    Fixed(f32),
    /// Take the available space of the parent's content box.
    #[default]
    Fill,
    /// Shrink to content.
    Auto,
    Percent(f32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    Row,
    #[default]
    Column,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Position {
    #[default]
    Static,
    /// Taken out of flow and placed by its `left` / `width` style.
    Absolute,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Overflow {
    #[default]
    Visible,
    Hidden,
    Scroll,
}
