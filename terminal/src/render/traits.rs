use super::types::{CharDimensions, CharPattern};

pub trait GameObjectRenderer {
    fn char_dimensions(&self) -> CharDimensions;

    fn render_snake_segment(&self, is_head: bool) -> CharPattern;

    fn render_food(&self) -> CharPattern;

    /// Shaded cell of the start screen checkerboard.
    fn render_checker(&self) -> CharPattern;
}
