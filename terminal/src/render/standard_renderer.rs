use super::traits::GameObjectRenderer;
use super::types::{CharDimensions, CharPattern};

const HEAD: char = '█';
const BODY: char = '▓';
const FOOD: char = '●';
const CHECKER: char = '░';

pub struct StandardRenderer {
    char_dims: CharDimensions,
}

impl StandardRenderer {
    pub fn new(char_dims: CharDimensions) -> Self {
        Self { char_dims }
    }
}

impl GameObjectRenderer for StandardRenderer {
    fn char_dimensions(&self) -> CharDimensions {
        self.char_dims
    }

    fn render_snake_segment(&self, is_head: bool) -> CharPattern {
        CharPattern::single(if is_head { HEAD } else { BODY }, self.char_dims)
    }

    fn render_food(&self) -> CharPattern {
        if self.char_dims.horizontal <= 2 && self.char_dims.vertical == 1 {
            return CharPattern::single(FOOD, self.char_dims);
        }
        // Larger cells get a checkered dot pattern instead of a solid block
        let mut chars = vec![vec![' '; self.char_dims.horizontal]; self.char_dims.vertical];
        for (y, row) in chars.iter_mut().enumerate() {
            for (x, cell) in row.iter_mut().enumerate() {
                if (x + y) % 2 == 0 {
                    *cell = FOOD;
                }
            }
        }
        CharPattern::new(chars)
    }

    fn render_checker(&self) -> CharPattern {
        CharPattern::single(CHECKER, self.char_dims)
    }
}
