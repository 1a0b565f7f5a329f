#[derive(Clone, Copy, Debug)]
pub struct RenderConfig {
    pub chars_per_point: CharDimensions,
}

impl Default for RenderConfig {
    fn default() -> Self {
        // Terminal cells are roughly twice as tall as wide
        Self { chars_per_point: CharDimensions::new(2, 1) }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CharDimensions {
    pub horizontal: usize,
    pub vertical: usize,
}

impl CharDimensions {
    pub fn new(horizontal: usize, vertical: usize) -> Self {
        Self { horizontal, vertical }
    }
}

pub struct CharGrid {
    grid: Vec<Vec<char>>,
    logical_width: usize,
    logical_height: usize,
    char_dims: CharDimensions,
}

impl CharGrid {
    pub fn new(logical_width: usize, logical_height: usize, char_dims: CharDimensions) -> Self {
        let physical_width = logical_width * char_dims.horizontal;
        let physical_height = logical_height * char_dims.vertical;
        let grid = vec![vec![' '; physical_width]; physical_height];
        Self {
            grid,
            logical_width,
            logical_height,
            char_dims,
        }
    }

    /// Writes `pattern` at a logical cell. Cells outside the grid are skipped.
    pub fn set_logical_point(&mut self, x: i32, y: i32, pattern: &CharPattern) {
        if x < 0 || y < 0 || x as usize >= self.logical_width || y as usize >= self.logical_height {
            return;
        }
        let start_x = x as usize * self.char_dims.horizontal;
        let start_y = y as usize * self.char_dims.vertical;

        for (dy, row) in pattern.chars.iter().enumerate() {
            for (dx, &ch) in row.iter().enumerate() {
                if let Some(cell) = self.grid.get_mut(start_y + dy).and_then(|r| r.get_mut(start_x + dx)) {
                    *cell = ch;
                }
            }
        }
    }

    pub fn into_lines(self) -> Vec<Vec<char>> {
        self.grid
    }

    pub fn into_strings(self) -> Vec<String> {
        self.grid.into_iter().map(|row| row.into_iter().collect()).collect()
    }

    pub fn physical_width(&self) -> usize {
        self.logical_width * self.char_dims.horizontal
    }

    pub fn physical_height(&self) -> usize {
        self.logical_height * self.char_dims.vertical
    }
}

#[derive(Clone, Debug)]
pub struct CharPattern {
    pub chars: Vec<Vec<char>>,
}

impl CharPattern {
    pub fn new(chars: Vec<Vec<char>>) -> Self {
        Self { chars }
    }

    pub fn single(ch: char, dims: CharDimensions) -> Self {
        let chars = vec![vec![ch; dims.horizontal]; dims.vertical];
        Self { chars }
    }
}
