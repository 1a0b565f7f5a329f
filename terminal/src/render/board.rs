use super::traits::GameObjectRenderer;
use super::types::{CharGrid, RenderConfig};
use common::{GameStatus, Snapshot};

pub struct BoardRenderer<R: GameObjectRenderer> {
    renderer: R,
}

impl<R: GameObjectRenderer> BoardRenderer<R> {
    pub fn new(renderer: R) -> Self {
        Self { renderer }
    }

    pub fn render(&self, snapshot: &Snapshot, config: &RenderConfig) -> CharGrid {
        let extent = snapshot.grid_extent as usize;
        let mut grid = CharGrid::new(extent, extent, config.chars_per_point);

        if snapshot.status == GameStatus::NotStarted {
            let checker = self.renderer.render_checker();
            for x in 0..extent {
                for y in 0..extent {
                    if (x + y) % 2 == 0 {
                        grid.set_logical_point(x as i32, y as i32, &checker);
                    }
                }
            }
            return grid;
        }

        grid.set_logical_point(snapshot.food.x, snapshot.food.y, &self.renderer.render_food());

        // Tail first so the head wins on overlap (a self-collision frame)
        for (i, segment) in snapshot.segments.iter().enumerate().rev() {
            let pattern = self.renderer.render_snake_segment(i == 0);
            grid.set_logical_point(segment.x, segment.y, &pattern);
        }

        grid
    }
}
