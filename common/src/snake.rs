use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::INITIAL_BODY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    pub fn moved(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Position { x: self.x + dx, y: self.y + dy }
    }

    pub fn in_grid(&self, grid_extent: u32) -> bool {
        let extent = grid_extent as i64;
        (0..extent).contains(&(self.x as i64)) && (0..extent).contains(&(self.y as i64))
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [Direction::Up, Direction::Down, Direction::Left, Direction::Right];

    pub fn opposite(self) -> Direction {
        match self {
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
            Direction::Left => Direction::Right,
            Direction::Right => Direction::Left,
        }
    }

    pub fn is_opposite(self, other: Direction) -> bool {
        self.opposite() == other
    }

    /// Grid delta; y grows downwards.
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, -1),
            Direction::Down => (0, 1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized direction {0:?}")]
pub struct DirectionParseError(pub String);

impl FromStr for Direction {
    type Err = DirectionParseError;

    /// Accepts direction names and browser arrow key names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "up" | "arrowup" => Ok(Direction::Up),
            "down" | "arrowdown" => Ok(Direction::Down),
            "left" | "arrowleft" => Ok(Direction::Left),
            "right" | "arrowright" => Ok(Direction::Right),
            _ => Err(DirectionParseError(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snake {
    pub body: VecDeque<Position>,
    pub direction: Direction,
    pub score: u32,
    pub ate_this_tick: bool,
}

impl Default for Snake {
    fn default() -> Self {
        Snake::new()
    }
}

impl Snake {
    pub fn new() -> Self {
        Snake {
            body: INITIAL_BODY.iter().copied().collect(),
            direction: Direction::Right,
            score: 0,
            ate_this_tick: false,
        }
    }

    pub fn head(&self) -> &Position {
        self.body.front().expect("Snake body should not be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains_point(&self, point: &Position) -> bool {
        self.body.contains(point)
    }

    /// Advances one cell. A reversing request keeps the current heading. Returns true when
    /// the new head landed on `food`; the body then keeps its tail and the caller is
    /// responsible for placing the next food against the grown body.
    pub fn move_snake(&mut self, requested: Direction, food: Position) -> bool {
        self.ate_this_tick = false;
        if !self.direction.is_opposite(requested) {
            self.direction = requested;
        }

        let new_head = self.head().moved(self.direction);
        self.body.push_front(new_head);

        if new_head == food {
            self.score += 1;
            self.ate_this_tick = true;
        } else {
            self.body.pop_back();
        }
        self.ate_this_tick
    }

    pub fn check_self_collision(&self) -> bool {
        let head = self.head();
        self.body.iter().skip(1).any(|segment| segment == head)
    }

    pub fn check_boundary_collision(&self, grid_extent: u32) -> bool {
        !self.head().in_grid(grid_extent)
    }

    /// Back to the starting body. Food is left alone.
    pub fn reset(&mut self) {
        *self = Snake::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const FAR_FOOD: Position = Position::new(25, 25);

    fn snake_with(body: &[(i32, i32)], direction: Direction) -> Snake {
        Snake {
            body: body.iter().map(|&(x, y)| Position::new(x, y)).collect(),
            direction,
            score: 0,
            ate_this_tick: false,
        }
    }

    #[test]
    fn test_adopts_non_reversing_direction() {
        for current in Direction::ALL {
            for requested in Direction::ALL {
                let mut snake = snake_with(&[(10, 10), (10, 11), (10, 12)], current);
                snake.move_snake(requested, FAR_FOOD);
                if requested == current.opposite() {
                    assert_eq!(snake.direction, current, "{current:?} -> {requested:?}");
                } else {
                    assert_eq!(snake.direction, requested, "{current:?} -> {requested:?}");
                }
            }
        }
    }

    #[test]
    fn test_reversal_keeps_moving_forward() {
        let mut snake = Snake::new();
        snake.move_snake(Direction::Left, FAR_FOOD);
        assert_eq!(*snake.head(), Position::new(6, 5));
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_length_unchanged_without_food() {
        let mut snake = Snake::new();
        for direction in [Direction::Right, Direction::Down, Direction::Down, Direction::Left] {
            let before = snake.len();
            assert!(!snake.move_snake(direction, FAR_FOOD));
            assert_eq!(snake.len(), before);
            assert!(!snake.ate_this_tick);
        }
        assert_eq!(snake.score, 0);
    }

    #[test]
    fn test_eating_grows_and_scores() {
        let mut snake = Snake::new();
        let ate = snake.move_snake(Direction::Right, Position::new(6, 5));

        assert!(ate);
        assert!(snake.ate_this_tick);
        assert_eq!(snake.score, 1);
        let body: Vec<_> = snake.body.iter().copied().collect();
        assert_eq!(
            body,
            vec![
                Position::new(6, 5),
                Position::new(5, 5),
                Position::new(5, 6),
                Position::new(5, 7),
            ]
        );
    }

    #[test]
    fn test_ate_flag_cleared_on_next_move() {
        let mut snake = Snake::new();
        snake.move_snake(Direction::Right, Position::new(6, 5));
        snake.move_snake(Direction::Right, FAR_FOOD);
        assert!(!snake.ate_this_tick);
        assert_eq!(snake.len(), 4);
    }

    #[test]
    fn test_initial_state_never_self_collides() {
        // Down is not a reversal of Right but folds the head onto the second segment
        for direction in [Direction::Up, Direction::Left, Direction::Right] {
            let mut snake = Snake::new();
            snake.move_snake(direction, FAR_FOOD);
            assert!(!snake.check_self_collision(), "{direction:?}");
        }
    }

    #[test]
    fn test_self_collision_detected() {
        // Head at (5,5) about to turn back into its own body
        let mut snake = snake_with(&[(5, 5), (6, 5), (6, 6), (5, 6), (4, 6)], Direction::Left);
        snake.move_snake(Direction::Down, FAR_FOOD);
        assert_eq!(*snake.head(), Position::new(5, 6));
        assert!(snake.check_self_collision());
    }

    #[test]
    fn test_moving_into_vacated_tail_is_safe() {
        // Square loop: the tail moves away on the same tick the head enters it
        let mut snake = snake_with(&[(5, 5), (6, 5), (6, 6), (5, 6)], Direction::Left);
        snake.move_snake(Direction::Down, FAR_FOOD);
        assert!(!snake.check_self_collision());
    }

    #[test]
    fn test_boundary_collision() {
        let extent = 30;
        let cases = [
            ((0, 0), false),
            ((29, 29), false),
            ((-1, 5), true),
            ((5, -1), true),
            ((30, 5), true),
            ((5, 30), true),
        ];
        for ((x, y), expected) in cases {
            let snake = snake_with(&[(x, y)], Direction::Right);
            assert_eq!(snake.check_boundary_collision(extent), expected, "({x}, {y})");
        }
    }

    #[test]
    fn test_leaving_left_edge() {
        let mut snake = snake_with(&[(0, 5), (0, 6), (0, 7)], Direction::Left);
        snake.move_snake(Direction::Left, FAR_FOOD);
        assert_eq!(*snake.head(), Position::new(-1, 5));
        assert!(snake.check_boundary_collision(30));
    }

    #[test]
    fn test_reset() {
        let mut snake = snake_with(&[(1, 1), (1, 2)], Direction::Up);
        snake.score = 12;
        snake.ate_this_tick = true;
        snake.reset();
        assert_eq!(snake, Snake::new());
        assert_eq!(snake.direction, Direction::Right);
    }

    #[test]
    fn test_parse_direction() {
        assert_eq!("up".parse::<Direction>(), Ok(Direction::Up));
        assert_eq!("ArrowLeft".parse::<Direction>(), Ok(Direction::Left));
        assert_eq!(" RIGHT ".parse::<Direction>(), Ok(Direction::Right));
        assert!("diagonal".parse::<Direction>().is_err());
    }
}
