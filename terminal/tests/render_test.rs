use common::{GameStatus, Position, Snapshot};
use terminal::render::{
    board::BoardRenderer,
    standard_renderer::StandardRenderer,
    types::{CharDimensions, RenderConfig},
};

fn snapshot(status: GameStatus, segments: &[(i32, i32)], food: (i32, i32), grid_extent: u32) -> Snapshot {
    Snapshot {
        segments: segments.iter().map(|&(x, y)| Position::new(x, y)).collect(),
        food: Position::new(food.0, food.1),
        score: 0,
        status,
        grid_extent,
        cell_size_px: 600 / grid_extent,
    }
}

fn render(snapshot: &Snapshot, char_dims: CharDimensions) -> Vec<Vec<char>> {
    let renderer = BoardRenderer::new(StandardRenderer::new(char_dims));
    let config = RenderConfig { chars_per_point: char_dims };
    renderer.render(snapshot, &config).into_lines()
}

#[test]
fn test_2x1_rendering() {
    let snapshot = snapshot(GameStatus::Playing, &[(5, 5), (4, 5)], (7, 7), 10);
    let lines = render(&snapshot, CharDimensions::new(2, 1));

    assert_eq!(lines.len(), 10);
    assert_eq!(lines[0].len(), 20);

    // Head at (5,5) -> chars 10,11 of row 5
    assert_eq!(lines[5][10], '█');
    assert_eq!(lines[5][11], '█');

    // Body at (4,5) -> chars 8,9
    assert_eq!(lines[5][8], '▓');
    assert_eq!(lines[5][9], '▓');

    // Food at (7,7) -> chars 14,15
    assert_eq!(lines[7][14], '●');
    assert_eq!(lines[7][15], '●');

    assert_eq!(lines[0][0], ' ');
}

#[test]
fn test_1x1_rendering() {
    let snapshot = snapshot(GameStatus::Playing, &[(2, 2), (1, 2), (0, 2)], (3, 3), 8);
    let lines = render(&snapshot, CharDimensions::new(1, 1));

    assert_eq!(lines.len(), 8);
    assert_eq!(lines[0].len(), 8);
    let row: String = lines[2].iter().collect();
    assert_eq!(row, "▓▓█     ");
    assert_eq!(lines[3][3], '●');
}

#[test]
fn test_head_drawn_over_body_on_collision() {
    // Head folded back onto the second segment
    let snapshot = snapshot(GameStatus::Over, &[(5, 6), (5, 5), (5, 6)], (0, 0), 10);
    let lines = render(&snapshot, CharDimensions::new(1, 1));
    assert_eq!(lines[6][5], '█');
    assert_eq!(lines[5][5], '▓');
}

#[test]
fn test_off_board_head_is_skipped() {
    let snapshot = snapshot(GameStatus::Over, &[(-1, 5), (0, 5), (1, 5)], (4, 4), 10);
    let lines = render(&snapshot, CharDimensions::new(2, 1));
    assert_eq!(lines[5][0], '▓');
    assert_eq!(lines[5][2], '▓');
    assert_eq!(lines.len(), 10);
    assert!(lines.iter().all(|row| row.len() == 20));
}

#[test]
fn test_start_screen_checkerboard() {
    let snapshot = snapshot(GameStatus::NotStarted, &[(5, 5), (5, 6), (5, 7)], (1, 0), 8);
    let lines = render(&snapshot, CharDimensions::new(1, 1));

    for (y, row) in lines.iter().enumerate() {
        for (x, &ch) in row.iter().enumerate() {
            let expected = if (x + y) % 2 == 0 { '░' } else { ' ' };
            assert_eq!(ch, expected, "({x}, {y})");
        }
    }
}

#[test]
fn test_large_cell_food_pattern() {
    let snapshot = snapshot(GameStatus::Playing, &[(0, 0)], (1, 1), 8);
    let lines = render(&snapshot, CharDimensions::new(3, 2));

    assert_eq!(lines.len(), 16);
    assert_eq!(lines[0].len(), 24);
    // Food cell (1,1) covers rows 2-3, columns 3-5
    assert_eq!(&lines[2][3..6], &['●', ' ', '●']);
    assert_eq!(&lines[3][3..6], &[' ', '●', ' ']);
    assert_eq!(&lines[0][0..3], &['█', '█', '█']);
}
