use crate::Position;

/// Width and height of the square board in pixels. Grid extent is derived from this.
pub const BOARD_PIXEL_EXTENT: u32 = 600;

/// Default cell size in pixels (30x30 grid).
pub const DEFAULT_CELL_SIZE_PX: u32 = 20;

/// Default user-facing speed number. Base speed is `speed_base / 10` ticks per second.
pub const DEFAULT_SPEED_BASE: f64 = 100.0;

/// Divisor turning `speed_base` into the starting tick rate.
pub const BASE_SPEED_DIVISOR: f64 = 10.0;

/// Smallest accepted `speed_base`: one tick every ten seconds.
pub const MIN_SPEED_BASE: f64 = 1.0;

/// Divisor turning `speed_base` into the tick rate gained per food eaten.
pub const SPEED_INCREMENT_DIVISOR: f64 = 1000.0;

/// Body every new game starts with, head first.
pub const INITIAL_BODY: [Position; 3] = [
    Position { x: 5, y: 5 },
    Position { x: 5, y: 6 },
    Position { x: 5, y: 7 },
];

/// Smallest grid that still contains the initial body.
pub const MIN_GRID_EXTENT: u32 = 8;

/// Food placement gives up after `grid cells * this` rejected samples.
pub const PLACEMENT_ATTEMPTS_PER_CELL: u32 = 64;
