use std::collections::HashSet;

use log::debug;
use thiserror::Error;

use crate::util::RandomGenerator;
use crate::Position;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PlacementError {
    /// Every cell of the grid is occupied.
    #[error("no free cell left on a {grid_extent}x{grid_extent} board")]
    BoardFull { grid_extent: u32 },
    /// Free cells exist but sampling did not hit one within the attempt budget.
    #[error("no free cell found after {attempts} attempts")]
    AttemptsExhausted { attempts: u32 },
}

/// Samples a uniformly random free cell in `[0, grid_extent)²` by rejection.
///
/// Unguarded rejection sampling never finishes once the occupied set covers the grid, so the
/// full-board case is reported up front and sampling stops after `max_attempts` misses.
pub fn place_food<'a, R, I>(
    occupied: I,
    grid_extent: u32,
    max_attempts: u32,
    rng: &mut R,
) -> Result<Position, PlacementError>
where
    R: RandomGenerator + ?Sized,
    I: IntoIterator<Item = &'a Position>,
{
    let occupied: HashSet<Position> = occupied
        .into_iter()
        .filter(|p| p.in_grid(grid_extent))
        .copied()
        .collect();

    let cells = grid_extent as u64 * grid_extent as u64;
    if occupied.len() as u64 >= cells {
        return Err(PlacementError::BoardFull { grid_extent });
    }

    for attempt in 1..=max_attempts {
        let candidate = Position {
            x: rng.next_below(grid_extent) as i32,
            y: rng.next_below(grid_extent) as i32,
        };
        if !occupied.contains(&candidate) {
            debug!("placed food at {} after {} attempt(s)", candidate, attempt);
            return Ok(candidate);
        }
    }

    Err(PlacementError::AttemptsExhausted { attempts: max_attempts })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PseudoRandom;

    /// Replays a fixed list of values, then repeats the last one.
    struct Scripted(Vec<u32>, usize);

    impl RandomGenerator for Scripted {
        fn next_u32(&mut self) -> u32 {
            let value = self.0[self.1.min(self.0.len() - 1)];
            self.1 += 1;
            value
        }
    }

    #[test]
    fn test_rejects_occupied_candidates() {
        let occupied = [Position::new(1, 1), Position::new(2, 2)];
        // (1,1) then (2,2) are rejected, (3,4) is accepted
        let mut rng = Scripted(vec![1, 1, 2, 2, 3, 4], 0);
        let placed = place_food(&occupied, 10, 100, &mut rng).unwrap();
        assert_eq!(placed, Position::new(3, 4));
    }

    #[test]
    fn test_never_returns_occupied_cell() {
        let grid_extent = 12u32;
        let cells = grid_extent * grid_extent;
        let mut rng = PseudoRandom::new(0xC0FFEE);

        for round in 0..1000u32 {
            let target = rng.next_below(cells - 1) as usize;
            let mut occupied = HashSet::new();
            while occupied.len() < target {
                occupied.insert(Position::new(
                    rng.next_below(grid_extent) as i32,
                    rng.next_below(grid_extent) as i32,
                ));
            }

            let placed = place_food(&occupied, grid_extent, u32::MAX, &mut rng)
                .unwrap_or_else(|e| panic!("round {round}: {e}"));
            assert!(placed.in_grid(grid_extent));
            assert!(!occupied.contains(&placed), "round {round}: {placed} is occupied");
        }
    }

    #[test]
    fn test_full_board_reported() {
        let occupied: Vec<_> = (0..8)
            .flat_map(|x| (0..8).map(move |y| Position::new(x, y)))
            .collect();
        let mut rng = PseudoRandom::new(1);
        assert_eq!(
            place_food(&occupied, 8, 1000, &mut rng),
            Err(PlacementError::BoardFull { grid_extent: 8 })
        );
    }

    #[test]
    fn test_out_of_grid_cells_do_not_count() {
        // A head that has left the board does not make the grid look full
        let mut occupied: Vec<_> = (0..8)
            .flat_map(|x| (0..8).map(move |y| Position::new(x, y)))
            .filter(|p| *p != Position::new(7, 7))
            .collect();
        occupied.push(Position::new(-1, 3));
        let mut rng = PseudoRandom::new(3);
        assert_eq!(place_food(&occupied, 8, 100_000, &mut rng), Ok(Position::new(7, 7)));
    }

    #[test]
    fn test_attempt_guard() {
        let occupied = [Position::new(0, 0)];
        let mut rng = Scripted(vec![0], 0);
        assert_eq!(
            place_food(&occupied, 8, 5, &mut rng),
            Err(PlacementError::AttemptsExhausted { attempts: 5 })
        );
    }
}
