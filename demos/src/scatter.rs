//! Random obstacle placement.

use pathviz_core::{Coord, Grid};
use rand::{Rng, RngExt};

/// Re-roll every cell except those in `keep`: each becomes an obstacle with
/// probability `density`, otherwise free. Returns the number of obstacles.
pub fn scatter_obstacles(
    grid: &mut Grid,
    rng: &mut impl Rng,
    density: f64,
    keep: &[Coord],
) -> usize {
    let cells: Vec<Coord> = grid.bounds().iter().collect();
    let mut placed = 0;
    for c in cells {
        if keep.contains(&c) {
            continue;
        }
        let r: f64 = rng.random();
        let obstacle = r < density;
        grid.set_obstacle(c, obstacle);
        placed += usize::from(obstacle);
    }
    placed
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use super::*;

    #[test]
    fn kept_cells_stay_free() {
        let mut grid = Grid::new(10, 10);
        let keep = [Coord::new(0, 0), Coord::new(9, 9)];
        let mut rng = StdRng::seed_from_u64(7);
        scatter_obstacles(&mut grid, &mut rng, 1.0, &keep);
        assert_eq!(grid.obstacle_count(), 98);
        assert!(!grid.is_obstacle(keep[0]));
        assert!(!grid.is_obstacle(keep[1]));
    }

    #[test]
    fn zero_density_clears_previous_obstacles() {
        let mut grid = Grid::parse("###\n###").unwrap();
        let mut rng = StdRng::seed_from_u64(1);
        let placed = scatter_obstacles(&mut grid, &mut rng, 0.0, &[]);
        assert_eq!(placed, 0);
        assert_eq!(grid.obstacle_count(), 0);
    }

    #[test]
    fn same_seed_same_layout() {
        let mut a = Grid::new(12, 12);
        let mut b = Grid::new(12, 12);
        scatter_obstacles(&mut a, &mut StdRng::seed_from_u64(42), 0.3, &[]);
        scatter_obstacles(&mut b, &mut StdRng::seed_from_u64(42), 0.3, &[]);
        assert_eq!(a, b);
        assert!(a.obstacle_count() > 0);
        assert!(a.obstacle_count() < a.len());
    }
}
