use rand::Rng;
use std::collections::BTreeSet;

use super::state::{Face, GridPosition};

/// Pick a uniformly random cell anywhere on the cube
pub fn random_position<R: Rng + ?Sized>(rng: &mut R, grid_size: usize) -> GridPosition {
    let n = grid_size as i32;
    let face = Face::ALL[rng.gen_range(0..Face::ALL.len())];
    GridPosition::new(face, rng.gen_range(0..n), rng.gen_range(0..n))
}

/// Draw `count` distinct cells that are not in `occupied`
///
/// Every drawn cell is added to `occupied`, so consecutive calls never hand
/// out the same cell twice. The caller must leave at least `count` free cells.
pub fn plant<R: Rng + ?Sized>(
    rng: &mut R,
    grid_size: usize,
    count: usize,
    occupied: &mut BTreeSet<GridPosition>,
) -> BTreeSet<GridPosition> {
    let mut planted = BTreeSet::new();

    while planted.len() < count {
        let pos = random_position(rng, grid_size);

        // do not plant on top of other objects
        if occupied.insert(pos) {
            planted.insert(pos);
        }
    }

    planted
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_random_position_in_range() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            assert!(random_position(&mut rng, 5).is_within(5));
        }
    }

    #[test]
    fn test_random_position_reaches_every_face() {
        let mut rng = StdRng::seed_from_u64(11);
        let faces: BTreeSet<Face> = (0..500)
            .map(|_| random_position(&mut rng, 4).face)
            .collect();
        assert_eq!(faces.len(), 6);
    }

    #[test]
    fn test_plant_avoids_occupied_cells() {
        let mut rng = StdRng::seed_from_u64(3);
        let start = GridPosition::new(Face::Front, 0, 0);
        let mut occupied = BTreeSet::from([start]);

        let apples = plant(&mut rng, 4, 10, &mut occupied);
        let stones = plant(&mut rng, 4, 10, &mut occupied);

        assert_eq!(apples.len(), 10);
        assert_eq!(stones.len(), 10);
        assert!(apples.is_disjoint(&stones));
        assert!(!apples.contains(&start));
        assert!(!stones.contains(&start));
        assert_eq!(occupied.len(), 21);
    }

    #[test]
    fn test_plant_fills_the_whole_cube() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut occupied = BTreeSet::new();
        let cells = plant(&mut rng, 2, 24, &mut occupied);
        assert_eq!(cells.len(), 24);
    }

    #[test]
    fn test_same_seed_same_layout() {
        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);
        assert_eq!(
            plant(&mut a, 16, 10, &mut BTreeSet::new()),
            plant(&mut b, 16, 10, &mut BTreeSet::new())
        );
    }
}
