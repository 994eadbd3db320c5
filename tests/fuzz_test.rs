/// Fuzzes the flood fill by comparing it on many random cost grids against a brute-force
/// relaxation that repeats until nothing changes. Both single and multiple sources are tested.
use grid_distance_map::{
    multi_source_distance_map, single_source_distance_map, FieldSelector, Grid, Neighbor,
    TileSource, TileTable, TileValue, DIAGONAL_PENALTY, IMPASSABLE_COST,
};
use rand::prelude::*;
use std::cell::RefCell;
use std::collections::HashSet;

const EPS: f64 = 1e-9;

fn random_tiles(w: usize, h: usize, rng: &mut StdRng) -> TileTable {
    let rows: Vec<Vec<TileValue>> = (0..h)
        .map(|_| {
            (0..w)
                .map(|_| match rng.gen_range(0..6) {
                    0 => TileValue::Bool(true),
                    1 => TileValue::Bool(false),
                    2 => TileValue::Number(0.5),
                    3 => TileValue::Number(2.0),
                    4 => TileValue::Number(rng.gen_range(0.0..4.0)),
                    _ => TileValue::Number(1.0),
                })
                .collect()
        })
        .collect();
    TileTable::from_rows(&rows).unwrap()
}

fn tile_cost(value: TileValue) -> f64 {
    match value {
        TileValue::Bool(true) => IMPASSABLE_COST,
        TileValue::Bool(false) => 1.0,
        TileValue::Number(n) => n,
    }
}

/// Relaxes every edge until a fixed point is reached.
fn brute_force(tiles: &TileTable, initial: Vec<Vec<f64>>) -> Vec<Vec<f64>> {
    let (w, h) = (tiles.width(), tiles.height());
    let mut dist = initial;
    let probe = Grid::filled(w, h, 0.0).unwrap();
    let mut changed = true;
    while changed {
        changed = false;
        for x in 1..=w as u16 {
            for y in 1..=h as u16 {
                let here = dist[x as usize - 1][y as usize - 1];
                for Neighbor { x: nx, y: ny, diagonal } in probe.neighbors(x, y) {
                    let step = tiles
                        .lookup(nx, ny, &FieldSelector::Whole)
                        .map_or(0.0, tile_cost);
                    let mut candidate = here + step;
                    if diagonal {
                        candidate += DIAGONAL_PENALTY;
                    }
                    let there = &mut dist[nx as usize - 1][ny as usize - 1];
                    if candidate < *there - EPS {
                        *there = candidate;
                        changed = true;
                    }
                }
            }
        }
    }
    dist
}

fn assert_close(actual: &[Vec<Option<f64>>], expected: &[Vec<f64>]) {
    assert_eq!(actual.len(), expected.len());
    for (column, expected_column) in actual.iter().zip(expected) {
        for (a, e) in column.iter().zip(expected_column) {
            let a = a.expect("distance maps have no unset cells");
            assert!((a - e).abs() < 1e-6, "{a} != {e}");
        }
    }
}

#[test]
fn fuzz_single_source() {
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(0);
    for _ in 0..N_GRIDS {
        let (w, h) = (rng.gen_range(1..10), rng.gen_range(1..10));
        let tiles = random_tiles(w, h, &mut rng);
        let (x, y) = (rng.gen_range(1..=w as u16), rng.gen_range(1..=h as u16));
        let maxcost = rng.gen_range(1.0..20.0);

        let mut cost = Grid::bound_to_source(&tiles, FieldSelector::Whole, 0.0).unwrap();
        let dist = single_source_distance_map(&mut cost, x, y, maxcost).unwrap();

        let mut initial = vec![vec![maxcost; h]; w];
        initial[x as usize - 1][y as usize - 1] = 0.0;
        assert_close(&dist.export(), &brute_force(&tiles, initial));
    }
}

#[test]
fn fuzz_multi_source() {
    const N_GRIDS: usize = 300;
    let mut rng = StdRng::seed_from_u64(1);
    for _ in 0..N_GRIDS {
        let (w, h) = (rng.gen_range(1..10), rng.gen_range(1..10));
        let tiles = random_tiles(w, h, &mut rng);
        let maxcost = rng.gen_range(1.0..20.0);

        let mut seeds = Grid::filled(w, h, maxcost).unwrap();
        let mut initial = vec![vec![maxcost; h]; w];
        for _ in 0..rng.gen_range(1..4) {
            let (x, y) = (rng.gen_range(1..=w as u16), rng.gen_range(1..=h as u16));
            let value = rng.gen_range(0.0..maxcost);
            seeds.write(x, y, value).unwrap();
            initial[x as usize - 1][y as usize - 1] = value;
        }

        let mut cost = Grid::bound_to_source(&tiles, FieldSelector::Whole, 0.0).unwrap();
        let dist = multi_source_distance_map(&mut cost, seeds, maxcost).unwrap();
        assert_close(&dist.export(), &brute_force(&tiles, initial));
    }
}

/// Every lookup lands inside the grid and no cell is looked up twice.
#[test]
fn fuzz_lookups() {
    struct Recorder {
        tiles: TileTable,
        seen: RefCell<Vec<(u16, u16)>>,
    }
    impl TileSource for Recorder {
        fn width(&self) -> usize {
            self.tiles.width()
        }
        fn height(&self) -> usize {
            self.tiles.height()
        }
        fn lookup(&self, x: u16, y: u16, selector: &FieldSelector) -> Option<TileValue> {
            self.seen.borrow_mut().push((x, y));
            self.tiles.lookup(x, y, selector)
        }
    }

    let mut rng = StdRng::seed_from_u64(2);
    for _ in 0..100 {
        let (w, h) = (rng.gen_range(1..12), rng.gen_range(1..12));
        let recorder = Recorder {
            tiles: random_tiles(w, h, &mut rng),
            seen: RefCell::new(Vec::new()),
        };
        let mut cost = Grid::bound_to_source(&recorder, FieldSelector::Whole, 0.0).unwrap();
        for _ in 0..3 {
            let (x, y) = (rng.gen_range(1..=w as u16), rng.gen_range(1..=h as u16));
            single_source_distance_map(&mut cost, x, y, 30.0).unwrap();
        }
        let seen = recorder.seen.borrow();
        assert!(seen
            .iter()
            .all(|&(x, y)| x >= 1 && y >= 1 && x as usize <= w && y as usize <= h));
        let distinct: HashSet<_> = seen.iter().collect();
        assert_eq!(distinct.len(), seen.len());
    }
}
