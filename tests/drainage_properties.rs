//! Run with: `cargo test --test drainage_properties`

use drainage::{
    geometry::Cell, solver::SolverOptions, volume::trapped_volume, DrainOptions, Elevation, Island,
    Terrain, TieBreak, Volume,
};
use proptest::prelude::*;

fn island(width: usize, height: usize, elevation: impl Fn(usize, usize) -> Elevation) -> Island {
    let rows: Vec<Vec<Elevation>> = (0..height)
        .map(|row| (0..width).map(|col| elevation(row, col)).collect())
        .collect();
    Terrain::from_rows(width, height, &rows).unwrap().into()
}

fn grid() -> impl Strategy<Value = (usize, usize, Vec<Elevation>)> {
    (1usize..=5, 1usize..=5).prop_flat_map(|(width, height)| {
        (
            Just(width),
            Just(height),
            prop::collection::vec(0..10 as Elevation, width * height),
        )
    })
}

/// Plateaus of a single height over sea-level ground.
fn two_level_grid() -> impl Strategy<Value = (usize, usize, Vec<Elevation>)> {
    (1usize..=5, 1usize..=5, 1..10 as Elevation).prop_flat_map(|(width, height, high)| {
        (
            Just(width),
            Just(height),
            prop::collection::vec(prop_oneof![Just(0), Just(high)], width * height),
        )
    })
}

fn small_grid() -> impl Strategy<Value = (usize, usize, Vec<Elevation>)> {
    (1usize..=3, 1usize..=3).prop_flat_map(|(width, height)| {
        (
            Just(width),
            Just(height),
            prop::collection::vec(0..10 as Elevation, width * height),
        )
    })
}

fn volume_with(width: usize, height: usize, elevations: &[Elevation], tie_break: TieBreak) -> Volume {
    let mut island = island(width, height, |row, col| elevations[row * width + col]);
    let options = DrainOptions {
        tie_break,
        ..DrainOptions::default()
    };
    island.drain(options).unwrap().volume
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn flat_terrain_traps_nothing(width in 1usize..=6, height in 1usize..=6, level in 0..100 as Elevation) {
        let mut island = island(width, height, |_, _| level);
        let drainage = island.drain(DrainOptions::default()).unwrap();
        prop_assert_eq!(drainage.volume, 0);
        prop_assert_eq!(drainage.basins, 0);
    }

    #[test]
    fn single_pit_traps_rim_minus_pit(rim in 1..50 as Elevation, depth in 1..50 as Elevation) {
        let pit = rim.saturating_sub(depth);
        let mut island = island(3, 3, |row, col| if (row, col) == (1, 1) { pit } else { rim });
        let drainage = island.drain(DrainOptions::default()).unwrap();
        prop_assert_eq!(drainage.volume, u64::from(rim - pit));
    }

    #[test]
    fn slope_away_from_edge_traps_nothing(width in 1usize..=6, height in 1usize..=6, step in 1..5 as Elevation) {
        let mut island = island(width, height, |row, col| 1 + step * (row * width + col) as Elevation);
        let drainage = island.drain(DrainOptions::default()).unwrap();
        prop_assert_eq!(drainage.volume, 0);
    }

    #[test]
    fn rising_profile_traps_nothing(mut profile in prop::collection::vec(0..1000 as Elevation, 1..20)) {
        profile.sort_unstable();
        profile.dedup();
        prop_assert_eq!(trapped_volume(&profile), 0);
    }

    #[test]
    fn tie_break_does_not_change_two_level_volume((width, height, elevations) in two_level_grid()) {
        prop_assert_eq!(
            volume_with(width, height, &elevations, TieBreak::RowMajor),
            volume_with(width, height, &elevations, TieBreak::ReverseRowMajor)
        );
    }

    #[test]
    fn tie_break_does_not_change_small_grid_volume((width, height, elevations) in small_grid()) {
        prop_assert_eq!(
            volume_with(width, height, &elevations, TieBreak::RowMajor),
            volume_with(width, height, &elevations, TieBreak::ReverseRowMajor)
        );
    }

    #[test]
    fn filled_basin_drains_freely((width, height, elevations) in grid()) {
        let mut island = island(width, height, |row, col| elevations[row * width + col]);
        let source = island
            .terrain()
            .interior_cells()
            .min_by_key(|&cell| (island.terrain().elevation(cell), cell))
            .unwrap();
        if island.drain_cell(source, SolverOptions::default()).unwrap().is_some() {
            let paths = island.solve_from(source, SolverOptions::default()).unwrap();
            prop_assert_eq!(paths.distance_to_sea(), Some(0));
        }
    }

    #[test]
    fn free_draining_source_is_untouched((width, height, elevations) in grid(), pick in any::<prop::sample::Index>()) {
        let mut island = island(width, height, |row, col| elevations[row * width + col]);
        let cells: Vec<Cell> = island.terrain().interior_cells().collect();
        let source = cells[pick.index(cells.len())];
        let free = island
            .solve_from(source, SolverOptions::default())
            .unwrap()
            .distance_to_sea()
            == Some(0);
        if free {
            let before = island.terrain().clone();
            prop_assert!(island.drain_cell(source, SolverOptions::default()).unwrap().is_none());
            prop_assert_eq!(island.terrain(), &before);
        }
    }

    #[test]
    fn drained_terrain_never_sinks_below_the_original_minimum((width, height, elevations) in grid()) {
        let mut island = island(width, height, |row, col| elevations[row * width + col]);
        let lowest = elevations.iter().copied().min().unwrap_or_default();
        island.drain(DrainOptions::default()).unwrap();
        let terrain = island.terrain();
        prop_assert!(terrain.interior_cells().all(|cell| terrain.elevation(cell) >= lowest));
    }
}
