//! Tests for the streaming grid manager's spawn and eviction reconciliation

#[cfg(test)]
mod tests {
    use motifstream::ModelError;
    use motifstream::algorithm::selection::FixedSelector;
    use motifstream::io::configuration::StreamingConfig;
    use motifstream::spatial::grid::{GridCoord, StreamingWindow, WorldPosition};
    use motifstream::spatial::host::{RecordingHost, TileHost};
    use motifstream::spatial::streaming::StreamingGrid;
    use std::collections::HashSet;

    fn grid(radius: u32, grid_start: [i32; 2]) -> StreamingGrid<RecordingHost> {
        StreamingGrid::with_seed(
            RecordingHost::new(3),
            StreamingConfig::new(radius, grid_start),
            5,
        )
        .unwrap()
    }

    fn keys<H: TileHost>(grid: &StreamingGrid<H>) -> HashSet<GridCoord> {
        grid.active().keys().copied().collect()
    }

    fn window(center: GridCoord, radius: u32, grid_start: [i32; 2]) -> HashSet<GridCoord> {
        StreamingWindow::new(center, radius, GridCoord::from(grid_start)).required_set()
    }

    // Tests radius 1 at the origin makes exactly the 9 surrounding cells resident
    // Verified by iterating an exclusive radius
    #[test]
    fn test_initial_fill() {
        let mut grid = grid(1, [0, 0]);
        let report = grid.update(WorldPosition::new(0.5, 0.0, 0.5)).unwrap();

        assert_eq!(report.spawned.len(), 9);
        assert!(report.despawned.is_empty());
        assert_eq!(keys(&grid), window(GridCoord::ORIGIN, 1, [0, 0]));
        assert_eq!(grid.host().live_count(), 9);
    }

    // Tests a repeated update with the same position changes nothing
    // Verified by clearing the active map at the start of update
    #[test]
    fn test_idempotent_update() {
        let mut grid = grid(2, [0, 0]);
        let position = WorldPosition::new(3.2, 1.0, -1.4);
        grid.update(position).unwrap();
        let before = keys(&grid);

        let report = grid.update(position).unwrap();
        assert!(report.is_noop());
        assert_eq!(keys(&grid), before);
        assert_eq!(grid.host().total_spawned(), 25);
    }

    // Tests a jump beyond the radius replaces every cell in one update
    // Verified by evicting only cells adjacent to the new window
    #[test]
    fn test_teleport_replaces_window() {
        let mut grid = grid(1, [0, 0]);
        grid.update_cell(GridCoord::ORIGIN).unwrap();
        let report = grid.update_cell(GridCoord::new(5, 0)).unwrap();

        assert_eq!(report.spawned.len(), 9);
        assert_eq!(report.despawned.len(), 9);
        let spawned: HashSet<GridCoord> = report.spawned.iter().copied().collect();
        let despawned: HashSet<GridCoord> = report.despawned.iter().copied().collect();
        assert!(spawned.is_disjoint(&despawned));
        assert_eq!(keys(&grid), window(GridCoord::new(5, 0), 1, [0, 0]));
        assert_eq!(grid.host().live_count(), 9);
        assert_eq!(grid.host().total_destroyed(), 9);
    }

    // Tests a one-cell step only touches the leading and trailing columns
    // Verified by respawning cells that stay inside the window
    #[test]
    fn test_step_reuses_overlap() {
        let mut grid = grid(1, [0, 0]);
        grid.update_cell(GridCoord::ORIGIN).unwrap();
        let report = grid.update_cell(GridCoord::new(1, 0)).unwrap();

        let mut spawned = report.spawned.clone();
        spawned.sort_unstable();
        assert_eq!(
            spawned,
            vec![GridCoord::new(2, -1), GridCoord::new(2, 0), GridCoord::new(2, 1)]
        );
        assert_eq!(
            report.despawned,
            vec![
                GridCoord::new(-1, -1),
                GridCoord::new(-1, 0),
                GridCoord::new(-1, 1)
            ]
        );
    }

    // Tests convergence after every step of an arbitrary path
    // Verified by skipping the eviction pass
    #[test]
    fn test_convergence_over_path() {
        let mut grid = grid(2, [1, -3]);
        let path = [
            (0.0, 0.0),
            (0.9, 0.2),
            (1.1, 0.2),
            (-4.5, 7.9),
            (-4.5, 8.1),
            (100.0, -100.0),
            (0.0, 0.0),
        ];

        for (x, z) in path {
            grid.update(WorldPosition::new(x, -2.0, z)).unwrap();
            let center = GridCoord::from_planar(x, z).unwrap();
            assert_eq!(keys(&grid), window(center, 2, [1, -3]));
            assert_eq!(grid.len(), 25);
            assert_eq!(grid.host().live_count(), 25);
        }
    }

    // Tests radius 0 keeps only the reference cell, shifted by the grid start
    // Verified by ignoring the grid start
    #[test]
    fn test_radius_zero_with_grid_start() {
        let mut grid = grid(0, [2, 3]);
        grid.update(WorldPosition::new(2.5, 0.0, 3.5)).unwrap();
        assert_eq!(keys(&grid), HashSet::from([GridCoord::ORIGIN]));
    }

    // Tests instances are placed at (x, 0, z) of their cell
    // Verified by placing instances at the reference position
    #[test]
    fn test_spawn_positions() {
        let mut grid = StreamingGrid::new(
            RecordingHost::new(2),
            FixedSelector(1),
            StreamingConfig::new(0, [0, 0]),
        )
        .unwrap();
        grid.update(WorldPosition::new(-3.5, 9.0, 4.25)).unwrap();

        let handle = grid.active().get(&GridCoord::new(-4, 4)).copied().unwrap();
        let record = grid.host().live().get(&handle).copied().unwrap();
        assert_eq!(record.prototype, 1);
        assert_eq!(record.position, WorldPosition::new(-4.0, 0.0, 4.0));
    }

    // Tests an empty catalogue fails loudly without touching state
    // Verified by skipping spawns when the catalogue is empty
    #[test]
    fn test_empty_catalogue_fails() {
        let mut grid = StreamingGrid::with_seed(
            RecordingHost::new(0),
            StreamingConfig::new(1, [0, 0]),
            1,
        )
        .unwrap();

        assert!(matches!(
            grid.update(WorldPosition::default()),
            Err(ModelError::EmptyCatalogue)
        ));
        assert!(grid.is_empty());
    }

    // Tests positions without a grid cell are rejected
    // Verified by mapping NaN to cell 0
    #[test]
    fn test_invalid_position() {
        let mut grid = grid(1, [0, 0]);
        assert!(grid.update(WorldPosition::new(f64::NAN, 0.0, 0.0)).is_err());
        assert!(grid.is_empty());
    }

    // Tests windows crossing the i32 edge are rejected before any host call
    // Verified by spawning the wrapped window and evicting it in the same update
    #[test]
    fn test_window_past_grid_edge_rejected() {
        let mut shifted = grid(1, [i32::MIN, 0]);
        assert!(shifted.update_cell(GridCoord::ORIGIN).is_err());
        assert!(shifted.is_empty());
        assert_eq!(shifted.host().total_spawned(), 0);

        let mut grid = grid(1, [0, 0]);
        let edge = WorldPosition::new(2_147_483_647.5, 0.0, 0.0);

        for _ in 0..2 {
            assert!(matches!(
                grid.update(edge),
                Err(ModelError::InvalidParameter {
                    parameter: "reference_position",
                    ..
                })
            ));
        }
        assert!(grid.is_empty());
        assert_eq!(grid.host().total_spawned(), 0);
    }

    // Tests a window touching the i32 edge converges and then stays still
    // Verified by computing the window bounds with wrapping arithmetic
    #[test]
    fn test_window_at_grid_edge_idempotent() {
        let mut grid = grid(1, [0, 0]);
        let center = GridCoord::new(i32::MAX - 1, i32::MIN + 1);

        let report = grid.update_cell(center).unwrap();
        assert_eq!(report.spawned.len(), 9);
        assert!(report.despawned.is_empty());
        assert_eq!(keys(&grid), window(center, 1, [0, 0]));

        let report = grid.update_cell(center).unwrap();
        assert!(report.is_noop());
        assert_eq!(grid.len(), 9);
    }

    // Tests failed spawns leave the cell empty and are retried next update
    // Verified by inserting a placeholder for failed spawns
    #[test]
    fn test_failed_spawn_retried() {
        let mut host = RecordingHost::new(1);
        host.fail_prototype(0);
        let mut grid =
            StreamingGrid::new(host, FixedSelector(0), StreamingConfig::new(1, [0, 0])).unwrap();

        let report = grid.update_cell(GridCoord::ORIGIN).unwrap();
        assert_eq!(report.failed_spawns.len(), 9);
        assert!(!report.is_clean());
        assert!(grid.is_empty());

        grid.host_mut().clear_failures();
        let report = grid.update_cell(GridCoord::ORIGIN).unwrap();
        assert_eq!(report.spawned.len(), 9);
        assert!(report.is_clean());
        assert_eq!(grid.len(), 9);
    }

    // Tests failed destroys keep the handle resident until a later update succeeds
    // Verified by removing the entry before destroying it
    #[test]
    fn test_failed_despawn_kept() {
        let mut grid = grid(0, [0, 0]);
        grid.update_cell(GridCoord::ORIGIN).unwrap();
        let handle = grid.active().get(&GridCoord::ORIGIN).copied().unwrap();
        grid.host_mut().fail_destroy(handle);

        let report = grid.update_cell(GridCoord::new(3, 3)).unwrap();
        assert_eq!(report.failed_despawns, vec![GridCoord::ORIGIN]);
        assert!(grid.is_active(GridCoord::ORIGIN));
        assert!(grid.is_active(GridCoord::new(3, 3)));

        grid.host_mut().clear_failures();
        let report = grid.update_cell(GridCoord::new(3, 3)).unwrap();
        assert_eq!(report.despawned, vec![GridCoord::ORIGIN]);
        assert_eq!(keys(&grid), HashSet::from([GridCoord::new(3, 3)]));
    }

    // Tests clear destroys every resident instance
    // Verified by only removing map entries in clear
    #[test]
    fn test_clear() {
        let mut grid = grid(1, [0, 0]);
        grid.update_cell(GridCoord::new(-2, 2)).unwrap();
        let report = grid.clear();

        assert_eq!(report.despawned.len(), 9);
        assert!(grid.is_empty());
        assert_eq!(grid.host().live_count(), 0);
    }

    // Tests radius changes apply on the next update
    // Verified by applying the radius only to spawns
    #[test]
    fn test_set_radius() {
        let mut grid = grid(2, [0, 0]);
        grid.update_cell(GridCoord::ORIGIN).unwrap();
        assert_eq!(grid.len(), 25);

        grid.set_radius(1).unwrap();
        assert_eq!(grid.config().radius, 1);
        let report = grid.update_cell(GridCoord::ORIGIN).unwrap();
        assert_eq!(report.despawned.len(), 16);
        assert!(report.spawned.is_empty());
        assert_eq!(grid.len(), 9);

        assert!(grid.set_radius(u32::MAX).is_err());
        assert_eq!(grid.config().radius, 1);
    }
}
