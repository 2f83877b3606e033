use std::sync::Arc;
use std::thread;
use wayfinder::prelude::*;
use wayfinder::{BuildStats, WayfinderError};

const IMAGE: Bounds = Bounds::new(-122.2998, 37.8922, -122.2110, 37.8228);

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// A small grid of streets around campus with a few named places and
/// some ways that should be filtered out.
fn campus_map(config: Config) -> RoadMap {
    init_logging();
    let mut builder = RoadMap::builder().config(config).tile_bounds(IMAGE);

    // 4x4 street grid, ids 100..116, spacing 0.01 degrees.
    for row in 0..4 {
        for col in 0..4 {
            let id = 100 + row * 4 + col;
            builder.add_node(Node::new(
                id,
                -122.28 + col as f64 * 0.01,
                37.84 + row as f64 * 0.01,
            ));
        }
    }
    for row in 0..4 {
        let street: Vec<NodeId> = (0..4).map(|col| 100 + row * 4 + col).collect();
        builder.add_tagged_way(&street, "residential");
    }
    for col in 0..4 {
        let avenue: Vec<NodeId> = (0..4).map(|row| 100 + row * 4 + col).collect();
        builder.add_tagged_way(&avenue, "secondary");
    }

    // A footpath shortcut across the grid must not be routable.
    builder.add_tagged_way(&[100, 115], "footway");
    // Refers to a node that was never added.
    builder.add_tagged_way(&[115, 999], "tertiary");

    // Places hang off grid intersections.
    builder.add_node(Node::new(1, -122.2585, 37.8702).with_name("Soda Hall"));
    builder.add_node(Node::new(2, -122.2590, 37.8699).with_name("Sather Gate"));
    builder.add_node(Node::new(3, -122.2588, 37.8755).with_name("Top Dog"));
    builder.add_node(Node::new(4, -122.2700, 37.8400).with_name("Top Dog"));
    builder.add_node(Node::new(5, -122.2500, 37.8600));
    builder.register_name(5, "Cory Hall");
    builder.add_way(&[1, 115]);
    builder.add_way(&[2, 114]);
    builder.add_way(&[4, 101]);

    builder.build().expect("campus map should build")
}

#[test]
fn test_route_across_grid() {
    let map = campus_map(Config::default());

    let route = map.route(-122.28, 37.84, -122.25, 37.87).unwrap();
    assert_eq!(route.nodes().first(), Some(&100));
    assert_eq!(route.nodes().last(), Some(&115));
    // Manhattan distance on the grid, since the footway is excluded.
    assert_eq!(route.len(), 7);
    assert!((route.distance() - 0.06).abs() < 1e-9);

    for pair in route.nodes().windows(2) {
        assert!(map.graph().neighbors(pair[0]).any(|n| n == pair[1]));
    }
}

#[test]
fn test_route_to_named_place() {
    let map = campus_map(Config::default());
    let soda = map.locations("Soda Hall")[0];

    let route = map.route(-122.2590, 37.8699, soda.lon(), soda.lat()).unwrap();
    assert_eq!(route.nodes(), &[2, 114, 115, 1]);
}

#[test]
fn test_name_queries() {
    let map = campus_map(Config::default());

    assert_eq!(map.autocomplete("s"), vec!["Soda Hall", "Sather Gate"]);
    assert_eq!(map.autocomplete("top d"), vec!["Top Dog"]);
    assert_eq!(map.lookup_exact("CORY hall"), Some("Cory Hall"));
    assert_eq!(map.nodes_for_name("Top Dog"), &[3, 4]);

    let coords: Vec<(f64, f64)> = map
        .locations("Top Dog")
        .iter()
        .map(|n| (n.lon(), n.lat()))
        .collect();
    assert_eq!(coords, vec![(-122.2588, 37.8755), (-122.2700, 37.8400)]);
}

#[test]
fn test_build_stats() {
    let map = campus_map(Config::default());
    let stats = map.stats();

    assert_eq!(
        *stats,
        BuildStats {
            nodes: 21,
            edges: 27,
            names: 4,
            trie_nodes: stats.trie_nodes,
            tiles: 21845,
            malformed_refs: 1,
            ignored_ways: 1,
            pruned_nodes: 0,
        }
    );
}

#[test]
fn test_prune_isolated_keeps_names_searchable() {
    let map = campus_map(Config::default().with_prune_isolated(true));

    // Top Dog (3) and Cory Hall (5) are not on any way.
    assert_eq!(map.stats().pruned_nodes, 2);
    assert_eq!(map.graph().len(), 19);
    assert_eq!(map.autocomplete("cory"), vec!["Cory Hall"]);
    assert!(map.locations("Cory Hall").is_empty());
    assert_eq!(map.locations("Top Dog").len(), 1);

    // Routing still snaps to the remaining nodes.
    let route = map.route(-122.2588, 37.8755, -122.28, 37.84).unwrap();
    assert_eq!(route.nodes().last(), Some(&100));
}

#[test]
fn test_tiles_for_viewport() {
    let map = campus_map(Config::default());
    let index = map.tiles().unwrap();
    let width = IMAGE.width();

    // Whole image at a coarse resolution: the four quadrants.
    let coarse = map.tiles_for(&IMAGE, width).unwrap();
    assert_eq!(coarse.len(), 4);
    assert_eq!(
        coarse.iter().map(|t| t.image_id()).collect::<Vec<_>>(),
        vec!["3", "4", "1", "2"]
    );

    // A small viewport at a resolution matching depth 3.
    let viewport = Bounds::new(-122.2700, 37.8700, -122.2600, 37.8600);
    let depth3 = width / 8.0 / f64::from(index.tile_size());
    let tiles = map.tiles_for(&viewport, depth3 * 1.01).unwrap();
    assert!(!tiles.is_empty());
    assert!(tiles.iter().all(|t| t.depth() == 3));
    assert!(tiles.iter().all(|t| t.image_id().len() == 3));

    let paths: Vec<String> = tiles
        .iter()
        .map(|t| t.image_path(&map.config().tiles))
        .collect();
    assert!(paths.iter().all(|p| p.starts_with("img/") && p.ends_with(".png")));
}

#[test]
fn test_tile_grid_covers_viewport() {
    let map = campus_map(Config::default());
    let viewport = Bounds::new(-122.2700, 37.8700, -122.2500, 37.8500);
    let grid = map.tile_grid(&viewport, 0.0).unwrap().unwrap();

    assert!(grid.bounds().contains(viewport.west, viewport.north));
    assert!(grid.bounds().contains(viewport.east, viewport.south));
    assert!(grid.rows().iter().all(|row| row.len() == grid.columns()));
    assert_eq!(grid.width_px(), grid.columns() as u64 * 256);
    for pair in grid.rows().windows(2) {
        assert!(pair[0][0].bounds().north > pair[1][0].bounds().north);
    }
}

#[test]
fn test_shallow_tile_config() {
    let config =
        Config::default().with_tiles(TileConfig::default().with_depth(2).with_tile_size(512));
    let map = campus_map(config);
    let index = map.tiles().unwrap();

    assert_eq!(index.len(), 21);
    assert_eq!(index.tile_size(), 512);
    let leaves = map.tiles_for(&IMAGE, 0.0).unwrap();
    assert_eq!(leaves.len(), 16);
    assert!(index.tile("24").is_some());
    assert!(index.tile("25").is_none());
}

#[test]
fn test_invalid_queries() {
    let map = campus_map(Config::default());

    assert!(matches!(
        map.route(f64::INFINITY, 37.85, -122.25, 37.87),
        Err(WayfinderError::InvalidInput { .. })
    ));
    assert!(matches!(
        map.route_between(100, 12345),
        Err(WayfinderError::InvalidInput { .. })
    ));
    let nan = Bounds::new(f64::NAN, 37.9, -122.2, 37.8);
    assert!(map.tiles_for(&nan, 0.001).unwrap().is_empty());
    assert!(map.autocomplete("zzz").is_empty());
    // The campus map has no letterless names, so nothing sits at the root.
    assert!(map.lookup_exact("").is_none());
}

#[test]
fn test_config_round_trip() {
    let config = Config::default()
        .with_prune_isolated(true)
        .with_tiles(TileConfig::default().with_depth(5));
    let json = config.to_json().unwrap();
    let parsed = Config::from_json(&json).unwrap();
    assert_eq!(parsed, config);

    let map = campus_map(parsed);
    assert_eq!(map.tiles().unwrap().depth(), 5);
}

#[test]
fn test_config_rejects_unknown_fields() {
    assert!(Config::from_json(r#"{"prune_isolated": true, "colour": "red"}"#).is_err());
}

#[test]
fn test_concurrent_queries() {
    let map = Arc::new(campus_map(Config::default()));
    let expected = map.route(-122.28, 37.84, -122.25, 37.87).unwrap();

    let handles: Vec<_> = (0..4)
        .map(|i| {
            let map = Arc::clone(&map);
            thread::spawn(move || {
                let route = map.route(-122.28, 37.84, -122.25, 37.87).unwrap();
                let tiles = map.tiles_for(&IMAGE, 0.001 * (i + 1) as f64).unwrap().len();
                let names = map.autocomplete("so").len();
                (route, tiles, names)
            })
        })
        .collect();

    for handle in handles {
        let (route, tiles, names) = handle.join().unwrap();
        assert_eq!(route, expected);
        assert!(tiles >= 4);
        assert_eq!(names, 1);
    }
}
