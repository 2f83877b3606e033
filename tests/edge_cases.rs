use wayfinder::names::normalize;
use wayfinder::prelude::*;
use wayfinder::{GraphBuilder, NameIndex, TileIndex, WayfinderError};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn unit_image() -> Bounds {
    Bounds::new(0.0, 1.0, 1.0, 0.0)
}

/// Lookup ignores case, punctuation and extra spaces
#[test]
fn test_lookup_exact_ignores_punctuation() {
    let mut names = NameIndex::new();
    names.register("Soda Hall", 7);

    for query in ["Soda Hall", "soda hall", "SODA HALL", "soda   hall!!", " Soda Hall?"] {
        assert_eq!(names.lookup_exact(query), Some("Soda Hall"), "{query:?}");
    }
    assert_eq!(names.lookup_exact("soda"), None);
}

/// Every autocomplete result starts with the normalized prefix
#[test]
fn test_autocomplete_results_match_prefix() {
    let all = [
        "Soda Hall",
        "Sod Farm",
        "Sather Gate",
        "Cory Hall",
        "Top Dog",
        "Toppings & Co.",
        "Peet's Coffee",
    ];
    let mut names = NameIndex::new();
    for (id, name) in all.iter().enumerate() {
        names.register(name, id as NodeId);
    }

    for prefix in ["", "s", "SO", "soda ", "top", "peets", "c", "x", "!!"] {
        let wanted = normalize(prefix);
        for hit in names.autocomplete(prefix) {
            assert!(
                normalize(hit).starts_with(&wanted),
                "{hit:?} does not start with {wanted:?}"
            );
        }
    }

    assert_eq!(names.autocomplete(""), all.to_vec());
    assert_eq!(names.autocomplete("soda "), vec!["Soda Hall"]);
    assert!(names.autocomplete("x").is_empty());
}

/// Names without letters are still returned for the empty prefix
#[test]
fn test_letterless_names_match_empty_prefix() {
    let mut builder = RoadMap::builder();
    builder.add_node(Node::new(1, 0.0, 0.0).with_name("Soda Hall"));
    builder.add_node(Node::new(2, 1.0, 0.0).with_name("42"));
    let map = builder.build().unwrap();

    assert_eq!(map.autocomplete(""), vec!["Soda Hall", "42"]);
    assert_eq!(map.autocomplete("s"), vec!["Soda Hall"]);
    assert_eq!(map.lookup_exact("!!"), Some("42"));
    assert_eq!(map.locations("42")[0].id(), 2);
}

/// Non-ASCII letters are stripped rather than preserved
#[test]
fn test_unicode_is_stripped() {
    let mut names = NameIndex::new();
    names.register("Café Strada", 1);
    assert_eq!(names.lookup_exact("caf strada"), Some("Café Strada"));
    assert_eq!(names.autocomplete("café"), vec!["Café Strada"]);
}

/// A-B-C and A-C have the same length; either is acceptable
#[test]
fn test_equal_cost_route() {
    init_logging();
    let mut builder = RoadMap::builder();
    builder.add_node(Node::new(1, 0.0, 0.0));
    builder.add_node(Node::new(2, 1.0, 0.0));
    builder.add_node(Node::new(3, 2.0, 0.0));
    builder.add_way(&[1, 2, 3]);
    builder.add_way(&[1, 3]);
    let map = builder.build().unwrap();

    let route = map.route(0.0, 0.0, 2.0, 0.0).unwrap();
    assert!(route.nodes() == [1, 2, 3] || route.nodes() == [1, 3]);
    assert!((route.distance() - 2.0).abs() < 1e-9);
}

/// Disconnected components never produce a partial path
#[test]
fn test_disconnected_route_is_empty() {
    init_logging();
    let mut builder = RoadMap::builder();
    for (id, lon, lat) in [(1, 0.0, 0.0), (2, 1.0, 0.0), (3, 10.0, 10.0), (4, 11.0, 10.0)] {
        builder.add_node(Node::new(id, lon, lat));
    }
    builder.add_way(&[1, 2]);
    builder.add_way(&[3, 4]);
    let map = builder.build().unwrap();

    let route = map.route(0.0, 0.0, 11.0, 10.0).unwrap();
    assert!(route.is_empty());
    assert!(map.route_between(2, 3).unwrap().is_empty());
}

/// Routing on an empty map is a state error, not an empty route
#[test]
fn test_route_on_empty_map() {
    let map = RoadMap::builder().build().unwrap();
    assert!(matches!(
        map.route(0.0, 0.0, 1.0, 1.0),
        Err(WayfinderError::InvalidState(_))
    ));
}

/// Coarse resolution over the whole image yields the four depth-1 tiles
#[test]
fn test_coarse_query_returns_root_children() {
    let index = TileIndex::new(unit_image(), &TileConfig::default()).unwrap();
    let tiles = index.query(&unit_image(), 1.0);

    let ids: Vec<&str> = tiles.iter().map(|t| t.image_id()).collect();
    assert_eq!(ids, vec!["3", "4", "1", "2"]);
    assert!(tiles.iter().all(|t| t.depth() == 1));
}

/// Zero resolution yields only leaves, sorted by north then west
#[test]
fn test_fine_query_returns_sorted_leaves() {
    let index = TileIndex::new(unit_image(), &TileConfig::default()).unwrap();
    let viewport = Bounds::new(0.30, 0.70, 0.40, 0.60);
    let tiles = index.query(&viewport, 0.0);

    assert!(!tiles.is_empty());
    assert!(tiles.iter().all(|t| t.depth() == index.depth()));
    assert!(tiles.iter().all(|t| t.bounds().overlaps(&viewport)));
    for pair in tiles.windows(2) {
        let (a, b) = (pair[0].bounds(), pair[1].bounds());
        assert!(a.north < b.north || (a.north == b.north && a.west < b.west));
    }

    let negative = index.query(&viewport, -1.0);
    assert_eq!(negative, tiles);
}

/// A viewport entirely outside the image selects nothing
#[test]
fn test_viewport_outside_image() {
    let index = TileIndex::new(unit_image(), &TileConfig::default()).unwrap();
    assert!(index.query(&Bounds::new(2.0, 3.0, 3.0, 2.0), 0.0).is_empty());
}

/// Adding a node twice changes neither node count nor neighbors
#[test]
fn test_add_node_is_idempotent() {
    let mut builder = GraphBuilder::new();
    assert!(builder.add_node(Node::new(1, 0.0, 0.0)));
    builder.add_node(Node::new(2, 1.0, 0.0));
    builder.add_way(&[1, 2]);

    assert!(!builder.add_node(Node::new(1, 5.0, 5.0)));
    let graph = builder.build();
    assert_eq!(graph.len(), 2);
    assert_eq!(graph.neighbors(1).collect::<Vec<_>>(), vec![2]);
    assert_eq!(graph.node(1).unwrap().lon(), 0.0);
}

/// Every edge appears in both endpoints' neighbor lists
#[test]
fn test_adjacency_is_symmetric() {
    init_logging();
    let mut builder = GraphBuilder::new();
    for id in 0..20 {
        builder.add_node(Node::new(id, (id % 5) as f64, (id / 5) as f64));
    }
    builder.add_way(&[0, 1, 2, 3, 4, 9, 14, 19]);
    builder.add_way(&[0, 5, 10, 15, 16, 17, 18, 19]);
    builder.add_way(&[2, 7, 12, 17, 2]);
    builder.add_way(&[6, 6, 99, 11]);
    let graph = builder.build();

    for node in graph.nodes() {
        for neighbor in graph.neighbors(node.id()) {
            assert!(
                graph.neighbors(neighbor).any(|back| back == node.id()),
                "{} -> {} has no reverse edge",
                node.id(),
                neighbor
            );
        }
    }
}
