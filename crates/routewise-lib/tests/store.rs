mod common;

use common::{SeededDatabase, ABU_DHABI, DUBAI, FUJAIRAH, SHARJAH};
use routewise_lib::{
    compare_by_alternative_criteria, find_best_by_distance, ComparisonSummary, Error, NewLink,
    RouteRequest, SearchStrategy, Store, TransportMode, WeightSelector,
};

#[test]
fn seeded_store_resolves_routes_end_to_end() {
    let db = SeededDatabase::new();
    let network = db.open().load_network().expect("load network");
    assert_eq!(network.locations.len(), 4);
    assert_eq!(network.links.len(), 3);

    let request = RouteRequest::new(DUBAI, ABU_DHABI);
    let best = find_best_by_distance(&network, &request).expect("distance route");
    assert_eq!(best.total_distance, 140.0);

    let options = compare_by_alternative_criteria(&network, &request).expect("comparison");
    let hops: Vec<_> = options.iter().map(|r| r.hop_count()).collect();
    assert_eq!(hops, vec![1, 2, 2]);

    let text = ComparisonSummary::from_results(DUBAI, ABU_DHABI, &options).render_plain();
    assert!(text.contains("Fastest route from Dubai to AbuDhabi"));
    assert!(text.contains("Cheapest route from Dubai to AbuDhabi"));
    assert!(text.contains("Sharjah -> AbuDhabi (160.0 km by BUS, 160 min)"));
}

#[test]
fn heap_strategy_matches_default_through_store() {
    let db = SeededDatabase::new();
    let network = db.open().load_network().expect("load network");
    let request = RouteRequest::new(SHARJAH, ABU_DHABI);
    let scan = compare_by_alternative_criteria(&network, &request).expect("scan");
    let heap = compare_by_alternative_criteria(
        &network,
        &request.clone().with_strategy(SearchStrategy::Heap),
    )
    .expect("heap");
    assert_eq!(scan, heap);
}

#[test]
fn persisted_link_becomes_routable() {
    let db = SeededDatabase::new();
    let store = db.open();
    let link = store
        .persist_link(&NewLink {
            from_city: SHARJAH.to_string(),
            to_city: FUJAIRAH.to_string(),
            distance: 110.0,
            mode: "metro".to_string(),
        })
        .expect("persist link");
    assert_eq!(link.mode, TransportMode::Metro);

    let mut store = store;
    let network = store.load_network().expect("reload");
    let route = find_best_by_distance(&network, &RouteRequest::new(DUBAI, FUJAIRAH))
        .expect("now reachable");
    assert_eq!(route.total_distance, 140.0);
    assert_eq!(route.criterion, WeightSelector::Distance);

    let records = store.fetch_links_with_names().expect("records");
    assert_eq!(records[0].from_city, SHARJAH);
    assert_eq!(records[0].to_city, FUJAIRAH);
    assert!((records[0].time_minutes - 82.5).abs() < 1e-9);
}

#[test]
fn persisting_rejects_unknown_city_and_bad_values() {
    let store = Store::in_memory().expect("store");
    store.add_location(DUBAI).expect("seed");
    store.add_location(SHARJAH).expect("seed");

    let base = NewLink {
        from_city: DUBAI.to_string(),
        to_city: SHARJAH.to_string(),
        distance: 30.0,
        mode: "CAR".to_string(),
    };

    let err = store
        .persist_link(&NewLink {
            to_city: "Sharjha".to_string(),
            ..base.clone()
        })
        .unwrap_err();
    assert!(matches!(err, Error::UnknownLocation { ref suggestions, .. } if suggestions[0] == SHARJAH));

    let err = store
        .persist_link(&NewLink {
            distance: -3.0,
            ..base.clone()
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDistance { .. }));

    let err = store
        .persist_link(&NewLink {
            distance: 1e308,
            ..base.clone()
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidDistance { .. }));

    let err = store
        .persist_link(&NewLink {
            mode: "FERRY".to_string(),
            ..base
        })
        .unwrap_err();
    assert!(matches!(err, Error::InvalidMode { mode } if mode == "FERRY"));
    assert!(store.fetch_links().expect("links").is_empty());
}

#[test]
fn opening_missing_database_is_reported() {
    let dir = tempfile::tempdir().expect("temp dir");
    let path = dir.path().join("absent.db");
    let err = Store::open(&path).err().expect("missing database");
    assert!(matches!(err, Error::DatabaseNotFound { path: reported } if reported == path));
}
