use vpn_shell::catalog::{Catalog, ServerRecord};
use vpn_shell::recommend::recommend;

fn cities(recs: &[vpn_shell::recommend::Recommendation]) -> Vec<&str> {
    recs.iter().map(|r| r.server.city.as_str()).collect()
}

#[test]
fn gaming_picks_sub_50ms_servers_by_ping() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "gaming");
    assert_eq!(recs.len(), 3);
    assert_eq!(cities(&recs), vec!["New York", "Frankfurt", "Toronto"]);
    assert_eq!(recs[0].server.ping, 28);
    assert_eq!(recs[1].server.ping, 32);
    // 1 - ping/50 is below the 0.7 floor for all of them
    assert!(recs.iter().all(|r| r.confidence == 0.7));
    assert_eq!(recs[0].reason, "Ultra-low latency for gaming (28ms)");
}

#[test]
fn fastest_without_load_orders_by_ping() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "fastest");
    assert_eq!(cities(&recs), vec!["New York", "Frankfurt", "Toronto"]);
    assert!(recs.iter().all(|r| r.confidence == 0.9));
    assert_eq!(recs[0].reason, "Best overall performance (28ms, 0% load)");
}

#[test]
fn unknown_text_yields_nothing() {
    let catalog = Catalog::builtin();
    assert!(recommend(catalog.servers(), "zzz-nonexistent").is_empty());
}

#[test]
fn japan_routes_to_country_branch() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "japan");
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].server.ping, 156);
    assert_eq!(recs[0].confidence, 0.8);
    assert_eq!(recs[0].reason, "Japan server with 156ms latency");
}

#[test]
fn declared_keyword_order_beats_text_order() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "netflix gaming");
    assert!(recs[0].reason.starts_with("Optimized for Netflix"));

    let recs = recommend(catalog.servers(), "gaming then netflix");
    assert!(recs[0].reason.starts_with("Optimized for Netflix"));
}

#[test]
fn netflix_uses_streaming_countries() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "  NETFLIX ");
    assert_eq!(cities(&recs), vec!["New York", "Toronto", "Amsterdam"]);
    assert!((recs[0].confidence - 0.772).abs() < 1e-9);

    let recs = recommend(catalog.servers(), "streaming");
    assert_eq!(recs[0].reason, "Optimized for Streaming with low latency (28ms)");
}

#[test]
fn low_ping_returns_five() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "low ping");
    assert_eq!(recs.len(), 5);
    let pings: Vec<u32> = recs.iter().map(|r| r.server.ping).collect();
    assert_eq!(pings, vec![28, 32, 38, 41, 45]);
    assert!((recs[0].confidence - 0.86).abs() < 1e-9);
    assert!((recs[4].confidence - 0.775).abs() < 1e-9);
}

#[test]
fn torrenting_on_builtin_catalog() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "torrenting");
    assert_eq!(cities(&recs), vec!["Amsterdam"]);
    assert_eq!(recs[0].confidence, 0.85);
}

#[test]
fn usa_and_uk_keywords() {
    let catalog = Catalog::builtin();
    assert_eq!(cities(&recommend(catalog.servers(), "usa")), vec!["New York"]);
    assert_eq!(cities(&recommend(catalog.servers(), "uk")), vec!["London"]);
}

#[test]
fn location_fallback_matches_city_and_country() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "Stockholm");
    assert_eq!(recs.len(), 1);
    assert_eq!(recs[0].reason, "Located in Stockholm, Sweden");
    assert_eq!(recs[0].confidence, 0.75);

    // "united" matches two countries, ordered by ping
    let recs = recommend(catalog.servers(), "united");
    assert_eq!(cities(&recs), vec!["New York", "London"]);
}

#[test]
fn empty_query_matches_every_online_server_capped() {
    let catalog = Catalog::builtin();
    let recs = recommend(catalog.servers(), "   ");
    assert_eq!(cities(&recs), vec!["New York", "Frankfurt", "Toronto"]);
    assert!(recs.iter().all(|r| r.reason.starts_with("Located in")));
}

#[test]
fn offline_servers_never_recommended() {
    let catalog = Catalog::new(vec![
        ServerRecord::new(1, "United States", "New York", "", 28).offline(),
        ServerRecord::new(2, "United States", "Chicago", "", 60),
        ServerRecord::new(3, "Germany", "Frankfurt", "", 32),
    ])
    .unwrap();

    for query in ["gaming", "netflix", "fastest", "low ping", "usa", "united", ""] {
        let recs = recommend(catalog.servers(), query);
        assert!(recs.iter().all(|r| r.server.is_online), "query {:?}", query);
        assert!(recs.iter().all(|r| r.server.id != 1), "query {:?}", query);
    }

    // find_fastest still reports the offline record
    assert_eq!(catalog.find_fastest().unwrap().id, 1);
}

#[test]
fn recommend_leaves_catalog_untouched() {
    let catalog = Catalog::builtin();
    let before = catalog.servers().to_vec();
    let _ = recommend(catalog.servers(), "fastest");
    let _ = recommend(catalog.servers(), "torrenting");
    assert_eq!(catalog.servers(), before.as_slice());
}

#[test]
fn load_shapes_fastest_and_torrenting() {
    let catalog = Catalog::new(vec![
        ServerRecord::new(1, "Netherlands", "Amsterdam", "", 20).with_load(45),
        ServerRecord::new(2, "Switzerland", "Zurich", "", 60).with_load(10),
        ServerRecord::new(3, "Romania", "Bucharest", "", 90).with_load(80),
        ServerRecord::new(4, "Germany", "Berlin", "", 70),
    ])
    .unwrap();

    // scores: 110, 80, excluded, 70
    let fastest = recommend(catalog.servers(), "fastest");
    assert_eq!(cities(&fastest), vec!["Berlin", "Zurich", "Amsterdam"]);
    assert_eq!(fastest[1].reason, "Best overall performance (60ms, 10% load)");

    let torrent = recommend(catalog.servers(), "torrenting");
    assert_eq!(cities(&torrent), vec!["Zurich", "Amsterdam"]);
}
