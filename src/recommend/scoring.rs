//! Category scoring functions.
//!
//! Each one filters to online servers, applies its own predicate, sorts
//! ascending by its key (stable, so ties keep catalog order), caps the
//! result and attaches a reason plus a floored confidence.

use crate::catalog::ServerRecord;
use crate::recommend::types::Recommendation;

pub const STREAMING_COUNTRIES: [&str; 4] =
    ["United States", "United Kingdom", "Canada", "Netherlands"];
pub const TORRENT_COUNTRIES: [&str; 3] = ["Netherlands", "Switzerland", "Romania"];

pub const STREAMING_CAP: usize = 3;
pub const GAMING_CAP: usize = 3;
pub const TORRENTING_CAP: usize = 3;
pub const LOW_PING_CAP: usize = 5;
pub const FASTEST_CAP: usize = 3;
pub const COUNTRY_CAP: usize = 5;
pub const LOCATION_CAP: usize = 3;

pub const TORRENTING_CONFIDENCE: f64 = 0.85;
pub const FASTEST_CONFIDENCE: f64 = 0.9;
pub const COUNTRY_CONFIDENCE: f64 = 0.8;
pub const LOCATION_CONFIDENCE: f64 = 0.75;

/// Online servers sorted by `key`, capped
fn ranked<'a, F, K>(
    servers: &'a [ServerRecord],
    keep: F,
    key: impl Fn(&ServerRecord) -> K,
    cap: usize,
) -> Vec<&'a ServerRecord>
where
    F: Fn(&ServerRecord) -> bool,
    K: Ord,
{
    let mut picked: Vec<&ServerRecord> = servers
        .iter()
        .filter(|s| s.is_online && keep(s))
        .collect();
    picked.sort_by_key(|s| key(s));
    picked.truncate(cap);
    picked
}

fn to_recommendations(
    picked: Vec<&ServerRecord>,
    reason: impl Fn(&ServerRecord) -> String,
    confidence: impl Fn(&ServerRecord) -> f64,
) -> Vec<Recommendation> {
    picked
        .into_iter()
        .map(|s| Recommendation {
            server: s.clone(),
            reason: reason(s),
            confidence: confidence(s),
        })
        .collect()
}

pub fn streaming(servers: &[ServerRecord], service: &str) -> Vec<Recommendation> {
    let picked = ranked(
        servers,
        |s| STREAMING_COUNTRIES.contains(&s.country.as_str()) && s.ping < 100,
        |s| s.ping,
        STREAMING_CAP,
    );
    to_recommendations(
        picked,
        |s| format!("Optimized for {} with low latency ({}ms)", service, s.ping),
        |s| (0.8 - s.ping as f64 / 1000.0).max(0.5),
    )
}

pub fn gaming(servers: &[ServerRecord]) -> Vec<Recommendation> {
    let picked = ranked(servers, |s| s.ping < 50, |s| s.ping, GAMING_CAP);
    to_recommendations(
        picked,
        |s| format!("Ultra-low latency for gaming ({}ms)", s.ping),
        |s| (1.0 - s.ping as f64 / 50.0).max(0.7),
    )
}

pub fn torrenting(servers: &[ServerRecord]) -> Vec<Recommendation> {
    let picked = ranked(
        servers,
        |s| TORRENT_COUNTRIES.contains(&s.country.as_str()) && s.effective_load() < 70,
        |s| s.effective_load(),
        TORRENTING_CAP,
    );
    to_recommendations(
        picked,
        |_| "P2P-friendly location with good performance".to_string(),
        |_| TORRENTING_CONFIDENCE,
    )
}

pub fn low_ping(servers: &[ServerRecord]) -> Vec<Recommendation> {
    let picked = ranked(servers, |_| true, |s| s.ping, LOW_PING_CAP);
    to_recommendations(
        picked,
        |s| format!("Low latency connection ({}ms)", s.ping),
        |s| (1.0 - s.ping as f64 / 200.0).max(0.6),
    )
}

/// Composite score: ping + 2 × load, widened so no catalog value overflows
pub fn fastest_score(server: &ServerRecord) -> u64 {
    server.ping as u64 + server.effective_load() as u64 * 2
}

pub fn fastest(servers: &[ServerRecord]) -> Vec<Recommendation> {
    let picked = ranked(servers, |s| s.effective_load() < 50, fastest_score, FASTEST_CAP);
    to_recommendations(
        picked,
        |s| {
            format!(
                "Best overall performance ({}ms, {}% load)",
                s.ping,
                s.effective_load()
            )
        },
        |_| FASTEST_CONFIDENCE,
    )
}

pub fn country(servers: &[ServerRecord], country: &str) -> Vec<Recommendation> {
    let target = country.to_lowercase();
    let picked = ranked(
        servers,
        |s| s.country.to_lowercase().contains(&target),
        |s| s.ping,
        COUNTRY_CAP,
    );
    to_recommendations(
        picked,
        |s| format!("{} server with {}ms latency", s.country, s.ping),
        |_| COUNTRY_CONFIDENCE,
    )
}

/// Fallback when no category keyword matched.
/// `query` must already be normalized (trimmed, lowercase).
pub fn location(servers: &[ServerRecord], query: &str) -> Vec<Recommendation> {
    let picked = ranked(servers, |s| s.matches_location(query), |s| s.ping, LOCATION_CAP);
    to_recommendations(
        picked,
        |s| format!("Located in {}, {}", s.city, s.country),
        |_| LOCATION_CONFIDENCE,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(id: u32, country: &str, ping: u32) -> ServerRecord {
        ServerRecord::new(id, country, "City", "", ping)
    }

    #[test]
    fn test_streaming_confidence_floor() {
        let servers = vec![server(1, "Canada", 99), server(2, "Canada", 10)];
        let recs = streaming(&servers, "Netflix");
        assert_eq!(recs[0].server.id, 2);
        assert!((recs[0].confidence - 0.79).abs() < 1e-9);
        // 0.8 - 0.099 = 0.701, still above the floor
        assert!((recs[1].confidence - 0.701).abs() < 1e-9);
        assert_eq!(recs[0].reason, "Optimized for Netflix with low latency (10ms)");
    }

    #[test]
    fn test_streaming_excludes_other_countries_and_slow() {
        let servers = vec![
            server(1, "Germany", 20),
            server(2, "United States", 100),
            server(3, "Netherlands", 41),
        ];
        let recs = streaming(&servers, "Streaming");
        assert_eq!(recs.len(), 1);
        assert_eq!(recs[0].server.id, 3);
    }

    #[test]
    fn test_gaming_floor_applies() {
        let servers = vec![server(1, "X", 0), server(2, "Y", 49)];
        let recs = gaming(&servers);
        assert_eq!(recs[0].confidence, 1.0);
        assert_eq!(recs[1].confidence, 0.7);
    }

    #[test]
    fn test_torrenting_sorted_by_load() {
        let servers = vec![
            server(1, "Netherlands", 10).with_load(60),
            server(2, "Romania", 90).with_load(5),
            server(3, "Switzerland", 30),
            server(4, "Switzerland", 30).with_load(70),
        ];
        let recs = torrenting(&servers);
        let ids: Vec<u32> = recs.iter().map(|r| r.server.id).collect();
        // absent load counts as 0; load 70 is excluded
        assert_eq!(ids, vec![3, 2, 1]);
        assert!(recs.iter().all(|r| r.confidence == TORRENTING_CONFIDENCE));
    }

    #[test]
    fn test_low_ping_cap_and_floor() {
        let servers: Vec<ServerRecord> = (1..=8).map(|i| server(i, "X", 200 - i * 10)).collect();
        let recs = low_ping(&servers);
        assert_eq!(recs.len(), LOW_PING_CAP);
        assert_eq!(recs[0].server.ping, 120);
        assert!(recs.iter().all(|r| r.confidence >= 0.6 && r.confidence <= 1.0));
    }

    #[test]
    fn test_fastest_composite_score() {
        let servers = vec![
            server(1, "A", 10).with_load(40), // 90
            server(2, "B", 50).with_load(10), // 70
            server(3, "C", 5).with_load(55),  // excluded
            server(4, "D", 80),               // 80
        ];
        let recs = fastest(&servers);
        let ids: Vec<u32> = recs.iter().map(|r| r.server.id).collect();
        assert_eq!(ids, vec![2, 4, 1]);
        assert_eq!(recs[0].reason, "Best overall performance (50ms, 10% load)");
        assert_eq!(recs[1].reason, "Best overall performance (80ms, 0% load)");
    }

    #[test]
    fn test_fastest_score_handles_extreme_ping() {
        let servers = vec![
            server(1, "A", u32::MAX).with_load(10),
            server(2, "B", 40).with_load(20),
        ];
        assert_eq!(fastest_score(&servers[0]), u32::MAX as u64 + 20);
        let ids: Vec<u32> = fastest(&servers).iter().map(|r| r.server.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }

    #[test]
    fn test_stable_ties_keep_catalog_order() {
        let servers = vec![server(9, "X", 30), server(3, "Y", 30), server(5, "Z", 30)];
        let ids: Vec<u32> = gaming(&servers).iter().map(|r| r.server.id).collect();
        assert_eq!(ids, vec![9, 3, 5]);
    }

    #[test]
    fn test_offline_servers_never_returned() {
        let servers = vec![server(1, "Netherlands", 10).offline(), server(2, "Netherlands", 20)];
        for recs in [
            streaming(&servers, "Netflix"),
            gaming(&servers),
            torrenting(&servers),
            low_ping(&servers),
            fastest(&servers),
            country(&servers, "Netherlands"),
            location(&servers, "nether"),
        ] {
            assert_eq!(recs.len(), 1);
            assert_eq!(recs[0].server.id, 2);
        }
    }

    #[test]
    fn test_location_reason() {
        let servers = vec![ServerRecord::new(1, "France", "Paris", "", 52)];
        let recs = location(&servers, "par");
        assert_eq!(recs[0].reason, "Located in Paris, France");
        assert_eq!(recs[0].confidence, LOCATION_CONFIDENCE);
    }
}
