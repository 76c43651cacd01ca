use std::collections::HashSet;
use tracing::info;

use crate::catalog::types::ServerRecord;
use crate::config::CatalogConfig;

/// Server Catalog - 静的なサーバー一覧
///
/// Read-only after construction. Order is the display order and is the
/// tie-breaker for every stable sort done on top of it.
#[derive(Debug, Clone)]
pub struct Catalog {
    servers: Vec<ServerRecord>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and malformed records.
    /// `is_fastest` is derived here from `find_fastest`.
    pub fn new(mut servers: Vec<ServerRecord>) -> anyhow::Result<Self> {
        let mut seen = HashSet::new();
        for server in &servers {
            if !seen.insert(server.id) {
                return Err(anyhow::anyhow!("Duplicate server id {} in catalog", server.id));
            }
            if server.country.trim().is_empty() || server.city.trim().is_empty() {
                return Err(anyhow::anyhow!("Server {} has an empty country or city", server.id));
            }
            if let Some(load) = server.load {
                if load > 100 {
                    return Err(anyhow::anyhow!("Server {} load {}% out of range", server.id, load));
                }
            }
        }

        mark_fastest(&mut servers);
        Ok(Self { servers })
    }

    /// The ten default locations shipped with the app
    pub fn builtin() -> Self {
        let mut servers = vec![
            ServerRecord::new(1, "United States", "New York", "🇺🇸", 28),
            ServerRecord::new(2, "United Kingdom", "London", "🇬🇧", 45),
            ServerRecord::new(3, "Germany", "Frankfurt", "🇩🇪", 32),
            ServerRecord::new(4, "Japan", "Tokyo", "🇯🇵", 156),
            ServerRecord::new(5, "Australia", "Sydney", "🇦🇺", 203),
            ServerRecord::new(6, "Canada", "Toronto", "🇨🇦", 38),
            ServerRecord::new(7, "Netherlands", "Amsterdam", "🇳🇱", 41),
            ServerRecord::new(8, "Singapore", "Singapore", "🇸🇬", 178),
            ServerRecord::new(9, "France", "Paris", "🇫🇷", 52),
            ServerRecord::new(10, "Sweden", "Stockholm", "🇸🇪", 49),
        ];
        // Static data, ids are unique by construction
        mark_fastest(&mut servers);
        Self { servers }
    }

    /// Builtin catalog unless the config lists its own servers
    pub fn from_config(config: &CatalogConfig) -> anyhow::Result<Self> {
        if config.servers.is_empty() {
            info!("📋 Using builtin server catalog");
            return Ok(Self::builtin());
        }

        let servers = config
            .servers
            .iter()
            .map(|entry| ServerRecord {
                id: entry.id,
                country: entry.country.clone(),
                city: entry.city.clone(),
                flag: entry.flag.clone(),
                ping: entry.ping,
                is_online: entry.online,
                load: entry.load,
                is_fastest: false,
                is_premium: entry.premium,
            })
            .collect();

        let catalog = Self::new(servers)?;
        info!("📋 Loaded {} servers from config", catalog.len());
        Ok(catalog)
    }

    pub fn servers(&self) -> &[ServerRecord] {
        &self.servers
    }

    pub fn iter(&self) -> impl Iterator<Item = &ServerRecord> {
        self.servers.iter()
    }

    pub fn len(&self) -> usize {
        self.servers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.servers.is_empty()
    }

    pub fn get(&self, id: u32) -> Option<&ServerRecord> {
        self.servers.iter().find(|s| s.id == id)
    }

    pub fn filter_online(&self) -> Vec<&ServerRecord> {
        self.servers.iter().filter(|s| s.is_online).collect()
    }

    /// Case-insensitive substring on country or city, catalog order kept
    pub fn filter_by_text(&self, needle: &str) -> Vec<&ServerRecord> {
        let needle = needle.to_lowercase();
        self.servers
            .iter()
            .filter(|s| s.matches_location(&needle))
            .collect()
    }

    /// Lowest ping across ALL records, online or not. First wins on ties.
    pub fn find_fastest(&self) -> Option<&ServerRecord> {
        fastest_of(&self.servers)
    }
}

/// Flag exactly one record (the `fastest_of` pick) as fastest
fn mark_fastest(servers: &mut [ServerRecord]) {
    let fastest_id = fastest_of(servers).map(|s| s.id);
    for server in servers.iter_mut() {
        server.is_fastest = Some(server.id) == fastest_id;
    }
}

fn fastest_of(servers: &[ServerRecord]) -> Option<&ServerRecord> {
    servers.iter().fold(None, |best: Option<&ServerRecord>, current| match best {
        Some(b) if b.ping <= current.ping => Some(b),
        _ => Some(current),
    })
}
