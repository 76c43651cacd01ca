use serde::Serialize;

/// One VPN exit node
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ServerRecord {
    pub id: u32,
    pub country: String,
    pub city: String,
    pub flag: String,
    /// Round-trip estimate in ms (static)
    pub ping: u32,
    pub is_online: bool,
    /// Utilization percentage 0-100, absent = unknown
    pub load: Option<u8>,
    /// Set once when the catalog is built. Informational only
    pub is_fastest: bool,
    pub is_premium: bool,
}

impl ServerRecord {
    pub fn new(id: u32, country: &str, city: &str, flag: &str, ping: u32) -> Self {
        Self {
            id,
            country: country.to_string(),
            city: city.to_string(),
            flag: flag.to_string(),
            ping,
            is_online: true,
            load: None,
            is_fastest: false,
            is_premium: false,
        }
    }

    pub fn with_load(mut self, load: u8) -> Self {
        self.load = Some(load);
        self
    }

    pub fn offline(mut self) -> Self {
        self.is_online = false;
        self
    }

    pub fn premium(mut self) -> Self {
        self.is_premium = true;
        self
    }

    /// Load for scoring purposes (absent → 0)
    pub fn effective_load(&self) -> u32 {
        self.load.unwrap_or(0) as u32
    }

    /// Case-insensitive substring match on country or city.
    /// `needle` must already be lowercase.
    pub fn matches_location(&self, needle: &str) -> bool {
        self.country.to_lowercase().contains(needle) || self.city.to_lowercase().contains(needle)
    }

    /// "New York, United States (28ms)"
    pub fn label(&self) -> String {
        format!("{}, {} ({}ms)", self.city, self.country, self.ping)
    }
}
