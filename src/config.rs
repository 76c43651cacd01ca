use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub simulation: SimulationConfig,
    #[serde(default)]
    pub payment: PaymentConfig,
    #[serde(default)]
    pub ads: AdsConfig,
    #[serde(default)]
    pub search: SearchConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_web_address")]
    pub address: String,
    #[serde(default = "default_web_port")]
    pub port: u16,
}

/// Fixed delays used by the simulated flows (all in milliseconds)
#[derive(Debug, Deserialize, Clone)]
pub struct SimulationConfig {
    /// Connecting → Connected
    #[serde(default = "default_connect_delay")]
    pub connect_delay_ms: u64,
    /// Assistant "typing" time before a reply lands
    #[serde(default = "default_chat_delay")]
    pub chat_reply_delay_ms: u64,
    #[serde(default = "default_payment_delay")]
    pub payment_delay_ms: u64,
    #[serde(default = "default_ad_load_delay")]
    pub ad_load_delay_ms: u64,
    #[serde(default = "default_reward_ad_duration")]
    pub reward_ad_duration_ms: u64,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentProviderKind {
    Stripe,
    Razorpay,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PaymentConfig {
    #[serde(default = "default_payment_provider")]
    pub provider: PaymentProviderKind,
    /// Payments stay disabled until a real provider is wired in
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub public_key: String,
}

/// Ad unit ids. Defaults are the public AdMob test units.
#[derive(Debug, Deserialize, Clone)]
pub struct AdsConfig {
    #[serde(default = "default_banner_unit")]
    pub banner_unit_id: String,
    #[serde(default = "default_reward_unit")]
    pub reward_unit_id: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct SearchConfig {
    #[serde(default = "default_max_query_len")]
    pub max_query_len: usize,
}

/// Optional catalog override. Empty list → builtin servers.
#[derive(Debug, Deserialize, Clone, Default)]
pub struct CatalogConfig {
    #[serde(default)]
    pub servers: Vec<ServerEntryConfig>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerEntryConfig {
    pub id: u32,
    pub country: String,
    pub city: String,
    #[serde(default)]
    pub flag: String,
    pub ping: u32,
    #[serde(default = "default_true")]
    pub online: bool,
    pub load: Option<u8>,
    #[serde(default)]
    pub premium: bool,
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            address: default_web_address(),
            port: default_web_port(),
        }
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            connect_delay_ms: default_connect_delay(),
            chat_reply_delay_ms: default_chat_delay(),
            payment_delay_ms: default_payment_delay(),
            ad_load_delay_ms: default_ad_load_delay(),
            reward_ad_duration_ms: default_reward_ad_duration(),
        }
    }
}

impl Default for PaymentConfig {
    fn default() -> Self {
        Self {
            provider: default_payment_provider(),
            enabled: false,
            public_key: String::new(),
        }
    }
}

impl Default for AdsConfig {
    fn default() -> Self {
        Self {
            banner_unit_id: default_banner_unit(),
            reward_unit_id: default_reward_unit(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            max_query_len: default_max_query_len(),
        }
    }
}

// Default value functions
fn default_true() -> bool { true }
fn default_web_address() -> String { "0.0.0.0".to_string() }
fn default_web_port() -> u16 { 8080 }
fn default_connect_delay() -> u64 { 2000 }
fn default_chat_delay() -> u64 { 1500 }
fn default_payment_delay() -> u64 { 2000 }
fn default_ad_load_delay() -> u64 { 1000 }
fn default_reward_ad_duration() -> u64 { 5000 }
fn default_payment_provider() -> PaymentProviderKind { PaymentProviderKind::Stripe }
fn default_banner_unit() -> String { "ca-app-pub-3940256099942544/6300978111".to_string() }
fn default_reward_unit() -> String { "ca-app-pub-3940256099942544/5224354917".to_string() }
fn default_max_query_len() -> usize { 100 }

impl Config {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Failed to read config file '{}': {}", path, e))?;
        Self::parse(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse config '{}': {}", path, e))
    }

    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Config = toml::from_str(content)?;
        Ok(config)
    }
}
