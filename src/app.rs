use std::sync::Arc;
use std::time::Duration;
use tracing::info;

use crate::assistant::Assistant;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::connection::{ConnectionManager, ConnectionStatus, ConnectionState, ConnectionError};
use crate::premium::ads::{BannerAd, BannerSize, SimulatedRewardAd};
use crate::premium::payment::SimulatedPaymentProvider;
use crate::premium::PremiumCenter;
use crate::recommend::{recommend, Recommendation};
use crate::search::{SearchError, SearchQuery};

/// One in-memory app session: catalog plus every screen's state
pub struct AppShell {
    pub config: Arc<Config>,
    pub catalog: Arc<Catalog>,
    pub connection: ConnectionManager,
    pub assistant: Assistant,
    pub premium: PremiumCenter,
}

impl AppShell {
    /// Must be called inside a tokio runtime (the banner starts loading).
    pub fn new(config: Arc<Config>) -> anyhow::Result<Self> {
        let catalog = Arc::new(Catalog::from_config(&config.catalog)?);
        let sim = &config.simulation;

        let connection =
            ConnectionManager::new(catalog.clone(), Duration::from_millis(sim.connect_delay_ms))?;
        let assistant = Assistant::new(catalog.clone(), Duration::from_millis(sim.chat_reply_delay_ms));

        let payment = Arc::new(SimulatedPaymentProvider::new(
            &config.payment,
            Duration::from_millis(sim.payment_delay_ms),
        ));
        let reward_ad = Arc::new(SimulatedRewardAd::new(
            &config.ads.reward_unit_id,
            Duration::from_millis(sim.ad_load_delay_ms),
            Duration::from_millis(sim.reward_ad_duration_ms),
        ));
        let banner = BannerAd::load(
            &config.ads.banner_unit_id,
            BannerSize::Banner,
            Duration::from_millis(sim.ad_load_delay_ms),
        );
        let premium = PremiumCenter::new(payment, reward_ad, banner);

        info!(
            "🛡️ App session ready ({} servers, payments via {}: {})",
            catalog.len(),
            premium.payment_provider(),
            if premium.payments_enabled() { "enabled" } else { "disabled" }
        );

        Ok(Self {
            config,
            catalog,
            connection,
            assistant,
            premium,
        })
    }

    pub fn recommend(&self, query: &str) -> Vec<Recommendation> {
        recommend(self.catalog.servers(), query)
    }

    /// Search box: validate, then recommend. Blank input yields nothing.
    pub fn search(&self, raw: &str) -> Result<Vec<Recommendation>, SearchError> {
        let query = SearchQuery::parse(raw, self.config.search.max_query_len)?;
        if query.is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.recommend(query.as_str()))
    }

    /// Take the top recommendation for `query` and connect to it.
    /// Returns None when nothing was recommended.
    pub fn connect_recommended(
        &self,
        query: &str,
    ) -> Result<Option<(Recommendation, ConnectionStatus)>, ConnectionError> {
        let Some(top) = self.recommend(query).into_iter().next() else {
            return Ok(None);
        };

        let mut status = self.connection.select_server(top.server.id)?;
        if status.state == ConnectionState::Disconnected {
            status = self.connection.toggle();
        }
        Ok(Some((top, status)))
    }
}
