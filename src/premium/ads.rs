use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use serde::Serialize;
use tracing::info;

use crate::deferred::DeferredSlot;

/// What a rewarded ad pays out
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Reward {
    pub kind: String,
    /// Hours of premium for `premium_time`
    pub amount: u32,
}

/// Rewarded video ad. Real AdMob bindings plug in here.
#[async_trait::async_trait]
pub trait RewardAdProvider: Send + Sync {
    fn unit_id(&self) -> &str;

    /// Fetch an ad; `is_ready` turns true when it is done
    async fn load(&self) -> anyhow::Result<()>;

    fn is_ready(&self) -> bool;

    /// Play the ad through and return the reward
    async fn show(&self) -> anyhow::Result<Reward>;
}

/// Placeholder reward ad: fixed load time, fixed playback, 24h of premium
pub struct SimulatedRewardAd {
    unit_id: String,
    ready: AtomicBool,
    load_delay: Duration,
    play_duration: Duration,
}

impl SimulatedRewardAd {
    pub fn new(unit_id: &str, load_delay: Duration, play_duration: Duration) -> Self {
        Self {
            unit_id: unit_id.to_string(),
            ready: AtomicBool::new(false),
            load_delay,
            play_duration,
        }
    }
}

#[async_trait::async_trait]
impl RewardAdProvider for SimulatedRewardAd {
    fn unit_id(&self) -> &str {
        &self.unit_id
    }

    async fn load(&self) -> anyhow::Result<()> {
        info!("📺 Loading reward ad: {}", self.unit_id);
        tokio::time::sleep(self.load_delay).await;
        self.ready.store(true, Ordering::SeqCst);
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready.load(Ordering::SeqCst)
    }

    async fn show(&self) -> anyhow::Result<Reward> {
        // one ad, one view
        if !self.ready.swap(false, Ordering::SeqCst) {
            return Err(anyhow::anyhow!("Reward ad {} is not loaded", self.unit_id));
        }
        info!("📺 Showing reward ad");
        tokio::time::sleep(self.play_duration).await;
        Ok(Reward {
            kind: "premium_time".to_string(),
            amount: 24,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BannerSize {
    Banner,
    LargeBanner,
    MediumRectangle,
}

impl BannerSize {
    /// (width, height) in dp
    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            BannerSize::Banner => (320, 50),
            BannerSize::LargeBanner => (320, 100),
            BannerSize::MediumRectangle => (300, 250),
        }
    }
}

/// Banner slot on the premium page. Marks itself loaded after the delay.
pub struct BannerAd {
    pub unit_id: String,
    pub size: BannerSize,
    loaded: Arc<AtomicBool>,
    _slot: DeferredSlot,
}

impl BannerAd {
    /// Starts loading right away, so this needs a tokio runtime
    pub fn load(unit_id: &str, size: BannerSize, delay: Duration) -> Self {
        let loaded = Arc::new(AtomicBool::new(false));
        let slot = DeferredSlot::new();
        let flag = loaded.clone();
        slot.schedule(delay, move |_| flag.store(true, Ordering::SeqCst));
        Self {
            unit_id: unit_id.to_string(),
            size,
            loaded,
            _slot: slot,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.loaded.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ad() -> SimulatedRewardAd {
        SimulatedRewardAd::new("test-unit", Duration::from_millis(1000), Duration::from_millis(5000))
    }

    #[tokio::test(start_paused = true)]
    async fn test_load_then_show() {
        let ad = ad();
        assert!(!ad.is_ready());
        ad.load().await.unwrap();
        assert!(ad.is_ready());

        let started = tokio::time::Instant::now();
        let reward = ad.show().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(5000));
        assert_eq!(reward, Reward { kind: "premium_time".to_string(), amount: 24 });
        assert!(!ad.is_ready());
    }

    #[tokio::test]
    async fn test_show_without_load_fails() {
        assert!(ad().show().await.is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn test_banner_loads_after_delay() {
        let banner = BannerAd::load("b", BannerSize::Banner, Duration::from_millis(1000));
        assert!(!banner.is_loaded());
        tokio::time::sleep(Duration::from_millis(1100)).await;
        assert!(banner.is_loaded());
        assert_eq!(banner.size.dimensions(), (320, 50));
    }
}
