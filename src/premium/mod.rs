pub mod ads;
pub mod payment;
pub mod plans;

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use chrono::Utc;
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::premium::ads::{BannerAd, Reward, RewardAdProvider};
use crate::premium::payment::{PaymentOutcome, PaymentProvider};
use crate::premium::plans::{find_plan, UserPlan};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PremiumError {
    #[error("Unknown plan '{0}'")]
    UnknownPlan(String),
    #[error("A payment is already being processed")]
    AlreadyProcessing,
}

/// Result of pressing "Watch Ad for Free Premium"
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum AdAction {
    /// Ad was ready and is now playing; reward lands when it ends
    Showing,
    /// Not ready yet; a load was kicked off
    Loading { message: String },
    /// An earlier press is still loading or playing
    Busy { message: String },
}

/// Clears a busy flag even if the owning future is dropped
struct FlagGuard(Arc<AtomicBool>);

impl Drop for FlagGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

/// Premium screen backend - 課金と広告
///
/// Both capabilities are trait objects so a real SDK can be swapped in at
/// startup; the shipped ones are simulated.
pub struct PremiumCenter {
    payment: Arc<dyn PaymentProvider>,
    reward_ad: Arc<dyn RewardAdProvider>,
    pub banner: BannerAd,
    plan: Arc<RwLock<UserPlan>>,
    processing: Arc<AtomicBool>,
    /// Held from the press until the load or playback task ends
    ad_busy: Arc<AtomicBool>,
}

impl PremiumCenter {
    pub fn new(
        payment: Arc<dyn PaymentProvider>,
        reward_ad: Arc<dyn RewardAdProvider>,
        banner: BannerAd,
    ) -> Self {
        Self {
            payment,
            reward_ad,
            banner,
            plan: Arc::new(RwLock::new(UserPlan::Free)),
            processing: Arc::new(AtomicBool::new(false)),
            ad_busy: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn plan(&self) -> UserPlan {
        self.plan.read().resolve(Utc::now())
    }

    pub fn is_processing(&self) -> bool {
        self.processing.load(Ordering::SeqCst)
    }

    pub fn payment_provider(&self) -> &'static str {
        self.payment.name()
    }

    pub fn payments_enabled(&self) -> bool {
        self.payment.is_enabled()
    }

    /// Buy a plan. Provider errors become a failed outcome, not an Err.
    pub async fn purchase(&self, plan_id: &str) -> Result<PaymentOutcome, PremiumError> {
        let plan = find_plan(plan_id).ok_or_else(|| PremiumError::UnknownPlan(plan_id.to_string()))?;

        if self.processing.swap(true, Ordering::SeqCst) {
            return Err(PremiumError::AlreadyProcessing);
        }
        let _guard = FlagGuard(self.processing.clone());

        let outcome = match self.payment.initialize_payment(&plan).await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("💳 Payment failed: {}", e);
                PaymentOutcome::failed("Payment failed. Please try again.")
            }
        };

        if outcome.success {
            *self.plan.write() = UserPlan::Premium { until: None };
            info!("👑 Upgraded to premium ({})", plan.id);
        }
        Ok(outcome)
    }

    pub async fn restore(&self) -> PaymentOutcome {
        match self.payment.restore_purchase().await {
            Ok(outcome) => outcome,
            Err(e) => {
                warn!("💳 Restore failed: {}", e);
                PaymentOutcome::failed("Restore failed. Please try again.")
            }
        }
    }

    /// Play the reward ad if one is loaded, otherwise start loading one.
    /// Playback runs in the background; the reward is applied when it ends.
    /// Presses made while that task runs get `Busy`.
    pub fn watch_reward_ad(&self) -> AdAction {
        if self.ad_busy.swap(true, Ordering::SeqCst) {
            debug!("📺 Reward ad already in progress");
            return AdAction::Busy {
                message: "Your reward ad is already on its way.".to_string(),
            };
        }
        let guard = FlagGuard(self.ad_busy.clone());
        let ad = self.reward_ad.clone();

        if ad.is_ready() {
            let plan = self.plan.clone();
            tokio::spawn(async move {
                let _guard = guard;
                match ad.show().await {
                    Ok(reward) => grant_reward(&plan, &reward),
                    Err(e) => warn!("📺 Reward ad failed: {}", e),
                }
            });
            return AdAction::Showing;
        }

        tokio::spawn(async move {
            let _guard = guard;
            if let Err(e) = ad.load().await {
                warn!("📺 Reward ad failed to load: {}", e);
            }
        });
        AdAction::Loading {
            message: "Please wait while we prepare your reward ad.".to_string(),
        }
    }

    pub fn is_ad_busy(&self) -> bool {
        self.ad_busy.load(Ordering::SeqCst)
    }
}

/// Extend (or start) time-boxed premium. A paid plan is left alone.
fn grant_reward(plan: &RwLock<UserPlan>, reward: &Reward) {
    if reward.kind != "premium_time" {
        warn!("📺 Ignoring unknown reward kind '{}'", reward.kind);
        return;
    }

    let now = Utc::now();
    let mut current = plan.write();
    let base = match current.resolve(now) {
        UserPlan::Premium { until: None } => return,
        UserPlan::Premium { until: Some(t) } => t,
        UserPlan::Free => now,
    };
    let until = base + chrono::Duration::hours(reward.amount as i64);
    *current = UserPlan::Premium { until: Some(until) };
    info!("🎁 You earned {} hours of premium access (until {})", reward.amount, until);
}
