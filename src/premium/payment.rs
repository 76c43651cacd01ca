use std::time::Duration;
use rand::rngs::OsRng;
use rand::Rng;
use serde::Serialize;
use tracing::info;

use crate::config::{PaymentConfig, PaymentProviderKind};
use crate::premium::plans::PaymentPlan;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaymentOutcome {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
}

impl PaymentOutcome {
    pub fn failed(message: &str) -> Self {
        Self {
            success: false,
            message: message.to_string(),
            receipt_id: None,
        }
    }
}

/// Store-side checkout. Real Stripe/Razorpay adapters plug in here.
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync {
    fn name(&self) -> &'static str;

    fn is_enabled(&self) -> bool;

    async fn initialize_payment(&self, plan: &PaymentPlan) -> anyhow::Result<PaymentOutcome>;

    async fn restore_purchase(&self) -> anyhow::Result<PaymentOutcome>;
}

/// Placeholder checkout: logs, waits, succeeds. Disabled by default.
pub struct SimulatedPaymentProvider {
    kind: PaymentProviderKind,
    enabled: bool,
    delay: Duration,
}

impl SimulatedPaymentProvider {
    pub fn new(config: &PaymentConfig, delay: Duration) -> Self {
        Self {
            kind: config.provider,
            enabled: config.enabled,
            delay,
        }
    }

    fn product_id<'a>(&self, plan: &'a PaymentPlan) -> &'a str {
        match self.kind {
            PaymentProviderKind::Stripe => plan.stripe_product_id,
            PaymentProviderKind::Razorpay => plan.razorpay_plan_id,
        }
    }
}

#[async_trait::async_trait]
impl PaymentProvider for SimulatedPaymentProvider {
    fn name(&self) -> &'static str {
        match self.kind {
            PaymentProviderKind::Stripe => "stripe",
            PaymentProviderKind::Razorpay => "razorpay",
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    async fn initialize_payment(&self, plan: &PaymentPlan) -> anyhow::Result<PaymentOutcome> {
        if !self.enabled {
            info!("💳 Payment integration not yet enabled");
            return Ok(PaymentOutcome::failed("Payment integration will be available soon!"));
        }

        info!(
            "💳 Initializing {} payment for plan {} ({})",
            self.name(),
            plan.id,
            self.product_id(plan)
        );
        tokio::time::sleep(self.delay).await;

        let receipt_id = format!("sim_{}_{:016x}", self.name(), OsRng.gen::<u64>());
        Ok(PaymentOutcome {
            success: true,
            message: "Payment completed successfully!".to_string(),
            receipt_id: Some(receipt_id),
        })
    }

    async fn restore_purchase(&self) -> anyhow::Result<PaymentOutcome> {
        if !self.enabled {
            return Ok(PaymentOutcome::failed("Payment integration not yet enabled"));
        }

        info!("💳 Restoring purchase via {}", self.name());
        Ok(PaymentOutcome {
            success: true,
            message: "No previous purchases found".to_string(),
            receipt_id: None,
        })
    }
}
