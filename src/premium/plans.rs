use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PaymentPlan {
    pub id: &'static str,
    pub title: &'static str,
    pub price: &'static str,
    pub period: &'static str,
    pub discount: Option<&'static str>,
    pub features: Vec<&'static str>,
    pub is_popular: bool,
    pub stripe_product_id: &'static str,
    pub razorpay_plan_id: &'static str,
}

/// Where the user currently stands
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum UserPlan {
    Free,
    /// `until: None` = paid subscription, `Some` = time-boxed reward
    Premium { until: Option<DateTime<Utc>> },
}

impl UserPlan {
    /// Expired reward time falls back to free
    pub fn resolve(&self, now: DateTime<Utc>) -> UserPlan {
        match self {
            UserPlan::Premium { until: Some(t) } if *t <= now => UserPlan::Free,
            other => other.clone(),
        }
    }

    pub fn is_premium(&self) -> bool {
        matches!(self, UserPlan::Premium { .. })
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Benefit {
    pub title: &'static str,
    pub description: &'static str,
}

pub const FREE_FEATURES: [&str; 5] = [
    "Limited to 500MB/day",
    "10 server locations",
    "Ad-supported",
    "Basic support",
    "1 connection",
];

pub const PREMIUM_BENEFITS: [Benefit; 4] = [
    Benefit { title: "Enhanced Security", description: "Military-grade encryption" },
    Benefit { title: "Lightning Fast", description: "Optimized for speed" },
    Benefit { title: "Global Access", description: "100+ locations worldwide" },
    Benefit { title: "Premium Support", description: "24/7 priority assistance" },
];

pub fn plans() -> Vec<PaymentPlan> {
    vec![
        PaymentPlan {
            id: "monthly",
            title: "Monthly",
            price: "$9.99",
            period: "month",
            discount: None,
            features: vec![
                "Unlimited bandwidth",
                "50+ server locations",
                "No ads",
                "24/7 support",
                "5 simultaneous connections",
            ],
            is_popular: false,
            stripe_product_id: "prod_monthly_placeholder",
            razorpay_plan_id: "plan_monthly_placeholder",
        },
        PaymentPlan {
            id: "quarterly",
            title: "3 Months",
            price: "$7.99",
            period: "month",
            discount: Some("20%"),
            features: vec![
                "Unlimited bandwidth",
                "50+ server locations",
                "No ads",
                "24/7 support",
                "5 simultaneous connections",
                "Priority support",
            ],
            is_popular: true,
            stripe_product_id: "prod_quarterly_placeholder",
            razorpay_plan_id: "plan_quarterly_placeholder",
        },
        PaymentPlan {
            id: "yearly",
            title: "Yearly",
            price: "$4.99",
            period: "month",
            discount: Some("50%"),
            features: vec![
                "Unlimited bandwidth",
                "100+ server locations",
                "No ads",
                "24/7 priority support",
                "10 simultaneous connections",
                "Advanced security features",
                "Dedicated IP option",
            ],
            is_popular: false,
            stripe_product_id: "prod_yearly_placeholder",
            razorpay_plan_id: "plan_yearly_placeholder",
        },
    ]
}

pub fn find_plan(id: &str) -> Option<PaymentPlan> {
    plans().into_iter().find(|p| p.id == id)
}
