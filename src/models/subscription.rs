//! Subscription model: billing-plan state for a user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::user::SubscriptionTier;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionStatus {
    Active,
    Cancelled,
    Expired,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subscription {
    pub id: String,
    pub user_id: String,
    pub plan: SubscriptionTier,
    pub status: SubscriptionStatus,
    pub credits_remaining: i64,
    pub paypal_subscription_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a subscription on plan purchase.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSubscription {
    pub user_id: String,
    pub plan: SubscriptionTier,
    #[serde(default)]
    pub status: Option<SubscriptionStatus>,
    #[serde(default)]
    pub credits_remaining: Option<i64>,
    #[serde(default)]
    pub paypal_subscription_id: Option<String>,
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// Partial update applied on renewal/cancellation events.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SubscriptionPatch {
    pub plan: Option<SubscriptionTier>,
    pub status: Option<SubscriptionStatus>,
    pub credits_remaining: Option<i64>,
    pub paypal_subscription_id: Option<String>,
    pub expires_at: Option<DateTime<Utc>>,
}
