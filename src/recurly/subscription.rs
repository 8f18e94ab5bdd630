use jiff::Timestamp;
use serde::Serialize;
use url::Url;

use crate::decoder::{Decode, Decoder, KeyedContainer, XmlTag};
use crate::err::Result;
use crate::recurly::decode_list;

xml_text_enum! {
    pub enum SubscriptionState("subscription state") {
        Active => "active",
        Canceled => "canceled",
        Expired => "expired",
        Future => "future",
        InTrial => "in_trial",
        Live => "live",
        PastDue => "past_due",
        Paused => "paused",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanInfo {
    pub plan_code: String,
    pub name: Option<String>,
}

impl Decode for PlanInfo {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();

        Ok(PlanInfo {
            plan_code: keyed.decode_string("plan_code")?,
            name: keyed.decode_if_present("name", KeyedContainer::decode_string)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubscriptionAddOn {
    pub add_on_code: String,
    pub unit_amount_in_cents: i64,
    pub quantity: u32,
}

impl XmlTag for SubscriptionAddOn {
    const TAG: &'static str = "subscription_add_on";
}

impl Decode for SubscriptionAddOn {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();

        Ok(SubscriptionAddOn {
            add_on_code: keyed.decode_string("add_on_code")?,
            unit_amount_in_cents: keyed.decode_i64("unit_amount_in_cents")?,
            quantity: keyed.decode_scalar("quantity")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Subscription {
    pub uuid: String,
    pub account: Option<Url>,
    pub plan: PlanInfo,
    pub state: SubscriptionState,
    pub unit_amount_in_cents: i64,
    pub currency: Option<String>,
    pub quantity: u32,
    pub activated_at: Option<Timestamp>,
    pub canceled_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub current_period_started_at: Option<Timestamp>,
    pub current_period_ends_at: Option<Timestamp>,
    pub trial_started_at: Option<Timestamp>,
    pub trial_ends_at: Option<Timestamp>,
    pub tax_in_cents: Option<i64>,
    pub tax_type: Option<String>,
    pub tax_rate: Option<f64>,
    pub subscription_add_ons: Vec<SubscriptionAddOn>,
}

impl XmlTag for Subscription {
    const TAG: &'static str = "subscription";
}

impl Decode for Subscription {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let timestamp = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_timestamp);

        Ok(Subscription {
            uuid: keyed.decode_string("uuid")?,
            account: keyed.decode_if_present("account", KeyedContainer::decode_href)?,
            plan: keyed.decode("plan")?,
            state: keyed.decode("state")?,
            unit_amount_in_cents: keyed.decode_i64("unit_amount_in_cents")?,
            currency: keyed.decode_if_present("currency", KeyedContainer::decode_string)?,
            quantity: keyed.decode_scalar("quantity")?,
            activated_at: timestamp("activated_at")?,
            canceled_at: timestamp("canceled_at")?,
            expires_at: timestamp("expires_at")?,
            current_period_started_at: timestamp("current_period_started_at")?,
            current_period_ends_at: timestamp("current_period_ends_at")?,
            trial_started_at: timestamp("trial_started_at")?,
            trial_ends_at: timestamp("trial_ends_at")?,
            tax_in_cents: keyed.decode_if_present("tax_in_cents", KeyedContainer::decode_i64)?,
            tax_type: keyed.decode_if_present("tax_type", KeyedContainer::decode_string)?,
            tax_rate: keyed.decode_if_present("tax_rate", KeyedContainer::decode_scalar)?,
            subscription_add_ons: decode_list(&keyed, "subscription_add_ons")?,
        })
    }
}
