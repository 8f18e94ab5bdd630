//! Webhook notifications.
//!
//! The root element names the event (`<new_subscription_notification>`, ...). Each
//! notification carries the affected account and, depending on the event, a condensed
//! subscription, transaction or invoice. Those condensed records differ from the API
//! records (`id` instead of `uuid`, `date` instead of `created_at`), so they get their own
//! types here.

use jiff::Timestamp;
use serde::Serialize;

use crate::decoder::{Decode, Decoder, KeyedContainer};
use crate::err::Result;
use crate::recurly::{
    InvoiceState, PlanInfo, SubscriptionState, TransactionAction, TransactionStatus,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NewAccount,
    CanceledAccount,
    ReactivatedAccount,
    BillingInfoUpdated,
    NewSubscription,
    UpdatedSubscription,
    CanceledSubscription,
    ExpiredSubscription,
    RenewedSubscription,
    SuccessfulPayment,
    FailedPayment,
    SuccessfulRefund,
    VoidPayment,
    NewInvoice,
    ClosedInvoice,
    PastDueInvoice,
    ProcessingInvoice,
    /// Root tag missing from the table, the tag itself is kept in `Notification::tag`.
    Unknown,
}

const ROOT_TAGS: &[(&str, NotificationKind)] = &[
    ("new_account_notification", NotificationKind::NewAccount),
    ("canceled_account_notification", NotificationKind::CanceledAccount),
    ("reactivated_account_notification", NotificationKind::ReactivatedAccount),
    ("billing_info_updated_notification", NotificationKind::BillingInfoUpdated),
    ("new_subscription_notification", NotificationKind::NewSubscription),
    ("updated_subscription_notification", NotificationKind::UpdatedSubscription),
    ("canceled_subscription_notification", NotificationKind::CanceledSubscription),
    ("expired_subscription_notification", NotificationKind::ExpiredSubscription),
    ("renewed_subscription_notification", NotificationKind::RenewedSubscription),
    ("successful_payment_notification", NotificationKind::SuccessfulPayment),
    ("failed_payment_notification", NotificationKind::FailedPayment),
    ("successful_refund_notification", NotificationKind::SuccessfulRefund),
    ("void_payment_notification", NotificationKind::VoidPayment),
    ("new_invoice_notification", NotificationKind::NewInvoice),
    ("closed_invoice_notification", NotificationKind::ClosedInvoice),
    ("past_due_invoice_notification", NotificationKind::PastDueInvoice),
    ("processing_invoice_notification", NotificationKind::ProcessingInvoice),
];

impl NotificationKind {
    pub fn from_root_tag(tag: &str) -> NotificationKind {
        ROOT_TAGS
            .iter()
            .find(|(known, _)| *known == tag)
            .map(|(_, kind)| *kind)
            .unwrap_or(NotificationKind::Unknown)
    }

    /// Root tag of this kind, `None` for `Unknown`.
    pub fn root_tag(&self) -> Option<&'static str> {
        ROOT_TAGS
            .iter()
            .find(|(_, kind)| kind == self)
            .map(|(tag, _)| *tag)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Notification {
    pub tag: String,
    pub kind: NotificationKind,
    pub account: NotificationAccount,
    pub subscription: Option<NotificationSubscription>,
    pub transaction: Option<NotificationTransaction>,
    pub invoice: Option<NotificationInvoice>,
}

impl Decode for Notification {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let tag = decoder.tag().unwrap_or_default();

        Ok(Notification {
            tag: tag.to_owned(),
            kind: NotificationKind::from_root_tag(tag),
            account: keyed.decode("account")?,
            subscription: keyed.decode_if_present("subscription", KeyedContainer::decode)?,
            transaction: keyed.decode_if_present("transaction", KeyedContainer::decode)?,
            invoice: keyed.decode_if_present("invoice", KeyedContainer::decode)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationAccount {
    pub account_code: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
}

impl Decode for NotificationAccount {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let text = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_string);

        Ok(NotificationAccount {
            account_code: keyed.decode_string("account_code")?,
            username: text("username")?,
            email: text("email")?,
            first_name: text("first_name")?,
            last_name: text("last_name")?,
            company_name: text("company_name")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationSubscription {
    pub plan: PlanInfo,
    pub uuid: String,
    pub state: SubscriptionState,
    pub quantity: u32,
    pub total_amount_in_cents: Option<i64>,
    pub activated_at: Option<Timestamp>,
    pub canceled_at: Option<Timestamp>,
    pub expires_at: Option<Timestamp>,
    pub current_period_started_at: Option<Timestamp>,
    pub current_period_ends_at: Option<Timestamp>,
    pub trial_started_at: Option<Timestamp>,
    pub trial_ends_at: Option<Timestamp>,
}

impl Decode for NotificationSubscription {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let timestamp = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_timestamp);

        Ok(NotificationSubscription {
            plan: keyed.decode("plan")?,
            uuid: keyed.decode_string("uuid")?,
            state: keyed.decode("state")?,
            quantity: keyed.decode_scalar("quantity")?,
            total_amount_in_cents: keyed
                .decode_if_present("total_amount_in_cents", KeyedContainer::decode_i64)?,
            activated_at: timestamp("activated_at")?,
            canceled_at: timestamp("canceled_at")?,
            expires_at: timestamp("expires_at")?,
            current_period_started_at: timestamp("current_period_started_at")?,
            current_period_ends_at: timestamp("current_period_ends_at")?,
            trial_started_at: timestamp("trial_started_at")?,
            trial_ends_at: timestamp("trial_ends_at")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationTransaction {
    pub id: String,
    pub invoice_id: Option<String>,
    pub invoice_number: Option<u64>,
    pub subscription_id: Option<String>,
    pub action: TransactionAction,
    pub date: Timestamp,
    pub amount_in_cents: i64,
    pub status: TransactionStatus,
    pub message: Option<String>,
    pub reference: Option<String>,
    pub source: Option<String>,
    pub test: bool,
    pub voidable: Option<bool>,
    pub refundable: Option<bool>,
}

impl Decode for NotificationTransaction {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let text = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_string);
        let flag = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_bool);

        Ok(NotificationTransaction {
            id: keyed.decode_string("id")?,
            invoice_id: text("invoice_id")?,
            invoice_number: keyed
                .decode_if_present("invoice_number", KeyedContainer::decode_scalar)?,
            subscription_id: text("subscription_id")?,
            action: keyed.decode("action")?,
            date: keyed.decode_timestamp("date")?,
            amount_in_cents: keyed.decode_i64("amount_in_cents")?,
            status: keyed.decode("status")?,
            message: text("message")?,
            reference: text("reference")?,
            source: text("source")?,
            test: flag("test")?.unwrap_or(false),
            voidable: flag("voidable")?,
            refundable: flag("refundable")?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NotificationInvoice {
    pub uuid: String,
    pub subscription_id: Option<String>,
    pub state: InvoiceState,
    pub invoice_number: u64,
    pub total_in_cents: i64,
    pub currency: String,
    pub date: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub collection_method: Option<String>,
}

impl Decode for NotificationInvoice {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();

        Ok(NotificationInvoice {
            uuid: keyed.decode_string("uuid")?,
            subscription_id: keyed
                .decode_if_present("subscription_id", KeyedContainer::decode_string)?,
            state: keyed.decode("state")?,
            invoice_number: keyed.decode_scalar("invoice_number")?,
            total_in_cents: keyed.decode_i64("total_in_cents")?,
            currency: keyed.decode_string("currency")?,
            date: keyed.decode_timestamp("date")?,
            closed_at: keyed.decode_if_present("closed_at", KeyedContainer::decode_timestamp)?,
            collection_method: keyed
                .decode_if_present("collection_method", KeyedContainer::decode_string)?,
        })
    }
}
