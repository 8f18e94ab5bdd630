use jiff::Timestamp;
use serde::Serialize;
use url::Url;

use crate::decoder::{Decode, Decoder, KeyedContainer, XmlTag};
use crate::err::Result;

xml_text_enum! {
    pub enum TransactionAction("transaction action") {
        Purchase => "purchase",
        Verify => "verify",
        Refund => "refund",
        Authorization => "authorization",
    }
}

xml_text_enum! {
    pub enum TransactionStatus("transaction status") {
        Success => "success",
        Failed => "failed",
        Void => "void",
        Declined => "declined",
        Scheduled => "scheduled",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Transaction {
    /// Payment method family, from the `type` attribute (`credit_card`, `paypal`, ...).
    pub kind: Option<String>,
    pub uuid: String,
    pub action: TransactionAction,
    pub amount_in_cents: i64,
    pub tax_in_cents: Option<i64>,
    pub currency: String,
    pub status: TransactionStatus,
    pub payment_method: Option<String>,
    pub reference: Option<String>,
    pub source: Option<String>,
    pub recurring: bool,
    pub test: bool,
    pub voidable: Option<bool>,
    pub refundable: Option<bool>,
    pub ip_address: Option<String>,
    pub created_at: Timestamp,
    pub account: Option<Url>,
    pub invoice: Option<Url>,
    pub subscription: Option<Url>,
}

impl XmlTag for Transaction {
    const TAG: &'static str = "transaction";
}

impl Decode for Transaction {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let text = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_string);
        let flag = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_bool);
        let link = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_href);

        Ok(Transaction {
            kind: decoder.attribute("type").map(str::to_owned),
            uuid: keyed.decode_string("uuid")?,
            action: keyed.decode("action")?,
            amount_in_cents: keyed.decode_i64("amount_in_cents")?,
            tax_in_cents: keyed.decode_if_present("tax_in_cents", KeyedContainer::decode_i64)?,
            currency: keyed.decode_string("currency")?,
            status: keyed.decode("status")?,
            payment_method: text("payment_method")?,
            reference: text("reference")?,
            source: text("source")?,
            recurring: flag("recurring")?.unwrap_or(false),
            test: flag("test")?.unwrap_or(false),
            voidable: flag("voidable")?,
            refundable: flag("refundable")?,
            ip_address: text("ip_address")?,
            created_at: keyed.decode_timestamp("created_at")?,
            account: link("account")?,
            invoice: link("invoice")?,
            subscription: link("subscription")?,
        })
    }
}
