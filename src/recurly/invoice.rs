use jiff::Timestamp;
use serde::Serialize;
use url::Url;

use crate::decoder::{Decode, Decoder, KeyedContainer, XmlTag};
use crate::err::Result;
use crate::recurly::{decode_list, Transaction};

xml_text_enum! {
    pub enum InvoiceState("invoice state") {
        Pending => "pending",
        Paid => "paid",
        Failed => "failed",
        PastDue => "past_due",
        Open => "open",
        Closed => "closed",
        Voided => "voided",
        Processing => "processing",
        Collected => "collected",
    }
}

/// Charge or credit line of an invoice.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Adjustment {
    pub kind: Option<String>,
    pub uuid: String,
    pub description: Option<String>,
    pub accounting_code: Option<String>,
    pub origin: Option<String>,
    pub unit_amount_in_cents: i64,
    pub quantity: u32,
    pub discount_in_cents: Option<i64>,
    pub tax_in_cents: Option<i64>,
    pub total_in_cents: i64,
    pub currency: String,
    pub taxable: Option<bool>,
    pub start_date: Timestamp,
    pub end_date: Option<Timestamp>,
    pub created_at: Option<Timestamp>,
}

impl XmlTag for Adjustment {
    const TAG: &'static str = "adjustment";
}

impl Decode for Adjustment {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let text = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_string);
        let cents = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_i64);

        Ok(Adjustment {
            kind: decoder.attribute("type").map(str::to_owned),
            uuid: keyed.decode_string("uuid")?,
            description: text("description")?,
            accounting_code: text("accounting_code")?,
            origin: text("origin")?,
            unit_amount_in_cents: keyed.decode_i64("unit_amount_in_cents")?,
            quantity: keyed.decode_scalar("quantity")?,
            discount_in_cents: cents("discount_in_cents")?,
            tax_in_cents: cents("tax_in_cents")?,
            total_in_cents: keyed.decode_i64("total_in_cents")?,
            currency: keyed.decode_string("currency")?,
            taxable: keyed.decode_if_present("taxable", KeyedContainer::decode_bool)?,
            start_date: keyed.decode_timestamp("start_date")?,
            end_date: keyed.decode_if_present("end_date", KeyedContainer::decode_timestamp)?,
            created_at: keyed.decode_if_present("created_at", KeyedContainer::decode_timestamp)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Invoice {
    pub uuid: String,
    pub account: Option<Url>,
    pub subscription: Option<Url>,
    pub state: InvoiceState,
    pub invoice_number: u64,
    pub invoice_number_prefix: Option<String>,
    pub po_number: Option<String>,
    pub vat_number: Option<String>,
    pub subtotal_in_cents: i64,
    pub tax_in_cents: i64,
    pub total_in_cents: i64,
    pub currency: String,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub line_items: Vec<Adjustment>,
    pub transactions: Vec<Transaction>,
}

impl XmlTag for Invoice {
    const TAG: &'static str = "invoice";
}

impl Decode for Invoice {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let text = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_string);

        Ok(Invoice {
            uuid: keyed.decode_string("uuid")?,
            account: keyed.decode_if_present("account", KeyedContainer::decode_href)?,
            subscription: keyed.decode_if_present("subscription", KeyedContainer::decode_href)?,
            state: keyed.decode("state")?,
            invoice_number: keyed.decode_scalar("invoice_number")?,
            invoice_number_prefix: text("invoice_number_prefix")?,
            po_number: text("po_number")?,
            vat_number: text("vat_number")?,
            subtotal_in_cents: keyed.decode_i64("subtotal_in_cents")?,
            tax_in_cents: keyed.decode_i64("tax_in_cents")?,
            total_in_cents: keyed.decode_i64("total_in_cents")?,
            currency: keyed.decode_string("currency")?,
            created_at: keyed.decode_timestamp("created_at")?,
            closed_at: keyed.decode_if_present("closed_at", KeyedContainer::decode_timestamp)?,
            line_items: decode_list(&keyed, "line_items")?,
            transactions: decode_list(&keyed, "transactions")?,
        })
    }
}
