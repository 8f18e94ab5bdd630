use std::collections::BTreeMap;

use jiff::Timestamp;
use serde::Serialize;
use url::Url;

use crate::decoder::{Decode, Decoder, KeyedContainer, XmlTag};
use crate::err::Result;

xml_text_enum! {
    pub enum AccountState("account state") {
        Active => "active",
        Closed => "closed",
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Account {
    pub account_code: String,
    pub state: AccountState,
    pub username: Option<String>,
    pub email: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub company_name: Option<String>,
    pub vat_number: Option<String>,
    pub tax_exempt: bool,
    pub address: Option<Address>,
    pub hosted_login_token: String,
    pub created_at: Timestamp,
    pub closed_at: Option<Timestamp>,
    pub has_active_subscription: Option<bool>,
    pub has_past_due_invoice: Option<bool>,
    /// Links to the account's sub-resources.
    pub subscriptions: Option<Url>,
    pub invoices: Option<Url>,
    pub billing_info: Option<Url>,
}

impl XmlTag for Account {
    const TAG: &'static str = "account";
}

impl Decode for Account {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();

        Ok(Account {
            account_code: keyed.decode_string("account_code")?,
            state: keyed.decode("state")?,
            username: keyed.decode_if_present("username", KeyedContainer::decode_string)?,
            email: keyed.decode_if_present("email", KeyedContainer::decode_string)?,
            first_name: keyed.decode_if_present("first_name", KeyedContainer::decode_string)?,
            last_name: keyed.decode_if_present("last_name", KeyedContainer::decode_string)?,
            company_name: keyed
                .decode_if_present("company_name", KeyedContainer::decode_string)?,
            vat_number: keyed.decode_if_present("vat_number", KeyedContainer::decode_string)?,
            tax_exempt: keyed
                .decode_if_present("tax_exempt", KeyedContainer::decode_bool)?
                .unwrap_or(false),
            address: keyed.decode_if_present("address", KeyedContainer::decode)?,
            hosted_login_token: keyed.decode_string("hosted_login_token")?,
            created_at: keyed.decode_timestamp("created_at")?,
            closed_at: keyed.decode_if_present("closed_at", KeyedContainer::decode_timestamp)?,
            has_active_subscription: keyed
                .decode_if_present("has_active_subscription", KeyedContainer::decode_bool)?,
            has_past_due_invoice: keyed
                .decode_if_present("has_past_due_invoice", KeyedContainer::decode_bool)?,
            subscriptions: keyed.decode_if_present("subscriptions", KeyedContainer::decode_href)?,
            invoices: keyed.decode_if_present("invoices", KeyedContainer::decode_href)?,
            billing_info: keyed.decode_if_present("billing_info", KeyedContainer::decode_href)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct Address {
    pub address1: Option<String>,
    pub address2: Option<String>,
    pub city: Option<String>,
    pub state: Option<String>,
    pub zip: Option<String>,
    pub country: Option<String>,
    pub phone: Option<String>,
}

impl Decode for Address {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let field = |key: &str| keyed.decode_if_present(key, KeyedContainer::decode_string);

        Ok(Address {
            address1: field("address1")?,
            address2: field("address2")?,
            city: field("city")?,
            state: field("state")?,
            zip: field("zip")?,
            country: field("country")?,
            phone: field("phone")?,
        })
    }
}

/// Amounts in cents keyed by currency code, e.g. `<USD type="integer">2910</USD>`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Amount {
    pub cents: BTreeMap<String, i64>,
}

impl Amount {
    pub fn in_currency(&self, currency: &str) -> Option<i64> {
        self.cents.get(currency).copied()
    }
}

impl Decode for Amount {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();
        let mut cents = BTreeMap::new();

        for currency in keyed.keys() {
            cents
                .entry(currency.to_owned())
                .or_insert(keyed.decode_i64(currency)?);
        }

        Ok(Amount { cents })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccountBalance {
    pub account: Url,
    pub past_due: bool,
    pub balance_in_cents: Amount,
}

impl Decode for AccountBalance {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed();

        Ok(AccountBalance {
            account: keyed.decode_href("account")?,
            past_due: keyed.decode_bool("past_due")?,
            balance_in_cents: keyed.decode("balance_in_cents")?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decode;
    use crate::err::DecodingError;
    use pretty_assertions::assert_eq;

    const ACCOUNT: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<account href="https://api.recurly.com/v2/accounts/1">
  <adjustments href="https://api.recurly.com/v2/accounts/1/adjustments"/>
  <billing_info href="https://api.recurly.com/v2/accounts/1/billing_info" type="credit_card"/>
  <invoices href="https://api.recurly.com/v2/accounts/1/invoices"/>
  <subscriptions href="https://api.recurly.com/v2/accounts/1/subscriptions"/>
  <account_code>1</account_code>
  <state>active</state>
  <username nil="nil"></username>
  <email>verena@example.com</email>
  <first_name>Verena</first_name>
  <last_name>Example</last_name>
  <company_name></company_name>
  <vat_number nil="nil"></vat_number>
  <tax_exempt type="boolean">false</tax_exempt>
  <address>
    <address1>123 Main St.</address1>
    <address2 nil="nil"></address2>
    <city>San Francisco</city>
    <state>CA</state>
    <zip>94105</zip>
    <country>US</country>
    <phone nil="nil"></phone>
  </address>
  <accept_language nil="nil"></accept_language>
  <hosted_login_token>a92468579e9c4231a6c0031c4716c01d</hosted_login_token>
  <created_at type="datetime">2011-10-25T12:00:00Z</created_at>
  <closed_at nil="nil"></closed_at>
  <has_active_subscription type="boolean">true</has_active_subscription>
</account>"#;

    #[test]
    fn test_decodes_account() {
        let account: Account = decode(ACCOUNT.as_bytes()).unwrap();

        assert_eq!(account.account_code, "1");
        assert_eq!(account.state, AccountState::Active);
        assert_eq!(account.username, None);
        assert_eq!(account.email.as_deref(), Some("verena@example.com"));
        assert_eq!(account.company_name.as_deref(), Some(""));
        assert!(!account.tax_exempt);
        assert_eq!(account.created_at.to_string(), "2011-10-25T12:00:00Z");
        assert_eq!(account.closed_at, None);
        assert_eq!(account.has_active_subscription, Some(true));
        assert_eq!(account.has_past_due_invoice, None);
        assert_eq!(
            account.billing_info.unwrap().as_str(),
            "https://api.recurly.com/v2/accounts/1/billing_info"
        );

        let address = account.address.unwrap();
        assert_eq!(address.city.as_deref(), Some("San Francisco"));
        assert_eq!(address.address2, None);
        assert_eq!(address.phone, None);
    }

    #[test]
    fn test_unknown_state_is_an_error() {
        let xml = ACCOUNT.replace("<state>active</state>", "<state>frozen</state>");
        let err = decode::<Account>(xml.as_bytes()).unwrap_err();

        assert_eq!(err.coding_path(), "state");
        match err.root_cause() {
            DecodingError::UnknownValue { what, value } => {
                assert_eq!(*what, "account state");
                assert_eq!(value, "frozen");
            }
            other => panic!("unexpected error {other:?}"),
        }
    }

    #[test]
    fn test_decodes_account_balance() {
        let balance: AccountBalance = decode(
            br#"<account_balance href="https://api.recurly.com/v2/accounts/1/balance">
  <account href="https://api.recurly.com/v2/accounts/1"/>
  <past_due type="boolean">false</past_due>
  <balance_in_cents>
    <USD type="integer">2910</USD>
    <EUR type="integer">-520</EUR>
  </balance_in_cents>
</account_balance>"#,
        )
        .unwrap();

        assert!(!balance.past_due);
        assert_eq!(balance.account.as_str(), "https://api.recurly.com/v2/accounts/1");
        assert_eq!(balance.balance_in_cents.in_currency("USD"), Some(2910));
        assert_eq!(balance.balance_in_cents.in_currency("EUR"), Some(-520));
        assert_eq!(balance.balance_in_cents.in_currency("GBP"), None);
    }
}
