//! Records of the Recurly v2 XML API and its webhook notifications.
//!
//! Every record lists the elements it reads in its `Decode` impl. Optional fields are read
//! with `decode_if_present`, so both an absent element and an element carrying
//! `nil="nil"` / `nil="true"` decode to `None`. Elements the records do not name are ignored.
//!
//! List responses (`<subscriptions type="array">`, `<invoices type="array">`, ...) decode
//! into `Vec<T>`; each record declares its element tag through `XmlTag`.

mod account;
mod errors;
mod invoice;
mod notification;
mod subscription;
mod transaction;

pub use self::account::{Account, AccountBalance, AccountState, Address, Amount};
pub use self::errors::ApiError;
pub use self::invoice::{Adjustment, Invoice, InvoiceState};
pub use self::notification::{
    Notification, NotificationAccount, NotificationInvoice, NotificationKind,
    NotificationSubscription, NotificationTransaction,
};
pub use self::subscription::{PlanInfo, Subscription, SubscriptionAddOn, SubscriptionState};
pub use self::transaction::{Transaction, TransactionAction, TransactionStatus};

use crate::decoder::{Decode, KeyedContainer, XmlTag};
use crate::err::Result;

/// Reads an optional list, an absent or nil list element is empty.
pub(crate) fn decode_list<T: Decode + XmlTag>(
    keyed: &KeyedContainer<'_>,
    key: &str,
) -> Result<Vec<T>> {
    Ok(keyed
        .decode_if_present(key, KeyedContainer::decode::<Vec<T>>)?
        .unwrap_or_default())
}
