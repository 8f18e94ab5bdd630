
use fixtures::*;

use billing_xml::recurly::{
    Account, AccountBalance, AccountState, ApiError, Invoice, InvoiceState, Notification,
    NotificationKind, Subscription, SubscriptionState, Transaction, TransactionAction,
    TransactionStatus,
};
use billing_xml::{DecoderSettings, decode, decode_batch};
use pretty_assertions::assert_eq;

#[test]
fn test_decodes_account_sample() {
    ensure_env_logger_initialized();
    let account: Account = decode(&read_sample("account.xml")).unwrap();

    assert_eq!(account.account_code, "1");
    assert_eq!(account.state, AccountState::Active);
    assert_eq!(account.email.as_deref(), Some("verena@example.com"));
    assert_eq!(account.company_name, None);
    assert_eq!(
        account.address.unwrap().zip.as_deref(),
        Some("94105")
    );
    assert_eq!(account.created_at.to_string(), "2016-08-03T15:44:05Z");
    assert_eq!(account.has_active_subscription, Some(true));
    assert_eq!(account.has_past_due_invoice, Some(false));
    assert_eq!(
        account.subscriptions.unwrap().as_str(),
        "https://api.recurly.com/v2/accounts/1/subscriptions"
    );
}

#[test]
fn test_decodes_account_balance_sample() {
    ensure_env_logger_initialized();
    let balance: AccountBalance = decode(&read_sample("account_balance.xml")).unwrap();

    assert!(!balance.past_due);
    assert_eq!(balance.balance_in_cents.in_currency("USD"), Some(2910));
    assert_eq!(balance.balance_in_cents.in_currency("EUR"), Some(-520));
}

#[test]
fn test_decodes_subscription_sample() {
    ensure_env_logger_initialized();
    let subscription: Subscription = decode(&read_sample("subscription.xml")).unwrap();

    assert_eq!(subscription.plan.plan_code, "gold");
    assert_eq!(subscription.state, SubscriptionState::Active);
    assert_eq!(subscription.quantity, 1);
    assert_eq!(subscription.canceled_at, None);
    assert_eq!(subscription.subscription_add_ons.len(), 1);
    assert_eq!(subscription.subscription_add_ons[0].quantity, 3);
}

#[test]
fn test_decodes_subscription_list_sample() {
    ensure_env_logger_initialized();
    let subscriptions: Vec<Subscription> = decode(&read_sample("subscriptions.xml")).unwrap();

    assert_eq!(subscriptions.len(), 2);
    assert_eq!(subscriptions[0].state, SubscriptionState::Active);
    assert_eq!(subscriptions[1].state, SubscriptionState::Canceled);
    assert_eq!(
        subscriptions[1].canceled_at.unwrap().to_string(),
        "2011-07-01T09:30:00Z"
    );
    assert!(subscriptions[1].subscription_add_ons.is_empty());
}

#[test]
fn test_decodes_invoice_sample() {
    ensure_env_logger_initialized();
    let invoice: Invoice = decode(&read_sample("invoice.xml")).unwrap();

    assert_eq!(invoice.state, InvoiceState::Collected);
    assert_eq!(invoice.invoice_number, 1108);
    assert_eq!(invoice.total_in_cents, 1400);

    let line_item_total: i64 = invoice.line_items.iter().map(|a| a.total_in_cents).sum();
    assert_eq!(line_item_total, invoice.subtotal_in_cents);

    assert_eq!(invoice.transactions.len(), 1);
    let transaction = &invoice.transactions[0];
    assert_eq!(transaction.status, TransactionStatus::Success);
    assert!(transaction.recurring);
    assert_eq!(transaction.ip_address, None);
}

#[test]
fn test_decodes_invoice_list_sample() {
    ensure_env_logger_initialized();
    let invoices: Vec<Invoice> = decode(&read_sample("invoices.xml")).unwrap();
    let invoice: Invoice = decode(&read_sample("invoice.xml")).unwrap();

    assert_eq!(invoices, vec![invoice]);
}

#[test]
fn test_decodes_transaction_sample() {
    ensure_env_logger_initialized();
    let transaction: Transaction = decode(&read_sample("transaction.xml")).unwrap();

    assert_eq!(transaction.kind.as_deref(), Some("credit_card"));
    assert_eq!(transaction.action, TransactionAction::Purchase);
    assert_eq!(transaction.amount_in_cents, 1400);
    assert_eq!(transaction.currency, "EUR");
}

#[test]
fn test_decodes_error_samples() {
    ensure_env_logger_initialized();
    let errors: Vec<ApiError> = decode(&read_sample("errors.xml")).unwrap();
    assert_eq!(errors.len(), 2);
    assert_eq!(errors[1].message, "can't be blank");

    let not_found: ApiError = decode(&read_sample("not_found_error.xml")).unwrap();
    assert_eq!(not_found.symbol, "not_found");
    assert_eq!(not_found.field, None);
}

#[test]
fn test_decodes_notification_samples() {
    ensure_env_logger_initialized();

    let notification: Notification =
        decode(&std::fs::read(new_subscription_notification()).unwrap()).unwrap();
    assert_eq!(notification.kind, NotificationKind::NewSubscription);
    let subscription = notification.subscription.unwrap();
    assert_eq!(subscription.plan.plan_code, "gold");
    assert_eq!(subscription.total_amount_in_cents, Some(800));
    assert_eq!(subscription.canceled_at, None);

    let notification: Notification =
        decode(&std::fs::read(successful_payment_notification()).unwrap()).unwrap();
    assert_eq!(notification.kind, NotificationKind::SuccessfulPayment);
    let transaction = notification.transaction.unwrap();
    assert_eq!(transaction.amount_in_cents, 1400);
    assert_eq!(
        transaction.message.as_deref(),
        Some("Bogus Gateway: Forced success")
    );

    let notification: Notification =
        decode(&std::fs::read(new_invoice_notification()).unwrap()).unwrap();
    assert_eq!(notification.kind, NotificationKind::NewInvoice);
    assert_eq!(notification.account.account_code, "1");
    let invoice = notification.invoice.unwrap();
    assert_eq!(invoice.state, InvoiceState::Open);
    assert_eq!(invoice.closed_at, None);
}

#[test]
fn test_decodes_all_notifications_in_a_batch() {
    ensure_env_logger_initialized();
    let documents = vec![
        std::fs::read(new_subscription_notification()).unwrap(),
        std::fs::read(successful_payment_notification()).unwrap(),
        read_sample("account.xml"),
        std::fs::read(new_invoice_notification()).unwrap(),
    ];

    let results = decode_batch::<Notification, _>(&documents, &DecoderSettings::new());

    let kinds: Vec<_> = results
        .iter()
        .map(|result| result.as_ref().ok().map(|n| n.kind))
        .collect();
    assert_eq!(
        kinds,
        vec![
            Some(NotificationKind::NewSubscription),
            Some(NotificationKind::SuccessfulPayment),
            None,
            Some(NotificationKind::NewInvoice),
        ]
    );
}
