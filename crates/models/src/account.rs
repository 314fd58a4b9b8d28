use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::customer::Customer;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OperationType {
    Debit,
    Credit,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AccountStatus {
    Created,
    Activated,
    Suspended,
}

/// Interpret a backend date, either ISO-8601 text or epoch milliseconds.
pub fn parse_backend_date(raw: &Value) -> Option<DateTime<Utc>> {
    match raw {
        Value::String(s) => DateTime::parse_from_rfc3339(s).ok().map(|d| d.with_timezone(&Utc)),
        Value::Number(n) => n.as_i64().and_then(|ms| Utc.timestamp_millis_opt(ms).single()),
        _ => None,
    }
}

/// One line of an account's history. Dates stay as the backend sent them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountOperation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub operation_date: Option<Value>,
    pub amount: f64,
    #[serde(rename = "type")]
    pub kind: OperationType,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccountOperation {
    pub fn operation_date_utc(&self) -> Option<DateTime<Utc>> {
        self.operation_date.as_ref().and_then(parse_backend_date)
    }
}

/// Account details returned by the paged operations query.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountDetails {
    pub account_id: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub current_page: u32,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub page_size: u32,
    #[serde(rename = "accountOperationDTOS", default)]
    pub operations: Vec<AccountOperation>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AccountDetails {
    pub fn is_last_page(&self) -> bool {
        self.current_page.saturating_add(1) >= self.total_pages
    }
}

/// A bank account as listed by the backend. Current and saving accounts carry
/// different extra fields (`overDraft`, `interestRate`), kept in `extra`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BankAccount {
    pub id: String,
    #[serde(default)]
    pub balance: f64,
    #[serde(default)]
    pub created_at: Option<Value>,
    #[serde(default)]
    pub status: Option<AccountStatus>,
    #[serde(rename = "customerDTO", default)]
    pub customer: Option<Customer>,
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl BankAccount {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        self.created_at.as_ref().and_then(parse_backend_date)
    }
}
