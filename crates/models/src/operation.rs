use serde::{Deserialize, Serialize};

/// Body of a debit or credit. The backend echoes it back on success.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperationRequest {
    pub account_id: String,
    pub amount: f64,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferRequest {
    pub account_source: String,
    pub account_destination: String,
    pub amount: f64,
    pub description: String,
}
