use std::sync::Arc;

use models::{AccountDetails, AccountOperation, BankAccount, OperationRequest, TransferRequest};
use tracing::{info, instrument};

use crate::errors::ClientError;
use crate::transport::{execute, fetch, ApiRequest, ReqwestTransport, Transport};

/// Account operations against the backend. Each method issues exactly one
/// request; amounts and descriptions go out as given.
pub struct AccountsService<T: Transport = ReqwestTransport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for AccountsService<T> {
    fn clone(&self) -> Self { Self { transport: Arc::clone(&self.transport) } }
}

impl<T: Transport> AccountsService<T> {
    pub fn new(transport: Arc<T>) -> Self { Self { transport } }

    /// One page of an account's operations together with its balance.
    #[instrument(skip(self))]
    pub async fn get_account(&self, account_id: &str, page: u32, size: u32) -> Result<AccountDetails, ClientError> {
        let req = ApiRequest::get(format!("/accounts/{account_id}/pageOperations"))
            .query("page", page)
            .query("size", size);
        fetch(&*self.transport, req).await
    }

    #[instrument(skip(self))]
    pub async fn get_bank_account(&self, account_id: &str) -> Result<BankAccount, ClientError> {
        fetch(&*self.transport, ApiRequest::get(format!("/accounts/{account_id}"))).await
    }

    #[instrument(skip(self))]
    pub async fn list_accounts(&self) -> Result<Vec<BankAccount>, ClientError> {
        fetch(&*self.transport, ApiRequest::get("/accounts")).await
    }

    /// Full, unpaged operation history.
    #[instrument(skip(self))]
    pub async fn account_history(&self, account_id: &str) -> Result<Vec<AccountOperation>, ClientError> {
        fetch(&*self.transport, ApiRequest::get(format!("/accounts/{account_id}/history"))).await
    }

    /// Returns the operation as echoed by the backend.
    #[instrument(skip(self, description))]
    pub async fn debit(&self, account_id: &str, amount: f64, description: &str) -> Result<OperationRequest, ClientError> {
        let body = OperationRequest { account_id: account_id.to_string(), amount, description: description.to_string() };
        let echoed = fetch(&*self.transport, ApiRequest::post("/accounts/debit").json(&body)?).await?;
        info!(account_id, amount, "debit accepted");
        Ok(echoed)
    }

    #[instrument(skip(self, description))]
    pub async fn credit(&self, account_id: &str, amount: f64, description: &str) -> Result<OperationRequest, ClientError> {
        let body = OperationRequest { account_id: account_id.to_string(), amount, description: description.to_string() };
        let echoed = fetch(&*self.transport, ApiRequest::post("/accounts/credit").json(&body)?).await?;
        info!(account_id, amount, "credit accepted");
        Ok(echoed)
    }

    /// Atomicity across both accounts is the backend's concern.
    #[instrument(skip(self, description))]
    pub async fn transfer(
        &self,
        account_source: &str,
        account_destination: &str,
        amount: f64,
        description: &str,
    ) -> Result<(), ClientError> {
        let body = TransferRequest {
            account_source: account_source.to_string(),
            account_destination: account_destination.to_string(),
            amount,
            description: description.to_string(),
        };
        execute(&*self.transport, ApiRequest::post("/accounts/transfer").json(&body)?).await?;
        info!(account_source, account_destination, amount, "transfer accepted");
        Ok(())
    }
}
