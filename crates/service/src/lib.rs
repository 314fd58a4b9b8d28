//! Client-side access layer for the banking backend.
//! - `accounts`: paged details, debit, credit and transfer.
//! - `customers`: list, search, save and delete.
//! - `transport`: the injected HTTP seam and its reqwest implementation.
//!
//! Every service call maps to exactly one outbound request; there is no
//! caching, retrying or local validation.

use std::sync::Arc;

use configs::BackendConfig;

pub mod errors;
pub mod transport;
pub mod accounts;
pub mod customers;
#[cfg(test)]
pub mod test_support;

pub use accounts::AccountsService;
pub use customers::CustomerService;
pub use errors::ClientError;
pub use transport::{ApiRequest, ApiResponse, ReqwestTransport, Transport};

/// Both services sharing one transport.
pub struct BankClient<T: Transport = ReqwestTransport> {
    pub accounts: AccountsService<T>,
    pub customers: CustomerService<T>,
}

impl<T: Transport> BankClient<T> {
    pub fn new(transport: Arc<T>) -> Self {
        Self {
            accounts: AccountsService::new(Arc::clone(&transport)),
            customers: CustomerService::new(transport),
        }
    }
}

impl BankClient<ReqwestTransport> {
    pub fn from_config(cfg: &BackendConfig) -> Result<Self, ClientError> {
        Ok(Self::new(Arc::new(ReqwestTransport::from_config(cfg)?)))
    }
}
