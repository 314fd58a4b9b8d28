use std::sync::Arc;

use models::{Customer, CustomerId};
use tracing::{info, instrument};

use crate::errors::ClientError;
use crate::transport::{execute, fetch, ApiRequest, ReqwestTransport, Transport};

/// Customer management. Filtering, create-vs-update and deletion semantics
/// all live on the backend; records pass through untouched.
pub struct CustomerService<T: Transport = ReqwestTransport> {
    transport: Arc<T>,
}

impl<T: Transport> Clone for CustomerService<T> {
    fn clone(&self) -> Self { Self { transport: Arc::clone(&self.transport) } }
}

impl<T: Transport> CustomerService<T> {
    pub fn new(transport: Arc<T>) -> Self { Self { transport } }

    #[instrument(skip(self))]
    pub async fn get_customers(&self) -> Result<Vec<Customer>, ClientError> {
        fetch(&*self.transport, ApiRequest::get("/customers")).await
    }

    /// Keyword goes out verbatim; only the transport's query encoding applies.
    #[instrument(skip(self))]
    pub async fn search_customers(&self, keyword: &str) -> Result<Vec<Customer>, ClientError> {
        fetch(&*self.transport, ApiRequest::get("/customers/search").query("keyword", keyword)).await
    }

    #[instrument(skip(self))]
    pub async fn get_customer(&self, id: CustomerId) -> Result<Customer, ClientError> {
        fetch(&*self.transport, ApiRequest::get(format!("/customers/{id}"))).await
    }

    /// Create or update, the backend decides which from the record itself.
    #[instrument(skip(self, customer), fields(customer_id = ?customer.id))]
    pub async fn save_customer(&self, customer: &Customer) -> Result<Customer, ClientError> {
        let saved: Customer = fetch(&*self.transport, ApiRequest::post("/customers").json(customer)?).await?;
        info!(customer_id = ?saved.id, "customer saved");
        Ok(saved)
    }

    #[instrument(skip(self, customer))]
    pub async fn update_customer(&self, id: CustomerId, customer: &Customer) -> Result<Customer, ClientError> {
        fetch(&*self.transport, ApiRequest::put(format!("/customers/{id}")).json(customer)?).await
    }

    #[instrument(skip(self))]
    pub async fn delete_customer(&self, id: CustomerId) -> Result<(), ClientError> {
        execute(&*self.transport, ApiRequest::delete(format!("/customers/{id}"))).await?;
        info!(customer_id = id, "customer deleted");
        Ok(())
    }
}
