//! Wire contracts of the banking backend.
//!
//! Field names follow the backend's camelCase JSON. Shapes are owned by the
//! server; unknown fields on records that are sent back unchanged are kept in
//! a flattened `extra` map so nothing is lost on a round trip.

pub mod account;
pub mod customer;
pub mod operation;

pub use account::{AccountDetails, AccountOperation, AccountStatus, BankAccount, OperationType};
pub use customer::{Customer, CustomerId};
pub use operation::{OperationRequest, TransferRequest};
