use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type CustomerId = i64;

/// A bank customer. The same record is sent for create and update; the
/// backend tells them apart by `id`, so only a missing `id` is left off the wire.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<CustomerId>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Customer {
    pub fn new(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self { id: None, name: Some(name.into()), email: Some(email.into()), extra: Map::new() }
    }

    pub fn with_id(mut self, id: CustomerId) -> Self {
        self.id = Some(id);
        self
    }
}
