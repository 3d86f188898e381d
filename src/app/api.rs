//! Response envelope for the web layer
//!
//! Every lookup is returned to the address forms wrapped in the same JSON
//! shape, `{success, message?, data?, error?}`, with absent fields omitted.
//! [`CatalogApi`] runs a query operation and produces the status code and
//! envelope for it; routing and transport belong to the web layer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::app::services::catalog_query::CatalogQueryService;
use crate::app::services::store::CatalogStore;
use crate::{Error, Result};

pub const STATUS_OK: u16 = 200;
pub const STATUS_BAD_REQUEST: u16 = 400;
pub const STATUS_NOT_FOUND: u16 = 404;
pub const STATUS_INTERNAL_ERROR: u16 = 500;

/// Uniform response envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: Some(message.into()),
            data: Some(data),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            message: None,
            data: None,
            error: Some(error.into()),
        }
    }
}

impl<T: Serialize> ApiResponse<T> {
    /// Serialize the envelope to a JSON string
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    /// Pretty-printed JSON, for terminal output
    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Status code for an error returned by a lookup
pub fn status_for(error: &Error) -> u16 {
    match error {
        Error::InvalidInput { .. } => STATUS_BAD_REQUEST,
        Error::NotFound { .. } => STATUS_NOT_FOUND,
        _ => STATUS_INTERNAL_ERROR,
    }
}

/// Catalog lookups wrapped in the response envelope
pub struct CatalogApi<S: CatalogStore> {
    service: CatalogQueryService<S>,
}

impl<S: CatalogStore> CatalogApi<S> {
    pub fn new(service: CatalogQueryService<S>) -> Self {
        Self { service }
    }

    pub fn service(&self) -> &CatalogQueryService<S> {
        &self.service
    }

    /// Resolve a postal code
    pub fn lookup(&self, postal_code: &str) -> (u16, ApiResponse<Value>) {
        respond(
            "Postal code found",
            "Failed to resolve postal code",
            self.service.resolve_postal_code(postal_code),
        )
    }

    /// List states
    pub fn states(&self) -> (u16, ApiResponse<Value>) {
        respond(
            "States retrieved",
            "Failed to list states",
            self.service.list_states(),
        )
    }

    /// List the municipalities of a state
    pub fn municipalities(&self, state: &str) -> (u16, ApiResponse<Value>) {
        respond(
            "Municipalities retrieved",
            "Failed to list municipalities",
            self.service.list_municipalities(state),
        )
    }

    /// List the settlements of a municipality
    pub fn settlements(&self, state: &str, municipality: &str) -> (u16, ApiResponse<Value>) {
        respond(
            "Settlements retrieved",
            "Failed to list settlements",
            self.service.list_settlements(state, municipality),
        )
    }
}

/// Build the envelope for a lookup result
///
/// Client errors carry their own message; anything else is logged and
/// reported with `internal_message` only.
fn respond<T: Serialize>(
    success_message: &str,
    internal_message: &str,
    result: Result<T>,
) -> (u16, ApiResponse<Value>) {
    let outcome = result.and_then(|data| Ok(serde_json::to_value(data)?));

    match outcome {
        Ok(data) => (STATUS_OK, ApiResponse::success(success_message, data)),
        Err(e) => {
            let status = status_for(&e);
            if status == STATUS_INTERNAL_ERROR {
                error!("{}: {}", internal_message, e);
                (status, ApiResponse::failure(internal_message))
            } else {
                debug!("Lookup rejected ({}): {}", status, e);
                (status, ApiResponse::failure(client_message(e)))
            }
        }
    }
}

fn client_message(error: Error) -> String {
    match error {
        Error::InvalidInput { message } | Error::NotFound { message } => message,
        other => other.to_string(),
    }
}
