//! Customer operations

use super::conversation::CUSTOMER_TYPES;
use super::params::{json_value, Params};
use crate::error::{Error, Result};
use crate::http::ApiRequest;
use crate::types::JsonObject;
use serde_json::Value;
use tracing::debug;

const PROFILE_FIELDS: [&str; 8] = [
    "publicId",
    "uid",
    "firstName",
    "lastName",
    "email",
    "phone",
    "city",
    "country",
];

/// `POST /customers`
pub fn upsert(params: &Params) -> Result<ApiRequest> {
    let fields = params.collection("customerFields")?;

    let mut body = JsonObject::new();
    for field in PROFILE_FIELDS {
        if let Some(value) = fields.truthy(field) {
            body.insert(field.to_string(), value.clone());
        }
    }

    if let Some(raw) = fields.truthy("customProperties") {
        let parsed = json_value(raw)
            .map_err(|_| Error::invalid_param("customProperties", "Custom properties must be valid JSON"))?;
        // Only object keys are merged; other JSON values add nothing.
        match parsed {
            Value::Object(custom) => body.extend(custom),
            other => debug!("Ignoring non-object customProperties: {other}"),
        }
    }

    Ok(ApiRequest::post("/customers").json(Value::Object(body)))
}

/// `GET /customers/{email|phone}/{identifier}`
pub fn get(params: &Params) -> Result<ApiRequest> {
    let customer_type = params.choice("customerType", CUSTOMER_TYPES, "email")?;
    let identifier = params.required_str("customerIdentifier")?;
    Ok(ApiRequest::get(format!(
        "/customers/{customer_type}/{identifier}"
    )))
}
