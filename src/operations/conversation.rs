//! Conversation (ticket) operations

use super::params::{split_tags, Params};
use crate::error::Result;
use crate::http::ApiRequest;
use crate::types::JsonObject;
use serde_json::{json, Value};

/// Channels a conversation can be opened on
pub const CHANNELS: &[&str] = &[
    "email",
    "sms",
    "chat",
    "phone",
    "facebook",
    "instagram",
    "whatsapp",
];

/// Identifier kinds for customer lookups
pub const CUSTOMER_TYPES: &[&str] = &["email", "phone"];

/// `POST /tickets`
pub fn create(params: &Params) -> Result<ApiRequest> {
    let message_body = params.required_str("messageBody")?;
    let channel = params.choice("channel", CHANNELS, "email")?;
    let additional = params.collection("additionalFields")?;

    let source = match channel.as_str() {
        "email" => json!({
            "from": {"address": params.required_str("from")?},
            "to": {"address": params.required_str("to")?},
        }),
        "phone" | "sms" => json!({
            "from": {"id": params.required_str("fromId")?},
            "to": {"id": params.required_str("toId")?},
        }),
        _ => json!({}),
    };

    let mut ticket = JsonObject::new();
    ticket.insert(
        "comment".to_string(),
        json!({"sender_type": "customer", "body": message_body}),
    );
    ticket.insert(
        "via".to_string(),
        json!({"channel": channel, "source": source}),
    );

    for field in ["status", "priority", "subject"] {
        if let Some(value) = additional.truthy(field) {
            ticket.insert(field.to_string(), value.clone());
        }
    }
    if let Some(tags) = additional.truthy("tags") {
        ticket.insert("tags".to_string(), json!(split_tags("tags", tags)?));
    }

    let first_name = additional.truthy("customerFirstName");
    let last_name = additional.truthy("customerLastName");
    if first_name.is_some() || last_name.is_some() {
        ticket.insert(
            "customer_profile".to_string(),
            json!({
                "firstName": first_name.cloned().unwrap_or_else(|| json!("")),
                "lastName": last_name.cloned().unwrap_or_else(|| json!("")),
            }),
        );
    }

    Ok(ApiRequest::post("/tickets").json(json!({"ticket": ticket})))
}

/// `PUT /tickets/{id}`
pub fn update(params: &Params) -> Result<ApiRequest> {
    let id = params.required_str("conversationId")?;
    let fields = params.collection("updateFields")?;

    let mut ticket = JsonObject::new();
    for field in ["status", "priority"] {
        if let Some(value) = fields.truthy(field) {
            ticket.insert(field.to_string(), value.clone());
        }
    }
    if let Some(tags) = fields.truthy("tags") {
        ticket.insert("tags".to_string(), json!(split_tags("tags", tags)?));
    }

    Ok(ApiRequest::put(format!("/tickets/{id}")).json(json!({"ticket": ticket})))
}

/// `GET /tickets/{id}`
pub fn get(params: &Params) -> Result<ApiRequest> {
    let id = params.required_str("conversationId")?;
    Ok(ApiRequest::get(format!("/tickets/{id}")))
}

/// `GET /tickets/number/{number}`
pub fn get_by_number(params: &Params) -> Result<ApiRequest> {
    let number = params.required_str("conversationNumber")?;
    Ok(ApiRequest::get(format!("/tickets/number/{number}")))
}

/// `GET /tickets/{email|phone}/{identifier}`
pub fn get_by_customer(params: &Params) -> Result<ApiRequest> {
    let customer_type = params.choice("customerType", CUSTOMER_TYPES, "email")?;
    let identifier = params.required_str("customerIdentifier")?;
    Ok(ApiRequest::get(format!("/tickets/{customer_type}/{identifier}")))
}

/// `PUT /tickets/{id}/add-tags` or `/remove-tags`
pub fn change_tags(params: &Params, action: &str) -> Result<ApiRequest> {
    let id = params.required_str("conversationId")?;
    let raw = params.required_str("tags").map(Value::String).or_else(|err| {
        // Already-split lists are accepted as well.
        match params.get("tags") {
            Some(list @ Value::Array(_)) => Ok(list.clone()),
            _ => Err(err),
        }
    })?;
    let tags = split_tags("tags", &raw)?;

    Ok(ApiRequest::put(format!("/tickets/{id}/{action}")).json(json!({"tags": tags})))
}

/// `PUT /tickets/{id}/attach-order/{appClientId}/{orderId}`
pub fn attach_order(params: &Params) -> Result<ApiRequest> {
    let id = params.required_str("conversationId")?;
    let app_client_id = params.required_str("appClientId")?;
    let order_id = params.required_str("orderId")?;
    Ok(ApiRequest::put(format!(
        "/tickets/{id}/attach-order/{app_client_id}/{order_id}"
    )))
}
