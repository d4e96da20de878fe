//! Order and subscription operations
//!
//! Both are sent as tracking events sharing one envelope:
//! `{event, properties, userProperties: {uid}, time: {sentAt}, appClientId}`.

use super::params::{json_value, Params};
use crate::error::{Error, Result};
use crate::http::ApiRequest;
use crate::types::JsonObject;
use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::{json, Value};

/// Line items used when the caller supplies none
pub const DEFAULT_ORDER_ITEMS: &str =
    r#"[{"id": "1", "price": 10.00, "name": "Product", "quantity": 1}]"#;

/// Subscription states Richpanel accepts
pub const SUBSCRIPTION_STATUSES: &[&str] = &["active", "cancelled", "paused", "expired"];

/// Billing intervals Richpanel accepts
pub const BILLING_INTERVALS: &[&str] = &["daily", "weekly", "monthly", "yearly"];

/// Render a timestamp the way Richpanel expects `sentAt`
pub fn sent_at(now: DateTime<Utc>) -> String {
    now.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn envelope(
    event: &str,
    app_client_id: &str,
    properties: JsonObject,
    user_properties: JsonObject,
    now: DateTime<Utc>,
) -> Value {
    json!({
        "event": event,
        "properties": properties,
        "userProperties": user_properties,
        "time": {"sentAt": sent_at(now)},
        "appClientId": app_client_id,
    })
}

/// Copy truthy `source` fields into `target` under a possibly different key
fn copy_truthy(target: &mut JsonObject, source: &Params, mapping: &[(&str, &str)]) {
    for (from, to) in mapping {
        if let Some(value) = source.truthy(from) {
            target.insert((*to).to_string(), value.clone());
        }
    }
}

/// `POST /order/{appClientId}`
pub fn upsert_order(params: &Params, now: DateTime<Utc>) -> Result<ApiRequest> {
    let app_client_id = params.required_str("appClientId")?;
    let order_id = params.required_str("orderId")?;
    let amount = params.number_or("amount", 0.0)?;
    let user_uid = params.required_str("userUid")?;
    let fields = params.collection("orderFields")?;

    let raw_items = params
        .get("items")
        .filter(|v| !v.is_null())
        .cloned()
        .unwrap_or_else(|| Value::String(DEFAULT_ORDER_ITEMS.to_string()));
    let items = json_value(&raw_items)
        .map_err(|_| Error::invalid_param("items", "Items must be valid JSON array"))?;

    let mut properties = JsonObject::new();
    properties.insert("orderId".to_string(), Value::String(order_id));
    properties.insert("amount".to_string(), amount);
    properties.insert("items".to_string(), items);
    copy_truthy(
        &mut properties,
        &fields,
        &[
            ("currency", "currency"),
            ("status", "status"),
            ("fulfillmentStatus", "fulfillmentStatus"),
            ("paymentMethod", "paymentMethod"),
        ],
    );

    let mut user_properties = JsonObject::new();
    user_properties.insert("uid".to_string(), Value::String(user_uid));
    copy_truthy(
        &mut user_properties,
        &fields,
        &[
            ("userEmail", "email"),
            ("userPhone", "phone"),
            ("userFirstName", "firstName"),
            ("userLastName", "lastName"),
        ],
    );

    let body = envelope("order", &app_client_id, properties, user_properties, now);
    Ok(ApiRequest::post(format!("/order/{app_client_id}")).json(body))
}

/// `GET /order/{orderId}`
pub fn get_order(params: &Params) -> Result<ApiRequest> {
    let order_id = params.required_str("orderIdGet")?;
    Ok(ApiRequest::get(format!("/order/{order_id}")))
}

/// `GET /tickets/{conversationId}/order`
pub fn get_order_from_conversation(params: &Params) -> Result<ApiRequest> {
    let conversation_id = params.required_str("conversationIdForOrder")?;
    Ok(ApiRequest::get(format!("/tickets/{conversation_id}/order")))
}

/// `POST /subscription/{appClientId}`
pub fn upsert_subscription(params: &Params, now: DateTime<Utc>) -> Result<ApiRequest> {
    let app_client_id = params.required_str("appClientId")?;
    let subscription_id = params.required_str("subscriptionId")?;
    let user_uid = params.required_str("userUid")?;
    let status = params.choice("subscriptionStatus", SUBSCRIPTION_STATUSES, "active")?;
    let fields = params.collection("subscriptionFields")?;

    if fields.truthy("billingInterval").is_some() {
        fields.choice("billingInterval", BILLING_INTERVALS, "monthly")?;
    }

    let mut properties = JsonObject::new();
    properties.insert("subscriptionId".to_string(), Value::String(subscription_id));
    properties.insert("status".to_string(), Value::String(status));
    copy_truthy(
        &mut properties,
        &fields,
        &[
            ("amount", "amount"),
            ("currency", "currency"),
            ("billingInterval", "billingInterval"),
            ("nextBillingDate", "nextBillingDate"),
            ("productName", "productName"),
        ],
    );

    let mut user_properties = JsonObject::new();
    user_properties.insert("uid".to_string(), Value::String(user_uid));
    copy_truthy(
        &mut user_properties,
        &fields,
        &[
            ("userEmail", "email"),
            ("userFirstName", "firstName"),
            ("userLastName", "lastName"),
        ],
    );

    let body = envelope(
        "subscription",
        &app_client_id,
        properties,
        user_properties,
        now,
    );
    Ok(ApiRequest::post(format!("/subscription/{app_client_id}")).json(body))
}
