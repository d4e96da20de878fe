//! The resource/operation dispatch table

use super::params::Params;
use super::types::{Operation, RequestPlan, Resource};
use super::{conversation, customer, directory, events};
use crate::error::{Error, Result};
use chrono::{DateTime, Utc};

/// Build the request plan for one input record
///
/// Pure: no I/O happens here and the clock is passed in, so every plan can
/// be inspected before anything is sent.
pub fn build_plan(
    resource: Resource,
    operation: Operation,
    params: &Params,
    now: DateTime<Utc>,
) -> Result<RequestPlan> {
    use Operation as Op;
    use Resource as R;

    let request = match (resource, operation) {
        (R::Conversation, Op::Create) => conversation::create(params)?,
        (R::Conversation, Op::Update) => conversation::update(params)?,
        (R::Conversation, Op::Get) => conversation::get(params)?,
        (R::Conversation, Op::GetByNumber) => conversation::get_by_number(params)?,
        (R::Conversation, Op::GetByCustomer) => conversation::get_by_customer(params)?,
        (R::Conversation, Op::AddTags) => conversation::change_tags(params, "add-tags")?,
        (R::Conversation, Op::RemoveTags) => conversation::change_tags(params, "remove-tags")?,
        (R::Conversation, Op::AttachOrder) => conversation::attach_order(params)?,

        (R::Customer, Op::Upsert) => customer::upsert(params)?,
        (R::Customer, Op::Get) => customer::get(params)?,

        (R::Order, Op::Upsert) => events::upsert_order(params, now)?,
        (R::Order, Op::Get) => events::get_order(params)?,
        (R::Order, Op::GetFromConversation) => events::get_order_from_conversation(params)?,

        (R::Subscription, Op::Upsert) => events::upsert_subscription(params, now)?,

        (R::User, Op::Get) => directory::get_one(params, "/users", "userId")?,
        (R::User, Op::GetMany) => return directory::get_many(params, "/users"),

        (R::Tag, Op::Create) => directory::create_tag(params)?,
        (R::Tag, Op::GetMany) => return directory::get_many(params, "/tags"),

        (R::Channel, Op::Get) => directory::get_one(params, "/channel", "channelId")?,
        (R::Channel, Op::GetMany) => return directory::get_many(params, "/channel"),

        (resource, operation) => {
            return Err(Error::unsupported_operation(
                resource.as_str(),
                operation.as_str(),
            ))
        }
    };

    Ok(RequestPlan::Single(request))
}
