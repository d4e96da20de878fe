//! Resource and operation identifiers and the request plan

use crate::error::{Error, Result};
use crate::http::ApiRequest;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ============================================================================
// Resource
// ============================================================================

/// Richpanel resource an operation acts on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Resource {
    Conversation,
    Customer,
    Order,
    Subscription,
    User,
    Tag,
    Channel,
}

impl Resource {
    /// All resources, in display order
    pub const ALL: [Resource; 7] = [
        Resource::Conversation,
        Resource::Customer,
        Resource::Order,
        Resource::Subscription,
        Resource::User,
        Resource::Tag,
        Resource::Channel,
    ];

    /// Wire name of the resource
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Conversation => "conversation",
            Self::Customer => "customer",
            Self::Order => "order",
            Self::Subscription => "subscription",
            Self::User => "user",
            Self::Tag => "tag",
            Self::Channel => "channel",
        }
    }

    /// Operations this resource supports
    pub fn operations(self) -> &'static [Operation] {
        use Operation as Op;
        match self {
            Self::Conversation => &[
                Op::Create,
                Op::Update,
                Op::Get,
                Op::GetByNumber,
                Op::GetByCustomer,
                Op::AddTags,
                Op::RemoveTags,
                Op::AttachOrder,
            ],
            Self::Customer => &[Op::Upsert, Op::Get],
            Self::Order => &[Op::Upsert, Op::Get, Op::GetFromConversation],
            Self::Subscription => &[Op::Upsert],
            Self::User => &[Op::Get, Op::GetMany],
            Self::Tag => &[Op::Create, Op::GetMany],
            Self::Channel => &[Op::Get, Op::GetMany],
        }
    }

    /// Whether `operation` is valid for this resource
    pub fn supports(self, operation: Operation) -> bool {
        self.operations().contains(&operation)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Resource {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| Error::unsupported_resource(s))
    }
}

// ============================================================================
// Operation
// ============================================================================

/// Operation name, shared across resources
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Operation {
    Create,
    Update,
    Get,
    GetByNumber,
    GetByCustomer,
    AddTags,
    RemoveTags,
    AttachOrder,
    Upsert,
    GetFromConversation,
    GetMany,
}

impl Operation {
    const ALL: [Operation; 11] = [
        Operation::Create,
        Operation::Update,
        Operation::Get,
        Operation::GetByNumber,
        Operation::GetByCustomer,
        Operation::AddTags,
        Operation::RemoveTags,
        Operation::AttachOrder,
        Operation::Upsert,
        Operation::GetFromConversation,
        Operation::GetMany,
    ];

    /// Wire name of the operation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Get => "get",
            Self::GetByNumber => "getByNumber",
            Self::GetByCustomer => "getByCustomer",
            Self::AddTags => "addTags",
            Self::RemoveTags => "removeTags",
            Self::AttachOrder => "attachOrder",
            Self::Upsert => "upsert",
            Self::GetFromConversation => "getFromConversation",
            Self::GetMany => "getMany",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.as_str() == s)
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable description of a supported pair
pub fn describe(resource: Resource, operation: Operation) -> &'static str {
    use Operation as Op;
    use Resource as R;
    match (resource, operation) {
        (R::Conversation, Op::Create) => "Create a new conversation",
        (R::Conversation, Op::Update) => "Update a conversation",
        (R::Conversation, Op::Get) => "Get a conversation by ID",
        (R::Conversation, Op::GetByNumber) => "Get a conversation by conversation number",
        (R::Conversation, Op::GetByCustomer) => "Get conversations by customer email or phone",
        (R::Conversation, Op::AddTags) => "Add tags to a conversation",
        (R::Conversation, Op::RemoveTags) => "Remove tags from a conversation",
        (R::Conversation, Op::AttachOrder) => "Attach an order to a conversation",
        (R::Customer, Op::Upsert) => "Create or update a customer",
        (R::Customer, Op::Get) => "Get a customer by email or phone",
        (R::Order, Op::Upsert) => "Create or update an order",
        (R::Order, Op::Get) => "Get an order by ID",
        (R::Order, Op::GetFromConversation) => "Get the order attached to a conversation",
        (R::Subscription, Op::Upsert) => "Create or update a subscription",
        (R::User, Op::Get) => "Get a user by ID",
        (R::User, Op::GetMany) => "Get many users",
        (R::Tag, Op::Create) => "Create a tag",
        (R::Tag, Op::GetMany) => "Get many tags",
        (R::Channel, Op::Get) => "Get a channel by ID",
        (R::Channel, Op::GetMany) => "Get many channels",
        _ => "Unsupported",
    }
}

/// Parse and validate a resource/operation pair from their wire names
pub fn parse_selection(resource: &str, operation: &str) -> Result<(Resource, Operation)> {
    let resource: Resource = resource.parse()?;
    match Operation::parse(operation) {
        Some(op) if resource.supports(op) => Ok((resource, op)),
        _ => Err(Error::unsupported_operation(resource.as_str(), operation)),
    }
}

// ============================================================================
// Request Plan
// ============================================================================

/// What to send for one input record
#[derive(Debug, Clone, PartialEq)]
pub enum RequestPlan {
    /// One request, response returned as-is
    Single(ApiRequest),
    /// Fetch every page of a list endpoint
    PaginateAll {
        /// List endpoint path
        endpoint: String,
    },
}

impl RequestPlan {
    /// Create a paginate-all plan
    pub fn paginate_all(endpoint: impl Into<String>) -> Self {
        Self::PaginateAll {
            endpoint: endpoint.into(),
        }
    }

    /// The single request, if this is not a paginated plan
    pub fn as_request(&self) -> Option<&ApiRequest> {
        match self {
            Self::Single(request) => Some(request),
            Self::PaginateAll { .. } => None,
        }
    }
}
