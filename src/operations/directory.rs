//! User, tag and channel operations

use super::params::{query_string, Params};
use super::types::RequestPlan;
use crate::error::Result;
use crate::http::ApiRequest;
use serde_json::json;

/// Colour given to new tags when none is supplied
pub const DEFAULT_TAG_COLOR: &str = "#FF0000";

/// `GET {collection}/{id}`
pub fn get_one(params: &Params, collection: &str, id_param: &str) -> Result<ApiRequest> {
    let id = params.required_str(id_param)?;
    Ok(ApiRequest::get(format!("{collection}/{id}")))
}

/// `GET {collection}`: one page, or every page when `options.returnAll` is set
pub fn get_many(params: &Params, collection: &str) -> Result<RequestPlan> {
    let options = params.collection("options")?;

    if options.flag("returnAll") {
        return Ok(RequestPlan::paginate_all(collection));
    }

    let mut request = ApiRequest::get(collection);
    if let Some(page) = options.truthy("page") {
        request = request.query("page", query_string(page));
    }
    if let Some(per_page) = options.truthy("perPage") {
        request = request.query("per_page", query_string(per_page));
    }
    Ok(RequestPlan::Single(request))
}

/// `POST /tags`
pub fn create_tag(params: &Params) -> Result<ApiRequest> {
    let name = params.required_str("tagName")?;
    let color = params.str_or("tagColor", DEFAULT_TAG_COLOR)?;
    Ok(ApiRequest::post("/tags").json(json!({"name": name, "color": color})))
}
