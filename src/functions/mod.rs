use serde::{de::DeserializeOwned, Serialize};
use serde_json::{Map, Value};
use ureq::{
    http::{Method, Response, StatusCode},
    Body,
};

use crate::{error::APIErrorInner, APIResult, AdsContext};

pub mod create;
pub mod delete;
pub mod list;
pub mod recommendations;
pub mod reports;
pub mod update;

pub use create::SpCreate;
pub use delete::SpDelete;
pub use list::SpList;
pub use update::SpUpdate;

pub(crate) const NEXT_TOKEN: &str = "nextToken";

/// 207 is how the API reports partial success of bulk writes.
const MULTI_STATUS: u16 = 207;

/// Sends an authenticated request and decodes the JSON answer.
///
/// A `401` refreshes the access token and replays the request once. The
/// answer of the replay is final, whatever its status.
///
/// # Arguments
///
/// * `ctx` - The context holding credentials and the HTTP agent
/// * `method` - The HTTP method for the request
/// * `path` - Path of the endpoint on the API host
/// * `body` - Optional JSON body
/// * `media_type` - Vendor media type, used for `Accept` and `Content-Type`
pub(crate) fn ads_request<B, U>(
    ctx: &AdsContext,
    method: Method,
    path: &str,
    body: Option<&B>,
    media_type: &str,
) -> APIResult<U>
where
    B: Serialize + ?Sized,
    U: DeserializeOwned,
{
    let text = ads_request_text(ctx, method, path, body, media_type)?;
    Ok(serde_json::from_str(&text)?)
}

/// [`ads_request`] without decoding: the raw body of a 200 or 207 answer.
pub(crate) fn ads_request_text<B>(
    ctx: &AdsContext,
    method: Method,
    path: &str,
    body: Option<&B>,
    media_type: &str,
) -> APIResult<String>
where
    B: Serialize + ?Sized,
{
    let payload = body.map(serde_json::to_vec).transpose()?;

    let access_token = ctx.access_token();
    let mut response = send(ctx, &method, path, payload.as_deref(), media_type, &access_token)?;

    if response.status() == StatusCode::UNAUTHORIZED {
        #[cfg(feature = "logging")]
        log::warn!("{method} {path} was unauthorized, refreshing the access token and retrying once");
        let access_token = ctx.refresh_after_unauthorized(&access_token)?;
        response = send(ctx, &method, path, payload.as_deref(), media_type, &access_token)?;
    }

    let status = response.status();
    let text = response.into_body().read_to_string()?;

    if status == StatusCode::OK || status.as_u16() == MULTI_STATUS {
        Ok(text)
    } else {
        #[cfg(feature = "logging")]
        log::error!("{method} {path} failed: {status} - {text}");
        Err(APIErrorInner::BadRequest {
            status: status.as_u16(),
            body: text,
        }
        .into())
    }
}

fn send(
    ctx: &AdsContext,
    method: &Method,
    path: &str,
    payload: Option<&[u8]>,
    media_type: &str,
    access_token: &str,
) -> APIResult<Response<Body>> {
    let request = ctx.build_request(method, path, payload, media_type, access_token)?;
    Ok(ctx.agent.run(request)?)
}

/// Collects every page of a cursor paginated endpoint.
///
/// Each page must be a JSON object holding the entities under
/// `results_field`. As long as a page carries a `nextToken`, it is copied
/// into `body` and the next page is requested. Without a page limit in the
/// context's settings this only ends when the server stops sending tokens.
/// With one, a `nextToken` on the last allowed page is a `PageLimit` error.
pub(crate) fn paginate(
    ctx: &AdsContext,
    method: &Method,
    path: &str,
    media_type: &str,
    mut body: Map<String, Value>,
    results_field: &str,
) -> APIResult<Vec<Value>> {
    let mut results = Vec::new();
    let mut pages = 0;

    loop {
        let page: Value = ads_request(ctx, method.clone(), path, Some(&body), media_type)?;
        pages += 1;

        let mut page = match page {
            Value::Object(page) => page,
            other => {
                return Err(APIErrorInner::PaginationShape {
                    found: json_kind(&other),
                }
                .into())
            }
        };

        match page.remove(results_field) {
            Some(Value::Array(items)) => results.extend(items),
            _ => {
                return Err(APIErrorInner::MissingResultsField {
                    field: results_field.to_string(),
                }
                .into())
            }
        }

        match page.remove(NEXT_TOKEN) {
            None | Some(Value::Null) => break,
            Some(token) => {
                // At least one page is always fetched, whatever the cap
                if ctx.settings.max_pages.is_some_and(|limit| pages >= limit.max(1)) {
                    return Err(APIErrorInner::PageLimit { limit: pages }.into());
                }
                body.insert(NEXT_TOKEN.to_string(), token);
            }
        }

        #[cfg(feature = "logging")]
        log::debug!("{path}: page {pages} done, {} items so far", results.len());
    }

    Ok(results)
}

/// `{field: items}`, the body shape of every bulk create and update.
pub(crate) fn entity_body<I: Serialize>(field: &str, items: &[I]) -> APIResult<Map<String, Value>> {
    let mut body = Map::new();
    body.insert(field.to_string(), serde_json::to_value(items)?);
    Ok(body)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
