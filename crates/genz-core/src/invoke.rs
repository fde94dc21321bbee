//! Handler invocation with advisory response validation.

use crate::config::Environment;
use crate::error::{ApiError, RouteError};
use crate::handler::Handler;
use crate::response::{json_response, Response};
use crate::route::{Input, RouteContext};
use genz_validate::validate;
use serde::Serialize;
use tracing::warn;

/// Run `handler` once and turn its value into the route's JSON response.
///
/// Outside production the value is checked against the response schema. A
/// mismatch is logged and the response is still sent. A handler error is
/// forwarded unchanged.
pub(crate) async fn invoke<H, P, Q, B, R>(
    handler: &H,
    input: Input<P, Q, B>,
    ctx: &RouteContext,
    environment: &Environment,
) -> Result<Response, RouteError>
where
    H: Handler<P, Q, B, R>,
    R: Serialize,
{
    let output = handler.call(input).await?;

    let value = serde_json::to_value(&output).map_err(|err| {
        ApiError::internal("Failed to serialize response").with_internal(err.to_string())
    })?;

    if environment.check_responses() {
        if let Err(mismatch) = validate(&value, &ctx.response) {
            warn!(
                route = %format!("{} {}", ctx.method, ctx.path),
                operation_id = %ctx.operation_id,
                errors = ?mismatch.fields,
                "Response does not match the declared schema"
            );
        }
    }

    json_response(ctx.status, &value).map_err(|err| {
        RouteError::from(
            ApiError::internal("Failed to serialize response").with_internal(err.to_string()),
        )
    })
}
