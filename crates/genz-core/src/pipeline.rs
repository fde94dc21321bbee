//! Request validation pipeline: params, then query, then body.
//!
//! Each stage validates the raw request data against the route's schema and
//! deserializes the parsed value into the handler's input type. The first
//! failing stage aborts the rest.

use crate::error::{RouteError, Stage};
use crate::query::parse_query;
use crate::request::Request;
use crate::route::{Input, RouteContext};
use genz_validate::{validate_body, validate_field, validate_params_or_query, Schema, ValidationError};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

pub(crate) fn extract<P, Q, B>(ctx: &RouteContext, req: &Request) -> Result<Input<P, Q, B>, RouteError>
where
    P: DeserializeOwned,
    Q: DeserializeOwned,
    B: DeserializeOwned,
{
    let params = stage(ctx, Stage::Params, || match &ctx.params {
        Some(schema) => validate_params_or_query(req.path_params().to_map(), schema),
        None => Ok(Value::Null),
    })?;

    let query = stage(ctx, Stage::Query, || match &ctx.query {
        Some(schema) => {
            let raw = parse_query(req.query_string()).map_err(|err| {
                ValidationError::field("", "invalid_query", err.to_string())
            })?;
            validate_params_or_query(raw, schema)
        }
        None => Ok(Value::Null),
    })?;

    let body = stage(ctx, Stage::Body, || match &ctx.body {
        Some(schema) => parse_body(req.body(), schema),
        None => Ok(Value::Null),
    })?;

    Ok(Input {
        params,
        query,
        body,
    })
}

/// Run one stage and deserialize its parsed value
fn stage<T, F>(ctx: &RouteContext, stage: Stage, run: F) -> Result<T, RouteError>
where
    T: DeserializeOwned,
    F: FnOnce() -> Result<Value, ValidationError>,
{
    let parsed = run().and_then(|value| {
        serde_json::from_value(value.clone()).map_err(|err| {
            let field = offending_field::<T>(&value).unwrap_or_default();
            ValidationError::field(field, "invalid_type", err.to_string())
        })
    });

    parsed.map_err(|source| {
        debug!(
            method = %ctx.method,
            path = %ctx.path,
            stage = %stage,
            errors = source.len(),
            "Request validation failed"
        );
        RouteError::validation(stage, source)
    })
}

/// Top-level key whose value `T` rejects.
///
/// Dropping the culprit either clears the error or turns it into a missing
/// field error naming that key.
fn offending_field<T: DeserializeOwned>(value: &Value) -> Option<String> {
    let object = value.as_object()?;
    object.keys().find_map(|key| {
        let mut without = object.clone();
        without.remove(key);
        match serde_json::from_value::<T>(Value::Object(without)) {
            Ok(_) => Some(key.clone()),
            Err(err) if err.to_string().contains(&format!("missing field `{}`", key)) => {
                Some(key.clone())
            }
            Err(_) => None,
        }
    })
}

fn parse_body(bytes: &[u8], schema: &Schema) -> Result<Value, ValidationError> {
    if bytes.iter().all(u8::is_ascii_whitespace) {
        return validate_field(None, schema).map(Option::unwrap_or_default);
    }
    let raw: Value = serde_json::from_slice(bytes)
        .map_err(|err| ValidationError::field("", "invalid_json", format!("Invalid JSON body: {}", err)))?;
    validate_body(&raw, schema)
}
