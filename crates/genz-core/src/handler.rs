//! Handler trait and utilities

use crate::config::Environment;
use crate::error::{Result, RouteError};
use crate::invoke::invoke;
use crate::pipeline::extract;
use crate::request::Request;
use crate::response::Response;
use crate::route::{Input, RouteContext};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

/// An async route handler.
///
/// Receives the validated [`Input`] and returns the response value, which is
/// serialized to JSON with the route's status. Implemented for every
/// `Fn(Input<P, Q, B>) -> impl Future<Output = Result<R>>`.
///
/// ```ignore
/// async fn get_ranger(input: Input<IdParams>) -> Result<PowerRanger> {
///     store.find_by_id(input.params.id).await
/// }
/// ```
pub trait Handler<P, Q, B, R>: Clone + Send + Sync + 'static {
    type Future: Future<Output = Result<R>> + Send + 'static;

    fn call(&self, input: Input<P, Q, B>) -> Self::Future;
}

impl<F, Fut, P, Q, B, R> Handler<P, Q, B, R> for F
where
    F: Fn(Input<P, Q, B>) -> Fut + Clone + Send + Sync + 'static,
    Fut: Future<Output = Result<R>> + Send + 'static,
{
    type Future = Fut;

    fn call(&self, input: Input<P, Q, B>) -> Self::Future {
        self(input)
    }
}

pub(crate) type BoxFuture<T> = Pin<Box<dyn Future<Output = T> + Send + 'static>>;

/// Type-erased handler wrapped in the validation pipeline
pub(crate) type BoxedHandler = Arc<
    dyn Fn(Request, Arc<Environment>) -> BoxFuture<std::result::Result<Response, RouteError>>
        + Send
        + Sync,
>;

/// Wrap a handler so it validates its input before running and serializes
/// its output afterwards
pub(crate) fn into_boxed_handler<H, P, Q, B, R>(handler: H, ctx: Arc<RouteContext>) -> BoxedHandler
where
    H: Handler<P, Q, B, R>,
    P: DeserializeOwned + Send + 'static,
    Q: DeserializeOwned + Send + 'static,
    B: DeserializeOwned + Send + 'static,
    R: Serialize + Send + 'static,
{
    Arc::new(move |req: Request, environment: Arc<Environment>| {
        let handler = handler.clone();
        let ctx = ctx.clone();
        Box::pin(async move {
            let input = extract::<P, Q, B>(&ctx, &req)?;
            invoke(&handler, input, &ctx, &environment).await
        }) as BoxFuture<std::result::Result<Response, RouteError>>
    })
}
