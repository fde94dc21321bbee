//! Fallback operation ids.

use http::Method;

/// Derive an operation id from the method, the route path and the resource name.
///
/// `GET` on a path longer than one character is `getOne`, otherwise `getMany`;
/// `POST` is `create`, `PUT`/`PATCH` are `update` and `DELETE` is `delete`.
/// Any other method contributes nothing. The resource name follows with its
/// whitespace removed.
///
/// ```
/// use genz_openapi::operation_id;
/// use http::Method;
///
/// assert_eq!(operation_id(&Method::GET, "/:id", "Power Rangers"), "getOnePowerRangers");
/// assert_eq!(operation_id(&Method::GET, "/", "Power Rangers"), "getManyPowerRangers");
/// ```
pub fn generate(method: &Method, path: &str, resource: &str) -> String {
    let verb = match *method {
        Method::GET if path.chars().count() > 1 => "getOne",
        Method::GET => "getMany",
        Method::POST => "create",
        Method::PUT | Method::PATCH => "update",
        Method::DELETE => "delete",
        _ => "",
    };

    let mut id = String::from(verb);
    id.extend(resource.split_whitespace());
    id
}
