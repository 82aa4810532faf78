use serde_json::Value;

pub const LOGIN_PATH: &str = "/login";

/// True when an error-like value signals an expired or missing session.
///
/// Checked in order: `message == "Unauthorized"`, `status == 401`,
/// `response.status == 401`. Anything that is not a JSON object is false.
pub fn is_unauthorized_error(value: &Value) -> bool {
    let Some(obj) = value.as_object() else {
        return false;
    };

    if obj.get("message").and_then(Value::as_str) == Some("Unauthorized") {
        return true;
    }

    if is_401(obj.get("status")) {
        return true;
    }

    is_401(obj.get("response").and_then(|r| r.get("status")))
}

/// Numeric comparison, so `401.0` counts; the string `"401"` does not.
fn is_401(status: Option<&Value>) -> bool {
    status.and_then(Value::as_f64) == Some(401.0)
}

/// Calls `redirect(LOGIN_PATH)` when `value` is an unauthorized error.
/// Returns whether the redirect happened.
pub fn handle_auth_error<F>(value: &Value, redirect: F) -> bool
where
    F: FnOnce(&str),
{
    if is_unauthorized_error(value) {
        redirect(LOGIN_PATH);
        true
    } else {
        false
    }
}
