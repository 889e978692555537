use serde_json::{json, Value};

/// `{"id", "ok": true, "result"}`
pub fn ok(id: &str, result: Value) -> Value {
    json!({ "id": id, "ok": true, "result": result })
}

/// `{"id", "ok": false, "error": {"code", "message", "details"?}}`
pub fn err(id: &str, code: &str, message: impl Into<String>, details: Option<Value>) -> Value {
    let mut error = json!({ "code": code, "message": message.into() });
    if let Some(d) = details {
        error["details"] = d;
    }
    json!({ "id": id, "ok": false, "error": error })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn details_are_emitted_only_when_given() {
        let plain = err("1", "bad_params", "nope", None);
        assert_eq!(plain["error"].get("details"), None);
        let detailed = err("2", "bad_bundle", "broken", Some(json!({ "inPath": "/x.zip" })));
        assert_eq!(detailed["error"]["details"]["inPath"], json!("/x.zip"));
        assert_eq!(detailed["ok"], json!(false));
    }
}
