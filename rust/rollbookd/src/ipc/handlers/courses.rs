use crate::ipc::error::ok;
use crate::ipc::helpers::{book_mut, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::report;
use serde_json::json;

fn handle_courses_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let store = book.store();
    ok(
        &req.id,
        json!({
            "courses": store.courses,
            "text": report::course_list_text(store)
        }),
    )
}

fn handle_courses_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let name = match get_required_str(&req.params, "name") {
        Ok(v) => v,
        Err(e) => return e.response(&req.id),
    };
    match book.add_course(&name) {
        Ok(course) => ok(&req.id, json!({ "course": course })),
        Err(e) => HandlerErr::from(e).response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "courses.list" => Some(handle_courses_list(state, req)),
        "courses.add" => Some(handle_courses_add(state, req)),
        _ => None,
    }
}
