use crate::db::SqliteKv;
use crate::ipc::error::ok;
use crate::ipc::helpers::{book_mut, get_required_int, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::Gradebook;
use serde_json::json;

fn marks_enter(
    book: &mut Gradebook<SqliteKv>,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll = get_required_int(params, "roll")?;
    let course = get_required_str(params, "course")?;
    let marks = get_required_int(params, "marks")?;
    let student = book.enter_marks(roll, &course, marks)?;
    Ok(json!({ "student": student }))
}

fn handle_marks_enter(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match marks_enter(book, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "marks.enter" => Some(handle_marks_enter(state, req)),
        _ => None,
    }
}
