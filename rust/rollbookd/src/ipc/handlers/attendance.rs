use crate::db::SqliteKv;
use crate::ipc::error::ok;
use crate::ipc::helpers::{book_mut, get_required_int, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::AttendanceStatus;
use crate::records::Gradebook;
use serde_json::json;

fn attendance_mark(
    book: &mut Gradebook<SqliteKv>,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll = get_required_int(params, "roll")?;
    let status_raw = get_required_str(params, "status")?;
    let status = AttendanceStatus::parse(&status_raw)
        .ok_or_else(|| HandlerErr::bad_params("status must be present or absent"))?;

    // Unknown rolls are ignored rather than reported.
    let Some(student) = book.mark_attendance(roll, status)? else {
        return Ok(json!({ "marked": false }));
    };
    Ok(json!({
        "marked": true,
        "message": format!("Attendance marked for {} as {}!", student.name, status.label()),
        "student": student
    }))
}

fn handle_attendance_mark(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match attendance_mark(book, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "attendance.mark" => Some(handle_attendance_mark(state, req)),
        _ => None,
    }
}
