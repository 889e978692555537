use crate::db::SqliteKv;
use crate::ipc::error::ok;
use crate::ipc::helpers::{book_mut, get_required_int, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::Gradebook;
use crate::report;
use serde_json::json;

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let settings = book.report_settings();
    ok(
        &req.id,
        json!({
            "students": report::student_cards(book.store(), &settings),
            "options": report::student_options(book.store())
        }),
    )
}

fn students_add(
    book: &mut Gradebook<SqliteKv>,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let roll = get_required_int(params, "roll")?;
    let name = get_required_str(params, "name")?;
    let semester = get_required_int(params, "semester")?;
    let student = book.add_student(roll, &name, semester)?;
    Ok(json!({ "student": student }))
}

fn handle_students_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match students_add(book, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.add" => Some(handle_students_add(state, req)),
        _ => None,
    }
}
