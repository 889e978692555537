use crate::ipc::error::ok;
use crate::ipc::helpers::book_mut;
use crate::ipc::types::{AppState, Request};
use crate::report;
use serde_json::json;

fn handle_reports_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    let settings = book.report_settings();
    let text = report::full_report(book.store(), &settings);
    tracing::debug!(students = book.store().students.len(), "report generated");
    ok(
        &req.id,
        json!({
            "text": text,
            "students": report::student_cards(book.store(), &settings)
        }),
    )
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "reports.view" => Some(handle_reports_view(state, req)),
        _ => None,
    }
}
