use crate::db::SqliteKv;
use crate::ipc::error::{err, ok};
use crate::ipc::types::{AppState, Request};
use crate::records::Gradebook;
use serde_json::json;
use std::path::PathBuf;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "workspacePath": state.workspace.as_ref().map(|p| p.to_string_lossy().to_string())
        }),
    )
}

fn handle_workspace_select(state: &mut AppState, req: &Request) -> serde_json::Value {
    let p = req
        .params
        .get("path")
        .and_then(|v| v.as_str())
        .map(PathBuf::from);
    let Some(path) = p else {
        return err(&req.id, "bad_params", "missing params.path", None);
    };

    match SqliteKv::open(&path) {
        Ok(kv) => {
            let book = Gradebook::open(kv);
            let student_count = book.store().students.len();
            let course_count = book.store().courses.len();
            tracing::info!(
                workspace = %path.to_string_lossy(),
                students = student_count,
                courses = course_count,
                "workspace selected"
            );
            state.workspace = Some(path.clone());
            state.book = Some(book);
            ok(
                &req.id,
                json!({
                    "workspacePath": path.to_string_lossy(),
                    "studentCount": student_count,
                    "courseCount": course_count
                }),
            )
        }
        Err(e) => err(&req.id, "db_open_failed", format!("{e:#}"), None),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "workspace.select" => Some(handle_workspace_select(state, req)),
        _ => None,
    }
}
