use crate::backup;
use crate::db::SqliteKv;
use crate::ipc::error::ok;
use crate::ipc::helpers::{book_mut, get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::{Gradebook, RecordError};
use serde_json::json;
use std::path::PathBuf;

fn backup_export(
    book: &mut Gradebook<SqliteKv>,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let out_path = PathBuf::from(get_required_str(params, "outPath")?);
    let summary = backup::export_bundle(book.store(), &out_path).map_err(|e| HandlerErr {
        code: "io_failed",
        message: format!("{e:#}"),
        details: Some(json!({ "outPath": out_path.to_string_lossy() })),
    })?;
    tracing::info!(out = %out_path.to_string_lossy(), bundle_id = %summary.bundle_id, "backup exported");
    Ok(json!({
        "bundleFormat": summary.bundle_format,
        "bundleId": summary.bundle_id,
        "entryCount": summary.entry_count
    }))
}

fn backup_import(
    book: &mut Gradebook<SqliteKv>,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    let in_path = PathBuf::from(get_required_str(params, "inPath")?);
    let bad_bundle = |message: String| HandlerErr {
        code: "bad_bundle",
        message,
        details: Some(json!({ "inPath": in_path.to_string_lossy() })),
    };
    let incoming = backup::import_bundle(&in_path).map_err(|e| bad_bundle(format!("{e:#}")))?;
    // A bundle whose records break an invariant is as unusable as a corrupt one.
    book.replace_all(incoming).map_err(|e| match e {
        RecordError::Validation(msg) => bad_bundle(msg),
        other => HandlerErr::from(other),
    })?;
    Ok(json!({
        "studentCount": book.store().students.len(),
        "courseCount": book.store().courses.len()
    }))
}

fn handle_backup_export(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match backup_export(book, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_backup_import(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match backup_import(book, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "backup.export" => Some(handle_backup_export(state, req)),
        "backup.import" => Some(handle_backup_import(state, req)),
        _ => None,
    }
}
