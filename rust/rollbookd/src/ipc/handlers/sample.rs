use crate::db::SqliteKv;
use crate::ipc::error::ok;
use crate::ipc::helpers::{book_mut, get_optional_u64, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::records::Gradebook;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde_json::json;

fn sample_generate(
    book: &mut Gradebook<SqliteKv>,
    params: &serde_json::Value,
) -> Result<serde_json::Value, HandlerErr> {
    // A seed makes the generated numbers reproducible.
    let mut rng = match get_optional_u64(params, "seed")? {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let summary = book.generate_sample_data(&mut rng)?;
    Ok(json!(summary))
}

fn handle_sample_generate(state: &mut AppState, req: &Request) -> serde_json::Value {
    let book = match book_mut(state, req) {
        Ok(b) => b,
        Err(resp) => return resp,
    };
    match sample_generate(book, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "sample.generate" => Some(handle_sample_generate(state, req)),
        _ => None,
    }
}
