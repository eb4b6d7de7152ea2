// HTTP handler bindings for Battlesnake API endpoints
//
// This module provides thin wrapper functions that bind Rocket HTTP routes
// to the Bot's methods. Handlers are responsible for:
// - Deserializing incoming JSON requests
// - Turning the request into a validated Snapshot
// - Delegating to Bot methods
// - Serializing responses, or a 400 for a malformed snapshot

use log::warn;
use rocket::fairing::AdHoc;
use rocket::http::Status;
use rocket::serde::json::Json;
use rocket::{Build, Rocket};
use serde_json::{json, Value};

use crate::bot::Bot;
use crate::error::SnapshotError;
use crate::types::GameState;

/// Status plus `{"error": ...}` body
pub type ErrorResponse = (Status, Json<Value>);

fn reject(err: SnapshotError) -> ErrorResponse {
    warn!("Rejecting malformed snapshot: {}", err);
    (Status::BadRequest, Json(json!({ "error": err.to_string() })))
}

/// GET / endpoint
/// Returns bot metadata and appearance configuration
#[get("/")]
pub fn index(bot: &rocket::State<Bot>) -> Json<Value> {
    Json(bot.info())
}

/// POST /start endpoint
#[post("/start", format = "json", data = "<start_req>")]
pub fn start(bot: &rocket::State<Bot>, start_req: Json<GameState>) -> Result<Status, ErrorResponse> {
    let snapshot = start_req.snapshot().map_err(reject)?;
    bot.start(&start_req.game, &snapshot);

    Ok(Status::Ok)
}

/// POST /move endpoint
/// Called each turn to compute and return the next move
#[post("/move", format = "json", data = "<move_req>")]
pub async fn get_move(
    bot: &rocket::State<Bot>,
    move_req: Json<GameState>,
) -> Result<Json<Value>, ErrorResponse> {
    let snapshot = move_req.snapshot().map_err(reject)?;

    bot.get_move(&move_req.game, move_req.turn, snapshot)
        .await
        .map(Json)
        .map_err(reject)
}

/// POST /end endpoint
#[post("/end", format = "json", data = "<end_req>")]
pub fn end(bot: &rocket::State<Bot>, end_req: Json<GameState>) -> Result<Status, ErrorResponse> {
    let snapshot = end_req.snapshot().map_err(reject)?;
    bot.end(&end_req.game, &snapshot);

    Ok(Status::Ok)
}

/// Assembles the Rocket instance serving `bot`
pub fn server(bot: Bot) -> Rocket<Build> {
    rocket::build()
        .manage(bot)
        .attach(AdHoc::on_response("Server ID Middleware", |_, res| {
            Box::pin(async move {
                res.set_raw_header("Server", "battlesnake/github/flood-snake");
            })
        }))
        .mount("/", routes![index, start, get_move, end])
}
