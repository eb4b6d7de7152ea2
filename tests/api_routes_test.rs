// Integration tests for the HTTP routes
//
// Drives the Rocket instance in-process with the local async client.

use flood_snake::bot::Bot;
use flood_snake::config::Config;
use flood_snake::handler;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::{json, Value};

async fn client() -> Client {
    let bot = Bot::new(Config::default_hardcoded());
    Client::tracked(handler::server(bot))
        .await
        .expect("valid rocket instance")
}

fn game_state(head: (i32, i32), food: Value, hazards: Value) -> Value {
    let you = json!({
        "id": "me",
        "name": "me",
        "health": 90,
        "body": [
            {"x": head.0, "y": head.1},
            {"x": head.0, "y": head.1 - 1},
            {"x": head.0, "y": head.1 - 2}
        ],
        "head": {"x": head.0, "y": head.1},
        "length": 3,
        "latency": "0",
        "shout": ""
    });

    json!({
        "game": {"id": "game-1", "ruleset": {"name": "standard"}, "timeout": 500, "source": "custom"},
        "turn": 4,
        "board": {
            "width": 11,
            "height": 11,
            "food": food,
            "hazards": hazards,
            "snakes": [you.clone()]
        },
        "you": you
    })
}

#[rocket::async_test]
async fn test_index_returns_appearance() {
    let client = client().await;
    let response = client.get("/").dispatch().await;

    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Server"),
        Some("battlesnake/github/flood-snake")
    );
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["apiversion"], "1");
    assert_eq!(body["color"], "#FF0000");
}

#[rocket::async_test]
async fn test_move_returns_a_direction() {
    let client = client().await;
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(game_state((5, 5), json!([]), json!([])).to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    let chosen = body["move"].as_str().unwrap();
    assert!(["up", "left", "right"].contains(&chosen), "got {}", chosen);
}

#[rocket::async_test]
async fn test_malformed_snapshot_is_a_bad_request() {
    let client = client().await;
    let response = client
        .post("/move")
        .header(ContentType::JSON)
        .body(game_state((5, 5), json!([{"x": 42, "y": 0}]), json!([])).to_string())
        .dispatch()
        .await;

    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("food"));
}

#[rocket::async_test]
async fn test_start_and_end_acknowledge() {
    let client = client().await;
    for route in ["/start", "/end"] {
        let response = client
            .post(route)
            .header(ContentType::JSON)
            .body(game_state((2, 8), json!([]), json!([{"x": 0, "y": 0}])).to_string())
            .dispatch()
            .await;
        assert_eq!(response.status(), Status::Ok, "{}", route);
    }
}
