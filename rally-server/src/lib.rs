use warp::Filter;

use crate::session::SessionHandle;

pub mod config;
pub mod session;
pub mod websocket;

pub fn create_routes(
    handle: SessionHandle,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let session_filter = warp::any().map({
        let handle = handle.clone();
        move || handle.clone()
    });

    // WebSocket endpoint
    let websocket = warp::path("ws")
        .and(warp::ws())
        .and(session_filter)
        .map(|ws: warp::ws::Ws, handle: SessionHandle| {
            ws.on_upgrade(move |socket| websocket::handle_connection(socket, handle))
        });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", warp::http::StatusCode::OK));

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET"]);

    websocket
        .or(health)
        .with(cors)
        .with(warp::log("word_rally"))
}
