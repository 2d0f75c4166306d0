use axum::{
    http::{StatusCode, header},
    response::IntoResponse,
};

/// GET / — always send the browser to the static landing page.
pub async fn root() -> impl IntoResponse {
    (StatusCode::FOUND, [(header::LOCATION, "/index.html")])
}

pub async fn not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
