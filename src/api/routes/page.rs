use axum::extract::State;
use axum::response::Html;
use axum::Json;
use chrono::Datelike;

use crate::aggregate::build_showcase;
use crate::api::state::AppState;
use crate::models::Showcase;
use crate::render::render_page;

async fn current_showcase(state: &AppState) -> Showcase {
    build_showcase(state.gateway.as_ref(), &state.fallback, state.configured).await
}

/// `GET /`: the rendered profile page.
pub async fn showcase_page(State(state): State<AppState>) -> Html<String> {
    let showcase = current_showcase(&state).await;
    Html(render_page(&showcase, &state.page, chrono::Utc::now().year()))
}

/// `GET /api/showcase`: the view model behind the page.
pub async fn showcase_json(State(state): State<AppState>) -> Json<Showcase> {
    Json(current_showcase(&state).await)
}
