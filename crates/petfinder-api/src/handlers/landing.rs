use axum::{extract::State, response::Html};

use crate::state::AppState;

/// GET / - informational page for visitors
pub async fn landing(State(state): State<AppState>) -> Html<String> {
    let name = &state.config.app.name;
    Html(format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{name}</title></head>
<body>
  <h1>Welcome to PetFinder</h1>
  <p>Register your pets, print their QR tags, and help finders bring them home.</p>
  <p>Found a pet? Scan the QR code on its tag to see who it is.</p>
</body>
</html>"#
    ))
}
