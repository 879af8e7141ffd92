/**
 * API Route Handlers
 *
 * # Routes
 *
 * ## Pages
 * - `GET /api/page/` - list pages
 * - `POST /api/page/` - create a page
 * - `GET /api/page/{id}` - fetch a page
 * - `PUT /api/page/{id}` - replace a page's content
 * - `DELETE /api/page/{id}` - delete a page
 *
 * ## Session
 * - `GET /api/me` - identity of the current session
 *
 * Every route here sits behind `require_session`.
 */

use axum::{middleware, routing::get, Router};

use crate::backend::auth::get_me;
use crate::backend::middleware::require_session;
use crate::backend::pages::{create_page, delete_page, get_page, list_pages, update_page};
use crate::backend::server::state::AppState;

/// Configure API routes
///
/// The collection is reachable both with and without a trailing slash.
pub fn configure_api_routes(router: Router<AppState>, app_state: AppState) -> Router<AppState> {
    let api = Router::new()
        .route("/api/page", get(list_pages).post(create_page))
        .route("/api/page/", get(list_pages).post(create_page))
        .route(
            "/api/page/{id}",
            get(get_page).put(update_page).delete(delete_page),
        )
        .route("/api/me", get(get_me))
        .route_layer(middleware::from_fn_with_state(app_state, require_session));

    router.merge(api)
}
