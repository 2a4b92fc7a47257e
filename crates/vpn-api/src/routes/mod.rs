pub mod instances;

use axum::Router;
use axum::routing::get;

use crate::state::AppState;

pub fn api_router(state: AppState) -> Router {
    Router::new()
        // Bare path operates on the configured default region.
        .route(
            "/instances",
            get(instances::list_default)
                .post(instances::launch_default)
                .delete(instances::terminate_default)
                .fallback(instances::not_implemented),
        )
        .route(
            "/instances/{region}",
            get(instances::list_in_region)
                .post(instances::launch_in_region)
                .delete(instances::terminate_in_region)
                .fallback(instances::not_implemented),
        )
        .with_state(state)
}
