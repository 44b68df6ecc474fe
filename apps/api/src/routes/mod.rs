pub mod health;

use axum::{
    routing::{delete, get, patch, post, put},
    Router,
};

use crate::session::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(handlers::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(handlers::handle_get_session).delete(handlers::handle_delete_session),
        )
        .route(
            "/api/v1/sessions/:id/document",
            put(handlers::handle_set_document),
        )
        .route(
            "/api/v1/sessions/:id/metadata",
            patch(handlers::handle_update_metadata),
        )
        // Sections, items, bullets
        .route(
            "/api/v1/sessions/:id/sections",
            post(handlers::handle_add_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/order",
            put(handlers::handle_reorder_sections),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id",
            patch(handlers::handle_update_section_title).delete(handlers::handle_remove_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/skills",
            post(handlers::handle_add_skill),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items/:item_id",
            delete(handlers::handle_remove_item),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items/:item_id/summary",
            put(handlers::handle_update_summary),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items/:item_id/bullets",
            post(handlers::handle_add_bullet),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id/items/:item_id/bullets/:bullet_id",
            patch(handlers::handle_update_bullet).delete(handlers::handle_remove_bullet),
        )
        // History
        .route("/api/v1/sessions/:id/undo", post(handlers::handle_undo))
        .route("/api/v1/sessions/:id/redo", post(handlers::handle_redo))
        // Analysis and review
        .route("/api/v1/sessions/:id/analyze", post(handlers::handle_analyze))
        .route(
            "/api/v1/sessions/:id/suggestions/cursor",
            post(handlers::handle_move_cursor),
        )
        .route(
            "/api/v1/sessions/:id/suggestions/:suggestion_id/approve",
            post(handlers::handle_approve),
        )
        .route(
            "/api/v1/sessions/:id/suggestions/:suggestion_id/discard",
            post(handlers::handle_discard),
        )
        // Matching and export
        .route("/api/v1/sessions/:id/match", post(handlers::handle_match))
        .route("/api/v1/sessions/:id/export", get(handlers::handle_export))
        .with_state(state)
}
