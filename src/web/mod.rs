// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The local UI server: one embedded page plus a small JSON API.
//!
//! Every session error is recovered here and surfaced as a message in the
//! response body; no user action can take the process down. Handlers lock the
//! session only for the duration of the state transition.

use std::path::Path;
use std::sync::{Arc, Mutex};

use axum::extract::{Path as UrlPath, State};
use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};

use crate::export::{self, ExportFormat};
use crate::render::{MermaidEngine, RenderResult};
use crate::session::{SessionController, SessionView};

pub mod preview;

use preview::PreviewScheduler;

/// Default port for the local panel; loopback only.
pub const DEFAULT_HTTP_PORT: u16 = 27436;

const PANEL_HTML: &str = include_str!("panel.html");

const PLACEHOLDER_SVG: &str = r##"<svg xmlns="http://www.w3.org/2000/svg" width="520" height="140"><rect width="100%" height="100%" fill="#f8fafc"/><text x="28" y="76" font-family="sans-serif" font-size="15" fill="#64748b">Nothing rendered yet. Pick a template or start typing.</text></svg>"##;

pub type SharedSession = Arc<Mutex<SessionController>>;

pub struct AppState {
    session: SharedSession,
    engine: MermaidEngine,
    preview: PreviewScheduler,
}

/// Builds the panel router; spawns the preview worker as a side effect.
pub fn app(session: SharedSession, engine: MermaidEngine) -> Router {
    let preview = PreviewScheduler::spawn(engine, session.clone());
    let state = Arc::new(AppState {
        session,
        engine,
        preview,
    });

    Router::new()
        .route("/", get(panel))
        .route("/api/state", get(get_state))
        .route("/api/template", post(post_template))
        .route("/api/edit", post(post_edit))
        .route("/api/undo", post(post_undo))
        .route("/api/redo", post(post_redo))
        .route("/api/render", post(post_render))
        .route("/api/preview.svg", get(get_preview_svg))
        .route("/api/export/{format}", get(get_export))
        .route("/api/save", post(post_save))
        .route("/api/load", post(post_load))
        .with_state(state)
}

#[derive(Debug, Serialize)]
struct ShareLinks {
    png: Option<String>,
    svg: Option<String>,
}

#[derive(Debug, Serialize)]
struct StateResponse {
    view: SessionView,
    share: ShareLinks,
}

#[derive(Debug, Serialize)]
struct ActionResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
    view: SessionView,
}

impl ActionResponse {
    fn ok(view: SessionView) -> Json<Self> {
        Json(Self {
            ok: true,
            message: None,
            view,
        })
    }

    fn err(message: impl Into<String>, view: SessionView) -> Json<Self> {
        Json(Self {
            ok: false,
            message: Some(message.into()),
            view,
        })
    }
}

#[derive(Debug, Deserialize)]
struct TemplateRequest {
    name: String,
}

#[derive(Debug, Deserialize)]
struct EditRequest {
    text: String,
}

#[derive(Debug, Deserialize)]
struct SaveRequest {
    #[serde(default)]
    path: Option<String>,
}

#[derive(Debug, Deserialize)]
struct LoadRequest {
    path: String,
}

fn share_links(text: &str) -> ShareLinks {
    if text.trim().is_empty() {
        return ShareLinks {
            png: None,
            svg: None,
        };
    }
    ShareLinks {
        png: export::ink_share_url(text, ExportFormat::Png),
        svg: export::ink_share_url(text, ExportFormat::Svg),
    }
}

fn schedule_preview(state: &AppState, session: &SessionController) {
    state
        .preview
        .schedule(session.rev(), session.text().to_owned());
}

async fn panel() -> Html<&'static str> {
    Html(PANEL_HTML)
}

async fn get_state(State(state): State<Arc<AppState>>) -> Json<StateResponse> {
    let session = state.session.lock().expect("session lock poisoned");
    Json(StateResponse {
        view: session.view(),
        share: share_links(session.text()),
    })
}

async fn post_template(
    State(state): State<Arc<AppState>>,
    Json(request): Json<TemplateRequest>,
) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");
    match session.select_template(&request.name) {
        Ok(()) => {
            schedule_preview(&state, &session);
            ActionResponse::ok(session.view())
        }
        Err(err) => ActionResponse::err(err.to_string(), session.view()),
    }
}

async fn post_edit(
    State(state): State<Arc<AppState>>,
    Json(request): Json<EditRequest>,
) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");
    session.edit_source(request.text);
    schedule_preview(&state, &session);
    ActionResponse::ok(session.view())
}

async fn post_undo(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");
    if session.undo() {
        schedule_preview(&state, &session);
    }
    ActionResponse::ok(session.view())
}

async fn post_redo(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");
    if session.redo() {
        schedule_preview(&state, &session);
    }
    ActionResponse::ok(session.view())
}

async fn post_render(State(state): State<Arc<AppState>>) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");
    match session.render(&state.engine) {
        RenderResult::Success(_) => ActionResponse::ok(session.view()),
        RenderResult::Failure(hint) => ActionResponse::err(hint, session.view()),
    }
}

async fn get_preview_svg(State(state): State<Arc<AppState>>) -> Response {
    let session = state.session.lock().expect("session lock poisoned");
    let svg = session
        .rendered()
        .map(|image| image.svg().to_owned())
        .unwrap_or_else(|| PLACEHOLDER_SVG.to_owned());

    (
        [
            (header::CONTENT_TYPE, "image/svg+xml"),
            (header::CACHE_CONTROL, "no-store"),
        ],
        svg,
    )
        .into_response()
}

async fn get_export(
    State(state): State<Arc<AppState>>,
    UrlPath(format): UrlPath<String>,
) -> Response {
    let artifact = {
        let session = state.session.lock().expect("session lock poisoned");
        session.export(&format, &state.engine)
    };

    match artifact {
        Ok(artifact) => {
            let disposition = format!("attachment; filename=\"{}\"", artifact.file_name());
            (
                [
                    (header::CONTENT_TYPE, artifact.media_type().to_owned()),
                    (header::CONTENT_DISPOSITION, disposition),
                ],
                artifact.into_bytes(),
            )
                .into_response()
        }
        Err(err) => (StatusCode::UNPROCESSABLE_ENTITY, err.to_string()).into_response(),
    }
}

async fn post_save(
    State(state): State<Arc<AppState>>,
    Json(request): Json<SaveRequest>,
) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");

    let path = match request.path {
        Some(path) if !path.trim().is_empty() => path,
        _ => match session.file_path() {
            Some(path) => path.display().to_string(),
            None => {
                return ActionResponse::err(
                    "no file chosen yet; provide a path ending in .mmd",
                    session.view(),
                );
            }
        },
    };

    match session.save(Path::new(&path)) {
        Ok(()) => ActionResponse::ok(session.view()),
        Err(err) => ActionResponse::err(err.to_string(), session.view()),
    }
}

async fn post_load(
    State(state): State<Arc<AppState>>,
    Json(request): Json<LoadRequest>,
) -> Json<ActionResponse> {
    let mut session = state.session.lock().expect("session lock poisoned");
    match session.load(Path::new(&request.path)) {
        Ok(()) => {
            schedule_preview(&state, &session);
            ActionResponse::ok(session.view())
        }
        Err(err) => ActionResponse::err(err.to_string(), session.view()),
    }
}
