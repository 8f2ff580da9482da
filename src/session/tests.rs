// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::Path;

use crate::export::ExportError;
use crate::render::{ImageHandle, RasterizeError, Rasterizer, RenderBridge, RenderResult};
use crate::store::DiagramStore;
use crate::templates::TemplateLibrary;

use super::{PreviewState, SessionController, SessionError};

fn controller() -> SessionController {
    SessionController::new(TemplateLibrary::builtin(), DiagramStore::new())
}

/// Bridge that renders every input to the same canned SVG.
struct AlwaysOk;

impl RenderBridge for AlwaysOk {
    fn render(&self, source: &str) -> RenderResult {
        RenderResult::Success(ImageHandle::new(format!("<svg><!-- {} --></svg>", source.len())))
    }
}

/// Bridge that fails with a fixed collaborator diagnostic.
struct AlwaysFails(&'static str);

impl RenderBridge for AlwaysFails {
    fn render(&self, _source: &str) -> RenderResult {
        RenderResult::Failure(self.0.to_owned())
    }
}

struct NoPng;

impl Rasterizer for NoPng {
    fn rasterize_png(&self, _image: &ImageHandle, _path: &Path) -> Result<(), RasterizeError> {
        Err(RasterizeError::new("unused in these tests"))
    }
}

#[test]
fn edit_undo_redo_scenario() {
    let mut session = controller();
    assert_eq!(session.text(), "");

    session.edit_source("A");
    session.edit_source("B");

    assert!(session.undo());
    assert_eq!(session.text(), "A");
    assert!(session.undo());
    assert_eq!(session.text(), "");
    assert!(!session.undo());

    assert!(session.redo());
    assert_eq!(session.text(), "A");
}

#[test]
fn edit_discards_redo_branch() {
    let mut session = controller();
    session.edit_source("A");
    session.edit_source("B");
    session.undo();
    assert!(session.can_redo());

    session.edit_source("C");
    assert!(!session.can_redo());
    assert_eq!(session.text(), "C");
}

#[test]
fn identical_edit_is_not_an_undo_point() {
    let mut session = controller();
    session.edit_source("A");
    let rev = session.rev();

    session.edit_source("A");
    assert_eq!(session.rev(), rev);

    assert!(session.undo());
    assert_eq!(session.text(), "");
    assert!(!session.can_undo());
}

#[test]
fn select_template_replaces_text_and_is_undoable() {
    let mut session = controller();
    session.edit_source("my sketch");
    session.select_template("loop").expect("loop template");

    let expected = session
        .templates()
        .get("loop")
        .expect("loop template")
        .text()
        .to_owned();
    assert_eq!(session.text(), expected);

    assert!(session.undo());
    assert_eq!(session.text(), "my sketch");
}

#[test]
fn unknown_template_leaves_session_unchanged() {
    let mut session = controller();
    session.edit_source("keep me");
    let rev = session.rev();

    let err = session.select_template("gant").unwrap_err();
    let SessionError::TemplateNotFound { name, suggestion } = err else {
        panic!("expected TemplateNotFound");
    };
    assert_eq!(name, "gant");
    assert_eq!(suggestion.as_deref(), Some("gantt"));

    assert_eq!(session.text(), "keep me");
    assert_eq!(session.rev(), rev);
    assert!(!session.can_redo());
}

#[test]
fn render_success_updates_preview() {
    let mut session = controller();
    session.edit_source("flowchart TD");

    let result = session.render(&AlwaysOk);
    assert!(result.is_success());
    assert!(session.rendered().is_some());
    assert_eq!(session.view().preview.state, PreviewState::Ok);
}

#[test]
fn render_failure_keeps_prior_image_and_translates_diagnostic() {
    let mut session = controller();
    session.edit_source("flowchart TD");
    session.render(&AlwaysOk);
    let good = session.rendered().cloned().expect("rendered image");

    session.edit_source("flowchart TD broken");
    let RenderResult::Failure(hint) = session.render(&AlwaysFails("parse error on line 2")) else {
        panic!("expected failure");
    };

    // The hint is student language, not the collaborator's diagnostic.
    assert!(!hint.contains("parse error"));
    assert!(hint.contains("line 2"));

    // The last good image stays visible.
    assert_eq!(session.rendered(), Some(&good));
    let preview = session.view().preview;
    assert_eq!(preview.state, PreviewState::Error);
    assert_eq!(preview.hint, Some(hint));
}

#[test]
fn render_success_clears_earlier_hint() {
    let mut session = controller();
    session.edit_source("x");
    session.render(&AlwaysFails("syntax error"));
    assert_eq!(session.view().preview.state, PreviewState::Error);

    session.render(&AlwaysOk);
    assert_eq!(session.view().preview.state, PreviewState::Ok);
    assert_eq!(session.view().preview.hint, None);
}

#[test]
fn stale_render_results_are_dropped() {
    let mut session = controller();
    session.edit_source("v1");
    let stale_rev = session.rev();
    session.edit_source("v2");

    let outcome = RenderResult::Success(ImageHandle::new("<svg>old</svg>"));
    assert!(!session.record_render(stale_rev, outcome));
    assert!(session.rendered().is_none());

    let outcome = RenderResult::Success(ImageHandle::new("<svg>new</svg>"));
    assert!(session.record_render(session.rev(), outcome));
    assert_eq!(session.rendered().map(ImageHandle::svg), Some("<svg>new</svg>"));
}

#[test]
fn save_sets_file_path_and_load_round_trips() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("d.mmd");

    let mut session = controller();
    session.select_template("gantt").expect("gantt template");
    session.save(&path).expect("save");
    assert_eq!(session.file_path(), Some(path.as_path()));

    let mut fresh = controller();
    fresh.load(&path).expect("load");
    assert_eq!(fresh.text(), session.text());
    assert_eq!(fresh.file_path(), Some(path.as_path()));
}

#[test]
fn failed_load_does_not_mutate_state() {
    let dir = tempfile::tempdir().expect("tempdir");
    let missing = dir.path().join("missing.mmd");

    let mut session = controller();
    session.edit_source("keep me");
    let rev = session.rev();

    let err = session.load(&missing).unwrap_err();
    let SessionError::Store(store_err) = &err else {
        panic!("expected store error, got {err:?}");
    };
    assert!(store_err.is_not_found());

    assert_eq!(session.text(), "keep me");
    assert_eq!(session.rev(), rev);
    assert!(session.file_path().is_none());
}

#[test]
fn load_is_undoable() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("d.mmd");
    DiagramStore::new().save(&path, "loaded text").expect("seed file");

    let mut session = controller();
    session.edit_source("before load");
    session.load(&path).expect("load");
    assert_eq!(session.text(), "loaded text");

    assert!(session.undo());
    assert_eq!(session.text(), "before load");
}

#[test]
fn export_unknown_format_is_rejected() {
    let session = controller();
    let err = session.export("pdf", &NoPng).unwrap_err();
    let SessionError::UnsupportedFormat { format } = err else {
        panic!("expected UnsupportedFormat");
    };
    assert_eq!(format, "pdf");
}

#[test]
fn export_image_before_render_is_rejected() {
    let mut session = controller();
    session.edit_source("flowchart TD");

    let err = session.export("png", &NoPng).unwrap_err();
    assert!(matches!(
        err,
        SessionError::Export(ExportError::NotRendered)
    ));
}

#[test]
fn export_source_needs_no_render() {
    let mut session = controller();
    session.edit_source("flowchart TD\n    a --> b\n");

    let artifact = session.export("source", &NoPng).expect("source export");
    assert_eq!(artifact.bytes(), session.text().as_bytes());
}

#[test]
fn export_svg_after_render_uses_the_handle() {
    let mut session = controller();
    session.edit_source("flowchart TD");
    session.render(&AlwaysOk);

    let artifact = session.export("svg", &NoPng).expect("svg export");
    assert_eq!(
        artifact.bytes(),
        session.rendered().expect("rendered").svg().as_bytes()
    );
}
