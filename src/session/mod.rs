// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The editing-session state machine.
//!
//! Every user action is an explicit transition on a [`SessionController`]
//! value; nothing here depends on a UI framework or a render trigger. Text
//! changes bump a session revision so asynchronously produced render results
//! can be discarded when they arrive stale.

use std::fmt;
use std::path::Path;

use serde::Serialize;

use crate::export::{self, Artifact, ExportError, ExportFormat};
use crate::history::History;
use crate::model::DiagramSource;
use crate::render::{hints, ImageHandle, Rasterizer, RenderBridge, RenderResult};
use crate::store::{DiagramStore, StoreError};
use crate::templates::TemplateLibrary;

#[derive(Debug)]
pub enum SessionError {
    TemplateNotFound {
        name: String,
        suggestion: Option<String>,
    },
    Store(StoreError),
    UnsupportedFormat {
        format: String,
    },
    Export(ExportError),
}

impl fmt::Display for SessionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::TemplateNotFound { name, suggestion } => {
                write!(f, "no template named {name:?}")?;
                if let Some(suggestion) = suggestion {
                    write!(f, " (did you mean {suggestion:?}?)")?;
                }
                Ok(())
            }
            Self::Store(source) => write!(f, "{source}"),
            Self::UnsupportedFormat { format } => {
                write!(
                    f,
                    "unsupported export format {format:?} (expected png, svg, or source)"
                )
            }
            Self::Export(source) => write!(f, "{source}"),
        }
    }
}

impl std::error::Error for SessionError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::TemplateNotFound { .. } => None,
            Self::Store(source) => Some(source),
            Self::UnsupportedFormat { .. } => None,
            Self::Export(source) => Some(source),
        }
    }
}

/// One student's in-memory editing state. Discarded when the process ends;
/// nothing persists without an explicit save.
#[derive(Debug)]
pub struct SessionController {
    source: DiagramSource,
    history: History,
    templates: TemplateLibrary,
    store: DiagramStore,
    rev: u64,
    rendered: Option<ImageHandle>,
    render_hint: Option<String>,
}

impl SessionController {
    pub fn new(templates: TemplateLibrary, store: DiagramStore) -> Self {
        Self {
            source: DiagramSource::default(),
            history: History::new(),
            templates,
            store,
            rev: 0,
            rendered: None,
            render_hint: None,
        }
    }

    pub fn text(&self) -> &str {
        self.source.text()
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.source.file_path()
    }

    /// Session revision; bumped on every text change. Used to discard stale
    /// asynchronous render results.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn rendered(&self) -> Option<&ImageHandle> {
        self.rendered.as_ref()
    }

    pub fn templates(&self) -> &TemplateLibrary {
        &self.templates
    }

    /// Replaces the source with a template. Unknown names leave the session
    /// untouched; the saved-file path is kept so a later save goes where the
    /// student already chose.
    pub fn select_template(&mut self, name: &str) -> Result<(), SessionError> {
        let Some(template) = self.templates.get(name) else {
            return Err(SessionError::TemplateNotFound {
                name: name.to_owned(),
                suggestion: self.templates.suggest(name).map(ToOwned::to_owned),
            });
        };
        let text = template.text().to_owned();
        self.replace_text(text);
        Ok(())
    }

    /// Replaces the source text. No syntax validation happens here; that is
    /// the render collaborator's concern.
    pub fn edit_source(&mut self, new_text: impl Into<String>) {
        self.replace_text(new_text.into());
    }

    /// Steps back one snapshot. Returns false when there is nothing to undo.
    pub fn undo(&mut self) -> bool {
        let current = self.source.text().to_owned();
        match self.history.undo(current) {
            Some(restored) => {
                self.source.set_text(restored);
                self.bump_rev();
                true
            }
            None => false,
        }
    }

    /// Inverse of [`undo`](Self::undo). Returns false when there is nothing
    /// to redo.
    pub fn redo(&mut self) -> bool {
        let current = self.source.text().to_owned();
        match self.history.redo(current) {
            Some(restored) => {
                self.source.set_text(restored);
                self.bump_rev();
                true
            }
            None => false,
        }
    }

    /// Hands the current text to the collaborator and records the outcome.
    ///
    /// A success replaces the retained image; a failure keeps the prior image
    /// visible and surfaces a translated hint, never the raw diagnostic.
    pub fn render(&mut self, bridge: &dyn RenderBridge) -> RenderResult {
        let outcome = bridge.render(self.source.text());
        self.apply_render_outcome(outcome)
    }

    /// Records an asynchronously produced render outcome, if still current.
    ///
    /// Returns false when `rev` no longer matches the session (the text
    /// changed while the render was in flight) and the outcome is dropped.
    pub fn record_render(&mut self, rev: u64, outcome: RenderResult) -> bool {
        if rev != self.rev {
            return false;
        }
        self.apply_render_outcome(outcome);
        true
    }

    /// Writes the current text verbatim and remembers the path.
    pub fn save(&mut self, path: &Path) -> Result<(), SessionError> {
        self.store.save(path, self.source.text()).map_err(SessionError::Store)?;
        self.source.set_file_path(Some(path.to_path_buf()));
        Ok(())
    }

    /// Loads a file as the new source. Failure leaves the session untouched;
    /// success is undoable like any other text replacement.
    pub fn load(&mut self, path: &Path) -> Result<(), SessionError> {
        let text = self.store.load(path).map_err(SessionError::Store)?;
        self.replace_text(text);
        self.source.set_file_path(Some(path.to_path_buf()));
        Ok(())
    }

    /// Builds a downloadable artifact for `format` ∈ {png, svg, source}.
    pub fn export(
        &self,
        format: &str,
        rasterizer: &dyn Rasterizer,
    ) -> Result<Artifact, SessionError> {
        let Some(format) = ExportFormat::parse(format) else {
            return Err(SessionError::UnsupportedFormat {
                format: format.to_owned(),
            });
        };
        export::export(&self.source, self.rendered.as_ref(), format, rasterizer)
            .map_err(SessionError::Export)
    }

    /// UI-facing snapshot of the session.
    pub fn view(&self) -> SessionView {
        let preview = if let Some(hint) = &self.render_hint {
            PreviewView {
                state: PreviewState::Error,
                hint: Some(hint.clone()),
            }
        } else if self.rendered.is_some() {
            PreviewView {
                state: PreviewState::Ok,
                hint: None,
            }
        } else {
            PreviewView {
                state: PreviewState::Blank,
                hint: None,
            }
        };

        SessionView {
            text: self.source.text().to_owned(),
            file_path: self
                .source
                .file_path()
                .map(|path| path.display().to_string()),
            rev: self.rev,
            can_undo: self.history.can_undo(),
            can_redo: self.history.can_redo(),
            preview,
            templates: self
                .templates
                .templates()
                .iter()
                .map(|template| TemplateView {
                    name: template.name(),
                    title: template.title(),
                    description: template.description(),
                })
                .collect(),
        }
    }

    fn replace_text(&mut self, new_text: String) {
        if new_text == self.source.text() {
            return;
        }
        let prior = self.source.text().to_owned();
        self.history.record(prior);
        self.source.set_text(new_text);
        self.bump_rev();
    }

    fn apply_render_outcome(&mut self, outcome: RenderResult) -> RenderResult {
        match outcome {
            RenderResult::Success(handle) => {
                self.rendered = Some(handle.clone());
                self.render_hint = None;
                RenderResult::Success(handle)
            }
            RenderResult::Failure(diagnostic) => {
                let hint = hints::student_hint(&diagnostic);
                self.render_hint = Some(hint.clone());
                RenderResult::Failure(hint)
            }
        }
    }

    fn bump_rev(&mut self) {
        self.rev = self.rev.wrapping_add(1);
    }
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct SessionView {
    pub text: String,
    pub file_path: Option<String>,
    pub rev: u64,
    pub can_undo: bool,
    pub can_redo: bool,
    pub preview: PreviewView,
    pub templates: Vec<TemplateView>,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct TemplateView {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PreviewView {
    pub state: PreviewState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PreviewState {
    Blank,
    Ok,
    Error,
}

#[cfg(test)]
mod tests;
