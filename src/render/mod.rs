// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The collaborator seam for turning Mermaid text into images.
//!
//! The core never parses or rasterizes Mermaid itself; it hands source text to
//! a [`RenderBridge`] and receives back an [`ImageHandle`] or a diagnostic.
//! Diagnostics are collaborator-speak; [`hints`] translates them into
//! student-facing language before anything reaches the UI.

use std::fmt;
use std::path::Path;

pub mod engine;
pub mod hints;

pub use engine::MermaidEngine;

/// Handle to one successful render: the vector markup of the diagram.
///
/// PNG bytes are derived from this handle at export time; the handle itself
/// stays format-agnostic so a failed re-render can keep the last good image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageHandle {
    svg: String,
}

impl ImageHandle {
    pub fn new(svg: impl Into<String>) -> Self {
        Self { svg: svg.into() }
    }

    pub fn svg(&self) -> &str {
        &self.svg
    }

    pub fn into_svg(self) -> String {
        self.svg
    }
}

/// Outcome of handing source text to the rendering collaborator.
///
/// At the bridge boundary the `Failure` message is the collaborator's raw
/// diagnostic; the session controller re-wraps it as a student hint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderResult {
    Success(ImageHandle),
    Failure(String),
}

impl RenderResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

/// Narrow contract consumed by the session controller.
pub trait RenderBridge {
    fn render(&self, source: &str) -> RenderResult;
}

#[derive(Debug)]
pub struct RasterizeError {
    detail: String,
}

impl RasterizeError {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}

impl fmt::Display for RasterizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "png rasterization failed: {}", self.detail)
    }
}

impl std::error::Error for RasterizeError {}

/// PNG-producing side of the collaborator, used by the export service.
pub trait Rasterizer {
    fn rasterize_png(&self, image: &ImageHandle, path: &Path) -> Result<(), RasterizeError>;
}
