// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! The shipped rendering collaborator, backed by `mermaid-rs-renderer`.
//!
//! Parse, layout, and SVG generation all happen inside the upstream crate;
//! this module only adapts its API to the [`RenderBridge`]/[`Rasterizer`]
//! contracts and contains its panics.

use std::panic;
use std::path::Path;

use mermaid_rs_renderer::{
    config::{LayoutConfig, RenderConfig},
    layout::compute_layout,
    parser::parse_mermaid,
    render::{render_svg, write_output_png},
    theme::Theme,
};

use super::{ImageHandle, RasterizeError, Rasterizer, RenderBridge, RenderResult};

const RENDER_WIDTH: f32 = 1600.0;
const RENDER_HEIGHT: f32 = 1200.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct MermaidEngine;

impl MermaidEngine {
    pub fn new() -> Self {
        Self
    }

    fn layout_config() -> LayoutConfig {
        LayoutConfig {
            node_spacing: 80.0,
            rank_spacing: 80.0,
            node_padding_x: 40.0,
            node_padding_y: 20.0,
            ..Default::default()
        }
    }

    fn render_svg_inner(source: &str) -> Result<String, String> {
        let parsed = parse_mermaid(source).map_err(|err| format!("parse error: {err}"))?;
        let theme = Theme::modern();
        let layout_config = Self::layout_config();
        let layout = compute_layout(&parsed.graph, &theme, &layout_config);
        Ok(render_svg(&layout, &theme, &layout_config))
    }

    /// Runs `work` with panics contained; the upstream renderer can panic on
    /// malformed input.
    fn contained<T: Send + 'static>(
        work: impl FnOnce() -> Result<T, String> + Send + panic::UnwindSafe + 'static,
    ) -> Result<T, String> {
        let prev_hook = panic::take_hook();
        panic::set_hook(Box::new(|_| {}));
        let outcome = panic::catch_unwind(work);
        panic::set_hook(prev_hook);

        match outcome {
            Ok(result) => result,
            Err(_) => Err("renderer panicked on this input".to_owned()),
        }
    }
}

impl RenderBridge for MermaidEngine {
    fn render(&self, source: &str) -> RenderResult {
        if source.trim().is_empty() {
            return RenderResult::Failure("empty diagram source".to_owned());
        }

        let source = source.to_owned();
        match Self::contained(move || Self::render_svg_inner(&source)) {
            Ok(svg) => RenderResult::Success(ImageHandle::new(svg)),
            Err(diagnostic) => RenderResult::Failure(diagnostic),
        }
    }
}

impl Rasterizer for MermaidEngine {
    fn rasterize_png(&self, image: &ImageHandle, path: &Path) -> Result<(), RasterizeError> {
        let svg = image.svg().to_owned();
        let path = path.to_path_buf();

        Self::contained(move || {
            let theme = Theme::modern();
            let render_config = RenderConfig {
                width: RENDER_WIDTH,
                height: RENDER_HEIGHT,
                background: theme.background.clone(),
            };
            write_output_png(&svg, &path, &render_config, &theme)
                .map_err(|err| format!("{err}"))
        })
        .map_err(RasterizeError::new)
    }
}
