// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Downloadable artifacts: PNG, SVG, or the raw diagram source.
//!
//! `png`/`svg` need a prior successful render; `source` is always available
//! and byte-identical to the persisted `.mmd` format. The module also builds
//! mermaid.ink share links for the rendered formats.

use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use base64::engine::general_purpose::URL_SAFE;
use base64::Engine as _;

use crate::model::DiagramSource;
use crate::render::{ImageHandle, RasterizeError, Rasterizer};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Png,
    Svg,
    Source,
}

impl ExportFormat {
    /// Case-insensitive parse of the UI-facing format token.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "svg" => Some(Self::Svg),
            "source" => Some(Self::Source),
            _ => None,
        }
    }

    pub fn file_extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Svg => "svg",
            Self::Source => "mmd",
        }
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Svg => "image/svg+xml",
            Self::Source => "text/plain; charset=utf-8",
        }
    }
}

/// One finished export: bytes plus the metadata a download needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    file_name: String,
    media_type: &'static str,
    bytes: Vec<u8>,
}

impl Artifact {
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn media_type(&self) -> &'static str {
        self.media_type
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }
}

#[derive(Debug)]
pub enum ExportError {
    NotRendered,
    Rasterize(RasterizeError),
    Io { path: PathBuf, source: io::Error },
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotRendered => {
                write!(f, "render the diagram once before exporting an image")
            }
            Self::Rasterize(source) => write!(f, "{source}"),
            Self::Io { path, source } => write!(f, "io error at {path:?}: {source}"),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::NotRendered => None,
            Self::Rasterize(source) => Some(source),
            Self::Io { source, .. } => Some(source),
        }
    }
}

/// Converts the current source or the retained render into an [`Artifact`].
pub fn export(
    source: &DiagramSource,
    rendered: Option<&ImageHandle>,
    format: ExportFormat,
    rasterizer: &dyn Rasterizer,
) -> Result<Artifact, ExportError> {
    let bytes = match format {
        ExportFormat::Source => source.text().as_bytes().to_vec(),
        ExportFormat::Svg => {
            let image = rendered.ok_or(ExportError::NotRendered)?;
            image.svg().as_bytes().to_vec()
        }
        ExportFormat::Png => {
            let image = rendered.ok_or(ExportError::NotRendered)?;
            png_bytes(image, rasterizer)?
        }
    };

    Ok(Artifact {
        file_name: format!("{}.{}", file_stem(source), format.file_extension()),
        media_type: format.media_type(),
        bytes,
    })
}

/// Rasterizes through a scratch file; the collaborator writes PNG to disk.
/// The scratch file is removed on every exit path.
fn png_bytes(image: &ImageHandle, rasterizer: &dyn Rasterizer) -> Result<Vec<u8>, ExportError> {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_nanos();
    let scratch = std::env::temp_dir().join(format!(
        ".thalassa.export.{}.{nanos}.png",
        std::process::id()
    ));

    let result = rasterizer
        .rasterize_png(image, &scratch)
        .map_err(ExportError::Rasterize)
        .and_then(|()| {
            fs::read(&scratch).map_err(|source| ExportError::Io {
                path: scratch.clone(),
                source,
            })
        });

    match fs::remove_file(&scratch) {
        Ok(()) => {}
        Err(source) if source.kind() == io::ErrorKind::NotFound => {}
        Err(_source) => {}
    }

    result
}

fn file_stem(source: &DiagramSource) -> String {
    source
        .file_path()
        .and_then(Path::file_stem)
        .and_then(|stem| stem.to_str())
        .filter(|stem| !stem.is_empty())
        .map(ToOwned::to_owned)
        .unwrap_or_else(|| "diagram".to_owned())
}

/// Share link on mermaid.ink for the current source, if the format has one.
///
/// The service expects URL-safe base64 of the raw source. Raw source exports
/// have no remote equivalent.
pub fn ink_share_url(source_text: &str, format: ExportFormat) -> Option<String> {
    let segment = match format {
        ExportFormat::Png => "img",
        ExportFormat::Svg => "svg",
        ExportFormat::Source => return None,
    };
    let encoded = URL_SAFE.encode(source_text.as_bytes());
    Some(format!(
        "https://mermaid.ink/{segment}/{encoded}?background=white&theme=neutral"
    ))
}
