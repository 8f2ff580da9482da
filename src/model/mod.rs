// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::path::{Path, PathBuf};

/// The textual diagram a session is editing.
///
/// `text` is always defined (possibly empty). `file_path` is set only after an
/// explicit save or load; template selection and plain edits never touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagramSource {
    text: String,
    file_path: Option<PathBuf>,
}

impl DiagramSource {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            file_path: None,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn file_path(&self) -> Option<&Path> {
        self.file_path.as_deref()
    }

    pub fn set_file_path(&mut self, file_path: Option<PathBuf>) {
        self.file_path = file_path;
    }

    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }
}
