// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Thalassa — a local Mermaid diagram studio for the classroom.
//!
//! The crate is organized around one editing session: `session` holds the
//! state machine (source, history, render/export transitions), `render`
//! defines the collaborator seam for turning Mermaid text into images, and
//! `web` serves the single-page panel students interact with.

pub mod export;
pub mod history;
pub mod model;
pub mod render;
pub mod session;
pub mod store;
pub mod templates;
pub mod web;
