// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Debounced live preview.
//!
//! Typing schedules a render instead of performing one: a worker thread waits
//! out a quiet period, always rendering only the newest scheduled text, and
//! hands the outcome back to the session. The session drops outcomes whose
//! revision is stale by the time they arrive.

use std::sync::{Arc, Condvar, Mutex};
use std::thread;
use std::time::Duration;

use crate::render::{MermaidEngine, RenderBridge};
use crate::session::SessionController;

const QUIET_PERIOD: Duration = Duration::from_millis(250);

#[derive(Debug)]
struct PreviewTask {
    rev: u64,
    text: String,
}

#[derive(Debug, Default)]
struct PreviewInner {
    pending: Mutex<Option<PreviewTask>>,
    cv: Condvar,
}

#[derive(Debug)]
pub struct PreviewScheduler {
    inner: Arc<PreviewInner>,
}

impl PreviewScheduler {
    pub fn spawn(engine: MermaidEngine, session: Arc<Mutex<SessionController>>) -> Self {
        let inner = Arc::new(PreviewInner::default());

        thread::Builder::new()
            .name("thalassa-preview".to_owned())
            .spawn({
                let inner = inner.clone();
                move || run_worker(inner, engine, session)
            })
            .expect("spawn preview worker thread");

        Self { inner }
    }

    /// Latest-wins: a newer schedule replaces an older one that has not been
    /// rendered yet.
    pub fn schedule(&self, rev: u64, text: String) {
        let mut pending = self.inner.pending.lock().expect("preview lock poisoned");
        *pending = Some(PreviewTask { rev, text });
        self.inner.cv.notify_one();
    }
}

fn run_worker(
    inner: Arc<PreviewInner>,
    engine: MermaidEngine,
    session: Arc<Mutex<SessionController>>,
) {
    loop {
        let mut task = {
            let mut pending = inner.pending.lock().expect("preview lock poisoned");
            loop {
                if let Some(task) = pending.take() {
                    break task;
                }
                pending = inner.cv.wait(pending).expect("preview cv poisoned");
            }
        };

        // Quiet period: keep absorbing newer schedules until one survives it.
        loop {
            thread::sleep(QUIET_PERIOD);
            let mut pending = inner.pending.lock().expect("preview lock poisoned");
            match pending.take() {
                Some(newer) => task = newer,
                None => break,
            }
        }

        let outcome = engine.render(&task.text);

        let mut session = session.lock().expect("session lock poisoned");
        session.record_render(task.rev, outcome);
    }
}
