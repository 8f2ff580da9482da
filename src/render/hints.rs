// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Translation table from collaborator diagnostics to student hints.
//!
//! The raw diagnostic never reaches the UI; every failure is mapped to a
//! plain-language hint, with a generic fallback for diagnostics no rule
//! recognizes.

use std::sync::OnceLock;

use regex::Regex;

pub const EMPTY_SOURCE_HINT: &str =
    "The editor is empty. Pick a template or start with a line like `flowchart TD`.";

const FALLBACK_HINT: &str = "The diagram could not be drawn. Simplify it step by step until the \
                             preview comes back, then re-add your last change.";

struct HintRule {
    pattern: Regex,
    hint: &'static str,
}

fn rules() -> &'static [HintRule] {
    static RULES: OnceLock<Vec<HintRule>> = OnceLock::new();
    RULES.get_or_init(|| {
        let rule = |pattern: &str, hint: &'static str| HintRule {
            pattern: Regex::new(pattern).expect("static hint pattern"),
            hint,
        };
        vec![
            rule(
                r"(?i)empty diagram",
                EMPTY_SOURCE_HINT,
            ),
            rule(
                r"(?i)(unknown|unsupported|unrecognized).{0,40}(diagram|type)",
                "Start the first line with a diagram type, such as `flowchart TD`, `gantt`, or \
                 `classDiagram`.",
            ),
            rule(
                r"(?i)duplicate",
                "Two elements share the same id. Give every node its own short id, like `p1` or \
                 `d1`.",
            ),
            rule(
                r"(?i)(undefined|unknown|missing).{0,40}(node|participant|target)",
                "An arrow points at something that is not defined. Define the node first, then \
                 connect it.",
            ),
            rule(
                r"(?i)parse error|syntax|unexpected|expected|invalid",
                "Mermaid could not read part of the diagram. Check for a missing arrow `-->`, an \
                 unclosed bracket, or a stray character.",
            ),
        ]
    })
}

fn line_number(diagnostic: &str) -> Option<u64> {
    static LINE: OnceLock<Regex> = OnceLock::new();
    let re = LINE.get_or_init(|| Regex::new(r"(?i)line[\s:]+(\d+)").expect("static line pattern"));
    re.captures(diagnostic)?.get(1)?.as_str().parse().ok()
}

/// Maps a collaborator diagnostic to a student-facing hint.
///
/// The returned text never contains the diagnostic itself. When the
/// diagnostic names a line, the hint points the student at it.
pub fn student_hint(diagnostic: &str) -> String {
    let hint = rules()
        .iter()
        .find(|rule| rule.pattern.is_match(diagnostic))
        .map(|rule| rule.hint)
        .unwrap_or(FALLBACK_HINT);

    match line_number(diagnostic) {
        Some(line) => format!("Look at line {line}. {hint}"),
        None => hint.to_owned(),
    }
}
