// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Thalassa-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Thalassa and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Built-in starter diagrams.
//!
//! The library is fixed at process start; lookups are by stable name. Unknown
//! names yield a closest-match suggestion so the panel can say "did you mean".

use rapidfuzz::distance::levenshtein;

/// A predefined starting diagram. Immutable after construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    text: &'static str,
}

impl Template {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn title(&self) -> &'static str {
        self.title
    }

    pub fn description(&self) -> &'static str {
        self.description
    }

    pub fn text(&self) -> &'static str {
        self.text
    }
}

#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    templates: Vec<Template>,
}

impl Default for TemplateLibrary {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TemplateLibrary {
    pub fn builtin() -> Self {
        Self {
            templates: builtin_templates(),
        }
    }

    pub fn templates(&self) -> &[Template] {
        &self.templates
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.name == name)
    }

    /// Closest known name for an unknown lookup, if any is plausibly close.
    ///
    /// Accepts at most 2 edits, or a third for long names, so "gant" suggests
    /// "gantt" but "zzzz" suggests nothing.
    pub fn suggest(&self, name: &str) -> Option<&'static str> {
        let needle = name.trim().to_ascii_lowercase();
        if needle.is_empty() {
            return None;
        }

        self.templates
            .iter()
            .map(|t| (t.name, levenshtein::distance(needle.chars(), t.name.chars())))
            .min_by_key(|(_, dist)| *dist)
            .filter(|(candidate, dist)| *dist <= max_edits(&needle, candidate))
            .map(|(candidate, _)| candidate)
    }
}

fn max_edits(needle: &str, candidate: &str) -> usize {
    let longer = needle.chars().count().max(candidate.chars().count());
    if longer >= 8 {
        3
    } else {
        2
    }
}

fn builtin_templates() -> Vec<Template> {
    vec![
        Template {
            name: "empty",
            title: "Empty canvas",
            description: "The simplest possible start",
            text: "flowchart TD\n    s([Start]) --> e([End])\n",
        },
        Template {
            name: "simple-flow",
            title: "Simple flow",
            description: "Input, process, decision, output",
            text: "flowchart TD\n    s([Start])\n    io1[/Read value/]\n    p1[Process value]\n    d1{Is it valid?}\n    io2[/Show result/]\n    e([End])\n\n    s --> io1\n    io1 --> p1\n    p1 --> d1\n    d1 -->|Yes| io2\n    d1 -->|No| io1\n    io2 --> e\n",
        },
        Template {
            name: "gantt",
            title: "Project plan",
            description: "A small Gantt chart",
            text: "gantt\n    title Class project\n    dateFormat YYYY-MM-DD\n    section Research\n    Collect sources      :a1, 2026-03-02, 5d\n    Take notes           :a2, after a1, 3d\n    section Writing\n    First draft          :b1, after a2, 4d\n    Review and revise    :b2, after b1, 2d\n",
        },
        Template {
            name: "class",
            title: "Class diagram",
            description: "Types and relations",
            text: "classDiagram\n    class Animal {\n        +String name\n        +makeSound()\n    }\n    class Dog {\n        +fetch()\n    }\n    class Cat {\n        +ignoreEveryone()\n    }\n    Animal <|-- Dog\n    Animal <|-- Cat\n",
        },
        Template {
            name: "atm",
            title: "ATM withdrawal",
            description: "Card, PIN, balance checks",
            text: "flowchart TD\n    s([Start])\n    c[/Insert card/]\n    p[/Enter PIN/]\n    d{PIN correct?}\n    m[Choose amount]\n    b{Balance sufficient?}\n    w[Show warning]\n    v[Dispense cash]\n    e([End])\n\n    s --> c --> p --> d\n    d -->|No| p\n    d -->|Yes| m --> b\n    b -->|No| w --> e\n    b -->|Yes| v --> e\n",
        },
        Template {
            name: "loop",
            title: "Loop",
            description: "Conditional repetition",
            text: "flowchart TD\n    s([Start]) --> p1[Prepare]\n    p1 --> d1{Continue?}\n    d1 -->|Yes| p2[Step]\n    p2 --> d1\n    d1 -->|No| e([End])\n",
        },
    ]
}
