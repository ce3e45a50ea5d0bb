//! Hygiene: source-level budgets for panicking and error-swallowing patterns.
//!
//! The engine promises never to crash its host over bad input, so the
//! production sources under `src/` carry zero panicking calls. Each budget is
//! a ceiling that only ever moves down.
#![allow(clippy::absurd_extreme_comparisons)]

use std::fs;
use std::path::{Path, PathBuf};

struct Budget {
    label: &'static str,
    pattern: &'static str,
    max: usize,
}

// Panics: these crash the host.
const UNWRAP: Budget = Budget { label: ".unwrap()", pattern: ".unwrap()", max: 0 };
const EXPECT: Budget = Budget { label: ".expect()", pattern: ".expect(", max: 0 };
const PANIC: Budget = Budget { label: "panic!()", pattern: "panic!(", max: 0 };
const UNREACHABLE: Budget = Budget { label: "unreachable!()", pattern: "unreachable!(", max: 0 };
const TODO: Budget = Budget { label: "todo!()", pattern: "todo!(", max: 0 };
const UNIMPLEMENTED: Budget = Budget { label: "unimplemented!()", pattern: "unimplemented!(", max: 0 };

// Silent loss: results dropped without inspection.
const SILENT_DISCARD: Budget = Budget { label: "let _ =", pattern: "let _ =", max: 0 };
const DOT_OK: Budget = Budget { label: ".ok()", pattern: ".ok()", max: 0 };

// Structure.
const ALLOW_DEAD_CODE: Budget = Budget { label: "#[allow(dead_code)]", pattern: "#[allow(dead_code)]", max: 0 };

/// Production sources: every `.rs` under `src/` except `_test.rs` files.
fn production_sources() -> Vec<(PathBuf, String)> {
    let mut out = Vec::new();
    walk(&Path::new(env!("CARGO_MANIFEST_DIR")).join("src"), &mut out);
    out
}

fn walk(dir: &Path, out: &mut Vec<(PathBuf, String)>) {
    let Ok(entries) = fs::read_dir(dir) else {
        return;
    };
    for entry in entries.flatten() {
        let path = entry.path();
        if path.is_dir() {
            walk(&path, out);
            continue;
        }
        let is_rs = path.extension().is_some_and(|e| e == "rs");
        let is_test = path.to_string_lossy().ends_with("_test.rs");
        if !is_rs || is_test {
            continue;
        }
        if let Ok(content) = fs::read_to_string(&path) {
            out.push((path, content));
        }
    }
}

fn check(budget: &Budget) {
    let hits: Vec<(String, usize)> = production_sources()
        .into_iter()
        .filter_map(|(path, content)| {
            let count = content.lines().filter(|line| line.contains(budget.pattern)).count();
            (count > 0).then(|| (path.display().to_string(), count))
        })
        .collect();
    let found: usize = hits.iter().map(|(_, c)| c).sum();
    let report = hits.iter().map(|(p, c)| format!("  {p}: {c}")).collect::<Vec<_>>().join("\n");
    assert!(
        found <= budget.max,
        "{} budget exceeded: found {found}, max {}.\n{report}",
        budget.label,
        budget.max
    );
}

#[test]
fn sources_are_found() {
    assert!(!production_sources().is_empty());
}

#[test]
fn unwrap_budget() {
    check(&UNWRAP);
}

#[test]
fn expect_budget() {
    check(&EXPECT);
}

#[test]
fn panic_budget() {
    check(&PANIC);
}

#[test]
fn unreachable_budget() {
    check(&UNREACHABLE);
}

#[test]
fn todo_budget() {
    check(&TODO);
}

#[test]
fn unimplemented_budget() {
    check(&UNIMPLEMENTED);
}

#[test]
fn silent_discard_budget() {
    check(&SILENT_DISCARD);
}

#[test]
fn dot_ok_budget() {
    check(&DOT_OK);
}

#[test]
fn allow_dead_code_budget() {
    check(&ALLOW_DEAD_CODE);
}
