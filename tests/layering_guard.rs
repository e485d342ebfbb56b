//! Layering guardrails to keep the core crate pure.
//!
//! `exrun_core` holds the fixture and comparison rules and must stay free of dependencies and process handling.
//! This test scans its `Cargo.toml` and sources and fails if either creeps in.

#[test]
fn core_has_no_runtime_dependencies() {
    let manifest = include_str!("../crates/exrun_core/Cargo.toml");
    let mut in_dependencies = false;

    for raw_line in manifest.lines() {
        let line = raw_line.trim();
        // Track when we enter/exit the `[dependencies]` table.
        if line.starts_with('[') {
            in_dependencies = line == "[dependencies]";
            continue;
        }

        if !in_dependencies || line.is_empty() || line.starts_with('#') {
            continue;
        }

        panic!("`exrun_core` must not have [dependencies]; found `{}`", line);
    }
}

#[test]
fn core_does_no_process_or_file_io() {
    let sources = [
        ("lib.rs", include_str!("../crates/exrun_core/src/lib.rs")),
        ("fixtures.rs", include_str!("../crates/exrun_core/src/fixtures.rs")),
        ("compare.rs", include_str!("../crates/exrun_core/src/compare.rs")),
        ("lang.rs", include_str!("../crates/exrun_core/src/lang.rs")),
    ];

    for (name, source) in sources {
        for forbidden in ["std::process", "std::fs", "std::env"] {
            assert!(
                !source.contains(forbidden),
                "`exrun_core/src/{}` must not use `{}`",
                name,
                forbidden
            );
        }
    }
}
