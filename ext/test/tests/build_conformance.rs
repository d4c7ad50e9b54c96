//! Build conformance tests
//!
//! Runs YAML build fixtures against the reference registry: each case builds a
//! message from params or a body and compares its JSON encoding.
//!
//! Run with: cargo test -p rpcgate-test --test build_conformance --features rpcgate-test/fixtures

#![cfg(feature = "fixtures")]

use rpcgate_test::build_fixture::BuildFixture;
use std::fs;
use std::path::{Path, PathBuf};

fn fixtures_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures").join("build")
}

fn run_fixture_file(name: &str) {
    let path = fixtures_dir().join(name);
    let yaml = fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to read {}: {e}", path.display()));
    let fixtures = BuildFixture::from_yaml_multi(&yaml)
        .unwrap_or_else(|e| panic!("Failed to parse {}: {e}", path.display()));

    assert!(!fixtures.is_empty());
    for fixture in fixtures {
        println!("  Running: {}", fixture.name);
        fixture.run_and_assert();
    }
}

#[test]
fn test_build_from_params() {
    run_fixture_file("01_params.yaml");
}

#[test]
fn test_build_from_body() {
    run_fixture_file("02_body.yaml");
}
