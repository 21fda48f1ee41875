//! CLI integration tests for docrecall commands.
//!
//! These tests focus on exit codes and envelope structure, not exact score
//! values, which depend on the corpus.

// Integration tests live outside cfg(test) by design
#![allow(clippy::tests_outside_test_module)]

use std::{fs, path::Path};

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to create a temp directory for tests.
fn temp_dir() -> tempfile::TempDir {
    tempfile::tempdir().unwrap()
}

/// Helper to get a docrecall command.
fn docrecall() -> Command {
    #[allow(deprecated)]
    Command::cargo_bin("docrecall").unwrap()
}

/// Writes one page with a TOC and a content file.
fn make_page(base: &Path, set: &str, page: &str, toc: &str, content: &str) {
    let dir = base.join(set).join(page);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("docTOC.md"), toc).unwrap();
    fs::write(dir.join("docContent.md"), content).unwrap();
}

mod search {
    use super::*;

    #[test]
    fn json_envelope_on_match() {
        let dir = temp_dir();
        make_page(
            dir.path(),
            "docs",
            "Install",
            "# Install\n## Install Guide\n## Unrelated Topic\n",
            "# Install\nsteps\n",
        );

        let output = docrecall()
            .args(["search", "install", "--doc-sets", "docs", "--json"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["toc_fallback"], false);
        assert_eq!(value["grep_fallback"], false);
        assert_eq!(value["query"][0], "install");
        assert_eq!(value["doc_sets_found"][0], "docs");

        let page = &value["results"][0];
        assert_eq!(page["doc_set"], "docs");
        assert_eq!(page["page_title"], "Install");
        let heading = &page["headings"][0];
        assert!(heading["bm25_sim"].as_f64().unwrap() > 0.0);
        assert!(heading["rerank_sim"].is_null());
    }

    #[test]
    fn no_match_is_success_with_empty_results() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        let output = docrecall()
            .args(["search", "anything", "--doc-sets", "docs", "--json"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["success"], true);
        assert_eq!(value["results"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn text_mode_renders_no_match_block() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        docrecall()
            .args(["search", "anything", "--doc-sets", "docs"])
            .arg("--base-dir")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("query: anything"))
            .stdout(predicate::str::contains("no matches"));
    }

    #[test]
    fn out_of_range_k1_is_rejected() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        docrecall()
            .args(["search", "q", "--doc-sets", "docs", "--k1", "6.0"])
            .arg("--base-dir")
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("k1"));
    }

    #[test]
    fn missing_base_dir_is_rejected() {
        docrecall()
            .args(["search", "q", "--doc-sets", "docs"])
            .args(["--base-dir", "/no/such/dir"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn doc_sets_flag_is_required() {
        docrecall().args(["search", "q"]).assert().failure();
    }

    #[test]
    fn fallback_flags_reported() {
        let dir = temp_dir();
        make_page(
            dir.path(),
            "docs",
            "Setup",
            "## Setup Walkthrough\n",
            "## Setup Walkthrough\ndetails\n",
        );

        // "walk" matches the TOC scan but no BM25 token
        let output = docrecall()
            .args(["search", "walk", "--doc-sets", "docs", "--json"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["toc_fallback"], true);
        assert_eq!(value["results"][0]["headings"][0]["source"], "anchor");
    }

    #[test]
    fn no_fallback_flag_disables_escalation() {
        let dir = temp_dir();
        make_page(dir.path(), "docs", "Setup", "## Setup Walkthrough\n", "x\n");

        let output = docrecall()
            .args(["search", "walk", "--doc-sets", "docs", "--json", "--no-fallback"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["toc_fallback"], false);
        assert_eq!(value["results"].as_array().unwrap().len(), 0);
    }

    #[test]
    fn rerank_params_echoed_when_given() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        let output = docrecall()
            .args(["search", "q", "--doc-sets", "docs", "--json"])
            .args(["--rerank-threshold", "0.7", "--rerank-top-k", "8"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        let params = &value["rerank_params"];
        assert_eq!(params["threshold"], 0.7);
        assert_eq!(params["top_k"], 8);

        // Without rerank flags the echo is omitted
        let output = docrecall()
            .args(["search", "q", "--doc-sets", "docs", "--json"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert!(value.get("rerank_params").is_none());
    }

    #[test]
    fn config_file_supplies_defaults_and_cli_overrides() {
        let dir = temp_dir();
        make_page(
            dir.path(),
            "docs",
            "Install",
            "# Install\n## Install Guide\n",
            "x\n",
        );
        // File pushes the heading threshold above any attainable score
        fs::write(
            dir.path().join("docrecall.toml"),
            "threshold_headings = 0.99\n",
        )
        .unwrap();

        let output = docrecall()
            .args(["search", "install", "--doc-sets", "docs", "--json", "--no-fallback"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["results"].as_array().unwrap().len(), 0);

        // CLI flag wins over the file value
        let output = docrecall()
            .args(["search", "install", "--doc-sets", "docs", "--json", "--no-fallback"])
            .args(["--threshold-headings", "0.1"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert!(!value["results"].as_array().unwrap().is_empty());
    }

    #[test]
    fn malformed_config_file_is_rejected() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docrecall.toml"), "not valid toml [[[").unwrap();

        docrecall()
            .args(["search", "q", "--doc-sets", "docs"])
            .arg("--base-dir")
            .arg(dir.path())
            .assert()
            .failure()
            .stderr(predicate::str::contains("error:"));
    }

    #[test]
    fn grep_fallback_attaches_context() {
        let dir = temp_dir();
        make_page(
            dir.path(),
            "docs",
            "Approvals",
            "## Flows\n",
            "## Flows\nthe approval process takes a day\n",
        );

        let output = docrecall()
            .args(["search", "zzz", "--doc-sets", "docs", "--json"])
            .args(["--domain-noun", "approval"])
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value["grep_fallback"], true);
        let heading = &value["results"][0]["headings"][0];
        assert_eq!(heading["source"], "grep");
        assert!(
            heading["related_context"]
                .as_str()
                .unwrap()
                .contains("approval process")
        );
    }
}

mod sets {
    use super::*;

    #[test]
    fn lists_doc_set_names() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("beta")).unwrap();
        fs::create_dir_all(dir.path().join("alpha")).unwrap();

        docrecall()
            .arg("sets")
            .arg("--base-dir")
            .arg(dir.path())
            .assert()
            .success()
            .stdout(predicate::str::contains("alpha\nbeta"));
    }

    #[test]
    fn json_mode_outputs_array() {
        let dir = temp_dir();
        fs::create_dir_all(dir.path().join("docs")).unwrap();

        let output = docrecall()
            .arg("sets")
            .arg("--json")
            .arg("--base-dir")
            .arg(dir.path())
            .output()
            .unwrap();
        assert!(output.status.success());

        let value: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
        assert_eq!(value.as_array().unwrap().len(), 1);
        assert_eq!(value[0], "docs");
    }

    #[test]
    fn missing_base_dir_fails() {
        docrecall()
            .arg("sets")
            .args(["--base-dir", "/no/such/dir"])
            .assert()
            .failure();
    }
}
