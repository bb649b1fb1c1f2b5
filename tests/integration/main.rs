//! Integration tests for casecheck

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn casecheck(config_dir: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("casecheck");
        cmd.arg("--no-local")
            .arg("--config")
            .arg(config_dir.path().join("config.toml"))
            .env_remove("CASECHECK_CONFIG");
        cmd
    }

    /// Project tree mirroring a small bundler example
    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        let root = temp.path();
        fs::create_dir_all(root.join("Child")).unwrap();
        fs::create_dir_all(root.join("Son")).unwrap();
        fs::create_dir_all(root.join("node_modules").join("Lib")).unwrap();
        for file in [
            "index.js",
            "other.js",
            "other.css",
            "#hash.js",
            "Child/index.js",
            "Son/A.js",
            "Son/B.js",
            "node_modules/Lib/index.js",
        ] {
            fs::write(root.join(file), "").unwrap();
        }
        temp
    }

    fn arg(root: &Path, relative: &str) -> String {
        root.join(relative).to_string_lossy().into_owned()
    }

    #[test]
    fn help_displays() {
        let config = TempDir::new().unwrap();
        casecheck(&config)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("verifier"));
    }

    #[test]
    fn correct_paths_pass() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();

        casecheck(&config)
            .arg("check")
            .arg("--root")
            .arg(root)
            .arg(arg(root, "Child/index.js"))
            .arg(arg(root, "Son/A.js"))
            .arg(arg(root, "other.css?modules"))
            .assert()
            .success()
            .stdout(predicate::str::contains("All paths match"));
    }

    #[test]
    fn miscased_paths_fail_with_tagged_diagnostics() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();

        casecheck(&config)
            .arg("check")
            .arg("--root")
            .arg(root)
            .arg(arg(root, "child/index.js"))
            .arg(arg(root, "son/A.js"))
            .arg(arg(root, "Other.js"))
            .arg(arg(root, "Index.js"))
            .assert()
            .failure()
            .stdout(predicate::str::contains("[CaseSensitivePathsPlugin]"))
            .stdout(predicate::str::contains("`Child`"))
            .stdout(predicate::str::contains("`other.js`"))
            .stderr(predicate::str::contains("4 resource(s)"));
    }

    #[test]
    fn root_with_parent_dir_is_normalized() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();

        casecheck(&config)
            .current_dir(root.join("Son"))
            .arg("check")
            .arg("--root")
            .arg("..")
            .arg("../child/index.js")
            .arg("../Son/./b.js")
            .assert()
            .failure()
            .stdout(predicate::str::contains("`Child`"))
            .stdout(predicate::str::contains("`B.js`"))
            .stderr(predicate::str::contains("2 resource(s)"));
    }

    #[test]
    fn dependency_and_outside_paths_are_skipped() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();

        casecheck(&config)
            .arg("check")
            .arg("--root")
            .arg(root)
            .arg(arg(root, "node_modules/lib/index.js"))
            .assert()
            .success();

        casecheck(&config)
            .arg("check")
            .arg("--root")
            .arg(root.join("Son"))
            .arg(arg(root, "child/index.js"))
            .assert()
            .success();
    }

    #[test]
    fn json_report_lists_mismatches() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();

        casecheck(&config)
            .arg("check")
            .arg("--format")
            .arg("json")
            .arg("--root")
            .arg(root)
            .arg(arg(root, "Son/a.js"))
            .assert()
            .failure()
            .stdout(predicate::str::contains("\"expected\": \"a.js\""))
            .stdout(predicate::str::contains("\"actual\": \"A.js\""));
    }

    #[test]
    fn paths_from_stdin() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();

        casecheck(&config)
            .arg("check")
            .arg("--stdin")
            .arg("--root")
            .arg(root)
            .write_stdin(format!("{}\n\n{}\n", arg(root, "Son/B.js"), arg(root, "HASH.js")))
            .assert()
            .success();

        casecheck(&config)
            .arg("check")
            .arg("--stdin")
            .arg("--root")
            .arg(root)
            .write_stdin(format!("{}\n", arg(root, "#HASH.js")))
            .assert()
            .failure()
            .stdout(predicate::str::contains("`#hash.js`"));
    }

    #[test]
    fn project_root_from_config() {
        let config = TempDir::new().unwrap();
        let project = project();
        let root = project.path();
        fs::write(
            config.path().join("config.toml"),
            format!("[project]\nroot = {:?}\n", root.join("Son").to_string_lossy()),
        )
        .unwrap();

        // child/ lies outside the configured root, so it is not inspected
        casecheck(&config)
            .arg("check")
            .arg(arg(root, "child/index.js"))
            .assert()
            .success();
    }

    #[test]
    fn config_path() {
        let config = TempDir::new().unwrap();
        casecheck(&config)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let config = TempDir::new().unwrap();
        casecheck(&config)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[check]"))
            .stdout(predicate::str::contains("node_modules"));
    }
}
