//! Integration tests for static-finders

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    fn static_finders(project: &Path) -> Command {
        let mut cmd = cargo_bin_cmd!("static-finders");
        cmd.current_dir(project)
            .env_remove("STATIC_FINDERS_CONFIG")
            .env_remove("RUST_LOG");
        cmd
    }

    /// Project with one static dir, one app and the given finders
    fn project(finders: &str, extra: &str) -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("assets/css")).unwrap();
        fs::create_dir_all(dir.path().join("blog/static/blog")).unwrap();
        fs::write(dir.path().join("assets/css/site.css"), "body {}").unwrap();
        fs::write(dir.path().join("blog/static/blog/post.txt"), "post").unwrap();
        fs::write(
            dir.path().join("static-finders.toml"),
            format!(
                r#"
[staticfiles]
finders = {finders}
apps = ["blog"]

[[staticfiles.dirs]]
path = "assets"

{extra}
"#
            ),
        )
        .unwrap();
        dir
    }

    #[test]
    fn help_displays() {
        let dir = TempDir::new().unwrap();
        static_finders(dir.path())
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("fetch vendored files"));
    }

    #[test]
    fn version_displays() {
        let dir = TempDir::new().unwrap();
        static_finders(dir.path())
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("static-finders"));
    }

    #[test]
    fn config_show() {
        let dir = TempDir::new().unwrap();
        static_finders(dir.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[general]"))
            .stdout(predicate::str::contains("static-finders-cache"));
    }

    #[test]
    fn config_path_uses_local_file() {
        let dir = project(r#"["filesystem"]"#, "");
        let nested = dir.path().join("assets/css");
        static_finders(&nested)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("static-finders.toml"));
    }

    #[test]
    fn config_init_writes_file() {
        let dir = TempDir::new().unwrap();
        static_finders(dir.path())
            .args(["config", "init"])
            .assert()
            .success();
        let written = fs::read_to_string(dir.path().join("static-finders.toml")).unwrap();
        assert!(written.contains("[staticfiles]"));
    }

    #[test]
    fn find_reports_location() {
        let dir = project(r#"["filesystem", "app_directories"]"#, "");
        static_finders(dir.path())
            .args(["find", "css/site.css", "blog/post.txt"])
            .assert()
            .success()
            .stdout(predicate::str::contains("site.css"))
            .stdout(predicate::str::contains("post.txt"));
    }

    #[test]
    fn find_missing_path_warns() {
        let dir = project(r#"["filesystem"]"#, "");
        static_finders(dir.path())
            .args(["find", "nope.js"])
            .assert()
            .success()
            .stdout(predicate::str::contains("No matching file found"));
    }

    #[test]
    fn list_plain() {
        let dir = project(r#"["filesystem", "app_directories"]"#, "");
        static_finders(dir.path())
            .args(["list", "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("css/site.css"))
            .stdout(predicate::str::contains("blog/post.txt"));
    }

    #[test]
    fn collect_copies_into_static_root() {
        let dir = project(r#"["filesystem", "app_directories"]"#, "");
        static_finders(dir.path()).arg("collect").assert().success();

        let root = dir.path().join("collected");
        assert_eq!(fs::read_to_string(root.join("css/site.css")).unwrap(), "body {}");
        assert_eq!(fs::read_to_string(root.join("blog/post.txt")).unwrap(), "post");
    }

    #[cfg(unix)]
    #[test]
    fn collect_compiles_matching_sources() {
        let dir = project(
            r#"["compiled", "filesystem", "app_directories"]"#,
            r#"
[static_finders.compile_map]
"*.css" = "sh -c 'tr a-z A-Z < \"$0\" > \"$1\"' {in_file} {out_file}"
"#,
        );
        static_finders(dir.path()).arg("collect").assert().success();

        let cached = dir.path().join("static-finders-cache/css/site.css");
        assert_eq!(fs::read_to_string(cached).unwrap(), "BODY {}");
        let collected = dir.path().join("collected/css/site.css");
        assert_eq!(fs::read_to_string(collected).unwrap(), "BODY {}");
        let untouched = dir.path().join("collected/blog/post.txt");
        assert_eq!(fs::read_to_string(untouched).unwrap(), "post");
    }

    #[cfg(unix)]
    #[test]
    fn collect_fails_on_compile_error() {
        let dir = project(
            r#"["compiled", "filesystem", "app_directories"]"#,
            r#"
[static_finders.compile_map]
"*.css" = "sh -c 'echo bad css >&2; exit 1'"
"#,
        );
        static_finders(dir.path())
            .arg("collect")
            .assert()
            .failure()
            .stderr(predicate::str::contains("Compile command failed"))
            .stderr(predicate::str::contains("bad css"));
    }

    #[test]
    fn vendor_without_map_fails_fast() {
        let dir = project(r#"["vendor"]"#, "");
        static_finders(dir.path())
            .args(["find", "jquery.js"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Missing required setting"));
    }

    #[test]
    fn unknown_finder_fails() {
        let dir = project(r#"["filesystem", "s3"]"#, "");
        static_finders(dir.path())
            .args(["list"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown finder: s3"));
    }

    #[test]
    fn cache_clear_removes_directory() {
        let dir = project(r#"["filesystem"]"#, "");
        let cache = dir.path().join("static-finders-cache/lib");
        fs::create_dir_all(&cache).unwrap();
        fs::write(cache.join("a.js"), "a").unwrap();

        static_finders(dir.path())
            .args(["cache", "clear", "--yes"])
            .assert()
            .success();
        assert!(!dir.path().join("static-finders-cache").exists());
    }
}
