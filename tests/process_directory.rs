use kebab_shop::refactor::{build_mapping, process_directory, FailureStage, RunPhase};
use kebab_shop::{ErrorCode, RenameConfig};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn read(root: &Path, relative: &str) -> String {
    fs::read_to_string(root.join(relative)).unwrap()
}

#[test]
fn renames_file_and_rewrites_static_import() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UserService.ts", "export class X {}\n");
    write(dir.path(), "index.ts", "import { X } from './UserService'\n");

    let report = process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert_eq!(report.phase, RunPhase::Done);
    assert!(!report.has_failures());
    assert!(dir.path().join("user-service.ts").exists());
    assert!(!dir.path().join("UserService.ts").exists());
    assert_eq!(read(dir.path(), "index.ts"), "import { X } from './user-service'\n");
    assert_eq!(read(dir.path(), "user-service.ts"), "export class X {}\n");
}

#[test]
fn rewrites_extension_qualified_require() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UserService.ts", "module.exports = {};\n");
    write(dir.path(), "index.ts", "const svc = require('./UserService.ts');\n");

    process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert_eq!(
        read(dir.path(), "index.ts"),
        "const svc = require('./user-service.ts');\n"
    );
}

#[test]
fn leaves_unrelated_string_literals_alone() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UserService.ts", "");
    write(
        dir.path(),
        "index.ts",
        "import svc from './UserService';\nconsole.log('UserService started from ./UserService');\n",
    );

    let report = process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert_eq!(report.total_references, 1);
    assert_eq!(
        read(dir.path(), "index.ts"),
        "import svc from './user-service';\nconsole.log('UserService started from ./UserService');\n"
    );
}

#[test]
fn collision_aborts_before_anything_changes() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UserAPI.ts", "export const a = 1;\n");
    write(dir.path(), "user-api.ts", "export const b = 2;\n");
    write(dir.path(), "index.ts", "import { a } from './UserAPI';\n");

    let err = process_directory(dir.path(), &RenameConfig::default(), false).unwrap_err();

    assert_eq!(err.code, ErrorCode::RenameNamingCollision);
    assert!(dir.path().join("UserAPI.ts").exists());
    assert_eq!(read(dir.path(), "user-api.ts"), "export const b = 2;\n");
    assert_eq!(read(dir.path(), "index.ts"), "import { a } from './UserAPI';\n");
}

#[test]
fn rename_failure_keeps_rewrites_and_reports_entry() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "OldName.ts", "export default 1;\n");
    write(dir.path(), "NavBar.tsx", "export default 2;\n");
    write(
        dir.path(),
        "index.ts",
        "import a from './OldName';\nimport b from './NavBar';\n",
    );
    // Destination occupied by a directory, which is never part of the mapping
    fs::create_dir(dir.path().join("old-name.ts")).unwrap();

    let mapping_before = build_mapping(dir.path(), &RenameConfig::default()).unwrap();
    let report = process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert_eq!(report.phase, RunPhase::Done);
    let failures: Vec<_> = report.failures_in(FailureStage::Rename).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].file, "OldName.ts");
    assert_eq!(failures[0].to.as_deref(), Some("old-name.ts"));

    // Rewrites already landed before the rename phase started.
    assert_eq!(
        read(dir.path(), "index.ts"),
        "import a from './old-name';\nimport b from './nav-bar';\n"
    );
    assert!(dir.path().join("OldName.ts").exists());
    assert!(dir.path().join("nav-bar.tsx").exists());

    let planned: Vec<_> = report
        .planned_renames
        .iter()
        .map(|r| (r.from.as_str(), r.to.as_str()))
        .collect();
    let expected: Vec<_> = mapping_before
        .iter()
        .filter(|(old, new)| old != new)
        .collect();
    assert_eq!(planned, expected);
}

#[test]
fn nested_directories_keep_their_names() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "src/Components/NavBar.tsx", "export const Nav = 1;\n");
    write(
        dir.path(),
        "src/App.tsx",
        "import { Nav } from './Components/NavBar';\n",
    );

    let report = process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert_eq!(report.total_files, 2);
    assert!(dir.path().join("src/Components/nav-bar.tsx").exists());
    assert!(dir.path().join("src/app.tsx").exists());
    assert_eq!(
        read(dir.path(), "src/app.tsx"),
        "import { Nav } from './Components/nav-bar';\n"
    );
}

#[test]
fn second_run_changes_nothing() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "UserService.ts", "");
    write(dir.path(), "MainPage.tsx", "import s from './UserService';\n");

    process_directory(dir.path(), &RenameConfig::default(), false).unwrap();
    let second = process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert!(second.planned_renames.is_empty());
    assert!(second.edits.is_empty());
    assert!(second.renamed.is_empty());
    assert_eq!(read(dir.path(), "main-page.tsx"), "import s from './user-service';\n");
}

#[test]
fn config_file_narrows_the_run() {
    let dir = TempDir::new().unwrap();
    write(
        dir.path(),
        "kebab-shop.json",
        r#"{ "extensions": [".ts"], "exclude": ["legacy/**"] }"#,
    );
    write(dir.path(), "UserService.ts", "");
    write(dir.path(), "OldWidget.js", "");
    write(dir.path(), "legacy/LegacyThing.ts", "");

    let config = RenameConfig::load(dir.path()).unwrap();
    let report = process_directory(dir.path(), &config, false).unwrap();

    assert_eq!(report.extensions, vec!["ts".to_string()]);
    assert_eq!(report.total_files, 1);
    assert!(dir.path().join("user-service.ts").exists());
    assert!(dir.path().join("OldWidget.js").exists());
    assert!(dir.path().join("legacy/LegacyThing.ts").exists());
}

#[test]
fn malformed_config_file_is_rejected() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "kebab-shop.json", "{ extensions: ");

    let err = RenameConfig::load(dir.path()).unwrap_err();

    assert_eq!(err.code, ErrorCode::ConfigInvalidJson);
}

#[test]
fn case_only_rename_never_replaces_an_excluded_file() {
    let dir = TempDir::new().unwrap();
    write(dir.path(), "Legacy.ts", "NEW\n");
    write(dir.path(), "legacy.ts", "KEEP ME\n");
    if fs::read_dir(dir.path()).unwrap().count() < 2 {
        // Case-insensitive filesystem: there is only one file.
        return;
    }
    let config = RenameConfig {
        exclude: vec!["legacy.ts".to_string()],
        ..RenameConfig::default()
    };

    let report = process_directory(dir.path(), &config, false).unwrap();

    let failures: Vec<_> = report.failures_in(FailureStage::Rename).collect();
    assert_eq!(failures.len(), 1);
    assert_eq!(failures[0].file, "Legacy.ts");
    assert!(report.renamed.is_empty());
    assert_eq!(read(dir.path(), "legacy.ts"), "KEEP ME\n");
    assert_eq!(read(dir.path(), "Legacy.ts"), "NEW\n");
}

#[cfg(target_os = "linux")]
#[test]
fn unwalkable_directory_is_reported_as_a_failure() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    let dir = TempDir::new().unwrap();
    write(dir.path(), "UserService.ts", "");
    let hidden = dir.path().join(OsStr::from_bytes(b"pages\xff"));
    fs::create_dir(&hidden).unwrap();
    fs::write(hidden.join("Home.ts"), "import s from '../UserService';\n").unwrap();

    let report = process_directory(dir.path(), &RenameConfig::default(), false).unwrap();

    assert!(report.has_failures());
    let skipped: Vec<_> = report.failures_in(FailureStage::Walk).collect();
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].file, "pages\u{FFFD}");
    assert_eq!(report.total_files, 1);
    assert!(dir.path().join("user-service.ts").exists());
}
