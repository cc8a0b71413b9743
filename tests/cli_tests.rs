use assert_cmd::Command;
use predicates::prelude::*;
use std::{fs::File, io::Write, path::Path};
use tempfile::TempDir;
use zip::write::SimpleFileOptions;

fn write_jar(path: &Path, manifest: &str) {
    let mut zip = zip::ZipWriter::new(File::create(path).expect("create jar"));
    let options = SimpleFileOptions::default().compression_method(zip::CompressionMethod::Stored);
    zip.start_file("META-INF/MANIFEST.MF", options).expect("start");
    zip.write_all(manifest.as_bytes()).expect("write");
    zip.finish().expect("finish");
}

/// A jar2app invocation inside `work` with `java_home` as JAVA_HOME.
fn jar2app(work: &TempDir, java_home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("jar2app").expect("binary");
    cmd.current_dir(work.path())
        .env("JAVA_HOME", java_home.path())
        .env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_calculator_end_to_end() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");
    write_jar(&work.path().join("Calculator.jar"), "Main-Class: com.example.Calc\n");

    jar2app(&work, &java_home)
        .args(["-jar", "Calculator.jar"])
        .assert()
        .success()
        .stdout(predicate::str::contains("com.example.Calc"))
        .stdout(predicate::str::contains("build app Calculator.app successful!"));

    let contents = work.path().join("Calculator.app/Contents");
    for dir in ["MacOS", "Resources", "Java"] {
        assert!(contents.join(dir).is_dir(), "{dir} missing");
    }
    assert_eq!(
        std::fs::read(contents.join("Java/Calculator.jar")).expect("copy"),
        std::fs::read(work.path().join("Calculator.jar")).expect("jar")
    );
    let plist = std::fs::read_to_string(contents.join("Info.plist")).expect("plist");
    assert!(plist.contains("com.example.Calc"));
    assert!(plist.contains("app.virts"));
    assert!(plist.contains("Copyright 2025 virts"));
    assert!(plist.contains("1.0.0"));
}

#[test]
fn test_double_dash_spelling_and_out_dir() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");
    write_jar(&work.path().join("Calculator.jar"), "Main-Class: com.example.Calc\n");

    jar2app(&work, &java_home)
        .args(["--jar", "Calculator.jar", "--name", "Calc", "--out-dir", "dist"])
        .assert()
        .success();

    assert!(work.path().join("dist/Calc.app/Contents/Info.plist").is_file());
}

#[test]
fn test_nonexistent_archive_exits_1() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");

    jar2app(&work, &java_home)
        .args(["-jar", "Nope.jar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("invalid input"));

    assert!(!work.path().join("Nope.app").exists());
}

#[test]
fn test_missing_main_class_exits_1_before_layout() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");
    write_jar(&work.path().join("Lib.jar"), "Manifest-Version: 1.0\n");

    jar2app(&work, &java_home)
        .args(["-jar", "Lib.jar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Main-Class"));

    assert!(!work.path().join("Lib.app").exists());
}

#[test]
fn test_unresolvable_java_home_exits_1() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");
    write_jar(&work.path().join("Calculator.jar"), "Main-Class: com.example.Calc\n");

    jar2app(&work, &java_home)
        .env("JAVA_HOME", work.path().join("no-such-jdk"))
        .args(["-jar", "Calculator.jar"])
        .assert()
        .code(1)
        .stderr(predicate::str::contains("environment unresolved"));

    assert!(!work.path().join("Calculator.app").exists());
}

#[test]
fn test_bad_icon_warns_and_continues() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");
    write_jar(&work.path().join("Calculator.jar"), "Main-Class: com.example.Calc\n");

    jar2app(&work, &java_home)
        .args(["-jar", "Calculator.jar", "-icon", "missing.icns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("use default icon"));

    let resources = work.path().join("Calculator.app/Contents/Resources");
    assert_eq!(std::fs::read_dir(resources).expect("resources").count(), 0);
}

#[test]
fn test_dry_run_prints_json_and_writes_nothing() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");
    write_jar(&work.path().join("Calculator.jar"), "Main-Class: com.example.Calc\n");

    let output = jar2app(&work, &java_home)
        .args(["-jar", "Calculator.jar", "--dry-run"])
        .output()
        .expect("run");
    assert!(output.status.success());

    let descriptor: serde_json::Value = serde_json::from_slice(&output.stdout).expect("json");
    assert_eq!(descriptor["entry_class"], "com.example.Calc");
    assert_eq!(descriptor["app_name"], "Calculator");
    assert_eq!(descriptor["icon"]["kind"], "default");
    assert!(!work.path().join("Calculator.app").exists());
}

#[test]
fn test_unknown_flag_exits_1() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");

    jar2app(&work, &java_home)
        .args(["-bogus"])
        .assert()
        .code(1);
}

#[test]
fn test_help_exits_0() {
    let work = TempDir::new().expect("work dir");
    let java_home = TempDir::new().expect("java home");

    jar2app(&work, &java_home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("-jar").or(predicate::str::contains("--jar")));
}
