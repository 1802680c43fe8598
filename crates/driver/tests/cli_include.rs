use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::fs;
use std::io::Write;
use std::process::Command;
use tempfile::tempdir;

#[test]
fn quoted_include_resolves_next_to_the_input() {
    let dir = tempdir().unwrap();
    let sub = dir.path().join("src");
    fs::create_dir_all(&sub).unwrap();
    fs::write(sub.join("defs.inc"), "#define LED P1\n").unwrap();
    let src = sub.join("main.asm");
    let mut f = fs::File::create(&src).unwrap();
    writeln!(f, "#include \"defs.inc\"").unwrap();
    writeln!(f, "SETB LED").unwrap();

    // Run from a different working directory than the input's.
    let mut cmd = Command::cargo_bin("asm51").unwrap();
    cmd.current_dir(dir.path());
    cmd.args(["preprocess", src.to_string_lossy().as_ref()]);

    cmd.assert().success().stdout(predicate::eq("SETB P1\n"));
}

#[test]
fn angled_include_uses_the_include_dir_flag() {
    let dir = tempdir().unwrap();
    let lib = dir.path().join("lib");
    fs::create_dir_all(&lib).unwrap();
    fs::write(lib.join("reg51.inc"), "ACC EQU 0e0h\n").unwrap();
    let src = dir.path().join("main.asm");
    let mut f = fs::File::create(&src).unwrap();
    writeln!(f, "#include <reg51.inc>").unwrap();
    writeln!(f, "MOV ACC, #0").unwrap();

    let mut cmd = Command::cargo_bin("asm51").unwrap();
    cmd.args([
        "preprocess",
        src.to_string_lossy().as_ref(),
        "-I",
        lib.to_string_lossy().as_ref(),
    ]);

    cmd.assert()
        .success()
        .stdout(predicate::eq("ACC EQU 0e0h\nMOV ACC, #0\n"));
}

#[test]
fn dump_includes_appends_the_registry() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("defs.inc"), "ONE EQU 1 ; doc\n").unwrap();
    let src = dir.path().join("main.asm");
    let mut f = fs::File::create(&src).unwrap();
    writeln!(f, "#include \"defs.inc\"").unwrap();
    writeln!(f, "NOP").unwrap();

    let mut cmd = Command::cargo_bin("asm51").unwrap();
    cmd.args([
        "preprocess",
        src.to_string_lossy().as_ref(),
        "--dump-includes",
    ]);

    // The registry keeps raw text (comment included), keyed by base name.
    cmd.assert().success().stdout(predicate::eq(
        "ONE EQU 1\nNOP\n--- defs ---\nONE EQU 1 ; doc\n",
    ));
}

#[test]
fn missing_include_fails_with_the_resolved_path() {
    let dir = tempdir().unwrap();
    let src = dir.path().join("main.asm");
    let mut f = fs::File::create(&src).unwrap();
    writeln!(f, "#include \"ghost.inc\"").unwrap();

    let mut cmd = Command::cargo_bin("asm51").unwrap();
    cmd.args(["preprocess", src.to_string_lossy().as_ref()]);

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("ghost.inc"));
}

#[test]
fn include_lines_renumber_with_the_flag() {
    let dir = tempdir().unwrap();
    fs::write(dir.path().join("defs.inc"), "; note\nINNER EQU 1\n").unwrap();
    let src = dir.path().join("main.asm");
    let mut f = fs::File::create(&src).unwrap();
    writeln!(f, "TOP").unwrap();
    writeln!(f, "#include \"defs.inc\"").unwrap();
    writeln!(f, "TAIL").unwrap();

    let mut cmd = Command::cargo_bin("asm51").unwrap();
    cmd.args([
        "preprocess",
        src.to_string_lossy().as_ref(),
        "--line-numbers",
    ]);

    // INNER reports its own file's numbering; TAIL keeps the outer one.
    cmd.assert().success().stdout(predicate::eq(
        "    0  TOP\n    1  INNER EQU 1\n    2  TAIL\n",
    ));
}
