use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn help_lists_page_script_build() {
    Command::cargo_bin("xtask")
        .expect("xtask binary")
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("web").and(predicate::str::contains("page script")));
}

#[test]
fn list_shows_workspace_crates() {
    Command::cargo_bin("xtask")
        .expect("xtask binary")
        .arg("list")
        .assert()
        .success()
        .stdout(predicate::str::contains("shop-server").and(predicate::str::contains("shop-cart")));
}

#[test]
fn unknown_command_fails() {
    Command::cargo_bin("xtask").expect("xtask binary").arg("deploy").assert().failure();
}
