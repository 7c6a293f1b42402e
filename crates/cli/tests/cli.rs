use assert_cmd::Command;

#[test]
fn help_exits_cleanly() {
    let mut cmd = Command::cargo_bin("catalog-cli").expect("binary builds");
    cmd.arg("--help").assert().success();
}

#[test]
fn version_exits_cleanly() {
    let mut cmd = Command::cargo_bin("catalog-cli").expect("binary builds");
    cmd.arg("--version").assert().success();
}
