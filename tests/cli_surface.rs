use std::process::Command;

fn run(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_telefwd"))
        .args(args)
        .output()
        .expect("failed to spawn telefwd binary")
}

#[test]
fn version_prints_the_package_version() {
    let out = run(&["version"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains(env!("CARGO_PKG_VERSION")), "got: {stdout}");
}

#[test]
fn help_lists_the_serve_command() {
    let out = run(&["help"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("serve"), "got: {stdout}");
}

#[test]
fn unknown_command_still_exits_cleanly_with_help() {
    let out = run(&["bogus"]);
    assert!(out.status.success());
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("Usage"), "got: {stdout}");
}
