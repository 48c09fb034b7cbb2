use std::fs;
use std::process::Command;

fn audiodiff() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_audiodiff"));
    cmd.env_remove("RUST_LOG").env("NO_COLOR", "1");
    cmd
}

#[test]
fn missing_path_prints_one_error_line() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("z")).unwrap();

    let output = audiodiff()
        .current_dir(dir.path())
        .args(["w", "z"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(2));
    assert_eq!(String::from_utf8(output.stderr).unwrap(), "audiodiff: No such file or directory: 'w'\n");
    assert!(output.stdout.is_empty());
}

#[test]
fn differing_files_exit_one() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("a.txt"), "one").unwrap();
    fs::write(dir.path().join("b.txt"), "two").unwrap();

    let output = audiodiff()
        .current_dir(dir.path())
        .args(["a.txt", "b.txt"])
        .output()
        .unwrap();

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8(output.stdout).unwrap(), "Files a.txt and b.txt differ\n");
    assert!(output.stderr.is_empty());
}
