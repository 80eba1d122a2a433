use std::io::Write;
use std::process::Command;

fn corsheaders() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_corsheaders"));
    cmd.env_remove("CORSH_CONFIG").env("CORSH_LOG_LEVEL", "error");
    cmd
}

#[test]
fn test_cli_preview_default_set() {
    let output = corsheaders().arg("preview").output().expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    let mut lines: Vec<&str> = stdout.lines().collect();
    lines.sort_unstable();
    assert_eq!(
        lines,
        vec![
            "access-control-allow-credentials: true",
            "access-control-allow-headers: Origin,Accept,Content-Type",
            "access-control-allow-methods: GET,POST,PUT,DELETE,OPTIONS,HEAD,PATCH",
            "access-control-allow-origin: *",
            "access-control-max-age: 86400",
            "x-cors-headers: Powered-by-CorsHeaders",
        ]
    );
}

#[test]
fn test_cli_check_reads_config_from_env() {
    let mut file = tempfile::Builder::new().suffix(".yaml").tempfile().unwrap();
    writeln!(file, "allowOrigin: https://example.com").unwrap();

    let output = corsheaders()
        .env("CORSH_CONFIG", file.path())
        .arg("check")
        .output()
        .expect("run cli");
    assert!(output.status.success());
    let stdout = String::from_utf8(output.stdout).unwrap();
    assert!(stdout.contains("ok (custom mode)"));
}

#[test]
fn test_cli_check_fails_on_bad_file() {
    let status = corsheaders()
        .args(["check", "--config", "/nonexistent/cors.yaml"])
        .status()
        .expect("run cli");
    assert!(!status.success());
}
