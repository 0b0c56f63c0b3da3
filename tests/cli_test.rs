use assert_cmd::Command;
use predicates as pred;

fn sharekhata() -> Command {
    let exe = env!("CARGO_BIN_EXE_sharekhata");
    let mut cmd = Command::new(exe);
    // Keep ambient configuration out of the test run.
    cmd.env_remove("SHAREKHATA_API_URL")
        .env_remove("SHAREKHATA_MOBILE")
        .env_remove("SHAREKHATA_TOKEN");
    cmd
}

#[test]
fn missing_mobile_is_a_usage_error() {
    sharekhata()
        .assert()
        .failure()
        .stderr(pred::str::contains("--mobile"));
}

#[test]
fn malformed_mobile_is_rejected() {
    sharekhata()
        .arg("--mobile")
        .arg("12345")
        .assert()
        .failure()
        .stderr(pred::str::contains("Invalid mobile number"));
}

#[test]
fn unreachable_server_reports_fetch_error() {
    sharekhata()
        .arg("--mobile")
        .arg("9876543210")
        .arg("--base-url")
        .arg("http://127.0.0.1:9")
        .assert()
        .failure()
        .stderr(pred::str::contains("Error fetching ledgers"));
}
