use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn timberbook(home: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("timberbook").unwrap();
    cmd.env("HOME", home.path()).env_remove("RUST_LOG");
    cmd
}

#[test]
fn help_lists_subcommands() {
    let home = TempDir::new().unwrap();
    timberbook(&home)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("accounts"))
        .stdout(predicate::str::contains("dealers"))
        .stdout(predicate::str::contains("transactions"));
}

#[test]
fn init_writes_settings() {
    let home = TempDir::new().unwrap();
    timberbook(&home)
        .args(["init", "--api-base", "http://books.local:9000/", "--locale", "en-IN"])
        .assert()
        .success();
    let path = home.path().join(".config/timberbook/settings.json");
    let content = std::fs::read_to_string(path).unwrap();
    assert!(content.contains("\"api_base\": \"http://books.local:9000\""));
    assert!(content.contains("\"locale\": \"en-IN\""));
}

#[test]
fn accounts_list_formats_balances() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/api/accounts")
        .with_status(200)
        .with_body(r#"[{"name":"Cash","balance":1500},{"name":"Bank","balance":125000.5}]"#)
        .create();
    timberbook(&home)
        .args(["--api", &server.url(), "accounts", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Cash"))
        .stdout(predicate::str::contains("1,500 BDT"))
        .stdout(predicate::str::contains("125,000.5 BDT"));
}

#[test]
fn transactions_add_posts_total() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let post = server
        .mock("POST", "/api/transactions")
        .match_body(mockito::Matcher::PartialJson(serde_json::json!({
            "challan": "C-9",
            "wood_type": "Rendi",
            "total_amount": 2500,
            "date": "2025-01-03"
        })))
        .with_status(201)
        .with_body("{}")
        .create();
    timberbook(&home)
        .args([
            "--api",
            &server.url(),
            "transactions",
            "add",
            "--challan",
            "C-9",
            "--wood",
            "rendi",
            "--kg",
            "10",
            "--buy-rate",
            "200",
            "--sell-rate",
            "250",
            "--date",
            "2025-01-03",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("2,500 BDT"));
    post.assert();
}

#[test]
fn server_error_exits_nonzero() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    server.mock("GET", "/api/dealers").with_status(500).create();
    timberbook(&home)
        .args(["--api", &server.url(), "dealers", "list"])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: HTTP 500"));
}

#[test]
fn oversized_challan_total_is_an_error() {
    let home = TempDir::new().unwrap();
    let mut server = mockito::Server::new();
    let post = server.mock("POST", "/api/transactions").expect(0).create();
    timberbook(&home)
        .args([
            "--api",
            &server.url(),
            "transactions",
            "add",
            "--challan",
            "C-10",
            "--wood",
            "Chamble",
            "--kg",
            "99999999999999999999",
            "--sell-rate",
            "99999999999999999999",
        ])
        .assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("Error: Amount out of range"));
    post.assert();
}
