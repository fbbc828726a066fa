//! Command chains run through a `Session` against a temporary store.

mod helpers;

use std::fs;

use fakedomain::export::Snapshot;
use fakedomain::store::backup_path;
use fakedomain::{
    parse_commands, Classification, Heuristic, JsonFileStore, Session, StaticDns, StoreBackend,
};
use helpers::{args, fixture_dns, write_batch, NoWhois, RegistrantWhois, SharedBuffer};
use tempfile::TempDir;

#[tokio::test]
async fn test_load_disposable_then_classify() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let report = dir.path().join("report.json");
    let disposable = write_batch(
        dir.path(),
        "disposable.txt",
        &["# Temp Mail", "temp.io", "", "dead.com"],
    );
    let batch = write_batch(
        dir.path(),
        "batch.txt",
        &["Trash.io", "# not a domain", "burner.net", "", "gmail.com"],
    );

    let commands = parse_commands(&args(&format!(
        "load-disposable {} out {} classify {}",
        disposable,
        report.display(),
        batch
    )))
    .unwrap();
    let mut session = Session::open(&db, fixture_dns(), NoWhois).unwrap();
    session.run(&commands).await.unwrap();
    assert!(!session.is_dirty());

    // The report covers only the classified batch
    let exported: Snapshot = serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
    let names: Vec<&str> = exported.domains.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, vec!["burner.net", "gmail.com", "trash.io"]);

    let trash = &exported.domains[2];
    assert_eq!(trash.classification, Classification::Disposable);
    assert_eq!(trash.heuristic, Heuristic::Mx);
    assert_eq!(trash.service.as_deref(), Some("Temp Mail"));

    let burner = &exported.domains[0];
    assert_eq!(burner.classification, Classification::Disposable);
    assert_eq!(burner.heuristic, Heuristic::Ip);

    let gmail = &exported.domains[1];
    assert_eq!(gmail.classification, Classification::Unknown);
    assert_eq!(gmail.heuristic, Heuristic::None);

    let servers: Vec<&str> = exported.mail_servers.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(servers, vec!["mx.burner.net", "mx.gmail.com", "mx.temp.io"]);

    // The store keeps everything and the previous version as backup
    let stored = JsonFileStore::new(&db).load().unwrap();
    assert_eq!(stored.domain_count(), 5);
    let dead = stored.domain("dead.com").unwrap();
    assert_eq!(dead.classification, Classification::Dead);
    assert_eq!(dead.heuristic, Heuristic::NoFallbackMx);
    assert_eq!(dead.service, None);
    assert_eq!(
        stored.domain("temp.io").unwrap().service.as_deref(),
        Some("Temp Mail")
    );
    assert!(backup_path(&db).exists());
}

#[tokio::test]
async fn test_query_and_dump_disposables_report() {
    let dir = TempDir::new().unwrap();
    let disposable = write_batch(dir.path(), "d.txt", &["#temp", "temp.io"]);
    let report = SharedBuffer::default();

    let commands = parse_commands(&args(&format!(
        "load-disposable {} query TRASH.io dump-disposables",
        disposable
    )))
    .unwrap();
    let mut session = Session::open(dir.path().join("db.json"), fixture_dns(), NoWhois)
        .unwrap()
        .with_report(report.boxed());
    session.run(&commands).await.unwrap();

    assert_eq!(
        report.contents(),
        "trash.io: DISPOSABLE (MX) service=temp mx=[mx.temp.io]\ntemp.io\ntrash.io\n"
    );
}

#[tokio::test]
async fn test_store_is_reused_across_sessions() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let regular = write_batch(dir.path(), "r.txt", &["gmail.com"]);

    let commands = parse_commands(&args(&format!("load-regular {}", regular))).unwrap();
    Session::open(&db, fixture_dns(), NoWhois)
        .unwrap()
        .run(&commands)
        .await
        .unwrap();

    // A DNS world that knows nothing: the answer must come from the store
    let report = SharedBuffer::default();
    let commands = parse_commands(&args("query gmail.com")).unwrap();
    let mut session = Session::open(&db, StaticDns::new(), NoWhois)
        .unwrap()
        .with_report(report.boxed());
    session.run(&commands).await.unwrap();

    assert_eq!(
        report.contents(),
        "gmail.com: REGULAR (NONE) mx=[mx.gmail.com]\n"
    );
}

#[tokio::test]
async fn test_load_guesses_and_aggregates() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let disposable = write_batch(dir.path(), "d.txt", &["temp.io"]);
    let regular = write_batch(dir.path(), "r.txt", &["gmail.com"]);
    let batch = write_batch(dir.path(), "b.txt", &["mixed.org", "googlemail.com"]);

    let commands = parse_commands(&args(&format!(
        "load-disposable {} load-regular {} load {}",
        disposable, regular, batch
    )))
    .unwrap();
    let mut session = Session::open(&db, fixture_dns(), NoWhois).unwrap();
    session.run(&commands).await.unwrap();

    let store = session.store();
    assert_eq!(
        store.domain("mixed.org").unwrap().classification,
        Classification::Disposable
    );
    assert_eq!(
        store.domain("googlemail.com").unwrap().classification,
        Classification::Regular
    );
    assert_eq!(
        store.mail_server("mx.gmail.com").unwrap().classification(),
        Classification::Mixed
    );

    let stored = JsonFileStore::new(&db).load().unwrap();
    assert_eq!(stored.domain_count(), store.domain_count());
    assert_eq!(
        stored.mail_server("mx.gmail.com").unwrap().classification(),
        Classification::Mixed
    );
}

#[tokio::test]
async fn test_failed_classified_load_still_saves() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let missing = dir.path().join("missing.txt");

    let commands = parse_commands(&args(&format!(
        "query trash.io load-regular {}",
        missing.display()
    )))
    .unwrap();
    let mut session = Session::open(&db, fixture_dns(), NoWhois)
        .unwrap()
        .with_report(SharedBuffer::default().boxed());
    let result = session.run(&commands).await;

    let message = format!("{:#}", result.unwrap_err());
    assert!(message.contains("load-regular"));
    assert!(message.contains("missing.txt"));

    let stored = JsonFileStore::new(&db).load().unwrap();
    assert!(stored.contains_domain("trash.io"));
}

#[tokio::test]
async fn test_reset_with_explicit_store() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let disposable = write_batch(dir.path(), "d.txt", &["temp.io"]);

    let commands = parse_commands(&args(&format!("load-disposable {}", disposable))).unwrap();
    Session::open(&db, fixture_dns(), NoWhois)
        .unwrap()
        .run(&commands)
        .await
        .unwrap();
    assert_eq!(JsonFileStore::new(&db).load().unwrap().domain_count(), 1);

    let commands = parse_commands(&args("reset store-db")).unwrap();
    let mut session = Session::open(&db, fixture_dns(), NoWhois).unwrap();
    session.run(&commands).await.unwrap();

    assert!(!session.is_dirty());
    assert!(JsonFileStore::new(&db).load().unwrap().is_empty());
}

#[tokio::test]
async fn test_use_db_and_load_db_switch_stores() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let disposable = write_batch(dir.path(), "d.txt", &["temp.io"]);

    let commands = parse_commands(&args(&format!("load-disposable {}", disposable))).unwrap();
    Session::open(&first, fixture_dns(), NoWhois)
        .unwrap()
        .run(&commands)
        .await
        .unwrap();

    let commands =
        parse_commands(&args(&format!("use-db {} load-db", second.display()))).unwrap();
    let mut session = Session::open(&first, fixture_dns(), NoWhois).unwrap();
    assert_eq!(session.store().domain_count(), 1);
    session.run(&commands).await.unwrap();

    assert!(session.store().is_empty());
    assert_eq!(session.db_path(), second.as_path());
    assert!(!second.exists());
}

#[tokio::test]
async fn test_whois_reports_dash_when_unreachable() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), "w.txt", &["# registrars", "Example.com", ""]);
    let report = SharedBuffer::default();

    let commands = parse_commands(&args(&format!("whois {}", batch))).unwrap();
    let mut session = Session::open(dir.path().join("db.json"), fixture_dns(), NoWhois)
        .unwrap()
        .with_report(report.boxed());
    session.run(&commands).await.unwrap();

    assert_eq!(report.contents(), "example.com\t-\n");
    assert!(!dir.path().join("db.json").exists());
}

#[tokio::test]
async fn test_whois_reports_registrant_organization() {
    let dir = TempDir::new().unwrap();
    let batch = write_batch(dir.path(), "w.txt", &["laymro.com", "example.com"]);
    let report = SharedBuffer::default();

    let commands = parse_commands(&args(&format!("whois {}", batch))).unwrap();
    let mut session = Session::open(
        dir.path().join("db.json"),
        fixture_dns(),
        RegistrantWhois("PrivacyGuardian.org llc"),
    )
    .unwrap()
    .with_report(report.boxed());
    session.run(&commands).await.unwrap();

    assert_eq!(
        report.contents(),
        "laymro.com\tPrivacyGuardian.org llc\nexample.com\tPrivacyGuardian.org llc\n"
    );
}

#[tokio::test]
async fn test_use_db_saves_pending_changes_to_previous_store() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");
    let disposable = write_batch(dir.path(), "d.txt", &["temp.io", "trash.io"]);

    let commands = parse_commands(&args(&format!("load-disposable {}", disposable))).unwrap();
    Session::open(&second, fixture_dns(), NoWhois)
        .unwrap()
        .run(&commands)
        .await
        .unwrap();

    let report = SharedBuffer::default();
    let commands =
        parse_commands(&args(&format!("query gmail.com use-db {}", second.display()))).unwrap();
    let mut session = Session::open(&first, fixture_dns(), NoWhois)
        .unwrap()
        .with_report(report.boxed());
    session.run(&commands).await.unwrap();

    assert!(!session.is_dirty());
    assert_eq!(session.db_path(), second.as_path());

    let first_store = JsonFileStore::new(&first).load().unwrap();
    assert_eq!(first_store.domain_count(), 1);
    assert!(first_store.contains_domain("gmail.com"));

    let second_store = JsonFileStore::new(&second).load().unwrap();
    assert_eq!(second_store.domain_count(), 2);
    assert!(second_store.contains_domain("temp.io"));
    assert!(second_store.contains_domain("trash.io"));
    assert!(!second_store.contains_domain("gmail.com"));
}

#[tokio::test]
async fn test_use_db_with_clean_store_writes_nothing() {
    let dir = TempDir::new().unwrap();
    let first = dir.path().join("first.json");
    let second = dir.path().join("second.json");

    let commands = parse_commands(&args(&format!("use-db {}", second.display()))).unwrap();
    let mut session = Session::open(&first, fixture_dns(), NoWhois).unwrap();
    session.run(&commands).await.unwrap();

    assert!(!first.exists());
    assert!(!second.exists());
}

#[tokio::test]
async fn test_query_skips_blank_domain() {
    let dir = TempDir::new().unwrap();
    let db = dir.path().join("db.json");
    let report = SharedBuffer::default();

    let commands = parse_commands(&["query".to_string(), "   ".to_string()]).unwrap();
    let mut session = Session::open(&db, fixture_dns(), NoWhois)
        .unwrap()
        .with_report(report.boxed());
    session.run(&commands).await.unwrap();

    assert!(session.store().is_empty());
    assert!(!session.is_dirty());
    assert_eq!(report.contents(), "");
    assert!(!db.exists());
}
