use std::fs;
use std::path::Path;

use bigdecimal::BigDecimal;
use chrono::{Datelike, Utc};
use rand::{SeedableRng, rngs::StdRng};
use serde_json::{Value, json};

use chip_ledger::{
    common::{chips::Chips, error::LedgerError, event::LedgerEvent},
    domain::transaction::TxType,
    io::api::Api,
    store::{Collection, JsonFileStore, LedgerStore, MemoryStore},
    worker::{
        processor::{Outcome, Processor},
        queries, ranking, stats,
    },
};

fn processor() -> Processor<StdRng> {
    Processor::with_rng(StdRng::seed_from_u64(2024))
}

fn create<S: LedgerStore>(store: &S, id: Option<&str>, balance: i64) -> String {
    let event = LedgerEvent::CreateAccount {
        id: id.map(str::to_string),
        balance: Some(BigDecimal::from(balance)),
    };
    match processor().process(store, event).expect("account creation failed") {
        Outcome::Created(account) => account.id,
        other => panic!("unexpected outcome: {other:?}"),
    }
}

fn apply<S: LedgerStore>(
    store: &S,
    id: &str,
    amount: i64,
    tx_type: TxType,
) -> Result<Chips, LedgerError> {
    let event = LedgerEvent::Transaction {
        id: id.to_string(),
        amount: Some(BigDecimal::from(amount)),
        tx_type,
        games: String::new(),
        dealer: String::new(),
    };
    match processor().process(store, event)? {
        Outcome::Applied { balance } => Ok(balance),
        other => panic!("unexpected outcome: {other:?}"),
    }
}

fn assert_ranking_non_increasing<S: LedgerStore>(store: &S) {
    let ranking = queries::ranking(store);
    assert!(
        ranking.windows(2).all(|w| w[0].balance >= w[1].balance),
        "ranking out of order: {ranking:?}"
    );
}

fn copy_fixtures(dir: &Path) {
    fs::copy("tests/fixtures/legacy_users.json", dir.join("users.json")).unwrap();
    fs::copy("tests/fixtures/legacy_history.json", dir.join("history.json")).unwrap();
}

#[test]
fn generated_account_scenario() {
    let store = MemoryStore::new();

    let id = create(&store, None, 500);

    let suffix = id
        .strip_prefix(&format!("CC-{}-", Utc::now().year()))
        .expect("id carries the current year");
    assert_eq!(suffix.len(), 6);
    assert!(suffix.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));

    assert_eq!(queries::balance(&store, &id).unwrap().balance, Chips::new(500));

    let history = queries::history(&store);
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].tx_type, TxType::Generate);
    assert_eq!(history[0].amount, Chips::new(500));
}

#[test]
fn two_adds_record_running_balances() {
    let store = MemoryStore::new();
    let id = create(&store, Some("A"), 0);

    apply(&store, &id, 100, TxType::Add).unwrap();
    let balance = apply(&store, &id, 100, TxType::Add).unwrap();

    assert_eq!(balance, Chips::new(200));
    let adds: Vec<i64> = queries::history(&store)
        .iter()
        .filter(|t| t.tx_type == TxType::Add)
        .map(|t| t.balance.as_i64())
        .collect();
    // Newest first.
    assert_eq!(adds, vec![200, 100]);
}

#[test]
fn subtract_below_zero_is_allowed() {
    let store = MemoryStore::new();
    let id = create(&store, Some("A"), 50);

    assert_eq!(apply(&store, &id, 100, TxType::Subtract).unwrap(), Chips::new(-50));
    assert_ranking_non_increasing(&store);
}

#[test]
fn add_then_subtract_round_trips_for_many_amounts() {
    let store = MemoryStore::new();
    let id = create(&store, Some("A"), 123);

    for n in [1, 7, 100, 9_999, 1_000_000] {
        apply(&store, &id, n, TxType::Add).unwrap();
        apply(&store, &id, n, TxType::Subtract).unwrap();
        assert_eq!(queries::balance(&store, &id).unwrap().balance, Chips::new(123));
    }
}

#[test]
fn rejected_amounts_leave_no_trace() {
    let store = MemoryStore::new();
    let id = create(&store, Some("A"), 10);
    let history_before = store.raw(Collection::Transactions);

    for amount in [0, -1, -100] {
        let err = apply(&store, &id, amount, TxType::Subtract).unwrap_err();
        assert!(matches!(err, LedgerError::InvalidRequest(_)));
    }

    assert_eq!(store.raw(Collection::Transactions), history_before);
    assert_eq!(queries::balance(&store, &id).unwrap().balance, Chips::new(10));
}

#[test]
fn ranking_tracks_every_mutation() {
    let store = MemoryStore::new();
    let a = create(&store, Some("A"), 100);
    let b = create(&store, Some("B"), 100);
    let c = create(&store, Some("C"), 50);
    assert_ranking_non_increasing(&store);

    apply(&store, &c, 100, TxType::Add).unwrap();
    apply(&store, &a, 30, TxType::Subtract).unwrap();
    assert_ranking_non_increasing(&store);

    let ids: Vec<String> = queries::ranking(&store).into_iter().map(|r| r.id).collect();
    assert_eq!(ids, vec![c, b, a]);

    // Rebuilding again changes nothing.
    let stored = store.raw(Collection::Ranking);
    ranking::rebuild(&store).unwrap();
    assert_eq!(store.raw(Collection::Ranking), stored);
}

#[test]
fn legacy_data_directory_is_readable_and_extended() {
    let dir = tempfile::tempdir().unwrap();
    copy_fixtures(dir.path());
    let store = JsonFileStore::new(dir.path());

    let s = stats::compute(&store).unwrap();
    assert_eq!(s.active_ids, 4);
    assert_eq!(s.total_balance, 2700);
    assert_eq!(s.total_transactions, 3);

    apply(&store, "table-3", 1000, TxType::Add).unwrap();

    // Equal balances keep file order; the null balance ranks as zero.
    let ranking: Vec<(String, i64)> = queries::ranking(&store)
        .into_iter()
        .map(|r| (r.id, r.balance.as_i64()))
        .collect();
    assert_eq!(
        ranking,
        vec![
            ("table-3".to_string(), 1300),
            ("CC-2024-K3J9QX".to_string(), 1200),
            ("CC-2024-ZZ01AB".to_string(), 1200),
            ("CC-2024-B0RK3N".to_string(), 0),
        ]
    );

    let history = queries::history(&store);
    assert_eq!(history.len(), 4);
    assert_eq!(history[0].id, "table-3");
    assert_eq!(history[0].balance, Chips::new(1300));
    // A numeric `games` written by an older client is kept, not dropped.
    assert_eq!(history[2].games, "3");
    assert_eq!(history[2].dealer, "");
}

#[test]
fn files_are_pretty_printed_json_arrays() {
    let dir = tempfile::tempdir().unwrap();
    let store = JsonFileStore::new(dir.path());
    create(&store, Some("A"), 5);

    for collection in Collection::ALL {
        let text = fs::read_to_string(store.path_of(collection)).unwrap();
        let value: Value = serde_json::from_str(&text).unwrap();
        assert!(value.is_array(), "{collection} is not an array");
        assert!(text.contains("\n  "), "{collection} is not indented");
    }
}

#[test]
fn corrupt_accounts_file_reads_as_empty_but_stats_fail() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("users.json"), "[{\"id\": \"A\",").unwrap();
    let store = JsonFileStore::new(dir.path());

    assert!(matches!(
        queries::balance(&store, "A"),
        Err(LedgerError::NotFound(_))
    ));
    assert!(matches!(
        stats::compute(&store),
        Err(LedgerError::Computation(_))
    ));
}

#[test]
fn api_end_to_end_over_files() {
    let dir = tempfile::tempdir().unwrap();
    let mut api = Api::with_processor(JsonFileStore::new(dir.path()), processor());

    let res = api.route("POST", "/api/users", r#"{"balance": 250.9}"#);
    assert_eq!(res.status, 200);
    let id = res.body["user"]["id"].as_str().unwrap().to_string();
    assert_eq!(res.body["user"]["balance"], 250);

    let body = json!({"id": id, "amount": 50, "games": "baccarat", "dealer": "lee"}).to_string();
    let res = api.route("POST", "/api/add", &body);
    assert_eq!(res.body, json!({"success": true, "balance": 300}));

    let res = api.route("GET", &format!("/api/balance/{id}"), "");
    assert_eq!(res.body, json!({"id": id, "balance": 300}));

    let history = api.route("GET", "/api/history", "").body;
    assert_eq!(history[0]["type"], "add");
    assert_eq!(history[0]["games"], "baccarat");
    assert_eq!(history[0]["dealer"], "lee");
    assert_eq!(history[1]["type"], "generate");

    let res = api.route("POST", "/api/users", &json!({"id": id}).to_string());
    assert_eq!(res.status, 409);

    let res = api.route("GET", "/api/dashboard-stats", "");
    assert_eq!(
        res.body,
        json!({"activeIds": 1, "totalBalance": 300, "totalTransactions": 2})
    );
}
