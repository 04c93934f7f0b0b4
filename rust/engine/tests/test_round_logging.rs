use std::fs;

use vidpoker_engine::engine::{DealOutcome, SessionBuilder};
use vidpoker_engine::fixture;
use vidpoker_engine::game::GameVariant;
use vidpoker_engine::ledger::Ledger;
use vidpoker_engine::logger::{format_round_id, RoundLogger, RoundRecord};
use vidpoker_engine::rules::Bet;

fn record(id: &str, ts: Option<&str>) -> RoundRecord {
    RoundRecord {
        round_id: id.to_string(),
        variant: GameVariant::JacksOrBetter,
        bet: Bet::MIN,
        seed: Some(1),
        hands: vec![],
        total_payout: 0,
        balance: 9,
        ts: ts.map(str::to_string),
    }
}

#[test]
fn writes_jsonl_with_lf_only() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("rounds.jsonl");
    let mut logger = RoundLogger::create(&path).expect("create logger");
    logger.write(&record("20250102-000001", None)).expect("write");
    logger.write(&record("20250102-000002", None)).expect("write");
    let bytes = fs::read(&path).expect("read file");
    assert!(bytes.ends_with(b"\n"));
    assert!(!bytes.contains(&b'\r'));
    assert_eq!(bytes.iter().filter(|b| **b == b'\n').count(), 2);
}

#[test]
fn sequential_ids_increment() {
    let dir = tempfile::tempdir().expect("tempdir");
    let mut logger = RoundLogger::create(dir.path().join("ids.jsonl")).expect("create logger");
    let first = logger.next_id();
    let second = logger.next_id();
    let (date, seq) = first.split_once('-').expect("dated id");
    assert_eq!(date.len(), 8);
    assert!(date.chars().all(|c| c.is_ascii_digit()));
    assert_eq!(seq, "000001");
    assert_eq!(second, format_round_id(date, 2));
    assert_eq!(format_round_id("20250101", 123456), "20250101-123456");
}

#[test]
fn ts_is_generated_when_missing_and_preserved_when_present() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("nested").join("rounds.jsonl");
    let mut logger = RoundLogger::create(&path).expect("create logger");
    logger.write(&record("a", None)).unwrap();
    logger.write(&record("b", Some("2025-01-02T03:04:05Z"))).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<RoundRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).expect("valid json"))
        .collect();
    let generated = lines[0].ts.as_deref().expect("ts injected");
    assert!(chrono::DateTime::parse_from_rfc3339(generated).is_ok());
    assert_eq!(lines[1].ts.as_deref(), Some("2025-01-02T03:04:05Z"));
}

#[test]
fn session_appends_one_line_per_settled_round() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("history.jsonl");
    let mut session = SessionBuilder::new(GameVariant::BonusPoker)
        .hands(2)
        .seed(314)
        .history(RoundLogger::create(&path).unwrap())
        .build(Ledger::with_balance(50))
        .unwrap();

    let quads = fixture::hand(["Ac", "Ad", "Ah", "As", "2c"]);
    fixture::deal_held(&mut session, quads).unwrap();
    let DealOutcome::Settled(summary) = session.deal_draw().unwrap() else {
        panic!("expected a settled round");
    };
    assert_eq!(summary.total_payout, 160);

    session.deal_draw().unwrap();
    session.deal_draw().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    let rounds: Vec<RoundRecord> = text
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(rounds.len(), 2);
    assert!(rounds[0].round_id.ends_with("-000001"));
    assert!(rounds[1].round_id.ends_with("-000002"));
    assert_eq!(rounds[0].variant, GameVariant::BonusPoker);
    assert_eq!(rounds[0].seed, Some(314));
    assert_eq!(rounds[0].hands.len(), 2);
    assert_eq!(rounds[0].hands[1].cards, quads);
    assert_eq!(rounds[0].hands[1].label, "4 of a Kind (Aces)");
    assert!(rounds[0].hands.iter().all(|h| h.held == [true; 5]));
    assert_eq!(rounds[0].balance, 50 - 2 + 160);
}
