use vidpoker_engine::engine::{DealOutcome, SessionBuilder, SessionState};
use vidpoker_engine::errors::EngineError;
use vidpoker_engine::events::{EventLog, SessionEvent};
use vidpoker_engine::fixture;
use vidpoker_engine::game::GameVariant;
use vidpoker_engine::ledger::Ledger;
use vidpoker_engine::rules::Bet;

fn settled(outcome: DealOutcome) -> vidpoker_engine::engine::RoundSummary {
    match outcome {
        DealOutcome::Settled(summary) => summary,
        other => panic!("expected a settled round, got {:?}", other),
    }
}

#[test]
fn deal_then_draw_alternates_state() {
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .seed(42)
        .build(Ledger::with_balance(10))
        .unwrap();
    assert_eq!(session.state(), SessionState::Idle);

    assert_eq!(session.deal_draw().unwrap(), DealOutcome::Dealt);
    assert_eq!(session.state(), SessionState::AwaitingDraw);
    assert!(session.hand(0).unwrap().is_complete());
    assert_eq!(session.balance(), 9);

    let summary = settled(session.deal_draw().unwrap());
    assert_eq!(session.state(), SessionState::Idle);
    assert_eq!(summary.round, 1);
    assert_eq!(summary.balance, session.balance());
    assert_eq!(summary.balance, 9 + summary.total_payout);
    assert_eq!(session.last_round(), Some(&summary));
}

#[test]
fn insufficient_funds_declines_without_side_effects() {
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .seed(1)
        .build(Ledger::with_balance(4))
        .unwrap();
    session.bet_max();
    assert_eq!(
        session.deal_draw().unwrap(),
        DealOutcome::Declined {
            required: 5,
            available: 4
        }
    );
    assert_eq!(session.balance(), 4);
    assert_eq!(session.state(), SessionState::Idle);
    assert!(session.hand(0).unwrap().is_empty());
    assert_eq!(session.deck(0).unwrap().remaining(), 52);
}

#[test]
fn running_out_of_credits_mid_session() {
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .seed(5)
        .build(Ledger::with_balance(2))
        .unwrap();
    let losing = fixture::hand(["2c", "7d", "9h", "Js", "4c"]);
    for _ in 0..2 {
        fixture::deal_held(&mut session, losing).unwrap();
        settled(session.deal_draw().unwrap());
    }
    assert_eq!(session.balance(), 0);
    assert!(matches!(
        session.deal_draw().unwrap(),
        DealOutcome::Declined { required: 1, available: 0 }
    ));
    assert_eq!(session.rounds_played(), 2);
}

#[test]
fn many_rounds_keep_the_books_straight() {
    let mut session = SessionBuilder::new(GameVariant::BonusPoker)
        .seed(77)
        .build(Ledger::with_balance(1_000))
        .unwrap();
    let mut expected = 1_000u32;
    for round in 0..50 {
        session.set_bet((round % 5 + 1) as u8).unwrap();
        let cost = u32::from(session.bet().credits());
        assert_eq!(session.deal_draw().unwrap(), DealOutcome::Dealt);
        expected -= cost;
        session.hold(round % 5, true).unwrap();
        let summary = settled(session.deal_draw().unwrap());
        expected += summary.total_payout;
        assert_eq!(session.balance(), expected);
        session.verify_accounting().unwrap();
    }
}

#[test]
fn hold_is_ignored_while_idle() {
    let log = EventLog::new();
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .sink(log.clone())
        .build(Ledger::with_balance(5))
        .unwrap();
    session.hold(0, true).unwrap();
    session.toggle_hold(7).unwrap();
    assert!(log.events().is_empty());
}

#[test]
fn hold_out_of_range_is_an_error_during_a_round() {
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .seed(3)
        .build(Ledger::with_balance(5))
        .unwrap();
    session.deal_draw().unwrap();
    assert_eq!(
        session.hold(5, true),
        Err(EngineError::IndexOutOfRange { index: 5 })
    );
    assert!(session.is_awaiting_draw());
}

#[test]
fn bet_controls() {
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .build(Ledger::with_balance(5))
        .unwrap();
    assert_eq!(session.bet(), Bet::MIN);
    let seen: Vec<u8> = (0..5)
        .map(|_| {
            session.cycle_bet();
            session.bet().credits()
        })
        .collect();
    assert_eq!(seen, vec![2, 3, 4, 5, 1]);

    session.bet_max();
    assert_eq!(session.bet(), Bet::MAX);
    assert_eq!(session.set_bet(0), Err(EngineError::InvalidBet { credits: 0 }));
    assert_eq!(session.bet(), Bet::MAX);
    session.set_bet(3).unwrap();
    assert_eq!(session.bet().credits(), 3);
}

#[test]
fn borrowed_ledger_outlives_the_session() {
    let mut ledger = Ledger::with_balance(100);
    {
        let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
            .hands(4)
            .seed(11)
            .build(&mut ledger)
            .unwrap();
        session.set_bet(5).unwrap();
        fixture::deal_held(&mut session, fixture::hand(["2c", "7d", "9h", "Js", "4c"])).unwrap();
        session.deal_draw().unwrap();
    }
    // four hands hold the same losing cards
    assert_eq!(ledger.balance(), 80);
}

#[test]
fn owned_ledger_is_handed_back() {
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .build(Ledger::with_balance(20))
        .unwrap();
    session.add_credits(5);
    session.set_balance(12);
    assert_eq!(session.into_ledger().balance(), 12);
}

#[test]
fn hand_count_is_validated() {
    let zero = SessionBuilder::new(GameVariant::JacksOrBetter)
        .hands(0)
        .build(Ledger::new());
    assert!(matches!(zero, Err(EngineError::InvalidHandCount { requested: 0, .. })));

    let too_many = SessionBuilder::new(GameVariant::JacksOrBetter)
        .hands(101)
        .build(Ledger::new());
    assert!(matches!(
        too_many,
        Err(EngineError::InvalidHandCount { requested: 101, max: 100 })
    ));

    let session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .hands(100)
        .build(Ledger::new())
        .unwrap();
    assert_eq!(session.hand_count(), 100);
    assert_eq!(session.hand(100).err(), Some(EngineError::NoSuchHand { index: 100 }));
}

#[test]
fn events_follow_a_round() {
    let log = EventLog::new();
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .seed(21)
        .sink(log.clone())
        .build(Ledger::with_balance(10))
        .unwrap();
    let pair = fixture::hand(["Jc", "Jd", "2h", "5s", "9c"]);

    fixture::deal(&mut session, pair).unwrap();
    let dealt = log.take();
    assert_eq!(dealt[0], SessionEvent::HandCleared { hand: 0 });
    assert_eq!(dealt[1], SessionEvent::BalanceChanged { balance: 9 });
    let revealed: Vec<_> = dealt
        .iter()
        .filter_map(|e| match e {
            SessionEvent::CardRevealed { hand: 0, slot, card } => Some((*slot, *card)),
            _ => None,
        })
        .collect();
    assert_eq!(revealed, pair.iter().copied().enumerate().collect::<Vec<_>>());
    assert_eq!(
        dealt.last(),
        Some(&SessionEvent::InProgressChanged { in_progress: true })
    );

    session.hold(0, true).unwrap();
    session.hold(1, true).unwrap();
    assert_eq!(
        log.take(),
        vec![
            SessionEvent::HoldChanged { hand: 0, slot: 0, held: true },
            SessionEvent::HoldChanged { hand: 0, slot: 1, held: true },
        ]
    );

    let summary = settled(session.deal_draw().unwrap());
    let drawn = log.take();
    assert_eq!(
        drawn[0],
        SessionEvent::RedrawPending { hand: 0, slots: vec![2, 3, 4] }
    );
    let payout = summary.total_payout;
    assert!(payout >= 1);
    assert!(drawn.contains(&SessionEvent::HandSettled {
        hand: 0,
        label: summary.hands[0].outcome.label.clone(),
        payout,
    }));
    assert!(drawn.contains(&SessionEvent::RunningTotal { total: payout }));
    assert!(drawn.contains(&SessionEvent::BalanceChanged { balance: 9 + payout }));
    assert_eq!(
        drawn.last(),
        Some(&SessionEvent::InProgressChanged { in_progress: false })
    );
}

#[test]
fn insufficient_funds_event_reports_amounts() {
    let log = EventLog::new();
    let mut session = SessionBuilder::new(GameVariant::JacksOrBetter)
        .hands(3)
        .sink(log.clone())
        .build(Ledger::with_balance(2))
        .unwrap();
    session.deal_draw().unwrap();
    assert_eq!(
        log.events(),
        vec![SessionEvent::InsufficientFunds { required: 3, available: 2 }]
    );
}
