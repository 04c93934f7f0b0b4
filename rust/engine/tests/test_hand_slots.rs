use vidpoker_engine::cards::Card;
use vidpoker_engine::errors::EngineError;
use vidpoker_engine::fixture;
use vidpoker_engine::hand::Hand;

#[test]
fn cards_fill_slots_in_order_until_full() {
    let cards = fixture::hand(["Ah", "Kd", "7s", "7c", "2d"]);
    let mut hand = Hand::new();
    assert!(hand.is_empty());
    for card in cards {
        hand.add_card(card).unwrap();
    }
    assert!(hand.is_complete());
    assert_eq!(hand.to_vector(), cards.map(Some));
    let extra: Card = "3h".parse().unwrap();
    assert_eq!(hand.add_card(extra), Err(EngineError::HandFull));
}

#[test]
fn holds_need_a_complete_hand() {
    let mut hand = Hand::new();
    hand.add_card("Ah".parse().unwrap()).unwrap();
    assert_eq!(hand.hold_card(0, true), Err(EngineError::HandIncomplete));
    assert_eq!(hand.card_held(0), Ok(false));
}

#[test]
fn hold_index_is_checked() {
    let mut hand = Hand::from_cards(fixture::hand(["Ah", "Kd", "7s", "7c", "2d"]));
    assert_eq!(
        hand.hold_card(5, true),
        Err(EngineError::IndexOutOfRange { index: 5 })
    );
    assert_eq!(
        hand.card_at(9),
        Err(EngineError::IndexOutOfRange { index: 9 })
    );
}

#[test]
fn replace_and_reset() {
    let mut hand = Hand::from_cards(fixture::hand(["Ah", "Kd", "7s", "7c", "2d"]));
    hand.hold_card(1, true).unwrap();
    assert_eq!(hand.unheld().collect::<Vec<_>>(), vec![0, 2, 3, 4]);

    let queen: Card = "Qs".parse().unwrap();
    hand.replace_card(4, queen).unwrap();
    assert_eq!(hand.card_at(4), Ok(Some(queen)));

    hand.reset();
    assert!(hand.is_empty());
    assert_eq!(hand.holds(), [false; 5]);
    assert_eq!(hand.to_cards(), Err(EngineError::HandIncomplete));
}
