use holdem_round::cards::{parse_cards, Card, Rank, Suit};
use holdem_round::evaluator::{eval_hand, Category, HandScore};
use holdem_round::hand::HoleCards;

fn score(hole: &str, board: &str) -> HandScore {
    let hole: HoleCards = hole.parse().expect("valid hole cards");
    eval_hand(&hole, &parse_cards(board).expect("valid board"))
}

fn made(s: HandScore) -> (Category, u8, u8) {
    (s.category(), s.primary_rank(), s.secondary_rank())
}

#[test]
fn category_straight_flush() {
    assert_eq!(made(score("H5 H6", "H7 H8 H9 C2 D3")), (Category::StraightFlush, 5, 0));
}

#[test]
fn royal_flush_is_the_highest_straight_flush() {
    let royal = score("ST SJ", "SQ SK SA C2 D3");
    assert_eq!(made(royal), (Category::StraightFlush, 10, 0));
    assert!(royal > score("H5 H6", "H7 H8 H9 C2 D3"));
}

#[test]
fn category_four_of_a_kind() {
    assert_eq!(made(score("S9 H9", "D9 C9 SK H2 D3")), (Category::FourOfAKind, 9, 0));
}

#[test]
fn category_full_house() {
    assert_eq!(made(score("SK HK", "DK CQ SQ H2 D3")), (Category::FullHouse, 13, 12));
}

#[test]
fn full_house_from_two_sets_of_trips() {
    assert_eq!(made(score("S5 H5", "D5 CJ SJ HJ D2")), (Category::FullHouse, 11, 5));
}

#[test]
fn full_house_uses_the_best_pair() {
    assert_eq!(made(score("S3 H3", "D3 C6 S6 HQ DQ")), (Category::FullHouse, 3, 12));
}

#[test]
fn category_flush() {
    assert_eq!(made(score("DA S3", "D2 D7 D9 DJ H4")), (Category::Flush, 14, 0));
}

#[test]
fn flush_beats_an_offsuit_straight() {
    // 3-4-5-6-7 is on offer, but six hearts make a flush
    assert_eq!(made(score("H3 H9", "H4 H5 H6 C7 HK")), (Category::Flush, 13, 0));
}

#[test]
fn category_straight() {
    assert_eq!(made(score("S5 H6", "D7 C8 S9 HK D2")), (Category::Straight, 5, 0));
}

#[test]
fn straight_reports_the_highest_run() {
    assert_eq!(made(score("S4 H5", "D6 C7 S8 H9 D2")), (Category::Straight, 5, 0));
}

#[test]
fn wheel_is_only_ace_high() {
    assert_eq!(made(score("SA H2", "D3 C4 S5 HK DQ")), (Category::HighCard, 14, 2));
}

#[test]
fn category_three_of_a_kind() {
    assert_eq!(made(score("S7 H7", "D7 CK S2 H9 DJ")), (Category::ThreeOfAKind, 7, 0));
}

#[test]
fn category_two_pair() {
    assert_eq!(made(score("SA HA", "DK CK S4 H4 D9")), (Category::TwoPair, 14, 13));
}

#[test]
fn category_one_pair() {
    assert_eq!(made(score("SA HA", "CK DQ HJ S3 C2")), (Category::Pair, 14, 0));
}

#[test]
fn category_high_card_uses_hole_ranks() {
    assert_eq!(made(score("C3 D4", "HA SK CQ D9 H7")), (Category::HighCard, 4, 3));
}

#[test]
fn precedence_across_categories() {
    let ladder = [
        score("C3 D4", "HA SK CQ D9 H7"),
        score("SA HA", "CK DQ HJ S3 C2"),
        score("SA HA", "DK CK S4 H4 D9"),
        score("S7 H7", "D7 CK S2 H9 DJ"),
        score("S5 H6", "D7 C8 S9 HK D2"),
        score("DA S3", "D2 D7 D9 DJ H4"),
        score("SK HK", "DK CQ SQ H2 D3"),
        score("S9 H9", "D9 C9 SK H2 D3"),
        score("H5 H6", "H7 H8 H9 C2 D3"),
    ];
    let categories: Vec<Category> = ladder.iter().map(|s| s.category()).collect();
    let mut expected = Category::BY_STRENGTH.to_vec();
    expected.reverse();
    assert_eq!(categories, expected);
    assert!(ladder.windows(2).all(|w| w[0] < w[1]));
}

#[test]
fn hole_cards_break_ties_on_a_shared_board() {
    let board = "S2 S5 S9 SJ SK";
    assert!(score("HA C2", board) > score("HQ C3", board));
    assert_eq!(score("HA C4", board).hole_low_rank(), 4);
}

#[test]
fn identical_hands_tie() {
    let board = "CK DQ HJ S3 C2";
    assert_eq!(score("SA HA", board), score("CA DA", board));
}

#[test]
fn constructs_cards_directly() {
    let hole = HoleCards::try_new(
        Card::new(Rank::Queen, Suit::Clubs),
        Card::new(Rank::Queen, Suit::Diamonds),
    )
    .expect("distinct cards");
    let s = eval_hand(&hole, &[]);
    assert_eq!(made(s), (Category::Pair, 12, 0));
    assert_eq!((s.hole_high_rank(), s.hole_low_rank()), (12, 12));
}
