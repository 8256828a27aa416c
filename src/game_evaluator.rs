//! Pot construction and prize distribution.
//!
//! Pots are built from each player's round contribution, [`PayInfo`]`::amount`.
//! Every distinct all-in amount opens a side-pot tier; whatever is left over
//! forms the main pot, which is always the last pot returned.
//!
//! [`PayInfo`]: crate::player::PayInfo

use crate::cards::Card;
use crate::error::EngineError;
use crate::evaluator::{HandEvaluator, HandRankInfo, HandScore, StandardEvaluator};
use crate::player::{PayStatus, Player};
use crate::table::Table;
use log::trace;

/// One pot and the seats that may win it.
#[derive(Debug, Clone, PartialEq)]
pub struct Pot {
    pub amount: f64,
    pub eligibles: Vec<usize>,
}

/// A revealed hand at showdown.
#[derive(Debug, Clone, PartialEq)]
pub struct HandInfo {
    pub uuid: String,
    pub hand: HandRankInfo,
}

/// Outcome of a showdown.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Judgement {
    /// Seats holding the best hand among all active players.
    pub winners: Vec<usize>,
    /// Empty when only one player is still active.
    pub hand_info: Vec<HandInfo>,
    /// Chips won, indexed by seat.
    pub prize_map: Vec<f64>,
}

/// Builds pots and judges showdowns with a pluggable hand evaluator.
///
/// ```
/// use holdem_round::game_evaluator::{GameEvaluator, Pot};
/// use holdem_round::player::Player;
///
/// let mut players = vec![Player::new("a", 0.0, "a"), Player::new("b", 0.0, "b")];
/// for p in &mut players {
///     p.pay_info_mut().update_by_pay(10.0);
/// }
/// let pots = GameEvaluator::new().create_pot(&players);
/// assert_eq!(pots, vec![Pot { amount: 20.0, eligibles: vec![0, 1] }]);
/// ```
#[derive(Debug, Clone, Default)]
pub struct GameEvaluator<E = StandardEvaluator> {
    evaluator: E,
}

impl GameEvaluator<StandardEvaluator> {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: HandEvaluator> GameEvaluator<E> {
    pub fn with_evaluator(evaluator: E) -> Self {
        Self { evaluator }
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Side pots in ascending tier order, then the main pot.
    pub fn create_pot(&self, players: &[Player]) -> Vec<Pot> {
        let mut tiers: Vec<f64> = players
            .iter()
            .filter(|p| p.pay_info().status == PayStatus::AllIn)
            .map(|p| p.pay_info().amount)
            .collect();
        tiers.sort_by(f64::total_cmp);
        tiers.dedup();

        let mut pots: Vec<Pot> = Vec::with_capacity(tiers.len() + 1);
        let mut taken = 0.0;
        for tier in tiers {
            let capped: f64 = players.iter().map(|p| p.pay_info().amount.min(tier)).sum();
            let amount = capped - taken;
            taken += amount;
            let eligibles = seats_where(players, |p| p.pay_info().amount >= tier && p.is_active());
            trace!("side pot at tier {tier}: {amount} for seats {eligibles:?}");
            pots.push(Pot { amount, eligibles });
        }

        let total: f64 = players.iter().map(|p| p.pay_info().amount).sum();
        let max_pay = players.iter().map(|p| p.pay_info().amount).fold(0.0, f64::max);
        let eligibles = seats_where(players, |p| p.pay_info().amount == max_pay);
        let amount = total - taken;
        trace!("main pot: {amount} for seats {eligibles:?}");
        pots.push(Pot { amount, eligibles });
        pots
    }

    /// Seats among `candidates` tied for the best active hand.
    pub fn find_winners_from(
        &self,
        players: &[Player],
        candidates: &[usize],
        community: &[Card],
    ) -> Result<Vec<usize>, EngineError> {
        let mut best: Option<HandScore> = None;
        let mut winners = Vec::new();
        for &seat in candidates {
            let player = players
                .get(seat)
                .ok_or(EngineError::SeatOutOfRange { seat, seats: players.len() })?;
            if !player.is_active() {
                continue;
            }
            let score = self.score(player, community)?;
            match best {
                Some(b) if score < b => {}
                Some(b) if score == b => winners.push(seat),
                _ => {
                    best = Some(score);
                    winners.clear();
                    winners.push(seat);
                }
            }
        }
        Ok(winners)
    }

    /// Decide the showdown for the table as it stands.
    pub fn judge(&self, table: &Table) -> Result<Judgement, EngineError> {
        let players = table.seats.players();
        let community = table.community_cards();
        let all: Vec<usize> = (0..players.len()).collect();
        let winners = self.find_winners_from(players, &all, community)?;
        let hand_info = self.gen_hand_info_if_needed(players, community)?;
        let prize_map = self.calc_prize_distribution(players, community)?;
        Ok(Judgement { winners, hand_info, prize_map })
    }

    /// Split every pot among its best eligible hands. Pots are independent.
    pub fn calc_prize_distribution(
        &self,
        players: &[Player],
        community: &[Card],
    ) -> Result<Vec<f64>, EngineError> {
        let mut prize_map = vec![0.0; players.len()];
        for pot in self.create_pot(players) {
            if pot.amount == 0.0 {
                continue;
            }
            let winners = self.find_winners_from(players, &pot.eligibles, community)?;
            if winners.is_empty() {
                return Err(EngineError::NoEligibleWinner(pot.amount));
            }
            let share = pot.amount / winners.len() as f64;
            for seat in winners {
                prize_map[seat] += share;
            }
        }
        Ok(prize_map)
    }

    fn gen_hand_info_if_needed(
        &self,
        players: &[Player],
        community: &[Card],
    ) -> Result<Vec<HandInfo>, EngineError> {
        let active: Vec<&Player> = players.iter().filter(|p| p.is_active()).collect();
        if active.len() == 1 {
            return Ok(Vec::new());
        }
        active
            .into_iter()
            .map(|p| {
                let hand = self.score(p, community)?.rank_info();
                Ok(HandInfo { uuid: p.uuid().to_string(), hand })
            })
            .collect()
    }

    fn score(&self, player: &Player, community: &[Card]) -> Result<HandScore, EngineError> {
        let hole = player
            .hole_cards()
            .ok_or_else(|| EngineError::MissingHoleCards(player.uuid().to_string()))?;
        Ok(self.evaluator.eval_hand(&hole, community))
    }
}

fn seats_where<F>(players: &[Player], pred: F) -> Vec<usize>
where
    F: Fn(&Player) -> bool,
{
    players.iter().enumerate().filter(|(_, p)| pred(p)).map(|(i, _)| i).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cards::parse_cards;
    use crate::evaluator::Category;
    use crate::hand::HoleCards;

    fn paid(uuid: &str, amount: f64, status: PayStatus) -> Player {
        let mut p = Player::new(uuid, 0.0, uuid);
        p.pay_info.update_by_pay(amount);
        match status {
            PayStatus::AllIn => p.pay_info.update_to_allin(),
            PayStatus::Folded => p.pay_info.update_to_fold(),
            _ => {}
        }
        p
    }

    fn dealt(mut p: Player, hole: &str) -> Player {
        p.add_hole_cards(&parse_cards(hole).unwrap()).unwrap();
        p
    }

    /// Ranks only by the first hole card, so tests can force outcomes.
    struct FirstCardEvaluator;

    impl HandEvaluator for FirstCardEvaluator {
        fn eval_hand(&self, hole: &HoleCards, _community: &[Card]) -> HandScore {
            let r = hole.first().rank().value();
            HandScore::from_parts(Category::HighCard, r, 0, 0, 0)
        }
    }

    #[test]
    fn all_in_tiers_become_side_pots() {
        let players = vec![
            paid("A", 50.0, PayStatus::PayTillEnd),
            paid("B", 20.0, PayStatus::AllIn),
            paid("C", 30.0, PayStatus::AllIn),
        ];
        let pots = GameEvaluator::new().create_pot(&players);
        assert_eq!(
            pots,
            vec![
                Pot { amount: 60.0, eligibles: vec![0, 1, 2] },
                Pot { amount: 20.0, eligibles: vec![0, 2] },
                Pot { amount: 20.0, eligibles: vec![0] },
            ]
        );
    }

    #[test]
    fn folded_players_fund_but_cannot_win_side_pots() {
        let players = vec![
            paid("A", 40.0, PayStatus::PayTillEnd),
            paid("B", 10.0, PayStatus::AllIn),
            paid("C", 25.0, PayStatus::Folded),
        ];
        let pots = GameEvaluator::new().create_pot(&players);
        assert_eq!(pots[0], Pot { amount: 30.0, eligibles: vec![0, 1] });
        assert_eq!(pots[1], Pot { amount: 45.0, eligibles: vec![0] });
    }

    #[test]
    fn equal_all_ins_share_one_tier() {
        let players = vec![
            paid("A", 20.0, PayStatus::AllIn),
            paid("B", 20.0, PayStatus::AllIn),
        ];
        let pots = GameEvaluator::new().create_pot(&players);
        assert_eq!(pots.len(), 2);
        assert_eq!(pots[0], Pot { amount: 40.0, eligibles: vec![0, 1] });
        assert_eq!(pots[1].amount, 0.0);
    }

    #[test]
    fn ties_split_each_pot() {
        let players = vec![
            dealt(paid("A", 30.0, PayStatus::PayTillEnd), "SA C2"),
            dealt(paid("B", 30.0, PayStatus::PayTillEnd), "HA D3"),
            dealt(paid("C", 30.0, PayStatus::PayTillEnd), "SK C4"),
        ];
        let evaluator = GameEvaluator::with_evaluator(FirstCardEvaluator);
        let prizes = evaluator.calc_prize_distribution(&players, &[]).unwrap();
        assert_eq!(prizes, vec![45.0, 45.0, 0.0]);
    }

    #[test]
    fn short_all_in_wins_only_its_tier() {
        let players = vec![
            dealt(paid("A", 50.0, PayStatus::PayTillEnd), "SK C2"),
            dealt(paid("B", 20.0, PayStatus::AllIn), "SA C3"),
            dealt(paid("C", 50.0, PayStatus::PayTillEnd), "SQ C4"),
        ];
        let evaluator = GameEvaluator::with_evaluator(FirstCardEvaluator);
        let prizes = evaluator.calc_prize_distribution(&players, &[]).unwrap();
        assert_eq!(prizes, vec![60.0, 60.0, 0.0]);
    }

    #[test]
    fn judge_hides_hands_when_one_player_remains() {
        let mut table = Table::new();
        table.seats.sitdown(dealt(paid("A", 10.0, PayStatus::PayTillEnd), "SA HA"));
        table.seats.sitdown(dealt(paid("B", 5.0, PayStatus::Folded), "SK HK"));
        let judgement = GameEvaluator::new().judge(&table).unwrap();
        assert_eq!(judgement.winners, vec![0]);
        assert!(judgement.hand_info.is_empty());
        assert_eq!(judgement.prize_map, vec![15.0, 0.0]);
    }

    #[test]
    fn judge_reveals_all_active_hands() {
        let mut table = Table::new();
        table.seats.sitdown(dealt(paid("A", 10.0, PayStatus::PayTillEnd), "SA HA"));
        table.seats.sitdown(dealt(paid("B", 10.0, PayStatus::PayTillEnd), "SK HK"));
        for c in parse_cards("C2 D7 H9 SJ C4").unwrap() {
            table.add_community_card(c).unwrap();
        }
        let judgement = GameEvaluator::new().judge(&table).unwrap();
        assert_eq!(judgement.winners, vec![0]);
        assert_eq!(judgement.hand_info.len(), 2);
        assert_eq!(judgement.hand_info[0].hand.category, Category::Pair);
        assert_eq!(judgement.hand_info[0].hand.high, 14);
        assert_eq!(judgement.prize_map, vec![20.0, 0.0]);
    }

    #[test]
    fn pot_without_active_eligible_is_an_error() {
        let players = vec![
            dealt(paid("A", 30.0, PayStatus::Folded), "SA C2"),
            dealt(paid("B", 10.0, PayStatus::PayTillEnd), "HA D3"),
        ];
        let result = GameEvaluator::new().calc_prize_distribution(&players, &[]);
        assert_eq!(result, Err(EngineError::NoEligibleWinner(40.0)));
    }

    #[test]
    fn active_player_without_cards_is_an_error() {
        let players = vec![paid("A", 10.0, PayStatus::PayTillEnd)];
        let result = GameEvaluator::new().find_winners_from(&players, &[0], &[]);
        assert_eq!(result, Err(EngineError::MissingHoleCards("A".into())));
    }
}
