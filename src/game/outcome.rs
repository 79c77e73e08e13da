//! Win Condition Evaluator

use std::collections::BTreeMap;

use crate::game::state::{GameResult, PlayerId, ResultReason, Role, Winner};

/// Decide whether the game is over after an elimination.
///
/// Civilians win once no imposter is alive; imposters win once they are at
/// least as many as the civilians left. Otherwise play continues.
pub fn evaluate_winner(
    alive: &[PlayerId],
    roles_by_player: &BTreeMap<PlayerId, Role>,
) -> Option<GameResult> {
    let imposters_alive = alive
        .iter()
        .filter(|p| roles_by_player.get(*p) == Some(&Role::Imposter))
        .count();
    let civilians_alive = alive.len() - imposters_alive;

    if imposters_alive == 0 {
        return Some(GameResult {
            winner: Winner::Civilians,
            reason: ResultReason::AllImpostersEliminated,
        });
    }
    if imposters_alive >= civilians_alive {
        return Some(GameResult {
            winner: Winner::Imposters,
            reason: ResultReason::ImpostersEqualOrOutnumber,
        });
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roles(imposters: &[u8], players: u8) -> BTreeMap<PlayerId, Role> {
        PlayerId::seats(players)
            .into_iter()
            .map(|p| {
                let role = if imposters.contains(&p.0) { Role::Imposter } else { Role::Civilian };
                (p, role)
            })
            .collect()
    }

    fn ids(seats: &[u8]) -> Vec<PlayerId> {
        seats.iter().copied().map(PlayerId).collect()
    }

    #[test]
    fn test_civilians_win() {
        let result = evaluate_winner(&ids(&[1, 3, 4]), &roles(&[2], 4));
        assert_eq!(
            result,
            Some(GameResult { winner: Winner::Civilians, reason: ResultReason::AllImpostersEliminated })
        );
    }

    #[test]
    fn test_imposters_equal() {
        let result = evaluate_winner(&ids(&[1, 2]), &roles(&[2], 3));
        assert_eq!(
            result,
            Some(GameResult { winner: Winner::Imposters, reason: ResultReason::ImpostersEqualOrOutnumber })
        );
    }

    #[test]
    fn test_imposters_outnumber() {
        let result = evaluate_winner(&ids(&[1, 2, 3]), &roles(&[1, 2], 6));
        assert_eq!(result.map(|r| r.winner), Some(Winner::Imposters));
    }

    #[test]
    fn test_game_continues() {
        assert_eq!(evaluate_winner(&ids(&[1, 2, 3, 4]), &roles(&[2], 5)), None);
        assert_eq!(evaluate_winner(&ids(&[1, 2, 3, 4, 5]), &roles(&[1, 2], 6)), None);
    }
}
