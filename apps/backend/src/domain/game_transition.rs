use crate::domain::{GameState, GameStatus, PlayerId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameTransition {
    /// Edge-triggered: the turn became a specific player.
    TurnBecame { player_id: PlayerId },

    /// Edge-triggered: Game moved from Waiting -> Rolling.
    GameStarted,

    /// Edge-triggered: Game moved into Finished.
    GameEnded { winner: Option<PlayerId> },

    /// Edge-triggered: a fresh roll was recorded.
    DiceRolled { roll: Vec<u8> },

    /// Edge-triggered: the processing flag was set.
    ProcessingAcquired,

    /// Edge-triggered: the processing flag was cleared.
    ProcessingReleased,
}

/// Derive domain transitions from before/after state.
pub fn derive_game_transitions(before: &GameState, after: &GameState) -> Vec<GameTransition> {
    let mut transitions = Vec::new();

    // 1. Turn change
    if let Some(player_id) = after.current_turn {
        if before.current_turn != Some(player_id) {
            transitions.push(GameTransition::TurnBecame { player_id });
        }
    }

    // 2. Game start
    if before.status == GameStatus::Waiting && after.status.is_actionable() {
        transitions.push(GameTransition::GameStarted);
    }

    // 3. Game end
    if before.status != GameStatus::Finished && after.status == GameStatus::Finished {
        transitions.push(GameTransition::GameEnded {
            winner: after.winner,
        });
    }

    // 4. New roll
    if before.status == GameStatus::Rolling && after.status == GameStatus::Moving {
        transitions.push(GameTransition::DiceRolled {
            roll: after.dice_roll.clone(),
        });
    }

    // 5. Processing flag edges
    match (before.processing, after.processing) {
        (false, true) => transitions.push(GameTransition::ProcessingAcquired),
        (true, false) => transitions.push(GameTransition::ProcessingReleased),
        _ => {}
    }

    transitions
}

/// True when the only difference between the two states is the processing flag.
///
/// The AI coordinator ignores these writes so its own lock toggling never
/// retriggers it.
pub fn is_processing_toggle_only(before: &GameState, after: &GameState) -> bool {
    if before.processing == after.processing {
        return false;
    }
    let mut normalized = before.clone();
    normalized.processing = after.processing;
    normalized == *after
}
