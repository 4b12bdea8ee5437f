use crate::domain::{GameState, GameStatus, Player, PlayerId};
use crate::errors::domain::DomainError;

/// Who is asking to act on a game.
///
/// Humans get user-facing rejections (`NOT_YOUR_TURN`, `PHASE_MISMATCH`).
/// Automation acts on a state it read earlier, so the same mismatches mean
/// its read went stale (`STALE_TURN`, `STALE_STATUS`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Human(PlayerId),
    Automation(PlayerId),
}

impl Actor {
    pub fn player_id(self) -> PlayerId {
        match self {
            Actor::Human(id) | Actor::Automation(id) => id,
        }
    }

    /// Resolve the acting player, checking it is this actor's turn in `required`.
    pub fn authorize(
        self,
        state: &GameState,
        required: GameStatus,
    ) -> Result<&Player, DomainError> {
        let player_id = self.player_id();
        let player = state.require_player(player_id)?;

        if state.current_turn != Some(player_id) {
            return Err(match self {
                Actor::Human(_) => DomainError::NotYourTurn { player_id },
                Actor::Automation(_) => DomainError::StaleTurn {
                    expected: player_id,
                    actual: state.current_turn,
                },
            });
        }
        if state.status != required {
            return Err(match self {
                Actor::Human(_) => DomainError::PhaseMismatch {
                    expected: required,
                    actual: state.status,
                },
                Actor::Automation(_) => DomainError::StaleStatus {
                    expected: required,
                    actual: state.status,
                },
            });
        }
        if matches!(self, Actor::Automation(_)) && !player.is_automated() {
            return Err(DomainError::NotYourTurn { player_id });
        }
        Ok(player)
    }
}
