use crate::domain::state::{COLOR_PAIRS, PLAYERS};
use crate::domain::{GameState, GameStatus, Player, PlayerId, PlayerKind};
use crate::errors::domain::DomainError;

/// Seat a player. The second join starts the game with the first player to roll.
pub fn join_game(
    state: &mut GameState,
    player_id: PlayerId,
    name: impl Into<String>,
    kind: PlayerKind,
) -> Result<&Player, DomainError> {
    if state.player(player_id).is_some() {
        return Err(DomainError::AlreadyJoined { player_id });
    }
    if state.players.len() >= PLAYERS {
        return Err(DomainError::GameFull);
    }
    if state.status != GameStatus::Waiting {
        return Err(DomainError::PhaseMismatch {
            expected: GameStatus::Waiting,
            actual: state.status,
        });
    }

    let seat = state.players.len();
    state.players.push(Player {
        id: player_id,
        name: name.into(),
        colors: COLOR_PAIRS[seat],
        captures: 0,
        finishes: 0,
        kind,
    });

    if state.players.len() == PLAYERS {
        state.status = GameStatus::Rolling;
        state.current_turn = state.players.first().map(|p| p.id);
    }

    Ok(&state.players[seat])
}
