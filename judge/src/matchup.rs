use connect_n::Ruleset;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::game::{play_game, GameResult};
use crate::player::Player;

/// The outcome of a match, i.e. a series of games between the same two players.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MatchResult {
    pub games_won: [u32; 2],
    /// How many of the lost games were lost through an illegal move or an
    /// unjustified pass.
    pub forfeits: [u32; 2],
    pub ties: u32,
    /// The index of the player that reached `games_to_win` first, or `None`
    /// if the match ran out of games.
    pub winner: Option<usize>,
}

impl MatchResult {
    pub fn games_played(&self) -> u32 {
        self.games_won[0] + self.games_won[1] + self.ties
    }

    /// The player with more won games, if any.
    pub fn leader(&self) -> Option<usize> {
        match self.games_won[0].cmp(&self.games_won[1]) {
            std::cmp::Ordering::Less => Some(1),
            std::cmp::Ordering::Equal => None,
            std::cmp::Ordering::Greater => Some(0),
        }
    }
}

/// Plays games until one player has won `ruleset.games_to_win` of them, or
/// until `ruleset.max_games` games have been played.
///
/// An illegal move loses the game in which it was played. With
/// `stop_on_illegal_move`, it also ends the match right away.
pub fn play_match(
    rng: &mut StdRng,
    player_1: &mut dyn Player,
    player_2: &mut dyn Player,
    ruleset: &Ruleset,
    stop_on_illegal_move: bool,
) -> anyhow::Result<MatchResult> {
    ruleset.validate()?;
    let player_names = [player_1.name().to_owned(), player_2.name().to_owned()];
    let mut result = MatchResult::default();

    for game_idx in 0..ruleset.max_games {
        let forfeiting_player = match play_game(rng, player_1, player_2, ruleset)? {
            GameResult::WonByPlayer { player_idx, line } => {
                debug!(winner = %player_names[player_idx], game_idx, ?line);
                result.games_won[player_idx] += 1;
                None
            }
            GameResult::Tie => {
                debug!(game_idx, "Tie");
                result.ties += 1;
                None
            }
            GameResult::IllegalMoveByPlayer { player_idx, err } => {
                info!(
                    player = %player_names[player_idx],
                    game_idx, "Illegal move by player"
                );
                let mut err_dyn = &err as &dyn std::error::Error;
                while let Some(src_err) = err_dyn.source() {
                    info!("{}", err_dyn);
                    err_dyn = src_err;
                }
                info!("{}", err_dyn);
                Some(player_idx)
            }
            GameResult::PassedByPlayer { player_idx } => {
                info!(
                    player = %player_names[player_idx],
                    game_idx, "Player passed although a move was possible"
                );
                Some(player_idx)
            }
        };
        if let Some(player_idx) = forfeiting_player {
            result.games_won[1 - player_idx] += 1;
            result.forfeits[player_idx] += 1;
        }

        if let Some(player_idx) =
            (0..2).find(|&idx| result.games_won[idx] >= ruleset.games_to_win)
        {
            result.winner = Some(player_idx);
            break;
        }
        if stop_on_illegal_move && forfeiting_player.is_some() {
            break;
        }
    }

    Ok(result)
}
