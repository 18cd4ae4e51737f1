use connect_n::{Game, IllegalMove, Ruleset, Side, TurnOutcome};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::debug;

use crate::player::Player;

#[derive(Debug)]
pub enum GameResult {
    WonByPlayer {
        player_idx: usize,
        line: Vec<(usize, usize)>,
    },
    Tie,
    IllegalMoveByPlayer {
        player_idx: usize,
        err: IllegalMove,
    },
    /// The player offered no move although a legal move existed.
    PassedByPlayer {
        player_idx: usize,
    },
}

/// Plays a single game between two players.
///
/// Returns an error only when a player fails to produce an answer (e.g.
/// closed input), not when an illegal move is played.
pub fn play_game<'a>(
    rng: &mut StdRng,
    player_1: &'a mut dyn Player,
    player_2: &'a mut dyn Player,
    ruleset: &Ruleset,
) -> anyhow::Result<GameResult> {
    // Assign the sides randomly
    let sides = {
        let mut arr = Side::ALL;
        arr.shuffle(rng);
        arr
    };
    let mut players = [player_1, player_2];
    for (player, &side) in players.iter_mut().zip(sides.iter()) {
        player.new_game(side);
    }

    // Randomly pick a starting side
    let first = if rng.gen::<bool>() {
        Side::Second
    } else {
        Side::First
    };
    let mut game = Game::new(ruleset.clone(), first)?;

    let result = loop {
        let player_idx = if sides[0] == game.to_move() { 0 } else { 1 };
        let Some((row, col)) = players[player_idx].choose_move(&game)? else {
            break GameResult::PassedByPlayer { player_idx };
        };
        match game.play(row, col) {
            Ok(TurnOutcome::Normal) => {}
            Ok(TurnOutcome::Won { line, .. }) => {
                break GameResult::WonByPlayer { player_idx, line };
            }
            Ok(TurnOutcome::Stalemate) => break GameResult::Tie,
            Err(err) => break GameResult::IllegalMoveByPlayer { player_idx, err },
        }
    };

    debug!("Final board:\n{}", game.grid());
    Ok(result)
}
