use std::io::BufRead;

use connect_n::{Game, Side, Strategy};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::trace;

use crate::config::{PlayerConfig, PlayerKind};

/// A participant that picks moves for one side of a game.
pub trait Player {
    fn name(&self) -> &str;

    /// Called before every game, with the side this player plays.
    fn new_game(&mut self, side: Side);

    /// Picks a move for the side to move in `game`.
    ///
    /// `None` means the player passes, which is only acceptable when there
    /// is no legal move. Errors are reserved for I/O failures.
    fn choose_move(&mut self, game: &Game) -> anyhow::Result<Option<(usize, usize)>>;
}

/// Creates the player described by `config`.
///
/// AI players get their own RNG, seeded from `rng`, so that a tournament
/// can be replayed from its seed.
pub fn player_from_config(config: &PlayerConfig, rng: &mut StdRng) -> Box<dyn Player> {
    match config.kind {
        PlayerKind::Ai { strategy } => Box::new(AiPlayer::new(
            &config.name,
            strategy,
            StdRng::seed_from_u64(rng.gen()),
        )),
        PlayerKind::Human => Box::new(HumanPlayer::from_stdin(&config.name)),
    }
}

pub struct AiPlayer {
    name: String,
    strategy: Strategy,
    rng: StdRng,
}

impl AiPlayer {
    pub fn new(name: &str, strategy: Strategy, rng: StdRng) -> Self {
        Self {
            name: String::from(name),
            strategy,
            rng,
        }
    }
}

impl Player for AiPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, _side: Side) {}

    fn choose_move(&mut self, game: &Game) -> anyhow::Result<Option<(usize, usize)>> {
        let choice = game.suggest_move(self.strategy, &mut self.rng);
        trace!(player = &self.name, ?choice, "AI move");
        Ok(choice)
    }
}

enum Input {
    Stdin,
    Reader(Box<dyn BufRead>),
}

impl Input {
    fn read_line(&mut self, buf: &mut String) -> std::io::Result<usize> {
        match self {
            // Not wrapped in a BufReader, so that several human players can
            // share stdin without stealing each other's buffered input.
            Input::Stdin => std::io::stdin().read_line(buf),
            Input::Reader(reader) => reader.read_line(buf),
        }
    }
}

/// Shows the board on stderr and reads moves as `row col` lines.
pub struct HumanPlayer {
    name: String,
    side: Side,
    input: Input,
    buf: String,
}

impl HumanPlayer {
    pub fn from_stdin(name: &str) -> Self {
        Self::with_input(name, Input::Stdin)
    }

    pub fn from_reader(name: &str, reader: Box<dyn BufRead>) -> Self {
        Self::with_input(name, Input::Reader(reader))
    }

    fn with_input(name: &str, input: Input) -> Self {
        Self {
            name: String::from(name),
            side: Side::First,
            input,
            buf: String::new(),
        }
    }
}

fn parse_coordinates(line: &str) -> Option<(usize, usize)> {
    let mut parts = line
        .split(|c: char| c.is_whitespace() || c == ',')
        .filter(|part| !part.is_empty());
    let row = parts.next()?.parse().ok()?;
    let col = parts.next()?.parse().ok()?;
    parts.next().is_none().then_some((row, col))
}

impl Player for HumanPlayer {
    fn name(&self) -> &str {
        &self.name
    }

    fn new_game(&mut self, side: Side) {
        self.side = side;
        eprintln!("{}, you play {}", self.name, side);
    }

    fn choose_move(&mut self, game: &Game) -> anyhow::Result<Option<(usize, usize)>> {
        if game.candidates().is_empty() {
            return Ok(None);
        }
        loop {
            eprintln!("{}", game.grid());
            eprintln!("{} ({}), enter your move as `row col`:", self.name, self.side);
            self.buf.clear();
            if self.input.read_line(&mut self.buf)? == 0 {
                anyhow::bail!("Input for {} was closed", self.name);
            }
            let Some((row, col)) = parse_coordinates(&self.buf) else {
                eprintln!("Could not read '{}' as a move", self.buf.trim_end());
                continue;
            };
            // Try the move on a copy, to report why it is not allowed
            match game.clone().play(row, col) {
                Ok(_) => return Ok(Some((row, col))),
                Err(err) => {
                    let mut err_dyn = &err as &dyn std::error::Error;
                    while let Some(src_err) = err_dyn.source() {
                        eprintln!("{}", err_dyn);
                        err_dyn = src_err;
                    }
                    eprintln!("{}. Try another move.", err_dyn);
                }
            }
        }
    }
}
