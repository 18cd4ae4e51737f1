use std::collections::HashMap;
use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use connect_n::{Ruleset, ValidMoveRule};
use itertools::Itertools;
use judge::{load_ruleset, play_match, player_from_config, MatchResult, PlayerConfig};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;
use tracing_subscriber::filter::{LevelFilter, Targets};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[derive(Parser)]
struct Args {
    /// Players: "random", "normal", "human", or paths to player config JSON files
    #[clap(num_args(2..), value_delimiter = ' ')]
    players: Vec<String>,

    /// Path to a ruleset JSON file. The options below override its values.
    #[arg(long)]
    ruleset: Option<PathBuf>,

    #[arg(long)]
    rows: Option<usize>,

    #[arg(long)]
    cols: Option<usize>,

    /// How many pieces in a row win a game
    #[arg(long)]
    consecutive_tiles: Option<usize>,

    #[arg(long, value_enum)]
    valid_move: Option<ValidMoveArg>,

    #[arg(long)]
    games_to_win: Option<u32>,

    #[arg(long)]
    max_games: Option<u32>,

    /// How many matches to play per pairing of players
    #[arg(short, long, default_value_t = 1)]
    num_matches: usize,

    /// RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// End a match as soon as one player makes an illegal move
    #[arg(short, long, default_value_t = false)]
    stop_on_illegal_move: bool,

    /// A log level among "off", "error", "warn", "info", "debug", "trace"
    #[arg(short, long, default_value = "info")]
    log_level: LevelFilter,
}

#[derive(Clone, Copy, ValueEnum)]
enum ValidMoveArg {
    /// A piece may go on any empty cell
    Anywhere,
    /// A piece drops to the lowest empty cell of its column
    OnTop,
}

impl From<ValidMoveArg> for ValidMoveRule {
    fn from(arg: ValidMoveArg) -> Self {
        match arg {
            ValidMoveArg::Anywhere => ValidMoveRule::Anywhere,
            ValidMoveArg::OnTop => ValidMoveRule::OnTop,
        }
    }
}

impl Args {
    fn ruleset(&self) -> anyhow::Result<Ruleset> {
        let mut ruleset = match &self.ruleset {
            Some(path) => load_ruleset(path)?,
            None => Ruleset::default(),
        };
        if let Some(rows) = self.rows {
            ruleset.rows = rows;
        }
        if let Some(cols) = self.cols {
            ruleset.cols = cols;
        }
        if let Some(consecutive_tiles) = self.consecutive_tiles {
            ruleset.consecutive_tiles = consecutive_tiles;
        }
        if let Some(valid_move) = self.valid_move {
            ruleset.valid_move = valid_move.into();
        }
        if let Some(games_to_win) = self.games_to_win {
            ruleset.games_to_win = games_to_win;
        }
        if let Some(max_games) = self.max_games {
            ruleset.max_games = max_games;
        }
        ruleset.validate()?;
        Ok(ruleset)
    }
}

#[derive(Default)]
struct PairingScore {
    matches_won: [usize; 2],
    games_won: [u32; 2],
    forfeits: [u32; 2],
    ties: u32,
    drawn_matches: usize,
}

impl PairingScore {
    fn add(&mut self, result: &MatchResult) {
        match result.winner {
            Some(player_idx) => self.matches_won[player_idx] += 1,
            None => self.drawn_matches += 1,
        }
        for idx in 0..2 {
            self.games_won[idx] += result.games_won[idx];
            self.forfeits[idx] += result.forfeits[idx];
        }
        self.ties += result.ties;
    }

    fn num_matches(&self) -> usize {
        self.matches_won[0] + self.matches_won[1] + self.drawn_matches
    }
}

fn play_pairing(
    player_configs: [&PlayerConfig; 2],
    ruleset: &Ruleset,
    num_matches: usize,
    rng: &mut StdRng,
    stop_on_illegal_move: bool,
) -> anyhow::Result<PairingScore> {
    let mut player_1 = player_from_config(player_configs[0], rng);
    let mut player_2 = player_from_config(player_configs[1], rng);
    let mut score = PairingScore::default();

    for match_idx in 0..num_matches {
        let result = play_match(
            rng,
            player_1.as_mut(),
            player_2.as_mut(),
            ruleset,
            stop_on_illegal_move,
        )?;
        info!(
            match_idx,
            games = result.games_played(),
            winner = ?result.winner.map(|idx| &player_configs[idx].name),
            leader = ?result.leader().map(|idx| &player_configs[idx].name),
            "Match finished"
        );
        score.add(&result);
    }

    let paren = |player_idx: usize| forfeit_note(score.forfeits[1 - player_idx], 2 - player_idx);
    eprintln!(
        "End result:\n- {} matches and {} games won by {}{}\n- {} matches and {} games won by {}{}\n- {} drawn matches, {} tied games",
        score.matches_won[0],
        score.games_won[0],
        player_configs[0].name,
        paren(0),
        score.matches_won[1],
        score.games_won[1],
        player_configs[1].name,
        paren(1),
        score.drawn_matches,
        score.ties
    );

    Ok(score)
}

/// The remark on how many of a player's wins were forfeited by the player
/// numbered `opponent_num`.
fn forfeit_note(forfeits: u32, opponent_num: usize) -> String {
    if forfeits > 0 {
        format!(" ({} through forfeits by player {})", forfeits, opponent_num)
    } else {
        String::new()
    }
}

// prints an upper triangular matrix of the results of the tournament
fn print_tournament_results(
    player_configs: &[PlayerConfig],
    pairing_scores: &HashMap<(usize, usize), PairingScore>,
) {
    println!("\nTournament results (p1 match win %, p2 match win %, draw %):\n");
    print!(" {:19} |", "p1 ↓           p2 →");
    for j in (0..player_configs.len()).rev() {
        print!(" {:19} |", player_configs[j].nick);
    }
    println!();
    for i in 0..player_configs.len() {
        for _ in 0..player_configs.len() - i + 1 {
            print!("---------------------|");
        }
        println!();
        print!(" {:19} |", player_configs[i].nick);
        for j in (0..player_configs.len()).rev() {
            if i >= j {
                print!("    ");
            } else if let Some(score) = pairing_scores.get(&(i, j)) {
                let num_matches = score.num_matches() as f32;
                let win_1_percentage = score.matches_won[0] as f32 / num_matches * 100.0;
                let win_2_percentage = score.matches_won[1] as f32 / num_matches * 100.0;
                let draw_percentage = score.drawn_matches as f32 / num_matches * 100.0;
                print!(
                    "{:5.1}% {:5.1}% {:5.1}% |",
                    win_1_percentage, win_2_percentage, draw_percentage
                );
            } else {
                print!(" {:19} |", "N/A");
            }
        }
        println!();
    }
    println!("---------------------|");
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    initialize_logging(args.log_level);

    let ruleset = args.ruleset()?;
    info!(?ruleset);

    // Get a random seed
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed);
    let mut rng = StdRng::seed_from_u64(seed);

    let player_configs = args
        .players
        .iter()
        .map(|spec| PlayerConfig::load(spec))
        .collect::<Result<Vec<PlayerConfig>, anyhow::Error>>()?;

    let pairings: Vec<(usize, usize)> = (0..player_configs.len()).tuple_combinations().collect();

    let mut pairing_scores: HashMap<(usize, usize), PairingScore> = HashMap::new();
    for (i1, i2) in pairings {
        let score = play_pairing(
            [&player_configs[i1], &player_configs[i2]],
            &ruleset,
            args.num_matches,
            &mut rng,
            args.stop_on_illegal_move,
        )?;
        pairing_scores.insert((i1, i2), score);
    }

    if player_configs.len() > 2 {
        print_tournament_results(&player_configs, &pairing_scores);
    }

    Ok(())
}

fn initialize_logging(level: LevelFilter) {
    let format = tracing_subscriber::fmt::format()
        .with_target(false)
        .compact();

    let filter = Targets::new().with_default(level);

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().event_format(format))
        .with(filter)
        .init();
}
