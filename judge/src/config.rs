use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use anyhow::Context;
use connect_n::{Ruleset, Strategy};
use serde::{Deserialize, Serialize};

/// Describes a participant of a tournament.
///
/// Stored as JSON, e.g.
/// `{"name": "Normal AI", "nick": "normal", "type": "ai", "strategy": "normal"}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfig {
    pub name: String,
    /// A short name for result tables.
    pub nick: String,
    #[serde(flatten)]
    pub kind: PlayerKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PlayerKind {
    Ai { strategy: Strategy },
    /// Reads moves from stdin.
    Human,
}

impl PlayerConfig {
    /// Resolves a builtin player name (`random`, `normal` or `human`), or
    /// loads a JSON config file from the given path.
    pub fn load(spec: &str) -> anyhow::Result<Self> {
        if let Some(builtin) = Self::builtin(spec) {
            return Ok(builtin);
        }
        let file = File::open(spec)
            .with_context(|| format!("Could not open player config '{}'", spec))?;
        serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("Invalid player config '{}'", spec))
    }

    fn builtin(name: &str) -> Option<Self> {
        let (full_name, kind) = match name {
            "random" => (
                "Random AI",
                PlayerKind::Ai {
                    strategy: Strategy::PureRandom,
                },
            ),
            "normal" => (
                "Normal AI",
                PlayerKind::Ai {
                    strategy: Strategy::Normal,
                },
            ),
            "human" => ("Human", PlayerKind::Human),
            _ => return None,
        };
        Some(Self {
            name: String::from(full_name),
            nick: String::from(name),
            kind,
        })
    }
}

/// Loads a [`Ruleset`] from a JSON file. Missing fields take their default values.
pub fn load_ruleset(path: &Path) -> anyhow::Result<Ruleset> {
    let file = File::open(path)
        .with_context(|| format!("Could not open ruleset '{}'", path.display()))?;
    let ruleset: Ruleset = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("Invalid ruleset '{}'", path.display()))?;
    Ok(ruleset)
}
