use std::path::PathBuf;
use clap::Parser;

#[derive(Parser, Debug)]
#[command(about = "Iterated prisoner's dilemma duel: action-value learner vs tit-for-tat")]
pub struct DuelOptions{
    /// Training episodes to run.
    #[arg(long, default_value = "100")]
    pub episodes: usize,

    /// Frozen evaluation episodes to run after training.
    #[arg(long, default_value = "20")]
    pub test_episodes: usize,

    /// Rounds per duel.
    #[arg(long, default_value = "10")]
    pub rounds: usize,

    /// Environment seed; random when absent.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Exploration rate of the learning player.
    #[arg(long, default_value = "0.1")]
    pub epsilon: f64,

    /// Explicit run name (defaults to the roster label).
    #[arg(long)]
    pub name: Option<String>,

    /// Base directory for tensorboard event files; metrics stay in memory
    /// when absent.
    #[arg(long)]
    pub tboard: Option<PathBuf>,

    /// Record per-step loss/schedule diagnostics.
    #[arg(long)]
    pub write_loss: bool,

    /// Suppress per-episode logging.
    #[arg(long)]
    pub quiet: bool,

    /// Print the final summary as JSON instead of logging it.
    #[arg(long)]
    pub json: bool,

    #[arg(long, default_value = "info")]
    pub log_level: log::LevelFilter,

    #[arg(long)]
    pub log_file: Option<PathBuf>,
}
