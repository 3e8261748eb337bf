use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser, Clone)]
#[command(name = "flipzy", version, about = "Spaced-repetition vocabulary cards")]
pub struct Cli {
    /// Directory holding the card file and backups (defaults to app data dir)
    #[arg(long, env = "FLIPZY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Add a new card
    Add(CardAdd),
    /// List cards, newest first
    List(ListCmd),
    /// Show every field of one card
    Show { card_id: String },
    /// Edit the text fields of a card
    Edit(CardEdit),
    /// Delete a card
    Rm { card_id: String },
    /// Review the cards that are due
    Review(ReviewCmd),
    /// Learning statistics
    Stats,
    /// Snapshot the card file into the backups directory
    Backup,
}

#[derive(Debug, Args, Clone)]
pub struct CardAdd {
    /// Word or phrase
    #[arg(long)]
    pub front: String,
    /// Definition, translation, or explanation
    #[arg(long)]
    pub back: String,
    /// e.g. vocabulary, phrase, idiom, phrasal verb, collocation, other
    #[arg(long)]
    pub category: Option<String>,
    /// Example sentence
    #[arg(long)]
    pub example: Option<String>,
}

#[derive(Debug, Args, Clone)]
pub struct ListCmd {
    #[arg(long)]
    pub search: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long)]
    pub limit: Option<usize>,
}

#[derive(Debug, Args, Clone)]
pub struct CardEdit {
    pub card_id: String,
    #[arg(long)]
    pub front: Option<String>,
    #[arg(long)]
    pub back: Option<String>,
    #[arg(long)]
    pub category: Option<String>,
    #[arg(long, conflicts_with = "clear_example")]
    pub example: Option<String>,
    #[arg(long)]
    pub clear_example: bool,
}

#[derive(Debug, Args, Clone)]
pub struct ReviewCmd {
    #[arg(long, default_value_t = 50)]
    pub max: usize,
}
