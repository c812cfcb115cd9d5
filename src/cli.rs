use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "dictee-assets",
    version,
    about = "Generate sentences, audio and illustrations for weekly dictée words"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Generate(GenerateArgs),
    SplitWordlist(SplitWordlistArgs),
    Config(ConfigArgs),
}

#[derive(Args, Debug)]
pub struct GenerateArgs {
    #[arg(long, help = "Sounds practised this week (e.g. \"ou\")")]
    pub sounds: String,

    #[arg(long, value_name = "YYYY-MM-DD", help = "First day of the week")]
    pub week_start: NaiveDate,

    #[arg(long, value_name = "YYYY-MM-DD", help = "Last day of the week")]
    pub week_end: NaiveDate,

    #[arg(long, help = "Week directory under the public dir [default: --sounds]")]
    pub path: Option<String>,

    #[arg(
        long,
        value_name = "SECONDS",
        help = "Minimum seconds between image requests; 0 disables [default: 60]"
    )]
    pub image_rate_limit: Option<u64>,

    #[arg(long, value_name = "DIR", help = "Override the public output directory")]
    pub public_dir: Option<PathBuf>,

    #[arg(long, help = "Regenerate every asset, even ones already on disk")]
    pub force: bool,

    #[arg(long, help = "Report what would be generated without calling any service")]
    pub dry_run: bool,
}

impl GenerateArgs {
    pub fn week_path(&self) -> &str {
        self.path.as_deref().unwrap_or(&self.sounds)
    }
}

#[derive(Args, Debug)]
pub struct SplitWordlistArgs {
    #[arg(value_name = "CSV", help = "CSV file with Group and Word columns")]
    pub csv: PathBuf,

    #[arg(long, value_name = "DIR", help = "Override the public output directory")]
    pub public_dir: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[arg(long, help = "Show current config as JSON")]
    pub show: bool,

    #[arg(long, help = "Create default config file")]
    pub init: bool,

    #[arg(long, help = "Validate configuration")]
    pub validate: bool,
}
