use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = dictee_assets::cli::Cli::parse();
    dictee_assets::run(cli)
}
