pub mod audio;
pub mod cli;
pub mod config;
pub mod error;
pub mod google;
pub mod image;
pub mod layout;
pub mod manifest;
pub mod metadata;
pub mod persist;
pub mod pipeline;
pub mod reconcile;
pub mod split;
pub mod text;
pub mod throttle;
pub mod tts;
pub mod words;

use anyhow::Context;
use cli::{Cli, Commands};
use config::Config;
use google::GoogleClient;
use layout::WeekLayout;
use reconcile::{AssetKind, Backends};
use throttle::Throttle;

pub fn run(cli: Cli) -> anyhow::Result<()> {
    setup_tracing(cli.verbose);

    match cli.command {
        Commands::Generate(args) => generate(args),
        Commands::SplitWordlist(args) => split_wordlist(args),
        Commands::Config(args) => config_cmd(args),
    }
}

fn setup_tracing(verbose: bool) {
    let filter = if verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn generate(args: cli::GenerateArgs) -> anyhow::Result<()> {
    let config = Config::load().context("load config")?;
    config.validate().context("validate config")?;

    if args.week_end < args.week_start {
        anyhow::bail!(
            "--week-end {} is before --week-start {}",
            args.week_end,
            args.week_start
        );
    }

    let public_dir = args
        .public_dir
        .clone()
        .unwrap_or_else(|| config.public_dir.clone());
    let layout = WeekLayout::new(public_dir, args.week_path());

    if args.dry_run {
        return dry_run(&layout, args.force);
    }

    let api_key = config::api_key_from_env()?;
    let client = GoogleClient::new(api_key, config.timeout()).context("build HTTP client")?;
    let text = text::gemini::GeminiTextBackend::new(client.clone(), config.text.clone());
    let speech = tts::gemini::GeminiTtsBackend::new(client.clone(), config.tts.clone());
    let images = image::imagen::ImagenBackend::new(client, config.image.clone());

    let rate_limit = args
        .image_rate_limit
        .unwrap_or(config.image_rate_limit_seconds);
    tracing::info!(
        sounds = %args.sounds,
        week = %layout.week_path,
        image_rate_limit = rate_limit,
        force = args.force,
        "generating assets"
    );

    let summary = pipeline::generate_week(
        &layout,
        Backends {
            text: &text,
            speech: &speech,
            image: &images,
        },
        Throttle::from_secs(rate_limit),
        args.force,
    )
    .with_context(|| format!("generate week {}", layout.week_path))?;

    let ledger_path = layout.public_dir.join(metadata::METADATA_FILE_NAME);
    metadata::update_metadata(
        &ledger_path,
        &args.sounds,
        &layout.week_path,
        args.week_start,
        args.week_end,
        chrono::Local::now().date_naive(),
    )
    .context("update metadata ledger")?;

    println!("Words processed: {}", summary.total_words());
    println!("  new:       {}", summary.new_words);
    println!("  updated:   {}", summary.updated_words);
    println!("  unchanged: {}", summary.unchanged_words);
    println!("Assets generated: {}", summary.generated_assets);
    if summary.failed_assets > 0 {
        println!("Assets failed: {} (re-run to retry)", summary.failed_assets);
    }
    println!("Manifest: {}", layout.manifest_file().display());

    Ok(())
}

fn dry_run(layout: &WeekLayout, force: bool) -> anyhow::Result<()> {
    let plan = pipeline::plan_week(layout, force)
        .with_context(|| format!("plan week {}", layout.week_path))?;

    let mut pending = 0;
    for (word, needs) in &plan {
        let missing: Vec<&str> = needs.missing().into_iter().map(AssetKind::as_str).collect();
        if missing.is_empty() {
            println!("{word}: up to date");
        } else {
            pending += 1;
            println!("{word}: {}", missing.join(", "));
        }
    }
    println!("{pending} of {} words need generation", plan.len());
    Ok(())
}

fn split_wordlist(args: cli::SplitWordlistArgs) -> anyhow::Result<()> {
    let config = Config::load().context("load config")?;
    let public_dir = args.public_dir.unwrap_or(config.public_dir);

    let raw = std::fs::read_to_string(&args.csv)
        .with_context(|| format!("read {}", args.csv.display()))?;
    let groups = split::parse_groups(&raw).context("parse word list CSV")?;
    let written = split::write_groups(&groups, &public_dir)?;

    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn config_cmd(args: cli::ConfigArgs) -> anyhow::Result<()> {
    if args.init {
        let path = Config::init_default()?;
        println!("Initialized config at {}", path.display());
        return Ok(());
    }

    if args.show {
        let config = Config::load()?;
        println!("{}", serde_json::to_string_pretty(&config)?);
        return Ok(());
    }

    if args.validate {
        let config = Config::load()?;
        config.validate()?;
        println!("Config OK");
        return Ok(());
    }

    let path = Config::default_path()?;
    println!("{}", path.display());
    Ok(())
}
