use clap::Parser;
use small_xword::domain::ports::{ConfigProvider, WordSource};
use small_xword::utils::{logger, validation::Validate};
use small_xword::{CrosswordPipeline, LocalStorage, TomlConfig, TsvWordSource, Word, XwordEngine};

#[derive(Parser)]
#[command(name = "toml-xword")]
#[command(about = "Crossword generator with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "xword.toml")]
    config: String,

    /// Override the word list path from config
    #[arg(short, long)]
    words: Option<String>,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Dry run - check the word list without laying out a puzzle
    #[arg(long)]
    dry_run: bool,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 初始化日誌
    logger::init_cli_logger(args.verbose);

    tracing::info!("🚀 Starting TOML-based crossword generator");
    tracing::info!("📁 Loading configuration from: {}", args.config);

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 應用命令列覆蓋設定
    if let Some(words) = args.words.clone() {
        tracing::info!("🔧 Word list overridden to: {}", words);
        config.input.path = Some(words);
    }
    if let Some(seed) = args.seed {
        tracing::info!("🔧 Seed overridden to: {}", seed);
        config.puzzle.seed = Some(seed);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    tracing::info!("✅ Configuration loaded and validated successfully");

    let source = TsvWordSource::new(config.words_path()?.as_str())
        .with_delimiter(config.delimiter()?)
        .with_headers(config.has_headers());

    display_config_summary(&config, &args);

    if args.dry_run {
        tracing::info!("🔍 DRY RUN MODE - No layout will be generated");
        perform_dry_run(&source)?;
        return Ok(());
    }

    let storage = LocalStorage::new(config.output_path().to_string());
    let engine = XwordEngine::new(CrosswordPipeline::new(source, storage, config));

    match engine.run() {
        Ok(report) => {
            println!("✅ Crossword generated (seed {})", report.seed);
            println!(
                "   {} words on a {}x{} grid, {} isolated",
                report.placed, report.rows, report.cols, report.isolated
            );
            for output in &report.outputs {
                println!("📁 Output saved to: {}", output);
            }
        }
        Err(e) => {
            tracing::error!(
                "❌ Generation failed: {} (Category: {:?}, Severity: {:?})",
                e,
                e.category(),
                e.severity()
            );
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());
            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Puzzle: {}", config.puzzle_name());
    println!("  Words: {}", config.input.path.as_deref().unwrap_or("-"));
    println!("  Output: {}", config.output_path());
    println!("  Formats: {}", config.output_formats().join(", "));
    match config.seed() {
        Some(seed) => println!("  Seed: {}", seed),
        None => println!("  Seed: random"),
    }
    println!("  Longest words first: {}", config.sort_by_length());
    println!("  Include solution: {}", config.include_solution());

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(source: &TsvWordSource) -> anyhow::Result<()> {
    println!("🔍 Dry Run Analysis:");
    println!();

    let entries = source.read_entries()?;
    let mut required = 0;
    let mut optional = 0;
    let mut letters = 0;
    let mut invalid = Vec::new();

    for entry in &entries {
        match Word::try_from(entry) {
            Ok(word) => {
                letters += word.len();
                if word.required() {
                    required += 1;
                } else {
                    optional += 1;
                }
            }
            Err(e) => invalid.push(format!("{} ({})", entry.text, e)),
        }
    }

    println!("📝 Word List:");
    println!("  Entries: {}", entries.len());
    println!("  Required: {}", required);
    println!("  Optional: {}", optional);
    println!("  Total letters: {}", letters);

    if !invalid.is_empty() {
        println!();
        println!("⚠️ Invalid entries:");
        for line in &invalid {
            println!("  {}", line);
        }
    }

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");

    Ok(())
}
