use clap::Parser;
use small_xword::utils::{logger, validation::Validate};
use small_xword::{CliConfig, CrosswordPipeline, LocalStorage, TsvWordSource, XwordEngine};

fn main() -> anyhow::Result<()> {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.log_json {
        logger::init_json_logger(config.verbose);
    } else {
        logger::init_cli_logger(config.verbose);
    }

    tracing::info!("Starting small-xword CLI");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    // validate() 已檢查過分隔字元
    let delimiter = config.delimiter as u8;
    let source = TsvWordSource::new(&config.words)
        .with_delimiter(delimiter)
        .with_headers(config.has_headers);
    let storage = LocalStorage::new(config.output_path.clone());
    let engine = XwordEngine::new(CrosswordPipeline::new(source, storage, config));

    match engine.run() {
        Ok(report) => {
            println!("✅ Crossword generated (seed {})", report.seed);
            println!(
                "   {} words placed on a {}x{} grid, {} isolated",
                report.placed, report.rows, report.cols, report.isolated
            );
            if !report.unplaced.is_empty() {
                println!("   Optional words left out: {}", report.unplaced.join(", "));
            }
            if !report.rejected.is_empty() {
                println!("   Invalid optional entries dropped: {}", report.rejected.join(", "));
            }
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
            tracing::error!("💡 Recovery suggestion: {}", e.recovery_suggestion());

            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 {}", e.recovery_suggestion());

            std::process::exit(e.exit_code());
        }
    }

    Ok(())
}
