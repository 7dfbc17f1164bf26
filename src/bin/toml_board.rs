use clap::Parser;
use trivia_board::app::{self, LoopOptions};
use trivia_board::core::ConfigProvider;
use trivia_board::utils::{logger, validation::Validate};
use trivia_board::{BoardLoader, JServiceClient, TomlConfig};

#[derive(Parser)]
#[command(name = "toml-board")]
#[command(about = "Trivia board with TOML configuration support")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long, default_value = "trivia-board.toml")]
    config: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,

    /// Override the seed from config
    #[arg(long)]
    seed: Option<u64>,

    /// Print the board as JSON render instructions
    #[arg(long)]
    json: bool,

    /// Show what would be loaded without contacting the trivia service
    #[arg(long)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // 載入 TOML 配置
    let mut config = match TomlConfig::from_file(&args.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Failed to load config file '{}': {}", args.config, e);
            eprintln!("💡 Make sure the file exists and is valid TOML format");
            std::process::exit(1);
        }
    };

    // 初始化日誌
    logger::init(args.verbose || config.verbose(), config.json_logs());
    tracing::info!("📁 Loaded configuration from: {}", args.config);

    // 應用命令列覆蓋設定
    if let Some(seed) = args.seed {
        config.game.seed = Some(seed);
        tracing::info!("🔧 Seed overridden to: {}", seed);
    }

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    display_config_summary(&config, &args);

    if args.dry_run {
        perform_dry_run(&config);
        return Ok(());
    }

    let source = JServiceClient::from_config(&config)?;
    let loader = BoardLoader::new(source, config);
    let options = LoopOptions {
        json: args.json,
        ..LoopOptions::default()
    };

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();
    app::run(&loader, stdin, &mut stdout, options).await?;

    Ok(())
}

fn display_config_summary(config: &TomlConfig, args: &Args) {
    println!("📋 Configuration Summary:");
    println!("  Source: {}", config.api_endpoint());
    println!(
        "  Board: {} categories x {} clues ({:?} selection)",
        config.category_count(),
        config.clues_per_category(),
        config.clue_selection()
    );
    if let Some(seed) = config.seed() {
        println!("  Seed: {}", seed);
    }

    if args.dry_run {
        println!("  🔍 DRY RUN MODE ENABLED");
    }

    println!();
}

fn perform_dry_run(config: &TomlConfig) {
    println!("🔍 Dry Run Analysis:");
    println!();

    // 分類池分析
    let pages_needed = config.pool_minimum().div_ceil(config.page_size());
    println!("📡 Category Pool:");
    println!(
        "  Pages: {} x {} categories (minimum pool {})",
        pages_needed,
        config.page_size(),
        config.pool_minimum()
    );
    println!("  Page limit: {}", config.max_page_fetches());
    if pages_needed > config.max_page_fetches() {
        println!("  ⚠️ Page limit reached before pool minimum; pool will be smaller");
    }

    println!();
    println!("🌐 Requests per game:");
    println!(
        "  {} listing + {} category requests, timeout {}s each",
        pages_needed.min(config.max_page_fetches()),
        config.category_count(),
        config.request_timeout_secs()
    );

    println!();
    println!("✅ Dry run analysis complete. Use --verbose for more details during actual run.");
}
