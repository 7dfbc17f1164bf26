use clap::Parser;
use trivia_board::app::{self, LoopOptions};
use trivia_board::utils::error::{BoardError, ErrorSeverity};
use trivia_board::utils::{logger, validation::Validate};
use trivia_board::{BoardLoader, CliConfig, JServiceClient};

fn exit_code(e: &BoardError) -> i32 {
    match e.severity() {
        ErrorSeverity::Medium => 2,
        ErrorSeverity::High => 1,
        ErrorSeverity::Critical => 3,
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = CliConfig::parse();

    // 初始化日誌
    logger::init(config.verbose, config.log_json);

    tracing::info!("Starting trivia-board");
    tracing::debug!("CLI config: {:?}", config);

    // 驗證配置
    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(exit_code(&e));
    }

    let options = LoopOptions {
        json: config.json,
        ..LoopOptions::default()
    };

    let source = match JServiceClient::from_config(&config) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            std::process::exit(exit_code(&e));
        }
    };
    let loader = BoardLoader::new(source, config);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let mut stdout = std::io::stdout();

    if let Err(e) = app::run(&loader, stdin, &mut stdout, options).await {
        tracing::error!(
            "❌ Game loop failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 {}", e.recovery_suggestion());
        std::process::exit(exit_code(&e));
    }

    tracing::info!("Goodbye");
    Ok(())
}
