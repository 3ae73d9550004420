use clap::Parser;
use site_forge::config::LogFormat;
use site_forge::preview::client::ClientState;
use site_forge::preview::host::render_host_page;
use site_forge::utils::error::{ErrorSeverity, GatewayError};
use site_forge::utils::{logger, validation::Validate};
use site_forge::{build_router, Cli, Command, GatewayConfig, GeminiClient, PreviewClient, SiteGateway};
use std::sync::Arc;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = match cli.load_config() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    // 初始化日誌
    match config.logging.format {
        LogFormat::Compact => logger::init_cli_logger(cli.verbose),
        LogFormat::Json => logger::init_json_logger(cli.verbose),
    }

    tracing::info!("Starting site-forge");
    if cli.verbose {
        tracing::debug!("CLI args: {:?}", cli);
    }

    if let Err(e) = config.validate() {
        tracing::error!("❌ Configuration validation failed: {}", e);
        tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
        eprintln!("❌ {}", e.user_friendly_message());
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Serve { .. } => run_server(&config).await,
        Command::Generate { prompt, out } => run_generate(&config, prompt, out).await,
    };

    if let Err(e) = result {
        tracing::error!(
            "❌ site-forge failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = match e.severity() {
            ErrorSeverity::Low => 0,
            ErrorSeverity::Medium => 2,
            ErrorSeverity::High => 1,
            ErrorSeverity::Critical => 3,
        };
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }

    Ok(())
}

fn build_gateway(config: &GatewayConfig) -> Result<SiteGateway<GeminiClient>, GatewayError> {
    let backend = GeminiClient::new(&config.model.endpoint, config.api_key()?)?;
    Ok(SiteGateway::new(backend, config.gateway_settings()))
}

async fn run_server(config: &GatewayConfig) -> Result<(), GatewayError> {
    let gateway = Arc::new(build_gateway(config)?);
    tracing::info!(
        "📁 Serving static files from {} with model {}",
        config.server.static_dir,
        config.model.model
    );

    let router = build_router(gateway, &config.server);
    site_forge::app::serve(&config.bind_address(), router).await
}

async fn run_generate(config: &GatewayConfig, prompt: &str, out: &str) -> Result<(), GatewayError> {
    let gateway = build_gateway(config)?;
    let mut client = PreviewClient::new(gateway);

    tracing::info!("{}", site_forge::preview::client::STATUS_GENERATING);
    let state = client.trigger(prompt).await;
    tracing::info!("Client state: {:?}", state);

    if state != ClientState::Rendered {
        eprintln!("❌ {}", client.status());
        return Err(client
            .take_last_error()
            .unwrap_or(GatewayError::InvalidPrompt));
    }

    let page = render_host_page(prompt, client.status(), client.panels(), client.frame());
    tokio::fs::write(out, page).await?;

    println!("✅ {}", client.status());
    if !client.panels().notes.is_empty() {
        println!("📝 {}", client.panels().notes);
    }
    println!("📁 Preview saved to: {}", out);
    Ok(())
}
