//! CLI entry point - the composition root.
//!
//! The only place where infrastructure is wired together via bootstrap.
//! Command dispatch routes to handlers which delegate to core services.

use clap::Parser;

use assetbay_cli::{bootstrap, handlers, Cli, CliConfig, CliError, Commands};

#[tokio::main]
async fn main() {
    // Load environment variables before anything reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging; --verbose turns on debug-level output
    let level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        let code = err
            .downcast_ref::<CliError>()
            .map_or(1, CliError::exit_code);
        std::process::exit(code);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::with_defaults(cli.api_url)?;
    let ctx = bootstrap(config)?;

    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        Commands::Plans { cycle, all } => {
            handlers::plans::execute(&ctx, cycle, all).await?;
        }
        Commands::Status { asset_id } => {
            handlers::status::execute(&ctx, &asset_id).await?;
        }
        Commands::Download {
            asset_id,
            yes,
            out,
            url_only,
        } => {
            handlers::download::execute(&ctx, &asset_id, yes, out, url_only).await?;
        }
        Commands::Subscribe { plan_id, cycle } => {
            handlers::subscribe::execute(&ctx, &plan_id, cycle).await?;
        }
        Commands::ChangePlan { plan_id, yes } => {
            handlers::change_plan::execute(&ctx, &plan_id, yes).await?;
        }
        Commands::Account => {
            handlers::account::execute(&ctx).await?;
        }
        Commands::Login { token } => {
            handlers::login::execute(&ctx, token).await?;
        }
        Commands::Logout => {
            handlers::logout::execute(&ctx)?;
        }
    }

    Ok(())
}
