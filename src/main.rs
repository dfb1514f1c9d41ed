use career_navigator::cli::Cli;
use career_navigator::config::NavigatorConfig;
use career_navigator::session::Navigator;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logs go to stderr; stdout carries the rendered plan.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config = NavigatorConfig::from_env()?;
    let navigator = Navigator::connect(&config)?;

    eprintln!("🧭 Career Navigator v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("   Plan service: {}", config.api_url);
    eprintln!("   Grace delay: {}ms", config.grace_delay.as_millis());
    eprintln!("   Request timeout: {}s", config.request_timeout.as_secs());

    match navigator.health().await {
        Ok(health) if health.is_ok() => {
            eprintln!("   Service: {} v{} (ok)", health.agent, health.version)
        }
        Ok(health) => eprintln!("   Service: status {:?}", health.status),
        Err(e) => {
            tracing::warn!(error = %e, "Plan service health check failed");
            eprintln!("   Service: unreachable ({e}); sample and roles fall back to defaults");
        }
    }

    let roles = navigator.bootstrap().await;
    eprintln!("   Roles: {} offered\n", roles.len());

    Cli::new(navigator).run().await
}
