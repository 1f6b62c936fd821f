use anyhow::Context;
use tracing::info;
use vhub::domain::config::ApiConfig;
use vhub::kernel::config::load_config;
use vhub::kernel::environment;
use vhub_server::Server;

const CONFIG_DIR: &str = "config";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let environment = environment::detect();

    let cfg: ApiConfig = load_config(CONFIG_DIR, environment)
        .context("Critical: Configuration is malformed")?;

    let _log = vhub_server::logger(&cfg.logger).init()?;
    info!("Running in {environment} mode (Auto-detected)");

    Server::builder().config(cfg).environment(environment).build().await?.run().await
}
