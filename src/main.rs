use anyhow::Result;
use pilates_faq::config::AppConfig;
use pilates_faq::infrastructure::logger::{self, LogConfig};
use pilates_faq::Launcher;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cfg = AppConfig::from_env()?;
    logger::init(LogConfig::with_format(cfg.log_format));

    Launcher::with_config(cfg).launch().await?;
    Ok(())
}
