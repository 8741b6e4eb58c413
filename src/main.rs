#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() {
    pretty_env_logger::init();
    log::info!("logger created");
    let config_path = std::env::args_os()
        .nth(1)
        .map(std::path::PathBuf::from)
        .unwrap_or_else(|| std::path::PathBuf::from("roller.toml"));
    log::info!("using config {}", config_path.display());
    bot_utils::BotManager::new(config_path)
        .run(console_bot::ConsoleBotBuilder::new())
        .await;
}
