use clap::Parser;
use wayfarer_keys::app;
use wayfarer_keys::domain::ports::ProcessEnv;
use wayfarer_keys::utils::logger;
use wayfarer_keys::CliConfig;

fn main() {
    let config = CliConfig::parse();

    // 初始化日誌
    if config.json {
        logger::init_json_logger();
    } else {
        logger::init_cli_logger(config.verbose);
    }
    tracing::debug!(
        "CLI config: profile={:?}, local_file={}",
        config.profile,
        config.local_file
    );

    let code = app::run(&config, &ProcessEnv, &mut std::io::stdout());
    std::process::exit(code);
}
