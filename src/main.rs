// Module declarations
mod app;
mod avatar;
mod feed;
mod ui;

use app::cli::Args;
use app::config::Config;
use app::constructor::AppConstructor;
use app::{
    App, AppMainLoop,
    terminal::{init_terminal, restore_terminal},
};
use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;

    // Parse command line arguments
    let args = Args::parse();

    // Handle --generate-config option
    if let Some(path) = &args.generate_config {
        let config_path = if path.is_dir() || path.to_str() == Some(".") {
            path.join("config.toml")
        } else {
            path.clone()
        };
        Config::generate_default(config_path)?;
        return Ok(());
    }

    // Determine config path for logging later
    let config_path = match &args.config {
        Some(path) => path.clone(),
        None => Config::default_config_path()?,
    };
    let config_existed = config_path.exists();

    let (mut config, config_warnings) = Config::load(args.config.clone())?;
    args.apply_overrides(&mut config);

    // The handle flushes and stops the logger when dropped, keep it for the whole run
    let _logger = if config.logging.enabled {
        app::logging::ensure_log_directory(&config.logging)?;
        let handle = app::logging::init_logger(&config.logging)?;
        app::logging::log_startup_info(&config.logging);
        app::logging::log_config_loading(&config_path, !config_existed);

        for warning in &config_warnings {
            log::warn!("{}", warning);
        }
        Some(handle)
    } else {
        None
    };

    let (app, channels) = App::new_with_config(config, config_warnings)?;

    let terminal = init_terminal()?;

    // Run application
    let result = app.run(terminal, channels).await;

    app::logging::log_shutdown_info();

    // Restore terminal
    restore_terminal()?;
    result
}
