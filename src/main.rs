use clap::{Parser, Subcommand};
use std::path::Path;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};

use display_name_plugin::application::errors::ConfigError;
use display_name_plugin::application::messaging::CommandParser;
use display_name_plugin::domain::entities::{CommandArgs, UserProfile};
use display_name_plugin::format_first_name;
use display_name_plugin::infrastructure::adapters::ConsoleHost;
use display_name_plugin::infrastructure::config::Config;
use display_name_plugin::infrastructure::scheduler::TokioScheduler;
use display_name_plugin::plugins::{HookContext, NameFormatPlugin, Plugin, PluginManager};

#[derive(Parser)]
#[command(name = "display-name-plugin")]
#[command(about = "First-name formatting plugin with a local console host", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.yaml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the console host with the plugin loaded
    Run,
    /// Print the formatted version of a first name
    Format {
        name: String,
    },
    /// Show version
    Version,
    /// Generate default config
    InitConfig,
}

fn main() {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_target(false)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run => {
            run_host(&cli.config);
        }
        Commands::Format { name } => {
            println!("{}", format_first_name(&name));
        }
        Commands::Version => {
            println!("display-name-plugin v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::InitConfig => {
            if let Err(e) = init_config(&cli.config) {
                tracing::error!("Failed to write config: {}", e);
                std::process::exit(1);
            }
        }
    }
}

fn init_config(path: &str) -> Result<(), ConfigError> {
    if Path::new(path).exists() {
        return Err(ConfigError::InvalidValue(format!("{} already exists", path)));
    }
    std::fs::write(path, Config::default().to_yaml()?)?;
    println!("Wrote default config to {}", path);
    Ok(())
}

fn run_host(config_path: &str) {
    let from_file = Path::new(config_path).exists();
    let config = if from_file {
        Config::load(config_path)
            .map(Config::with_env)
            .unwrap_or_else(|e| {
                tracing::warn!("Failed to load config: {}, using defaults", e);
                Config::load_env()
            })
    } else {
        Config::load_env()
    };

    tracing::info!("Starting console host: {}", config.server.name);

    let rt = match tokio::runtime::Runtime::new() {
        Ok(rt) => rt,
        Err(e) => {
            tracing::error!("Failed to start runtime: {}", e);
            std::process::exit(1);
        }
    };

    rt.block_on(async {
        let mut host = ConsoleHost::new(&config);
        if from_file {
            host = host.with_config_path(config_path);
        }
        let host = Arc::new(host);

        let scheduler = match TokioScheduler::current() {
            Ok(s) => Arc::new(s),
            Err(e) => {
                tracing::error!("Failed to create scheduler: {}", e);
                return;
            }
        };

        let plugin = Arc::new(NameFormatPlugin::new(host.clone(), scheduler));
        let plugin_id = plugin.manifest().id.clone();

        let mut manager = PluginManager::new();
        if let Err(e) = manager.register(plugin) {
            tracing::error!("Failed to register plugin: {}", e);
            return;
        }
        for (id, e) in manager.activate_all() {
            tracing::error!("Plugin {} was deactivated: {}", id, e);
        }
        for command in host.registered_commands() {
            if let Err(e) = manager.bind_command(&command.trigger, &plugin_id) {
                tracing::warn!("Failed to bind /{}: {}", command.trigger, e);
            }
        }

        run_console(&manager, &host).await;
        manager.deactivate_all();
    });
}

async fn run_console(manager: &PluginManager, host: &ConsoleHost) {
    println!("Console host '{}' ready. Type 'help' for commands.", host.name());
    let parser = CommandParser::default();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                tracing::error!("Failed to read input: {}", e);
                break;
            }
        };

        if !handle_line(line.trim(), &parser, manager, host) {
            break;
        }
    }
}

/// Returns false when the console should stop
fn handle_line(line: &str, parser: &CommandParser, manager: &PluginManager, host: &ConsoleHost) -> bool {
    let ctx = HookContext::new(uuid::Uuid::new_v4().to_string());
    let mut words = line.split_whitespace();

    match words.next() {
        None => {}
        Some("quit") | Some("exit") => return false,
        Some("help") => {
            println!("  login <user_id> [first_name]  fire the login hook");
            println!("  users                         list users");
            println!("  plugins                       list plugins");
            println!("  reload                        reload plugin configuration");
            println!("  /<command> [args]             run a slash command");
            println!("  quit                          stop the host");
        }
        Some("login") => {
            let Some(user_id) = words.next() else {
                println!("Usage: login <user_id> [first_name]");
                return true;
            };
            let first_name = words.collect::<Vec<_>>().join(" ");
            if !first_name.is_empty() {
                let user = host
                    .get_user(user_id)
                    .unwrap_or_else(|| UserProfile::new(user_id))
                    .with_first_name(first_name);
                host.upsert_user(user);
            }

            let Some(mut user) = host.get_user(user_id) else {
                println!("Unknown user: {}", user_id);
                return true;
            };
            let rejection = manager.user_will_log_in(&ctx, &mut user);
            if rejection.is_empty() {
                println!("Logged in {} as '{}'", user.id, user);
            } else {
                println!("Login hook error: {}", rejection);
            }
        }
        Some("users") => {
            for user in host.users() {
                println!("  {} @{} {}", user.id, user.username, user.display_name());
            }
        }
        Some("plugins") => match serde_json::to_string_pretty(&manager.list_plugins()) {
            Ok(json) => println!("{}", json),
            Err(e) => tracing::error!("Failed to render plugins: {}", e),
        },
        Some("reload") => {
            let failures = manager.reload_configuration();
            if failures.is_empty() {
                println!("Configuration reloaded");
            }
            for (id, e) in failures {
                println!("Plugin {} failed to reload: {}", id, e);
            }
        }
        Some(_) if parser.is_command(line) => {
            let args = CommandArgs::new(line)
                .with_user("console-user")
                .with_channel(uuid::Uuid::new_v4().to_string())
                .with_team(uuid::Uuid::new_v4().to_string());

            match manager.execute_command(&ctx, &args) {
                None => println!("Unknown command: {}", line),
                Some(Ok(response)) => println!("[{}] {}", response.response_type.as_str(), response.text),
                Some(Err(e)) => println!("[{}] {}", e.status_code, e),
            }
        }
        Some(other) => println!("Unknown input '{}'. Type 'help'.", other),
    }

    true
}
