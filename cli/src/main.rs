use clap::{Args, Parser, Subcommand};
use jetpack_rest_api::transport::ReqwestTransport;
use jetpack_rest_api::{ApiError, ClientConfig, JetpackApi, RestApiClient, TransportError};
use serde_json::Value;
use tracing_subscriber::EnvFilter;


#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("transport setup failed: {0}")]
    Transport(#[from] TransportError),
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
}

#[derive(Parser, Debug)]
#[command(name = "jetpack-cli", about = "Jetpack REST API command-line client")]
struct Cli {
    /// API root, e.g. `https://example.com/wp-json/`.
    #[arg(long, env = "JETPACK_API_ROOT")]
    api_root: String,

    /// `X-WP-Nonce` value.
    #[arg(long, env = "JETPACK_API_NONCE", default_value = "")]
    nonce: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    Connection(ConnectionCommand),
    JumpStart {
        /// `activate` or `deactivate`
        action: String,
    },
    Module(ModuleCommand),
    Stats {
        #[arg(long, default_value = "day")]
        range: String,
    },
    Settings(SettingsCommand),
    Site(SiteCommand),
    Plugins(PluginsCommand),
    DismissNotice {
        notice: String,
    },
}

#[derive(Args, Debug)]
struct ConnectionCommand {
    #[command(subcommand)]
    command: ConnectionSubcommand,
}

#[derive(Subcommand, Debug)]
enum ConnectionSubcommand {
    Status,
    Data,
    Url,
    Disconnect,
    UnlinkUser,
}

#[derive(Args, Debug)]
struct ModuleCommand {
    #[command(subcommand)]
    command: ModuleSubcommand,
}

#[derive(Subcommand, Debug)]
enum ModuleSubcommand {
    List,
    Get {
        slug: String,
    },
    Activate {
        slug: String,
    },
    Deactivate {
        slug: String,
    },
    Update {
        slug: String,
        #[arg(long)]
        data: String,
    },
    ProtectCount,
    Vaultpress,
    Akismet,
    AkismetKey {
        /// Check this key instead of the stored one.
        #[arg(long)]
        api_key: Option<String>,
    },
}

#[derive(Args, Debug)]
struct SettingsCommand {
    #[command(subcommand)]
    command: SettingsSubcommand,
}

#[derive(Subcommand, Debug)]
enum SettingsSubcommand {
    Get,
    Update {
        #[arg(long)]
        data: String,
    },
    Set {
        #[arg(long)]
        data: String,
    },
    Reset {
        options_key: String,
    },
}

#[derive(Args, Debug)]
struct SiteCommand {
    #[command(subcommand)]
    command: SiteSubcommand,
}

#[derive(Subcommand, Debug)]
enum SiteSubcommand {
    Data,
    Features,
}

#[derive(Args, Debug)]
struct PluginsCommand {
    #[command(subcommand)]
    command: PluginsSubcommand,
}

#[derive(Subcommand, Debug)]
enum PluginsSubcommand {
    List,
    Updates,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = ClientConfig::new(cli.api_root, cli.nonce);
    tracing::debug!(api_root = %config.api_root, "jetpack cli configured");

    let client = RestApiClient::new(ReqwestTransport::new()?, config);
    let json = run(&client, cli.command).await?;
    print_json(&json)?;
    Ok(())
}

async fn run(api: &impl JetpackApi, command: Command) -> Result<Value, CliError> {
    let json = match command {
        Command::Connection(connection) => match connection.command {
            ConnectionSubcommand::Status => api.fetch_site_connection_status().await?,
            ConnectionSubcommand::Data => api.fetch_user_connection_data().await?,
            ConnectionSubcommand::Url => api.fetch_connect_url().await?,
            ConnectionSubcommand::Disconnect => api.disconnect_site().await?,
            ConnectionSubcommand::UnlinkUser => api.unlink_user().await?,
        },
        Command::JumpStart { action } => api.jump_start(&action).await?,
        Command::Module(module) => run_module(api, module.command).await?,
        Command::Stats { range } => api.fetch_stats_data(&range).await?,
        Command::Settings(settings) => match settings.command {
            SettingsSubcommand::Get => api.fetch_settings().await?,
            SettingsSubcommand::Update { data } => api.update_settings(&parse_json_arg(&data)?).await?,
            SettingsSubcommand::Set { data } => api.update_setting(&parse_json_arg(&data)?).await?,
            SettingsSubcommand::Reset { options_key } => api.reset_options(&options_key).await?,
        },
        Command::Site(site) => match site.command {
            SiteSubcommand::Data => api.fetch_site_data().await?,
            SiteSubcommand::Features => api.fetch_site_features().await?,
        },
        Command::Plugins(plugins) => match plugins.command {
            PluginsSubcommand::List => api.fetch_plugins_data().await?,
            PluginsSubcommand::Updates => api.get_plugin_updates().await?,
        },
        Command::DismissNotice { notice } => api.dismiss_jetpack_notice(&notice).await?,
    };
    Ok(json)
}

async fn run_module(api: &impl JetpackApi, command: ModuleSubcommand) -> Result<Value, CliError> {
    let json = match command {
        ModuleSubcommand::List => api.fetch_modules().await?,
        ModuleSubcommand::Get { slug } => api.fetch_module(&slug).await?,
        ModuleSubcommand::Activate { slug } => api.activate_module(&slug).await?,
        ModuleSubcommand::Deactivate { slug } => api.deactivate_module(&slug).await?,
        ModuleSubcommand::Update { slug, data } => {
            let options = parse_json_arg(&data)?;
            api.update_module_options(&slug, &options).await?
        }
        ModuleSubcommand::ProtectCount => api.get_protect_count().await?,
        ModuleSubcommand::Vaultpress => api.get_vault_press_data().await?,
        ModuleSubcommand::Akismet => api.get_akismet_data().await?,
        ModuleSubcommand::AkismetKey { api_key: None } => api.check_akismet_key().await?,
        ModuleSubcommand::AkismetKey { api_key: Some(key) } => api.check_akismet_key_typed(&key).await?,
    };
    Ok(json)
}

fn parse_json_arg(data: &str) -> Result<Value, CliError> {
    Ok(serde_json::from_str::<Value>(data)?)
}

fn print_json(value: &Value) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(value)?;
    println!("{rendered}");
    Ok(())
}
