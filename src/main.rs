use clap::Parser;

use tdtool::api::{ApiClient, DEFAULT_BASE_URL};
use tdtool::credentials::{self, AuthState};
use tdtool::devices::DeviceMethod;
use tdtool::error::TdtoolError;
use tdtool::oauth::{exchange_access_token, request_temporary_token};

#[derive(Parser)]
#[command(
    name = "tdtool",
    version,
    about = "Control Telldus Live devices and sensors from the command line"
)]
struct Cli {
    /// List currently configured devices and sensors
    #[arg(short = 'l', long)]
    list: bool,

    /// Display information from the specified sensor
    #[arg(short = 's', long, value_name = "SENSOR")]
    sensor: Option<String>,

    /// Turn on a device by id
    #[arg(short = 'n', long, value_name = "DEVICE")]
    on: Option<String>,

    /// Turn off a device by id
    #[arg(short = 'f', long, value_name = "DEVICE")]
    off: Option<String>,

    /// Dim a device by id (requires --dimlevel)
    #[arg(short = 'd', long, value_name = "DEVICE", requires = "dimlevel")]
    dim: Option<String>,

    /// Dim level, 0-255
    #[arg(short = 'v', long, value_name = "LEVEL")]
    dimlevel: Option<u8>,

    /// Send a bell command to a device by id
    #[arg(short = 'b', long, value_name = "DEVICE")]
    bell: Option<String>,

    /// Send an up command to a device by id
    #[arg(long, value_name = "DEVICE")]
    up: Option<String>,

    /// Send a down command to a device by id
    #[arg(long, value_name = "DEVICE")]
    down: Option<String>,

    /// Complete a pending authorization handshake
    #[arg(long, hide = true)]
    authenticate: bool,

    /// Override the API host
    #[arg(long, env = "TDTOOL_API_URL", hide = true, default_value = DEFAULT_BASE_URL)]
    api_url: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_env("TDTOOL_LOG_LEVEL")
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), TdtoolError> {
    let mut creds = credentials::load()?;

    if cli.authenticate {
        exchange_access_token(&cli.api_url, &mut creds).await?;
        credentials::save(&creds)?;
        println!("Authentication successful, you can now use tdtool");
        return Ok(());
    }

    if creds.auth_state() != AuthState::Authenticated {
        return start_authorization(&cli.api_url, &mut creds).await;
    }

    let client = ApiClient::with_base_url(creds, &cli.api_url);

    if cli.list {
        tdtool::cli::list::run_list(&client).await?;
    }
    if let Some(ref sensor_id) = cli.sensor {
        tdtool::cli::sensor::run_sensor(&client, sensor_id).await?;
    }
    if let Some(ref id) = cli.on {
        tdtool::cli::device::run_device_action(&client, id, DeviceMethod::TurnOn, None).await?;
    }
    if let Some(ref id) = cli.off {
        tdtool::cli::device::run_device_action(&client, id, DeviceMethod::TurnOff, None).await?;
    }
    if let Some(ref id) = cli.bell {
        tdtool::cli::device::run_device_action(&client, id, DeviceMethod::Bell, None).await?;
    }
    if let Some(ref id) = cli.dim {
        tdtool::cli::device::run_device_action(&client, id, DeviceMethod::Dim, cli.dimlevel)
            .await?;
    }
    if let Some(ref id) = cli.up {
        tdtool::cli::device::run_device_action(&client, id, DeviceMethod::Up, None).await?;
    }
    if let Some(ref id) = cli.down {
        tdtool::cli::device::run_device_action(&client, id, DeviceMethod::Down, None).await?;
    }

    Ok(())
}

/// First run: obtain a temporary token and point the user at the consent
/// page. The exchange happens on the next run with `--authenticate`.
async fn start_authorization(
    base_url: &str,
    creds: &mut tdtool::Credentials,
) -> Result<(), TdtoolError> {
    let consent_url = request_temporary_token(base_url, creds).await?;
    credentials::save(creds)?;

    if webbrowser::open(&consent_url).is_err() {
        tracing::debug!("could not open a browser for the consent page");
    }
    println!("Open the following url in your webbrowser:\n{consent_url}\n");
    println!("After logging in and accepting to use this application run:\ntdtool --authenticate");
    Ok(())
}
