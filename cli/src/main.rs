use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use integrator_api::types::{
    CallAction, CreateNewRecordBody, DoActionBody, MakeCallBody, PingBody, SaveRecordBody, SearchBody, ShowWindowBody,
    Window,
};
use integrator_api::{ConfigOverrides, ConnectionState, Event, InitOutcome, IntegratorClient, Response};
use serde::Serialize;
use serde_json::{Map, Value};

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error(transparent)]
    Integrator(#[from] integrator_api::Error),
    #[error("integrator did not register the session: {0}")]
    NotInitialized(String),
    #[error("invalid field `{0}`; expected KEY=VALUE")]
    InvalidField(String),
    #[error("invalid JSON payload: {0}")]
    InvalidJson(#[from] serde_json::Error),
    #[error("failed to listen for ctrl-c: {0}")]
    Signal(std::io::Error),
    #[error("failed to read certificate {}: {source}", path.display())]
    ReadCertificate { path: PathBuf, source: std::io::Error },
}

#[derive(Parser, Debug)]
#[command(name = "integrator", about = "Integrator API and event feed CLI")]
struct Cli {
    /// Use HTTPS on port 10443; `--https false` selects HTTP on 10080.
    #[arg(long, env = "INTEGRATOR_HTTPS", default_value_t = true, action = ArgAction::Set)]
    https: bool,

    /// Display name sent on registration.
    #[arg(long, env = "INTEGRATOR_NAME")]
    name: Option<String>,

    /// Session id (`ApplicationId`); a fresh UUID when absent.
    #[arg(long, env = "INTEGRATOR_ID")]
    id: Option<String>,

    #[arg(long, env = "INTEGRATOR_HOST")]
    host: Option<String>,

    /// Per-request timeout; requests wait indefinitely when absent.
    #[arg(long, env = "INTEGRATOR_TIMEOUT_SECS")]
    timeout_secs: Option<u64>,

    /// Extra PEM root certificate for the service's locally issued TLS certificate.
    #[arg(long, env = "INTEGRATOR_CA_CERT")]
    ca_cert: Option<PathBuf>,

    /// Register the session before running the command.
    #[arg(long, default_value_t = false)]
    register: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Register the session and report whether it was accepted.
    Init,
    Version,
    AddressBooks,
    RecordTypes,
    OwnerContact,
    HookState,
    Answer,
    Unload,
    RecordSuspend,
    RecordResume,
    Search(SearchArgs),
    SearchPeers(SearchArgs),
    MakeCall {
        destination: String,
    },
    ShowWindow {
        #[arg(value_enum)]
        window: WindowArg,
    },
    Ping {
        /// Echo id; defaults to the session id.
        id: Option<String>,
    },
    DoAction {
        action_id: String,
    },
    CreateRecord {
        record_type_id: String,
    },
    SaveRecord {
        record_type_id: String,
        #[arg(value_name = "KEY=VALUE")]
        fields: Vec<String>,
    },
    /// Call-control action on an existing call.
    Control {
        #[arg(value_enum)]
        action: ControlAction,
        call_id: String,
    },
    /// Call any route directly.
    Route(RouteArgs),
    /// Print events from the session's socket until closed or interrupted.
    Events,
}

#[derive(Args, Debug)]
struct SearchArgs {
    query: String,
    #[arg(long)]
    count: Option<u32>,
    #[arg(long)]
    offset: Option<u32>,
    #[arg(long)]
    include_pictures: bool,
    #[arg(long)]
    include_activities: bool,
}

#[derive(Args, Debug)]
struct RouteArgs {
    /// Route name, e.g. `Version` or `MakeCall`.
    route: String,
    /// Send a GET instead of a form-encoded POST.
    #[arg(long, default_value_t = false)]
    get: bool,
    #[arg(value_name = "KEY=VALUE")]
    fields: Vec<String>,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum WindowArg {
    Configuration,
    CallHistory,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ControlAction {
    Hangup,
    Hold,
    Unhold,
    Pickup,
    Deflect,
    SendDtmf,
    TransferComplete,
    TransferConsult,
    TransferCancel,
    TransferBlind,
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt().with_writer(std::io::stderr).init();

    let cli = Cli::parse();
    let root_certificate_pem = cli.ca_cert.as_deref().map(read_certificate).transpose()?;
    let client = IntegratorClient::new(ConfigOverrides {
        https: Some(cli.https),
        name: cli.name,
        id: cli.id,
        host: cli.host,
        timeout: cli.timeout_secs.map(Duration::from_secs),
        root_certificate_pem,
        ..ConfigOverrides::default()
    })?;

    if cli.register && !matches!(cli.command, Command::Init) {
        ensure_initialized(&client).await?;
    }

    match cli.command {
        Command::Init => {
            ensure_initialized(&client).await?;
            println!("initialized as {}", client.config().id);
            Ok(())
        }
        Command::Version => print_response(&client.version().await?),
        Command::AddressBooks => print_response(&client.address_books().await?),
        Command::RecordTypes => print_response(&client.record_types().await?),
        Command::OwnerContact => print_response(&client.owner_contact().await?),
        Command::HookState => print_response(&client.hook_state().await?),
        Command::Answer => print_response(&client.answer().await?),
        Command::Unload => print_response(&client.unload().await?),
        Command::RecordSuspend => print_response(&client.record_suspend().await?),
        Command::RecordResume => print_response(&client.record_resume().await?),
        Command::Search(args) => print_response(&client.search(&search_body(args)).await?),
        Command::SearchPeers(args) => print_response(&client.search_peers(&search_body(args)).await?),
        Command::MakeCall { destination } => print_response(&client.make_call(&MakeCallBody { destination }).await?),
        Command::ShowWindow { window } => {
            let window = match window {
                WindowArg::Configuration => Window::Configuration,
                WindowArg::CallHistory => Window::CallHistory,
            };
            print_response(&client.show_window(&ShowWindowBody { window }).await?)
        }
        Command::Ping { id } => {
            let id = id.unwrap_or_else(|| client.config().id.clone());
            print_response(&client.ping(&PingBody { id }).await?)
        }
        Command::DoAction { action_id } => print_response(&client.do_action(&DoActionBody { action_id }).await?),
        Command::CreateRecord { record_type_id } => {
            print_response(&client.create_new_record(&CreateNewRecordBody { record_type_id }).await?)
        }
        Command::SaveRecord { record_type_id, fields } => {
            let body = SaveRecordBody { record_type_id, fields: parse_fields(&fields)? };
            print_response(&client.save_record(&body).await?)
        }
        Command::Control { action, call_id } => run_control(&client, action, CallAction::new(call_id)).await,
        Command::Route(args) => run_route(&client, args).await,
        Command::Events => run_events(&client).await,
    }
}

async fn ensure_initialized(client: &IntegratorClient) -> Result<(), CliError> {
    match client.init().await {
        InitOutcome::Initialized => Ok(()),
        InitOutcome::NotInitialized(reason) => Err(CliError::NotInitialized(reason.to_string())),
    }
}

async fn run_control(client: &IntegratorClient, action: ControlAction, body: CallAction) -> Result<(), CliError> {
    let response = match action {
        ControlAction::Hangup => client.hangup(&body).await?,
        ControlAction::Hold => client.hold(&body).await?,
        ControlAction::Unhold => client.unhold(&body).await?,
        ControlAction::Pickup => client.pickup(&body).await?,
        ControlAction::Deflect => client.deflect(&body).await?,
        ControlAction::SendDtmf => client.send_dtmf(&body).await?,
        ControlAction::TransferComplete => client.transfer_complete(&body).await?,
        ControlAction::TransferConsult => client.transfer_consult(&body).await?,
        ControlAction::TransferCancel => client.transfer_cancel(&body).await?,
        ControlAction::TransferBlind => client.transfer_blind(&body).await?,
    };
    print_response(&response)
}

async fn run_route(client: &IntegratorClient, args: RouteArgs) -> Result<(), CliError> {
    let response: Response<Value> = if args.get {
        client.get(&args.route).await?
    } else {
        client.post(&args.route, &parse_fields(&args.fields)?).await?
    };
    print_response(&response)
}

async fn run_events(client: &IntegratorClient) -> Result<(), CliError> {
    let mut connection = client.subscribe_events(|event: Event| match serde_json::to_string(&event) {
        Ok(line) => println!("{line}"),
        Err(error) => tracing::warn!(%error, "failed to render event"),
    });
    eprintln!("subscribing to {}", connection.url());

    let interrupted = tokio::select! {
        signal = tokio::signal::ctrl_c() => {
            signal.map_err(CliError::Signal)?;
            true
        }
        _ = connection.wait_for(ConnectionState::Closed) => false,
    };

    if interrupted {
        connection.close().await?;
    } else {
        connection.finished().await?;
    }
    eprintln!("event socket closed");
    Ok(())
}

fn read_certificate(path: &Path) -> Result<Vec<u8>, CliError> {
    std::fs::read(path).map_err(|source| CliError::ReadCertificate { path: path.to_owned(), source })
}

fn search_body(args: SearchArgs) -> SearchBody {
    SearchBody {
        query: args.query,
        count: args.count,
        offset: args.offset,
        include_pictures: Some(args.include_pictures),
        include_activities: Some(args.include_activities),
    }
}

fn parse_fields(fields: &[String]) -> Result<Map<String, Value>, CliError> {
    let mut map = Map::new();
    for field in fields {
        let Some((key, value)) = field.split_once('=') else {
            return Err(CliError::InvalidField(field.clone()));
        };
        if key.is_empty() {
            return Err(CliError::InvalidField(field.clone()));
        }
        map.insert(key.to_owned(), Value::String(value.to_owned()));
    }
    Ok(map)
}

fn print_response<T: Serialize>(response: &Response<T>) -> Result<(), CliError> {
    let rendered = serde_json::to_string_pretty(response)?;
    println!("{rendered}");
    Ok(())
}

#[cfg(test)]
#[path = "main_test.rs"]
mod tests;
