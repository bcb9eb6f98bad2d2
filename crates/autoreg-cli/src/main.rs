mod report;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, bail};
use autoreg_core::{Role, RolePayload, UserProfile};
use autoreg_reconciler::{CheckFailurePolicy, Reconciler};
use autoreg_store::{FileStore, is_registered, load_profile, save_profile};
use autoreg_sync::{EndpointTable, Endpoints, HttpBackend};
use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing::Level;

/// Register the cached citizen profile with a program's backend.
#[derive(Parser, Debug)]
#[command(name = "autoreg", version)]
struct Cli {
    /// Path of the local profile store.
    #[arg(long, env = "AUTOREG_STORE", default_value = "autoreg-store.json", global = true)]
    store: PathBuf,

    /// Log at debug level.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Check the role's backend and register the profile if it is missing.
    Reconcile(ReconcileArgs),
    /// Read or write the cached user profile.
    #[command(subcommand)]
    Profile(ProfileCommand),
    /// Print the registration payload a role would receive, without sending it.
    Payload {
        #[arg(long, default_value = "expo")]
        role: String,
    },
    /// Show the local "registered" flags.
    Status {
        #[arg(long)]
        role: Option<String>,
    },
}

#[derive(Args, Debug)]
struct ReconcileArgs {
    /// expo, ypc, or ambassador. Unknown names fall back to expo.
    #[arg(long, default_value = "expo")]
    role: String,

    #[arg(long, value_enum, default_value_t = CheckFailureArg::AssumeAbsent)]
    on_check_failure: CheckFailureArg,

    /// Override the role's existence-check URL.
    #[arg(long, env = "AUTOREG_CHECK_URL")]
    check_url: Option<String>,

    /// Override the role's registration URL.
    #[arg(long, env = "AUTOREG_REGISTER_URL")]
    register_url: Option<String>,

    /// Per-request timeout. Defaults to the HTTP client's own.
    #[arg(long)]
    timeout_secs: Option<u64>,
}

#[derive(Subcommand, Debug)]
enum ProfileCommand {
    /// Write the cached profile.
    Set {
        #[arg(long)]
        name: String,
        #[arg(long)]
        cnic: String,
        #[arg(long, default_value = "")]
        contact: String,
        #[arg(long, default_value = "")]
        email: String,
        /// District name with its numeric id appended, e.g. "Lahore4".
        #[arg(long, default_value = "")]
        district: String,
    },
    /// Print the cached profile.
    Show,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum CheckFailureArg {
    AssumeAbsent,
    Abort,
}

impl From<CheckFailureArg> for CheckFailurePolicy {
    fn from(arg: CheckFailureArg) -> Self {
        match arg {
            CheckFailureArg::AssumeAbsent => CheckFailurePolicy::AssumeAbsent,
            CheckFailureArg::Abort => CheckFailurePolicy::Abort,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    tracing::debug!("autoreg v{}", env!("CARGO_PKG_VERSION"));

    let store = Arc::new(
        FileStore::open(cli.store.clone())
            .with_context(|| format!("opening store {}", cli.store.display()))?,
    );

    match cli.command {
        Command::Reconcile(args) => reconcile(store, args).await,
        Command::Profile(cmd) => profile(&store, cmd).map(|()| ExitCode::SUCCESS),
        Command::Payload { role } => payload(&store, &role).map(|()| ExitCode::SUCCESS),
        Command::Status { role } => status(&store, role.as_deref()).map(|()| ExitCode::SUCCESS),
    }
}

fn init_tracing(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

async fn reconcile(store: Arc<FileStore>, args: ReconcileArgs) -> anyhow::Result<ExitCode> {
    let role = Role::parse_or_default(&args.role);
    let table = endpoint_table(role, args.check_url, args.register_url);
    let backend = match args.timeout_secs {
        Some(secs) => HttpBackend::with_timeout(table, Duration::from_secs(secs))
            .context("building HTTP client")?,
        None => HttpBackend::new(table),
    };

    let reconciler = Reconciler::new(role, store, Arc::new(backend))
        .check_failure_policy(args.on_check_failure.into())
        .on_status_change(move |status| println!("{}", report::status_line(role, status)));

    let outcome = reconciler.run().await?;
    println!("{}", report::outcome_card(&outcome));

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// The default endpoint table with `role`'s URLs replaced where overridden.
fn endpoint_table(role: Role, check: Option<String>, register: Option<String>) -> EndpointTable {
    let table = EndpointTable::default();
    if check.is_none() && register.is_none() {
        return table;
    }
    let current = table.for_role(role).clone();
    let endpoints = Endpoints::new(
        check.unwrap_or(current.check),
        register.unwrap_or(current.register),
    );
    table.with_role(role, endpoints)
}

fn profile(store: &FileStore, cmd: ProfileCommand) -> anyhow::Result<()> {
    match cmd {
        ProfileCommand::Set {
            name,
            cnic,
            contact,
            email,
            district,
        } => {
            let profile = UserProfile::new()
                .with("name", name)
                .with("cnic", cnic)
                .with("contact", contact)
                .with("email", email)
                .with("district", district);
            save_profile(store, &profile).context("writing user_profile")?;
            println!("saved profile to {}", store.path().display());
        }
        ProfileCommand::Show => {
            let profile = cached_profile(store)?;
            println!("{}", serde_json::to_string_pretty(&profile)?);
        }
    }
    Ok(())
}

fn payload(store: &FileStore, role: &str) -> anyhow::Result<()> {
    let role = Role::parse_or_default(role);
    let profile = cached_profile(store)?;
    let payload = RolePayload::from_profile(&profile, role);
    if payload.national_id.is_empty() {
        tracing::warn!(%role, "profile has no national id; reconcile would stop here");
    }
    println!("{}", report::payload_json(&payload)?);
    Ok(())
}

fn status(store: &FileStore, role: Option<&str>) -> anyhow::Result<()> {
    let roles = match role {
        Some(name) => vec![Role::parse_or_default(name)],
        None => Role::ALL.to_vec(),
    };
    for role in roles {
        let registered = is_registered(store, role).context("reading registered flag")?;
        println!("{}", report::flag_line(role, registered));
    }
    Ok(())
}

fn cached_profile(store: &FileStore) -> anyhow::Result<UserProfile> {
    match load_profile(store).context("reading user_profile")? {
        Some(profile) => Ok(profile),
        None => bail!(
            "no cached profile in {}; run `autoreg profile set` first",
            store.path().display()
        ),
    }
}
