use std::path::PathBuf;
use std::process;

use anyhow::Result;
use badger::resolve::{
    HttpClient, NameServiceResolver, ResolveError, SchemeRegistry, UreqClient,
};
use badger::{BadgeError, Badger, ErrorKind, HttpConfig, NameServiceConfig};
use clap::{Args, Parser, Subcommand};

mod commands;
mod conf;

use commands::KeySource;
use conf::NamecoinConf;

/// Status for failures that are not Badger errors (bad arguments, stdin).
const EXIT_USAGE: i32 = 64;

/// Badger: signed identity badges.
///
/// Keys are derived from a password or passed as base64. Badges are verified
/// against the key published under their locator (`nmc:`, `id:`, `http(s):`).
#[derive(Parser, Debug)]
#[command(name = "badger", version, about, long_about = None)]
struct Cli {
    /// Name service JSON-RPC URL (overrides the config file)
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Name service RPC user (overrides the config file)
    #[arg(long, global = true)]
    rpc_user: Option<String>,

    /// Name service RPC password (overrides the config file)
    #[arg(long, global = true)]
    rpc_password: Option<String>,

    /// Namecoin config file [default: ~/.namecoin/bitcoin.conf]
    #[arg(long, global = true)]
    conf: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value = "30")]
    timeout: u64,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args, Debug)]
struct KeyArgs {
    /// Password to derive the key from (read from stdin if omitted)
    #[arg(short, long, conflicts_with = "key")]
    pass: Option<String>,

    /// Base64 private key
    #[arg(short, long)]
    key: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Derive a key from a password and print the base64 private key
    Key {
        /// Password (read from stdin if omitted)
        #[arg(short, long)]
        pass: Option<String>,
    },

    /// Print the identity record to publish for a key
    Record {
        #[command(flatten)]
        key: KeyArgs,
    },

    /// Sign a base64 token and print the badge JSON
    Badge {
        /// Locator of the signer, e.g. nmc:alice
        id: String,

        /// Base64 token to sign
        token: String,

        #[command(flatten)]
        key: KeyArgs,
    },

    /// Verify a badge JSON document ("-" reads stdin)
    Verify {
        badge: String,
    },
}

fn init_tracing(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = if verbose {
        EnvFilter::new("badger=debug,badger_core=debug,badger_resolve=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

/// Name service endpoint: the config file, then command-line overrides.
fn endpoint(
    conf: Option<&PathBuf>,
    url: Option<&str>,
    user: Option<&str>,
    password: Option<&str>,
) -> Result<NameServiceConfig, conf::ConfError> {
    let path = conf.cloned().unwrap_or_else(NamecoinConf::default_path);
    let file = NamecoinConf::load(&path)?;

    let user = user.map(str::to_owned).or(file.rpcuser.clone());
    let password = password.map(str::to_owned).or(file.rpcpassword.clone());
    let mut config = file.into_config();
    if let Some(url) = url {
        config.url = url.to_owned();
    }
    Ok(match user {
        Some(user) => config.with_credentials(user, password),
        None => config,
    })
}

/// Engine with the built-in schemes. The config file is only read when a
/// `nmc:` or `id:` locator is first resolved.
fn engine(cli: &Cli) -> Badger {
    let http = HttpConfig {
        timeout: std::time::Duration::from_secs(cli.timeout),
        ..HttpConfig::default()
    };
    let client: std::sync::Arc<dyn HttpClient> = std::sync::Arc::new(UreqClient::new(&http));

    let conf = cli.conf.clone();
    let url = cli.rpc_url.clone();
    let user = cli.rpc_user.clone();
    let password = cli.rpc_password.clone();
    let name_service = NameServiceResolver::deferred(client.clone(), move || {
        endpoint(
            conf.as_ref(),
            url.as_deref(),
            user.as_deref(),
            password.as_deref(),
        )
        .map_err(|e| ResolveError::Config(e.to_string()))
    });

    Badger::with_registry(SchemeRegistry::with_defaults(client, name_service))
}

/// The Badger error kind behind `err`, if any.
pub(crate) fn error_kind(err: &anyhow::Error) -> Option<ErrorKind> {
    err.chain().find_map(|cause| {
        if let Some(e) = cause.downcast_ref::<badger::Error>() {
            Some(e.kind())
        } else if let Some(e) = cause.downcast_ref::<ResolveError>() {
            Some(e.kind())
        } else if let Some(e) = cause.downcast_ref::<BadgeError>() {
            Some(e.kind())
        } else {
            cause
                .downcast_ref::<conf::ConfError>()
                .map(|_| ErrorKind::ConfigError)
        }
    })
}

fn run(cli: Cli) -> Result<i32> {
    match &cli.command {
        Commands::Key { pass } => {
            let source = KeySource::from_args(pass.clone(), None)?;
            println!("{}", commands::key(&source)?);
        }
        Commands::Record { key } => {
            let source = KeySource::from_args(key.pass.clone(), key.key.clone())?;
            println!("{}", commands::record(&source)?);
        }
        Commands::Badge { id, token, key } => {
            let source = KeySource::from_args(key.pass.clone(), key.key.clone())?;
            println!("{}", commands::badge(&engine(&cli), id, token, &source)?);
        }
        Commands::Verify { badge } => {
            if commands::verify(&engine(&cli), badge)? {
                println!("Verified");
            } else {
                println!("Not verified");
                return Ok(1);
            }
        }
    }
    Ok(0)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => process::exit(code),
        Err(e) => {
            let kind = error_kind(&e);
            match kind {
                Some(kind) => eprintln!("badger: {}: {:#}", kind, e),
                None => eprintln!("badger: {:#}", e),
            }
            process::exit(kind.map_or(EXIT_USAGE, ErrorKind::exit_code));
        }
    }
}
