//! CLI command implementations.

use anyhow::{anyhow, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use keyforge_crypto::hd::create_hd_path;
use keyforge_crypto::{
    priv_key_from_binary, priv_key_from_json, pub_key_from_binary, pub_key_from_json, registry,
    PrivKey, PubKey,
};
use tracing::info;
use zeroize::Zeroizing;

use crate::config::CliConfig;
use crate::output::*;

/// Main CLI.
#[derive(Parser, Debug)]
#[command(name = "keyforge")]
#[command(about = "Derive and inspect HD wallet keys for pluggable signing algorithms")]
#[command(version = env!("CARGO_PKG_VERSION"))]
pub struct Cli {
    /// Log filter, e.g. `debug` or `keyforge_crypto=trace`
    #[arg(long, global = true, env = "KEYFORGE_LOG")]
    pub log_level: Option<String>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    /// Bech32 prefix for addresses
    #[arg(long, global = true, env = "KEYFORGE_HRP")]
    pub hrp: Option<String>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List registered signing algorithms
    Algos,

    /// Derive a key from a mnemonic
    Derive(DeriveArgs),

    /// Decode an encoded key and show its public data
    Inspect(InspectArgs),

    /// Configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

#[derive(Args, Debug)]
pub struct DeriveArgs {
    /// BIP-39 mnemonic
    #[arg(long, env = "KEYFORGE_MNEMONIC", hide_env_values = true, value_parser = parse_secret)]
    pub mnemonic: Zeroizing<String>,

    /// BIP-39 passphrase
    #[arg(
        long,
        env = "KEYFORGE_PASSPHRASE",
        hide_env_values = true,
        default_value = "",
        value_parser = parse_secret
    )]
    pub passphrase: Zeroizing<String>,

    /// Full derivation path, e.g. m/44'/118'/0'/0/0
    #[arg(long, conflicts_with_all = ["coin_type", "account", "index"])]
    pub path: Option<String>,

    /// BIP-44 coin type (defaults to the configured one)
    #[arg(long)]
    pub coin_type: Option<u32>,

    /// BIP-44 account
    #[arg(long, default_value_t = 0)]
    pub account: u32,

    /// BIP-44 address index
    #[arg(long, default_value_t = 0)]
    pub index: u32,

    /// Algorithm name (defaults to the configured one)
    #[arg(long)]
    pub algo: Option<String>,

    /// Also print the private key (WARNING: exposes secret material)
    #[arg(long)]
    pub show_private: bool,

    /// Encoding of the printed private key
    #[arg(long, value_enum, default_value_t = KeyFormat::Hex)]
    pub format: KeyFormat,
}

#[derive(Args, Debug)]
pub struct InspectArgs {
    /// Encoded key
    pub encoded: String,

    /// Algorithm name; required for binary input
    #[arg(long)]
    pub algo: Option<String>,

    /// Encoding of the input
    #[arg(long, value_enum, default_value_t = InspectFormat::BinaryHex)]
    pub format: InspectFormat,

    /// Input is a public key
    #[arg(long)]
    pub public: bool,
}

fn parse_secret(s: &str) -> Result<Zeroizing<String>, std::convert::Infallible> {
    Ok(Zeroizing::new(s.to_string()))
}

/// Private key output encodings.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyFormat {
    /// Hex of the length-prefixed binary form
    Hex,
    /// Typed JSON envelope
    Json,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum InspectFormat {
    BinaryHex,
    Json,
}

/// Config commands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Write a default config file
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

/// Execute a parsed command line.
pub fn execute(cli: Cli, config: &CliConfig) -> anyhow::Result<()> {
    let hrp = cli.hrp.clone().unwrap_or_else(|| config.bech32_hrp.clone());

    match cli.command {
        Commands::Algos => execute_algos(cli.json),
        Commands::Derive(args) => {
            let report = derive_key(&args, config, &hrp)?;
            emit(&report, cli.json)
        }
        Commands::Inspect(args) => {
            let report = inspect_key(&args, &hrp)?;
            emit(&report, cli.json)
        }
        Commands::Config(cmd) => execute_config(cmd, config, cli.json),
    }
}

fn emit(report: &KeyReport, json: bool) -> anyhow::Result<()> {
    if json {
        print_json(report)
    } else {
        print_key_report(report);
        Ok(())
    }
}

fn execute_algos(json: bool) -> anyhow::Result<()> {
    let names = registry::names();
    if json {
        return print_json(&names);
    }
    println!("{}", "Registered algorithms".bold());
    for name in names {
        println!("  {}", name.bright_cyan());
    }
    Ok(())
}

/// Mnemonic to key report, using the registry entry named by `--algo` or the config.
pub fn derive_key(args: &DeriveArgs, config: &CliConfig, hrp: &str) -> anyhow::Result<KeyReport> {
    let algo_name = args.algo.as_deref().unwrap_or(&config.default_algo);
    let algo = registry::resolve(algo_name)?;

    let path = match &args.path {
        Some(path) => path.clone(),
        None => create_hd_path(
            args.coin_type.unwrap_or(config.coin_type),
            args.account,
            args.index,
        )
        .full_path(),
    };

    info!(algorithm = algo_name, path = %path, "deriving key");
    let bytes = algo.derive(&args.mnemonic, &args.passphrase, &path)?;
    let key = algo.generate(&bytes);

    let mut report = public_report(key.pub_key()?.as_ref(), hrp)?;
    report.path = Some(path);
    if args.show_private {
        report.private_key = Some(encode_private(key.as_ref(), args.format)?);
    }
    Ok(report)
}

/// Decode a key and report its public data.
pub fn inspect_key(args: &InspectArgs, hrp: &str) -> anyhow::Result<KeyReport> {
    let expected = match &args.algo {
        Some(name) => Some(registry::resolve(name)?.name()),
        None => None,
    };

    let public: Box<dyn PubKey> = match args.format {
        InspectFormat::BinaryHex => {
            let key_type =
                expected.ok_or_else(|| anyhow!("--algo is required for binary-hex input"))?;
            let bz = Zeroizing::new(hex::decode(args.encoded.trim())?);
            if args.public {
                pub_key_from_binary(key_type, &bz)?
            } else {
                priv_key_from_binary(key_type, &bz)?.pub_key()?
            }
        }
        InspectFormat::Json => {
            let public = if args.public {
                pub_key_from_json(&args.encoded)?
            } else {
                priv_key_from_json(&args.encoded)?.pub_key()?
            };
            if let Some(key_type) = expected {
                if public.key_type() != key_type {
                    bail!(
                        "key is {}, expected {}",
                        public.key_type(),
                        key_type
                    );
                }
            }
            public
        }
    };

    public_report(public.as_ref(), hrp)
}

fn public_report(public: &dyn PubKey, hrp: &str) -> anyhow::Result<KeyReport> {
    let address = public.address();
    Ok(KeyReport {
        algorithm: public.key_type().to_string(),
        path: None,
        address: address.to_bech32(hrp)?,
        address_hex: address.to_hex(),
        public_key: public.to_string(),
        public_key_json: public.to_json()?,
        private_key: None,
    })
}

fn encode_private(key: &dyn PrivKey, format: KeyFormat) -> anyhow::Result<Zeroizing<String>> {
    Ok(Zeroizing::new(match format {
        KeyFormat::Hex => hex::encode(Zeroizing::new(key.to_binary()?).as_slice()),
        KeyFormat::Json => key.to_json()?,
    }))
}

fn execute_config(cmd: ConfigCommands, config: &CliConfig, json: bool) -> anyhow::Result<()> {
    match cmd {
        ConfigCommands::Show => {
            if json {
                return print_json(config);
            }
            println!("{}", "CLI Configuration".bold());
            println!("{}", "=".repeat(50));
            println!("Default algo: {}", config.default_algo.bright_cyan());
            println!("Coin type:    {}", config.coin_type.to_string().bright_green());
            println!("Bech32 HRP:   {}", config.bech32_hrp.bright_yellow());
            println!("Log level:    {}", config.log_level);
            println!("JSON logs:    {}", config.json_logs);
            println!("File:         {:?}", CliConfig::config_path()?);
        }

        ConfigCommands::Init { force } => {
            let path = CliConfig::config_path()?;
            if path.exists() && !force {
                print_warning(&format!("{:?} already exists; use --force to overwrite", path));
                return Ok(());
            }
            CliConfig::default().save_to(&path)?;
            print_success(&format!("Wrote {:?}", path));
        }
    }

    Ok(())
}
