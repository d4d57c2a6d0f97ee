//! Command-line parsing.
//!
//! Arguments are parsed once with clap and turned into a [`Config`];
//! nothing downstream looks at the raw arguments or the environment.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(name = "ecseal", version, about = "ECIES over secp256k1 with PEM keys")]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Encrypt a payload to a public key; prints base64 ciphertext
    Encrypt {
        /// Recipient public key (PEM)
        #[arg(long)]
        key: PathBuf,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Decrypt a base64 ciphertext; writes the raw plaintext
    Decrypt {
        /// Recipient private key (PEM)
        #[arg(long)]
        key: PathBuf,

        #[command(flatten)]
        payload: PayloadArgs,
    },

    /// Generate a key pair as PREFIX.pem and PREFIX.pub.pem
    Keygen {
        /// Output path prefix
        #[arg(long)]
        out: PathBuf,
    },

    /// Print the public key of a private key file as PEM
    Pubkey {
        /// Private key (PEM)
        #[arg(long)]
        key: PathBuf,
    },

    /// Print the canonical base64 encoding of a key file
    Export {
        /// Private or public key (PEM)
        #[arg(long)]
        key: PathBuf,
    },
}

/// Where the payload comes from. Stdin when neither flag is given.
#[derive(Args, Debug, Default)]
#[group(multiple = false)]
pub struct PayloadArgs {
    /// Payload given inline
    #[arg(long)]
    pub text: Option<String>,

    /// Read the payload from a file
    #[arg(long)]
    pub input: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl From<PayloadArgs> for Payload {
    fn from(args: PayloadArgs) -> Self {
        match (args.text, args.input) {
            (Some(text), _) => Payload::Text(text),
            (None, Some(path)) => Payload::File(path),
            (None, None) => Payload::Stdin,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Encrypt { key: PathBuf, payload: Payload },
    Decrypt { key: PathBuf, payload: Payload },
    Keygen { prefix: PathBuf },
    Pubkey { key: PathBuf },
    Export { key: PathBuf },
}

/// Everything one invocation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub verbosity: u8,
    pub mode: Mode,
}

impl Config {
    /// Default log filter when `RUST_LOG` is unset.
    pub fn log_level(&self) -> LevelFilter {
        match self.verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        let mode = match cli.command {
            Command::Encrypt { key, payload } => Mode::Encrypt {
                key,
                payload: payload.into(),
            },
            Command::Decrypt { key, payload } => Mode::Decrypt {
                key,
                payload: payload.into(),
            },
            Command::Keygen { out } => Mode::Keygen { prefix: out },
            Command::Pubkey { key } => Mode::Pubkey { key },
            Command::Export { key } => Mode::Export { key },
        };
        Config {
            verbosity: cli.verbose,
            mode,
        }
    }
}
