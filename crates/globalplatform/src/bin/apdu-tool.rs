//! Command-line tool for inspecting APDU and BER-TLV data
//!
//! Decodes status words, class bytes, privileges and TLV structures, and
//! serializes commands, without needing a card reader.

use apdu_bertlv::{Object, TlvReader};
use apdu_core::{Command, GlobalPlatformClass, StatusWord};
use apdu_globalplatform::Privileges;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Log at debug level unless RUST_LOG says otherwise
    #[arg(short, long)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a status word (hex, e.g. 6A82)
    Status {
        /// SW1 SW2 in hex
        sw: String,
    },

    /// Serialize a command
    Command {
        /// Class byte (hex)
        #[arg(long, default_value = "00")]
        cla: String,

        /// Instruction byte (hex)
        #[arg(long)]
        ins: String,

        /// First parameter (hex)
        #[arg(long, default_value = "00")]
        p1: String,

        /// Second parameter (hex)
        #[arg(long, default_value = "00")]
        p2: String,

        /// Command data (hex)
        #[arg(short, long)]
        data: Option<String>,

        /// Expected response length
        #[arg(long, default_value_t = 0)]
        le: u16,

        /// Expect response data even with an Le of 0
        #[arg(short, long)]
        expect_response: bool,
    },

    /// Dump BER-TLV objects
    Tlv {
        /// Encoded objects (hex)
        data: String,
    },

    /// Decode a class byte
    Class {
        /// Class byte (hex)
        cla: String,
    },

    /// Decode GlobalPlatform privileges
    Privileges {
        /// One or three privilege bytes (hex)
        bytes: String,
    },
}

fn parse_hex(input: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(input.replace([' ', ':'], ""))
}

fn parse_byte(input: &str) -> Result<u8, Box<dyn std::error::Error>> {
    match *parse_hex(input)? {
        [byte] => Ok(byte),
        _ => Err(format!("expected a single byte, got {input:?}").into()),
    }
}

fn dump_tlv(data: &[u8], depth: usize) -> Result<(), Box<dyn std::error::Error>> {
    for object in TlvReader::from_slice(data) {
        let Object { tag, length, value } = object?;
        let indent = "  ".repeat(depth);
        let tag_hex = hex::encode_upper(tag.to_bytes());
        if tag.constructed {
            println!("{indent}{tag_hex} ({tag}), {length} bytes");
            dump_tlv(&value, depth + 1)?;
        } else {
            println!(
                "{indent}{tag_hex} ({tag}), {length} bytes: {}",
                hex::encode_upper(&value)
            );
        }
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"))
    } else {
        EnvFilter::from_default_env()
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(true)
        .init();

    match cli.command {
        Commands::Status { sw } => {
            let bytes = parse_hex(&sw)?;
            let [sw1, sw2] = <[u8; 2]>::try_from(bytes.as_slice())
                .map_err(|_| format!("expected two status bytes, got {}", bytes.len()))?;
            let status = StatusWord::new(sw1, sw2).identify();
            println!("{status}");
            println!("Category: {}", status.category());
            if let Some(error) = status.into_error() {
                println!("Error: {error}");
            }
        }

        Commands::Command {
            cla,
            ins,
            p1,
            p2,
            data,
            le,
            expect_response,
        } => {
            let mut command =
                Command::new(parse_byte(&cla)?, parse_byte(&ins)?, parse_byte(&p1)?, parse_byte(&p2)?)
                    .with_le(le);
            if let Some(data) = data {
                command = command.with_data(parse_hex(&data)?);
            }
            if expect_response {
                command = command.expecting_response();
            }
            let bytes = command.try_to_bytes()?;
            println!("{}", hex::encode_upper(&bytes));
            if command.uses_extended_length() {
                println!("Extended length, {} bytes", bytes.len());
            }
        }

        Commands::Tlv { data } => dump_tlv(&parse_hex(&data)?, 0)?,

        Commands::Class { cla } => {
            let class = GlobalPlatformClass::from_byte(parse_byte(&cla)?)?;
            let interindustry = class.interindustry;
            println!("Logical channel: {}", interindustry.normalized_channel());
            println!("Secure messaging: {:?}", interindustry.sm_indication());
            println!("Last command of chain: {}", interindustry.is_last_command());
            println!("GlobalPlatform proprietary: {}", class.proprietary);
        }

        Commands::Privileges { bytes } => {
            let privileges = Privileges::from_slice(&parse_hex(&bytes)?)?;
            if privileges.is_empty() {
                println!("No privileges");
            }
            for (name, _) in privileges.iter_names() {
                println!("{name}");
            }
            println!("Encoded: {}", hex::encode_upper(privileges.to_bytes()));
        }
    }

    Ok(())
}
