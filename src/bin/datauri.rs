//! datauri CLI
//!
//! Encode files as `data:` URIs and decode them back.

use anyhow::{Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use datauri::{Charset, DataUri, Parser, Serializer};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(ClapParser, Debug)]
#[command(name = "datauri")]
#[command(version)]
#[command(about = "RFC 2397 data: URI tool")]
struct Cli {
    /// Verbose output on stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Encode a file as a data URI
    Encode {
        /// File to encode (default: stdin)
        input: Option<PathBuf>,

        /// MIME type of the payload
        #[arg(short, long, default_value = "application/octet-stream")]
        mime: String,

        /// Charset to declare in the header
        #[arg(short, long)]
        charset: Option<String>,

        /// Filename to declare in the header
        #[arg(short, long)]
        filename: Option<String>,

        /// Content-disposition to declare in the header
        #[arg(short, long)]
        disposition: Option<String>,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Decode a data URI and write its payload
    Decode {
        /// URI to decode (default: read from --input or stdin)
        uri: Option<String>,

        /// File holding the URI
        #[arg(short, long, conflicts_with = "uri")]
        input: Option<PathBuf>,

        /// Charset used for percent-escapes and text payloads
        #[arg(short, long, default_value = "utf-8")]
        charset: String,

        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Show the header fields of a data URI
    Info {
        /// URI to inspect (default: read from --input or stdin)
        uri: Option<String>,

        /// File holding the URI
        #[arg(short, long, conflicts_with = "uri")]
        input: Option<PathBuf>,

        /// Charset used for percent-escapes and text payloads
        #[arg(short, long, default_value = "utf-8")]
        charset: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Encode { input, mime, charset, filename, disposition, output } => {
            encode(input, mime, charset, filename, disposition, output, cli.verbose)?;
        }
        Commands::Decode { uri, input, charset, output } => {
            decode(uri, input, &charset, output, cli.verbose)?;
        }
        Commands::Info { uri, input, charset } => {
            info(uri, input, &charset)?;
        }
    }

    Ok(())
}

fn encode(
    input: Option<PathBuf>,
    mime: String,
    charset: Option<String>,
    filename: Option<String>,
    disposition: Option<String>,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let data = if let Some(input_path) = &input {
        fs::read(input_path)
            .with_context(|| format!("Failed to read: {}", input_path.display()))?
    } else {
        let mut buffer = Vec::new();
        io::stdin().read_to_end(&mut buffer)?;
        buffer
    };

    let charset = charset.as_deref().map(Charset::for_label).transpose()?;
    let size = data.len();
    let uri = DataUri::with_details(mime, charset, filename, disposition, data)?;

    let serializer = Serializer::new();
    if let Some(output_path) = output {
        serializer
            .serialize_to_file(&uri, &output_path)
            .with_context(|| format!("Failed to write: {}", output_path.display()))?;

        if verbose {
            eprintln!("Encoded {} bytes into {}", size, output_path.display());
        }
    } else {
        println!("{}", uri);
    }

    Ok(())
}

fn decode(
    uri: Option<String>,
    input: Option<PathBuf>,
    charset: &str,
    output: Option<PathBuf>,
    verbose: bool,
) -> Result<()> {
    let uri = read_uri(uri, input, charset)?;

    if verbose {
        eprintln!("Decoded {} ({} bytes)", uri.mime(), uri.data().len());
    }

    if let Some(output_path) = output {
        fs::write(&output_path, uri.data())
            .with_context(|| format!("Failed to write: {}", output_path.display()))?;
    } else {
        io::stdout().write_all(uri.data())?;
    }

    Ok(())
}

fn info(uri: Option<String>, input: Option<PathBuf>, charset: &str) -> Result<()> {
    let uri = read_uri(uri, input, charset)?;

    println!("mime: {}", uri.mime());
    println!("charset: {}", uri.charset().map_or("-", |c| c.name()));
    println!("filename: {}", uri.filename().unwrap_or("-"));
    println!("content-disposition: {}", uri.content_disposition().unwrap_or("-"));
    println!("size: {}", uri.data().len());

    Ok(())
}

fn read_uri(uri: Option<String>, input: Option<PathBuf>, charset: &str) -> Result<DataUri> {
    let text = match (uri, input) {
        (Some(uri), _) => uri,
        (None, Some(input_path)) => fs::read_to_string(&input_path)
            .with_context(|| format!("Failed to read: {}", input_path.display()))?,
        (None, None) => {
            let mut buffer = String::new();
            io::stdin().read_to_string(&mut buffer)?;
            buffer
        }
    };

    let parser = Parser::new().with_default_charset(Charset::for_label(charset)?);
    parser.parse(text.trim()).context("Failed to parse data URI")
}
