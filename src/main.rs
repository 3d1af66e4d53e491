//! ProofPlay Draw Verifier
//!
//! Verifies a game's published draw history, as returned by the
//! `/games/{id}/verify` endpoint, read from a file or stdin.
//!
//! Exit status: 0 all draws verified, 1 verification failed, 2 bad input.

use std::io::{Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{error, info, warn};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use proofplay::{
    ConfigError, GameVerificationData, ReplayVerifier, Validity, VerifierConfig, VERSION,
};

/// Every revealed draw verified.
const EXIT_VERIFIED: u8 = 0;
/// At least one draw failed a check.
const EXIT_FAILED: u8 = 1;
/// Input could not be verified at all.
const EXIT_BAD_INPUT: u8 = 2;

/// Verify a provably fair draw history.
#[derive(Debug, Parser)]
#[command(name = "proofplay-verify", version, about)]
struct Cli {
    /// Verification document (`{"draws": [...]}`). Reads stdin when omitted or `-`.
    input: Option<PathBuf>,

    /// Pool size, overriding PROOFPLAY_POOL_SIZE.
    #[arg(long)]
    pool_size: Option<u32>,

    /// Print the full result as JSON on stdout.
    #[arg(long)]
    json: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .finish();
    if let Err(err) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("failed to set tracing subscriber: {}", err);
    }

    info!("ProofPlay Verifier v{}", VERSION);

    let status = run(
        &cli,
        |var| std::env::var(var).ok(),
        std::io::stdin().lock(),
        std::io::stdout().lock(),
    );
    ExitCode::from(status)
}

/// Run one verification and map the result to an exit status.
fn run<F, R, W>(cli: &Cli, lookup: F, stdin: R, stdout: W) -> u8
where
    F: Fn(&str) -> Option<String>,
    R: Read,
    W: Write,
{
    match verify(cli, lookup, stdin, stdout) {
        Ok(true) => EXIT_VERIFIED,
        Ok(false) => EXIT_FAILED,
        Err(err) => {
            error!("{:#}", err);
            EXIT_BAD_INPUT
        }
    }
}

/// The command line wins over the environment; the environment is only
/// read when no `--pool-size` is given.
fn load_config<F>(cli: &Cli, lookup: F) -> Result<VerifierConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match cli.pool_size {
        Some(pool_size) => VerifierConfig::with_pool_size(pool_size),
        None => VerifierConfig::from_lookup(lookup),
    }
}

fn verify<F, R, W>(cli: &Cli, lookup: F, stdin: R, mut stdout: W) -> Result<bool>
where
    F: Fn(&str) -> Option<String>,
    R: Read,
    W: Write,
{
    let config = load_config(cli, lookup)?;
    let verifier = ReplayVerifier::from_config(&config)?;

    let document = read_input(cli.input.as_deref(), stdin)?;
    let data = GameVerificationData::from_json(&document)
        .context("failed to parse verification document")?;

    if data.draws.is_empty() {
        info!("No draws found.");
    } else {
        info!("Found {} draw(s), pool size {}", data.draws.len(), verifier.pool_size());
    }

    let result = verifier.verify_game(&data.draws)?;

    for outcome in result.failures() {
        match outcome.hash_valid() {
            Validity::Invalid => warn!("Draw #{}: HASH MISMATCH", outcome.sequence),
            _ => warn!(
                "Draw #{}: NUMBER MISMATCH (expected {:?}, got {})",
                outcome.sequence,
                outcome.expected_number(),
                outcome.number
            ),
        }
    }

    if cli.json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&result)?)
            .context("failed to write result")?;
    }

    if result.all_passed() {
        info!("ALL DRAWS VERIFIED");
    } else {
        error!("VERIFICATION FAILED ({} draw(s))", result.failed_count());
    }

    Ok(result.all_passed())
}

/// Read the document from a path, or from `stdin` for `None` / `-`.
fn read_input<R: Read>(path: Option<&Path>, mut stdin: R) -> Result<String> {
    match path {
        Some(path) if path.as_os_str() != "-" => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            stdin
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}
