#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` implements the command-line front-end for the `keyprint` binary. The
//! crate is intentionally small: it recognises two subcommands (`digest` and
//! `fingerprint`) plus `--help`/`-h`, `--version`/`-V`, and a repeatable
//! `--verbose`/`-v` switch, and delegates all hashing to the [`digests`] and
//! [`fingerprint`] library crates. `-v` may precede or follow the subcommand;
//! occurrences given after the subcommand take precedence over those given
//! before it (the two positions are not summed).
//!
//! # Design
//!
//! The crate exposes [`run`] as the primary entry point. The function accepts
//! an iterator of arguments together with handles for standard output and
//! error, so tests can drive the full command surface against in-memory
//! buffers. Internally a [`clap`](https://docs.rs/clap/) command definition
//! performs the parse; `digest` hashes each operand (or standard input) and
//! prints `md5sum`-layout lines, while `fingerprint` reduces a PEM public key
//! to its colon-separated MD5 fingerprint.
//!
//! # Invariants
//!
//! - [`run`] never panics; unexpected I/O failures surface as non-zero exit
//!   codes.
//! - A failing operand in `digest` mode is reported on stderr and does not
//!   abort the remaining operands.
//! - Diagnostics are one line each, prefixed `keyprint: `, and go to stderr;
//!   stdout carries only digests, fingerprints, help, and version output.
//!
//! # Exit codes
//!
//! - `0` — success.
//! - `1` — usage errors and malformed PEM input.
//! - `2` — I/O failures reading operands or writing results.
//!
//! # Examples
//!
//! ```
//! use cli::run;
//!
//! let mut stdout = Vec::new();
//! let mut stderr = Vec::new();
//! let exit_code = run(["keyprint", "--version"], &mut stdout, &mut stderr);
//!
//! assert_eq!(exit_code, 0);
//! assert!(!stdout.is_empty());
//! assert!(stderr.is_empty());
//! ```
//!
//! # See also
//!
//! - [`digests`] for the MD5 engine behind the `digest` subcommand.
//! - [`fingerprint`] for PEM handling behind the `fingerprint` subcommand.
//! - `src/bin/keyprint.rs` for the binary crate that wires [`run`] into
//!   `main`.

use std::ffi::OsString;
use std::fs::File;
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};

use clap::{Arg, ArgAction, Command, builder::OsStringValueParser};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use digests::{Md5, Md5Digest};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Version banner shared by `--version` and the help header.
const VERSION_TEXT: &str = concat!("keyprint ", env!("CARGO_PKG_VERSION"), "\n");

/// Deterministic help text describing the CLI surface supported by this build.
const HELP_TEXT: &str = concat!(
    "keyprint ",
    env!("CARGO_PKG_VERSION"),
    "\n",
    "\n",
    "Usage: keyprint [-h] [-V] [-v]... <COMMAND> [ARG]...\n",
    "\n",
    "Commands:\n",
    "  digest [FILE]...       Print the MD5 digest of each FILE as\n",
    "                         `<hex>  <name>`, one line per operand. With no\n",
    "                         FILE, or when FILE is -, read standard input.\n",
    "  fingerprint [KEYFILE]  Print the colon-separated MD5 fingerprint of a\n",
    "                         PEM-encoded public key. With no KEYFILE, or when\n",
    "                         KEYFILE is -, read standard input.\n",
    "\n",
    "Options:\n",
    "  -h, --help       Show this help message and exit.\n",
    "  -V, --version    Output version information and exit.\n",
    "  -v, --verbose    Increase diagnostic verbosity on stderr (repeatable;\n",
    "                   occurrences after the subcommand take precedence).\n",
);

/// Parsed invocation produced by [`parse_args`].
#[derive(Debug, Default)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    verbosity: u8,
    command: Option<ParsedCommand>,
}

/// Subcommand selected on the command line.
#[derive(Debug)]
enum ParsedCommand {
    /// Hash each operand (or standard input) and print `md5sum`-layout lines.
    Digest { files: Vec<PathBuf> },
    /// Fingerprint a PEM public key read from a file or standard input.
    Fingerprint { keyfile: Option<PathBuf> },
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("keyprint")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .disable_help_subcommand(true)
        .arg_required_else_help(false)
        .arg(
            Arg::new("help")
                .long("help")
                .short('h')
                .global(true)
                .help("Show this help message and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .short('V')
                .help("Output version information and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .global(true)
                .help("Increase diagnostic verbosity on stderr (repeatable).")
                .action(ArgAction::Count),
        )
        .subcommand(
            Command::new("digest")
                .disable_help_flag(true)
                .disable_version_flag(true)
                .about("Print the MD5 digest of each FILE in md5sum layout.")
                .arg(
                    Arg::new("files")
                        .value_name("FILE")
                        .num_args(0..)
                        .value_parser(OsStringValueParser::new())
                        .action(ArgAction::Append),
                ),
        )
        .subcommand(
            Command::new("fingerprint")
                .disable_help_flag(true)
                .disable_version_flag(true)
                .about("Print the colon-separated MD5 fingerprint of a PEM public key.")
                .arg(
                    Arg::new("keyfile")
                        .value_name("KEYFILE")
                        .num_args(0..=1)
                        .value_parser(OsStringValueParser::new()),
                ),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("keyprint"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    let show_help = matches.get_flag("help");
    let show_version = matches.get_flag("version");
    let verbosity = matches.get_count("verbose");

    let command = match matches.remove_subcommand() {
        Some((name, mut sub_matches)) => match name.as_str() {
            "digest" => Some(ParsedCommand::Digest {
                files: sub_matches
                    .remove_many::<OsString>("files")
                    .map(|values| values.map(PathBuf::from).collect())
                    .unwrap_or_default(),
            }),
            "fingerprint" => Some(ParsedCommand::Fingerprint {
                keyfile: sub_matches
                    .remove_one::<OsString>("keyfile")
                    .map(PathBuf::from),
            }),
            _ => None,
        },
        None => None,
    };

    Ok(ParsedArgs {
        show_help,
        show_version,
        verbosity,
        command,
    })
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// The function returns the process exit code that should be used by the
/// caller. On success, `0` is returned; parse failures render the `clap`
/// diagnostic on stderr and return `1`.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: &mut Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write,
{
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, stderr),
        Err(error) => {
            let _ = writeln!(stderr, "keyprint: {error}");
            1
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let ParsedArgs {
        show_help,
        show_version,
        verbosity,
        command,
    } = parsed;

    init_tracing(verbosity);

    if show_help {
        return if stdout.write_all(HELP_TEXT.as_bytes()).is_ok() {
            0
        } else {
            2
        };
    }

    if show_version {
        return if stdout.write_all(VERSION_TEXT.as_bytes()).is_ok() {
            0
        } else {
            2
        };
    }

    match command {
        Some(ParsedCommand::Digest { files }) => run_digest(&files, stdout, stderr),
        Some(ParsedCommand::Fingerprint { keyfile }) => {
            run_fingerprint(keyfile.as_deref(), stdout, stderr)
        }
        None => {
            let _ = writeln!(
                stderr,
                "keyprint: no command given; run `keyprint --help` for usage"
            );
            1
        }
    }
}

/// Hashes every operand in order, reporting failed operands on stderr
/// without aborting the remaining ones.
fn run_digest<Out, Err>(files: &[PathBuf], stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    if files.is_empty() {
        return digest_operand(Path::new("-"), stdout, stderr);
    }

    let mut status = 0;
    for file in files {
        status = status.max(digest_operand(file, stdout, stderr));
    }
    status
}

/// Hashes one operand and prints the `md5sum`-layout result line.
fn digest_operand<Out, Err>(path: &Path, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    match digest_of_operand(path) {
        Ok(digest) => {
            tracing::debug!(operand = %path.display(), digest = %digest, "hashed operand");
            if writeln!(stdout, "{digest}  {}", path.display()).is_ok() {
                0
            } else {
                2
            }
        }
        Err(error) => {
            let _ = writeln!(stderr, "keyprint: {}: {error}", path.display());
            2
        }
    }
}

/// Streams one operand through the digest engine, reading standard input
/// when the operand is `-`.
fn digest_of_operand(path: &Path) -> io::Result<Md5Digest> {
    let mut md5 = Md5::new();
    if is_stdin_operand(path) {
        md5.update_reader(&mut io::stdin().lock())?;
    } else {
        let mut file = File::open(path)?;
        md5.update_reader(&mut file)?;
    }
    Ok(md5.digest())
}

/// Fingerprints a PEM public key from the operand or standard input.
fn run_fingerprint<Out, Err>(keyfile: Option<&Path>, stdout: &mut Out, stderr: &mut Err) -> i32
where
    Out: Write,
    Err: Write,
{
    let operand = keyfile.unwrap_or(Path::new("-"));

    let pem = match read_operand_text(operand) {
        Ok(text) => text,
        Err(error) => {
            let _ = writeln!(stderr, "keyprint: {}: {error}", operand.display());
            return 2;
        }
    };

    match fingerprint::fingerprint_pem(&pem) {
        Ok(print) => {
            tracing::debug!(key = %operand.display(), "fingerprinted public key");
            if writeln!(stdout, "{print}").is_ok() {
                0
            } else {
                2
            }
        }
        Err(error) => {
            let _ = writeln!(stderr, "keyprint: {}: {error}", operand.display());
            1
        }
    }
}

/// Reads an operand into a string, from standard input when the operand
/// is `-`.
fn read_operand_text(path: &Path) -> io::Result<String> {
    let mut text = String::new();
    if is_stdin_operand(path) {
        io::stdin().lock().read_to_string(&mut text)?;
    } else {
        File::open(path)?.read_to_string(&mut text)?;
    }
    Ok(text)
}

/// A bare `-` operand selects standard input, as in `md5sum`.
fn is_stdin_operand(path: &Path) -> bool {
    path.as_os_str() == "-"
}

/// Installs a stderr `tracing` subscriber sized to the `-v` count.
///
/// The counted level is the default directive; `RUST_LOG` directives
/// override it. Repeated initialisation (tests call [`run`] many times in
/// one process) is ignored.
fn init_tracing(verbosity: u8) {
    let Some(level) = verbosity_level(verbosity) else {
        return;
    };
    let filter = EnvFilter::builder()
        .with_default_directive(level.into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();
}

/// Maps the counted `-v` occurrences to a `tracing` level ceiling.
const fn verbosity_level(verbosity: u8) -> Option<LevelFilter> {
    match verbosity {
        0 => None,
        1 => Some(LevelFilter::INFO),
        2 => Some(LevelFilter::DEBUG),
        _ => Some(LevelFilter::TRACE),
    }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    let clamped = status.clamp(0, MAX_EXIT_CODE);
    std::process::ExitCode::from(clamped as u8)
}
