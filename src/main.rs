//! Purpose: `resplice` CLI entry point and command dispatch bootstrap.
//! Role: Binary crate root; parses args, runs commands, emits JSON on stdout.
//! Invariants: Success envelopes go to stdout; errors and notices go to stderr.
//! Invariants: Errors on a non-TTY stderr are emitted as JSON envelopes.
//! Invariants: Process exit code is derived from `api::to_exit_code`.
//! Invariants: Output files are written only after locate and splice succeed.
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum, error::ErrorKind as ClapErrorKind};
use clap_complete::aot::Shell;
use serde_json::{Map, Value, json};
use std::error::Error as StdError;

mod command_dispatch;

use command_dispatch::dispatch_command;
use resplice::api::{Error, ErrorKind, to_exit_code};
use resplice::notice::{Notice, notice_json};

#[derive(Copy, Clone, Debug)]
struct RunOutcome {
    exit_code: i32,
}

impl RunOutcome {
    fn ok() -> Self {
        Self { exit_code: 0 }
    }

    fn with_code(exit_code: i32) -> Self {
        Self { exit_code }
    }
}

fn main() {
    let exit_code = match run() {
        Ok(outcome) => outcome.exit_code,
        Err((err, color_mode)) => {
            emit_error(&err, color_mode);
            to_exit_code(err.kind())
        }
    };
    std::process::exit(exit_code);
}

fn run() -> Result<RunOutcome, (Error, ColorMode)> {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => match err.kind() {
            ClapErrorKind::DisplayHelp
            | ClapErrorKind::DisplayVersion
            | ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand => {
                err.print().map_err(|io_err| {
                    (
                        Error::new(ErrorKind::Io)
                            .with_message("failed to write help")
                            .with_source(io_err),
                        ColorMode::Auto,
                    )
                })?;
                let exit_code = if matches!(
                    err.kind(),
                    ClapErrorKind::DisplayHelpOnMissingArgumentOrSubcommand
                ) {
                    2
                } else {
                    0
                };
                return Ok(RunOutcome::with_code(exit_code));
            }
            _ => {
                return Err((
                    Error::new(ErrorKind::Usage).with_message(clap_error_summary(&err)),
                    ColorMode::Auto,
                ));
            }
        },
    };

    let color_mode = cli.color;
    dispatch_command(cli.command, color_mode).map_err(|err| (err, color_mode))
}

#[derive(Parser)]
#[command(
    name = "resplice",
    version,
    about = "Splice JSON payloads into static report templates"
)]
struct Cli {
    #[arg(
        long,
        default_value = "auto",
        value_enum,
        help = "Colorize stderr diagnostics: auto|always|never"
    )]
    color: ColorMode,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Replace a tagged block whose markers are embedded in the literal itself.
    Tagged {
        #[command(flatten)]
        args: SpliceArgs,

        /// Output file path (written in full; existing contents are replaced).
        #[arg(short = 'o', long)]
        out: PathBuf,
    },
    /// Replace a literal located by free-standing markers near it.
    Near {
        #[command(flatten)]
        args: SpliceArgs,

        /// Output file path (defaults to report.html in the current directory).
        #[arg(short = 'o', long)]
        out: Option<PathBuf>,
    },
    /// Generate shell completion scripts.
    Completion {
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args)]
struct SpliceArgs {
    /// Path to the template file.
    #[arg(long)]
    template: PathBuf,

    /// Path to the JSON payload file.
    #[arg(long = "data-json")]
    data_json: PathBuf,

    /// Identifier tagging the start of the target block.
    #[arg(long = "start-idx")]
    start_idx: String,

    /// Identifier tagging the end of the target block.
    #[arg(long = "end-idx")]
    end_idx: String,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum ColorMode {
    Auto,
    Always,
    Never,
}

impl ColorMode {
    fn use_color(self, is_tty: bool) -> bool {
        match self {
            ColorMode::Auto => is_tty,
            ColorMode::Always => true,
            ColorMode::Never => false,
        }
    }
}

#[derive(Copy, Clone, Debug)]
enum AnsiColor {
    Red,
    Yellow,
}

fn colorize_label(label: &str, enabled: bool, color: AnsiColor) -> String {
    if !enabled {
        return label.to_string();
    }
    let code = match color {
        AnsiColor::Red => "31",
        AnsiColor::Yellow => "33",
    };
    format!("\u{1b}[{code}m{label}\u{1b}[0m")
}

fn clap_error_summary(err: &clap::Error) -> String {
    let rendered = err.to_string();
    let first = rendered.lines().next().unwrap_or("invalid arguments");
    first.trim_start_matches("error: ").to_string()
}

fn emit_error(err: &Error, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!("{}", error_text(err, color_mode.use_color(is_tty)));
        return;
    }

    let value = error_json(err);
    let json = serde_json::to_string(&value).unwrap_or_else(|_| {
        "{\"error\":{\"kind\":\"Internal\",\"message\":\"json encode failed\"}}".to_string()
    });
    eprintln!("{json}");
}

fn emit_notice(notice: &Notice, color_mode: ColorMode) {
    let is_tty = io::stderr().is_terminal();
    if is_tty {
        eprintln!(
            "{} {}",
            colorize_label("notice:", color_mode.use_color(is_tty), AnsiColor::Yellow),
            notice.message
        );
        return;
    }

    let value = notice_json(notice);
    let json = serde_json::to_string(&value).unwrap_or_default();
    eprintln!("{json}");
}

fn notice_time_now() -> Option<String> {
    use time::format_description::well_known::Rfc3339;
    let duration = SystemTime::now().duration_since(UNIX_EPOCH).ok()?;
    let ts = time::OffsetDateTime::from_unix_timestamp_nanos(duration.as_nanos() as i128).ok()?;
    ts.format(&Rfc3339).ok()
}

fn error_message(err: &Error) -> String {
    if let Some(message) = err.message() {
        return message.to_string();
    }
    match err.kind() {
        ErrorKind::Internal => "internal error".to_string(),
        ErrorKind::Usage => "usage error".to_string(),
        ErrorKind::InvalidPayload => "invalid JSON payload".to_string(),
        ErrorKind::MarkerResolution => "marker resolution failed".to_string(),
        ErrorKind::Io => "i/o error".to_string(),
    }
}

fn error_causes(err: &Error) -> Vec<String> {
    let mut causes = Vec::new();
    let mut cur = err.source();
    while let Some(source) = cur {
        causes.push(source.to_string());
        cur = source.source();
    }
    causes
}

fn error_json(err: &Error) -> Value {
    let mut inner = Map::new();
    inner.insert("kind".to_string(), json!(format!("{:?}", err.kind())));
    inner.insert("message".to_string(), json!(error_message(err)));
    if let Some(hint) = err.hint() {
        inner.insert("hint".to_string(), json!(hint));
    }
    if let Some(path) = err.path() {
        inner.insert("path".to_string(), json!(path.display().to_string()));
    }
    if let Some(marker) = err.marker() {
        inner.insert("marker".to_string(), json!(marker));
    }
    if let Some(stage) = err.stage() {
        inner.insert("stage".to_string(), json!(stage.as_str()));
    }
    let causes = error_causes(err);
    if !causes.is_empty() {
        inner.insert("causes".to_string(), json!(causes));
    }

    let mut outer = Map::new();
    outer.insert("error".to_string(), Value::Object(inner));
    Value::Object(outer)
}

fn error_text(err: &Error, use_color: bool) -> String {
    let mut lines = Vec::new();
    lines.push(format!(
        "{} {}",
        colorize_label("error:", use_color, AnsiColor::Red),
        error_message(err)
    ));

    if let Some(hint) = err.hint() {
        lines.push(format!(
            "{} {hint}",
            colorize_label("hint:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(marker) = err.marker() {
        lines.push(format!(
            "{} {marker}",
            colorize_label("marker:", use_color, AnsiColor::Yellow)
        ));
    }
    if let Some(stage) = err.stage() {
        lines.push(format!(
            "{} {}",
            colorize_label("stage:", use_color, AnsiColor::Yellow),
            stage.as_str()
        ));
    }
    if let Some(path) = err.path() {
        lines.push(format!(
            "{} {}",
            colorize_label("path:", use_color, AnsiColor::Yellow),
            path.display()
        ));
    }
    for cause in error_causes(err) {
        lines.push(format!(
            "{} {cause}",
            colorize_label("cause:", use_color, AnsiColor::Yellow)
        ));
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::{AnsiColor, ColorMode, colorize_label, error_json, error_text};
    use resplice::api::{Error, ErrorKind, LookupStage};

    #[test]
    fn error_text_respects_color_flag() {
        let err = Error::new(ErrorKind::Usage).with_message("bad input");
        let colored = error_text(&err, true);
        let plain = error_text(&err, false);
        assert!(colored.contains("\u{1b}[31m"));
        assert!(!plain.contains('\u{1b}'));
        assert!(plain.starts_with("error: bad input"));
    }

    #[test]
    fn error_json_carries_marker_context() {
        let err = Error::new(ErrorKind::MarkerResolution)
            .with_message("end marker not found")
            .with_marker("B")
            .with_stage(LookupStage::EndMarker);
        let value = error_json(&err);
        let obj = value.get("error").and_then(|v| v.as_object()).expect("error object");
        assert_eq!(obj.get("kind").and_then(|v| v.as_str()), Some("MarkerResolution"));
        assert_eq!(obj.get("marker").and_then(|v| v.as_str()), Some("B"));
        assert_eq!(obj.get("stage").and_then(|v| v.as_str()), Some("end-marker"));
    }

    #[test]
    fn color_mode_auto_follows_tty() {
        assert!(ColorMode::Auto.use_color(true));
        assert!(!ColorMode::Auto.use_color(false));
        assert!(ColorMode::Always.use_color(false));
        assert!(!ColorMode::Never.use_color(true));
        assert_eq!(colorize_label("x:", false, AnsiColor::Red), "x:");
    }
}
