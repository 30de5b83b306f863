//! Purpose: Hold top-level CLI command dispatch for `resplice`.
//! Exports: `dispatch_command`.
//! Role: Keep `main.rs` focused on parse/bootstrap and delegate command execution.
//! Invariants: Output files are written only after locate and splice succeed.
//! Invariants: stdout carries exactly one JSON envelope per successful splice.

use super::*;

use std::fs;
use std::path::Path;

use resplice::api::{
    count_occurrences, payload_from_str, replace_nearby_block, replace_tagged_block,
};

/// Fixed conventional output name for the proximity convention when the
/// caller supplies none.
pub(super) const DEFAULT_NEAR_OUTPUT: &str = "report.html";

pub(super) fn dispatch_command(
    command: Command,
    color_mode: ColorMode,
) -> Result<RunOutcome, Error> {
    match command {
        Command::Completion { shell } => {
            let mut cmd = Cli::command();
            clap_complete::aot::generate(shell, &mut cmd, "resplice", &mut io::stdout());
            Ok(RunOutcome::ok())
        }
        Command::Tagged { args, out } => {
            let template = read_text(&args.template, "failed to read template")?;
            let payload = read_payload(&args.data_json)?;
            let updated =
                replace_tagged_block(&template, &args.start_idx, &args.end_idx, &payload)?;
            write_output(&out, &updated)?;
            emit_spliced(&args, "tagged", &out, updated.len());
            Ok(RunOutcome::ok())
        }
        Command::Near { args, out } => {
            let out = out.unwrap_or_else(|| PathBuf::from(DEFAULT_NEAR_OUTPUT));
            let template = read_text(&args.template, "failed to read template")?;
            let payload = read_payload(&args.data_json)?;

            let occurrences = count_occurrences(&template, &args.start_idx);
            if occurrences > 1 {
                emit_notice(&ambiguous_marker_notice(&args, occurrences), color_mode);
            }

            let updated =
                replace_nearby_block(&template, &args.start_idx, &args.end_idx, &payload)?;
            write_output(&out, &updated)?;
            emit_spliced(&args, "near", &out, updated.len());
            Ok(RunOutcome::ok())
        }
    }
}

fn read_text(path: &Path, context: &str) -> Result<String, Error> {
    fs::read_to_string(path).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message(context)
            .with_path(path)
            .with_source(err)
    })
}

fn read_payload(path: &Path) -> Result<Value, Error> {
    let text = read_text(path, "failed to read payload")?;
    payload_from_str(&text).map_err(|err| err.with_path(path))
}

fn write_output(path: &Path, content: &str) -> Result<(), Error> {
    fs::write(path, content).map_err(|err| {
        Error::new(ErrorKind::Io)
            .with_message("failed to write output")
            .with_path(path)
            .with_source(err)
    })
}

fn emit_spliced(args: &SpliceArgs, convention: &str, out: &Path, bytes: usize) {
    let envelope = json!({
        "spliced": {
            "convention": convention,
            "template": args.template.display().to_string(),
            "output": out.display().to_string(),
            "startIdx": args.start_idx,
            "endIdx": args.end_idx,
            "bytes": bytes,
        }
    });
    println!("{envelope}");
}

fn ambiguous_marker_notice(args: &SpliceArgs, occurrences: usize) -> Notice {
    let mut details = Map::new();
    details.insert("startIdx".to_string(), json!(args.start_idx));
    details.insert("occurrences".to_string(), json!(occurrences));

    Notice {
        kind: "ambiguous-marker".to_string(),
        time: notice_time_now().unwrap_or_default(),
        cmd: "near".to_string(),
        template: args.template.display().to_string(),
        message: format!(
            "start marker {:?} occurs {} times in the template; using the first",
            args.start_idx, occurrences
        ),
        details,
    }
}
