use std::{
    fs,
    path::{Path, PathBuf},
    process::ExitCode,
};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde::Serialize;
use shared::{
    domain::SelectedFile,
    error::{ErrorReport, UiError},
};
use upload_core::{format_file_size, load_settings, UploadPolicy};

#[derive(Parser, Debug)]
struct Cli {
    /// TOML settings file; defaults to `upload_ui.toml` when present.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Checks local files against the upload size and format rules.
    Validate {
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        #[arg(long)]
        json: bool,
    },
    /// Prints a byte count the way the upload form displays it.
    FormatSize { bytes: u64 },
}

#[derive(Debug, Serialize)]
struct FileReport {
    path: String,
    file: SelectedFile,
    size_label: String,
    accepted: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<ErrorReport>,
}

fn inspect(path: &Path, policy: &UploadPolicy) -> Result<FileReport> {
    let metadata =
        fs::metadata(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());
    let mime_type = mime_guess::from_path(path)
        .first_raw()
        .unwrap_or_default()
        .to_string();
    Ok(report_for(
        path.display().to_string(),
        SelectedFile::new(name, metadata.len(), mime_type),
        policy,
    ))
}

fn report_for(path: String, file: SelectedFile, policy: &UploadPolicy) -> FileReport {
    let error = policy
        .validate(&file)
        .map_err(UiError::from)
        .err()
        .map(|err| ErrorReport::from(&err));
    FileReport {
        path,
        size_label: format_file_size(file.size_bytes),
        accepted: error.is_none(),
        file,
        error,
    }
}

fn main() -> Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter("warn")
        .with_writer(std::io::stderr)
        .init();
    let cli = Cli::parse();

    match cli.command {
        Command::Validate { paths, json } => {
            let settings = load_settings(cli.config.as_deref());
            let policy = UploadPolicy::from(&settings);
            let reports = paths
                .iter()
                .map(|path| inspect(path, &policy))
                .collect::<Result<Vec<_>>>()?;

            if json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    let mime = if report.file.mime_type.is_empty() {
                        "unknown"
                    } else {
                        report.file.mime_type.as_str()
                    };
                    match &report.error {
                        None => println!("ok    {} ({}, {mime})", report.path, report.size_label),
                        Some(err) => println!(
                            "error {} ({}, {mime}): {}",
                            report.path, report.size_label, err.message
                        ),
                    }
                }
            }

            if reports.iter().all(|report| report.accepted) {
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }
        Command::FormatSize { bytes } => {
            println!("{}", format_file_size(bytes));
            Ok(ExitCode::SUCCESS)
        }
    }
}

#[cfg(test)]
mod tests {
    use shared::error::ErrorCode;

    use super::*;

    #[test]
    fn rejected_file_reports_code_and_message() {
        let policy = UploadPolicy::default();
        let file = SelectedFile::new("big.mp4", 60 * 1024 * 1024, "video/mp4");

        let report = report_for("big.mp4".to_string(), file, &policy);

        assert!(!report.accepted);
        assert_eq!(report.size_label, "60 MB");
        let error = report.error.expect("error report");
        assert_eq!(error.code, ErrorCode::FileTooLarge);
        assert!(error.message.contains("50MB limit"));
    }

    #[test]
    fn accepted_file_serializes_without_error_field() {
        let file = SelectedFile::new("clip.wmv", 1024, "video/x-ms-wmv");
        let report = report_for("clip.wmv".to_string(), file, &UploadPolicy::default());

        assert!(report.accepted);
        let json = serde_json::to_value(&report).expect("serialize");
        assert!(json.get("error").is_none());
        assert_eq!(json["size_label"], "1 KB");
    }
}
