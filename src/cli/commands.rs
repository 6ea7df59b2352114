use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use crate::convert::convert;
use crate::detect::detect;
use crate::models::FormatKind;
use crate::writers::WriteOptions;

#[derive(Parser)]
#[command(name = "sms-convert")]
#[command(version = "0.1.0")]
#[command(about = "Convert SMS backups between mobile archive formats", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Detect a backup file's format and show a summary
    Info {
        /// Backup file to inspect
        file: PathBuf,
    },
    /// Convert a backup file into another format
    Convert {
        /// Source backup file (format is auto-detected)
        input: PathBuf,
        /// Destination file
        output: PathBuf,
        /// Target format
        #[arg(long, value_enum)]
        to: TargetFormat,
        /// Tool name stamped into the generated comment
        #[arg(long)]
        app_name: Option<String>,
        /// Replace the generated comment entirely
        #[arg(long)]
        comment: Option<String>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
pub enum TargetFormat {
    /// "contacts+message backup" XML (Windows Phone)
    Winphone,
    /// "SMS Backup & Restore" XML (Android)
    Android,
}

impl From<TargetFormat> for FormatKind {
    fn from(target: TargetFormat) -> Self {
        match target {
            TargetFormat::Winphone => FormatKind::WinPhone,
            TargetFormat::Android => FormatKind::Android,
        }
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Info { file }) => {
            let summary = detect(&file)
                .with_context(|| format!("Failed to inspect {}", file.display()))?;
            match summary.format {
                Some(format) => {
                    println!("Format: {}", format);
                    println!("Messages: {}", summary.message_count);
                    if !summary.comments.is_empty() {
                        println!("Comments:");
                        for line in summary.comments.lines() {
                            println!("  {}", line.trim());
                        }
                    }
                }
                None => println!("Format: unknown"),
            }
        }
        Some(Commands::Convert { input, output, to, app_name, comment }) => {
            let mut options = WriteOptions::default();
            if let Some(app_name) = app_name {
                options.app_name = app_name;
            }
            options.comment = comment;

            let count = convert(&input, &output, to.into(), &options)
                .with_context(|| format!("Failed to convert {}", input.display()))?;
            println!("Successfully converted {} messages", count);
        }
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
