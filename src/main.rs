use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use tracing::{Level, info, warn};
use tracing_subscriber::FmtSubscriber;

use viberblast::{
    AdmissionPolicy, ExportFormat, NoticeLevel, PipelineConfig, Summary, UploadSession, export,
    read_upload, suggested_file_name_now,
};

#[derive(Parser)]
#[command(name = "viberblast")]
#[command(author, version, about = "Viber blast CSV uploader", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Normalize an upload and write the blast template
    Process {
        /// CSV with columns: Client, Account No., Debtor Name, Contact No.
        #[arg(short, long)]
        input: PathBuf,

        /// Directory to write the download into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Download format
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,

        /// Contact number admission policy (overrides VIBER_BLAST_ADMISSION)
        #[arg(long, value_enum)]
        policy: Option<AdmissionPolicy>,

        /// Print the diagnostics as JSON
        #[arg(long)]
        json: bool,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Validate an upload and report what would be kept, without writing
    Check {
        /// CSV with columns: Client, Account No., Debtor Name, Contact No.
        #[arg(short, long)]
        input: PathBuf,

        /// Contact number admission policy (overrides VIBER_BLAST_ADMISSION)
        #[arg(long, value_enum)]
        policy: Option<AdmissionPolicy>,

        /// Verbose output
        #[arg(short, long)]
        verbose: bool,
    },

    /// Write the blank template without an upload
    Sample {
        /// Directory to write the download into
        #[arg(short, long, default_value = ".")]
        output_dir: PathBuf,

        /// Download format
        #[arg(long, value_enum, default_value_t = ExportFormat::Xlsx)]
        format: ExportFormat,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Process {
            input,
            output_dir,
            format,
            policy,
            json,
            verbose,
        } => {
            setup_logging(verbose);
            process_upload(input, output_dir, format, policy, json)
        }
        Commands::Check {
            input,
            policy,
            verbose,
        } => {
            setup_logging(verbose);
            check_upload(input, policy)
        }
        Commands::Sample { output_dir, format } => {
            setup_logging(false);
            write_sample(output_dir, format)
        }
    }
}

fn setup_logging(verbose: bool) {
    let level = if verbose { Level::DEBUG } else { Level::INFO };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).ok();
}

fn load_config(policy: Option<AdmissionPolicy>) -> Result<PipelineConfig> {
    let config = PipelineConfig::from_env()?.with_admission(policy);
    info!("Admission policy: {}", config.admission);
    Ok(config)
}

fn load_session(input: &Path) -> Result<UploadSession> {
    info!("Loading upload from {:?}", input);
    let upload = read_upload(input).context("Failed to load upload")?;
    let mut session = UploadSession::new();
    session.accept(upload);
    Ok(session)
}

fn process_upload(
    input: PathBuf,
    output_dir: PathBuf,
    format: ExportFormat,
    policy: Option<AdmissionPolicy>,
    json: bool,
) -> Result<()> {
    let config = load_config(policy)?;
    let session = load_session(&input)?;

    let output = match session.summarize(&config) {
        Summary::Processed { output, notices } => {
            for notice in &notices {
                match notice.level {
                    NoticeLevel::Info => info!("{}", notice.message),
                    NoticeLevel::Warning => warn!("{}", notice.message),
                }
            }
            output
        }
        Summary::Rejected { message } => bail!(message),
        Summary::Sample(_) => bail!("No upload to process"),
    };

    info!(
        "Kept {} of {} rows",
        output.diagnostics.output_rows, output.diagnostics.input_rows
    );

    let path = export(&output.table, format, &output_dir, &suggested_file_name_now())?;
    info!("Output written to {:?}", path);

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&output.diagnostics)
                .context("Failed to serialize diagnostics")?
        );
    } else {
        println!("{}", path.display());
    }

    Ok(())
}

fn check_upload(input: PathBuf, policy: Option<AdmissionPolicy>) -> Result<()> {
    let config = load_config(policy)?;
    let session = load_session(&input)?;

    let (output, notices) = match session.summarize(&config) {
        Summary::Processed { output, notices } => (output, notices),
        Summary::Rejected { message } => bail!(message),
        Summary::Sample(_) => bail!("No upload to check"),
    };
    let diagnostics = &output.diagnostics;

    println!("Upload Check");
    println!("============");
    println!("Policy: {}", diagnostics.policy);
    println!("Input rows: {}", diagnostics.input_rows);
    println!("Removed (contact length): {}", diagnostics.invalid_length_removed);
    println!("Flagged (contact length): {}", diagnostics.invalid_length_flagged);
    println!("Removed (duplicate account): {}", diagnostics.duplicates_removed);
    println!("Output rows: {}", diagnostics.output_rows);

    if !notices.is_empty() {
        println!();
        for notice in &notices {
            println!("{}", notice.message);
        }
    }

    Ok(())
}

fn write_sample(output_dir: PathBuf, format: ExportFormat) -> Result<()> {
    let session = UploadSession::new();
    let Some(table) = session.summarize(&PipelineConfig::default()).table().cloned() else {
        bail!("No sample table available");
    };

    let path = export(&table, format, &output_dir, &suggested_file_name_now())?;
    info!("Sample template written to {:?}", path);
    println!("{}", path.display());

    Ok(())
}
