use clap::Parser;
use clipwrite::logger::initialize_logger;
use clipwrite::paste::{paste_from_source, PasteConfig};
use clipwrite::paths::PathPolicy;
use clipwrite::reporting::{print_json, report, report_error};
use clipwrite::source::{FileSource, StdinSource, SystemClipboard, TextSource};
use clipwrite::ClipwriteError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, error};

/// Write the path-annotated code blocks on the clipboard to files.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct CliArgs {
    #[arg(short = 'r', long, env = "CLIPWRITE_ROOT", help = "Workspace root (defaults to the current directory)")]
    root: Option<PathBuf>,
    #[arg(long, conflicts_with = "input", help = "Read the text from stdin instead of the clipboard")]
    stdin: bool,
    #[arg(short = 'f', long, help = "Read the text from a file instead of the clipboard")]
    input: Option<PathBuf>,
    #[arg(long, env = "CLIPWRITE_ALLOW_OUTSIDE_ROOT", help = "Allow absolute paths and '..' to leave the workspace root")]
    allow_outside_root: bool,
    #[arg(long, help = "Log a diff against the previous content of each file")]
    diff: bool,
    #[arg(long, help = "Resolve and report targets without writing anything")]
    dry_run: bool,
    #[arg(long, help = "Print the batch result as JSON on stdout")]
    json: bool,
    #[arg(short = 'v', long)]
    verbose: bool,
}

fn open_source(args: &CliArgs) -> Result<Box<dyn TextSource>, ClipwriteError> {
    if args.stdin {
        return Ok(Box::new(StdinSource));
    }
    if let Some(path) = &args.input {
        return Ok(Box::new(FileSource::new(path)));
    }
    Ok(Box::new(SystemClipboard::new()?))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli_args = CliArgs::parse();
    initialize_logger(cli_args.verbose);
    debug!("Parsed arguments: {:?}", cli_args);

    let config = PasteConfig {
        root: cli_args.root.clone(),
        path_policy: if cli_args.allow_outside_root {
            PathPolicy::Permissive
        } else {
            PathPolicy::Confined
        },
        show_diff: cli_args.diff,
        dry_run: cli_args.dry_run,
    };

    let mut source = match open_source(&cli_args) {
        Ok(source) => source,
        Err(e) => {
            report_error(&e);
            return ExitCode::FAILURE;
        }
    };

    match paste_from_source(config, source.as_mut()).await {
        Ok(result) => {
            report(&result, cli_args.dry_run);
            if cli_args.json {
                if let Err(e) = print_json(&result) {
                    error!("Failed to print result: {}", e);
                    return ExitCode::FAILURE;
                }
            }
            if result.has_failures() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            report_error(&e);
            ExitCode::FAILURE
        }
    }
}
