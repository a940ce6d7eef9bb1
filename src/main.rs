mod cli;
mod config;
mod downloader;
mod error;
mod history;
mod logging;
mod model;
mod output;
mod plugin;
mod safety;
mod scanner;
mod selection;
mod tui;
mod utils;

use anyhow::Result;
use cli::{Cli, Commands, ConfigActions, OutputFormat};
use config::Config;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use downloader::{build_requests, prepare, Dispatcher, HttpDownloadExecutor};
use error::VidError;
use history::HistoryLogger;
use model::{DownloadOutcome, ScanResult};
use output::json_schema::{DownloadReport, ScanReport};
use plugin::SizeProbe;
use ratatui::{backend::CrosstermBackend, Terminal};
use scanner::{build_client, parse_page_url, resolve_sizes, scan_page, HttpPageSource, SizeResolver};
use selection::{ExtensionFilter, FilterCriteria, SelectionState};
use std::io;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;
use tui::App;
use utils::{format_size, format_size_status, prompt_folder};

fn main() -> ExitCode {
    let cli = Cli::parse_args();

    let log_dir = Config::data_dir().join("logs");
    let _ = std::fs::create_dir_all(&log_dir);
    let _guard = logging::init_logger(&log_dir, cli.verbose);

    let result = match Config::load() {
        Ok(config) => run(cli, config),
        Err(e) => Err(e),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            match e.downcast_ref::<VidError>() {
                Some(err) if err.is_input_error() => eprintln!("{}", err),
                _ => eprintln!("Error: {}", e),
            }
            ExitCode::from(1)
        }
    }
}

fn run(cli: Cli, config: Config) -> Result<ExitCode> {
    match cli.command {
        None => run_tui(config, None)?,
        Some(Commands::Tui { url }) => run_tui(config, url)?,
        Some(Commands::Scan {
            url,
            format,
            out,
            sizes,
        }) => run_scan(&url, &config, format, out.as_deref(), sizes)?,
        Some(Commands::Download {
            url,
            name,
            ext,
            folder,
            ask,
            yes,
            format,
            out,
        }) => {
            let options = DownloadOptions {
                name,
                ext,
                folder,
                ask,
                yes,
            };
            return run_download(&url, &config, options, format, out.as_deref());
        }
        Some(Commands::Config { action }) => run_config(action, config)?,
        Some(Commands::History { limit }) => run_history(limit)?,
    }

    Ok(ExitCode::SUCCESS)
}

fn run_tui(config: Config, url: Option<String>) -> Result<()> {
    let mut app = App::new(config, url)?;

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = app.run(&mut terminal);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn runtime() -> Result<Runtime> {
    Runtime::new().map_err(|e| anyhow::anyhow!("Failed to create tokio runtime: {}", e))
}

/// Fetches and classifies one page, optionally filling in sizes.
fn scan_once(
    rt: &Runtime,
    url: &str,
    config: &Config,
    generation: u64,
    with_sizes: bool,
) -> Result<ScanResult> {
    let page_url = parse_page_url(url)?;
    let client = build_client(&config.scan)?;
    let timeout = Duration::from_secs(config.scan.timeout_secs.max(1));

    let source = HttpPageSource::new(client.clone()).with_timeout(timeout);
    let mut result = rt.block_on(scan_page(&source, &page_url, generation))?;

    if with_sizes && !result.is_empty() {
        let probe: Arc<dyn SizeProbe> = Arc::new(SizeResolver::new(client).with_timeout(timeout));
        let videos = result.videos.clone();
        rt.block_on(resolve_sizes(
            probe,
            &videos,
            config.scan.size_probe_concurrency,
            |id, status| {
                if let Some(video) = result.videos.get_mut(id.index) {
                    video.size = status;
                }
            },
        ));
    }

    Ok(result)
}

fn run_scan(
    url: &str,
    config: &Config,
    format: OutputFormat,
    out: Option<&str>,
    sizes: bool,
) -> Result<()> {
    let start = Instant::now();
    let rt = runtime()?;
    let result = scan_once(&rt, url, config, 1, sizes)?;

    match format {
        OutputFormat::Json => {
            let report = ScanReport::new(&result, start.elapsed().as_millis() as u64);
            output::write_json(&report, out)?;
        }
        OutputFormat::Human => {
            if result.is_empty() {
                println!("{}", selection::NO_VIDEOS_FOUND);
                return Ok(());
            }

            println!("Found {} video(s) on {}\n", result.len(), result.page_url);
            for video in &result.videos {
                let size = if sizes {
                    format!("  {}", format_size_status(video.size, config.ui.show_sizes_in_bytes))
                } else {
                    String::new()
                };
                println!("  [{}] {}{}", video.extension, video.display_name(), size);
                println!("        {}", video.url);
            }

            let known: u64 = result.videos.iter().filter_map(|v| v.size.bytes()).sum();
            if sizes {
                println!("\nTotal known size: {}", format_size(known));
            }
            println!("Types: {}", result.extensions().join(", "));
        }
    }

    Ok(())
}

struct DownloadOptions {
    name: Option<String>,
    ext: Option<String>,
    folder: Option<String>,
    ask: bool,
    yes: bool,
}

fn run_download(
    url: &str,
    config: &Config,
    options: DownloadOptions,
    format: OutputFormat,
    out: Option<&str>,
) -> Result<ExitCode> {
    let rt = runtime()?;

    // Headless runs go through the same selection state as the TUI.
    let mut state = SelectionState::new();
    let generation = state.begin_scan();
    let result = scan_once(&rt, url, config, generation, false)?;
    state.on_scan_complete(result);

    let extension = options
        .ext
        .as_deref()
        .map(ExtensionFilter::parse)
        .unwrap_or_default();
    state.on_filter_change(FilterCriteria::new(
        options.name.clone().unwrap_or_default(),
        extension,
    ));
    state.on_toggle_select_all(true);

    if let Some(message) = state.empty_state() {
        println!("{}", message);
        return Ok(ExitCode::SUCCESS);
    }

    let selected = state.selected_descriptors();
    let mut policy = config.destination_policy();
    if let Some(folder) = options.folder {
        policy.default_folder = folder;
    }
    policy.ask_each_time |= options.ask;
    let root = config.downloads_root();

    if !options.yes {
        let preview = build_requests(&selected, &policy.default_folder);
        println!("Would download {} video(s) to {}:\n", preview.len(), root.display());
        for request in &preview {
            let target = match &request.destination_folder {
                Some(folder) => format!("{}/{}", folder, request.filename),
                None => request.filename.clone(),
            };
            println!("  {} -> {}", request.url, target);
        }
        if policy.ask_each_time {
            println!("\nThe destination folder will be asked for before downloading.");
        }
        println!("\nUse --yes to download");
        return Ok(ExitCode::SUCCESS);
    }

    let requests = match prepare(&selected, &policy, |default| {
        prompt_folder(default).ok().flatten()
    }) {
        Ok(requests) => requests,
        Err(VidError::PromptCancelled) => {
            println!("{}", VidError::PromptCancelled);
            return Ok(ExitCode::SUCCESS);
        }
        Err(e) => return Err(e.into()),
    };

    let client = build_client(&config.scan)?;
    let executor = Arc::new(HttpDownloadExecutor::new(client, root));
    let dispatcher = Dispatcher::new(executor).with_history(HistoryLogger::new());

    let human = matches!(format, OutputFormat::Human);
    let mut outcomes: Vec<DownloadOutcome> = Vec::new();
    let report = rt.block_on(dispatcher.dispatch(requests, |outcome| {
        if human {
            match &outcome.result {
                Ok(receipt) => println!(
                    "Saved: {} ({})",
                    receipt.path.display(),
                    format_size(receipt.bytes)
                ),
                Err(message) => println!(
                    "{}",
                    VidError::Download {
                        url: outcome.url.clone(),
                        message: message.clone(),
                    }
                ),
            }
        }
        outcomes.push(outcome.clone());
    }));

    match format {
        OutputFormat::Json => {
            output::write_json(&DownloadReport::new(&report, &outcomes), out)?;
        }
        OutputFormat::Human => {
            println!();
            println!("Results:");
            println!("  Downloaded: {} of {}", report.succeeded, report.submitted);
            println!("  Failed: {}", report.failed_count());
            println!("  Size: {}", format_size(report.total_bytes));
            println!("  Duration: {:?}", report.duration);

            if !report.failed.is_empty() {
                println!("\nFailed items:");
                for (url, error) in &report.failed {
                    println!("  - {}: {}", url, error);
                }
            }
        }
    }

    if report.failed_count() > 0 {
        Ok(ExitCode::from(2))
    } else {
        Ok(ExitCode::SUCCESS)
    }
}

fn run_config(action: ConfigActions, mut config: Config) -> Result<()> {
    match action {
        ConfigActions::Show => {
            let folder = if config.download.destination_folder.is_empty() {
                "(downloads root)"
            } else {
                config.download.destination_folder.as_str()
            };
            println!("Current configuration:");
            println!("  Config file: {}", Config::config_path().display());
            println!("  Downloads root: {}", config.downloads_root().display());
            println!("  Destination folder: {}", folder);
            println!(
                "  Ask folder before download: {}",
                config.download.ask_folder_before_download
            );
            println!("  Timeout: {}s", config.scan.timeout_secs);
            println!("  Size probe concurrency: {}", config.scan.size_probe_concurrency);
            println!("  User agent: {}", config.scan.user_agent);
            println!("  Sizes in bytes: {}", config.ui.show_sizes_in_bytes);
        }
        ConfigActions::Set { key, value } => {
            config.set_value(&key, &value)?;
            config.save()?;
            println!("Set {} to {}", key, value);
        }
    }

    Ok(())
}

fn run_history(limit: usize) -> Result<()> {
    let logger = HistoryLogger::new();
    let entries = logger.read_history(Some(limit))?;

    if entries.is_empty() {
        println!("No history found.");
        return Ok(());
    }

    println!("Last {} download(s):\n", entries.len());

    for entry in entries {
        println!(
            "{} {} {}",
            entry.timestamp.format("%Y-%m-%d %H:%M:%S"),
            entry.action,
            entry.url
        );
        if let Some(size) = entry.size {
            println!("    Size: {}", format_size(size));
        }
    }

    Ok(())
}
