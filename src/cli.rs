use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "vidscout")]
#[command(about = "Find video files linked from a web page and download them", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
    #[arg(short, long, global = true, help = "Also log to stderr")]
    pub verbose: bool,
}

#[derive(Clone, Debug, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Human,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Browse a page's videos interactively (default)")]
    Tui {
        #[arg(short, long)]
        url: Option<String>,
    },
    #[command(about = "List the videos found on a page")]
    Scan {
        #[arg(short, long)]
        url: String,
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
        #[arg(short, long)]
        out: Option<String>,
        #[arg(short, long, help = "Resolve file sizes before printing")]
        sizes: bool,
    },
    #[command(about = "Download the videos found on a page")]
    Download {
        #[arg(short, long)]
        url: String,
        #[arg(short, long, help = "Only videos whose name contains this text")]
        name: Option<String>,
        #[arg(short, long, help = "Only videos with this extension")]
        ext: Option<String>,
        #[arg(short, long, help = "Folder under the downloads root")]
        folder: Option<String>,
        #[arg(long, help = "Ask for the folder before downloading")]
        ask: bool,
        #[arg(long, help = "Download without only printing the plan")]
        yes: bool,
        #[arg(short = 'F', long, default_value = "human")]
        format: OutputFormat,
        #[arg(short, long)]
        out: Option<String>,
    },
    #[command(about = "Manage configuration")]
    Config {
        #[command(subcommand)]
        action: ConfigActions,
    },
    #[command(about = "View download history")]
    History {
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
}

#[derive(Subcommand)]
pub enum ConfigActions {
    #[command(about = "Show current configuration")]
    Show,
    #[command(about = "Set a configuration value")]
    Set {
        #[arg(short, long)]
        key: String,
        #[arg(short, long)]
        value: String,
    },
}

impl Cli {
    pub fn parse_args() -> Self {
        Parser::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_subcommand_means_tui() {
        let cli = Cli::try_parse_from(["vidscout"]).unwrap();
        assert!(cli.command.is_none());
        assert!(!cli.verbose);
    }

    #[test]
    fn test_download_flags() {
        let cli = Cli::try_parse_from([
            "vidscout", "download", "--url", "https://x.com/", "--ext", "mp4", "--folder",
            "/movies/", "--yes", "-v",
        ])
        .unwrap();
        assert!(cli.verbose);
        match cli.command {
            Some(Commands::Download {
                url, ext, folder, yes, ask, ..
            }) => {
                assert_eq!(url, "https://x.com/");
                assert_eq!(ext.as_deref(), Some("mp4"));
                assert_eq!(folder.as_deref(), Some("/movies/"));
                assert!(yes);
                assert!(!ask);
            }
            _ => panic!("expected download"),
        }
    }

    #[test]
    fn test_scan_requires_url() {
        assert!(Cli::try_parse_from(["vidscout", "scan"]).is_err());
    }
}
