//! drillforge CLI — the user-facing command-line interface.

use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "drill", version, about = "Adaptive practice tutor")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start an interactive practice session
    Practice {
        /// Topic to practice (default: recommended weakest topic)
        #[arg(long)]
        topic: Option<String>,

        /// Course identifier
        #[arg(long, default_value = "IB")]
        course: String,

        /// Syllabus TOML file or directory (default: from config)
        #[arg(long)]
        syllabus: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Show per-topic mastery and recent attempts
    Progress {
        /// Course identifier
        #[arg(long, default_value = "IB")]
        course: String,

        /// Number of recent attempts to show
        #[arg(long, default_value = "10")]
        recent: usize,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// List syllabus topics with accuracy markers and a recommendation
    Topics {
        /// Course identifier
        #[arg(long, default_value = "IB")]
        course: String,

        /// Syllabus TOML file or directory (default: from config)
        #[arg(long)]
        syllabus: Option<PathBuf>,

        /// Config file path
        #[arg(long)]
        config: Option<PathBuf>,
    },

    /// Validate syllabus TOML files
    Validate {
        /// Path to syllabus file or directory
        #[arg(long)]
        syllabus: PathBuf,
    },

    /// Create starter config and example syllabus
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("drillforge=info".parse().unwrap()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Practice {
            topic,
            course,
            syllabus,
            config,
        } => commands::practice::execute(topic, course, syllabus, config).await,
        Commands::Progress {
            course,
            recent,
            config,
        } => commands::progress::execute(course, recent, config).await,
        Commands::Topics {
            course,
            syllabus,
            config,
        } => commands::topics::execute(course, syllabus, config).await,
        Commands::Validate { syllabus } => commands::validate::execute(syllabus),
        Commands::Init => commands::init::execute(),
    };

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}
