use clap::{ArgAction, Parser};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{debug, info};

use planbar::config::AppConfig;
use planbar::demo::{DemoHost, DemoScript};
use planbar::logging::{init_logging, LoggingConfig};
use planbar::tui;

#[derive(Parser, Debug)]
#[command(name = "planbar")]
#[command(version)]
#[command(about = "Planned-versus-actual progress bar demo for the terminal")]
struct Cli {
    /// TOML configuration file
    #[arg(long, short, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Target value (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    planned: Option<f64>,

    /// Starting progress value (overrides config)
    #[arg(long, allow_negative_numbers = true)]
    progress: Option<f64>,

    /// Amount added per demo step (overrides config)
    #[arg(long)]
    step: Option<f64>,

    /// Delay between demo steps in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    interval_ms: Option<u64>,

    /// Fill animation duration in milliseconds (overrides config)
    #[arg(long, value_name = "MS")]
    animation_ms: Option<u64>,

    /// Keep the fill color when progress exceeds the plan
    #[arg(long)]
    no_flip: bool,

    /// Print frames as plain text instead of taking over the terminal
    #[arg(long)]
    inline: bool,

    /// With --inline, print only the starting frame
    #[arg(long, requires = "inline")]
    once: bool,

    /// Frame width in columns for --inline
    #[arg(long, default_value = "60", value_name = "COLS")]
    width: u16,

    /// Suppress all log output
    #[arg(long, short)]
    quiet: bool,

    /// Increase verbosity (-v, -vv)
    #[arg(long, short, action = ArgAction::Count, conflicts_with = "quiet")]
    verbose: u8,
}

impl Cli {
    /// Load the config file (or defaults) and apply flag overrides.
    fn app_config(&self) -> planbar::Result<AppConfig> {
        let mut config = match &self.config {
            Some(path) => AppConfig::load(path)?,
            None => AppConfig::default(),
        };

        if let Some(planned) = self.planned {
            config.demo.planned = planned;
        }
        if let Some(progress) = self.progress {
            config.demo.progress = progress;
        }
        if let Some(step) = self.step {
            config.demo.step = step;
        }
        if let Some(interval_ms) = self.interval_ms {
            config.demo.interval_ms = interval_ms;
        }
        if let Some(animation_ms) = self.animation_ms {
            config.demo.animation_ms = animation_ms;
        }
        if self.no_flip {
            config.style.flip_color_when_over = false;
        }

        config.validate()?;
        Ok(config)
    }
}

/// Print the host after every script step, without timers.
fn run_inline(config: &AppConfig, width: u16, once: bool) {
    let mut host = DemoHost::new(config);
    println!("{}", host.render_to_string(width));
    if once {
        return;
    }

    let script = DemoScript::new(config.demo.planned, config.demo.progress, config.demo.step);
    for step in script {
        debug!(progress = step.value(), "inline step");
        host.apply(step);
        println!();
        println!("{}", host.render_to_string(width));
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(LoggingConfig::from_flags(cli.verbose, cli.quiet));

    let config = match cli.app_config() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {}", err);
            return ExitCode::FAILURE;
        }
    };

    if cli.inline {
        run_inline(&config, cli.width, cli.once);
        return ExitCode::SUCCESS;
    }

    info!(
        planned = config.demo.planned,
        progress = config.demo.progress,
        "starting demo, press q to quit"
    );
    match tui::run(&config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", err);
            ExitCode::FAILURE
        }
    }
}
