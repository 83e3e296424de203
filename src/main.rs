use std::path::PathBuf;
use std::process;

use clap::{Parser, Subcommand};
use log::LevelFilter;

use mdsite::{CONFIG_FILE, Config, site};

#[derive(Parser)]
#[command(name = "mdsite")]
#[command(about = "Build a static site from Markdown files")]
struct Cli {
    /// Log debug output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Copy static assets and render every page of a site
    Build {
        /// Site root; configured paths are relative to it
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Config file (defaults to site.toml in the site root)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Render a single Markdown file through a template
    Page {
        /// Input Markdown file
        input: PathBuf,

        /// HTML template containing {{ Title }} and {{ Content }}
        #[arg(short, long)]
        template: PathBuf,

        /// Output HTML file (defaults to input name with .html extension)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();

    if let Err(e) = run(cli.command) {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> mdsite::Result<()> {
    match command {
        Command::Build { root, config } => {
            let config_path = config.unwrap_or_else(|| root.join(CONFIG_FILE));
            let config = Config::load(&config_path)?;
            let report = site::build_site(&root, &config)?;
            println!(
                "Built {} pages and copied {} assets into {}",
                report.pages.len(),
                report.assets,
                root.join(&config.public_dir).display()
            );
        }
        Command::Page {
            input,
            template,
            output,
        } => {
            let output = output.unwrap_or_else(|| input.with_extension("html"));
            site::generate_page(&input, &template, &output)?;
            println!("Created {}", output.display());
        }
    }
    Ok(())
}
