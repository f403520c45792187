use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use healthfolio_core::models::{PresetKind, RawAsset};
use healthfolio_core::portfolio::{load_preset_file, GridLayout, Portfolio, GRID_SIZE};
use healthfolio_core::render::{render_error_page, render_page};
use healthfolio_core::store::LocalStore;
use healthfolio_core::{Asset, ReportLoader};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(author, version, about = "Health report rendering and portfolio allocation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the health report page from a data directory
    Report(ReportArgs),
    /// Inspect and edit the portfolio allocation
    Portfolio(PortfolioArgs),
}

#[derive(Parser, Debug)]
struct ReportArgs {
    /// Data directory with config.json, test documents and advice
    #[arg(short, long, default_value = "data")]
    data_dir: PathBuf,

    /// Output HTML path (`-` for stdout)
    #[arg(short, long, default_value = "report.html")]
    output: PathBuf,

    /// Only render cards whose content matches this query
    #[arg(long)]
    search: Option<String>,
}

#[derive(Parser, Debug)]
struct PortfolioArgs {
    /// Local store database path
    #[arg(long, default_value = "healthfolio.db")]
    store: PathBuf,

    #[command(subcommand)]
    action: PortfolioAction,
}

#[derive(Subcommand, Debug)]
enum PortfolioAction {
    /// Print the allocation table and projection figures
    Show,
    /// Print the 10×10 cloud grid
    Cloud,
    /// Add a new asset
    Add {
        name: String,
        percentage: f64,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Edit an existing asset, addressed by name
    Edit {
        name: String,
        #[arg(long)]
        percentage: Option<f64>,
        #[arg(long)]
        color: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        rename: Option<String>,
    },
    /// Delete an asset, addressed by name
    Remove { name: String },
    /// Load a preset (balanced | conservative | aggressive)
    Preset {
        name: String,
        /// Directory holding the preset data files
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Write the preset script text and clear the stored list
    Export {
        /// Output path (`-` for stdout)
        #[arg(short, long, default_value = "fund_data_list.js")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    match cli.command {
        Command::Report(args) => run_report(args),
        Command::Portfolio(args) => run_portfolio(args),
    }
}

fn run_report(args: ReportArgs) -> Result<()> {
    let loader = ReportLoader::new(&args.data_dir);
    match loader.load() {
        Ok(ctx) => {
            let page = render_page(&ctx, args.search.as_deref());
            write_output(&args.output, &page)?;
            info!(records = ctx.records.len(), "report rendered");
            Ok(())
        }
        Err(err) => {
            // The page gets the full error panel; the exit code reports failure.
            error!(%err, "report data failed to load");
            write_output(&args.output, &render_error_page(&err))?;
            Err(err.into())
        }
    }
}

fn run_portfolio(args: PortfolioArgs) -> Result<()> {
    let store = LocalStore::open(&args.store)
        .with_context(|| format!("opening store {}", args.store.display()))?;
    let mut portfolio = Portfolio::load(&store)?;

    match args.action {
        PortfolioAction::Show => print_table(&portfolio),
        PortfolioAction::Cloud => print_cloud(&portfolio),
        PortfolioAction::Add { name, percentage, color, description } => {
            let input = RawAsset {
                name: Some(name.clone()),
                percentage: Some(percentage),
                color,
                description,
            };
            portfolio.save_asset(None, input, &store)?;
            info!(name = %name, "asset added");
        }
        PortfolioAction::Edit { name, percentage, color, description, rename } => {
            let index = find_asset(&portfolio, &name)?;
            let existing = &portfolio.assets()[index];
            let input = RawAsset {
                name: Some(rename.unwrap_or_else(|| existing.name.clone())),
                percentage: percentage.or(Some(existing.percentage)),
                color: color.or_else(|| Some(existing.color.clone())),
                description: description.or_else(|| Some(existing.description.clone())),
            };
            portfolio.save_asset(Some(index), input, &store)?;
            info!(name = %name, "asset updated");
        }
        PortfolioAction::Remove { name } => {
            let index = find_asset(&portfolio, &name)?;
            let removed = portfolio.remove_asset(index, &store)?;
            info!(name = %removed.name, "asset removed");
        }
        PortfolioAction::Preset { name, dir } => {
            let Some(kind) = PresetKind::from_label(&name) else {
                bail!("unknown preset \"{name}\" (expected balanced, conservative or aggressive)");
            };
            let path = dir.join(kind.file_name());
            let data = load_preset_file(&path)
                .with_context(|| format!("loading preset {}", path.display()))?;
            portfolio.apply_preset(data, &store)?;
            info!(preset = kind.label(), "preset applied");
            print_table(&portfolio);
        }
        PortfolioAction::Export { output } => {
            let text = portfolio.export(&store)?;
            write_output(&output, &text)?;
            info!("exported; stored list cleared");
        }
    }
    Ok(())
}

fn find_asset(portfolio: &Portfolio, name: &str) -> Result<usize> {
    let needle = name.trim();
    portfolio
        .assets()
        .iter()
        .position(|a| a.name == needle)
        .with_context(|| format!("no asset named \"{needle}\""))
}

fn print_table(portfolio: &Portfolio) {
    let capital = portfolio.total_capital();
    println!("{:<14} {:>6} {:>10}  {}", "name", "%", "amount", "description");
    for asset in portfolio.table_assets() {
        println!(
            "{:<14} {:>6} {:>10.2}  {}",
            asset.name,
            asset.percentage,
            asset.amount(capital),
            asset.description,
        );
    }
    println!(
        "total {}%  capital {}  expected return {:.2}  max drawdown {:.2}",
        portfolio.total_percentage(),
        capital,
        portfolio.expected_return_amount(),
        portfolio.expected_drawdown_amount(),
    );
}

fn print_cloud(portfolio: &Portfolio) {
    let assets: &[Asset] = portfolio.assets();
    let layout: GridLayout = portfolio.cloud_layout();

    for row in 0..GRID_SIZE {
        let mut line = String::new();
        for col in 0..GRID_SIZE {
            line.push(match layout.cell(row, col) {
                Some(index) => cell_letter(index),
                None => '·',
            });
            line.push(' ');
        }
        println!("{line}");
    }
    println!();
    for (index, asset) in assets.iter().enumerate() {
        if layout.placed_cells(index) > 0 {
            println!("{} {} ({}%)", cell_letter(index), asset.name, asset.percentage);
        }
    }
}

fn cell_letter(index: usize) -> char {
    const LETTERS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";
    LETTERS[index % LETTERS.len()] as char
}

fn write_output(path: &Path, content: &str) -> Result<()> {
    if path == Path::new("-") {
        std::io::stdout().write_all(content.as_bytes())?;
        std::io::stdout().write_all(b"\n")?;
    } else {
        std::fs::write(path, content)
            .with_context(|| format!("writing {}", path.display()))?;
    }
    Ok(())
}
