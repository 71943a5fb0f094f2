use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use ghg_dashboard::projection::{SortDirection, SortKey, TableSort};
use ghg_dashboard::viz::{ChartOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH};
use ghg_dashboard::{Client, Config, Country, FilterState, ViewMode, format, storage, view, viz};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "ghg",
    version,
    about = "Fetch & explore World Bank greenhouse-gas emissions by country"
)]
struct Cli {
    /// JSON config file (defaults to the platform config dir if present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the countries that can be selected.
    Countries,
    /// Fetch data and print one view (optionally export it and render a chart).
    Show(ShowArgs),
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum ViewArg {
    Chart,
    Table,
    Aggregated,
    Yoy,
}

impl From<ViewArg> for ViewMode {
    fn from(v: ViewArg) -> Self {
        match v {
            ViewArg::Chart => ViewMode::Chart,
            ViewArg::Table => ViewMode::Table,
            ViewArg::Aggregated => ViewMode::Aggregated,
            ViewArg::Yoy => ViewMode::Yoy,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum SortArg {
    Country,
    Year,
    Value,
}

impl From<SortArg> for SortKey {
    fn from(s: SortArg) -> Self {
        match s {
            SortArg::Country => SortKey::Country,
            SortArg::Year => SortKey::Year,
            SortArg::Value => SortKey::Value,
        }
    }
}

#[derive(Args, Debug)]
struct ShowArgs {
    /// Which view to print.
    #[arg(short, long, value_enum, default_value_t = ViewArg::Chart)]
    view: ViewArg,
    /// Country codes separated by comma or semicolon (e.g., USA,JPN). Defaults to all.
    #[arg(short, long)]
    countries: Option<String>,
    /// First year of the range (defaults to the configured minimum).
    #[arg(long)]
    start: Option<i32>,
    /// Last year of the range (defaults to the configured maximum).
    #[arg(long)]
    end: Option<i32>,
    /// Table sort column.
    #[arg(long, value_enum, default_value_t = SortArg::Year)]
    sort: SortArg,
    /// Sort the table descending.
    #[arg(long, default_value_t = false)]
    desc: bool,
    /// Save the view to a file (.csv or .json).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Render the view as a chart at the given path (.svg or .png).
    #[arg(long)]
    plot: Option<PathBuf>,
    /// Width of the plot.
    #[arg(long, default_value_t = DEFAULT_WIDTH)]
    width: u32,
    /// Height of the plot.
    #[arg(long, default_value_t = DEFAULT_HEIGHT)]
    height: u32,
    /// Number format locale (en, de, fr, es, it, pt, nl).
    #[arg(long)]
    locale: Option<String>,
}

fn parse_list(s: &str) -> Vec<String> {
    s.split([',', ';'])
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

fn parse_countries(s: &str) -> Result<Vec<Country>> {
    parse_list(s)
        .iter()
        .map(|code| code.parse::<Country>().map_err(anyhow::Error::from))
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Countries => cmd_countries(),
        Command::Show(args) => {
            let cfg = Config::load(cli.config.as_deref())?;
            cmd_show(&cfg, args)
        }
    }
}

fn cmd_countries() -> Result<()> {
    for c in Country::ALL {
        println!("{}  {}", c.code(), c.label());
    }
    Ok(())
}

fn build_filter(cfg: &Config, args: &ShowArgs) -> Result<FilterState> {
    let countries = match &args.countries {
        Some(s) => parse_countries(s)?,
        None => cfg.default_countries.clone(),
    };
    let start = args.start.unwrap_or(cfg.min_year);
    let end = args.end.unwrap_or(cfg.max_year);
    for y in [start, end] {
        if y < cfg.min_year || y > cfg.max_year {
            bail!(
                "year {} outside the supported range {}..={}",
                y,
                cfg.min_year,
                cfg.max_year
            );
        }
    }
    Ok(FilterState::new(countries, start, end)?)
}

fn cmd_show(cfg: &Config, args: ShowArgs) -> Result<()> {
    let filter = build_filter(cfg, &args)?;
    let locale = args.locale.clone().unwrap_or_else(|| cfg.locale.clone());
    let mode = ViewMode::from(args.view);

    if filter.is_empty() {
        println!("No countries selected.");
        return Ok(());
    }

    let client = Client::from_config(cfg).context("build http client")?;
    let observations = match client.fetch(&filter) {
        Ok(rows) => rows,
        Err(err) => {
            log::warn!("{err}");
            bail!("{}", err.user_message());
        }
    };
    if observations.is_empty() {
        println!("No data for selected countries.");
        return Ok(());
    }

    let direction = if args.desc {
        SortDirection::Desc
    } else {
        SortDirection::Asc
    };
    let projection = view::project(
        mode,
        &observations,
        &filter,
        TableSort::new(args.sort.into(), direction),
    );

    println!("{}", mode.title(filter.range()));
    print!("{}", format::render_text(&projection, &locale));

    if let Some(path) = args.out.as_ref() {
        storage::save_projection(&projection, path)?;
        eprintln!("Saved {} view to {}", mode.button_label(), path.display());
    }

    if let Some(plot_path) = args.plot.as_ref() {
        let opts = ChartOptions {
            width: args.width,
            height: args.height,
            locale: locale.clone(),
            title: None,
        };
        viz::plot_projection(&projection, &filter, plot_path, &opts)?;
        eprintln!("Wrote plot to {}", plot_path.display());
    }

    Ok(())
}
