use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use gapex::models::{DEFAULT_RANK_COUNT, Direction, FilterSelection, RankRequest, Statistic};
use gapex::{query, stats, storage};
use num_format::{Locale, ToFormattedString};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "gapex",
    version,
    about = "Filter, rank & summarize Gapminder country-year statistics"
)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Rows feeding the world map: filters plus a single display year.
    Map(MapArgs),
    /// Top/bottom-N countries by a statistic in a reference year.
    Bar(BarArgs),
    /// Top/bottom-N countries across a year range (ranked at the range end).
    Trend(TrendArgs),
    /// Sub-region choices for a region (all sub-regions when omitted).
    Subregions(SubregionArgs),
    /// Region choices present in the dataset.
    Regions(DataArgs),
}

#[derive(ValueEnum, Clone, Debug)]
enum OutFormat {
    Csv,
    Json,
}

#[derive(Args, Debug)]
struct DataArgs {
    /// Path to the processed Gapminder CSV.
    #[arg(short = 'D', long)]
    data: PathBuf,
}

#[derive(Args, Debug)]
struct FilterArgs {
    /// Region filter (e.g., "Asia"). No value means no constraint.
    #[arg(short, long)]
    region: Option<String>,
    /// Sub-region filter (e.g., "Western Asia").
    #[arg(short = 'u', long)]
    sub_region: Option<String>,
    /// Income group filter (Low, Lower middle, Upper middle, High).
    #[arg(short, long)]
    income_group: Option<String>,
}

impl FilterArgs {
    fn selection(&self) -> FilterSelection {
        FilterSelection {
            region: self.region.clone(),
            sub_region: self.sub_region.clone(),
            income_group: self.income_group.clone(),
        }
    }
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Save results to file (format inferred by --format or extension).
    #[arg(long)]
    out: Option<PathBuf>,
    /// Output format (csv or json). If omitted, inferred from --out extension.
    #[arg(long, value_enum)]
    format: Option<OutFormat>,
    /// Print per-country summary statistics to stdout.
    #[arg(long, default_value_t = false)]
    stats: bool,
}

#[derive(Args, Debug)]
struct MapArgs {
    #[command(flatten)]
    data: DataArgs,
    #[command(flatten)]
    filters: FilterArgs,
    /// Statistic of interest (life_expectancy, education_ratio, pop_density,
    /// child_mortality, children_per_woman).
    #[arg(short, long, default_value = "education_ratio")]
    stat: Statistic,
    /// Display year.
    #[arg(short, long)]
    year: i32,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct BarArgs {
    #[command(flatten)]
    data: DataArgs,
    #[command(flatten)]
    filters: FilterArgs,
    /// Statistic to rank by.
    #[arg(short, long, default_value = "education_ratio")]
    stat: Statistic,
    /// Reference year for the ranking.
    #[arg(short, long)]
    year: i32,
    /// Which end of the ranking to keep (top or bottom).
    #[arg(long, default_value = "bottom")]
    show: Direction,
    /// Number of countries to keep.
    #[arg(short = 'n', long, default_value_t = DEFAULT_RANK_COUNT)]
    count: usize,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct TrendArgs {
    #[command(flatten)]
    data: DataArgs,
    #[command(flatten)]
    filters: FilterArgs,
    /// Statistic to rank by.
    #[arg(short, long, default_value = "education_ratio")]
    stat: Statistic,
    /// Year range as YYYY:YYYY; ranking uses the range end.
    #[arg(short, long)]
    years: String,
    /// Which end of the ranking to keep (top or bottom).
    #[arg(long, default_value = "bottom")]
    show: Direction,
    /// Number of countries to keep.
    #[arg(short = 'n', long, default_value_t = DEFAULT_RANK_COUNT)]
    count: usize,
    #[command(flatten)]
    output: OutputArgs,
}

#[derive(Args, Debug)]
struct SubregionArgs {
    #[command(flatten)]
    data: DataArgs,
    /// Parent region; omit to list every sub-region.
    #[arg(short, long)]
    region: Option<String>,
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    match cli.cmd {
        Command::Map(args) => cmd_map(args),
        Command::Bar(args) => cmd_bar(args),
        Command::Trend(args) => cmd_trend(args),
        Command::Subregions(args) => cmd_subregions(args),
        Command::Regions(args) => cmd_regions(args),
    }
}

fn cmd_map(args: MapArgs) -> Result<()> {
    let data = storage::load_csv(&args.data.data)?;
    let rows = query::map_view(&data, &args.filters.selection(), args.year);
    eprintln!(
        "{} by Country for {}: {} rows",
        args.stat.label(),
        args.year,
        rows.len()
    );
    emit(&rows, args.stat, &args.output)
}

fn cmd_bar(args: BarArgs) -> Result<()> {
    let data = storage::load_csv(&args.data.data)?;
    let req = RankRequest::new(args.stat, args.show, args.year).with_count(args.count);
    let mut rows = query::bar_view(&data, &args.filters.selection(), &req);
    query::rank_display_order(&mut rows, &req);
    eprintln!(
        "{} - {} {} Countries for {}: {} rows",
        args.stat.label(),
        args.show,
        args.count,
        args.year,
        rows.len()
    );
    emit(&rows, args.stat, &args.output)
}

fn cmd_trend(args: TrendArgs) -> Result<()> {
    let (start, end) = parse_years(&args.years)
        .ok_or_else(|| anyhow::anyhow!("invalid --years, expected YYYY:YYYY"))?;
    let data = storage::load_csv(&args.data.data)?;
    let req = RankRequest::new(args.stat, args.show, end).with_count(args.count);
    let rows = query::trend_view(&data, &args.filters.selection(), &req, start, end);
    eprintln!(
        "{} Trend - {} {} Countries from {} - {}: {} rows",
        args.stat.label(),
        args.show,
        args.count,
        start,
        end,
        rows.len()
    );
    emit(&rows, args.stat, &args.output)
}

fn cmd_subregions(args: SubregionArgs) -> Result<()> {
    let data = storage::load_csv(&args.data.data)?;
    for sub in query::sub_regions_for(&data, args.region.as_deref()) {
        println!("{}", sub);
    }
    Ok(())
}

fn cmd_regions(args: DataArgs) -> Result<()> {
    let data = storage::load_csv(&args.data)?;
    for region in query::regions(&data) {
        println!("{}", region);
    }
    Ok(())
}

/// Write rows to --out when given, otherwise print a table; append summaries
/// when --stats was requested.
fn emit(rows: &[gapex::Record], stat: Statistic, output: &OutputArgs) -> Result<()> {
    if let Some(path) = output.out.as_ref() {
        let fmt = match output.format {
            Some(OutFormat::Csv) => "csv",
            Some(OutFormat::Json) => "json",
            None => path.extension().and_then(|e| e.to_str()).unwrap_or("csv"),
        }
        .to_ascii_lowercase();
        match fmt.as_str() {
            "csv" => storage::save_csv(rows, path)?,
            "json" => storage::save_json(rows, path)?,
            other => anyhow::bail!("unsupported format: {}", other),
        }
        eprintln!("Saved {} rows to {}", rows.len(), path.display());
    } else {
        print_table(rows, stat);
    }

    if output.stats {
        for s in stats::grouped_summary(rows, stat) {
            println!(
                "{} • {}  count={} missing={}  min={} max={} mean={} median={}",
                s.country,
                s.statistic,
                s.count,
                s.missing,
                fmt_opt(s.min),
                fmt_opt(s.max),
                fmt_opt(s.mean),
                fmt_opt(s.median)
            );
        }
    }

    Ok(())
}

fn print_table(rows: &[gapex::Record], stat: Statistic) {
    for r in rows {
        println!(
            "{}\t{}\t{}\t{}\tpop={}\t{}={}",
            r.country,
            r.year,
            r.region,
            r.income_group,
            r.population.to_formatted_string(&Locale::en),
            stat,
            fmt_opt(stat.value(r))
        );
    }
}

fn fmt_opt(v: Option<f64>) -> String {
    match v {
        Some(x) if x.is_finite() => {
            // Format up to 4 decimals, then trim trailing zeros and trailing dot.
            let s = format!("{:.4}", x);
            s.trim_end_matches('0').trim_end_matches('.').to_string()
        }
        _ => "NA".to_string(),
    }
}

fn parse_years(s: &str) -> Option<(i32, i32)> {
    let (a, b) = s.split_once(':')?;
    Some((a.trim().parse().ok()?, b.trim().parse().ok()?))
}
