mod error;
mod logging;
mod paths;
mod settings;

use std::collections::HashSet;
use std::fs;
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use bomview_lib::TreeModel;
use bomview_lib::column::ColumnSpec;
use bomview_lib::config::Direction;
use bomview_lib::model::NodeId;
use bomview_lib::model::RowColor;
use bomview_lib::repository::CompositionRepository;
use bomview_lib::repository::InMemoryRepository;
use bomview_lib::resolve::ProductAttributeResolver;
use clap::Parser;
use simplelog::LevelFilter;

use crate::error::CliError;
use crate::logging::LogDir;
use crate::settings::Settings;

type Model = TreeModel<InMemoryRepository, ProductAttributeResolver>;

/// Prints the composition tree of a product from a JSON snapshot.
#[derive(Debug, Parser)]
#[command(name = "bomview", version)]
#[command(about = "Browse bill-of-materials trees from a JSON snapshot")]
struct Args {
    /// Repository snapshot (products, edges, documents, catalogs).
    snapshot: PathBuf,

    /// Designation of the root product.
    #[arg(long, short)]
    root: String,

    /// Show where the product is used instead of what it contains.
    #[arg(long)]
    reverse: bool,

    #[arg(long)]
    max_depth: Option<usize>,

    /// Expand rows shallower than this level.
    #[arg(long)]
    expand_level: Option<usize>,

    /// Expand every row.
    #[arg(long, conflicts_with = "expand_level")]
    expand_all: bool,

    /// Extra column as a JSON column spec; repeatable.
    #[arg(long = "column", value_name = "JSON")]
    columns: Vec<String>,

    /// Highlight rows containing TEXT in any visible column.
    #[arg(long)]
    search: Option<String>,

    /// Highlight rows whose HEADER column equals TEXT.
    #[arg(long, value_name = "HEADER=TEXT")]
    search_column: Option<String>,

    /// Colour the row at an index path, e.g. `1.2.=red`; repeatable.
    #[arg(long = "color", value_name = "PATH=COLOR")]
    colors: Vec<String>,

    /// Settings file (defaults to settings.json in the config directory).
    #[arg(long)]
    settings: Option<PathBuf>,

    #[arg(long, default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> ExitCode {
    let args = Args::parse();
    let settings = match load_settings(&args) {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("Error: {}", e);
            return ExitCode::FAILURE;
        }
    };
    match paths::cache_dir() {
        Some(dir) => {
            if let Err(e) = logging::init(&LogDir::new(dir, settings.max_logs), args.log_level) {
                eprintln!("Logging disabled: {}", e);
            }
        }
        None => eprintln!("Logging disabled: no cache directory"),
    }

    match run(args, settings) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{}", e);
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_settings(args: &Args) -> Result<Settings, CliError> {
    match args.settings.clone().or_else(paths::settings_file) {
        Some(path) => Settings::load(&path),
        None => Ok(Settings::default()),
    }
}

fn run(args: Args, settings: Settings) -> Result<(), CliError> {
    let mut config = settings.tree;
    if args.reverse {
        config = config.with_direction(Direction::WhereUsed);
    }
    if let Some(max_depth) = args.max_depth {
        config = config.with_max_depth(max_depth);
    }
    if let Some(level) = args.expand_level {
        config = config.with_expand_level(level);
    }

    let json = fs::read_to_string(&args.snapshot).map_err(|e| CliError::read(&args.snapshot, e))?;
    let repository = InMemoryRepository::from_json(&json)?;
    let root = repository
        .find_by_deno(&args.root)
        .ok_or_else(|| CliError::UnknownRoot(args.root.clone()))?;

    let mut model = TreeModel::new(repository, ProductAttributeResolver::default(), root.id(), config)?;
    let report = model.rebuild_with(|p| log::debug!("[{}/{}] {}", p.stage + 1, p.total, p.message))?;
    if let Some(cycle) = report.cycle() {
        eprintln!("Warning: {}", cycle);
    }

    let mut specs = settings.columns;
    for column in &args.columns {
        specs.push(serde_json::from_str::<ColumnSpec>(column).map_err(CliError::Column)?);
    }
    model.add_columns(specs, |p| log::debug!("Column {}/{}: {}", p.stage + 1, p.total, p.message));

    if args.expand_all {
        model.expand_all();
    }
    for pair in &args.colors {
        apply_color(&mut model, pair)?;
    }

    let mut hits = HashSet::new();
    if let Some(text) = &args.search {
        hits.extend(model.search(text));
    }
    if let Some(pair) = &args.search_column {
        let (header, text) = split_pair(pair)?;
        hits.extend(model.search_column(text, header));
    }
    if args.search.is_some() || args.search_column.is_some() {
        eprintln!("{} matching rows", hits.len());
    }

    print_tree(&model, &hits)
}

fn split_pair(pair: &str) -> Result<(&str, &str), CliError> {
    pair.split_once('=').ok_or_else(|| CliError::Pair(pair.to_string()))
}

fn apply_color(model: &mut Model, pair: &str) -> Result<(), CliError> {
    let (path, name) = split_pair(pair)?;
    let color = RowColor::named(name).ok_or_else(|| CliError::Color(name.to_string()))?;
    let node = model
        .node_at(path)
        .map(|n| n.id())
        .ok_or_else(|| CliError::UnknownRow(path.to_string()))?;
    model.set_color(node, color)?;
    Ok(())
}

/// Writes visible rows as tab separated columns, indented by depth.
///
/// Search hits are prefixed with `*`, coloured rows end with the colour.
fn print_tree(model: &Model, hits: &HashSet<NodeId>) -> Result<(), CliError> {
    let mut out = std::io::stdout().lock();
    writeln!(out, "  {}", model.headers().join("\t"))?;

    for row in model.visible_rows() {
        let Some(node) = model.node(row.node) else {
            continue;
        };
        let marker = if hits.contains(&row.node) { '*' } else { ' ' };
        let fold = match (row.has_children, row.is_expanded) {
            (false, _) => ' ',
            (true, true) => '-',
            (true, false) => '+',
        };
        write!(out, "{}{}{}{}", marker, fold, "  ".repeat(row.depth), node.row().join("\t"))?;
        if let Some(color) = node.color() {
            write!(out, "\t{}", color)?;
        }
        writeln!(out)?;
    }
    Ok(())
}
