use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton, MouseEvent,
    MouseEventKind,
};
use crossterm::execute;
use econ_map::app::{App, MapKind};
use econ_map::config::AppConfig;
use econ_map::dataset::Datasets;
use econ_map::format::{format_magnitude, group_thousands, short_name};
use econ_map::map::MapRenderer;
use econ_map::marker::build_markers;
use econ_map::record::DatasetKind;
use econ_map::sources::source_for;
use econ_map::stats::{summarize, RecordFilter};
use econ_map::view::JapanLayer;
use econ_map::{geodata, ui};
use ratatui::DefaultTerminal;
use std::fs::File;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "econ-map", about = "GDP and revenue markers on braille world and Japan maps")]
struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Directory with countries.json, prefectures.json, companies.json and
    /// municipalities.json (overrides the config file)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Write logs here; the interactive map logs nowhere else
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Interactive map (default)
    View {
        /// Open on the Japan map instead of the world map
        #[arg(long)]
        japan: bool,
    },
    /// Print each record's radius, color and share plus dataset totals
    Summary {
        #[arg(long, value_enum)]
        kind: Option<KindArg>,
        /// Only companies headquartered in this prefecture
        #[arg(long)]
        prefecture: Option<String>,
        /// Only companies with at least this revenue (million yen)
        #[arg(long)]
        min_revenue: Option<f64>,
    },
    /// Provider, year and license of each dataset, and whether it loaded
    Sources,
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    Country,
    Prefecture,
    Company,
    Municipality,
}

impl From<KindArg> for DatasetKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Country => DatasetKind::Country,
            KindArg::Prefecture => DatasetKind::Prefecture,
            KindArg::Company => DatasetKind::Company,
            KindArg::Municipality => DatasetKind::Municipality,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::View { japan: false });
    let interactive = matches!(command, Command::View { .. });
    init_logging(cli.log_file.as_deref(), interactive)?;

    let mut config = match &cli.config {
        Some(path) => {
            AppConfig::load_from_file(path).with_context(|| format!("loading config {}", path.display()))?
        }
        None => AppConfig::default(),
    };
    if let Some(dir) = cli.data_dir {
        config.data.dir = Some(dir);
    }

    let datasets = Datasets::load(config.data.dir.as_deref());

    match command {
        Command::View { japan } => run_view(config, datasets, japan),
        Command::Summary {
            kind,
            prefecture,
            min_revenue,
        } => {
            let filter = RecordFilter {
                group: prefecture,
                min_magnitude: min_revenue,
            };
            // company filters imply the company dataset
            let default_kind = if filter.is_empty() {
                DatasetKind::Prefecture
            } else {
                DatasetKind::Company
            };
            print_summary(&config, &datasets, kind.map_or(default_kind, Into::into), &filter);
            Ok(())
        }
        Command::Sources => {
            print_sources(&datasets);
            Ok(())
        }
    }
}

fn init_logging(log_file: Option<&Path>, interactive: bool) -> Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    match log_file {
        Some(path) => {
            let file = File::create(path).with_context(|| format!("creating log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        // the terminal belongs to the map
        None if interactive => {}
        None => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
    Ok(())
}

fn print_summary(config: &AppConfig, datasets: &Datasets, kind: DatasetKind, filter: &RecordFilter) {
    let loaded = datasets.get(kind);
    let ctx = filter.apply(&loaded.context);
    let markers = build_markers(&ctx, config.layers.get(kind));

    println!("{kind} data: {} ({} records)", loaded.origin, ctx.len());
    println!("{:<28} {:>22} {:>7} {:>8} {:>9}", "name", "magnitude", "radius", "color", "share");
    for marker in &markers {
        let Some(record) = ctx.records().get(marker.index) else {
            continue;
        };
        println!(
            "{:<28} {:>22} {:>7.1} {:>8} {:>9}",
            short_name(&record.name, 28),
            format_magnitude(kind, record.magnitude),
            marker.radius,
            marker.color.to_hex(),
            marker.share_text
        );
    }

    let summary = summarize(&ctx);
    println!();
    println!("records:        {}", summary.count);
    println!("total:          {}", format_magnitude(kind, summary.total_magnitude));
    println!("total {:<9} {}", format!("{}:", kind.secondary_label()), group_thousands(summary.total_secondary));
    println!("avg per unit:   {:.2}", summary.avg_per_unit);
}

fn print_sources(datasets: &Datasets) {
    for kind in DatasetKind::ALL {
        let source = source_for(kind);
        println!("{kind}: {} ({})", source.provider, source.data_year);
        println!("  {}", source.description);
        println!("  license: {}", source.license);
        if let Some(url) = source.url {
            println!("  {url}");
        }
        println!("  loaded:  {}", datasets.get(kind).origin);
    }
}

fn run_view(config: AppConfig, datasets: Datasets, japan: bool) -> Result<()> {
    let mut map_renderer = MapRenderer::new();
    geodata::load_base_map(&mut map_renderer, &config.map.geojson_dir);

    let mut terminal = ratatui::init();
    terminal.clear()?;
    execute!(std::io::stdout(), EnableMouseCapture)?;

    let result = run(&mut terminal, config, datasets, map_renderer, japan);

    let _ = execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
    result
}

fn handle_mouse(app: &mut App, mouse: MouseEvent, now: Instant) {
    app.set_mouse_pos(mouse.column, mouse.row);

    match mouse.kind {
        MouseEventKind::ScrollUp => app.zoom_at(mouse.column, mouse.row, 1, now),
        MouseEventKind::ScrollDown => app.zoom_at(mouse.column, mouse.row, -1, now),
        MouseEventKind::ScrollLeft => app.pan(-15, 0),
        MouseEventKind::ScrollRight => app.pan(15, 0),
        MouseEventKind::Down(MouseButton::Left) => app.last_mouse = Some((mouse.column, mouse.row)),
        MouseEventKind::Drag(MouseButton::Left) => app.handle_drag(mouse.column, mouse.row),
        MouseEventKind::Up(MouseButton::Left) => app.end_drag(),
        _ => {}
    }
}

fn run(
    terminal: &mut DefaultTerminal,
    config: AppConfig,
    datasets: Datasets,
    map_renderer: MapRenderer,
    japan: bool,
) -> Result<()> {
    let size = terminal.size()?;
    let mut app = App::new(
        config,
        datasets,
        map_renderer,
        size.width as usize,
        size.height as usize,
        Instant::now(),
    );
    if japan {
        app.switch_map(MapKind::Japan, Instant::now());
    }
    info!(map = %app.map, "view started");

    loop {
        terminal.draw(|frame| ui::render(frame, &app, Instant::now()))?;

        if event::poll(Duration::from_millis(16))? {
            let now = Instant::now();
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                    KeyCode::Char('q') | KeyCode::Esc => app.quit(),

                    KeyCode::Left | KeyCode::Char('h') => app.pan(-10, 0),
                    KeyCode::Right | KeyCode::Char('l') => app.pan(10, 0),
                    KeyCode::Up | KeyCode::Char('k') => app.pan(0, -6),
                    KeyCode::Down | KeyCode::Char('j') => app.pan(0, 6),

                    KeyCode::Char('+') | KeyCode::Char('=') => app.zoom_in(now),
                    KeyCode::Char('-') | KeyCode::Char('_') => app.zoom_out(now),

                    KeyCode::Char('w') | KeyCode::Char('W') => app.switch_map(MapKind::World, now),
                    KeyCode::Char('J') => app.switch_map(MapKind::Japan, now),

                    KeyCode::Char('a') | KeyCode::Char('A') => app.toggle_mode(now),
                    KeyCode::Char('1') => app.select_layer(JapanLayer::Prefecture, now),
                    KeyCode::Char('2') => app.select_layer(JapanLayer::Company, now),
                    KeyCode::Char('3') => app.select_layer(JapanLayer::Municipality, now),

                    KeyCode::Char('b') | KeyCode::Char('B') => app.map_renderer.toggle_borders(),
                    KeyCode::Char('s') | KeyCode::Char('S') => app.map_renderer.toggle_states(),

                    KeyCode::Char('r') | KeyCode::Char('0') => app.reset_view(now),
                    _ => {}
                },
                Event::Mouse(mouse) => handle_mouse(&mut app, mouse, now),
                Event::Resize(width, height) => app.resize(width as usize, height as usize),
                _ => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
