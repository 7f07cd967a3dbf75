//! svm-toy command line interface
//!
//! Drives an interactive visualizer session from the terminal: scripted
//! demo scenarios and a line-based interactive shell, both rendering
//! through the reference solver and previewing the canvas as ASCII.

use clap::{Args, Parser, Subcommand, ValueEnum};
use env_logger::Env;
use log::{error, info};
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;
use svm_toy::core::Result;
use svm_toy::{Canvas, Palette, ReferenceSolver, Rgb, Session, SessionConfig, SvmToyError, TrainReport};

#[derive(Parser)]
#[command(name = "svm-toy")]
#[command(about = "An interactive decision-surface visualizer for SVM-style solvers")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a built-in scenario and preview the rendered surface
    Demo(DemoArgs),
    /// Interactive shell: place points and train from stdin commands
    Shell(ShellArgs),
}

#[derive(Args)]
struct DemoArgs {
    /// Built-in point layout to train on
    #[arg(short, long, value_enum, default_value = "three-class")]
    scenario: Scenario,

    /// Training-parameter string handed to the solver unchanged
    #[arg(short, long, allow_hyphen_values = true)]
    params: Option<String>,

    /// Session configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the ASCII preview in characters
    #[arg(long, default_value = "60")]
    preview_width: u32,
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Scenario {
    /// Two separable clusters
    #[value(name = "two-class")]
    TwoClass,
    /// Three clusters, one per palette color
    #[value(name = "three-class")]
    ThreeClass,
    /// Points along a rising line, fitted as epsilon-SVR
    #[value(name = "regression")]
    Regression,
}

#[derive(Args)]
struct ShellArgs {
    /// Session configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Width of the ASCII preview in characters
    #[arg(long, default_value = "60")]
    preview_width: u32,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else {
        "warn"
    };

    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let result = match cli.command {
        Commands::Demo(args) => demo_command(args),
        Commands::Shell(args) => shell_command(args),
    };

    if let Err(e) = result {
        error!("Error: {e}");
        process::exit(1);
    }
}

fn load_config(path: &Option<PathBuf>) -> Result<SessionConfig> {
    match path {
        Some(path) => {
            info!("loading config from {path:?}");
            SessionConfig::from_file(path)
        }
        None => Ok(SessionConfig::default()),
    }
}

fn demo_command(args: DemoArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let mut session = Session::new(config, ReferenceSolver::new())?;

    place_scenario(&mut session, args.scenario);
    info!(
        "{:?} scenario: {} points placed",
        args.scenario,
        session.points().len()
    );

    let params = match args.params {
        Some(params) => params,
        None => default_params(args.scenario, session.config()),
    };

    let report = session.run(&params)?;
    print_report(&report, &params);

    let palette = session.config().palette.clone();
    print!(
        "{}",
        render_preview(session.canvas(), &palette, args.preview_width)
    );

    Ok(())
}

fn default_params(scenario: Scenario, config: &SessionConfig) -> String {
    match scenario {
        Scenario::TwoClass | Scenario::ThreeClass => config.params.clone(),
        Scenario::Regression => "-s 3 -t 2 -c 100".to_string(),
    }
}

fn place_scenario(session: &mut Session<ReferenceSolver>, scenario: Scenario) {
    let width = f64::from(session.config().width);
    let height = f64::from(session.config().height);
    let clusters: &[&[(f64, f64)]] = match scenario {
        Scenario::TwoClass => &[
            &[
                (0.30, 0.30),
                (0.25, 0.40),
                (0.35, 0.25),
                (0.20, 0.32),
                (0.33, 0.38),
            ],
            &[
                (0.70, 0.70),
                (0.75, 0.62),
                (0.65, 0.75),
                (0.80, 0.68),
                (0.68, 0.60),
            ],
        ],
        Scenario::ThreeClass => &[
            &[(0.20, 0.20), (0.25, 0.15), (0.15, 0.25)],
            &[(0.80, 0.20), (0.75, 0.15), (0.85, 0.25)],
            &[(0.50, 0.80), (0.45, 0.75), (0.55, 0.85)],
        ],
        Scenario::Regression => &[&[
            (0.05, 0.32),
            (0.15, 0.36),
            (0.25, 0.38),
            (0.35, 0.45),
            (0.45, 0.47),
            (0.55, 0.53),
            (0.65, 0.55),
            (0.75, 0.61),
            (0.85, 0.63),
            (0.95, 0.68),
        ]],
    };

    for (i, cluster) in clusters.iter().enumerate() {
        for &(fx, fy) in cluster.iter() {
            session.click(fx * width, fy * height);
        }
        if i + 1 < clusters.len() {
            session.next_color();
        }
    }
}

fn print_report(report: &TrainReport, params: &str) {
    println!("=== Train/Render Cycle ===");
    println!("Parameters:  {params}");
    println!("Model kind:  {:?}", report.kind);
    println!("Points:      {}", report.points);
    println!("Predictions: {}", report.predictions);
    println!("Finished:    {}", report.completed_at.to_rfc3339());
}

fn shell_command(args: ShellArgs) -> Result<()> {
    let config = load_config(&args.config)?;
    let mut session = Session::new(config, ReferenceSolver::new())?;
    let default_params = session.config().params.clone();

    println!(
        "svm-toy shell ({}x{} canvas)",
        session.config().width,
        session.config().height
    );
    println!("commands: point X Y | color | clear | run [params] | show | help | quit");

    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break; // EOF
        }

        match run_shell_line(&mut session, line.trim(), &default_params, args.preview_width) {
            Ok(ShellOutcome::Continue) => {}
            Ok(ShellOutcome::Quit) => break,
            Err(e) => println!("error: {e}"),
        }
    }

    Ok(())
}

enum ShellOutcome {
    Continue,
    Quit,
}

fn run_shell_line(
    session: &mut Session<ReferenceSolver>,
    line: &str,
    default_params: &str,
    preview_width: u32,
) -> Result<ShellOutcome> {
    let mut words = line.split_whitespace();
    match words.next() {
        None => {}
        Some("point") => {
            let x = parse_coordinate(words.next())?;
            let y = parse_coordinate(words.next())?;
            session.click(x, y);
            println!(
                "point {} placed with color {}",
                session.points().len(),
                session.current_color()
            );
        }
        Some("color") => {
            session.next_color();
            println!("current color: {}", session.current_color());
        }
        Some("clear") => {
            session.clear();
            println!("cleared");
        }
        Some("run") => {
            let rest = line["run".len()..].trim();
            let params = if rest.is_empty() { default_params } else { rest };
            let report = session.run(params)?;
            print_report(&report, params);
        }
        Some("show") => {
            let palette = session.config().palette.clone();
            print!(
                "{}",
                render_preview(session.canvas(), &palette, preview_width)
            );
        }
        Some("help") => {
            println!("commands: point X Y | color | clear | run [params] | show | help | quit");
        }
        Some("quit") | Some("exit") => return Ok(ShellOutcome::Quit),
        Some(other) => println!("unknown command: {other} (try 'help')"),
    }
    Ok(ShellOutcome::Continue)
}

fn parse_coordinate(word: Option<&str>) -> Result<f64> {
    let word = word
        .ok_or_else(|| SvmToyError::InvalidParameter("point needs X and Y".to_string()))?;
    word.parse()
        .map_err(|_| SvmToyError::InvalidParameter(format!("not a coordinate: {word}")))
}

/// Downsample the canvas into a character grid. Terminal cells are about
/// twice as tall as they are wide, so the row count is halved. Each cell
/// scans its pixel block and keeps the most prominent glyph, so one-pixel
/// features like the regression curve survive the downsampling.
fn render_preview(canvas: &Canvas, palette: &Palette, columns: u32) -> String {
    let columns = columns.clamp(1, canvas.width());
    let rows = (columns * canvas.height() / canvas.width() / 2).max(1);

    let mut out = String::with_capacity((columns as usize + 1) * rows as usize);
    for row in 0..rows {
        let y0 = row * canvas.height() / rows;
        let y1 = ((row + 1) * canvas.height() / rows).max(y0 + 1);
        for col in 0..columns {
            let x0 = col * canvas.width() / columns;
            let x1 = ((col + 1) * canvas.width() / columns).max(x0 + 1);

            let mut best = ' ';
            for y in y0..y1 {
                for x in x0..x1 {
                    let glyph = canvas
                        .pixel(x, y)
                        .map_or(' ', |pixel| glyph_for(pixel, palette));
                    if glyph_priority(glyph) > glyph_priority(best) {
                        best = glyph;
                    }
                }
            }
            out.push(best);
        }
        out.push('\n');
    }
    out
}

fn glyph_priority(glyph: char) -> u8 {
    match glyph {
        '0'..='9' => 5,
        '*' => 4,
        '~' => 3,
        '?' => 2,
        ' ' => 0,
        _ => 1, // region shades
    }
}

fn glyph_for(pixel: [u8; 4], palette: &Palette) -> char {
    let [r, g, b, a] = pixel;
    if a == 0 {
        return ' ';
    }
    let color = Rgb::new(r, g, b);

    if let Some(class) = palette.point_colors.iter().position(|&c| c == color) {
        return char::from(b'0' + class as u8);
    }
    if let Some(class) = palette.region_colors.iter().position(|&c| c == color) {
        return ['.', 'o', 'x'][class];
    }
    if color == palette.curve_color {
        return '*';
    }
    if color == palette.tube_color {
        return '~';
    }
    '?'
}
