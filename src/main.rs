//! Task Bubble Simulation
//!
//! Headless runner: seeds a board with demo tasks and habits, advances it at
//! the configured tick cadence and optionally writes a PNG snapshot.

use std::path::PathBuf;
use std::time::Instant;

use clap::Parser;

use task_bubble_sim::config::SimulationConfig;
use task_bubble_sim::export::export_frame_buffer;
use task_bubble_sim::physics::{Priority, palette_color};
use task_bubble_sim::render::{FrameBuffer, MAX_FRAME_SIDE, frame_size};
use task_bubble_sim::BubbleBoard;

/// Bubble board physics runner
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Override viewport width (pixels, before inset)
    #[arg(long)]
    width: Option<f32>,

    /// Override viewport height (pixels, before inset)
    #[arg(long)]
    height: Option<f32>,

    /// Number of ticks to simulate
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Seed for spawn velocities
    #[arg(long)]
    seed: Option<u64>,

    /// Sleep one tick period between ticks
    #[arg(long)]
    realtime: bool,

    /// Write the final frame to this PNG file
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn seed_demo(board: &mut BubbleBoard) {
    let tasks = [
        ("Write weekly report", Priority::High),
        ("Book dentist", Priority::Medium),
        ("Water plants", Priority::Low),
        ("Reply to Sam", Priority::Medium),
        ("Renew passport", Priority::High),
    ];
    for (i, (label, priority)) in tasks.iter().enumerate() {
        board.add_task(*label, *priority, palette_color(i));
    }

    board.add_habit("Stretch", vec![1, 2, 3, 4, 5], palette_color(5));
    board.add_habit("Read 20 pages", vec![0, 6], palette_color(6));
    board.add_habit("Drink water", (0..7).collect(), palette_color(7));
}

/// Grab the first task, pull it across the board and let go.
fn demo_throw(board: &mut BubbleBoard) {
    let Some((id, start)) = board.tasks().first().map(|b| (b.id, b.position)) else {
        return;
    };

    board.start_drag(id);
    for step in 1..=10 {
        board.drag_to(id, start.x - 6.0 * step as f32, start.y + 4.0 * step as f32);
        board.tick();
    }
    if let Some(v) = board.end_drag(id) {
        log::info!("Threw bubble {} at ({:.1}, {:.1})", id, v.x, v.y);
    }
}

fn main() {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();

    let mut config = if let Some(ref path) = args.config {
        match SimulationConfig::from_file(path) {
            Ok(cfg) => {
                log::info!("Loaded config from {}", path);
                cfg
            }
            Err(e) => {
                log::warn!("Failed to load config: {}, using defaults", e);
                SimulationConfig::default()
            }
        }
    } else {
        SimulationConfig::default()
    };

    if args.seed.is_some() {
        config.seed = args.seed;
    }

    let mut board = BubbleBoard::new(&config);
    if args.width.is_some() || args.height.is_some() {
        let inset = config.canvas.inset as f32;
        let width = args.width.unwrap_or(config.canvas.width as f32 + inset);
        let height = args.height.unwrap_or(config.canvas.height as f32 + inset);
        board.resize(width, height);
    }

    seed_demo(&mut board);
    log::info!(
        "Starting simulation: {} bubbles on {}x{} canvas, {} ticks",
        board.len(),
        board.canvas().width,
        board.canvas().height,
        args.ticks
    );

    let started = Instant::now();
    let interval = config.tick_interval();
    let throw_at = args.ticks / 2;

    for tick in 0..args.ticks {
        if tick == throw_at {
            demo_throw(&mut board);
        }
        board.tick();
        if args.realtime {
            std::thread::sleep(interval);
        }
    }

    let elapsed = started.elapsed();
    let canvas = board.canvas();
    let escaped = board
        .tasks()
        .iter()
        .filter(|b| !canvas.contains(b.position, b.radius))
        .count()
        + board
            .habits()
            .iter()
            .filter(|b| !canvas.contains(b.position, b.radius))
            .count();

    log::info!(
        "Ran {} ticks in {:.2?} ({:.1} us/tick), kinetic energy {:.4}, {} bubbles outside walls",
        board.tick_count(),
        elapsed,
        elapsed.as_secs_f64() * 1e6 / board.tick_count().max(1) as f64,
        board.kinetic_energy(),
        escaped
    );

    if let Some(path) = args.snapshot {
        let (width, height) = frame_size(canvas);
        if width as f32 != canvas.width.trunc() || height as f32 != canvas.height.trunc() {
            log::warn!(
                "Snapshot of {}x{} canvas clamped to {}x{} (max side {})",
                canvas.width,
                canvas.height,
                width,
                height,
                MAX_FRAME_SIDE
            );
        }
        let mut frame = FrameBuffer::for_canvas(canvas);
        frame.render_board(&board);

        if let Err(e) = export_frame_buffer(&path, &frame) {
            log::error!("Snapshot export failed: {}", e);
            std::process::exit(1);
        }
    }
}
