//! Vector Rocks headless host
//!
//! Drives the simulation at its fixed tick with a simple autopilot standing
//! in for keyboard input, and logs what happens. With `--json` every
//! rendered frame is written to stdout as a snapshot for an external
//! renderer.
//!
//! Usage: vector-rocks [SETTINGS.json] [--ticks N] [--realtime] [--json]

use std::time::Instant;

use vector_rocks::driver::{Driver, RunState};
use vector_rocks::render::{Snapshot, Vertex, outline_vertices};
use vector_rocks::sim::{Intent, VectorEntity, World};
use vector_rocks::{Settings, normalize_degrees};

/// Ticks between HUD log lines
const STATUS_INTERVAL: u64 = 50;
/// Autopilot fires at most once every this many ticks
const FIRE_INTERVAL: u64 = 4;

struct Options {
    settings_path: Option<String>,
    ticks: u64,
    realtime: bool,
    json: bool,
}

fn parse_args() -> Options {
    let mut options = Options {
        settings_path: None,
        ticks: 3000,
        realtime: false,
        json: false,
    };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--ticks" => match args.next().and_then(|n| n.parse().ok()) {
                Some(n) => options.ticks = n,
                None => log::warn!("--ticks needs a number; keeping {}", options.ticks),
            },
            "--realtime" => options.realtime = true,
            "--json" => options.json = true,
            path => options.settings_path = Some(path.to_string()),
        }
    }
    options
}

/// Stand-in for the keyboard: turn toward the nearest rock and shoot it
fn autopilot(world: &World) -> [Option<Intent>; 2] {
    let craft = &world.craft;
    let Some(target) = world.obstacles.iter_alive().min_by(|a, b| {
        a.pos()
            .distance_squared(craft.pos())
            .total_cmp(&b.pos().distance_squared(craft.pos()))
    }) else {
        return [None, None];
    };

    let to_target = target.pos() - craft.pos();
    // Facing is heading + 90 (zero facing points up the screen)
    let wanted = normalize_degrees(to_target.y.atan2(to_target.x).to_degrees() + 90.0);
    let diff = normalize_degrees(wanted - craft.face_angle);

    let aim = if diff <= world.tuning.rotation_step || diff >= 360.0 - world.tuning.rotation_step {
        (world.time_ticks % FIRE_INTERVAL == 0).then_some(Intent::Fire)
    } else if diff < 180.0 {
        Some(Intent::RotateRight)
    } else {
        Some(Intent::RotateLeft)
    };

    // Keep drifting a little so wraparound gets exercised
    let drift =
        (craft.vel().length() < 0.5 && world.time_ticks % 60 == 0).then_some(Intent::Thrust);

    [aim, drift]
}

fn render(driver: &Driver, buffer: &mut Vec<Vertex>, json: bool) {
    let snapshot = Snapshot::capture(driver.world());
    outline_vertices(&snapshot, buffer);

    if json {
        match snapshot.to_json() {
            Ok(line) => println!("{line}"),
            Err(e) => log::error!("Snapshot serialization failed: {e}"),
        }
    }

    if snapshot.tick % STATUS_INTERVAL == 0 {
        let [ship, move_angle, face_angle] = snapshot.status_lines();
        log::info!(
            "tick {} | {ship} | {move_angle} | {face_angle} | rocks {} | shots {} | {} verts",
            snapshot.tick,
            snapshot.obstacles.len(),
            snapshot.projectiles.len(),
            buffer.len()
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let options = parse_args();
    let settings = match &options.settings_path {
        Some(path) => Settings::load_or_default(path),
        None => Settings::default(),
    };
    log::info!("Vector Rocks (headless) starting...");

    let mut driver = match Driver::new(&settings) {
        Ok(driver) => driver,
        Err(e) => {
            log::error!("Cannot start: {e}");
            std::process::exit(1);
        }
    };
    let mut buffer: Vec<Vertex> = Vec::with_capacity(1024);
    let mut last = Instant::now();

    while driver.state() == RunState::Running {
        for intent in autopilot(driver.world()).into_iter().flatten() {
            driver.push_intent(intent);
        }

        if options.realtime {
            let now = Instant::now();
            let ran = driver.advance(now - last);
            last = now;
            std::thread::sleep(driver.tick_period().saturating_sub(last.elapsed()));
            if ran == 0 {
                continue;
            }
        } else {
            driver.step();
        }

        render(&driver, &mut buffer, options.json);

        let ticks = driver.world().time_ticks;
        if ticks >= options.ticks {
            driver.stop();
        } else if driver.world().obstacles.alive_count() == 0 {
            log::info!("Field cleared at tick {ticks}");
            driver.stop();
        }
    }

    let stats = driver.stats();
    println!(
        "ticks={} obstacles_shot={} craft_resets={} projectiles_culled={}",
        stats.ticks, stats.obstacles_shot, stats.craft_resets, stats.projectiles_culled
    );
}
