use std::{
    fs,
    fs::File,
    io,
    io::prelude::*,
    rc::Rc,
};

use docopt::Docopt;
use itertools::Itertools;
use rand::SeedableRng;
use rand_xorshift::XorShiftRng;
use serde_derive::Deserialize;

use mazecrawl::{
    game::{Game, GameConfig, StepOutcome},
    generators::START_CELL,
    grid_traits::GridDisplay,
    level::{Level, World},
    motion::{Facing, InputState},
    pathing::{self, PathDisplay, StartEndPointsDisplay},
};

const USAGE: &str = "Mazecrawl

Usage:
    mazecrawl -h | --help
    mazecrawl render [--config=<path>] [--maze-size=<n>] [--levels=<n>] [--seed=<s>] [--show-path] [--text-out=<path>]
    mazecrawl simulate [--config=<path>] [--maze-size=<n>] [--levels=<n>] [--seed=<s>] [--speed=<n>] [--ticks=<n>] [--forward] [--back] [--left] [--right] [--jump] [--yaw=<radians>] [--pitch=<radians>]

Options:
    -h --help              Show this screen.
    --config=<path>        RON file with game settings. Missing settings keep their defaults.
    --maze-size=<n>        Rooms along one side of every maze, 5 to 50. Overrides the config file.
    --levels=<n>           Number of mazes stacked on top of each other, 1 to 10. Overrides the config file.
    --seed=<s>             Seed for the random number generator. Random if not given.
    --show-path            Show the shortest route from the start cell to the exit of each level.
    --text-out=<path>      Output file path for the textual rendering instead of stdout.
    --speed=<n>            Player speed multiplier, 1 to 5. Overrides the config file.
    --ticks=<n>            Number of frames to simulate [default: 600].
    --forward              Hold the forward key for the whole simulation.
    --back                 Hold the back key for the whole simulation.
    --left                 Hold the strafe left key for the whole simulation.
    --right                Hold the strafe right key for the whole simulation.
    --jump                 Hold the jump key for the whole simulation.
    --yaw=<radians>        Initial view direction, 0 looks along -z [default: 0].
    --pitch=<radians>      Initial view pitch, positive looks up. Does not change ground speed [default: 0].
";
#[derive(Debug, Deserialize)]
struct CrawlArgs {
    cmd_render: bool,
    cmd_simulate: bool,
    flag_config: String,
    flag_maze_size: Option<usize>,
    flag_levels: Option<usize>,
    flag_seed: Option<u64>,
    flag_show_path: bool,
    flag_text_out: String,
    flag_speed: Option<f32>,
    flag_ticks: usize,
    flag_forward: bool,
    flag_back: bool,
    flag_left: bool,
    flag_right: bool,
    flag_jump: bool,
    flag_yaw: f32,
    flag_pitch: f32,
}

mod errors {
    use error_chain::*;
    error_chain! {

        links {
            Maze(::mazecrawl::errors::Error, ::mazecrawl::errors::ErrorKind);
        }

        foreign_links {
            DocOptFailure(::docopt::Error);
            Io(::std::io::Error);
        }

        errors {
            ParameterOutOfRange(name: &'static str, value: String, low: String, high: String) {
                description("command line parameter out of range")
                display("--{} must be between {} and {}, got {}", name, low, high, value)
            }
        }
    }
}
use crate::errors::*;

fn main() -> Result<()> {

    env_logger::init();

    let args: CrawlArgs = Docopt::new(USAGE).and_then(|d| d.deserialize())?;
    let config = game_config(&args)?;
    let rng = match args.flag_seed {
        Some(seed) => XorShiftRng::seed_from_u64(seed),
        None => XorShiftRng::from_entropy(),
    };

    if args.cmd_render {
        render(&args, &config, rng)
    } else if args.cmd_simulate {
        simulate(&args, config, rng)
    } else {
        Ok(())
    }
}

fn check_range<T>(name: &'static str, value: T, low: T, high: T) -> Result<T>
    where T: PartialOrd + ToString
{
    if value < low || value > high {
        return Err(ErrorKind::ParameterOutOfRange(name,
                                                  value.to_string(),
                                                  low.to_string(),
                                                  high.to_string()).into());
    }
    Ok(value)
}

/// Defaults, then the config file if one is given, then the command line flags.
fn game_config(args: &CrawlArgs) -> Result<GameConfig> {

    let mut config = if args.flag_config.is_empty() {
        GameConfig::default()
    } else {
        let text = fs::read_to_string(&args.flag_config)
            .chain_err(|| format!("Failed to read config file {}", args.flag_config))?;
        GameConfig::from_ron(&text)
            .chain_err(|| format!("Failed to parse config file {}", args.flag_config))?
    };

    if let Some(maze_size) = args.flag_maze_size {
        config.maze_size = maze_size;
    }
    if let Some(levels) = args.flag_levels {
        config.levels = levels;
    }
    if let Some(speed) = args.flag_speed {
        config.speed = speed;
    }

    let _ = check_range("maze-size", config.maze_size, 5, 50)?;
    let _ = check_range("levels", config.levels, 1, 10)?;
    let _ = check_range("speed", config.speed, 1.0, 5.0)?;
    Ok(config)
}

/// Text rendering of every level, bottom level first.
fn render(args: &CrawlArgs, config: &GameConfig, mut rng: XorShiftRng) -> Result<()> {

    let world = World::generate(config.maze_size(), config.levels(), config.level_spacing, &mut rng)?;
    let text = world.levels()
        .iter()
        .map(|level| render_level(level, args.flag_show_path))
        .join("\n");

    if args.flag_text_out.is_empty() {
        print!("{}", text);
    } else {
        write_text_to_file(&text, &args.flag_text_out)
            .chain_err(|| format!("Failed to write maze to text file {}", args.flag_text_out))?;
    }

    Ok(())
}

/// Start and exit markers, or the route between them when `show_path` is set and one exists.
fn render_level(level: &Level, show_path: bool) -> String {

    let mut grid = level.grid.clone();
    let exit = level.exit.cell;

    let path = if show_path {
        pathing::Distances::<u32>::new(&grid, START_CELL)
            .and_then(|distances| pathing::shortest_path(&grid, &distances, exit))
    } else {
        None
    };

    let display: Rc<dyn GridDisplay> = match path {
        Some(path) => Rc::new(PathDisplay::new(&path)),
        None => Rc::new(StartEndPointsDisplay::new(&[START_CELL], &[exit])),
    };
    grid.set_grid_display(Some(display));

    format!("level {} (height {})\n{}", level.index.0, level.y_offset, grid)
}

/// Run the game loop without a window, holding the same keys every frame.
fn simulate(args: &CrawlArgs, config: GameConfig, rng: XorShiftRng) -> Result<()> {

    let mut game = Game::new(config, rng)?;
    game.set_facing(Facing { yaw: args.flag_yaw, pitch: args.flag_pitch });

    let input = InputState {
        forward: args.flag_forward,
        back: args.flag_back,
        left: args.flag_left,
        right: args.flag_right,
        jump: args.flag_jump,
        ..InputState::default()
    };

    let mut respawns = 0;
    let mut exits = 0;
    for _ in 0..args.flag_ticks {
        match game.step(&input, 1.0)? {
            StepOutcome::Moved => {}
            StepOutcome::Respawned => respawns += 1,
            StepOutcome::ExitReached { .. } => exits += 1,
        }
    }

    let player = game.player();
    let scoreboard = game.scoreboard();
    println!("ticks:      {}", args.flag_ticks);
    println!("position:   {:.3} {:.3} {:.3}", player.position.x, player.position.y, player.position.z);
    println!("velocity:   {:.3} {:.3} {:.3}", player.velocity.x, player.velocity.y, player.velocity.z);
    println!("grounded:   {}", player.grounded);
    println!("exits:      {}", exits);
    println!("respawns:   {}", respawns);
    println!("score:      {} (best {})", scoreboard.score.0, scoreboard.high_score.0);

    Ok(())
}

fn write_text_to_file(data: &str, file_name: &str) -> io::Result<()> {
    let mut f = File::create(file_name)?;
    f.write_all(data.as_bytes())?;
    Ok(())
}
