//! A play session: the current world, the player, the view and the score.

use std::mem;

use glam::Vec3;
use log::{debug, info};
use rand::Rng;
use serde_derive::Deserialize;

use crate::errors::*;
use crate::level::{World, DEFAULT_LEVEL_SPACING};
use crate::motion::{self, Facing, InputState, MotionParams, PlayerState, TURN_RATE};
use crate::units::{LevelIndex, LevelsCount, MazeSize, Points, SpeedMultiplier};

/// Falling below this height counts as leaving the world.
pub const FALL_THRESHOLD: f32 = -20.0;
/// How close the player's centre has to get to an exit marker to reach it.
pub const EXIT_RADIUS: f32 = 0.5;
/// Height above the top level at which the player appears.
pub const SPAWN_CLEARANCE: f32 = 2.0;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub maze_size: usize,
    pub levels: usize,
    pub speed: f32,
    pub level_spacing: f32,
    pub spawn_clearance: f32,
    pub fall_threshold: f32,
    pub exit_radius: f32,
    pub turn_rate: f32,
    pub motion: MotionParams,
}

impl Default for GameConfig {
    fn default() -> GameConfig {
        GameConfig {
            maze_size: 5,
            levels: 1,
            speed: 1.0,
            level_spacing: DEFAULT_LEVEL_SPACING,
            spawn_clearance: SPAWN_CLEARANCE,
            fall_threshold: FALL_THRESHOLD,
            exit_radius: EXIT_RADIUS,
            turn_rate: TURN_RATE,
            motion: MotionParams::default(),
        }
    }
}

impl GameConfig {
    /// Parse a RON config. Missing fields keep their defaults.
    pub fn from_ron(text: &str) -> Result<GameConfig> {
        let config = ron::de::from_str(text)?;
        Ok(config)
    }

    #[inline]
    pub fn maze_size(&self) -> MazeSize {
        MazeSize(self.maze_size)
    }

    #[inline]
    pub fn levels(&self) -> LevelsCount {
        LevelsCount(self.levels)
    }

    #[inline]
    pub fn speed(&self) -> SpeedMultiplier {
        SpeedMultiplier(self.speed)
    }
}

#[derive(Debug, Copy, Clone, Eq, PartialEq, Default)]
pub struct Scoreboard {
    pub score: Points,
    pub high_score: Points,
}

impl Scoreboard {
    pub fn award(&mut self, points: Points) {
        self.score = Points(self.score.0.saturating_add(points.0));
        self.high_score = self.high_score.max(self.score);
    }

    pub fn reset(&mut self) {
        self.score = Points(0);
    }
}

/// Owner of the active world. A replacement world is built completely before it is swapped in.
#[derive(Debug)]
pub struct CurrentWorld {
    world: World,
}

impl CurrentWorld {
    pub fn new(world: World) -> CurrentWorld {
        CurrentWorld { world }
    }

    #[inline]
    pub fn get(&self) -> &World {
        &self.world
    }

    /// Install a new world, handing back the one it replaces.
    pub fn install(&mut self, world: World) -> World {
        mem::replace(&mut self.world, world)
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub enum StepOutcome {
    Moved,
    Respawned,
    ExitReached { level: LevelIndex, points: Points },
}

/// Is a player at `position` strictly closer than `radius` to an exit marker at `exit_position`.
#[inline]
pub fn exit_reached(position: Vec3, exit_position: Vec3, radius: f32) -> bool {
    position.distance(exit_position) < radius
}

#[derive(Debug)]
pub struct Game<R: Rng> {
    config: GameConfig,
    world: CurrentWorld,
    player: PlayerState,
    facing: Facing,
    scoreboard: Scoreboard,
    rng: R,
}

impl<R: Rng> Game<R> {
    /// Generate the first world and place the player at the spawn point.
    pub fn new(config: GameConfig, mut rng: R) -> Result<Game<R>> {
        let world = World::generate(config.maze_size(), config.levels(), config.level_spacing, &mut rng)?;
        let mut game = Game {
            config,
            world: CurrentWorld::new(world),
            player: PlayerState::at(Vec3::ZERO),
            facing: Facing::default(),
            scoreboard: Scoreboard::default(),
            rng,
        };
        let spawn = game.spawn_point();
        game.player.reposition(spawn);
        Ok(game)
    }

    /// Change the maze dimensions and regenerate every level.
    ///
    /// On error the current world and settings are left as they were.
    pub fn configure(&mut self, maze_size: MazeSize, levels: LevelsCount) -> Result<()> {
        let world = World::generate(maze_size, levels, self.config.level_spacing, &mut self.rng)
            .chain_err(|| format!("failed to configure {:?} with {:?}", maze_size, levels))?;
        self.config.maze_size = maze_size.0;
        self.config.levels = levels.0;
        self.install(world);
        Ok(())
    }

    /// Replace every level with freshly generated ones and move the player to the new spawn point.
    pub fn regenerate(&mut self) -> Result<()> {
        let world = World::generate(self.config.maze_size(),
                                    self.config.levels(),
                                    self.config.level_spacing,
                                    &mut self.rng)?;
        self.install(world);
        Ok(())
    }

    fn install(&mut self, world: World) {
        let _ = self.world.install(world);
        let spawn = self.spawn_point();
        self.player.reposition(spawn);
        debug!("new world installed, player at {:?}", spawn);
    }

    pub fn spawn_point(&self) -> Vec3 {
        Vec3::new(1.0,
                  self.world.get().top_level_offset() + self.config.spawn_clearance,
                  1.0)
    }

    /// Back to the spawn point with the score cleared. The levels stay as they are.
    pub fn respawn(&mut self) {
        self.scoreboard.reset();
        let spawn = self.spawn_point();
        self.player.reposition(spawn);
        info!("respawned at {:?}", spawn);
    }

    /// Advance the session by one frame.
    pub fn step(&mut self, input: &InputState, dt: f32) -> Result<StepOutcome> {

        if self.player.position.y < self.config.fall_threshold {
            self.respawn();
            return Ok(StepOutcome::Respawned);
        }

        self.facing.turn(input, self.config.turn_rate);
        let input = InputState { look: self.facing.direction(), ..*input };

        self.player = motion::tick(&self.player,
                                   &input,
                                   self.world.get().collidables(),
                                   &self.config.motion,
                                   self.config.speed(),
                                   dt);

        let position = self.player.position;
        let exit_radius = self.config.exit_radius;
        let reached = self.world
            .get()
            .levels()
            .iter()
            .find(|level| exit_reached(position, level.exit.position, exit_radius))
            .map(|level| level.index);

        if let Some(level) = reached {
            let points = self.config.maze_size().points();
            self.scoreboard.award(points);
            info!("exit of level {} reached, score {} (best {})",
                  level.0, self.scoreboard.score.0, self.scoreboard.high_score.0);
            self.regenerate()?;
            return Ok(StepOutcome::ExitReached { level, points });
        }

        Ok(StepOutcome::Moved)
    }

    #[inline]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    #[inline]
    pub fn world(&self) -> &World {
        self.world.get()
    }

    #[inline]
    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    /// Place the player directly, dropping momentum.
    pub fn teleport(&mut self, position: Vec3) {
        self.player.reposition(position);
    }

    #[inline]
    pub fn facing(&self) -> Facing {
        self.facing
    }

    pub fn set_facing(&mut self, facing: Facing) {
        self.facing = facing;
    }

    #[inline]
    pub fn scoreboard(&self) -> Scoreboard {
        self.scoreboard
    }
}
