//! Discrete step player movement against box geometry.
//!
//! Each tick moves the player along X, then Z, then Y. Every axis is tested on its own: the
//! player's box is placed at the position moved along that axis only, and the move is dropped if
//! the box overlaps any collidable. Dropping one axis keeps the others, which lets the player slide
//! along walls without contact normals or swept collision.

use glam::Vec3;
use log::trace;
use serde_derive::Deserialize;

use crate::geometry::{self, Aabb, Collidable};
use crate::units::SpeedMultiplier;

/// Radians the view turns per tick while a turn input is held.
pub const TURN_RATE: f32 = 0.03;

#[derive(Debug, Copy, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MotionParams {
    /// Horizontal distance per tick at a speed multiplier of 1.
    pub base_speed: f32,
    /// Vertical velocity change per tick. Negative pulls down.
    pub gravity: f32,
    /// Vertical velocity set by a jump.
    pub jump_strength: f32,
    /// Half the side of the player's cube.
    pub half_extent: f32,
}

impl Default for MotionParams {
    fn default() -> MotionParams {
        MotionParams {
            base_speed: 0.025,
            gravity: -0.05,
            jump_strength: 0.35,
            half_extent: 0.25,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    pub velocity: Vec3,
    pub grounded: bool,
}

impl PlayerState {
    /// An airborne, motionless player.
    pub fn at(position: Vec3) -> PlayerState {
        PlayerState {
            position,
            velocity: Vec3::ZERO,
            grounded: false,
        }
    }

    /// Move the player somewhere else, dropping any momentum.
    pub fn reposition(&mut self, position: Vec3) {
        self.position = position;
        self.velocity = Vec3::ZERO;
        self.grounded = false;
    }

    pub fn bounds(&self, half_extent: f32) -> Aabb {
        player_bounds(self.position, half_extent)
    }
}

/// Held inputs for one tick. Movement inputs add up, so forward and right together walk diagonally.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub left: bool,
    pub right: bool,
    pub jump: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// World space view direction; pitch is ignored when moving.
    pub look: Vec3,
}

impl Default for InputState {
    fn default() -> InputState {
        InputState {
            forward: false,
            back: false,
            left: false,
            right: false,
            jump: false,
            turn_left: false,
            turn_right: false,
            look: Vec3::NEG_Z,
        }
    }
}

/// View orientation. Yaw 0 looks down -Z; positive yaw turns left.
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct Facing {
    pub yaw: f32,
    pub pitch: f32,
}

impl Facing {
    pub fn direction(&self) -> Vec3 {
        let (sin_yaw, cos_yaw) = self.yaw.sin_cos();
        let (sin_pitch, cos_pitch) = self.pitch.sin_cos();
        Vec3::new(-sin_yaw * cos_pitch, sin_pitch, -cos_yaw * cos_pitch)
    }

    /// Apply the turn inputs of one tick.
    pub fn turn(&mut self, input: &InputState, rate: f32) {
        if input.turn_left {
            self.yaw += rate;
        }
        if input.turn_right {
            self.yaw -= rate;
        }
    }
}

/// Forward and right unit vectors on the ground plane for a view direction.
///
/// Looking straight up or down leaves no horizontal component, both vectors are then zero.
pub fn horizontal_basis(look: Vec3) -> (Vec3, Vec3) {
    let forward = Vec3::new(look.x, 0.0, look.z).normalize_or_zero();
    let right = forward.cross(Vec3::Y).normalize_or_zero();
    (forward, right)
}

/// Horizontal displacement wanted this tick.
///
/// The summed input direction is normalised so diagonals are no faster than straight lines.
pub fn move_intent(input: &InputState,
                   params: &MotionParams,
                   speed: SpeedMultiplier,
                   dt: f32)
                   -> Vec3 {
    let (forward, right) = horizontal_basis(input.look);

    let mut direction = Vec3::ZERO;
    if input.forward {
        direction += forward;
    }
    if input.back {
        direction -= forward;
    }
    if input.left {
        direction -= right;
    }
    if input.right {
        direction += right;
    }

    direction.normalize_or_zero() * (params.base_speed * speed.0 * dt)
}

#[inline]
pub fn player_bounds(position: Vec3, half_extent: f32) -> Aabb {
    Aabb::from_center_half_extents(position, Vec3::splat(half_extent))
}

/// Advance the player by one simulation step.
///
/// Axes resolve in the fixed order X, Z, Y with no second pass. A blocked horizontal axis only
/// loses its displacement. A blocked fall zeroes vertical velocity and grounds the player; a
/// blocked rise keeps its velocity.
pub fn tick(state: &PlayerState,
            input: &InputState,
            collidables: &[Collidable],
            params: &MotionParams,
            speed: SpeedMultiplier,
            dt: f32)
            -> PlayerState {

    let mut next = *state;
    let intent = move_intent(input, params, speed, dt);

    if input.jump && next.grounded {
        next.velocity.y = params.jump_strength;
        next.grounded = false;
    }

    next.velocity.y += params.gravity * dt;

    let blocked = |proposed: Vec3| {
        geometry::collides(&player_bounds(proposed, params.half_extent), collidables)
    };

    let proposed_x = next.position + Vec3::new(intent.x, 0.0, 0.0);
    if !blocked(proposed_x) {
        next.position.x = proposed_x.x;
    }

    let proposed_z = next.position + Vec3::new(0.0, 0.0, intent.z);
    if !blocked(proposed_z) {
        next.position.z = proposed_z.z;
    }

    let proposed_y = next.position + Vec3::new(0.0, next.velocity.y * dt, 0.0);
    let was_grounded = state.grounded;
    next.grounded = false;
    if !blocked(proposed_y) {
        next.position.y = proposed_y.y;
    } else if next.velocity.y < 0.0 {
        next.velocity.y = 0.0;
        next.grounded = true;
        if !was_grounded {
            trace!("landed at {:?}", next.position);
        }
    }

    next
}
