//! Projectiles
//!
//! Owns the fire action and the per-frame projectile pass: integrate,
//! kill on wall/lifetime/bounds, resolve enemy hits, purge the dead.
//! Projectiles live in plain pixel space; unlike walkers their speed is
//! not tile-scaled.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::collision;
use crate::game::events::GameEvent;
use crate::game::state::LevelState;

/// Coins awarded for killing an enemy with a projectile.
pub const KILL_BONUS: u32 = 2;

/// Tuning for the player's fire action.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShotConfig {
    /// Minimum seconds between shots.
    pub cooldown: f32,
    /// Projectile speed in pixels per second.
    pub speed: f32,
    /// Damage per hit (enemies die in one, kept for tuning headroom).
    pub damage: u32,
    /// Seconds a projectile stays alive without hitting anything.
    pub lifetime: f32,
    /// Projectile radius as a fraction of the tile edge.
    pub radius_frac: f32,
}

impl Default for ShotConfig {
    fn default() -> Self {
        Self {
            cooldown: 0.3,
            speed: 500.0,
            damage: 1,
            lifetime: 1.5,
            radius_frac: 0.15,
        }
    }
}

/// One projectile in flight.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Projectile {
    /// Pixel-space center.
    pub position: Vec2,
    /// Unit direction of travel. Never zero-length.
    pub direction: Vec2,
    /// Speed in pixels per second.
    pub speed: f32,
    /// Damage on enemy contact.
    pub damage: u32,
    /// Collision radius in pixels.
    pub radius: f32,
    /// Seconds of flight remaining.
    pub lifetime: f32,
    /// Cleared on wall hit, lifetime expiry, leaving bounds or enemy hit.
    pub alive: bool,
}

/// Fire a projectile from the player toward `aim`.
///
/// No-op while on cooldown or without a player. With no aim point the
/// shot travels right; an aim point on top of the player also falls
/// back to rightward so the direction is never zero-length.
pub fn fire_at(state: &mut LevelState, aim: Option<Vec2>, config: &ShotConfig) {
    if !state.can_fire {
        return;
    }
    let Some(player) = state.registry.player() else {
        return;
    };

    let origin = player.position;
    let direction = match aim {
        Some(target) => (target - origin).normalize_or(Vec2::RIGHT),
        None => Vec2::RIGHT,
    };

    state.projectiles.push(Projectile {
        position: origin,
        direction,
        speed: config.speed,
        damage: config.damage,
        radius: state.grid.tile_size() * config.radius_frac,
        lifetime: config.lifetime,
        alive: true,
    });

    state.can_fire = false;
    state.fire_cooldown = config.cooldown;

    let frame = state.frame;
    state.push_event(GameEvent::shot_fired(frame, origin, direction));
}

/// Advance cooldown and all projectiles by `dt`.
///
/// Runs once per step. Dead projectiles are marked during the pass and
/// compacted at the end, so iteration never mutates the collection
/// structurally mid-scan.
pub fn advance(state: &mut LevelState, dt: f32) {
    // 1. Cooldown gate.
    if !state.can_fire {
        state.fire_cooldown -= dt;
        if state.fire_cooldown <= 0.0 {
            state.fire_cooldown = 0.0;
            state.can_fire = true;
        }
    }

    // 2. Integrate and resolve wall / lifetime / bounds deaths.
    let bounds_x = state.grid.pixel_width();
    let bounds_y = state.grid.pixel_height();
    for projectile in &mut state.projectiles {
        projectile.position = projectile.position + projectile.direction * (projectile.speed * dt);
        projectile.lifetime -= dt;

        let hit_wall = collision::is_wall_at(
            &state.grid,
            projectile.position.x,
            projectile.position.y,
            projectile.radius,
        );
        let out_of_bounds = projectile.position.x < 0.0
            || projectile.position.x > bounds_x
            || projectile.position.y < 0.0
            || projectile.position.y > bounds_y;

        if hit_wall || projectile.lifetime <= 0.0 || out_of_bounds {
            projectile.alive = false;
        }
    }

    // 3. Enemy hits: first overlap wins, at most one kill per projectile.
    let enemies: Vec<_> = state
        .registry
        .enemies()
        .map(|e| (e.id, e.position, e.radius))
        .collect();
    let mut killed = Vec::new();

    for projectile in &mut state.projectiles {
        if !projectile.alive {
            continue;
        }
        for &(id, position, radius) in &enemies {
            if killed.contains(&id) {
                continue;
            }
            if collision::circles_overlap(projectile.position, projectile.radius, position, radius)
            {
                killed.push(id);
                projectile.alive = false;
                break;
            }
        }
    }

    for id in killed {
        state.registry.remove(id);
        state.coins += KILL_BONUS;
        let frame = state.frame;
        let total = state.coins;
        state.push_event(GameEvent::enemy_killed(frame, id, KILL_BONUS, total));
    }

    // 4. Purge everything marked dead this pass.
    state.projectiles.retain(|p| p.alive);
}
