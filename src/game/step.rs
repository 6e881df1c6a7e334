//! Simulation Step
//!
//! The per-frame heart of the game. An external driver calls
//! [`step`] once per rendered frame with the elapsed time; the step
//! runs to completion synchronously and mutates the level state in a
//! fixed order: player movement, projectiles, enemies, pickups, win
//! check, clock. `dt` is trusted as supplied; there is no internal
//! clamping, so an absurdly large value can tunnel entities through
//! walls (accepted edge case for a frame-driven core).

use crate::game::collision;
use crate::game::enemy;
use crate::game::entity::EntityKind;
use crate::game::events::GameEvent;
use crate::game::input::MoveIntent;
use crate::game::maze::{GenerationConfig, GenerationError};
use crate::game::projectile;
use crate::game::state::LevelState;
use crate::{REFERENCE_FPS, SPEED_TILE_DIVISOR};

/// Result of a step.
#[derive(Debug, Default)]
pub struct StepResult {
    /// Events generated this step.
    pub events: Vec<GameEvent>,
    /// Whether the player reached the exit this step.
    pub won: bool,
}

/// Run one simulation step.
///
/// No-op outside the `Running` phase. Events raised during the step
/// (and any still pending from commands issued between steps) are
/// drained into the result.
pub fn step(state: &mut LevelState, intent: MoveIntent, dt: f32) -> StepResult {
    let mut result = StepResult::default();
    if !state.is_running() {
        return result;
    }

    state.frame += 1;

    // 1. Player movement with per-axis wall acceptance.
    move_player(state, intent, dt);

    // 2. Projectiles (cooldown, flight, enemy hits).
    projectile::advance(state, dt);

    // 3. Enemy patrols and contact damage.
    update_enemies(state, dt);

    // 4. Coin pickups.
    collect_coins(state);

    // 5. Exit check.
    check_exit(state, &mut result);

    // 6. Simulated-seconds clock.
    advance_clock(state, dt);

    result.events = state.take_events();
    result
}

/// Apply movement intent to the player, one axis at a time.
///
/// X and Y are accepted independently so a blocked axis still allows
/// sliding along the other.
fn move_player(state: &mut LevelState, intent: MoveIntent, dt: f32) {
    let Some(entity) = state.registry.player() else {
        return;
    };
    let EntityKind::Player(data) = &entity.kind else {
        return;
    };

    let speed = data.speed * state.grid.tile_size() / SPEED_TILE_DIVISOR;
    let radius = entity.radius;
    let mut position = entity.position;

    let nx = position.x + intent.dx() * speed * dt * REFERENCE_FPS;
    let ny = position.y + intent.dy() * speed * dt * REFERENCE_FPS;

    if !collision::is_wall_at(&state.grid, nx, position.y, radius) {
        position.x = nx;
    }
    if !collision::is_wall_at(&state.grid, position.x, ny, radius) {
        position.y = ny;
    }

    if let Some(player) = state.registry.player_mut() {
        player.position = position;
    }
}

/// Advance every living enemy and resolve player contact.
///
/// A contact drains life every overlapping frame. Running out of life
/// respawns the player in place: life back to max, position back to
/// the entrance, coin count halved. The session keeps running.
fn update_enemies(state: &mut LevelState, dt: f32) {
    let Some(player) = state.registry.player() else {
        return;
    };
    let mut player_pos = player.position;
    let player_radius = player.radius;

    for id in state.registry.enemy_ids() {
        let Some(entity) = state.registry.get_mut(id) else {
            continue;
        };
        let radius = entity.radius;
        let position = entity.position;
        let Some(data) = entity.as_enemy_mut() else {
            continue;
        };
        if !data.alive {
            continue;
        }
        let damage = data.damage;

        let moved = enemy::patrol_step(&state.grid, position, radius, data, dt);
        entity.position = moved;

        if !collision::circles_overlap(player_pos, player_radius, moved, radius) {
            continue;
        }

        // Contact: apply damage, maybe death/respawn.
        let frame = state.frame;
        let mut life_remaining = 0;
        let mut died = false;
        if let Some(player) = state.registry.player_mut() {
            if let EntityKind::Player(pd) = &mut player.kind {
                pd.life -= damage as i32;
                life_remaining = pd.life;
                if pd.life <= 0 {
                    pd.life = pd.max_life;
                    player.position = pd.start_position;
                    died = true;
                }
            }
        }

        state.push_event(GameEvent::player_damaged(frame, damage, life_remaining));

        if died {
            state.coins /= 2;
            let coins = state.coins;
            state.push_event(GameEvent::player_died(frame, coins));

            // Later enemies this frame test against the respawn position.
            if let Some(player) = state.registry.player() {
                player_pos = player.position;
            }
        }
    }
}

/// Remove coins the player overlaps and credit their value.
fn collect_coins(state: &mut LevelState) {
    let Some(player) = state.registry.player() else {
        return;
    };
    let player_pos = player.position;
    let player_radius = player.radius;

    for id in state.registry.coin_ids() {
        let Some(coin) = state.registry.get(id) else {
            continue;
        };
        if !collision::circles_overlap(player_pos, player_radius, coin.position, coin.radius) {
            continue;
        }

        let value = coin.as_coin().map(|c| c.value).unwrap_or(0);
        state.registry.remove(id);
        state.coins += value;

        let frame = state.frame;
        let total = state.coins;
        state.push_event(GameEvent::coin_collected(frame, id, value, total));
    }
}

/// Pause and raise the win event when the player touches the exit.
///
/// The maze is left intact; whatever happens next (menu, next level,
/// regenerate) is the presentation layer's call.
fn check_exit(state: &mut LevelState, result: &mut StepResult) {
    let Some(player) = state.registry.player() else {
        return;
    };
    let Some(exit) = state.registry.exit() else {
        return;
    };
    if !collision::circles_overlap(player.position, player.radius, exit.position, exit.radius) {
        return;
    }

    state.pause();
    let frame = state.frame;
    let coins = state.coins;
    let elapsed = state.elapsed_seconds;
    state.push_event(GameEvent::level_won(frame, coins, elapsed));
    result.won = true;
}

/// Accumulate `dt` into whole simulated seconds.
///
/// The accumulator resets to zero on rollover, so this tracks simulated
/// seconds deterministically for a fixed cadence rather than wall-clock
/// time under irregular frames.
fn advance_clock(state: &mut LevelState, dt: f32) {
    state.second_accumulator += dt;
    if state.second_accumulator >= 1.0 {
        state.elapsed_seconds += 1;
        state.second_accumulator = 0.0;
    }
}

/// Replay a level from recorded per-frame intents.
///
/// Generates a fresh level from `(config, seed)`, starts it, and steps
/// once per intent at a fixed `dt`, stopping early on a win. Returns
/// the final state and every event raised along the way. Two replays
/// of the same recording produce states with equal hashes.
pub fn replay_level(
    config: GenerationConfig,
    seed: u64,
    intents: &[MoveIntent],
    dt: f32,
) -> Result<(LevelState, Vec<GameEvent>), GenerationError> {
    let mut state = LevelState::generate(config, seed)?;
    let mut all_events = state.take_events();
    state.start();

    for &intent in intents {
        let result = step(&mut state, intent, dt);
        all_events.extend(result.events);
        if result.won {
            break;
        }
    }

    Ok((state, all_events))
}
