//! Game Events
//!
//! Fire-and-forget notifications for the presentation layer (HUD text,
//! log panel, sound cues). Events are collected on the level state
//! during a step or command and drained by the caller afterwards; the
//! core never waits for acknowledgment.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;
use crate::game::entity::EntityId;

/// Event payload.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum GameEventData {
    /// A new maze was generated.
    MazeGenerated {
        /// Grid width in cells.
        cols: usize,
        /// Grid height in cells.
        rows: usize,
        /// Enemies actually placed (may be fewer than requested).
        enemies: u32,
        /// Coins actually placed.
        coins: u32,
    },

    /// A projectile left the player's position.
    ShotFired {
        /// Spawn position (the player's center).
        origin: Vec2,
        /// Unit direction of travel.
        direction: Vec2,
    },

    /// A projectile killed an enemy.
    EnemyKilled {
        /// The removed enemy.
        enemy: EntityId,
        /// Coin bonus awarded.
        bonus: u32,
        /// Coin total after the bonus.
        total_coins: u32,
    },

    /// The player picked up a coin.
    CoinCollected {
        /// The removed coin.
        coin: EntityId,
        /// Value of the coin.
        value: u32,
        /// Coin total after the pickup.
        total_coins: u32,
    },

    /// An enemy touched the player.
    PlayerDamaged {
        /// Life removed this frame.
        damage: u32,
        /// Life remaining after the hit.
        life_remaining: i32,
    },

    /// The player's life ran out; they respawned at the entrance.
    PlayerDied {
        /// Coin total after the halving penalty.
        coins_kept: u32,
    },

    /// The player reached the exit. The session is paused, not reset.
    LevelWon {
        /// Final coin total.
        coins: u32,
        /// Simulated seconds elapsed.
        elapsed_seconds: u32,
    },
}

/// A game event with the frame it occurred on.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameEvent {
    /// Simulation frame when the event occurred (0 for events emitted
    /// outside the step, e.g. generation).
    pub frame: u64,
    /// Event payload.
    pub data: GameEventData,
}

impl GameEvent {
    /// Create a new event.
    pub fn new(frame: u64, data: GameEventData) -> Self {
        Self { frame, data }
    }

    /// Create a maze-generated event.
    pub fn maze_generated(cols: usize, rows: usize, enemies: u32, coins: u32) -> Self {
        Self::new(
            0,
            GameEventData::MazeGenerated {
                cols,
                rows,
                enemies,
                coins,
            },
        )
    }

    /// Create a shot-fired event.
    pub fn shot_fired(frame: u64, origin: Vec2, direction: Vec2) -> Self {
        Self::new(frame, GameEventData::ShotFired { origin, direction })
    }

    /// Create an enemy-killed event.
    pub fn enemy_killed(frame: u64, enemy: EntityId, bonus: u32, total_coins: u32) -> Self {
        Self::new(
            frame,
            GameEventData::EnemyKilled {
                enemy,
                bonus,
                total_coins,
            },
        )
    }

    /// Create a coin-collected event.
    pub fn coin_collected(frame: u64, coin: EntityId, value: u32, total_coins: u32) -> Self {
        Self::new(
            frame,
            GameEventData::CoinCollected {
                coin,
                value,
                total_coins,
            },
        )
    }

    /// Create a player-damaged event.
    pub fn player_damaged(frame: u64, damage: u32, life_remaining: i32) -> Self {
        Self::new(
            frame,
            GameEventData::PlayerDamaged {
                damage,
                life_remaining,
            },
        )
    }

    /// Create a player-died event.
    pub fn player_died(frame: u64, coins_kept: u32) -> Self {
        Self::new(frame, GameEventData::PlayerDied { coins_kept })
    }

    /// Create a level-won event.
    pub fn level_won(frame: u64, coins: u32, elapsed_seconds: u32) -> Self {
        Self::new(
            frame,
            GameEventData::LevelWon {
                coins,
                elapsed_seconds,
            },
        )
    }
}
