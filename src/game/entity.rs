//! Entities and Registry
//!
//! One closed sum type covers every game object in a level; the
//! registry owns all instances for the lifetime of that level and is
//! fully replaced on regeneration. Identity is a monotonic counter so
//! removal never invalidates another entity's handle.

use serde::{Deserialize, Serialize};

use crate::core::vec2::Vec2;

/// Stable handle for one entity within one level.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Axis an enemy patrols back and forth along.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolAxis {
    /// Oscillates left/right.
    Horizontal,
    /// Oscillates up/down.
    Vertical,
}

/// Direction of travel along the patrol axis.
///
/// `Negative` is left or up, `Positive` is right or down (screen
/// coordinates, +y down).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PatrolDirection {
    /// Toward smaller coordinates (left / up).
    Negative,
    /// Toward larger coordinates (right / down).
    Positive,
}

impl PatrolDirection {
    /// Scalar sign for position integration.
    #[inline]
    pub fn sign(self) -> f32 {
        match self {
            PatrolDirection::Negative => -1.0,
            PatrolDirection::Positive => 1.0,
        }
    }

    /// The opposite direction.
    #[inline]
    pub fn flipped(self) -> Self {
        match self {
            PatrolDirection::Negative => PatrolDirection::Positive,
            PatrolDirection::Positive => PatrolDirection::Negative,
        }
    }
}

/// Player-specific state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlayerData {
    /// Respawn position (the entrance tile center).
    pub start_position: Vec2,
    /// Current life. Death triggers at <= 0.
    pub life: i32,
    /// Life restored on respawn.
    pub max_life: i32,
    /// Movement speed in 16-px-tile units per reference frame.
    pub speed: f32,
}

/// Enemy-specific state.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EnemyData {
    /// Cleared when a projectile kills this enemy.
    pub alive: bool,
    /// Patrol axis, fixed at spawn.
    pub axis: PatrolAxis,
    /// Current travel direction; flips on wall contact.
    pub direction: PatrolDirection,
    /// Movement speed in 16-px-tile units per reference frame.
    pub speed: f32,
    /// Life removed from the player per contact frame.
    pub damage: u32,
}

/// Coin-specific state.
#[derive(Clone, Copy, Debug, Serialize, Deserialize)]
pub struct CoinData {
    /// Coins awarded on pickup.
    pub value: u32,
}

/// Tag-specific payload of an entity.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub enum EntityKind {
    /// The player avatar. Exactly one per level; never removed.
    Player(PlayerData),
    /// A patrolling enemy. Removed from the registry on death.
    Enemy(EnemyData),
    /// A collectible coin. Removed on pickup.
    Coin(CoinData),
    /// The level exit marker. Never removed; triggers the win.
    Exit,
}

/// One game object.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Entity {
    /// Registry handle.
    pub id: EntityId,
    /// Pixel-space center.
    pub position: Vec2,
    /// Collision radius in pixels.
    pub radius: f32,
    /// Tag-specific payload.
    pub kind: EntityKind,
}

impl Entity {
    /// Enemy payload, if this entity is an enemy.
    pub fn as_enemy(&self) -> Option<&EnemyData> {
        match &self.kind {
            EntityKind::Enemy(data) => Some(data),
            _ => None,
        }
    }

    /// Mutable enemy payload, if this entity is an enemy.
    pub fn as_enemy_mut(&mut self) -> Option<&mut EnemyData> {
        match &mut self.kind {
            EntityKind::Enemy(data) => Some(data),
            _ => None,
        }
    }

    /// Coin payload, if this entity is a coin.
    pub fn as_coin(&self) -> Option<&CoinData> {
        match &self.kind {
            EntityKind::Coin(data) => Some(data),
            _ => None,
        }
    }
}

/// Owner of every entity in the current level.
///
/// Insertion order is stable and removal preserves it, so iteration is
/// deterministic. Cross-references between entities are resolved by
/// position lookup each frame, never by stored indices, which keeps
/// removal safe.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct EntityRegistry {
    entities: Vec<Entity>,
    next_id: u32,
}

impl EntityRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a new entity, returning its handle.
    pub fn insert(&mut self, position: Vec2, radius: f32, kind: EntityKind) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            position,
            radius,
            kind,
        });
        id
    }

    /// Remove an entity by identity, returning it if present.
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        Some(self.entities.remove(idx))
    }

    /// Entity by identity.
    pub fn get(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Mutable entity by identity.
    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// The player entity (first and only), if present.
    pub fn player(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Player(_)))
    }

    /// Mutable player entity.
    pub fn player_mut(&mut self) -> Option<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| matches!(e.kind, EntityKind::Player(_)))
    }

    /// The exit marker, if present.
    pub fn exit(&self) -> Option<&Entity> {
        self.entities
            .iter()
            .find(|e| matches!(e.kind, EntityKind::Exit))
    }

    /// Iterate all living enemies.
    pub fn enemies(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| e.as_enemy().is_some_and(|d| d.alive))
    }

    /// Identities of all living enemies, in registry order.
    ///
    /// Snapshotting ids up front lets the step mutate the registry while
    /// walking the list.
    pub fn enemy_ids(&self) -> Vec<EntityId> {
        self.enemies().map(|e| e.id).collect()
    }

    /// Iterate all coins.
    pub fn coins(&self) -> impl Iterator<Item = &Entity> {
        self.entities
            .iter()
            .filter(|e| matches!(e.kind, EntityKind::Coin(_)))
    }

    /// Identities of all coins, in registry order.
    pub fn coin_ids(&self) -> Vec<EntityId> {
        self.coins().map(|e| e.id).collect()
    }

    /// Iterate every entity in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    /// Total entity count.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// True when the registry holds no entities.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }
}
