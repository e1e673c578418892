//! Actor Taxonomy
//!
//! Every object placed in the maze is an [`Actor`]: a tile position, a
//! facing, a liveness flag, and a variant payload. Generic rules
//! (movement legality, pushing, combat, spawning, sight) never branch on
//! concrete variants; they consult the capability predicates below, which
//! default to false and are overridden per variant.

use serde::{Serialize, Deserialize};

use crate::core::grid::{TilePos, Direction};
use crate::core::hash::StateHasher;
use crate::core::rng::DeterministicRng;

/// Avatar starting (and maximum) health.
pub const PLAYER_INITIAL_HEALTH: u32 = 20;
/// RageBot starting health.
pub const RAGEBOT_INITIAL_HEALTH: u32 = 10;
/// ThiefBot starting health.
pub const THIEFBOT_INITIAL_HEALTH: u32 = 5;
/// MeanThiefBot starting health.
pub const MEAN_THIEFBOT_INITIAL_HEALTH: u32 = 8;
/// Marble starting health.
pub const MARBLE_INITIAL_HEALTH: u32 = 10;
/// Avatar starting ammo; also the amount an ammo goodie grants.
pub const INITIAL_AMMO: u32 = 20;
/// Damage dealt by every pea hit.
pub const PEA_DAMAGE: u32 = 2;

/// Stable handle to an actor.
///
/// Assigned by the arena from a monotonic counter and never reused within
/// a level, so it can serve as a weak back-reference (a thief-bot's held
/// goodie) that stays valid across purges without owning anything.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ActorId(pub u32);

/// Throttles how often a robot acts relative to the tick rate.
///
/// The period is derived from the level number and never drops below 3,
/// so robots speed up on later levels independent of the tick rate.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActivityGate {
    period: u32,
    current: u32,
}

impl ActivityGate {
    /// Gate for a robot spawned on the given level.
    pub fn for_level(level: u32) -> Self {
        let period = ((28 - level as i32) / 4).max(3) as u32;
        Self { period, current: 1 }
    }

    /// Advance the gate by one tick; true when the robot may act.
    ///
    /// A freshly built gate first opens on its `period`-th tick, then
    /// every `period` ticks after that.
    pub fn tick(&mut self) -> bool {
        if self.current != self.period {
            self.current += 1;
            return false;
        }
        self.current = 1;
        true
    }

    /// Ticks between robot actions.
    pub fn period(&self) -> u32 {
        self.period
    }

    pub(crate) fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.period);
        hasher.update_u32(self.current);
    }
}

/// Thief-bot patrol bookkeeping: walk `turn_distance` tiles, then pick a
/// new random leg.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Patrol {
    /// Tiles to walk before turning (random 1-6).
    pub turn_distance: u32,
    /// Tiles walked on the current leg.
    pub distance_moved: u32,
}

impl Patrol {
    /// A fresh patrol leg with a random 1-6 turn distance.
    pub fn roll(rng: &mut DeterministicRng) -> Self {
        Self {
            turn_distance: rng.next_int_range(1, 6) as u32,
            distance_moved: 0,
        }
    }
}

/// What a collectable gives the avatar on pickup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[repr(u8)]
pub enum CollectableKind {
    /// +50 score, +1 crystal toward revealing the exit.
    Crystal = 0,
    /// +1000 score, +1 life.
    ExtraLife = 1,
    /// +500 score, avatar health restored to maximum.
    RestoreHealth = 2,
    /// +100 score, +20 ammo.
    Ammo = 3,
}

/// Variant payload of an actor.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActorKind {
    /// Patrols its row or column, firing at the avatar on sight.
    RageBot {
        /// Remaining hit points.
        health: u32,
        /// Action throttle.
        gate: ActivityGate,
    },
    /// Wanders randomly stealing goodies; `armed` variants also fire.
    ThiefBot {
        /// Remaining hit points.
        health: u32,
        /// Action throttle.
        gate: ActivityGate,
        /// Current random patrol leg.
        patrol: Patrol,
        /// Weak handle to a captured goodie, released on death.
        stolen: Option<ActorId>,
        /// Whether this is the pea-firing (mean) variant.
        armed: bool,
    },
    /// Pushable, destructible obstacle.
    Marble {
        /// Remaining hit points.
        health: u32,
    },
    /// Inert obstacle.
    Wall,
    /// Swallows marbles pushed onto it.
    Pit,
    /// Hidden until all crystals are collected; finishes the level.
    Exit {
        /// Whether the reveal has already happened.
        revealed: bool,
    },
    /// Spawns thief-bots, gated by local density.
    Factory {
        /// Whether it produces the pea-firing thief-bot variant.
        mean: bool,
    },
    /// Picked up on contact with the avatar (unless held by a thief-bot).
    Collectable {
        /// Reward variant.
        kind: CollectableKind,
        /// False while a thief-bot holds it.
        collectable: bool,
    },
    /// In-flight projectile.
    Pea,
}

impl ActorKind {
    /// A rage-bot with full health for the given level.
    pub fn rage_bot(level: u32) -> Self {
        ActorKind::RageBot {
            health: RAGEBOT_INITIAL_HEALTH,
            gate: ActivityGate::for_level(level),
        }
    }

    /// A thief-bot (armed = mean variant) with full health for the level.
    pub fn thief_bot(level: u32, armed: bool, rng: &mut DeterministicRng) -> Self {
        ActorKind::ThiefBot {
            health: if armed {
                MEAN_THIEFBOT_INITIAL_HEALTH
            } else {
                THIEFBOT_INITIAL_HEALTH
            },
            gate: ActivityGate::for_level(level),
            patrol: Patrol::roll(rng),
            stolen: None,
            armed,
        }
    }

    /// A collectable of the given kind, initially collectable.
    pub fn collectable(kind: CollectableKind) -> Self {
        ActorKind::Collectable {
            kind,
            collectable: true,
        }
    }

    // -------------------------------------------------------------------------
    // Capability predicates. Default is false; each arm lists the variants
    // that opt in. Generic code discriminates behavior ONLY through these.
    // -------------------------------------------------------------------------

    /// Occupying a tile prevents avatar/robot movement onto it.
    pub fn blocks_movement(&self) -> bool {
        matches!(
            self,
            ActorKind::RageBot { .. }
                | ActorKind::ThiefBot { .. }
                | ActorKind::Marble { .. }
                | ActorKind::Wall
                | ActorKind::Pit
                | ActorKind::Factory { .. }
        )
    }

    /// Responds to the avatar pushing against it.
    pub fn can_be_pushed(&self) -> bool {
        matches!(self, ActorKind::Marble { .. })
    }

    /// Interrupts a robot's line of sight to the avatar.
    pub fn blocks_robot_sight(&self) -> bool {
        matches!(
            self,
            ActorKind::RageBot { .. }
                | ActorKind::ThiefBot { .. }
                | ActorKind::Marble { .. }
                | ActorKind::Wall
                | ActorKind::Factory { .. }
        )
    }

    /// Thief-bots may capture it.
    pub fn stolen_by_thief_bots(&self) -> bool {
        matches!(
            self,
            ActorKind::Collectable { kind, .. } if *kind != CollectableKind::Crystal
        )
    }

    /// A pushed marble may move onto its tile.
    pub fn allows_marble_movement(&self) -> bool {
        matches!(self, ActorKind::Pit)
    }

    /// Counts toward a factory's neighborhood census.
    pub fn counted_by_factories(&self) -> bool {
        matches!(self, ActorKind::ThiefBot { .. })
    }

    /// A pit destroys it on contact.
    pub fn can_be_swallowed(&self) -> bool {
        matches!(self, ActorKind::Marble { .. })
    }

    /// Peas damage it.
    pub fn can_be_attacked(&self) -> bool {
        matches!(
            self,
            ActorKind::RageBot { .. } | ActorKind::ThiefBot { .. } | ActorKind::Marble { .. }
        )
    }

    /// Stops peas without taking damage.
    pub fn blocks_pea_movement(&self) -> bool {
        matches!(self, ActorKind::Wall | ActorKind::Factory { .. })
    }

    /// Whether the avatar may currently pick this up.
    pub fn is_collectable(&self) -> bool {
        matches!(self, ActorKind::Collectable { collectable: true, .. })
    }

    /// Variant discriminant for state hashing.
    pub(crate) fn tag(&self) -> u8 {
        match self {
            ActorKind::RageBot { .. } => 0,
            ActorKind::ThiefBot { .. } => 1,
            ActorKind::Marble { .. } => 2,
            ActorKind::Wall => 3,
            ActorKind::Pit => 4,
            ActorKind::Exit { .. } => 5,
            ActorKind::Factory { .. } => 6,
            ActorKind::Collectable { .. } => 7,
            ActorKind::Pea => 8,
        }
    }
}

/// One object placed in the maze.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Actor {
    /// Stable handle, unique within a level.
    pub id: ActorId,
    /// Current tile.
    pub pos: TilePos,
    /// Current facing.
    pub facing: Direction,
    /// False once the actor died this tick; purged at tick end.
    pub alive: bool,
    /// Consumed by rendering; the exit and stolen goodies toggle it.
    pub visible: bool,
    /// Variant payload.
    pub kind: ActorKind,
}

impl Actor {
    /// Hash all actor state for replay verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_u32(self.id.0);
        hasher.update_pos(self.pos);
        hasher.update_u8(self.facing as u8);
        hasher.update_bool(self.alive);
        hasher.update_bool(self.visible);
        hasher.update_u8(self.kind.tag());
        match &self.kind {
            ActorKind::RageBot { health, gate } => {
                hasher.update_u32(*health);
                gate.hash_into(hasher);
            }
            ActorKind::ThiefBot {
                health,
                gate,
                patrol,
                stolen,
                armed,
            } => {
                hasher.update_u32(*health);
                gate.hash_into(hasher);
                hasher.update_u32(patrol.turn_distance);
                hasher.update_u32(patrol.distance_moved);
                hasher.update_u32(stolen.map(|id| id.0).unwrap_or(u32::MAX));
                hasher.update_bool(*armed);
            }
            ActorKind::Marble { health } => hasher.update_u32(*health),
            ActorKind::Exit { revealed } => hasher.update_bool(*revealed),
            ActorKind::Factory { mean } => hasher.update_bool(*mean),
            ActorKind::Collectable { kind, collectable } => {
                hasher.update_u8(*kind as u8);
                hasher.update_bool(*collectable);
            }
            ActorKind::Wall | ActorKind::Pit | ActorKind::Pea => {}
        }
    }
}

/// The player-controlled avatar.
///
/// Never stored in the arena's actor collection: it is referenced
/// separately, acts first every tick, and spatial queries never report it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    /// Current tile.
    pub pos: TilePos,
    /// Current facing (starts rightward).
    pub facing: Direction,
    /// False once the avatar died this tick.
    pub alive: bool,
    /// Remaining hit points (0..=20).
    pub health: u32,
    /// Remaining peas.
    pub ammo: u32,
    /// Crystals collected this level.
    pub crystals: u32,
}

impl Avatar {
    /// A fresh avatar at its level start tile.
    pub fn new(pos: TilePos) -> Self {
        Self {
            pos,
            facing: Direction::Right,
            alive: true,
            health: PLAYER_INITIAL_HEALTH,
            ammo: INITIAL_AMMO,
            crystals: 0,
        }
    }

    /// Health as a percentage of the initial maximum (status line).
    pub fn health_percent(&self) -> u32 {
        self.health * 100 / PLAYER_INITIAL_HEALTH
    }

    /// Hash all avatar state for replay verification.
    pub fn hash_into(&self, hasher: &mut StateHasher) {
        hasher.update_pos(self.pos);
        hasher.update_u8(self.facing as u8);
        hasher.update_bool(self.alive);
        hasher.update_u32(self.health);
        hasher.update_u32(self.ammo);
        hasher.update_u32(self.crystals);
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_activity_gate_schedule() {
        // Level 0: period = (28 - 0) / 4 = 7
        let mut gate = ActivityGate::for_level(0);
        assert_eq!(gate.period(), 7);
        let active: Vec<u32> = (1..=21).filter(|_| gate.tick()).collect();
        // The gate opens on exactly 3 of the 21 ticks: 7, 14, 21
        assert_eq!(active.len(), 3);

        // High levels clamp to the minimum period of 3
        let gate = ActivityGate::for_level(50);
        assert_eq!(gate.period(), 3);
    }

    #[test]
    fn test_activity_gate_opens_on_period_ticks() {
        let mut gate = ActivityGate::for_level(50); // period 3
        let mut opened = Vec::new();
        for tick in 1..=9 {
            if gate.tick() {
                opened.push(tick);
            }
        }
        assert_eq!(opened, vec![3, 6, 9]);
    }

    #[test]
    fn test_capability_table() {
        let wall = ActorKind::Wall;
        assert!(wall.blocks_movement());
        assert!(wall.blocks_robot_sight());
        assert!(wall.blocks_pea_movement());
        assert!(!wall.can_be_attacked());

        let pit = ActorKind::Pit;
        assert!(pit.blocks_movement());
        assert!(pit.allows_marble_movement());
        assert!(!pit.blocks_robot_sight());
        assert!(!pit.blocks_pea_movement());

        let marble = ActorKind::Marble { health: MARBLE_INITIAL_HEALTH };
        assert!(marble.blocks_movement());
        assert!(marble.can_be_pushed());
        assert!(marble.can_be_swallowed());
        assert!(marble.can_be_attacked());
        assert!(marble.blocks_robot_sight());
        assert!(!marble.blocks_pea_movement());

        let exit = ActorKind::Exit { revealed: false };
        assert!(!exit.blocks_movement());
        assert!(!exit.blocks_robot_sight());

        let pea = ActorKind::Pea;
        assert!(!pea.blocks_movement());
        assert!(!pea.blocks_pea_movement());
    }

    #[test]
    fn test_goodies_stealable_crystal_not() {
        let crystal = ActorKind::collectable(CollectableKind::Crystal);
        let ammo = ActorKind::collectable(CollectableKind::Ammo);
        let life = ActorKind::collectable(CollectableKind::ExtraLife);
        let health = ActorKind::collectable(CollectableKind::RestoreHealth);

        assert!(!crystal.stolen_by_thief_bots());
        assert!(ammo.stolen_by_thief_bots());
        assert!(life.stolen_by_thief_bots());
        assert!(health.stolen_by_thief_bots());
    }

    #[test]
    fn test_thief_bots_counted_by_factories() {
        let mut rng = DeterministicRng::new(1);
        let regular = ActorKind::thief_bot(0, false, &mut rng);
        let mean = ActorKind::thief_bot(0, true, &mut rng);
        assert!(regular.counted_by_factories());
        assert!(mean.counted_by_factories());
        assert!(!ActorKind::rage_bot(0).counted_by_factories());
    }

    #[test]
    fn test_patrol_roll_range() {
        let mut rng = DeterministicRng::new(77);
        for _ in 0..100 {
            let patrol = Patrol::roll(&mut rng);
            assert!((1..=6).contains(&patrol.turn_distance));
            assert_eq!(patrol.distance_moved, 0);
        }
    }

    #[test]
    fn test_avatar_health_percent() {
        let mut avatar = Avatar::new(TilePos::new(1, 1));
        assert_eq!(avatar.health_percent(), 100);
        avatar.health = 10;
        assert_eq!(avatar.health_percent(), 50);
        avatar.health = 0;
        assert_eq!(avatar.health_percent(), 0);
    }
}
