//! Arena: Per-Level Simulation State
//!
//! The arena owns everything a single level run needs: the actor
//! collection, the avatar, the scoreboard snapshot, the RNG, and the
//! pending sound queue. Behavior modules (`avatar`, `robot`, `pea`, ...)
//! mutate it through the capability-based queries and helpers here; none
//! of them touches the actor vector directly.
//!
//! The avatar is deliberately NOT an element of the actor collection.
//! It acts first each tick, and the spatial queries below never report
//! it; movement code checks the avatar's tile explicitly.

use serde::{Serialize, Deserialize};
use tracing::debug;

use crate::core::grid::{TilePos, Direction};
use crate::core::hash::{StateHash, compute_state_hash};
use crate::core::rng::DeterministicRng;
use crate::game::actor::{
    Actor, ActorId, ActorKind, Avatar, CollectableKind, MARBLE_INITIAL_HEALTH, PEA_DAMAGE,
};
use crate::game::events::Sound;
use crate::game::level::{Maze, Terrain};

/// Starting bonus; drains by 1 per tick and is paid out on level finish.
pub const INITIAL_BONUS: u32 = 1000;

// =============================================================================
// SCOREBOARD
// =============================================================================

/// Cross-level player progress.
///
/// Owned by the session; each arena works on a copy, and the session
/// copies it back after every tick so score and lives survive level
/// restarts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scoreboard {
    /// Total score.
    pub score: u32,
    /// Remaining lives.
    pub lives: u32,
    /// Current level number (0-based).
    pub level: u32,
}

impl Scoreboard {
    /// A fresh game: no score, three lives, level 0.
    pub fn new() -> Self {
        Self {
            score: 0,
            lives: 3,
            level: 0,
        }
    }
}

impl Default for Scoreboard {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// ARENA
// =============================================================================

/// All mutable state of one level run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Arena {
    pub(crate) actors: Vec<Actor>,
    /// The player's avatar (never in `actors`).
    pub avatar: Avatar,
    /// Scoreboard snapshot for this run.
    pub scoreboard: Scoreboard,
    bonus: u32,
    crystals_total: u32,
    completed_level: bool,
    next_actor_id: u32,
    pub(crate) rng: DeterministicRng,
    rng_seed: u64,
    pub(crate) tick: u32,
    #[serde(skip)]
    pending_sounds: Vec<Sound>,
}

impl Arena {
    /// Build the arena for a parsed maze.
    ///
    /// Actors spawn in the maze's fixed tile order so ids and action
    /// order are reproducible for a given maze and seed.
    pub fn from_maze(maze: &Maze, scoreboard: Scoreboard, seed: u64) -> Self {
        let mut arena = Self {
            actors: Vec::new(),
            avatar: Avatar::new(maze.player_start()),
            scoreboard,
            bonus: INITIAL_BONUS,
            crystals_total: 0,
            completed_level: false,
            next_actor_id: 0,
            rng: DeterministicRng::new(seed),
            rng_seed: seed,
            tick: 0,
            pending_sounds: Vec::new(),
        };

        let level = scoreboard.level;
        for (pos, terrain) in maze.tiles() {
            match terrain {
                Terrain::Empty | Terrain::Player => {}
                Terrain::Wall => {
                    arena.spawn(ActorKind::Wall, pos, Direction::None);
                }
                Terrain::Marble => {
                    arena.spawn(
                        ActorKind::Marble {
                            health: MARBLE_INITIAL_HEALTH,
                        },
                        pos,
                        Direction::None,
                    );
                }
                Terrain::Pit => {
                    arena.spawn(ActorKind::Pit, pos, Direction::None);
                }
                Terrain::Exit => {
                    arena.spawn(ActorKind::Exit { revealed: false }, pos, Direction::None);
                }
                Terrain::HorizRageBot => {
                    arena.spawn(ActorKind::rage_bot(level), pos, Direction::Right);
                }
                Terrain::VertRageBot => {
                    arena.spawn(ActorKind::rage_bot(level), pos, Direction::Down);
                }
                Terrain::Factory => {
                    arena.spawn(ActorKind::Factory { mean: false }, pos, Direction::None);
                }
                Terrain::MeanFactory => {
                    arena.spawn(ActorKind::Factory { mean: true }, pos, Direction::None);
                }
                Terrain::Crystal => {
                    arena.crystals_total += 1;
                    arena.spawn(
                        ActorKind::collectable(CollectableKind::Crystal),
                        pos,
                        Direction::None,
                    );
                }
                Terrain::RestoreHealth => {
                    arena.spawn(
                        ActorKind::collectable(CollectableKind::RestoreHealth),
                        pos,
                        Direction::None,
                    );
                }
                Terrain::ExtraLife => {
                    arena.spawn(
                        ActorKind::collectable(CollectableKind::ExtraLife),
                        pos,
                        Direction::None,
                    );
                }
                Terrain::Ammo => {
                    arena.spawn(
                        ActorKind::collectable(CollectableKind::Ammo),
                        pos,
                        Direction::None,
                    );
                }
            }
        }

        arena
    }

    /// Add an actor; returns its id.
    ///
    /// The exit starts invisible; everything else is visible on spawn.
    /// A mid-tick spawn lands past the tick loop's captured iteration
    /// bound, so new actors never act on their spawn tick.
    pub fn spawn(&mut self, kind: ActorKind, pos: TilePos, facing: Direction) -> ActorId {
        let id = ActorId(self.next_actor_id);
        self.next_actor_id += 1;
        let visible = !matches!(kind, ActorKind::Exit { .. });
        debug!(id = id.0, x = pos.x, y = pos.y, tag = kind.tag(), "spawning actor");
        self.actors.push(Actor {
            id,
            pos,
            facing,
            alive: true,
            visible,
            kind,
        });
        id
    }

    // -------------------------------------------------------------------------
    // Spatial queries. All skip dead actors; none ever reports the avatar.
    // -------------------------------------------------------------------------

    fn find_at(&self, pos: TilePos, pred: impl Fn(&ActorKind) -> bool) -> Option<usize> {
        self.actors
            .iter()
            .position(|a| a.alive && a.pos == pos && pred(&a.kind))
    }

    /// Index of any live actor at the tile.
    pub fn any_actor_at(&self, pos: TilePos) -> Option<usize> {
        self.actors.iter().position(|a| a.alive && a.pos == pos)
    }

    /// A live movement-blocking actor at the tile.
    pub fn blocks_movement_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::blocks_movement)
    }

    /// A live pushable actor at the tile.
    pub fn can_be_pushed_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::can_be_pushed)
    }

    /// A live sight-blocking actor at the tile.
    pub fn blocks_robot_sight_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::blocks_robot_sight)
    }

    /// A live goodie a thief-bot could steal at the tile.
    ///
    /// Requires the goodie to still be collectable, so a goodie already
    /// held by one thief-bot can never be captured by a second.
    pub fn stolen_by_thief_bots_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, |k| k.stolen_by_thief_bots() && k.is_collectable())
    }

    /// A live actor at the tile that lets a pushed marble enter.
    pub fn allows_marble_movement_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::allows_marble_movement)
    }

    /// A live actor at the tile counted by factory census.
    pub fn counted_by_factories_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::counted_by_factories)
    }

    /// A live swallowable actor at the tile.
    pub fn can_be_swallowed_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::can_be_swallowed)
    }

    /// A live attackable actor at the tile.
    pub fn can_be_attacked_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::can_be_attacked)
    }

    /// A live pea-blocking actor at the tile.
    pub fn blocks_pea_movement_at(&self, pos: TilePos) -> Option<usize> {
        self.find_at(pos, ActorKind::blocks_pea_movement)
    }

    /// Whether any sight-blocker sits strictly between two aligned tiles.
    ///
    /// Scans the shared row or column, endpoints exclusive. Unaligned
    /// tiles trivially have no clear line.
    pub fn blocks_robot_sight_between(&self, from: TilePos, to: TilePos) -> bool {
        if from.x == to.x {
            let (lo, hi) = (from.y.min(to.y), from.y.max(to.y));
            for y in (lo + 1)..hi {
                if self.blocks_robot_sight_at(TilePos::new(from.x, y)).is_some() {
                    return true;
                }
            }
            false
        } else if from.y == to.y {
            let (lo, hi) = (from.x.min(to.x), from.x.max(to.x));
            for x in (lo + 1)..hi {
                if self.blocks_robot_sight_at(TilePos::new(x, from.y)).is_some() {
                    return true;
                }
            }
            false
        } else {
            true
        }
    }

    // -------------------------------------------------------------------------
    // Movement
    // -------------------------------------------------------------------------

    fn move_blocked(&self, dest: TilePos) -> bool {
        !dest.in_bounds()
            || dest == self.avatar.pos
            || self.blocks_movement_at(dest).is_some()
    }

    /// Step an actor one tile in a direction if nothing blocks it.
    pub fn attempt_move_actor(&mut self, idx: usize, dir: Direction) -> bool {
        let dest = self.actors[idx].pos.step(dir);
        if self.move_blocked(dest) {
            return false;
        }
        self.actors[idx].pos = dest;
        true
    }

    /// Step the avatar one tile in a direction if nothing blocks it.
    pub fn attempt_move_avatar(&mut self, dir: Direction) -> bool {
        let dest = self.avatar.pos.step(dir);
        if !dest.in_bounds() || self.blocks_movement_at(dest).is_some() {
            return false;
        }
        self.avatar.pos = dest;
        true
    }

    // -------------------------------------------------------------------------
    // Combat
    // -------------------------------------------------------------------------

    /// Spawn a pea one tile ahead of the muzzle, flying in `dir`.
    pub fn fire_pea(&mut self, pos: TilePos, dir: Direction) {
        self.spawn(ActorKind::Pea, pos.step(dir), dir);
    }

    /// Apply pea damage to the avatar.
    pub fn damage_avatar(&mut self) {
        self.avatar.health = self.avatar.health.saturating_sub(PEA_DAMAGE);
        if self.avatar.health > 0 {
            self.play_sound(Sound::PlayerImpact);
        } else {
            self.avatar.alive = false;
            self.play_sound(Sound::PlayerDie);
        }
    }

    /// Apply pea damage to an attackable actor.
    ///
    /// Marbles die silently; robots announce impact or death, award
    /// score, and a dying thief-bot drops its stolen goodie on its own
    /// tile.
    pub fn damage_actor(&mut self, idx: usize) {
        enum Victim {
            Marble,
            RageBot,
            ThiefBot { stolen: Option<ActorId>, armed: bool },
        }

        let (victim, died, pos) = {
            let actor = &mut self.actors[idx];
            let (victim, health) = match &mut actor.kind {
                ActorKind::Marble { health } => (Victim::Marble, health),
                ActorKind::RageBot { health, .. } => (Victim::RageBot, health),
                ActorKind::ThiefBot {
                    health,
                    stolen,
                    armed,
                    ..
                } => (
                    Victim::ThiefBot {
                        stolen: *stolen,
                        armed: *armed,
                    },
                    health,
                ),
                _ => return,
            };
            *health = health.saturating_sub(PEA_DAMAGE);
            let died = *health == 0;
            if died {
                actor.alive = false;
            }
            (victim, died, actor.pos)
        };

        match victim {
            Victim::Marble => {}
            Victim::RageBot => {
                if died {
                    self.play_sound(Sound::RobotDie);
                    self.add_score(100);
                } else {
                    self.play_sound(Sound::RobotImpact);
                }
            }
            Victim::ThiefBot { stolen, armed } => {
                if died {
                    if let Some(goodie_id) = stolen {
                        if let Some(goodie_idx) = self.index_of(goodie_id) {
                            let goodie = &mut self.actors[goodie_idx];
                            goodie.pos = pos;
                            goodie.visible = true;
                            if let ActorKind::Collectable { collectable, .. } = &mut goodie.kind {
                                *collectable = true;
                            }
                        }
                    }
                    self.play_sound(Sound::RobotDie);
                    self.add_score(if armed { 20 } else { 10 });
                } else {
                    self.play_sound(Sound::RobotImpact);
                }
            }
        }
    }

    // -------------------------------------------------------------------------
    // Bookkeeping
    // -------------------------------------------------------------------------

    /// Add to the score (saturating).
    pub fn add_score(&mut self, points: u32) {
        self.scoreboard.score = self.scoreboard.score.saturating_add(points);
    }

    /// Queue a sound for the presentation layer.
    pub fn play_sound(&mut self, sound: Sound) {
        self.pending_sounds.push(sound);
    }

    /// Drain the sounds queued since the last call.
    pub fn take_sounds(&mut self) -> Vec<Sound> {
        std::mem::take(&mut self.pending_sounds)
    }

    /// Whether every crystal in the level has been picked up.
    pub fn has_collected_all_crystals(&self) -> bool {
        self.avatar.crystals == self.crystals_total
    }

    /// Mark the level complete (avatar reached the revealed exit).
    pub fn set_completed_level(&mut self) {
        self.completed_level = true;
    }

    /// Consume the level-complete flag.
    pub fn take_completed_level(&mut self) -> bool {
        std::mem::take(&mut self.completed_level)
    }

    /// Drop dead actors at the end of a tick.
    pub fn purge_dead(&mut self) {
        let before = self.actors.len();
        self.actors.retain(|a| a.alive);
        let removed = before - self.actors.len();
        if removed > 0 {
            debug!(removed, tick = self.tick, "purged dead actors");
        }
    }

    /// One-line game status for display.
    pub fn status_line(&self) -> String {
        format!(
            "Score: {:07}  Level: {:02}  Lives: {:2}  Health: {:3}%  Ammo: {:3}  Bonus: {:4}",
            self.scoreboard.score,
            self.scoreboard.level,
            self.scoreboard.lives,
            self.avatar.health_percent(),
            self.avatar.ammo,
            self.bonus,
        )
    }

    /// Hash the full arena state for replay verification.
    pub fn compute_hash(&self) -> StateHash {
        compute_state_hash(self.tick, self.rng_seed, |hasher| {
            self.avatar.hash_into(hasher);
            hasher.update_u32(self.actors.len() as u32);
            for actor in &self.actors {
                actor.hash_into(hasher);
            }
            hasher.update_u32(self.bonus);
            hasher.update_u32(self.crystals_total);
            hasher.update_u32(self.scoreboard.score);
            hasher.update_u32(self.scoreboard.lives);
            hasher.update_u32(self.scoreboard.level);
            hasher.update_bool(self.completed_level);
        })
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    /// All actors (dead ones included until the next purge).
    pub fn actors(&self) -> &[Actor] {
        &self.actors
    }

    /// Remaining bonus.
    pub fn bonus(&self) -> u32 {
        self.bonus
    }

    /// Decrement the bonus by one, stopping at zero.
    pub(crate) fn drain_bonus(&mut self) {
        if self.bonus > 0 {
            self.bonus -= 1;
        }
    }

    /// Crystals the maze started with.
    pub fn crystals_total(&self) -> u32 {
        self.crystals_total
    }

    /// Ticks elapsed in this level run.
    pub fn tick_count(&self) -> u32 {
        self.tick
    }

    /// Current index of an actor id, if it is still present.
    pub fn index_of(&self, id: ActorId) -> Option<usize> {
        self.actors.iter().position(|a| a.id == id)
    }
}

// =============================================================================
// TEST UTILITIES
// =============================================================================


// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::testutil::arena_from;
    use super::*;

    #[test]
    fn test_from_maze_populates_actors() {
        let arena = arena_from(&["@ m c", "  #  ", "    x"], 1);
        assert_eq!(arena.avatar.pos, TilePos::new(0, 14));
        assert_eq!(arena.crystals_total(), 1);

        // Marble at (2, 14), crystal at (4, 14), exit at (4, 12).
        assert!(arena.can_be_pushed_at(TilePos::new(2, 14)).is_some());
        let crystal = arena.any_actor_at(TilePos::new(4, 14)).unwrap();
        assert!(arena.actors()[crystal].kind.is_collectable());
        let exit = arena.any_actor_at(TilePos::new(4, 12)).unwrap();
        assert!(matches!(
            arena.actors()[exit].kind,
            ActorKind::Exit { revealed: false }
        ));
        // The exit spawns invisible.
        assert!(!arena.actors()[exit].visible);
    }

    #[test]
    fn test_queries_skip_dead_actors() {
        let mut arena = arena_from(&["@m   "], 1);
        let pos = TilePos::new(1, 14);
        let idx = arena.blocks_movement_at(pos).unwrap();
        arena.actors[idx].alive = false;
        assert!(arena.blocks_movement_at(pos).is_none());
        assert!(arena.any_actor_at(pos).is_none());
    }

    #[test]
    fn test_queries_never_report_avatar() {
        let arena = arena_from(&["@    "], 1);
        assert!(arena.any_actor_at(arena.avatar.pos).is_none());
        assert!(arena.blocks_movement_at(arena.avatar.pos).is_none());
    }

    #[test]
    fn test_avatar_tile_blocks_actor_movement() {
        let mut arena = arena_from(&["@h   "], 1);
        let idx = arena.any_actor_at(TilePos::new(1, 14)).unwrap();
        // Rage-bot cannot step left onto the avatar's tile.
        assert!(!arena.attempt_move_actor(idx, Direction::Left));
        // It can step right into open space.
        assert!(arena.attempt_move_actor(idx, Direction::Right));
        assert_eq!(arena.actors()[idx].pos, TilePos::new(2, 14));
    }

    #[test]
    fn test_sight_line_scan() {
        let arena = arena_from(&["@  # h", "      "], 1);
        let bot = TilePos::new(5, 14);
        let player = TilePos::new(0, 14);
        assert!(arena.blocks_robot_sight_between(bot, player));
        // A clear pair of tiles on the open row below.
        assert!(!arena.blocks_robot_sight_between(TilePos::new(4, 13), TilePos::new(0, 13)));
        // Unaligned tiles have no line of sight at all.
        assert!(arena.blocks_robot_sight_between(TilePos::new(1, 1), TilePos::new(2, 2)));
    }

    #[test]
    fn test_damage_marble_silent_death() {
        let mut arena = arena_from(&["@m   "], 1);
        let idx = arena.can_be_attacked_at(TilePos::new(1, 14)).unwrap();
        for _ in 0..5 {
            arena.damage_actor(idx);
        }
        assert!(!arena.actors()[idx].alive);
        assert!(arena.take_sounds().is_empty());
        assert_eq!(arena.scoreboard.score, 0);
    }

    #[test]
    fn test_damage_ignores_unattackable_actors() {
        let mut arena = arena_from(&["@#o c"], 1);
        for x in [1, 2, 4] {
            let idx = arena.any_actor_at(TilePos::new(x, 14)).unwrap();
            arena.damage_actor(idx);
            assert!(arena.actors()[idx].alive);
        }
        assert!(arena.take_sounds().is_empty());
        assert_eq!(arena.scoreboard.score, 0);
    }

    #[test]
    fn test_damage_rage_bot_scores_on_death() {
        let mut arena = arena_from(&["@h   "], 1);
        let idx = arena.can_be_attacked_at(TilePos::new(1, 14)).unwrap();
        // 10 health, 2 per hit: four impacts then death.
        for _ in 0..4 {
            arena.damage_actor(idx);
        }
        assert!(arena.actors()[idx].alive);
        arena.damage_actor(idx);
        assert!(!arena.actors()[idx].alive);
        assert_eq!(arena.scoreboard.score, 100);
        let sounds = arena.take_sounds();
        assert_eq!(sounds.iter().filter(|s| **s == Sound::RobotImpact).count(), 4);
        assert_eq!(sounds.iter().filter(|s| **s == Sound::RobotDie).count(), 1);
    }

    #[test]
    fn test_dying_thief_bot_releases_goodie() {
        let mut arena = arena_from(&["@ a  "], 1);
        let goodie_idx = arena.any_actor_at(TilePos::new(2, 14)).unwrap();
        let goodie_id = arena.actors()[goodie_idx].id;

        // Plant a thief-bot holding the goodie.
        let mut rng = DeterministicRng::new(9);
        let bot_pos = TilePos::new(3, 13);
        let mut kind = ActorKind::thief_bot(0, false, &mut rng);
        if let ActorKind::ThiefBot { stolen, .. } = &mut kind {
            *stolen = Some(goodie_id);
        }
        let bot_id = arena.spawn(kind, bot_pos, Direction::Right);
        let bot_idx = arena.index_of(bot_id).unwrap();
        arena.actors[goodie_idx].visible = false;
        if let ActorKind::Collectable { collectable, .. } = &mut arena.actors[goodie_idx].kind {
            *collectable = false;
        }

        // 5 health: three hits kill it.
        for _ in 0..3 {
            arena.damage_actor(bot_idx);
        }
        assert!(!arena.actors()[bot_idx].alive);
        assert_eq!(arena.scoreboard.score, 10);

        let goodie = &arena.actors()[arena.index_of(goodie_id).unwrap()];
        assert_eq!(goodie.pos, bot_pos);
        assert!(goodie.visible);
        assert!(goodie.kind.is_collectable());
    }

    #[test]
    fn test_damage_avatar_to_death() {
        let mut arena = arena_from(&["@    "], 1);
        for _ in 0..9 {
            arena.damage_avatar();
        }
        assert!(arena.avatar.alive);
        assert_eq!(arena.avatar.health, 2);
        arena.damage_avatar();
        assert!(!arena.avatar.alive);
        assert_eq!(arena.avatar.health, 0);
        let sounds = arena.take_sounds();
        assert_eq!(sounds.last(), Some(&Sound::PlayerDie));
    }

    #[test]
    fn test_status_line_format() {
        let arena = arena_from(&["@    "], 1);
        assert_eq!(
            arena.status_line(),
            "Score: 0000000  Level: 00  Lives:  3  Health: 100%  Ammo:  20  Bonus: 1000"
        );
    }

    #[test]
    fn test_purge_dead_keeps_live_actors() {
        let mut arena = arena_from(&["@m m "], 1);
        let before = arena.actors().len();
        let idx = arena.any_actor_at(TilePos::new(1, 14)).unwrap();
        arena.actors[idx].alive = false;
        arena.purge_dead();
        assert_eq!(arena.actors().len(), before - 1);
        assert!(arena.actors().iter().all(|a| a.alive));
    }

    #[test]
    fn test_compute_hash_sensitive_to_state() {
        let arena1 = arena_from(&["@ m  "], 7);
        let arena2 = arena_from(&["@ m  "], 7);
        assert_eq!(arena1.compute_hash(), arena2.compute_hash());

        let mut arena3 = arena_from(&["@ m  "], 7);
        arena3.avatar.pos = TilePos::new(1, 14);
        assert_ne!(arena1.compute_hash(), arena3.compute_hash());

        let arena4 = arena_from(&["@ m  "], 8);
        assert_ne!(arena1.compute_hash(), arena4.compute_hash());
    }
}
