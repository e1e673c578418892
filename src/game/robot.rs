//! Robot Behavior
//!
//! Rage-bots patrol a straight line and fire at the avatar on sight.
//! Thief-bots wander in random legs, stealing goodies they walk over;
//! the mean variant also fires. Every robot action is throttled by its
//! [`ActivityGate`](crate::game::actor::ActivityGate).

use crate::core::grid::Direction;
use crate::game::actor::ActorKind;
use crate::game::arena::Arena;
use crate::game::events::Sound;

/// Advance the robot's gate; false means it sits this tick out.
fn gate_open(arena: &mut Arena, idx: usize) -> bool {
    match &mut arena.actors[idx].kind {
        ActorKind::RageBot { gate, .. } | ActorKind::ThiefBot { gate, .. } => gate.tick(),
        _ => true,
    }
}

/// Whether the robot faces the avatar along a clear row or column.
fn can_fire_at_avatar(arena: &Arena, idx: usize) -> bool {
    let bot = &arena.actors[idx];
    let player = arena.avatar.pos;
    let aligned = match bot.facing {
        Direction::Right => player.y == bot.pos.y && player.x > bot.pos.x,
        Direction::Left => player.y == bot.pos.y && player.x < bot.pos.x,
        Direction::Up => player.x == bot.pos.x && player.y > bot.pos.y,
        Direction::Down => player.x == bot.pos.x && player.y < bot.pos.y,
        Direction::None => false,
    };
    aligned && !arena.blocks_robot_sight_between(bot.pos, player)
}

fn fire(arena: &mut Arena, idx: usize) {
    let (pos, facing) = {
        let bot = &arena.actors[idx];
        (bot.pos, bot.facing)
    };
    arena.fire_pea(pos, facing);
    arena.play_sound(Sound::EnemyFire);
}

/// Rage-bot tick: fire on sight, otherwise march, reversing at blocks.
pub(crate) fn act_rage_bot(arena: &mut Arena, idx: usize) {
    if !gate_open(arena, idx) {
        return;
    }
    if can_fire_at_avatar(arena, idx) {
        fire(arena, idx);
        return;
    }
    let facing = arena.actors[idx].facing;
    if !arena.attempt_move_actor(idx, facing) {
        arena.actors[idx].facing = facing.reverse();
    }
}

fn set_patrol(arena: &mut Arena, idx: usize, turn_distance: u32, distance_moved: u32) {
    if let ActorKind::ThiefBot { patrol, .. } = &mut arena.actors[idx].kind {
        patrol.turn_distance = turn_distance;
        patrol.distance_moved = distance_moved;
    }
}

/// Thief-bot tick: maybe fire (mean only), maybe steal, then patrol.
///
/// Each empty-handed visit to a stealable goodie's tile rolls 1-in-10;
/// a capture ends the action for this tick. Patrol legs run a random
/// 1-6 tiles, then the bot turns to a random walkable direction.
pub(crate) fn act_thief_bot(arena: &mut Arena, idx: usize) {
    if !gate_open(arena, idx) {
        return;
    }

    let (pos, armed, holding) = match &arena.actors[idx].kind {
        ActorKind::ThiefBot { armed, stolen, .. } => {
            (arena.actors[idx].pos, *armed, stolen.is_some())
        }
        _ => return,
    };

    if armed && can_fire_at_avatar(arena, idx) {
        fire(arena, idx);
        return;
    }

    if !holding {
        if let Some(goodie_idx) = arena.stolen_by_thief_bots_at(pos) {
            if arena.rng.one_in(10) {
                let goodie_id = arena.actors[goodie_idx].id;
                arena.actors[goodie_idx].visible = false;
                if let ActorKind::Collectable { collectable, .. } =
                    &mut arena.actors[goodie_idx].kind
                {
                    *collectable = false;
                }
                if let ActorKind::ThiefBot { stolen, .. } = &mut arena.actors[idx].kind {
                    *stolen = Some(goodie_id);
                }
                arena.play_sound(Sound::RobotMunch);
                return;
            }
        }
    }

    let (turn_distance, distance_moved) = match &arena.actors[idx].kind {
        ActorKind::ThiefBot { patrol, .. } => (patrol.turn_distance, patrol.distance_moved),
        _ => return,
    };
    let facing = arena.actors[idx].facing;

    if distance_moved != turn_distance && arena.attempt_move_actor(idx, facing) {
        set_patrol(arena, idx, turn_distance, distance_moved + 1);
        return;
    }

    // Leg over (or blocked): roll a new leg and try directions in a
    // random order. If every direction is blocked the bot just turns.
    let new_turn = arena.rng.next_int_range(1, 6) as u32;
    let mut dirs = Direction::CARDINALS;
    arena.rng.shuffle(&mut dirs);
    for dir in dirs {
        if arena.attempt_move_actor(idx, dir) {
            arena.actors[idx].facing = dir;
            set_patrol(arena, idx, new_turn, 1);
            return;
        }
    }
    arena.actors[idx].facing = dirs[3];
    set_patrol(arena, idx, new_turn, 0);
}

// =============================================================================
// TESTS
// =============================================================================
