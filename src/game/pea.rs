//! Pea Flight
//!
//! A pea resolves hits in two phases each tick: once on the tile it
//! already occupies, then again after advancing one tile. Hit priority
//! on a shared tile is avatar, then attackable actor, then pea blocker;
//! the pea always dies on any hit.

use crate::game::arena::Arena;

/// Resolve a hit on the pea's current tile; true if the pea died.
fn resolve_hit(arena: &mut Arena, idx: usize) -> bool {
    let pos = arena.actors[idx].pos;
    if arena.avatar.pos == pos {
        arena.actors[idx].alive = false;
        arena.damage_avatar();
        return true;
    }
    if let Some(victim) = arena.can_be_attacked_at(pos) {
        arena.actors[idx].alive = false;
        arena.damage_actor(victim);
        return true;
    }
    if arena.blocks_pea_movement_at(pos).is_some() {
        arena.actors[idx].alive = false;
        return true;
    }
    false
}

/// Pea tick: resolve, fly one tile, resolve again.
pub(crate) fn act_pea(arena: &mut Arena, idx: usize) {
    if resolve_hit(arena, idx) {
        return;
    }
    let facing = arena.actors[idx].facing;
    let next = arena.actors[idx].pos.step(facing);
    if !next.in_bounds() {
        arena.actors[idx].alive = false;
        return;
    }
    arena.actors[idx].pos = next;
    resolve_hit(arena, idx);
}

// =============================================================================
// TESTS
// =============================================================================
