//! Arena: entity ownership and geometry queries
//!
//! The arena owns every entity. Everything else refers to entities by id.
//! Ordering rules:
//! - `colliding_entities` returns ids in registration order
//! - the tick roster runs in enrollment order
//! - destruction is deferred until `drain_pending` at the end of a tick, so
//!   query results are stable for the whole tick

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::{Entity, EntityId, Role};
use super::geometry::Aabb;
use crate::error::{Result, SimError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Arena {
    /// Play area; boxes leaving it are out of bounds
    pub bounds: Aabb,
    /// All live entities, in registration order
    entities: Vec<Entity>,
    /// Entities advanced by the tick driver, in enrollment order
    tick_roster: Vec<EntityId>,
    /// Entities scheduled for removal at the end of the current tick
    pending: Vec<EntityId>,
    next_id: EntityId,
}

impl Arena {
    /// Arena spanning (0, 0) to `size`
    pub fn new(size: Vec2) -> Self {
        Self {
            bounds: Aabb::from_origin(Vec2::ZERO, size),
            entities: Vec::new(),
            tick_roster: Vec::new(),
            pending: Vec::new(),
            next_id: 1,
        }
    }

    /// Register a new entity, returning its id
    pub fn spawn(&mut self, role: Role, pos: Vec2, size: Vec2, destructible: bool) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        self.entities.push(Entity {
            id,
            role,
            pos,
            size,
            destructible,
        });
        id
    }

    pub fn entity(&self, id: EntityId) -> Option<&Entity> {
        self.entities.iter().find(|e| e.id == id)
    }

    pub fn entity_mut(&mut self, id: EntityId) -> Option<&mut Entity> {
        self.entities.iter_mut().find(|e| e.id == id)
    }

    /// Look up an entity the caller expects to exist
    pub fn require(&self, id: EntityId, role: Role) -> Result<&Entity> {
        self.entity(id)
            .filter(|e| e.role == role)
            .ok_or(SimError::MissingEntity { id, role })
    }

    pub fn require_mut(&mut self, id: EntityId, role: Role) -> Result<&mut Entity> {
        self.entities
            .iter_mut()
            .find(|e| e.id == id && e.role == role)
            .ok_or(SimError::MissingEntity { id, role })
    }

    pub fn entities(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }

    pub fn count_role(&self, role: Role) -> usize {
        self.entities.iter().filter(|e| e.role == role).count()
    }

    /// Ids of all entities whose box strictly overlaps `bounds`, in registration order.
    /// Nothing is excluded; callers filter themselves out.
    pub fn colliding_entities(&self, bounds: &Aabb) -> Vec<EntityId> {
        self.entities
            .iter()
            .filter(|e| e.bounds().intersects(bounds))
            .map(|e| e.id)
            .collect()
    }

    /// True if `bounds` lies fully inside the arena
    pub fn is_inside(&self, bounds: &Aabb) -> bool {
        self.bounds.contains(bounds)
    }

    pub fn register_for_tick(&mut self, id: EntityId) {
        if !self.tick_roster.contains(&id) {
            self.tick_roster.push(id);
        }
    }

    pub fn unregister_from_tick(&mut self, id: EntityId) {
        self.tick_roster.retain(|&t| t != id);
    }

    pub fn is_ticking(&self, id: EntityId) -> bool {
        self.tick_roster.contains(&id)
    }

    /// Schedule an entity for removal at the end of the tick.
    /// Returns false if it was already scheduled or does not exist.
    pub fn schedule_destroy(&mut self, id: EntityId) -> bool {
        if self.pending.contains(&id) || self.entity(id).is_none() {
            return false;
        }
        self.pending.push(id);
        true
    }

    pub fn is_pending(&self, id: EntityId) -> bool {
        self.pending.contains(&id)
    }

    /// Remove every scheduled entity, returning them in scheduling order
    pub fn drain_pending(&mut self) -> Vec<Entity> {
        let pending = std::mem::take(&mut self.pending);
        let mut removed = Vec::with_capacity(pending.len());
        for id in pending {
            if let Some(entity) = self.remove(id) {
                removed.push(entity);
            }
        }
        removed
    }

    /// Remove an entity immediately (also drops it from the tick roster)
    pub fn remove(&mut self, id: EntityId) -> Option<Entity> {
        let idx = self.entities.iter().position(|e| e.id == id)?;
        self.tick_roster.retain(|&t| t != id);
        Some(self.entities.remove(idx))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena() -> Arena {
        Arena::new(Vec2::new(200.0, 100.0))
    }

    #[test]
    fn test_colliding_entities_registration_order() {
        let mut arena = arena();
        let b = arena.spawn(Role::Brick, Vec2::new(50.0, 50.0), Vec2::splat(20.0), true);
        let w = arena.spawn(Role::Wall, Vec2::new(55.0, 50.0), Vec2::splat(20.0), false);
        let _far = arena.spawn(Role::Brick, Vec2::new(150.0, 50.0), Vec2::splat(20.0), true);

        let query = Aabb::from_center(Vec2::new(52.0, 50.0), Vec2::splat(4.0));
        assert_eq!(arena.colliding_entities(&query), vec![b, w]);
    }

    #[test]
    fn test_is_inside() {
        let arena = arena();
        assert!(arena.is_inside(&Aabb::from_center(Vec2::new(100.0, 50.0), Vec2::splat(10.0))));
        assert!(!arena.is_inside(&Aabb::from_center(Vec2::new(100.0, 98.0), Vec2::splat(10.0))));
    }

    #[test]
    fn test_deferred_destruction() {
        let mut arena = arena();
        let b = arena.spawn(Role::Brick, Vec2::new(50.0, 50.0), Vec2::splat(20.0), true);

        assert!(arena.schedule_destroy(b));
        assert!(!arena.schedule_destroy(b), "second schedule is a no-op");

        // Still queryable until drained
        let query = Aabb::from_center(Vec2::new(50.0, 50.0), Vec2::splat(4.0));
        assert_eq!(arena.colliding_entities(&query), vec![b]);

        let removed = arena.drain_pending();
        assert_eq!(removed.len(), 1);
        assert_eq!(removed[0].id, b);
        assert!(arena.entity(b).is_none());
        assert!(arena.colliding_entities(&query).is_empty());
        assert!(!arena.schedule_destroy(b), "removed entities cannot be scheduled");
    }

    #[test]
    fn test_tick_roster() {
        let mut arena = arena();
        let a = arena.spawn(Role::Ball, Vec2::new(10.0, 10.0), Vec2::splat(4.0), false);
        let p = arena.spawn(Role::Paddle, Vec2::new(10.0, 90.0), Vec2::new(40.0, 8.0), false);

        arena.register_for_tick(a);
        arena.register_for_tick(p);
        arena.register_for_tick(a);
        assert!(arena.is_ticking(a));

        arena.unregister_from_tick(a);
        assert!(!arena.is_ticking(a));
        assert!(arena.is_ticking(p));

        arena.remove(p);
        assert!(!arena.is_ticking(p));
    }

    #[test]
    fn test_require_checks_role() {
        let mut arena = arena();
        let a = arena.spawn(Role::Ball, Vec2::new(10.0, 10.0), Vec2::splat(4.0), false);
        assert!(arena.require(a, Role::Ball).is_ok());
        assert!(matches!(
            arena.require(a, Role::Paddle),
            Err(SimError::MissingEntity { role: Role::Paddle, .. })
        ));
        assert!(arena.require(99, Role::Ball).is_err());
    }
}
