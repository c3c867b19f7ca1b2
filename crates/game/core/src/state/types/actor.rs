use super::{CharacterModel, EntityId, Facing, Position, StatBlock};

/// Complete per-combatant state: identity, board placement, and combat model.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActorState {
    pub id: EntityId,
    pub position: Position,
    pub facing: Facing,
    pub model: CharacterModel,
    /// Set exactly once when the actor dies; guards re-entrant death handling
    /// and suppresses knockback on an actor already being torn down.
    pub dying: bool,
}

impl ActorState {
    pub fn new(id: EntityId, position: Position, facing: Facing, stats: &StatBlock) -> Self {
        Self {
            id,
            position,
            facing,
            model: CharacterModel::from_stats(stats),
            dying: false,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        !self.model.is_dead() && !self.dying
    }
}

/// All combatants tracked in a session: the player plus the enemy roster.
///
/// Enemies are removed from the roster immediately on logical death; the
/// presentation layer may keep its own lingering visual.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EntitiesState {
    pub player: ActorState,
    pub enemies: Vec<ActorState>,
}

impl EntitiesState {
    pub fn new(player: ActorState) -> Self {
        Self {
            player,
            enemies: Vec::new(),
        }
    }

    pub fn actor(&self, id: EntityId) -> Option<&ActorState> {
        if id.is_player() {
            Some(&self.player)
        } else {
            self.enemies.iter().find(|enemy| enemy.id == id)
        }
    }

    pub fn actor_mut(&mut self, id: EntityId) -> Option<&mut ActorState> {
        if id.is_player() {
            Some(&mut self.player)
        } else {
            self.enemies.iter_mut().find(|enemy| enemy.id == id)
        }
    }

    pub fn is_enemy(&self, id: EntityId) -> bool {
        self.enemies.iter().any(|enemy| enemy.id == id)
    }

    /// Drops an enemy from the roster, returning its final state.
    pub fn remove_enemy(&mut self, id: EntityId) -> Option<ActorState> {
        let index = self.enemies.iter().position(|enemy| enemy.id == id)?;
        Some(self.enemies.remove(index))
    }
}
