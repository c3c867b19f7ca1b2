mod actor;
mod common;
mod hand;
mod model;
mod world;

pub use actor::{ActorState, EntitiesState};
pub use common::{EntityId, Facing, Offset, Position, direction_to};
pub use hand::{HandSlot, HandState};
pub use model::{CharacterModel, StatBlock};
pub use world::{TileMap, TileView, WorldState};
