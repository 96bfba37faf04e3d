//! Move types: atomic reversible state changes.

mod change;
mod composite;
mod swap;
mod traits;

pub use change::ChangeMove;
pub use composite::CompositeMove;
pub use swap::SwapMove;
pub use traits::Move;
