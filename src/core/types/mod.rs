//! Data model mirrored from the platform backend
//!
//! All entities are owned and persisted by the backend; the console only
//! mirrors their shape for rendering and refetches after mutations.

pub mod account;
pub mod budget;
pub mod department;
pub mod enterprise;
pub mod health;
pub mod invite;
pub mod pool;
pub mod role;

pub use account::*;
pub use budget::*;
pub use department::*;
pub use enterprise::*;
pub use health::*;
pub use invite::*;
pub use pool::*;
pub use role::*;
