//! Identity boundary for Frostline.
//!
//! Three pieces: the [`Session`] value passed explicitly to gated
//! operations, the [`AuthProvider`] contract for customer accounts, and
//! the shared-credential [`AdminGate`] for the back office.

pub mod customer;
pub mod error;
pub mod gate;
pub mod provider;
pub mod session;

pub use customer::{Customer, ProfilePatch};
pub use error::AuthError;
pub use gate::AdminGate;
pub use provider::{AuthProvider, MemoryAuth, NewProfile};
pub use session::Session;
