//! Session coordination services.

pub mod catalog;
pub mod session_store;
pub mod sessions;
pub mod sweeper;

pub use catalog::{CatalogProvider, StaticCatalog};
pub use session_store::SessionStore;
pub use sessions::{Enrollment, NewSession, SessionService};
pub use sweeper::spawn_sweeper;
