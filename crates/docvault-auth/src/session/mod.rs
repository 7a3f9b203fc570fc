//! Registration, login, and logout.

pub mod manager;

pub use manager::SessionManager;
