//! # docvault-cache
//!
//! Ephemeral in-process cache for docvault. Entries expire purely by
//! elapsed time: there is no capacity bound and no LRU ordering. One
//! instance is built at startup and handed to the components that need it.

pub mod keys;
pub mod memory;
pub mod sweeper;

pub use memory::TtlCache;
pub use sweeper::spawn_sweeper;
