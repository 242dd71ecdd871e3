//! Model data: the Euler-pole table and the download client.
//!
//! - Euler-pole table + relevant-age queries (`table`)
//! - model download client (`remote`)

pub mod remote;
pub mod table;

pub use remote::*;
pub use table::*;
