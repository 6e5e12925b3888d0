//! eventgrid_core - the recurrence and scheduling engine.
//!
//! Everything in this crate is a pure function over an event collection owned
//! by the caller. The only trait with I/O behind it is [`storage::BlobStore`],
//! which the binary crate implements.

pub mod calendar;
pub mod serde;
pub mod storage;
