//! Client core for the EASY TRACK field-data backend: a typed API
//! client, the chat transcript controller, the filter builder and the
//! record exporter.

pub mod api;
pub mod chat;
pub mod cli;
pub mod core;
pub mod export;
pub mod filter;
