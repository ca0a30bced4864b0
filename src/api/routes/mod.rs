//! Backend resources, one module per route prefix

pub mod ai;
pub mod chat;
pub mod field_data;
pub mod health;
pub mod supabase;
pub mod sync;
