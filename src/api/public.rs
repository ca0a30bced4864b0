//! Public request and response types

// Re-export public types from each route

pub mod ai {
    pub use crate::api::routes::ai::public::*;
}

pub mod chat {
    pub use crate::api::routes::chat::public::*;
}

pub mod field_data {
    pub use crate::api::routes::field_data::public::*;
}
