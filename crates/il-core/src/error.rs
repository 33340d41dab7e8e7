//! Errors produced while inspecting the data model itself (not emission
//! errors -- those live in `il-codegen::error`).

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown variable `{name}`")]
    UnknownVariable { name: String },

    #[error("`{name}` is not a function-block instance")]
    NotAnFbInstance { name: String },

    #[error("duplicate parameter `{name}` in declaration of `{owner}`")]
    DuplicateParam { owner: String, name: String },
}
