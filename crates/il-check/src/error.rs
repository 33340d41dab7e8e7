use thiserror::Error;

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("cannot resolve type of variable `{name}`")]
    UnresolvedVariable { name: String },

    #[error("cannot resolve type of directly represented variable `{raw}`")]
    UnresolvedDirect { raw: String },
}
