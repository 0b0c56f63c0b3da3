#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    #[error("Ledger API failed with: {0}")]
    Api(String),

    #[error("Invalid mobile number: {0}")]
    InvalidMobile(String),
}
