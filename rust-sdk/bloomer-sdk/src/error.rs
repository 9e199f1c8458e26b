//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

use bloomer_core::{CoreError, QuoteStatus, Token};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SdkError {
    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Malformed feed payload: {0}")]
    Payload(#[from] serde_json::Error),

    #[error("Invalid address: {0}")]
    InvalidAddress(String),

    #[error("No contract address configured for {0}")]
    MissingTokenAddress(Token),

    #[error("Quote is not executable: {}", .0.message())]
    QuoteNotExecutable(QuoteStatus),

    #[error("{0}")]
    Core(CoreError),
}

impl From<CoreError> for SdkError {
    fn from(error: CoreError) -> Self {
        SdkError::Core(error)
    }
}
