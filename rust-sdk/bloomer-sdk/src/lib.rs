//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

mod balance;
mod config;
mod error;
mod feed;
mod portfolio;
mod session;
mod swap;

#[cfg(test)]
mod tests;

pub use balance::*;
pub use config::*;
pub use error::*;
pub use feed::*;
pub use portfolio::*;
pub use session::*;
pub use swap::*;

pub use alloy_primitives::Address;
