//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

mod error;
mod swap;
mod token;

pub use error::*;
pub use swap::*;
pub use token::*;
