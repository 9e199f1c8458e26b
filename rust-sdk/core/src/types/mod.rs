//
// Copyright (c) Cryptic Dot
//
// Licensed under FusionAMM SDK Source-Available License v1.0
// See the LICENSE file in the project root for license information.
//

mod market;
mod pool;
mod stake;
mod swap;
mod token;

pub use market::*;
pub use pool::*;
pub use stake::*;
pub use swap::*;
pub use token::*;
