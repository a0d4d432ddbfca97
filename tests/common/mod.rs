#![allow(dead_code, unused_imports)]

pub mod builders;
pub mod record_source;
pub mod strategies;

pub use builders::*;
pub use record_source::*;
