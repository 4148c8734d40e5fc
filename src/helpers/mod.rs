//! Helper functions shared by the loader, the template engine and the generator

mod date;
mod url;

pub use date::*;
pub use url::*;
