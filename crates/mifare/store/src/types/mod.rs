//! Value types shared by the pipelines

mod key;
mod records;
mod uid;

pub use key::{Key, KeyParseError, KeyType};
pub use records::{BlockAuthorization, EraseReport, ReadResult, WriteResult};
pub use uid::Uid;
