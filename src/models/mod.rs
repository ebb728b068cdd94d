pub mod movie;

pub use movie::{ChatId, MovieRecord, MovieSummary, UserId, NOT_AVAILABLE};

#[cfg(test)]
pub(crate) use movie::sample_record;
