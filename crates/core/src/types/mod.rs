pub mod collection;
pub mod epoch;
pub mod topic;

pub use collection::CollectionName;
pub use epoch::datetime_from_epoch;
pub use topic::Topic;
