pub mod collection;
pub mod filter;
pub mod record;

pub use collection::Collection;
pub use filter::Predicate;
pub use record::Record;
