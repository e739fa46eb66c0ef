//! Load, filter and write back the Ofcom Wireless Telegraphy Register.
//!
//! ```no_run
//! use wtr::{filter, Collection, Revision};
//!
//! let register = Collection::load_path("test_data/WTR.csv", Revision::Current)?;
//! let p2p = filter::point_to_point(register.schema());
//! let links = register.filter(&[&p2p]);
//! links.write_csv(std::io::stdout())?;
//! # Ok::<(), wtr::WtrError>(())
//! ```

pub mod catalogue;
pub mod config;
pub mod error;
pub mod fetch;
pub mod register;
pub mod schema;
pub mod table;

pub use catalogue::ProductCatalogue;
pub use error::{Result, WtrError};
pub use register::{filter, Collection, Predicate, Record};
pub use schema::{Field, FieldSchema, Numeric, Revision};
