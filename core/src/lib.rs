//! tablesift: declarative filters for tabular data sources.
//!
//! A compact specification string (`select|label:Status|cast:int`) becomes a
//! typed filter bound to one runtime value, then applied uniformly against a
//! composable query, an in-memory record set, a search index or a log store.
//! The filter, not the data source, carries the branching logic; variants a
//! kind does not implement ride through unchanged.
//!
//! ```
//! use std::collections::BTreeMap;
//! use tablesift_core::{make, DataSource, Filter, QueryBuilder, Value};
//!
//! let mut request = BTreeMap::new();
//! request.insert("f_status".to_string(), Value::from("2"));
//!
//! let filter = make("select|label:Status|cast:int", "status", &request)?;
//! assert!(filter.is_active());
//!
//! let query = DataSource::Query(QueryBuilder::new("orders"));
//! match filter.apply(query) {
//!     DataSource::Query(q) => {
//!         assert_eq!(q.to_sql(), r#"SELECT * FROM "orders" WHERE "status" = 2"#)
//!     }
//!     _ => unreachable!(),
//! }
//! # Ok::<(), tablesift_core::Error>(())
//! ```

pub mod ast;
pub mod error;
pub mod filter;
mod grammar;
pub mod parser;
pub mod registry;
pub mod render;
pub mod source;
pub mod validate;
pub mod value;

pub use ast::{FilterSpec, ParamValue};
pub use error::Error;
pub use filter::{
    DateFilter, DateRangeFilter, Filter, FilterCore, MultiSelectFilter, SelectFilter, TextFilter,
};
pub use parser::{canonical_type_key, parse_filter_spec};
pub use registry::{global, make, BuildContext, FilterInput, FilterType, ParamSpec, Registry, Requirement};
pub use render::Widget;
pub use source::{
    CompareOp, Condition, DataSource, LogMatcher, LogQuery, QueryBuilder, Record, SearchClause,
    SearchQuery, SourceVariant,
};
pub use validate::{ValidationReport, Validator, ValueSource};
pub use value::{CastPolicy, Value};
