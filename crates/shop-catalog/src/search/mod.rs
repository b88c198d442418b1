//! Catalog query pipeline: criteria, evaluation, pagination, facets.

mod criteria;
mod engine;
mod facets;
mod results;

pub use criteria::{QueryCriteria, SortKey, FILTER_ALL};
pub use engine::{run, PAGE_SIZE};
pub use facets::{distinct_brands, distinct_categories};
pub use results::{Pagination, QueryResults};
