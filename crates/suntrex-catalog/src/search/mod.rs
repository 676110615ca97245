//! Search module.
//!
//! Filter state and its transitions, the filter pipeline, sorting,
//! pagination, facet options and active filter tags.

mod command;
mod facets;
mod filter;
mod query_string;
mod results;
mod sort;
mod state;
mod tags;

pub use command::{parse_bound, BoundSide, Command, RangeFacet};
pub use facets::FacetOptions;
pub use filter::{evaluate, Filter};
pub use results::{paginate, Pagination, SearchResults, DEFAULT_PAGE_SIZE};
pub use sort::sort_products;
pub use state::{FilterState, QuickFilter, QuickFilters, SortOption};
pub use tags::ActiveTag;
