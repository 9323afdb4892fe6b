mod common;
pub use common::{Query, QueryCommon, SortDirection};

mod product;
pub use product::{ProductQuery, ProductSortBy};
