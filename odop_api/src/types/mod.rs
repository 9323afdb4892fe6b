mod meta;
pub use self::meta::{ListResponse, Page};

mod product;
pub use self::product::Product;

mod stats;
pub use self::stats::{FilterOptions, Stats};
