use std::str::FromStr;

use url::Url;

use super::common::{Query, QueryCommon, SortDirection};

/// Query builder for the product list endpoint.
///
/// The backend filters each dimension by exact value and treats `search`
/// as a free-text match over name, description, district, and state.
/// Multi-select filtering across several values of one dimension happens
/// client-side; the API accepts at most one value per dimension.
#[derive(Default)]
pub struct ProductQuery {
    pub common: QueryCommon,
    pub state: Option<String>,
    pub district: Option<String>,
    pub category: Option<String>,
    pub sector: Option<String>,
    pub gi_status: Option<String>,
    pub search: Option<String>,
    pub sort_by: Option<ProductSortBy>,
}

impl Query for ProductQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }
    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = self.common.add_to_url(url);
        if let Some(state) = &self.state {
            url.query_pairs_mut().append_pair("state", state.as_str());
        }
        if let Some(district) = &self.district {
            url.query_pairs_mut()
                .append_pair("district", district.as_str());
        }
        if let Some(category) = &self.category {
            url.query_pairs_mut()
                .append_pair("category", category.as_str());
        }
        if let Some(sector) = &self.sector {
            url.query_pairs_mut()
                .append_pair("sector", sector.as_str());
        }
        if let Some(gi_status) = &self.gi_status {
            url.query_pairs_mut()
                .append_pair("gi_status", gi_status.as_str());
        }
        if let Some(search) = &self.search {
            url.query_pairs_mut().append_pair("search", search.as_str());
        }
        if let Some(sort_by) = self.sort_by {
            url.query_pairs_mut().append_pair(
                "ordering",
                format!(
                    "{}{}",
                    match self.common.sort_direction {
                        SortDirection::Asc => "",
                        SortDirection::Desc => "-",
                    },
                    sort_by
                )
                .as_str(),
            );
        }
        url
    }
}

impl ProductQuery {
    pub fn with_state(mut self, state: &str) -> Self {
        self.state = Some(state.to_string());
        self
    }

    pub fn with_district(mut self, district: &str) -> Self {
        self.district = Some(district.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_sector(mut self, sector: &str) -> Self {
        self.sector = Some(sector.to_string());
        self
    }

    pub fn with_gi_status(mut self, gi_status: &str) -> Self {
        self.gi_status = Some(gi_status.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_sort_by(mut self, sort_by: ProductSortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }
}

/// Sortable fields on the product list endpoint.
#[derive(Clone, Copy, Debug)]
pub enum ProductSortBy {
    Name,
    State,
    District,
    CreatedAt,
}

impl std::fmt::Display for ProductSortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                ProductSortBy::Name => "product",
                ProductSortBy::State => "state",
                ProductSortBy::District => "district",
                ProductSortBy::CreatedAt => "created_at",
            }
        )
    }
}

impl FromStr for ProductSortBy {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "product" | "name" => Ok(ProductSortBy::Name),
            "state" => Ok(ProductSortBy::State),
            "district" => Ok(ProductSortBy::District),
            "created_at" | "created-at" => Ok(ProductSortBy::CreatedAt),
            _ => Err(()),
        }
    }
}
