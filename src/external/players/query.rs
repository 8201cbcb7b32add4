//! Listing query parameters.
//!
//! Multi-valued filters are sent as repeated parameters sharing one key
//! (`nationalities=FR&nationalities=BR`), which is how the service binds
//! lists. Unset filters are left out entirely instead of being sent empty.

use reqwest::Url;

use crate::filters::FilterCriteria;

/// Ordered `(key, value)` pairs for the listing request.
pub fn listing_params(criteria: &FilterCriteria) -> Vec<(&'static str, String)> {
    let mut params = Vec::new();

    let name = criteria.name.trim();
    if !name.is_empty() {
        params.push(("name", name.to_string()));
    }
    for nationality in &criteria.nationalities {
        params.push(("nationalities", nationality.clone()));
    }
    if let Some(min_age) = criteria.min_age {
        params.push(("minAge", min_age.to_string()));
    }
    if let Some(max_age) = criteria.max_age {
        params.push(("maxAge", max_age.to_string()));
    }
    for position in &criteria.positions {
        params.push(("positions", position.code().to_string()));
    }
    if let Some(min_height) = criteria.min_height {
        params.push(("minHeight", min_height.to_string()));
    }
    if let Some(max_height) = criteria.max_height {
        params.push(("maxHeight", max_height.to_string()));
    }
    params.push(("sortBy", criteria.sort_by.as_param().to_string()));
    params.push(("order", criteria.sort_direction.as_param().to_string()));
    params.push(("page", criteria.page.to_string()));
    params.push(("size", criteria.page_size.to_string()));

    params
}

/// Build the listing URL for `criteria` on top of the collection URL.
pub fn listing_url(base: &Url, criteria: &FilterCriteria) -> Url {
    let mut url = base.clone();
    {
        let mut pairs = url.query_pairs_mut();
        pairs.clear();
        for (key, value) in listing_params(criteria) {
            pairs.append_pair(key, &value);
        }
    }
    url
}
