//! Paging and filter options for IQA fetches.

use chrono::NaiveDate;
use url::Url;

/// Options controlling how an IQA result set is paged and filtered.
#[derive(Debug, Clone, Copy)]
pub struct IqaQuery {
    /// Records requested per page. Defaults to 200.
    pub page_size: u32,
    /// Maximum cumulative offset to fetch. `None` fetches all records.
    ///
    /// The bound is checked before each page request, so results can
    /// overshoot the limit by up to one page when it falls mid-page.
    pub limit: Option<u64>,
    /// Only fetch records updated after this date. Sent as the query's
    /// optional `parameter` filter; the IQA definition must declare it.
    pub last_updated: Option<NaiveDate>,
}

impl Default for IqaQuery {
    fn default() -> IqaQuery {
        IqaQuery {
            page_size: 200,
            limit: None,
            last_updated: None,
        }
    }
}

impl IqaQuery {
    /// Sets the number of records requested per page.
    pub fn with_page_size(mut self, page_size: u32) -> Self {
        self.page_size = page_size;
        self
    }

    /// Caps the cumulative offset fetched.
    pub fn with_limit(mut self, limit: u64) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Filters to records updated after the given date.
    pub fn with_last_updated(mut self, last_updated: NaiveDate) -> Self {
        self.last_updated = Some(last_updated);
        self
    }

    /// Appends the query name, paging, and filter parameters to the URL.
    pub(crate) fn add_to_url(&self, url: &Url, query_name: &str, offset: u64) -> Url {
        let mut url = url.clone();
        url.query_pairs_mut()
            .append_pair("QueryName", query_name)
            .append_pair("limit", &self.page_size.to_string())
            .append_pair("offset", &offset.to_string());
        if let Some(last_updated) = self.last_updated {
            url.query_pairs_mut()
                .append_pair("parameter", &last_updated.format("%Y-%m-%d").to_string());
        };
        url
    }
}
