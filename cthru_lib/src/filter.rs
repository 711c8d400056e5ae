//! User filter intent, before it has been mapped onto any dataset.

/// Validated-at-build filter options for one invocation.
///
/// Every field is optional; an absent field adds nothing to the query.
/// `min_amount > max_amount` is allowed and simply matches no rows.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FilterSpec {
    pub year: Option<i32>,
    pub department: Option<String>,
    pub vendor: Option<String>,
    pub fund: Option<String>,
    pub name: Option<String>,
    pub search: Option<String>,
    pub min_amount: Option<f64>,
    pub max_amount: Option<f64>,
    /// Raw `"field DIRECTION"` text.
    pub sort: Option<String>,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl FilterSpec {
    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_department(mut self, department: &str) -> Self {
        self.department = Some(department.to_string());
        self
    }

    pub fn with_vendor(mut self, vendor: &str) -> Self {
        self.vendor = Some(vendor.to_string());
        self
    }

    pub fn with_fund(mut self, fund: &str) -> Self {
        self.fund = Some(fund.to_string());
        self
    }

    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_search(mut self, search: &str) -> Self {
        self.search = Some(search.to_string());
        self
    }

    pub fn with_min_amount(mut self, amount: f64) -> Self {
        self.min_amount = Some(amount);
        self
    }

    pub fn with_max_amount(mut self, amount: f64) -> Self {
        self.max_amount = Some(amount);
        self
    }

    pub fn with_sort(mut self, sort: &str) -> Self {
        self.sort = Some(sort.to_string());
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = Some(offset);
        self
    }

    /// The text filter that names an export file: first present of vendor,
    /// fund, department, name, search.
    pub fn primary_text(&self) -> Option<&str> {
        [
            &self.vendor,
            &self.fund,
            &self.department,
            &self.name,
            &self.search,
        ]
        .into_iter()
        .find_map(|v| v.as_deref())
    }
}
