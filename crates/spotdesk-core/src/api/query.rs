//! Query parameters for list endpoints.

/// Rows per page when the caller does not ask for a size.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Parameters for `GET /admin/users`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserListQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
    pub role: Option<String>,
    pub include_stats: bool,
}

impl Default for UserListQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
            role: None,
            include_stats: true,
        }
    }
}

impl UserListQuery {
    /// Query string pairs, with empty filters dropped.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        push_non_empty(&mut params, "search", self.search.as_deref());
        push_non_empty(&mut params, "role", self.role.as_deref());
        params.push(("includeStats", self.include_stats.to_string()));
        params
    }
}

/// Parameters for `GET /admin/commission-report`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommissionQuery {
    pub page: u32,
    pub limit: u32,
    pub search: Option<String>,
}

impl Default for CommissionQuery {
    fn default() -> Self {
        Self {
            page: 1,
            limit: DEFAULT_PAGE_SIZE,
            search: None,
        }
    }
}

impl CommissionQuery {
    /// Query string pairs, with empty filters dropped.
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("page", self.page.to_string()),
            ("limit", self.limit.to_string()),
        ];
        push_non_empty(&mut params, "search", self.search.as_deref());
        params
    }
}

fn push_non_empty(params: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<&str>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        params.push((key, value.to_string()));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_query_defaults() {
        let params = UserListQuery::default().to_params();
        assert_eq!(
            params,
            vec![
                ("page", "1".to_string()),
                ("limit", "10".to_string()),
                ("includeStats", "true".to_string()),
            ]
        );
    }

    #[test]
    fn empty_filters_are_dropped() {
        let query = UserListQuery {
            search: Some(String::new()),
            role: Some("fisherman".to_string()),
            ..UserListQuery::default()
        };
        let params = query.to_params();
        assert!(!params.iter().any(|(k, _)| *k == "search"));
        assert!(params.contains(&("role", "fisherman".to_string())));
    }

    #[test]
    fn filter_values_are_sent_verbatim() {
        let query = UserListQuery {
            search: Some(" ada ".to_string()),
            ..UserListQuery::default()
        };
        assert!(query.to_params().contains(&("search", " ada ".to_string())));
    }

    #[test]
    fn commission_query_keeps_search() {
        let query = CommissionQuery {
            page: 3,
            search: Some("lake".to_string()),
            ..CommissionQuery::default()
        };
        assert_eq!(
            query.to_params(),
            vec![
                ("page", "3".to_string()),
                ("limit", "10".to_string()),
                ("search", "lake".to_string()),
            ]
        );
    }
}
