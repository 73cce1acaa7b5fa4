use std::fmt;

use super::route::Route;

/// Which side of the route a filter runs on
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterKind {
    Before,
    After,
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FilterKind::Before => f.write_str("before"),
            FilterKind::After => f.write_str("after"),
        }
    }
}

/// Before and after filters in registration order
#[derive(Debug, Clone, Default)]
pub struct FilterRegistry {
    before: Vec<Route>,
    after: Vec<Route>,
}

impl FilterRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter and return a reference to it
    pub fn add(&mut self, kind: FilterKind, filter: Route) -> &Route {
        let list = self.list_mut(kind);
        list.push(filter);
        &list[list.len() - 1]
    }

    /// Every filter of `kind` matching `method` and `path`, in registration order
    #[must_use]
    pub fn lookup(&self, kind: FilterKind, method: &str, path: &str) -> Vec<&Route> {
        self.list(kind)
            .iter()
            .filter(|f| f.matches(method, path))
            .collect()
    }

    /// All filters of `kind`, in registration order
    #[must_use]
    pub fn list(&self, kind: FilterKind) -> &[Route] {
        match kind {
            FilterKind::Before => &self.before,
            FilterKind::After => &self.after,
        }
    }

    fn list_mut(&mut self, kind: FilterKind) -> &mut Vec<Route> {
        match kind {
            FilterKind::Before => &mut self.before,
            FilterKind::After => &mut self.after,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.before.len() + self.after.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.before.is_empty() && self.after.is_empty()
    }
}
