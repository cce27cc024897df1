use std::fmt;

/// Hash routes understood by the front-end router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Bills,
    NewBill,
    Dashboard,
}

impl Route {
    pub fn path(&self) -> &'static str {
        match self {
            Route::Login => "/",
            Route::Bills => "#employee/bills",
            Route::NewBill => "#employee/bill/new",
            Route::Dashboard => "#admin/dashboard",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_are_distinct() {
        let paths: std::collections::HashSet<&str> =
            [Route::Login, Route::Bills, Route::NewBill, Route::Dashboard]
                .iter()
                .map(Route::path)
                .collect();
        assert_eq!(paths.len(), 4);
    }

    #[test]
    fn bills_route_path() {
        assert_eq!(Route::Bills.to_string(), "#employee/bills");
        assert_eq!(Route::NewBill.path(), "#employee/bill/new");
    }
}
