use serde::Serialize;

/// View rendered for a route, all under the single default layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    Home,
    Comparer,
    Settings,
}

/// One entry of the navigation table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Route {
    pub path: &'static str,
    pub name: &'static str,
    pub view: View,
}

/// Static navigation table.
pub const ROUTES: &[Route] = &[
    Route {
        path: "/",
        name: "home",
        view: View::Home,
    },
    Route {
        path: "/comparer",
        name: "comparer",
        view: View::Comparer,
    },
    Route {
        path: "/settings",
        name: "settings",
        view: View::Settings,
    },
];

/// Look up the route for a path. Trailing slashes are ignored and an empty
/// path is the home view.
pub fn resolve_route(path: &str) -> Option<&'static Route> {
    let trimmed = path.trim_end_matches('/');
    let normalized = if trimmed.is_empty() { "/" } else { trimmed };
    ROUTES.iter().find(|route| route.path == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_known_routes() {
        assert_eq!(resolve_route("/").unwrap().view, View::Home);
        assert_eq!(resolve_route("").unwrap().view, View::Home);
        assert_eq!(resolve_route("/comparer").unwrap().name, "comparer");
        assert_eq!(resolve_route("/comparer/").unwrap().view, View::Comparer);
        assert_eq!(resolve_route("/settings").unwrap().view, View::Settings);
    }

    #[test]
    fn test_resolve_unknown_route() {
        assert!(resolve_route("/missing").is_none());
        assert!(resolve_route("/comparer/extra").is_none());
    }
}
