//! Primary site navigation

use serde::Serialize;

/// A link in the site navigation bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct NavLink {
    pub label: &'static str,
    pub href: &'static str,
}

/// Navigation links, in display order
pub const NAV_LINKS: [NavLink; 4] = [
    NavLink { label: "About", href: "/about" },
    NavLink { label: "Projects", href: "/projects" },
    NavLink { label: "Blog", href: "/blog" },
    NavLink { label: "Contact", href: "/contact" },
];

/// Static pages that exist regardless of content: home, every nav target,
/// and the garden index. Paths carry a trailing slash.
pub fn static_routes() -> Vec<String> {
    let mut routes = vec!["/".to_string()];
    routes.extend(NAV_LINKS.iter().map(|link| format!("{}/", link.href)));
    routes.push("/garden/".to_string());
    routes
}
