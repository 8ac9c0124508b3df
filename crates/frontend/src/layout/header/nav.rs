use crate::system::auth::SessionUser;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NavLink {
    pub name: &'static str,
    pub path: &'static str,
}

pub const NAV_LINKS: [NavLink; 2] = [
    NavLink {
        name: "Dashboard",
        path: "/dashboard",
    },
    NavLink {
        name: "Transações",
        path: "/transacoes",
    },
];

/// A link is active on its own path and on any sub-path of it
pub fn is_active(pathname: &str, link: &NavLink) -> bool {
    let pathname = pathname.trim_end_matches('/');
    match pathname.strip_prefix(link.path) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

/// Upper-cased first letter of the display name, else of the e-mail
pub fn avatar_initial(user: &SessionUser) -> String {
    user.display_name
        .as_deref()
        .filter(|name| !name.trim().is_empty())
        .or(user.email.as_deref())
        .and_then(|text| text.trim().chars().next())
        .map(|c| c.to_uppercase().collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::sample_user;

    #[test]
    fn test_is_active() {
        let dashboard = &NAV_LINKS[0];
        assert!(is_active("/dashboard", dashboard));
        assert!(is_active("/dashboard/", dashboard));
        assert!(is_active("/dashboard/2025", dashboard));
        assert!(!is_active("/dashboards", dashboard));
        assert!(!is_active("/transacoes", dashboard));
        assert!(!is_active("/", dashboard));
    }

    #[test]
    fn test_avatar_initial_prefers_display_name() {
        let mut user = sample_user();
        assert_eq!(avatar_initial(&user), "A");

        user.display_name = Some("  ".into());
        user.email = Some("bruno@example.com".into());
        assert_eq!(avatar_initial(&user), "B");

        user.display_name = Some("élise".into());
        assert_eq!(avatar_initial(&user), "É");

        user.display_name = None;
        user.email = None;
        assert_eq!(avatar_initial(&user), "");
    }
}
