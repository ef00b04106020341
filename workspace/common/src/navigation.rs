use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry of the client's side navigation.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema, PartialEq, Eq)]
pub struct NavItem {
    pub path: String,
    pub label: String,
}

impl NavItem {
    fn new(path: &str, label: &str) -> Self {
        Self {
            path: path.to_string(),
            label: label.to_string(),
        }
    }
}

/// Navigation entries for a role string (`STUDENT`, `ADMIN`, ...).
///
/// Every known role starts at the dashboard and ends at the profile page.
/// Unknown roles only get the dashboard.
pub fn navigation_for_role(role: &str) -> Vec<NavItem> {
    let mut items = vec![NavItem::new("/dashboard", "Dashboard")];

    let role_items: &[(&str, &str)] = match role {
        "STUDENT" => &[
            ("/complaints", "My Complaints"),
            ("/submit-complaint", "Submit Complaint"),
            ("/hall-info", "Hall Info"),
            ("/meal-menu", "Meal Menu"),
        ],
        "STAFF" => &[
            ("/complaints", "Complaint Management"),
            ("/student-management", "Students"),
            ("/room-allocation", "Room Allocation"),
            ("/reports", "Reports"),
        ],
        "ADMIN" => &[
            ("/user-management", "User Management"),
            ("/hall-management", "Halls"),
            ("/complaints", "All Complaints"),
            ("/system-settings", "Settings"),
            ("/analytics", "Analytics"),
        ],
        "CANTEEN_MANAGER" => &[
            ("/menu-management", "Menu Management"),
            ("/inventory", "Inventory"),
            ("/orders", "Orders"),
            ("/canteen-reports", "Reports"),
        ],
        "TEACHER" => &[
            ("/student-info", "Student Info"),
            ("/hall-notices", "Notices"),
            ("/meal-plans", "Meal Plans"),
            ("/complaints", "Complaints"),
        ],
        _ => return items,
    };

    items.extend(role_items.iter().map(|(path, label)| NavItem::new(path, label)));
    items.push(NavItem::new("/profile", "Profile"));
    items
}

/// Where a client lands right after login.
pub fn landing_path(role: &str) -> &'static str {
    if role == "ADMIN" { "/admin" } else { "/dashboard" }
}
