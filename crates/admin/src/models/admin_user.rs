//! Admin account and permission types.

use serde::{Deserialize, Serialize};

use nurvi_core::AdminUserId;

// Re-export AdminRole from core for convenience
pub use nurvi_core::AdminRole;

/// A single capability checked by admin routes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Permission {
    ViewCustomers,
    EditCustomers,
    DeleteCustomers,
    ViewOrders,
    EditOrders,
    ViewAnalytics,
    ManageProducts,
    ManageSettings,
}

impl Permission {
    pub const ALL: [Self; 8] = [
        Self::ViewCustomers,
        Self::EditCustomers,
        Self::DeleteCustomers,
        Self::ViewOrders,
        Self::EditOrders,
        Self::ViewAnalytics,
        Self::ManageProducts,
        Self::ManageSettings,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ViewCustomers => "view_customers",
            Self::EditCustomers => "edit_customers",
            Self::DeleteCustomers => "delete_customers",
            Self::ViewOrders => "view_orders",
            Self::EditOrders => "edit_orders",
            Self::ViewAnalytics => "view_analytics",
            Self::ManageProducts => "manage_products",
            Self::ManageSettings => "manage_settings",
        }
    }

    /// Default permission set for a role.
    #[must_use]
    pub fn defaults_for(role: AdminRole) -> Vec<Self> {
        match role {
            AdminRole::SuperAdmin => Self::ALL.to_vec(),
            AdminRole::Admin => Self::ALL
                .into_iter()
                .filter(|p| *p != Self::ManageSettings)
                .collect(),
            AdminRole::Manager => vec![Self::ViewCustomers, Self::ViewOrders, Self::ViewAnalytics],
        }
    }
}

impl std::fmt::Display for Permission {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Permission {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| format!("invalid permission: {s}"))
    }
}

/// The logged-in admin, stored in the session under `nurvi-admin`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: AdminUserId,
    pub email: String,
    pub name: String,
    pub role: AdminRole,
    pub permissions: Vec<Permission>,
}

impl AdminUser {
    /// The store's single admin account.
    #[must_use]
    pub fn primary(email: impl Into<String>) -> Self {
        let role = AdminRole::SuperAdmin;
        Self {
            id: AdminUserId::new("admin-1"),
            email: email.into(),
            name: "Admin User".to_string(),
            role,
            permissions: Permission::defaults_for(role),
        }
    }

    #[must_use]
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.permissions.contains(&permission)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_primary_admin_has_every_permission() {
        let admin = AdminUser::primary("admin@nurvijewel.com");
        assert_eq!(admin.role, AdminRole::SuperAdmin);
        assert_eq!(admin.permissions.len(), 8);
        assert!(Permission::ALL.iter().all(|p| admin.has_permission(*p)));
    }

    #[test]
    fn test_role_defaults() {
        let admin = Permission::defaults_for(AdminRole::Admin);
        assert_eq!(admin.len(), 7);
        assert!(!admin.contains(&Permission::ManageSettings));

        let manager = Permission::defaults_for(AdminRole::Manager);
        assert!(manager.contains(&Permission::ViewOrders));
        assert!(!manager.contains(&Permission::EditCustomers));
    }

    #[test]
    fn test_permission_names_round_trip_through_serde() {
        let json = serde_json::to_string(&Permission::DeleteCustomers).unwrap_or_default();
        assert_eq!(json, "\"delete_customers\"");
        assert_eq!("manage_settings".parse(), Ok(Permission::ManageSettings));
        assert!("root".parse::<Permission>().is_err());
    }
}
