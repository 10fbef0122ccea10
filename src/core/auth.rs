//! Role-based access to application modules
//!
//! A signed-in user carries a role, and a role grants a set of modules,
//! each identified by the front-end path it unlocks. Navigation entries and
//! guarded screens are shown only when the role grants their path; the
//! administration screens are reserved for the `Admin` role.

use serde::{Deserialize, Serialize};

/// Name of the role that sees the administration screens
pub const ADMIN_ROLE: &str = "Admin";

/// A module a role can be granted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Module {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    pub frontend_path: String,
}

/// A role with the modules it grants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub name: String,
    #[serde(default)]
    pub modules: Vec<Module>,
}

/// The signed-in user as returned by `/users/me`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentUser {
    pub username: String,
    #[serde(default)]
    pub role: Option<Role>,
}

impl CurrentUser {
    /// Check if the user's role is the admin role
    pub fn is_admin(&self) -> bool {
        self.role.as_ref().is_some_and(|role| role.name == ADMIN_ROLE)
    }

    /// Check if the user's role grants the module at `path`
    pub fn has_access(&self, path: &str) -> bool {
        self.role
            .as_ref()
            .is_some_and(|role| role.modules.iter().any(|m| m.frontend_path == path))
    }

    /// Front-end paths granted to this user
    pub fn module_paths(&self) -> Vec<&str> {
        self.role
            .iter()
            .flat_map(|role| role.modules.iter().map(|m| m.frontend_path.as_str()))
            .collect()
    }
}

/// Module check that tolerates a signed-out session
pub fn has_access(user: Option<&CurrentUser>, path: &str) -> bool {
    user.is_some_and(|u| u.has_access(path))
}

/// Admin check that tolerates a signed-out session
pub fn is_admin(user: Option<&CurrentUser>) -> bool {
    user.is_some_and(CurrentUser::is_admin)
}

/// Who may open a screen or see a navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Anyone, signed in or not
    Public,

    /// Any signed-in user
    Authenticated,

    /// Users whose role grants the module at this path
    Module(String),

    /// Admin role only
    AdminOnly,

    /// Combination of policies (AND)
    And(Vec<AccessPolicy>),

    /// Combination of policies (OR)
    Or(Vec<AccessPolicy>),
}

impl AccessPolicy {
    /// Check if the user satisfies this policy
    pub fn check(&self, user: Option<&CurrentUser>) -> bool {
        match self {
            AccessPolicy::Public => true,
            AccessPolicy::Authenticated => user.is_some(),
            AccessPolicy::Module(path) => has_access(user, path),
            AccessPolicy::AdminOnly => is_admin(user),
            AccessPolicy::And(policies) => policies.iter().all(|p| p.check(user)),
            AccessPolicy::Or(policies) => policies.iter().any(|p| p.check(user)),
        }
    }
}

/// One navigation entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuItem {
    pub path: String,
    pub text: String,
    pub policy: AccessPolicy,
}

impl MenuItem {
    /// Entry shown when the role grants its own path
    pub fn module(path: &str, text: &str) -> Self {
        Self {
            path: path.to_string(),
            text: text.to_string(),
            policy: AccessPolicy::Module(path.to_string()),
        }
    }

    /// Entry shown to admins only
    pub fn admin(path: &str, text: &str) -> Self {
        Self {
            path: path.to_string(),
            text: text.to_string(),
            policy: AccessPolicy::AdminOnly,
        }
    }
}

/// The application's navigation, main entries first
pub fn default_menu() -> Vec<MenuItem> {
    vec![
        MenuItem::module("/panel-operador", "Panel del Operador"),
        MenuItem::module("/ventas", "Ventas"),
        MenuItem::module("/ordenes-trabajo", "Órdenes de Trabajo"),
        MenuItem::module("/clientes", "Clientes"),
        MenuItem::module("/productos", "Productos"),
        MenuItem::module("/reportes", "Reportes"),
        MenuItem::admin("/admin/users", "Gestionar Usuarios"),
        MenuItem::admin("/admin/roles", "Gestionar Roles"),
        MenuItem::admin("/admin/modules", "Gestionar Módulos"),
    ]
}

/// Entries the user may see, in menu order
pub fn visible_menu<'a>(user: Option<&CurrentUser>, items: &'a [MenuItem]) -> Vec<&'a MenuItem> {
    items.iter().filter(|item| item.policy.check(user)).collect()
}
