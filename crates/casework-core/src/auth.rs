//! Sessions, role permissions and route access checks.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AccessRole {
    Administrator,
    Investigator,
    Analyst,
    Viewer,
}

impl AccessRole {
    pub const ALL: [AccessRole; 4] = [
        Self::Administrator,
        Self::Investigator,
        Self::Analyst,
        Self::Viewer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Administrator => "Administrator",
            Self::Investigator => "Investigator",
            Self::Analyst => "Analyst",
            Self::Viewer => "Viewer",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|r| r.as_str().eq_ignore_ascii_case(s.trim()))
    }

    pub fn allows(&self, permission: Permission) -> bool {
        use Action::*;
        use Resource::*;

        match self {
            Self::Administrator => true,
            Self::Investigator => matches!(
                (permission.resource, permission.action),
                (Case | Evidence | Suspect, View | Create | Update) | (Analysis, View | Create)
            ),
            Self::Analyst => matches!(
                (permission.resource, permission.action),
                (Case | Evidence | Suspect, View) | (Analysis, View | Create | Update | Run)
            ),
            Self::Viewer => permission.action == View,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Resource {
    Case,
    Evidence,
    Suspect,
    Analysis,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    View,
    Create,
    Update,
    Run,
}

/// A `resource:action` pair such as `case:view`
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Permission {
    pub resource: Resource,
    pub action: Action,
}

impl Permission {
    pub const fn new(resource: Resource, action: Action) -> Self {
        Self { resource, action }
    }

    pub fn parse(s: &str) -> Option<Self> {
        let (resource, action) = s.trim().split_once(':')?;
        let resource = match resource {
            "case" => Resource::Case,
            "evidence" => Resource::Evidence,
            "suspect" => Resource::Suspect,
            "analysis" => Resource::Analysis,
            _ => return None,
        };
        let action = match action {
            "view" => Action::View,
            "create" => Action::Create,
            "update" => Action::Update,
            "run" => Action::Run,
            _ => return None,
        };
        Some(Self { resource, action })
    }
}

impl fmt::Display for Permission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let resource = match self.resource {
            Resource::Case => "case",
            Resource::Evidence => "evidence",
            Resource::Suspect => "suspect",
            Resource::Analysis => "analysis",
        };
        let action = match self.action {
            Action::View => "view",
            Action::Create => "create",
            Action::Update => "update",
            Action::Run => "run",
        };
        write!(f, "{}:{}", resource, action)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub role: AccessRole,
}

/// Who is using the core right now. Anonymous until signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Session {
    user: Option<SessionUser>,
}

impl Session {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn signed_in(id: impl Into<String>, name: impl Into<String>, role: AccessRole) -> Self {
        Self {
            user: Some(SessionUser {
                id: id.into(),
                name: name.into(),
                role,
            }),
        }
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }

    pub fn sign_out(&mut self) {
        self.user = None;
    }

    /// Anonymous sessions have no permissions
    pub fn has_permission(&self, permission: Permission) -> bool {
        self.user
            .as_ref()
            .is_some_and(|user| user.role.allows(permission))
    }
}

/// Application pages addressed by path
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "view", rename_all = "snake_case")]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Cases,
    Case { case_id: String },
    Collaboration { case_id: String },
    Discussions { case_id: String },
    NewDiscussion { case_id: String },
    Tasks { case_id: String },
    Team { case_id: String },
    Evidence,
    EvidenceItem { evidence_id: String },
    Suspects,
    Suspect { suspect_id: String },
    Witnesses,
    Witness { witness_id: String },
    Admin,
    AddUser,
    NotFound { path: String },
}

impl Route {
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let parts: Vec<&str> = trimmed.split('/').filter(|p| !p.is_empty()).collect();
        let id = |s: &str| s.to_string();

        match parts.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["signup"] => Self::Signup,
            ["cases"] => Self::Cases,
            ["cases", case_id] => Self::Case { case_id: id(case_id) },
            ["cases", case_id, "collaboration"] => Self::Collaboration { case_id: id(case_id) },
            ["cases", case_id, "discussions"] => Self::Discussions { case_id: id(case_id) },
            ["cases", case_id, "discussions", "new"] => Self::NewDiscussion { case_id: id(case_id) },
            ["cases", case_id, "tasks"] => Self::Tasks { case_id: id(case_id) },
            ["cases", case_id, "team"] => Self::Team { case_id: id(case_id) },
            ["evidence"] => Self::Evidence,
            ["evidence", evidence_id] => Self::EvidenceItem {
                evidence_id: id(evidence_id),
            },
            ["suspects"] => Self::Suspects,
            ["suspects", suspect_id] => Self::Suspect {
                suspect_id: id(suspect_id),
            },
            ["witnesses"] => Self::Witnesses,
            ["witnesses", witness_id] => Self::Witness {
                witness_id: id(witness_id),
            },
            ["admin"] => Self::Admin,
            ["admin", "add-user"] => Self::AddUser,
            _ => Self::NotFound {
                path: path.to_string(),
            },
        }
    }

    /// Reachable without signing in
    pub fn is_public(&self) -> bool {
        matches!(self, Self::Login | Self::Signup | Self::NotFound { .. })
    }

    pub fn required_role(&self) -> Option<AccessRole> {
        match self {
            Self::Admin | Self::AddUser => Some(AccessRole::Administrator),
            _ => None,
        }
    }
}

pub struct RouteGuard;

impl RouteGuard {
    /// Allow the route for this session or fail with `Unauthorized`
    pub fn check(session: &Session, route: &Route) -> CoreResult<()> {
        if route.is_public() {
            return Ok(());
        }
        let user = session
            .user()
            .ok_or_else(|| CoreError::Unauthorized("sign in required".to_string()))?;

        if let Some(required) = route.required_role() {
            if user.role != required {
                tracing::warn!(
                    user_id = %user.id,
                    role = user.role.as_str(),
                    required = required.as_str(),
                    "route denied"
                );
                return Err(CoreError::Unauthorized(format!(
                    "role {} insufficient for required role {}",
                    user.role.as_str(),
                    required.as_str()
                )));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perm(s: &str) -> Permission {
        Permission::parse(s).unwrap()
    }

    #[test]
    fn test_permission_parse_and_display() {
        assert_eq!(perm("analysis:run").to_string(), "analysis:run");
        assert!(Permission::parse("case").is_none());
        assert!(Permission::parse("witness:view").is_none());
    }

    #[test]
    fn test_role_table() {
        let admin = Session::signed_in("1", "Admin", AccessRole::Administrator);
        let investigator = Session::signed_in("2", "Det.", AccessRole::Investigator);
        let analyst = Session::signed_in("3", "Analyst", AccessRole::Analyst);
        let viewer = Session::signed_in("4", "Viewer", AccessRole::Viewer);

        assert!(admin.has_permission(perm("analysis:run")));

        assert!(investigator.has_permission(perm("suspect:update")));
        assert!(investigator.has_permission(perm("analysis:create")));
        assert!(!investigator.has_permission(perm("analysis:run")));

        assert!(analyst.has_permission(perm("analysis:run")));
        assert!(analyst.has_permission(perm("evidence:view")));
        assert!(!analyst.has_permission(perm("evidence:create")));

        assert!(viewer.has_permission(perm("case:view")));
        assert!(!viewer.has_permission(perm("case:update")));

        assert!(!Session::anonymous().has_permission(perm("case:view")));
    }

    #[test]
    fn test_route_parse() {
        assert_eq!(Route::parse("/"), Route::Dashboard);
        assert_eq!(
            Route::parse("/cases/case-2025-001/discussions"),
            Route::Discussions {
                case_id: "case-2025-001".to_string()
            }
        );
        assert_eq!(
            Route::parse("/witnesses/wit-003/"),
            Route::Witness {
                witness_id: "wit-003".to_string()
            }
        );
        assert!(matches!(Route::parse("/map-integration/x"), Route::NotFound { .. }));
    }

    #[test]
    fn test_guard() {
        let anonymous = Session::anonymous();
        let viewer = Session::signed_in("4", "Viewer", AccessRole::Viewer);
        let admin = Session::signed_in("1", "Admin", AccessRole::Administrator);

        assert!(RouteGuard::check(&anonymous, &Route::Login).is_ok());
        assert!(matches!(
            RouteGuard::check(&anonymous, &Route::Cases),
            Err(CoreError::Unauthorized(_))
        ));
        assert!(RouteGuard::check(&viewer, &Route::Cases).is_ok());
        assert!(RouteGuard::check(&viewer, &Route::Admin).is_err());
        assert!(RouteGuard::check(&admin, &Route::AddUser).is_ok());
    }

    #[test]
    fn test_sign_out() {
        let mut session = Session::signed_in("1", "Admin", AccessRole::Administrator);
        assert!(session.is_authenticated());
        session.sign_out();
        assert!(!session.is_authenticated());
        assert!(session.user().is_none());
    }
}
