use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    User,
    Guest,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => "admin",
            UserRole::User => "user",
            UserRole::Guest => "guest",
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UserListItem {
    pub id: String,
    pub account: String,
    pub role: UserRole,
    pub last_access: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize)]
pub struct UserListResp {
    #[serde(default)]
    pub users: Vec<UserListItem>,
}

#[derive(Debug, Serialize)]
pub struct CreateUserReq {
    pub account: String,
    pub password: String,
    pub role: UserRole,
}

#[derive(Debug, Deserialize)]
pub struct CreateUserResp {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct AuthGroup {
    pub id: u64,
    pub name: String,
    pub kb_id: String,
    pub parent_id: Option<u64>,
    /// Lower positions sort first. The backend stores this as a float;
    /// forms only ever write whole numbers.
    #[serde(default)]
    pub position: f64,
    #[serde(default)]
    pub auth_ids: Vec<i64>,
    #[serde(default)]
    pub user_ids: Vec<String>,
    /// Slash-joined ancestor names, used as the display label for
    /// hierarchical groups.
    #[serde(default)]
    pub path: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl AuthGroup {
    /// Display label: the hierarchy path when the backend provides one,
    /// the plain name otherwise.
    pub fn label(&self) -> &str {
        match self.path.as_deref() {
            Some(path) if !path.is_empty() => path,
            _ => &self.name,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AuthGroupListResp {
    #[serde(default)]
    pub groups: Vec<AuthGroup>,
}

#[derive(Debug, Serialize)]
pub struct CreateAuthGroupReq {
    pub name: String,
    pub kb_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    pub position: f64,
    pub auth_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct CreateAuthGroupResp {
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct UpdateAuthGroupReq {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<u64>,
    pub position: f64,
    pub auth_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
pub struct UserGroupsResp {
    #[serde(default)]
    pub groups: Vec<AuthGroup>,
}

#[derive(Debug, Serialize)]
pub struct UpdateUserGroupsReq {
    pub user_id: String,
    pub group_ids: Vec<u64>,
}

#[derive(Debug, Serialize)]
pub struct LoginReq {
    pub account: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginResp {
    pub token: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn user_list_item_parses_backend_shape() {
        let item: UserListItem = serde_json::from_value(json!({
            "id": "u-1",
            "account": "reader",
            "role": "guest",
            "last_access": null,
            "created_at": "2026-01-04T09:30:00Z"
        }))
        .unwrap();
        assert_eq!(item.role, UserRole::Guest);
        assert!(item.last_access.is_none());
        assert!(item.created_at.is_some());
    }

    #[test]
    fn auth_group_parses_with_optional_fields_missing() {
        let group: AuthGroup = serde_json::from_value(json!({
            "id": 7,
            "name": "Team A",
            "kb_id": "kb-1",
            "parent_id": null,
            "position": 2.5,
            "created_at": null,
            "updated_at": null
        }))
        .unwrap();
        assert!(group.auth_ids.is_empty());
        assert!(group.user_ids.is_empty());
        assert_eq!(group.label(), "Team A");
    }

    #[test]
    fn group_label_prefers_hierarchy_path() {
        let group: AuthGroup = serde_json::from_value(json!({
            "id": 8,
            "name": "Leaf",
            "kb_id": "kb-1",
            "path": "Root/Branch/Leaf",
            "created_at": null,
            "updated_at": null
        }))
        .unwrap();
        assert_eq!(group.label(), "Root/Branch/Leaf");
    }

    #[test]
    fn role_serializes_lowercase() {
        let req = CreateUserReq {
            account: "a".into(),
            password: "p".into(),
            role: UserRole::Guest,
        };
        let v = serde_json::to_value(&req).unwrap();
        assert_eq!(v["role"], "guest");
    }
}
