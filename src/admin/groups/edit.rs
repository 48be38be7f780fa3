//! Change-set planning for the group edit dialog.

use crate::api::types::{AuthGroup, UpdateAuthGroupReq};

/// Values collected from the edit form.
#[derive(Debug, Clone)]
pub struct GroupEditForm {
    pub name: String,
    pub position: i64,
}

/// Compare the form against the group as it was when the dialog opened.
/// Returns `None` when nothing changed; the submit is then rejected
/// locally and no request is made. A change produces the single update
/// request, carrying the untouched fields through unchanged.
pub fn plan_update(group: &AuthGroup, form: &GroupEditForm) -> Option<UpdateAuthGroupReq> {
    let position = form.position as f64;
    if form.name == group.name && position == group.position {
        return None;
    }

    Some(UpdateAuthGroupReq {
        name: form.name.clone(),
        parent_id: group.parent_id,
        position,
        auth_ids: group.auth_ids.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group(name: &str, position: f64) -> AuthGroup {
        AuthGroup {
            id: 7,
            name: name.to_string(),
            kb_id: "kb-1".to_string(),
            parent_id: Some(3),
            position,
            auth_ids: vec![10, 11],
            user_ids: Vec::new(),
            path: None,
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn unchanged_form_yields_no_request() {
        let g = group("Team A", 2.0);
        let form = GroupEditForm {
            name: "Team A".into(),
            position: 2,
        };
        assert!(plan_update(&g, &form).is_none());
    }

    #[test]
    fn renaming_produces_one_request_with_fields_carried() {
        let g = group("Team A", 2.0);
        let form = GroupEditForm {
            name: "Team B".into(),
            position: 2,
        };
        let req = plan_update(&g, &form).unwrap();
        assert_eq!(req.name, "Team B");
        assert_eq!(req.position, 2.0);
        assert_eq!(req.parent_id, Some(3));
        assert_eq!(req.auth_ids, vec![10, 11]);
    }

    #[test]
    fn moving_position_produces_one_request() {
        let g = group("Team A", 0.0);
        let form = GroupEditForm {
            name: "Team A".into(),
            position: 5,
        };
        let req = plan_update(&g, &form).unwrap();
        assert_eq!(req.position, 5.0);
    }

    #[test]
    fn fractional_backend_position_counts_as_changed() {
        // the backend may hold 1.5; the form can only submit whole numbers
        let g = group("Team A", 1.5);
        let form = GroupEditForm {
            name: "Team A".into(),
            position: 1,
        };
        assert!(plan_update(&g, &form).is_some());
    }
}
