//! Change-set planning for the user edit dialog.
//!
//! The dialog snapshots the user's group ids at mount and collects form
//! values at submit; this module decides which update requests to issue.
//! Keeping the decision pure means the "no changes → no calls" and
//! "only changed aspects are submitted" rules are directly testable.

/// Values collected from the edit form. `password` is blank when the
/// field was left untouched.
#[derive(Debug, Clone)]
pub struct UserEditForm {
    pub password: String,
    pub group_ids: Vec<u64>,
}

/// The requests one edit submit will issue: each `Some` aspect becomes
/// exactly one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserUpdatePlan {
    pub password: Option<String>,
    pub group_ids: Option<Vec<u64>>,
}

/// Compare the form against the snapshot taken at dialog open. Returns
/// `None` when nothing changed, in which case the submit is rejected
/// locally and no request is made.
pub fn plan_update(initial_group_ids: &[u64], form: &UserEditForm) -> Option<UserUpdatePlan> {
    let password = if form.password.is_empty() {
        None
    } else {
        Some(form.password.clone())
    };

    // membership comparison is order-insensitive
    let mut current = form.group_ids.clone();
    let mut initial = initial_group_ids.to_vec();
    current.sort_unstable();
    current.dedup();
    initial.sort_unstable();
    initial.dedup();

    let group_ids = if current != initial {
        Some(form.group_ids.clone())
    } else {
        None
    };

    if password.is_none() && group_ids.is_none() {
        return None;
    }

    Some(UserUpdatePlan {
        password,
        group_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form(password: &str, group_ids: &[u64]) -> UserEditForm {
        UserEditForm {
            password: password.to_string(),
            group_ids: group_ids.to_vec(),
        }
    }

    #[test]
    fn unchanged_form_yields_no_plan() {
        assert_eq!(plan_update(&[1, 2], &form("", &[1, 2])), None);
    }

    #[test]
    fn same_groups_in_different_order_yield_no_plan() {
        assert_eq!(plan_update(&[3, 1, 2], &form("", &[2, 3, 1])), None);
    }

    #[test]
    fn password_only_change_plans_exactly_one_aspect() {
        let plan = plan_update(&[1, 2], &form("s3cret-pass", &[2, 1])).unwrap();
        assert_eq!(plan.password.as_deref(), Some("s3cret-pass"));
        assert_eq!(plan.group_ids, None);
    }

    #[test]
    fn group_only_change_plans_exactly_one_aspect() {
        let plan = plan_update(&[1, 2], &form("", &[1, 2, 3])).unwrap();
        assert_eq!(plan.password, None);
        assert_eq!(plan.group_ids, Some(vec![1, 2, 3]));
    }

    #[test]
    fn clearing_all_groups_is_a_change() {
        let plan = plan_update(&[1], &form("", &[])).unwrap();
        assert_eq!(plan.group_ids, Some(Vec::new()));
    }

    #[test]
    fn both_aspects_changed_plan_both_requests() {
        let plan = plan_update(&[1], &form("s3cret-pass", &[1, 4])).unwrap();
        assert!(plan.password.is_some());
        assert!(plan.group_ids.is_some());
    }

    #[test]
    fn submitted_group_order_is_preserved_in_the_plan() {
        let plan = plan_update(&[], &form("", &[4, 2])).unwrap();
        assert_eq!(plan.group_ids, Some(vec![4, 2]));
    }
}
