use crate::api::types::{AuthGroup, UserListItem};
use crate::menu_utils::Selectable;

/// Menu item for the guest-user list screen
#[derive(Clone)]
pub(super) enum ManageMenuItem {
    User(UserListItem),
    Add,
    Refresh,
    Back,
}

impl Selectable for ManageMenuItem {
    fn display_text(&self) -> String {
        match self {
            ManageMenuItem::User(user) => user.account.clone(),
            ManageMenuItem::Add => "+ Add user".to_string(),
            ManageMenuItem::Refresh => "Refresh list".to_string(),
            ManageMenuItem::Back => "Back".to_string(),
        }
    }
}

/// Actions available for a selected user
#[derive(Clone, Copy)]
pub(super) enum UserActionItem {
    Edit,
    Delete,
    Back,
}

impl Selectable for UserActionItem {
    fn display_text(&self) -> String {
        match self {
            UserActionItem::Edit => "Edit (password / groups)".to_string(),
            UserActionItem::Delete => "Delete user".to_string(),
            UserActionItem::Back => "Back".to_string(),
        }
    }
}

/// Multi-select entry for group membership, pre-checked when the user is
/// already a member.
#[derive(Clone)]
pub(super) struct GroupOption {
    pub group: AuthGroup,
    pub member: bool,
}

impl Selectable for GroupOption {
    fn display_text(&self) -> String {
        format!("{} ({})", self.group.label(), self.group.kb_id)
    }

    fn initially_checked(&self) -> bool {
        self.member
    }
}
