use crate::api::types::AuthGroup;
use crate::menu_utils::Selectable;

/// Menu item for the auth-group list screen
#[derive(Clone)]
pub(super) enum ManageMenuItem {
    Group(AuthGroup),
    Add,
    SwitchKb,
    Refresh,
    Back,
}

impl Selectable for ManageMenuItem {
    fn display_text(&self) -> String {
        match self {
            ManageMenuItem::Group(group) => group.label().to_string(),
            ManageMenuItem::Add => "+ Add group".to_string(),
            ManageMenuItem::SwitchKb => "Switch knowledge base".to_string(),
            ManageMenuItem::Refresh => "Refresh list".to_string(),
            ManageMenuItem::Back => "Back".to_string(),
        }
    }
}

/// Actions available for a selected group
#[derive(Clone, Copy)]
pub(super) enum GroupActionItem {
    Edit,
    Delete,
    Back,
}

impl Selectable for GroupActionItem {
    fn display_text(&self) -> String {
        match self {
            GroupActionItem::Edit => "Edit (name / position)".to_string(),
            GroupActionItem::Delete => "Delete group".to_string(),
            GroupActionItem::Back => "Back".to_string(),
        }
    }
}
