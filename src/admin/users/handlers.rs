use anyhow::Result;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};
use futures_util::future::join_all;

use crate::admin::context::AdminContext;
use crate::admin::format_timestamp;
use crate::admin::listing::{ListState, loading_spinner};
use crate::admin::selection::Selection;
use crate::admin::validate;
use crate::api::types::{AuthGroup, CreateUserReq, UpdateUserGroupsReq, UserListItem, UserRole};
use crate::menu_utils::{ConfirmResult, Dialog, SelectResult};
use crate::password;

use super::edit::{UserEditForm, UserUpdatePlan, plan_update};
use super::menu_items::{GroupOption, ManageMenuItem, UserActionItem};

/// Main entry point for guest-user management
pub async fn manage_users(ctx: &mut AdminContext) -> Result<()> {
    let mut list = ListState::new();
    reload_users(ctx, &mut list).await;

    loop {
        print_user_table(&list);

        let mut items: Vec<ManageMenuItem> = list
            .items
            .iter()
            .cloned()
            .map(ManageMenuItem::User)
            .collect();
        items.push(ManageMenuItem::Add);
        items.push(ManageMenuItem::Refresh);
        items.push(ManageMenuItem::Back);

        match Dialog::builder().prompt("Guest users").select(items)? {
            SelectResult::Selected(ManageMenuItem::User(user)) => {
                if handle_user(ctx, user).await? {
                    reload_users(ctx, &mut list).await;
                }
            }
            SelectResult::Selected(ManageMenuItem::Add) => {
                if create_user(ctx).await? {
                    reload_users(ctx, &mut list).await;
                }
            }
            SelectResult::Selected(ManageMenuItem::Refresh) => {
                reload_users(ctx, &mut list).await;
            }
            _ => break,
        }
    }

    Ok(())
}

async fn reload_users(ctx: &AdminContext, list: &mut ListState<UserListItem>) {
    let spinner = loading_spinner("Loading guest users");
    list.reload("users.list", ctx.api().list_guest_users()).await;
    spinner.finish_and_clear();
}

fn print_user_table(list: &ListState<UserListItem>) {
    if list.is_empty() {
        if !list.loading {
            println!("No guest users yet.");
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Account", "Created", "Last access"]);
    for user in &list.items {
        table.add_row(vec![
            user.account.clone(),
            format_timestamp(&user.created_at),
            format_timestamp(&user.last_access),
        ]);
    }
    println!("{table}");
}

/// Row action dispatch: the chosen action becomes the screen's selection,
/// and at most one dialog mounts per selection.
async fn handle_user(ctx: &AdminContext, user: UserListItem) -> Result<bool> {
    let actions = vec![
        UserActionItem::Edit,
        UserActionItem::Delete,
        UserActionItem::Back,
    ];

    let mut selection = Selection::Idle;
    match Dialog::builder()
        .prompt(format!("User {} ({})", user.account, user.role.as_str()))
        .select(actions)?
    {
        SelectResult::Selected(UserActionItem::Edit) => selection = Selection::edit(user),
        SelectResult::Selected(UserActionItem::Delete) => selection = Selection::delete(user),
        _ => {}
    }

    if selection.is_idle() {
        return Ok(false);
    }
    match selection.take() {
        Selection::Editing(user) => edit_user(ctx, &user).await,
        Selection::Deleting(user) => delete_user(ctx, &user).await,
        Selection::Idle => Ok(false),
    }
}

/// Create a new guest user. A failed submit keeps the entered values and
/// re-opens the form; a blank account cancels.
async fn create_user(ctx: &AdminContext) -> Result<bool> {
    let mut account = String::new();
    loop {
        account = Dialog::builder()
            .prompt("Account name (blank to cancel)")
            .allow_empty()
            .initial(account.as_str())
            .input_dialog()?;
        if account.is_empty() {
            ctx.emit_info("users.create.cancelled", "Creation cancelled.");
            return Ok(false);
        }
        if let Err(msg) = validate::account_name(&account) {
            ctx.emit_info("users.create.invalid", &msg);
            continue;
        }

        let entered = Dialog::builder()
            .prompt("Password (blank to generate)")
            .allow_empty()
            .password_dialog()?;
        if !entered.is_empty() {
            if let Err(msg) = validate::password(&entered) {
                ctx.emit_info("users.create.invalid", &msg);
                continue;
            }
        }
        let password = if entered.is_empty() {
            password::generate()
        } else {
            entered
        };

        let req = CreateUserReq {
            account: account.clone(),
            password: password.clone(),
            role: UserRole::Guest,
        };
        match ctx.api().create_guest_user(&req).await {
            Ok(created) => {
                ctx.emit_success("users.created", &format!("Created {}.", account));
                if crate::ui::is_debug_enabled() {
                    ctx.emit_info("users.created.id", &format!("New user id: {}", created.id));
                }
                print_credentials(&account, &password);
                return Ok(true);
            }
            Err(err) => {
                // entered values stay; the loop re-opens the form prefilled
                ctx.report_api_error("users.create", &err);
            }
        }
    }
}

/// Credentials are shown exactly once; nothing is kept client-side.
fn print_credentials(account: &str, password: &str) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .add_row(vec!["Account", account])
        .add_row(vec!["Password", password]);
    println!("{table}");
    println!("Store the password now; it cannot be shown again.");
}

async fn edit_user(ctx: &AdminContext, user: &UserListItem) -> Result<bool> {
    let spinner = loading_spinner("Loading group membership");
    let (membership, catalog) =
        tokio::join!(ctx.api().user_groups(&user.id), load_group_catalog(ctx));
    spinner.finish_and_clear();

    let membership = match membership {
        Ok(groups) => groups,
        Err(err) => {
            ctx.report_api_error("users.edit.load", &err);
            return Ok(false);
        }
    };
    let initial_ids: Vec<u64> = membership.iter().map(|group| group.id).collect();

    println!("Editing user {} (account is fixed)", user.account);

    // blank keeps the current password
    let new_password = loop {
        let entered = Dialog::builder()
            .prompt("New password (blank to keep)")
            .allow_empty()
            .password_dialog()?;
        if entered.is_empty() {
            break entered;
        }
        match validate::password(&entered) {
            Ok(()) => break entered,
            Err(msg) => ctx.emit_info("users.edit.invalid", &msg),
        }
    };

    let group_ids = select_membership(user, &membership, &catalog, &initial_ids)?;

    let form = UserEditForm {
        password: new_password,
        group_ids,
    };
    let Some(plan) = plan_update(&initial_ids, &form) else {
        ctx.emit_info("users.edit.noop", "Nothing to change.");
        return Ok(false);
    };

    submit_update(ctx, user, plan).await
}

/// Collect the group catalog across every configured knowledge base.
/// A kb whose list fails contributes nothing; the others still load.
async fn load_group_catalog(ctx: &AdminContext) -> Vec<AuthGroup> {
    let fetches = ctx
        .config()
        .kb_ids
        .iter()
        .map(|kb_id| ctx.api().list_auth_groups(kb_id));

    join_all(fetches)
        .await
        .into_iter()
        .filter_map(|result| result.ok())
        .flatten()
        .collect()
}

fn select_membership(
    user: &UserListItem,
    membership: &[AuthGroup],
    catalog: &[AuthGroup],
    initial_ids: &[u64],
) -> Result<Vec<u64>> {
    let mut options: Vec<GroupOption> = catalog
        .iter()
        .map(|group| GroupOption {
            group: group.clone(),
            member: initial_ids.contains(&group.id),
        })
        .collect();

    // membership can reference groups of kbs this client does not know;
    // keep those selectable so confirming doesn't silently drop them
    for group in membership {
        if !options.iter().any(|option| option.group.id == group.id) {
            options.push(GroupOption {
                group: group.clone(),
                member: true,
            });
        }
    }

    if options.is_empty() {
        return Ok(initial_ids.to_vec());
    }

    match Dialog::builder()
        .prompt(format!("Groups for {}", user.account))
        .header("Space toggles, Enter confirms, Esc keeps the current set")
        .select_many(options)?
    {
        SelectResult::MultiSelected(picked) => {
            Ok(picked.into_iter().map(|option| option.group.id).collect())
        }
        _ => Ok(initial_ids.to_vec()),
    }
}

/// One request per changed aspect, issued together; the dialog closes
/// only after every request has settled. Failures are reported per
/// request and applied changes are not rolled back.
async fn submit_update(
    ctx: &AdminContext,
    user: &UserListItem,
    plan: UserUpdatePlan,
) -> Result<bool> {
    let password_req = plan.password.map(|password| CreateUserReq {
        account: user.account.clone(),
        password,
        role: UserRole::Guest,
    });
    let groups_req = plan.group_ids.map(|group_ids| UpdateUserGroupsReq {
        user_id: user.id.clone(),
        group_ids,
    });

    let password_fut = async {
        match &password_req {
            Some(req) => Some(ctx.api().update_guest_user(&user.id, req).await),
            None => None,
        }
    };
    let groups_fut = async {
        match &groups_req {
            Some(req) => Some(ctx.api().set_user_groups(req).await),
            None => None,
        }
    };

    let (password_result, groups_result) = tokio::join!(password_fut, groups_fut);

    let mut applied = false;
    let mut failed = false;
    match password_result {
        Some(Ok(())) => applied = true,
        Some(Err(err)) => {
            ctx.report_api_error("users.edit.password", &err);
            failed = true;
        }
        None => {}
    }
    match groups_result {
        Some(Ok(())) => applied = true,
        Some(Err(err)) => {
            ctx.report_api_error("users.edit.membership", &err);
            failed = true;
        }
        None => {}
    }

    if !failed {
        ctx.emit_success("users.updated", &format!("Updated {}.", user.account));
    }
    Ok(applied)
}

/// The destructive call fires only from the explicit confirmation inside
/// this dialog, never from the row action that opened it.
async fn delete_user(ctx: &AdminContext, user: &UserListItem) -> Result<bool> {
    let confirmed = Dialog::builder()
        .confirm(format!(
            "Delete guest user '{}'? This cannot be undone.",
            user.account
        ))
        .yes_text("Delete")
        .no_text("Cancel")
        .show_confirmation()?;

    if confirmed != ConfirmResult::Yes {
        return Ok(false);
    }

    match ctx.api().delete_guest_user(&user.id).await {
        Ok(()) => {
            ctx.emit_success("users.deleted", &format!("Deleted {}.", user.account));
            Ok(true)
        }
        Err(err) => {
            ctx.report_api_error("users.delete", &err);
            Ok(false)
        }
    }
}
