use anyhow::Result;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{ContentArrangement, Table};

use crate::admin::context::AdminContext;
use crate::admin::format_timestamp;
use crate::admin::listing::{ListState, loading_spinner};
use crate::admin::selection::Selection;
use crate::admin::validate;
use crate::api::types::{AuthGroup, CreateAuthGroupReq};
use crate::menu_utils::{ConfirmResult, Dialog, SelectResult};

use super::edit::{GroupEditForm, plan_update};
use super::menu_items::{GroupActionItem, ManageMenuItem};

/// Main entry point for auth-group management. Groups are scoped per
/// knowledge base; the kb comes from the `--kb` flag, the config, or a
/// selection prompt, never from ambient state.
pub async fn manage_groups(ctx: &mut AdminContext, kb_flag: Option<String>) -> Result<()> {
    let Some(mut kb_id) = resolve_kb(ctx, kb_flag)? else {
        return Ok(());
    };

    let mut list = ListState::new();
    reload_groups(ctx, &mut list, &kb_id).await;

    loop {
        print_group_table(&list);

        let mut items: Vec<ManageMenuItem> = list
            .items
            .iter()
            .cloned()
            .map(ManageMenuItem::Group)
            .collect();
        items.push(ManageMenuItem::Add);
        if ctx.config().kb_ids.len() > 1 {
            items.push(ManageMenuItem::SwitchKb);
        }
        items.push(ManageMenuItem::Refresh);
        items.push(ManageMenuItem::Back);

        match Dialog::builder()
            .prompt(format!("Auth groups ({kb_id})"))
            .select(items)?
        {
            SelectResult::Selected(ManageMenuItem::Group(group)) => {
                if handle_group(ctx, group).await? {
                    reload_groups(ctx, &mut list, &kb_id).await;
                }
            }
            SelectResult::Selected(ManageMenuItem::Add) => {
                if create_group(ctx, &kb_id).await? {
                    reload_groups(ctx, &mut list, &kb_id).await;
                }
            }
            SelectResult::Selected(ManageMenuItem::SwitchKb) => {
                if let Some(picked) = pick_kb(ctx)? {
                    kb_id = picked;
                    reload_groups(ctx, &mut list, &kb_id).await;
                }
            }
            SelectResult::Selected(ManageMenuItem::Refresh) => {
                reload_groups(ctx, &mut list, &kb_id).await;
            }
            _ => break,
        }
    }

    Ok(())
}

fn resolve_kb(ctx: &mut AdminContext, kb_flag: Option<String>) -> Result<Option<String>> {
    if let Some(kb_id) = kb_flag {
        ctx.config_mut().remember_kb(&kb_id)?;
        return Ok(Some(kb_id));
    }

    if ctx.config().kb_ids.is_empty() {
        let entered = Dialog::builder()
            .prompt("Knowledge base id (blank to cancel)")
            .allow_empty()
            .input_dialog()?;
        if entered.is_empty() {
            ctx.emit_info("groups.kb", "No knowledge base selected.");
            return Ok(None);
        }
        ctx.config_mut().remember_kb(&entered)?;
        return Ok(Some(entered));
    }

    if ctx.config().kb_ids.len() == 1 {
        return Ok(Some(ctx.config().kb_ids[0].clone()));
    }

    if let Some(default) = ctx.config().default_kb.clone() {
        if ctx.config().kb_ids.contains(&default) {
            return Ok(Some(default));
        }
    }

    pick_kb(ctx)
}

fn pick_kb(ctx: &AdminContext) -> Result<Option<String>> {
    let ids = ctx.config().kb_ids.clone();
    match Dialog::builder().prompt("Knowledge base").select(ids)? {
        SelectResult::Selected(id) => Ok(Some(id)),
        _ => Ok(None),
    }
}

async fn reload_groups(ctx: &AdminContext, list: &mut ListState<AuthGroup>, kb_id: &str) {
    let spinner = loading_spinner("Loading auth groups");
    list.reload("groups.list", ctx.api().list_auth_groups(kb_id))
        .await;
    spinner.finish_and_clear();
}

fn print_group_table(list: &ListState<AuthGroup>) {
    if list.is_empty() {
        if !list.loading {
            println!("No auth groups in this knowledge base yet.");
        }
        return;
    }

    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Name", "Members", "Position", "Created"]);
    for group in &list.items {
        table.add_row(vec![
            group.label().to_string(),
            group.auth_ids.len().to_string(),
            format_position(group.position),
            format_timestamp(&group.created_at),
        ]);
    }
    println!("{table}");
}

fn print_group_detail(group: &AuthGroup) {
    println!(
        "{}: members {}, linked accounts {}, updated {}",
        group.label(),
        group.auth_ids.len(),
        group.user_ids.len(),
        format_timestamp(&group.updated_at),
    );
}

fn format_position(position: f64) -> String {
    if position.fract() == 0.0 {
        format!("{}", position as i64)
    } else {
        format!("{position}")
    }
}

async fn handle_group(ctx: &AdminContext, group: AuthGroup) -> Result<bool> {
    print_group_detail(&group);

    let actions = vec![
        GroupActionItem::Edit,
        GroupActionItem::Delete,
        GroupActionItem::Back,
    ];

    let mut selection = Selection::Idle;
    match Dialog::builder()
        .prompt(format!("Group {}", group.name))
        .select(actions)?
    {
        SelectResult::Selected(GroupActionItem::Edit) => selection = Selection::edit(group),
        SelectResult::Selected(GroupActionItem::Delete) => selection = Selection::delete(group),
        _ => {}
    }

    if selection.is_idle() {
        return Ok(false);
    }
    match selection.take() {
        Selection::Editing(group) => edit_group(ctx, &group).await,
        Selection::Deleting(group) => delete_group(ctx, &group).await,
        Selection::Idle => Ok(false),
    }
}

/// Create a group in the current kb. A failed submit keeps the entered
/// values and re-opens the form; a blank name cancels.
async fn create_group(ctx: &AdminContext, kb_id: &str) -> Result<bool> {
    if kb_id.is_empty() {
        ctx.emit_info("groups.create", "Select a knowledge base first.");
        return Ok(false);
    }

    let mut name = String::new();
    let mut position_text = String::new();
    loop {
        name = Dialog::builder()
            .prompt("Group name (blank to cancel)")
            .allow_empty()
            .initial(name.as_str())
            .input_dialog()?;
        if name.is_empty() {
            ctx.emit_info("groups.create.cancelled", "Creation cancelled.");
            return Ok(false);
        }
        if let Err(msg) = validate::group_name(&name) {
            ctx.emit_info("groups.create.invalid", &msg);
            continue;
        }

        position_text = Dialog::builder()
            .prompt("Position (blank for 0)")
            .allow_empty()
            .initial(position_text.as_str())
            .input_dialog()?;
        let position = match validate::position(&position_text) {
            Ok(value) => value,
            Err(msg) => {
                ctx.emit_info("groups.create.invalid", &msg);
                continue;
            }
        };

        let req = CreateAuthGroupReq {
            name: name.clone(),
            kb_id: kb_id.to_string(),
            parent_id: None,
            position: position as f64,
            auth_ids: Vec::new(),
        };
        match ctx.api().create_auth_group(&req).await {
            Ok(created) => {
                ctx.emit_success(
                    "groups.created",
                    &format!("Created group {} (id {}).", name, created.id),
                );
                return Ok(true);
            }
            Err(err) => {
                ctx.report_api_error("groups.create", &err);
            }
        }
    }
}

/// Edit name and position. The change-set is computed against the group
/// as listed; an unchanged form is rejected locally without a request.
async fn edit_group(ctx: &AdminContext, group: &AuthGroup) -> Result<bool> {
    let name = loop {
        let entered = Dialog::builder()
            .prompt("Group name")
            .initial(group.name.as_str())
            .input_dialog()?;
        match validate::group_name(&entered) {
            Ok(()) => break entered,
            Err(msg) => ctx.emit_info("groups.edit.invalid", &msg),
        }
    };

    let position = loop {
        let entered = Dialog::builder()
            .prompt("Position")
            .allow_empty()
            .initial(format_position(group.position).as_str())
            .input_dialog()?;
        match validate::position(&entered) {
            Ok(value) => break value,
            Err(msg) => ctx.emit_info("groups.edit.invalid", &msg),
        }
    };

    let form = GroupEditForm { name, position };
    let Some(req) = plan_update(group, &form) else {
        ctx.emit_info("groups.edit.noop", "Nothing to change.");
        return Ok(false);
    };

    match ctx.api().update_auth_group(group.id, &req).await {
        Ok(()) => {
            ctx.emit_success("groups.updated", &format!("Updated group {}.", req.name));
            Ok(true)
        }
        Err(err) => {
            ctx.report_api_error("groups.edit", &err);
            Ok(false)
        }
    }
}

/// The destructive call fires only from the explicit confirmation inside
/// this dialog.
async fn delete_group(ctx: &AdminContext, group: &AuthGroup) -> Result<bool> {
    let confirmed = Dialog::builder()
        .confirm(format!("Delete auth group '{}'?", group.name))
        .yes_text("Delete")
        .no_text("Cancel")
        .show_confirmation()?;

    if confirmed != ConfirmResult::Yes {
        return Ok(false);
    }

    match ctx.api().delete_auth_group(group.id).await {
        Ok(()) => {
            ctx.emit_success("groups.deleted", &format!("Deleted group {}.", group.name));
            Ok(true)
        }
        Err(err) => {
            ctx.report_api_error("groups.delete", &err);
            Ok(false)
        }
    }
}
