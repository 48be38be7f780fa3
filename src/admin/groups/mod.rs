mod edit;
mod handlers;
mod menu_items;

pub use handlers::manage_groups;
