mod dialog;

pub use dialog::{ConfirmResult, Dialog, SelectResult, Selectable};
