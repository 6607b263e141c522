pub mod chart;
pub mod export_button;
pub mod generation_table;
pub mod login_form;
pub mod query_form;
pub mod status;
pub mod summary;
pub mod view_toggle;

pub use query_form::QueryFormValues;
pub use view_toggle::ViewMode;
