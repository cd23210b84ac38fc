pub mod activity;
pub mod entry;
pub mod form;
pub mod model_state;
pub mod views;

pub use activity::Activity;
pub use entry::{Entry, Intensity, NewEntry};
pub use form::EntryFormFields;
pub use model_state::ModelState;
pub use views::{EntriesIndexView, EntryDeleteView, EntryFormView, EntryListItem};
