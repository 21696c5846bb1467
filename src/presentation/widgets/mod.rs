mod form;
mod input;
mod status_bar;
mod user_table;

pub use form::{Form, FormAction, FormField};
pub use input::TextInput;
pub use status_bar::{StatusBar, StatusLevel};
pub use user_table::{EMPTY_MESSAGE, UserTable, UserTableStyle};
