mod binding;
mod store;

pub use binding::{Binding, Record, Shape, bind, table_variable_name};
pub use store::{VariableStore, Variables};
