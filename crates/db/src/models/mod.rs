pub mod language;
pub mod page;
pub mod site;
