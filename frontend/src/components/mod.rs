//! Declarative widget descriptions for the weight log tab.

pub mod buttons;
pub mod weight_dialog;
pub mod weight_table;
