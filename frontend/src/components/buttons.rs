use crate::config::SelectionMode;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonAction {
    New,
    Delete,
}

/// When a toolbar button is clickable, in terms of the table selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonEnabled {
    Always,
    /// Exactly one row selected
    One,
    /// At least one row selected
    Multi,
}

impl ButtonEnabled {
    pub fn allows(&self, selected_count: usize) -> bool {
        match self {
            ButtonEnabled::Always => true,
            ButtonEnabled::One => selected_count == 1,
            ButtonEnabled::Multi => selected_count >= 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ButtonSpec {
    pub action: ButtonAction,
    pub id: &'static str,
    pub text: &'static str,
    pub icon: &'static str,
    pub enabled: ButtonEnabled,
}

impl ButtonSpec {
    pub fn is_enabled(&self, selected_count: usize) -> bool {
        self.enabled.allows(selected_count)
    }
}

/// Toolbar for the weight log table
pub fn weight_log_buttons(selection_mode: SelectionMode) -> Vec<ButtonSpec> {
    let delete_enabled = match selection_mode {
        SelectionMode::Multi => ButtonEnabled::Multi,
        SelectionMode::Single => ButtonEnabled::One,
    };

    vec![
        ButtonSpec {
            action: ButtonAction::New,
            id: "new",
            text: "New Weight Entry",
            icon: "new",
            enabled: ButtonEnabled::Always,
        },
        ButtonSpec {
            action: ButtonAction::Delete,
            id: "delete",
            text: "Delete",
            icon: "delete",
            enabled: delete_enabled,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_always_enabled() {
        let buttons = weight_log_buttons(SelectionMode::Multi);
        assert_eq!(buttons[0].text, "New Weight Entry");
        assert!(buttons[0].is_enabled(0));
        assert!(buttons[0].is_enabled(4));
    }

    #[test]
    fn test_delete_follows_selection_mode() {
        let multi = &weight_log_buttons(SelectionMode::Multi)[1];
        assert!(!multi.is_enabled(0));
        assert!(multi.is_enabled(1));
        assert!(multi.is_enabled(3));

        let single = &weight_log_buttons(SelectionMode::Single)[1];
        assert!(!single.is_enabled(0));
        assert!(single.is_enabled(1));
        assert!(!single.is_enabled(2));
    }
}
