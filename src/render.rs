//! Mapping from an item list to the button grid shown under the list message

use crate::session::Item;

const TOKEN_PREFIX: &str = "btn_";
const ITEM_TOKEN_PREFIX: &str = "btn_item_";
const EMPTY_TOKEN: &str = "btn_empty_list";
const REFRESH_TOKEN: &str = "btn_refresh_list";

/// Text of the list message itself; the list lives in its buttons
pub const SURFACE_TITLE: &str = "ToDo List";

/// What pressing a button asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Flip the item at this position (as rendered)
    Toggle(usize),
    Empty,
    Refresh,
}

impl Action {
    /// Encode as the opaque payload carried by the button
    pub fn token(self) -> String {
        match self {
            Action::Toggle(index) => format!("{ITEM_TOKEN_PREFIX}{index}"),
            Action::Empty => EMPTY_TOKEN.to_string(),
            Action::Refresh => REFRESH_TOKEN.to_string(),
        }
    }

    /// Decode a button payload; `None` for anything this bot did not issue
    pub fn parse(token: &str) -> Option<Self> {
        if !token.starts_with(TOKEN_PREFIX) {
            return None;
        }
        match token {
            EMPTY_TOKEN => Some(Action::Empty),
            REFRESH_TOKEN => Some(Action::Refresh),
            _ => token
                .strip_prefix(ITEM_TOKEN_PREFIX)
                .and_then(|index| index.parse().ok())
                .map(Action::Toggle),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Button {
    pub label: String,
    pub action: Action,
}

impl Button {
    fn new(label: impl Into<String>, action: Action) -> Self {
        Self {
            label: label.into(),
            action,
        }
    }
}

/// Rows of buttons, top to bottom
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ControlSurface {
    pub rows: Vec<Vec<Button>>,
}

#[allow(dead_code)] // Used in tests
impl ControlSurface {
    pub fn button_count(&self) -> usize {
        self.rows.iter().map(Vec::len).sum()
    }

    /// Labels of the item rows, excluding the control row
    pub fn item_labels(&self) -> Vec<&str> {
        self.rows
            .iter()
            .flatten()
            .filter(|b| matches!(b.action, Action::Toggle(_)))
            .map(|b| b.label.as_str())
            .collect()
    }
}

/// One row per item, then the fixed control row
pub fn render(items: &[Item]) -> ControlSurface {
    let mut rows: Vec<Vec<Button>> = items
        .iter()
        .enumerate()
        .map(|(index, item)| vec![Button::new(item.display_text(), Action::Toggle(index))])
        .collect();

    rows.push(vec![
        Button::new("empty list", Action::Empty),
        Button::new("refresh list", Action::Refresh),
    ]);

    ControlSurface { rows }
}
