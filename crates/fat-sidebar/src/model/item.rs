//! Sidebar item records.
//!
//! An [`Item`] is plain data owned by an [`ItemStore`](super::ItemStore).
//! Views belong to the rendering layer, which looks them up by [`ItemId`];
//! there is no pointer from an item back to its view or its store.

use slotmap::new_key_type;

new_key_type! {
    /// Identity of an item inside an [`ItemStore`](super::ItemStore).
    ///
    /// Ids are minted by the store on insertion and are never reused: once an
    /// item is removed, its id stops resolving even if a new item takes its
    /// slot.
    pub struct ItemId;
}

/// How an item lays out its icon and label.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ItemStyle {
    /// Label below the image.
    #[default]
    Regular,
    /// Image only; the label appears in a hover overlay.
    Small {
        /// Edge length of the square icon.
        icon_size: f32,
        /// Space around the icon.
        padding: f32,
    },
}

impl ItemStyle {
    /// Whether hovering the item opens an overlay with the full label.
    pub fn supports_hovering(&self) -> bool {
        matches!(self, Self::Small { .. })
    }
}

/// The state the rendering layer should draw an item in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VisualState {
    /// Neither pressed nor selected.
    Normal,
    /// Selected and not pressed.
    Selected,
    /// Pressed. Takes precedence over selection.
    Highlighted,
}

/// Description of an item to be inserted into a store.
///
/// # Example
///
/// ```
/// use fat_sidebar::model::{ItemConfig, ItemStyle};
///
/// let config = ItemConfig::new("Inbox")
///     .with_icon("tray")
///     .with_style(ItemStyle::Small { icon_size: 16.0, padding: 4.0 });
/// assert_eq!(config.title, "Inbox");
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ItemConfig {
    /// Label text.
    pub title: String,
    /// Name of the icon resource, resolved by the rendering layer.
    pub icon: Option<String>,
    /// Layout style.
    pub style: ItemStyle,
}

impl ItemConfig {
    /// Creates a configuration with a title, no icon and the regular style.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    /// Sets the icon resource name.
    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = Some(icon.into());
        self
    }

    /// Sets the layout style.
    pub fn with_style(mut self, style: ItemStyle) -> Self {
        self.style = style;
        self
    }
}

impl From<&str> for ItemConfig {
    fn from(title: &str) -> Self {
        Self::new(title)
    }
}

impl From<String> for ItemConfig {
    fn from(title: String) -> Self {
        Self::new(title)
    }
}

/// One selectable, draggable entry in the sidebar.
///
/// The selection and highlight flags can only be changed through the store
/// and the selection controller, so every change is paired with its event.
#[derive(Debug, PartialEq)]
pub struct Item {
    id: ItemId,
    title: String,
    icon: Option<String>,
    style: ItemStyle,
    selected: bool,
    highlighted: bool,
}

impl Item {
    pub(crate) fn from_config(id: ItemId, config: ItemConfig) -> Self {
        Self {
            id,
            title: config.title,
            icon: config.icon,
            style: config.style,
            selected: false,
            highlighted: false,
        }
    }

    /// The item's identity.
    pub fn id(&self) -> ItemId {
        self.id
    }

    /// Label text.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Sets the label text.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Icon resource name, if any.
    pub fn icon(&self) -> Option<&str> {
        self.icon.as_deref()
    }

    /// Sets or clears the icon resource name.
    pub fn set_icon(&mut self, icon: Option<String>) {
        self.icon = icon;
    }

    /// Layout style.
    pub fn style(&self) -> ItemStyle {
        self.style
    }

    /// Changes the layout style.
    pub fn set_style(&mut self, style: ItemStyle) {
        self.style = style;
    }

    /// Whether the item is part of the selection.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Whether the item is currently pressed.
    pub fn is_highlighted(&self) -> bool {
        self.highlighted
    }

    /// Resolves the two flags into a single drawing state.
    pub fn visual_state(&self) -> VisualState {
        if self.highlighted {
            VisualState::Highlighted
        } else if self.selected {
            VisualState::Selected
        } else {
            VisualState::Normal
        }
    }

    pub(crate) fn set_selected(&mut self, selected: bool) {
        self.selected = selected;
    }

    pub(crate) fn set_highlighted(&mut self, highlighted: bool) {
        self.highlighted = highlighted;
    }
}
