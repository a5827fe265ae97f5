//! Reports from the engine to the presentation layer
//!
//! The engine never talks to UI code directly. Everything a panel needs to
//! show goes through [`EngineCallbacks`], called synchronously from inside a
//! frame or a session transition. [`XrStatus`] is a ready-made implementation
//! that just keeps the latest values.

/// Receiver of selection, hover and session reports
pub trait EngineCallbacks {
    /// An object was grabbed (`Some`) or released/deleted (`None`, count 0)
    fn on_object_selected(&mut self, name: Option<&str>, polygon_count: u32);

    /// The hovered object changed; `None` when no ray hits anything
    fn on_object_hovered(&mut self, name: Option<&str>, polygon_count: u32);

    fn on_xr_start(&mut self);

    fn on_xr_end(&mut self);

    /// Platform answered whether immersive VR is available
    fn on_xr_supported(&mut self, _supported: bool) {}
}

/// How the active object in [`XrStatus`] is being interacted with
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectStatus {
    Selected,
    Hovered,
}

/// Latest interaction state, as shown in the XR info panel
#[derive(Debug, Clone, Default, PartialEq)]
pub struct XrStatus {
    pub selected_object: Option<String>,
    pub hovered_object: Option<String>,
    pub polygon_count: u32,
    pub is_in_xr: bool,
    /// `None` until support has been checked
    pub xr_supported: Option<bool>,
}

impl XrStatus {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_selected(&mut self, name: Option<&str>, polygon_count: u32) {
        self.selected_object = name.map(str::to_owned);
        self.polygon_count = polygon_count;
    }

    pub fn clear_selected(&mut self) {
        self.set_selected(None, 0);
    }

    /// Updates the hovered name
    ///
    /// The polygon count is only taken over when something is hovered or
    /// nothing is selected, so a held object keeps showing its own count
    /// when the hover clears.
    pub fn set_hovered(&mut self, name: Option<&str>, polygon_count: Option<u32>) {
        self.hovered_object = name.map(str::to_owned);
        if let Some(count) = polygon_count {
            if name.is_some() || self.selected_object.is_none() {
                self.polygon_count = count;
            }
        }
    }

    /// Name to display: the selected object, else the hovered one
    pub fn active_label(&self) -> Option<&str> {
        self.selected_object
            .as_deref()
            .or(self.hovered_object.as_deref())
    }

    pub fn status(&self) -> Option<ObjectStatus> {
        if self.selected_object.is_some() {
            Some(ObjectStatus::Selected)
        } else if self.hovered_object.is_some() {
            Some(ObjectStatus::Hovered)
        } else {
            None
        }
    }

    /// Text of the enter/exit button
    pub fn xr_button_label(&self) -> &'static str {
        match self.xr_supported {
            None => "Checking XR...",
            Some(false) => "XR not supported",
            Some(true) if self.is_in_xr => "Exit XR",
            Some(true) => "Enter XR",
        }
    }
}

impl EngineCallbacks for XrStatus {
    fn on_object_selected(&mut self, name: Option<&str>, polygon_count: u32) {
        self.set_selected(name, polygon_count);
    }

    fn on_object_hovered(&mut self, name: Option<&str>, polygon_count: u32) {
        self.set_hovered(name, Some(polygon_count));
    }

    fn on_xr_start(&mut self) {
        self.is_in_xr = true;
    }

    fn on_xr_end(&mut self) {
        self.is_in_xr = false;
    }

    fn on_xr_supported(&mut self, supported: bool) {
        self.xr_supported = Some(supported);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hover_clear_keeps_selected_count() {
        let mut status = XrStatus::new();
        status.on_object_selected(Some("Model_1"), 120);
        status.on_object_hovered(Some("Model_2"), 40);
        assert_eq!(status.polygon_count, 40);

        status.on_object_selected(Some("Model_1"), 120);
        status.on_object_hovered(None, 0);
        assert_eq!(status.polygon_count, 120);
        assert_eq!(status.hovered_object, None);
    }

    #[test]
    fn test_hover_clear_without_selection_resets_count() {
        let mut status = XrStatus::new();
        status.on_object_hovered(Some("Model_2"), 40);
        status.on_object_hovered(None, 0);
        assert_eq!(status.polygon_count, 0);
    }

    #[test]
    fn test_hover_without_count_keeps_count() {
        let mut status = XrStatus::new();
        status.on_object_hovered(Some("Model_2"), 40);
        status.set_hovered(Some("Model_3"), None);
        assert_eq!(status.polygon_count, 40);
        assert_eq!(status.hovered_object.as_deref(), Some("Model_3"));
    }

    #[test]
    fn test_active_label_prefers_selection() {
        let mut status = XrStatus::new();
        assert_eq!(status.status(), None);

        status.on_object_hovered(Some("Model_2"), 40);
        assert_eq!(status.active_label(), Some("Model_2"));
        assert_eq!(status.status(), Some(ObjectStatus::Hovered));

        status.on_object_selected(Some("Model_1"), 120);
        assert_eq!(status.active_label(), Some("Model_1"));
        assert_eq!(status.status(), Some(ObjectStatus::Selected));

        status.clear_selected();
        assert_eq!(status.polygon_count, 0);
        assert_eq!(status.status(), Some(ObjectStatus::Hovered));
    }

    #[test]
    fn test_xr_button_label() {
        let mut status = XrStatus::new();
        assert_eq!(status.xr_button_label(), "Checking XR...");
        status.on_xr_supported(false);
        assert_eq!(status.xr_button_label(), "XR not supported");
        status.on_xr_supported(true);
        assert_eq!(status.xr_button_label(), "Enter XR");
        status.on_xr_start();
        assert_eq!(status.xr_button_label(), "Exit XR");
        status.on_xr_end();
        assert!(!status.is_in_xr);
    }
}
