/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at http://mozilla.org/MPL/2.0/. */

//! Which of the three views the panel shows, and what the view has to do to get there.
//!
//! The machine is re-evaluated every time the panel becomes active:
//!
//! - No account: show the sign-in overlay and lock scrolling. Nothing is fetched.
//! - Account: drop the overlay (if it's up), unlock scrolling and ask for a refresh.
//! - New sections from a refresh: `Populated` if there are any, otherwise `Empty` with a
//!   placeholder background and no row separators.
//!
//! Failed refreshes never reach the machine, so whatever was on screen stays there.

use crate::refresh::LoadState;
use crate::types::DisplaySection;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelState {
    NoAccount,
    Empty,
    /// Never holds an empty vec.
    Populated(Vec<DisplaySection>),
}

impl PanelState {
    fn for_sections(sections: &[DisplaySection]) -> Self {
        if sections.is_empty() {
            PanelState::Empty
        } else {
            PanelState::Populated(sections.to_vec())
        }
    }

    pub fn sections(&self) -> &[DisplaySection] {
        match self {
            PanelState::Populated(sections) => sections,
            PanelState::NoAccount | PanelState::Empty => &[],
        }
    }
}

/// Things the view must do, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewEffect {
    ShowNoAccountOverlay,
    RemoveNoAccountOverlay,
    SetScrollEnabled(bool),
    ShowPlaceholder,
    ClearPlaceholder,
    SetSeparatorsVisible(bool),
    ReloadData,
}

/// The result of feeding the machine an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Transition {
    /// The new state, if it changed.
    pub state: Option<PanelState>,
    pub effects: Vec<ViewEffect>,
    /// Whether a refresh should be started.
    pub refresh: bool,
}

#[derive(Debug, Default)]
pub struct PresentationStateMachine {
    // None until we know what to show: before the first activation, and while signed in but
    // still waiting for the first successful fetch.
    state: Option<PanelState>,
    overlay_visible: bool,
}

impl PresentationStateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> Option<&PanelState> {
        self.state.as_ref()
    }

    pub fn sections(&self) -> &[DisplaySection] {
        match &self.state {
            Some(state) => state.sections(),
            None => &[],
        }
    }

    pub fn is_overlay_visible(&self) -> bool {
        self.overlay_visible
    }

    /// The panel became active. `loaded` is whatever the refresh controller currently holds.
    pub fn on_activation(&mut self, has_account: bool, loaded: &LoadState) -> Transition {
        let mut transition = Transition::default();
        if !has_account {
            if !self.overlay_visible {
                self.overlay_visible = true;
                transition.effects.push(ViewEffect::SetScrollEnabled(false));
                transition.effects.push(ViewEffect::ShowNoAccountOverlay);
            }
            transition.state = self.set_state(PanelState::NoAccount);
            return transition;
        }

        if self.overlay_visible {
            self.overlay_visible = false;
            transition.effects.push(ViewEffect::SetScrollEnabled(true));
            transition.effects.push(ViewEffect::RemoveNoAccountOverlay);
        }
        // Coming back from the no-account view: show whatever we had while the refresh runs.
        if matches!(self.state, None | Some(PanelState::NoAccount)) {
            match loaded {
                LoadState::Loaded(sections) => {
                    let presented = self.present(sections);
                    transition.state = presented.state;
                    transition.effects.extend(presented.effects);
                }
                LoadState::Uninitialized => self.state = None,
            }
        }
        transition.refresh = true;
        transition
    }

    /// A refresh produced new sections.
    pub fn on_sections(&mut self, sections: &[DisplaySection]) -> Transition {
        if self.state == Some(PanelState::NoAccount) {
            // Signed out while the fetch was in flight; the overlay wins.
            log::debug!("Ignoring {} sections without an account", sections.len());
            return Transition::default();
        }
        self.present(sections)
    }

    fn present(&mut self, sections: &[DisplaySection]) -> Transition {
        let effects = if sections.is_empty() {
            vec![
                ViewEffect::ShowPlaceholder,
                ViewEffect::SetSeparatorsVisible(false),
                ViewEffect::ReloadData,
            ]
        } else {
            vec![
                ViewEffect::ClearPlaceholder,
                ViewEffect::SetSeparatorsVisible(true),
                ViewEffect::ReloadData,
            ]
        };
        Transition {
            state: self.set_state(PanelState::for_sections(sections)),
            effects,
            refresh: false,
        }
    }

    fn set_state(&mut self, state: PanelState) -> Option<PanelState> {
        if self.state.as_ref() == Some(&state) {
            None
        } else {
            self.state = Some(state.clone());
            Some(state)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hierarchy::build;
    use crate::types::{ClientAndTabs, ClientRecord, TabRecord, Timestamp};
    use url::Url;

    fn sections(count: usize) -> Vec<DisplaySection> {
        build((0..count).map(|i| ClientAndTabs {
            client: ClientRecord {
                id: format!("client-{}", i),
                name: format!("Device {}", i),
                device_type: "desktop".to_string(),
                last_modified: Timestamp(0),
            },
            tabs: vec![TabRecord {
                title: "tab".to_string(),
                url: Url::parse("https://example.com/").unwrap(),
                last_used: Timestamp(0),
            }],
        }))
    }

    #[test]
    fn test_no_account() {
        let mut machine = PresentationStateMachine::new();
        assert_eq!(machine.state(), None);
        let t = machine.on_activation(false, &LoadState::Uninitialized);
        assert_eq!(
            t,
            Transition {
                state: Some(PanelState::NoAccount),
                effects: vec![
                    ViewEffect::SetScrollEnabled(false),
                    ViewEffect::ShowNoAccountOverlay
                ],
                refresh: false,
            }
        );
        assert!(machine.is_overlay_visible());

        // Activating again doesn't stack another overlay.
        let t = machine.on_activation(false, &LoadState::Uninitialized);
        assert_eq!(t, Transition::default());
        assert_eq!(machine.state(), Some(&PanelState::NoAccount));
    }

    #[test]
    fn test_no_account_ignores_loaded_sections() {
        let mut machine = PresentationStateMachine::new();
        machine.on_activation(true, &LoadState::Uninitialized);
        machine.on_sections(&sections(2));
        let t = machine.on_activation(false, &LoadState::Loaded(sections(2)));
        assert_eq!(t.state, Some(PanelState::NoAccount));
        assert!(!t.refresh);
        assert!(machine.sections().is_empty());

        // A fetch that was already running when we lost the account doesn't bring the list back.
        let t = machine.on_sections(&sections(3));
        assert_eq!(t, Transition::default());
        assert_eq!(machine.state(), Some(&PanelState::NoAccount));
    }

    #[test]
    fn test_account_requests_refresh() {
        let mut machine = PresentationStateMachine::new();
        let t = machine.on_activation(true, &LoadState::Uninitialized);
        assert_eq!(
            t,
            Transition {
                state: None,
                effects: vec![],
                refresh: true,
            }
        );
        assert_eq!(machine.state(), None);
    }

    #[test]
    fn test_populated_and_empty() {
        let mut machine = PresentationStateMachine::new();
        machine.on_activation(true, &LoadState::Uninitialized);

        let t = machine.on_sections(&sections(2));
        assert_eq!(t.state, Some(PanelState::Populated(sections(2))));
        assert_eq!(
            t.effects,
            vec![
                ViewEffect::ClearPlaceholder,
                ViewEffect::SetSeparatorsVisible(true),
                ViewEffect::ReloadData
            ]
        );
        assert_eq!(machine.sections().len(), 2);

        let t = machine.on_sections(&[]);
        assert_eq!(t.state, Some(PanelState::Empty));
        assert_eq!(
            t.effects,
            vec![
                ViewEffect::ShowPlaceholder,
                ViewEffect::SetSeparatorsVisible(false),
                ViewEffect::ReloadData
            ]
        );
        assert!(machine.sections().is_empty());
    }

    #[test]
    fn test_same_sections_reload_without_state_change() {
        let mut machine = PresentationStateMachine::new();
        machine.on_activation(true, &LoadState::Uninitialized);
        machine.on_sections(&sections(1));
        let t = machine.on_sections(&sections(1));
        assert_eq!(t.state, None);
        assert!(t.effects.contains(&ViewEffect::ReloadData));
    }

    #[test]
    fn test_sign_in_restores_last_sections() {
        let mut machine = PresentationStateMachine::new();
        machine.on_activation(false, &LoadState::Uninitialized);
        let t = machine.on_activation(true, &LoadState::Loaded(sections(1)));
        assert_eq!(t.state, Some(PanelState::Populated(sections(1))));
        assert_eq!(
            t.effects,
            vec![
                ViewEffect::SetScrollEnabled(true),
                ViewEffect::RemoveNoAccountOverlay,
                ViewEffect::ClearPlaceholder,
                ViewEffect::SetSeparatorsVisible(true),
                ViewEffect::ReloadData
            ]
        );
        assert!(t.refresh);
        assert!(!machine.is_overlay_visible());
    }

    #[test]
    fn test_sign_in_before_first_load() {
        let mut machine = PresentationStateMachine::new();
        machine.on_activation(false, &LoadState::Uninitialized);
        let t = machine.on_activation(true, &LoadState::Uninitialized);
        assert_eq!(t.state, None);
        assert_eq!(
            t.effects,
            vec![
                ViewEffect::SetScrollEnabled(true),
                ViewEffect::RemoveNoAccountOverlay
            ]
        );
        assert!(t.refresh);
        assert_eq!(machine.state(), None);
    }

    #[test]
    fn test_reactivation_keeps_state() {
        let mut machine = PresentationStateMachine::new();
        machine.on_activation(true, &LoadState::Uninitialized);
        machine.on_sections(&sections(2));
        let t = machine.on_activation(true, &LoadState::Loaded(sections(2)));
        assert_eq!(
            t,
            Transition {
                state: None,
                effects: vec![],
                refresh: true,
            }
        );
        assert_eq!(machine.state(), Some(&PanelState::Populated(sections(2))));
    }
}
