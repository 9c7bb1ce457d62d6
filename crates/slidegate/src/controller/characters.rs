use crate::parser::{CharacterOption, RoleMeta};

#[derive(Debug, Clone)]
struct Role {
    name: String,
    options: Vec<CharacterOption>,
    chosen: usize,
}

/// The card shown on a characters slide.
#[derive(Debug, Clone, PartialEq)]
pub struct Card<'a> {
    pub role: &'a str,
    pub name: String,
    pub image: Option<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Popup {
    role: usize,
    focused: usize,
}

/// Per-role character choices plus the selection popup. Choices are held in
/// memory only.
#[derive(Debug, Clone, Default)]
pub struct CharacterPicker {
    roles: Vec<Role>,
    popup: Option<Popup>,
}

impl CharacterPicker {
    pub fn new(roles: &[RoleMeta]) -> Self {
        Self {
            roles: roles
                .iter()
                .map(|r| Role {
                    name: r.role.clone(),
                    options: r.options.clone(),
                    chosen: 0,
                })
                .collect(),
            popup: None,
        }
    }

    pub fn role_count(&self) -> usize {
        self.roles.len()
    }

    pub fn cards(&self) -> Vec<Card<'_>> {
        self.roles
            .iter()
            .map(|r| match r.options.get(r.chosen) {
                Some(option) => Card {
                    role: &r.name,
                    name: option.name.clone(),
                    image: Some(&option.image),
                },
                None => Card {
                    role: &r.name,
                    name: capitalize(&r.name),
                    image: None,
                },
            })
            .collect()
    }

    pub fn is_open(&self) -> bool {
        self.popup.is_some()
    }

    /// Open the popup for the card at `index`, focusing its first option.
    pub fn open(&mut self, index: usize) -> bool {
        match self.roles.get(index) {
            Some(role) if !role.options.is_empty() => {
                self.popup = Some(Popup {
                    role: index,
                    focused: 0,
                });
                true
            }
            Some(role) => {
                tracing::warn!(role = %role.name, "no options found for role");
                false
            }
            None => {
                tracing::warn!(index, "character card not found");
                false
            }
        }
    }

    pub fn close(&mut self) {
        self.popup = None;
    }

    pub fn title(&self) -> Option<String> {
        let popup = self.popup?;
        let role = &self.roles[popup.role];
        Some(format!("Select {} Character", capitalize(&role.name)))
    }

    pub fn options(&self) -> &[CharacterOption] {
        self.popup
            .map(|p| self.roles[p.role].options.as_slice())
            .unwrap_or_default()
    }

    pub fn focused(&self) -> Option<usize> {
        self.popup.map(|p| p.focused)
    }

    pub fn focus_next(&mut self) {
        let count = self.options().len();
        if let Some(popup) = self.popup.as_mut() {
            popup.focused = (popup.focused + 1) % count.max(1);
        }
    }

    pub fn focus_previous(&mut self) {
        let count = self.options().len();
        if let Some(popup) = self.popup.as_mut() {
            popup.focused = (popup.focused + count.max(1) - 1) % count.max(1);
        }
    }

    pub fn choose_focused(&mut self) -> bool {
        match self.popup {
            Some(popup) => self.choose(popup.focused),
            None => false,
        }
    }

    /// Choose option `index` for the open role, update its card, close the popup.
    pub fn choose(&mut self, index: usize) -> bool {
        let Some(popup) = self.popup else {
            return false;
        };
        let role = &mut self.roles[popup.role];
        if index >= role.options.len() {
            tracing::warn!(role = %role.name, index, "character option not found");
            return false;
        }
        role.chosen = index;
        tracing::debug!(role = %role.name, name = %role.options[index].name, "character chosen");
        self.popup = None;
        true
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn option(name: &str) -> CharacterOption {
        CharacterOption {
            name: name.to_string(),
            image: format!("img/{}.png", name.to_lowercase()),
        }
    }

    fn picker() -> CharacterPicker {
        CharacterPicker::new(&[
            RoleMeta {
                role: "hero".to_string(),
                options: vec![option("Aria"), option("Bram"), option("Cleo")],
            },
            RoleMeta {
                role: "villain".to_string(),
                options: vec![],
            },
        ])
    }

    #[test]
    fn test_default_card_is_first_option() {
        let picker = picker();
        let cards = picker.cards();
        assert_eq!(cards[0].name, "Aria");
        assert_eq!(cards[0].image, Some("img/aria.png"));
        assert_eq!(cards[1].name, "Villain");
        assert_eq!(cards[1].image, None);
    }

    #[test]
    fn test_open_and_choose_updates_card() {
        let mut picker = picker();
        assert!(picker.open(0));
        assert_eq!(picker.title().as_deref(), Some("Select Hero Character"));
        assert_eq!(picker.focused(), Some(0));

        assert!(picker.choose(2));
        assert!(!picker.is_open());
        assert_eq!(picker.cards()[0].name, "Cleo");
    }

    #[test]
    fn test_keyboard_focus_wraps() {
        let mut picker = picker();
        picker.open(0);
        picker.focus_previous();
        assert_eq!(picker.focused(), Some(2));
        picker.focus_next();
        picker.focus_next();
        assert_eq!(picker.focused(), Some(1));
        assert!(picker.choose_focused());
        assert_eq!(picker.cards()[0].name, "Bram");
    }

    #[test]
    fn test_role_without_options_does_not_open() {
        let mut picker = picker();
        assert!(!picker.open(1));
        assert!(!picker.open(7));
        assert!(!picker.is_open());
    }

    #[test]
    fn test_close_keeps_choice() {
        let mut picker = picker();
        picker.open(0);
        picker.focus_next();
        picker.close();
        assert_eq!(picker.cards()[0].name, "Aria");
        assert!(!picker.choose_focused());
    }
}
