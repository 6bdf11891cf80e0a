//! Option catalog: the closed set of toolbelt options
//!
//! Icons, labels and kinds are exhaustive matches over [`OptionKey`], so a new
//! option cannot be added without giving it all three. Keys that arrive as
//! strings (from configuration or markup) go through [`OptionRef`], which is
//! where the `question-square` / `??` fallback lives.

use std::str::FromStr;

/// Icon shown for keys outside the catalog
pub const FALLBACK_ICON: &str = "question-square";
/// Label shown for keys outside the catalog
pub const FALLBACK_LABEL: &str = "??";

/// Colors cycled by the palette-rotating options
pub const DEFAULT_PALETTE: &[&str] = &[
    "white", "red", "orange", "yellow", "green", "blue", "violet", "indigo", "purple", "black",
];

/// Font sizes cycled by `size`
pub const SIZE_STEPS: &[&str] = &["1rem", "1.5rem", "2rem", "3rem"];

/// Background sizing cycled by `crop`
pub const CROP_MODES: &[&str] = &["cover", "contain"];

/// Filters cycled by `effect`
pub const EFFECTS: &[&str] = &["none", "grayscale(1)", "sepia(1)", "blur(2px)", "invert(1)"];

/// Every option the toolbelt knows how to render
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OptionKey {
    TextColor,
    BgColor,
    EditText,
    Size,
    BorderColor,
    Crop,
    Effect,
    ImageReplace,
}

/// How an option is presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    /// Click runs the handler once; no state of its own
    SimpleAction,
    /// Live input bound to the region, seeded lazily on first show
    RichControl,
}

impl OptionKey {
    pub const ALL: [OptionKey; 8] = [
        OptionKey::TextColor,
        OptionKey::BgColor,
        OptionKey::EditText,
        OptionKey::Size,
        OptionKey::BorderColor,
        OptionKey::Crop,
        OptionKey::Effect,
        OptionKey::ImageReplace,
    ];

    /// Wire name used in markup and configuration
    pub fn as_str(self) -> &'static str {
        match self {
            OptionKey::TextColor => "textColor",
            OptionKey::BgColor => "bgColor",
            OptionKey::EditText => "editText",
            OptionKey::Size => "size",
            OptionKey::BorderColor => "borderColor",
            OptionKey::Crop => "crop",
            OptionKey::Effect => "effect",
            OptionKey::ImageReplace => "imageReplace",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            OptionKey::TextColor => "palette",
            OptionKey::BgColor => "paint-bucket",
            OptionKey::EditText => "input-cursor-text",
            OptionKey::Size => "arrows-angle-expand",
            OptionKey::BorderColor => "border-width",
            OptionKey::Crop => "crop",
            OptionKey::Effect => "magic",
            OptionKey::ImageReplace => "upload",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            OptionKey::TextColor => "Text",
            OptionKey::BgColor => "Bg",
            OptionKey::EditText => "Edit",
            OptionKey::Size => "Sizing",
            OptionKey::BorderColor => "Border",
            OptionKey::Crop => "Crop",
            OptionKey::Effect => "Magic",
            OptionKey::ImageReplace => "Change",
        }
    }

    pub fn kind(self) -> OptionKind {
        match self {
            OptionKey::EditText | OptionKey::BorderColor => OptionKind::RichControl,
            OptionKey::TextColor
            | OptionKey::BgColor
            | OptionKey::Size
            | OptionKey::Crop
            | OptionKey::Effect
            | OptionKey::ImageReplace => OptionKind::SimpleAction,
        }
    }
}

impl std::fmt::Display for OptionKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OptionKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionKey::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| format!("unknown option key: {}", s))
    }
}

/// An option key as it appears in a toolbelt: either catalogued or not
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OptionRef {
    Known(OptionKey),
    Unknown(String),
}

impl OptionRef {
    pub fn parse(raw: &str) -> Self {
        match raw.parse() {
            Ok(key) => OptionRef::Known(key),
            Err(_) => OptionRef::Unknown(raw.to_string()),
        }
    }

    pub fn key(&self) -> Option<OptionKey> {
        match self {
            OptionRef::Known(key) => Some(*key),
            OptionRef::Unknown(_) => None,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OptionRef::Known(key) => key.as_str(),
            OptionRef::Unknown(raw) => raw,
        }
    }

    pub fn icon(&self) -> &'static str {
        self.key().map_or(FALLBACK_ICON, OptionKey::icon)
    }

    pub fn label(&self) -> &'static str {
        self.key().map_or(FALLBACK_LABEL, OptionKey::label)
    }

    pub fn kind(&self) -> OptionKind {
        self.key().map_or(OptionKind::SimpleAction, OptionKey::kind)
    }
}

impl From<OptionKey> for OptionRef {
    fn from(key: OptionKey) -> Self {
        OptionRef::Known(key)
    }
}

impl std::fmt::Display for OptionRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Icon/label/kind triple for one option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OptionDescriptor {
    pub option: OptionRef,
    pub icon: &'static str,
    pub label: &'static str,
    pub kind: OptionKind,
}

/// Describe any option, falling back for keys outside the catalog
pub fn describe(option: &OptionRef) -> OptionDescriptor {
    OptionDescriptor {
        option: option.clone(),
        icon: option.icon(),
        label: option.label(),
        kind: option.kind(),
    }
}

/// Describe a raw key string
pub fn describe_str(raw: &str) -> OptionDescriptor {
    describe(&OptionRef::parse(raw))
}

// ============================================================================
// Rotation state
// ============================================================================

/// Which cycling sequence a handler advances
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rotor {
    TextColor,
    BgColor,
    Size,
    Crop,
    Effect,
    Image,
}

impl Rotor {
    const COUNT: usize = 6;

    fn index(self) -> usize {
        match self {
            Rotor::TextColor => 0,
            Rotor::BgColor => 1,
            Rotor::Size => 2,
            Rotor::Crop => 3,
            Rotor::Effect => 4,
            Rotor::Image => 5,
        }
    }
}

/// Position counters for the cycling options
///
/// Owned by one composer; two composers never share counters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RotationState {
    positions: [usize; Rotor::COUNT],
}

impl RotationState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current position of a rotor
    pub fn position(&self, rotor: Rotor) -> usize {
        self.positions[rotor.index()]
    }

    /// Take the current position and advance modulo `len`
    ///
    /// Returns `None` for an empty sequence and leaves the counter alone.
    pub fn advance(&mut self, rotor: Rotor, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        let slot = &mut self.positions[rotor.index()];
        let current = *slot % len;
        *slot = (current + 1) % len;
        Some(current)
    }

    /// Pick the next entry of `items`, advancing the rotor
    pub fn next_of<'a, S: AsRef<str>>(&mut self, rotor: Rotor, items: &'a [S]) -> Option<&'a str> {
        self.advance(rotor, items.len())
            .map(|index| items[index].as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_key_round_trips_through_its_wire_name() {
        for key in OptionKey::ALL {
            assert_eq!(key.as_str().parse::<OptionKey>(), Ok(key));
        }
    }

    #[test]
    fn test_unknown_key_falls_back() {
        let descriptor = describe_str("sparkle");
        assert_eq!(descriptor.icon, "question-square");
        assert_eq!(descriptor.label, "??");
        assert_eq!(descriptor.option, OptionRef::Unknown("sparkle".to_string()));
    }

    #[test]
    fn test_known_key_descriptor() {
        let descriptor = describe_str("crop");
        assert_eq!(descriptor.icon, "crop");
        assert_eq!(descriptor.label, "Crop");
        assert_eq!(descriptor.kind, OptionKind::SimpleAction);
    }

    #[test]
    fn test_rich_controls() {
        assert_eq!(OptionKey::EditText.kind(), OptionKind::RichControl);
        assert_eq!(OptionKey::BorderColor.kind(), OptionKind::RichControl);
    }

    #[test]
    fn test_rotation_wraps_modulo_length() {
        let mut rotation = RotationState::new();
        let seen: Vec<usize> = (0..5)
            .filter_map(|_| rotation.advance(Rotor::Crop, 2))
            .collect();
        assert_eq!(seen, vec![0, 1, 0, 1, 0]);
    }

    #[test]
    fn test_rotors_are_independent() {
        let mut rotation = RotationState::new();
        rotation.advance(Rotor::TextColor, 10);
        rotation.advance(Rotor::TextColor, 10);
        assert_eq!(rotation.position(Rotor::TextColor), 2);
        assert_eq!(rotation.position(Rotor::BgColor), 0);
    }

    #[test]
    fn test_rotation_empty_sequence() {
        let mut rotation = RotationState::new();
        let empty: [&str; 0] = [];
        assert_eq!(rotation.next_of(Rotor::Image, &empty), None);
        assert_eq!(rotation.position(Rotor::Image), 0);
    }
}
