//! Assistant mood tags
//!
//! The service tags every reply with an `expression` label describing the
//! assistant's current mood. The client only knows a closed set of six
//! tags; anything else the service sends is shown as [`Mood::Neutral`].

use colored::Colorize;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Mood reported by the assistant alongside each reply
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE", from = "String")]
pub enum Mood {
    /// Mirroring and validating the user's feelings
    Empathetic,
    /// The user appears under pressure
    Stressed,
    /// The user appears exhausted or low on energy
    Tired,
    /// Looking back over what the user has shared
    Reflective,
    /// Safety-first response to a risk signal
    Safety,
    /// Default resting state
    #[default]
    Neutral,
}

impl Mood {
    /// Every known mood, in display order
    pub const ALL: [Mood; 6] = [
        Mood::Empathetic,
        Mood::Stressed,
        Mood::Tired,
        Mood::Reflective,
        Mood::Safety,
        Mood::Neutral,
    ];

    /// Map a wire tag to a mood, falling back to [`Mood::Neutral`]
    ///
    /// Surrounding whitespace and ASCII case are ignored.
    ///
    /// # Examples
    ///
    /// ```
    /// use attrangi::mood::Mood;
    ///
    /// assert_eq!(Mood::from_tag("TIRED"), Mood::Tired);
    /// assert_eq!(Mood::from_tag("confused"), Mood::Neutral);
    /// ```
    pub fn from_tag(tag: &str) -> Self {
        let tag = tag.trim();
        Self::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(tag))
            .unwrap_or_else(|| {
                tracing::debug!(tag = %tag, "Unrecognized mood tag, using NEUTRAL");
                Mood::Neutral
            })
    }

    /// Map an optional wire tag, treating absence as [`Mood::Neutral`]
    pub fn from_optional_tag(tag: Option<&str>) -> Self {
        tag.map(Self::from_tag).unwrap_or_default()
    }

    /// Wire representation of this mood
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empathetic => "EMPATHETIC",
            Self::Stressed => "STRESSED",
            Self::Tired => "TIRED",
            Self::Reflective => "REFLECTIVE",
            Self::Safety => "SAFETY",
            Self::Neutral => "NEUTRAL",
        }
    }

    /// Short human description used by `/status`
    pub fn description(&self) -> &'static str {
        match self {
            Self::Empathetic => "Listening closely",
            Self::Stressed => "Noticing some pressure",
            Self::Tired => "Taking it slow",
            Self::Reflective => "Thinking things over",
            Self::Safety => "Checking in on your safety",
            Self::Neutral => "Ready to talk",
        }
    }

    /// Colored badge for terminal output, e.g. `[TIRED MODE]`
    pub fn colored_tag(&self) -> String {
        let label = format!("{} MODE", self.as_str());
        let painted = match self {
            Self::Empathetic => label.magenta(),
            Self::Stressed => label.yellow(),
            Self::Tired => label.blue(),
            Self::Reflective => label.cyan(),
            Self::Safety => label.red().bold(),
            Self::Neutral => label.white(),
        };
        format!("[{}]", painted)
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<String> for Mood {
    fn from(tag: String) -> Self {
        Self::from_tag(&tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_tag_known_values() {
        assert_eq!(Mood::from_tag("EMPATHETIC"), Mood::Empathetic);
        assert_eq!(Mood::from_tag("STRESSED"), Mood::Stressed);
        assert_eq!(Mood::from_tag("TIRED"), Mood::Tired);
        assert_eq!(Mood::from_tag("REFLECTIVE"), Mood::Reflective);
        assert_eq!(Mood::from_tag("SAFETY"), Mood::Safety);
        assert_eq!(Mood::from_tag("NEUTRAL"), Mood::Neutral);
    }

    #[test]
    fn test_from_tag_ignores_case_and_whitespace() {
        assert_eq!(Mood::from_tag("  tired\n"), Mood::Tired);
        assert_eq!(Mood::from_tag("Reflective"), Mood::Reflective);
    }

    #[test]
    fn test_from_tag_unknown_falls_back_to_neutral() {
        assert_eq!(Mood::from_tag("HAPPY"), Mood::Neutral);
        assert_eq!(Mood::from_tag(""), Mood::Neutral);
    }

    #[test]
    fn test_from_optional_tag_absent_is_neutral() {
        assert_eq!(Mood::from_optional_tag(None), Mood::Neutral);
        assert_eq!(Mood::from_optional_tag(Some("SAFETY")), Mood::Safety);
    }

    #[test]
    fn test_every_mood_round_trips_through_its_tag() {
        for mood in Mood::ALL {
            assert_eq!(Mood::from_tag(mood.as_str()), mood);
        }
    }

    #[test]
    fn test_default_is_neutral() {
        assert_eq!(Mood::default(), Mood::Neutral);
    }

    #[test]
    fn test_display_uses_wire_tag() {
        assert_eq!(Mood::Stressed.to_string(), "STRESSED");
    }

    #[test]
    fn test_deserialize_unknown_tag_is_neutral() {
        let mood: Mood = serde_json::from_str("\"ECSTATIC\"").unwrap();
        assert_eq!(mood, Mood::Neutral);
        let mood: Mood = serde_json::from_str("\"EMPATHETIC\"").unwrap();
        assert_eq!(mood, Mood::Empathetic);
    }

    #[test]
    fn test_serialize_uses_wire_tag() {
        assert_eq!(serde_json::to_string(&Mood::Tired).unwrap(), "\"TIRED\"");
    }

    #[test]
    fn test_colored_tag_contains_label() {
        let tag = Mood::Tired.colored_tag();
        assert!(tag.contains("TIRED MODE"));
        assert!(tag.starts_with('['));
        assert!(tag.ends_with(']'));
    }
}
