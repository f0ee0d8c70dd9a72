//! User Preferences Value Object
//!
//! Stored as a JSON document. Every field is optional; updates merge
//! field by field.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    Auto,
}

impl FromStr for Theme {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            "auto" => Ok(Theme::Auto),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Language {
    #[serde(rename = "pt-BR")]
    PtBr,
    #[serde(rename = "en-US")]
    EnUs,
    #[serde(rename = "es")]
    Es,
}

impl FromStr for Language {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pt-BR" => Ok(Language::PtBr),
            "en-US" => Ok(Language::EnUs),
            "es" => Ok(Language::Es),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<Theme>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<Language>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_format: Option<String>,
}

impl Preferences {
    /// Apply the fields present in `patch`, keeping the rest.
    pub fn merge(&mut self, patch: Preferences) {
        if patch.theme.is_some() {
            self.theme = patch.theme;
        }
        if patch.language.is_some() {
            self.language = patch.language;
        }
        if patch.notifications.is_some() {
            self.notifications = patch.notifications;
        }
        if patch.timezone.is_some() {
            self.timezone = patch.timezone;
        }
        if patch.date_format.is_some() {
            self.date_format = patch.date_format;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_keeps_absent_fields() {
        let mut prefs = Preferences {
            theme: Some(Theme::Dark),
            language: Some(Language::PtBr),
            notifications: Some(true),
            timezone: Some("America/Sao_Paulo".into()),
            date_format: None,
        };

        prefs.merge(Preferences {
            language: Some(Language::EnUs),
            date_format: Some("DD/MM/YYYY".into()),
            ..Default::default()
        });

        assert_eq!(prefs.theme, Some(Theme::Dark));
        assert_eq!(prefs.language, Some(Language::EnUs));
        assert_eq!(prefs.notifications, Some(true));
        assert_eq!(prefs.timezone.as_deref(), Some("America/Sao_Paulo"));
        assert_eq!(prefs.date_format.as_deref(), Some("DD/MM/YYYY"));
    }

    #[test]
    fn test_wire_format() {
        let prefs = Preferences {
            theme: Some(Theme::Auto),
            language: Some(Language::PtBr),
            date_format: Some("YYYY-MM-DD".into()),
            ..Default::default()
        };

        let json = serde_json::to_value(&prefs).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "theme": "auto", "language": "pt-BR", "dateFormat": "YYYY-MM-DD" })
        );

        let back: Preferences = serde_json::from_value(json).unwrap();
        assert_eq!(back, prefs);
    }

    #[test]
    fn test_parse_enums() {
        assert_eq!("light".parse::<Theme>(), Ok(Theme::Light));
        assert!("sepia".parse::<Theme>().is_err());
        assert_eq!("es".parse::<Language>(), Ok(Language::Es));
        assert!("fr".parse::<Language>().is_err());
    }
}
