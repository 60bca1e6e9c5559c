use std::fmt::Display;

/// The decoded value of a `setoption name UCI_Opponent value ...` command:
/// `<title> <elo | none> <computer | human> <name>`.
///
/// `name` is whatever display name the remote GUI sent. When the value
/// string doesn't match this shape at all, callers should fall back to the
/// literal string `UNKNOWN` rather than reject the option outright.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UCIOpponent {
    pub title: Option<String>,
    pub elo: Option<u32>,
    pub is_computer: bool,
    pub name: String,
}

impl UCIOpponent {
    /// The name shown when an opponent hasn't identified itself, or sent a
    /// `UCI_Opponent` value this parser can't make sense of.
    pub const UNKNOWN: &'static str = "UNKNOWN";

    pub fn parse(value: &str) -> Option<Self> {
        let mut parts = value.split_whitespace();

        let title = match parts.next()? {
            "none" => None,
            t => Some(t.to_string()),
        };
        let elo = match parts.next()? {
            "none" => None,
            e => Some(e.parse().ok()?),
        };
        let is_computer = match parts.next()? {
            "computer" => true,
            "human" => false,
            _ => return None,
        };

        let name = parts.collect::<Vec<_>>().join(" ");
        let name = if name.is_empty() {
            Self::UNKNOWN.to_string()
        } else {
            name
        };

        Some(Self {
            title,
            elo,
            is_computer,
            name,
        })
    }

    pub fn display_name(&self) -> &str {
        &self.name
    }
}

impl Display for UCIOpponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.title.as_deref().unwrap_or("none"),
            self.elo
                .map(|e| e.to_string())
                .unwrap_or_else(|| "none".to_string()),
            if self.is_computer { "computer" } else { "human" },
            self.name
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_full_value() {
        let opp = UCIOpponent::parse("GM 2800 human Magnus Carlsen").unwrap();
        assert_eq!(opp.title.as_deref(), Some("GM"));
        assert_eq!(opp.elo, Some(2800));
        assert!(!opp.is_computer);
        assert_eq!(opp.name, "Magnus Carlsen");
    }

    #[test]
    fn parses_none_fields() {
        let opp = UCIOpponent::parse("none none computer Fruit").unwrap();
        assert_eq!(opp.title, None);
        assert_eq!(opp.elo, None);
        assert!(opp.is_computer);
        assert_eq!(opp.name, "Fruit");
    }

    #[test]
    fn falls_back_to_unknown_name_when_name_missing() {
        let opp = UCIOpponent::parse("none none human").unwrap();
        assert_eq!(opp.name, UCIOpponent::UNKNOWN);
    }

    #[test]
    fn rejects_malformed_value() {
        assert!(UCIOpponent::parse("not a valid opponent string").is_none());
    }
}
