use syn::LitStr;

/// The key projection of `#[reflect(rename_all = "...")]`.
///
/// Identifiers are split into words at `_` and at lower-to-upper case
/// boundaries, so both `max_players` and `MaxPlayers` give the words
/// `max` and `players`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum RenameRule {
    /// `max-players`, the default of struct fields.
    KebabCase,
    /// `max_players`
    SnakeCase,
    /// `maxPlayers`
    CamelCase,
    /// `MaxPlayers`
    PascalCase,
    /// `MAX_PLAYERS`
    ScreamingSnakeCase,
    /// `MAX-PLAYERS`
    ScreamingKebabCase,
    /// `maxplayers`
    LowerCase,
    /// `MAXPLAYERS`
    UpperCase,
}

const RULES: &[(&str, RenameRule)] = &[
    ("kebab-case", RenameRule::KebabCase),
    ("snake_case", RenameRule::SnakeCase),
    ("camelCase", RenameRule::CamelCase),
    ("PascalCase", RenameRule::PascalCase),
    ("SCREAMING_SNAKE_CASE", RenameRule::ScreamingSnakeCase),
    ("SCREAMING-KEBAB-CASE", RenameRule::ScreamingKebabCase),
    ("lowercase", RenameRule::LowerCase),
    ("UPPERCASE", RenameRule::UpperCase),
];

impl RenameRule {
    pub fn from_lit(lit: &LitStr) -> syn::Result<Self> {
        let value = lit.value();
        RULES
            .iter()
            .find(|(name, _)| *name == value)
            .map(|(_, rule)| *rule)
            .ok_or_else(|| {
                let names: Vec<_> = RULES.iter().map(|(name, _)| *name).collect();
                syn::Error::new(
                    lit.span(),
                    format!("unknown rename rule, expected one of: {}", names.join(", ")),
                )
            })
    }

    pub fn apply(self, ident: &str) -> String {
        let words = split_words(ident);
        match self {
            Self::KebabCase => join(&words, "-", str::to_lowercase),
            Self::SnakeCase => join(&words, "_", str::to_lowercase),
            Self::ScreamingSnakeCase => join(&words, "_", str::to_uppercase),
            Self::ScreamingKebabCase => join(&words, "-", str::to_uppercase),
            Self::LowerCase => join(&words, "", str::to_lowercase),
            Self::UpperCase => join(&words, "", str::to_uppercase),
            Self::PascalCase => join(&words, "", capitalize),
            Self::CamelCase => {
                let mut out = String::new();
                for (i, word) in words.iter().enumerate() {
                    if i == 0 {
                        out.push_str(&word.to_lowercase());
                    } else {
                        out.push_str(&capitalize(word));
                    }
                }
                out
            }
        }
    }
}

fn split_words(ident: &str) -> Vec<&str> {
    let mut words = Vec::new();
    for part in ident.split('_').filter(|p| !p.is_empty()) {
        let mut start = 0;
        let mut prev_lower = false;
        for (i, c) in part.char_indices() {
            if c.is_uppercase() && prev_lower {
                words.push(&part[start..i]);
                start = i;
            }
            prev_lower = c.is_lowercase() || c.is_ascii_digit();
        }
        words.push(&part[start..]);
    }
    words
}

fn join(words: &[&str], sep: &str, case: fn(&str) -> String) -> String {
    words.iter().map(|w| case(w)).collect::<Vec<_>>().join(sep)
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::RenameRule;

    #[test]
    fn kebab_from_snake_and_pascal() {
        assert_eq!(RenameRule::KebabCase.apply("max_players"), "max-players");
        assert_eq!(RenameRule::KebabCase.apply("MaxPlayers"), "max-players");
        assert_eq!(RenameRule::KebabCase.apply("name"), "name");
        assert_eq!(RenameRule::KebabCase.apply("level2_boss"), "level2-boss");
    }

    #[test]
    fn other_rules() {
        assert_eq!(RenameRule::CamelCase.apply("max_players"), "maxPlayers");
        assert_eq!(RenameRule::PascalCase.apply("max_players"), "MaxPlayers");
        assert_eq!(RenameRule::SnakeCase.apply("MaxPlayers"), "max_players");
        assert_eq!(RenameRule::ScreamingSnakeCase.apply("max_players"), "MAX_PLAYERS");
        assert_eq!(RenameRule::LowerCase.apply("MaxPlayers"), "maxplayers");
    }
}
