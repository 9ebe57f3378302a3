use std::fmt;

/// The fixed cast of heroes a scene can be generated for.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Character {
    #[default]
    Popcorn,
    Soda,
    Pizza,
    Hotdog,
}

pub const CHARACTERS: [Character; 4] = [
    Character::Popcorn,
    Character::Soda,
    Character::Pizza,
    Character::Hotdog,
];

impl Character {
    pub fn parse(value: &str) -> Result<Self, CharacterError> {
        let trimmed = value.trim();
        CHARACTERS
            .iter()
            .copied()
            .find(|character| character.slug().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| CharacterError::Unknown(trimmed.to_string()))
    }

    pub fn slug(self) -> &'static str {
        match self {
            Character::Popcorn => "popcorn",
            Character::Soda => "soda",
            Character::Pizza => "pizza",
            Character::Hotdog => "hotdog",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Character::Popcorn => "Popcorn",
            Character::Soda => "Soda",
            Character::Pizza => "Pizza",
            Character::Hotdog => "Hot Dog",
        }
    }

    pub fn badge(self) -> &'static str {
        match self {
            Character::Popcorn => "🍿",
            Character::Soda => "🥤",
            Character::Pizza => "🍕",
            Character::Hotdog => "🌭",
        }
    }

    /// Prompt sent to the image model for this hero.
    pub fn scene_prompt(self) -> String {
        let hero = match self {
            Character::Popcorn => {
                "a heroic red-and-white striped popcorn box with determined eyes, \
                 a flowing cape and kernels bursting from the top like a crown"
            }
            Character::Soda => {
                "a fearless soda cup hero with a bendy straw antenna, \
                 fizzing bubbles trailing behind like a jetpack"
            }
            Character::Pizza => {
                "a brave pizza slice warrior with melting cheese armor \
                 and a pepperoni shield"
            }
            Character::Hotdog => {
                "a daring hot dog knight in a toasted bun cloak, \
                 wielding a mustard-yellow lightning sword"
            }
        };
        format!(
            "Cinematic video game key art of {hero}, standing in an epic movie theater \
             battlefield at night, dramatic rim lighting, volumetric god rays, \
             sparks and confetti in the air, ultra detailed, 16:9 widescreen composition"
        )
    }
}

impl fmt::Display for Character {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl std::str::FromStr for Character {
    type Err = CharacterError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::parse(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CharacterError {
    #[error("unknown character '{0}'")]
    Unknown(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_known_slugs_case_insensitively() {
        assert_eq!(Character::parse("popcorn"), Ok(Character::Popcorn));
        assert_eq!(Character::parse(" Soda "), Ok(Character::Soda));
        assert_eq!(Character::parse("PIZZA"), Ok(Character::Pizza));
        assert_eq!("hotdog".parse::<Character>(), Ok(Character::Hotdog));
    }

    #[test]
    fn parse_rejects_unknown_slug() {
        assert_eq!(
            Character::parse("nachos"),
            Err(CharacterError::Unknown("nachos".to_string()))
        );
    }

    #[test]
    fn slugs_are_unique() {
        for (idx, a) in CHARACTERS.iter().enumerate() {
            for b in &CHARACTERS[idx + 1..] {
                assert_ne!(a.slug(), b.slug());
            }
        }
    }

    #[test]
    fn prompt_mentions_the_hero() {
        assert!(Character::Soda.scene_prompt().contains("soda cup"));
        assert!(Character::Hotdog.scene_prompt().contains("hot dog"));
    }
}
