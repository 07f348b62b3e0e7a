//! Random fortune material mixed into the daily instruction.

use crate::{Error, Result};
use rand::prelude::*;
use serde::Deserialize;

const EMBEDDED: &str = include_str!("../data/fortunes.json");

/// Candidate lines for each fortune slot.
#[derive(Debug, Clone, Deserialize)]
pub struct Fortunes {
    luck_good: Vec<String>,
    luck_bad: Vec<String>,
    cat_do: Vec<String>,
    cat_dont: Vec<String>,
    philosophy: Vec<String>,
}

/// One line per slot, chosen for today's run.
#[derive(Debug, Clone, PartialEq)]
pub struct FortunePicks {
    pub luck_good: String,
    pub luck_bad: String,
    pub cat_do: String,
    pub cat_dont: String,
    pub philosophy: String,
}

impl Fortunes {
    /// Lists compiled into the binary.
    pub fn embedded() -> Result<Self> {
        Self::from_json(EMBEDDED)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fortunes: Self = serde_json::from_str(json)?;
        fortunes.validate()?;
        Ok(fortunes)
    }

    fn validate(&self) -> Result<()> {
        let slots = [
            ("luck_good", &self.luck_good),
            ("luck_bad", &self.luck_bad),
            ("cat_do", &self.cat_do),
            ("cat_dont", &self.cat_dont),
            ("philosophy", &self.philosophy),
        ];
        for (name, list) in slots {
            if list.is_empty() {
                return Err(Error::Invariant(format!("fortune list '{}' is empty", name)));
            }
        }
        Ok(())
    }

    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> FortunePicks {
        // Lists are validated non-empty on construction.
        let choose = |list: &[String], rng: &mut R| list.choose(rng).cloned().unwrap_or_default();

        FortunePicks {
            luck_good: choose(&self.luck_good, &mut *rng),
            luck_bad: choose(&self.luck_bad, &mut *rng),
            cat_do: choose(&self.cat_do, &mut *rng),
            cat_dont: choose(&self.cat_dont, &mut *rng),
            philosophy: choose(&self.philosophy, &mut *rng),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;

    #[test]
    fn test_embedded_fortunes_load() {
        let fortunes = Fortunes::embedded().unwrap();
        let picks = fortunes.pick(&mut StdRng::seed_from_u64(7));
        assert!(fortunes.luck_good.contains(&picks.luck_good));
        assert!(fortunes.philosophy.contains(&picks.philosophy));
    }

    #[test]
    fn test_same_seed_same_picks() {
        let fortunes = Fortunes::embedded().unwrap();
        let a = fortunes.pick(&mut StdRng::seed_from_u64(42));
        let b = fortunes.pick(&mut StdRng::seed_from_u64(42));
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_list_is_rejected() {
        let json = r#"{"luck_good": ["a"], "luck_bad": [], "cat_do": ["c"], "cat_dont": ["d"], "philosophy": ["e"]}"#;
        let err = Fortunes::from_json(json).unwrap_err();
        assert!(err.to_string().contains("luck_bad"));
    }
}
