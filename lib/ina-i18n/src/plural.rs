// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright © 2025 Jaxydog
//
// This file is part of 1N4.
//
// 1N4 is free software: you can redistribute it and/or modify it under the terms of the GNU Affero General Public
// License as published by the Free Software Foundation, either version 3 of the License, or (at your option) any later
// version.
//
// 1N4 is distributed in the hope that it will be useful, but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License along with 1N4. If not, see
// <https://www.gnu.org/licenses/>.

//! Resolves plural categories for `(locale, count)` pairs via CLDR plural rules.

use std::collections::HashMap;
use std::fmt::Display;
use std::sync::{Arc, LazyLock, Mutex};

use intl_pluralrules::operands::PluralOperands;
use intl_pluralrules::{PluralCategory as CldrCategory, PluralRuleType, PluralRules};

use crate::locale::Locale;

/// A plural category tag selected from `(locale, count)`.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum PluralCategory {
    /// CLDR `zero`.
    Zero,
    /// CLDR `one`.
    One,
    /// CLDR `two`.
    Two,
    /// CLDR `few`.
    Few,
    /// CLDR `many`.
    Many,
    /// CLDR `other`, the universal fallback.
    Other,
}

impl PluralCategory {
    /// Returns the display name for this category (e.g. `few`).
    #[must_use]
    pub const fn suffix(self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::One => "one",
            Self::Two => "two",
            Self::Few => "few",
            Self::Many => "many",
            Self::Other => "other",
        }
    }

    /// Returns the numeric CLDR category index (`zero`=0 … `other`=5) used as a catalog key suffix.
    ///
    /// The data model stores plural variants under `<key>_<index>` (e.g. `plural-dog_0` … `plural-dog_5`), not
    /// under the category's name — so this, not [`PluralCategory::suffix`], is what [`crate::catalog::Catalog`]
    /// consults.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::Zero => 0,
            Self::One => 1,
            Self::Two => 2,
            Self::Few => 3,
            Self::Many => 4,
            Self::Other => 5,
        }
    }
}

impl From<CldrCategory> for PluralCategory {
    fn from(value: CldrCategory) -> Self {
        match value {
            CldrCategory::ZERO => Self::Zero,
            CldrCategory::ONE => Self::One,
            CldrCategory::TWO => Self::Two,
            CldrCategory::FEW => Self::Few,
            CldrCategory::MANY => Self::Many,
            CldrCategory::OTHER => Self::Other,
        }
    }
}

impl Display for PluralCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.suffix())
    }
}

/// A process-wide cache of constructed [`PluralRules`], keyed by locale.
///
/// Construction parses CLDR rule data, so this is worth reusing across calls; mirrors the
/// `LazyLock<RwLock<HashMap<..>>>`-backed in-memory store pattern used elsewhere in this workspace.
static RULES: LazyLock<Mutex<HashMap<Locale, Arc<PluralRules>>>> = LazyLock::new(|| Mutex::new(HashMap::new()));

/// Resolves the plural category for `count` under `locale`.
///
/// Falls back to [`PluralCategory::Other`] if the locale (nor its bare-language form) is recognized by the
/// underlying CLDR rule data — this keeps plural resolution from ever failing the wider translation.
#[must_use]
pub fn resolve(locale: Locale, count: f64) -> PluralCategory {
    let Some(rules) = rules_for(locale).or_else(|| rules_for(locale.base_language())) else {
        return PluralCategory::Other;
    };

    // `PluralOperands` is built from the number's decimal string form (its `n`/`i`/`v`/`w`/`f`/`t` operands are
    // defined in terms of the visible digits), not directly from a float.
    let Ok(operands) = PluralOperands::try_from(count.to_string().as_str()) else {
        return PluralCategory::Other;
    };

    rules.select(operands).map_or(PluralCategory::Other, PluralCategory::from)
}

/// Returns the cached (or newly constructed) [`PluralRules`] for `locale`, if CLDR has cardinal rule data for it.
fn rules_for(locale: Locale) -> Option<Arc<PluralRules>> {
    #[expect(clippy::significant_drop_tightening, reason = "the lock only guards a short map lookup/insert")]
    let mut cache = RULES.lock().unwrap_or_else(std::sync::PoisonError::into_inner);

    if let Some(rules) = cache.get(&locale) {
        return Some(Arc::clone(rules));
    }

    let lang_id: unic_langid::LanguageIdentifier = locale.to_string().parse().ok()?;
    let rules = Arc::new(PluralRules::create(lang_id, PluralRuleType::CARDINAL).ok()?);

    cache.insert(locale, Arc::clone(&rules));

    Some(rules)
}

#[cfg(test)]
mod tests {
    use super::{PluralCategory, resolve};
    use crate::locale::Locale;

    #[test]
    fn english_uses_one_other() {
        let en: Locale = "en".parse().unwrap();

        assert_eq!(resolve(en, 1.0), PluralCategory::One);
        assert_eq!(resolve(en, 3.0), PluralCategory::Other);
    }

    #[test]
    fn arabic_has_a_few_category() {
        let ar: Locale = "ar".parse().unwrap();

        assert_eq!(resolve(ar, 3.0), PluralCategory::Few);
    }

    #[test]
    fn unknown_locale_falls_back_to_other() {
        let zz: Locale = "zz".parse().unwrap();

        assert_eq!(resolve(zz, 3.0), PluralCategory::Other);
    }

    #[test]
    fn category_index_matches_data_model_order() {
        assert_eq!(PluralCategory::Zero.index(), 0);
        assert_eq!(PluralCategory::One.index(), 1);
        assert_eq!(PluralCategory::Two.index(), 2);
        assert_eq!(PluralCategory::Few.index(), 3);
        assert_eq!(PluralCategory::Many.index(), 4);
        assert_eq!(PluralCategory::Other.index(), 5);
    }
}
