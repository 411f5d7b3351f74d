//! Declarative keyword tables shared by tag, duration, time-of-day and
//! neighborhood inference.
//!
//! Every table is an ordered list of `(keywords, effect)` rules evaluated
//! against pre-lowercased text. Table order is significant wherever a caller
//! takes only the first firing rule.

use tpoi_core::TimeOfDay;

/// How a keyword is matched against lowercased text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Keyword {
    /// Plain substring match (`"art"` fires inside `"artist"`).
    Substring(&'static str),
    /// Standalone token: not preceded by a letter and not followed by a
    /// letter or digit. `"am"` fires in `"10am"` but not in `"camp"`.
    Word(&'static str),
}

use Keyword::{Substring, Word};

impl Keyword {
    #[must_use]
    pub fn matches(self, lower: &str) -> bool {
        match self {
            Substring(needle) => lower.contains(needle),
            Word(needle) => contains_word(lower, needle),
        }
    }
}

/// One row of a keyword table.
#[derive(Debug, Clone, Copy)]
pub struct KeywordRule<T: 'static> {
    pub keywords: &'static [Keyword],
    pub effect: T,
}

impl<T> KeywordRule<T> {
    /// `true` when any keyword of the rule occurs in `lower`.
    #[must_use]
    pub fn fires(&self, lower: &str) -> bool {
        self.keywords.iter().any(|k| k.matches(lower))
    }
}

/// Effect of the first rule that fires, in table order.
#[must_use]
pub fn first_effect<T: Copy>(rules: &[KeywordRule<T>], lower: &str) -> Option<T> {
    rules.iter().find(|r| r.fires(lower)).map(|r| r.effect)
}

/// Effects of every rule that fires, in table order.
#[must_use]
pub fn all_effects<T: Copy>(rules: &[KeywordRule<T>], lower: &str) -> Vec<T> {
    rules
        .iter()
        .filter(|r| r.fires(lower))
        .map(|r| r.effect)
        .collect()
}

fn contains_word(haystack: &str, needle: &str) -> bool {
    haystack.match_indices(needle).any(|(start, _)| {
        let before_ok = !haystack[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_alphabetic);
        let after_ok = !haystack[start + needle.len()..]
            .chars()
            .next()
            .is_some_and(char::is_alphanumeric);
        before_ok && after_ok
    })
}

// ---------------------------------------------------------------------------
// Tables
// ---------------------------------------------------------------------------

/// Category tags inferred from name + description when a page exposes no
/// tag markup. Every firing rule contributes its tag.
pub static CATEGORY_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        keywords: &[Substring("festival"), Substring("matsuri")],
        effect: "Festival",
    },
    KeywordRule {
        keywords: &[
            Substring("museum"),
            Substring("exhibition"),
            Substring("art"),
        ],
        effect: "Exhibition",
    },
    KeywordRule {
        keywords: &[
            Substring("temple"),
            Substring("shrine"),
            Substring("traditional"),
        ],
        effect: "Traditional",
    },
    KeywordRule {
        keywords: &[
            Substring("food"),
            Substring("market"),
            Substring("culinary"),
        ],
        effect: "Food",
    },
    KeywordRule {
        keywords: &[
            Substring("music"),
            Substring("concert"),
            Substring("performance"),
        ],
        effect: "Music",
    },
    KeywordRule {
        keywords: &[
            Substring("sakura"),
            Substring("cherry"),
            Substring("flower"),
        ],
        effect: "Seasonal",
    },
];

/// Situational interest tags layered on top of the category tags.
pub static SITUATIONAL_RULES: &[KeywordRule<&str>] = &[
    KeywordRule {
        keywords: &[Substring("family")],
        effect: "Family Friendly",
    },
    KeywordRule {
        keywords: &[
            Substring("night"),
            Substring("evening"),
            Substring("illumination"),
        ],
        effect: "Nightlife",
    },
    KeywordRule {
        keywords: &[Substring("free")],
        effect: "Free Entry",
    },
];

/// Typical visit length in minutes; first firing rule wins.
pub static DURATION_RULES: &[KeywordRule<u32>] = &[
    KeywordRule {
        keywords: &[Substring("festival"), Substring("matsuri")],
        effect: 180,
    },
    KeywordRule {
        keywords: &[Substring("exhibition"), Substring("museum")],
        effect: 90,
    },
    KeywordRule {
        keywords: &[
            Substring("concert"),
            Substring("performance"),
            Substring("show"),
        ],
        effect: 120,
    },
    KeywordRule {
        keywords: &[Substring("market"), Substring("fair")],
        effect: 60,
    },
    KeywordRule {
        keywords: &[Substring("ceremony"), Substring("ritual")],
        effect: 45,
    },
];

/// Best time of day in priority order: morning, afternoon, evening.
pub static TIME_OF_DAY_RULES: &[KeywordRule<TimeOfDay>] = &[
    KeywordRule {
        keywords: &[
            Substring("morning"),
            Word("am"),
            Word("a.m."),
            Substring("朝"),
            Substring("午前"),
        ],
        effect: TimeOfDay::Morning,
    },
    KeywordRule {
        keywords: &[
            Substring("afternoon"),
            Word("pm"),
            Word("p.m."),
            Substring("午後"),
            Substring("昼"),
        ],
        effect: TimeOfDay::Afternoon,
    },
    KeywordRule {
        keywords: &[
            Substring("evening"),
            Substring("night"),
            Substring("illumination"),
            Substring("夜"),
            Substring("夕方"),
        ],
        effect: TimeOfDay::Evening,
    },
];

/// Known neighborhoods and their canonical spelling.
///
/// Checked top to bottom; the first key contained in the location text wins,
/// so "Shibuya, near Harajuku" maps to Shibuya.
pub static NEIGHBORHOODS: &[KeywordRule<&str>] = &[
    KeywordRule {
        keywords: &[Substring("shibuya")],
        effect: "Shibuya",
    },
    KeywordRule {
        keywords: &[Substring("shinjuku")],
        effect: "Shinjuku",
    },
    KeywordRule {
        keywords: &[Substring("harajuku")],
        effect: "Harajuku",
    },
    KeywordRule {
        keywords: &[Substring("asakusa")],
        effect: "Asakusa",
    },
    KeywordRule {
        keywords: &[Substring("ginza")],
        effect: "Ginza",
    },
    KeywordRule {
        keywords: &[Substring("roppongi")],
        effect: "Roppongi",
    },
    KeywordRule {
        keywords: &[Substring("akihabara")],
        effect: "Akihabara",
    },
    KeywordRule {
        keywords: &[Substring("ueno")],
        effect: "Ueno",
    },
    KeywordRule {
        keywords: &[Substring("tokyo station")],
        effect: "Tokyo Station",
    },
    KeywordRule {
        keywords: &[Substring("ikebukuro")],
        effect: "Ikebukuro",
    },
    KeywordRule {
        keywords: &[Substring("odaiba")],
        effect: "Odaiba",
    },
    KeywordRule {
        keywords: &[Substring("tsukiji")],
        effect: "Tsukiji",
    },
];
