//! Zodiac sign → element assignment (the triplicities).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::types::{Element, ZodiacSign};

/// Sign-to-element lookup plus the harmonic compatibility relation used by
/// resonance scoring.
///
/// Injected wherever a sign→element mapping is needed. The default carries
/// the standard triplicities; a custom table falls back to the standard
/// assignment for any sign it omits, so lookups are total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ZodiacElementTable {
    assignments: BTreeMap<ZodiacSign, Element>,
}

impl Default for ZodiacElementTable {
    fn default() -> Self {
        use Element::*;
        use ZodiacSign::*;
        let assignments = [
            (Aries, Fire),
            (Leo, Fire),
            (Sagittarius, Fire),
            (Taurus, Earth),
            (Virgo, Earth),
            (Capricorn, Earth),
            (Gemini, Air),
            (Libra, Air),
            (Aquarius, Air),
            (Cancer, Water),
            (Scorpio, Water),
            (Pisces, Water),
        ]
        .into_iter()
        .collect();
        Self { assignments }
    }
}

impl ZodiacElementTable {
    /// Element for a sign.
    pub fn element_of(&self, sign: ZodiacSign) -> Element {
        self.assignments
            .get(&sign)
            .copied()
            .unwrap_or_else(|| standard_triplicity(sign))
    }

    /// Whether two elements form a defined compatible pair
    /// (Fire–Air, Earth–Water).
    pub fn compatible(&self, a: Element, b: Element) -> bool {
        a.compatible() == b
    }
}

fn standard_triplicity(sign: ZodiacSign) -> Element {
    use ZodiacSign::*;
    match sign {
        Aries | Leo | Sagittarius => Element::Fire,
        Taurus | Virgo | Capricorn => Element::Earth,
        Gemini | Libra | Aquarius => Element::Air,
        Cancer | Scorpio | Pisces => Element::Water,
    }
}
