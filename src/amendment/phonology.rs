//! Final-consonant (받침) rules and particle (조사) recognition.
//!
//! Everything here works on the last character of a word. Anything that is
//! not a precomposed Hangul syllable is treated as having no final
//! consonant, so Latin words, digits and the empty string never fail.

use std::fmt;

const HANGUL_FIRST: u32 = 0xAC00;
const HANGUL_LAST: u32 = 0xD7A3;
const JONGSEONG_COUNT: u32 = 28;
const JONGSEONG_RIEUL: u32 = 8;

/// Final-consonant index (0..28) of the last syllable, if it is Hangul.
fn jongseong_index(word: &str) -> Option<u32> {
    let code = word.chars().last()? as u32;
    if !(HANGUL_FIRST..=HANGUL_LAST).contains(&code) {
        return None;
    }
    Some((code - HANGUL_FIRST) % JONGSEONG_COUNT)
}

/// True if the word ends in a Hangul syllable with a final consonant.
pub fn has_batchim(word: &str) -> bool {
    matches!(jongseong_index(word), Some(index) if index != 0)
}

/// True only if the final consonant is ㄹ.
pub fn has_rieul_coda(word: &str) -> bool {
    jongseong_index(word) == Some(JONGSEONG_RIEUL)
}

/// Coda state of a word as seen by the particle rules.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Coda {
    pub batchim: bool,
    pub rieul: bool,
}

impl Coda {
    pub fn of(word: &str) -> Self {
        Self {
            batchim: has_batchim(word),
            rieul: has_rieul_coda(word),
        }
    }

    /// 을 after a final consonant, 를 otherwise.
    pub fn object_marker(self) -> &'static str {
        if self.batchim {
            "을"
        } else {
            "를"
        }
    }

    /// 로 after a vowel or ㄹ, 으로 otherwise.
    pub fn instrumental_marker(self) -> &'static str {
        if !self.batchim || self.rieul {
            "로"
        } else {
            "으로"
        }
    }
}

/// The particles recognised at the end of a matched token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Particle {
    Euro,
    Ina,
    Gwa,
    Wa,
    Eul,
    Reul,
    I,
    Ga,
    Na,
    Ro,
    Eun,
    Neun,
}

impl Particle {
    /// Longest forms first so that 으로 wins over 로 and 이나 over 나.
    pub const ALL: [Particle; 12] = [
        Particle::Euro,
        Particle::Ina,
        Particle::Gwa,
        Particle::Wa,
        Particle::Eul,
        Particle::Reul,
        Particle::I,
        Particle::Ga,
        Particle::Na,
        Particle::Ro,
        Particle::Eun,
        Particle::Neun,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Euro => "으로",
            Self::Ina => "이나",
            Self::Gwa => "과",
            Self::Wa => "와",
            Self::Eul => "을",
            Self::Reul => "를",
            Self::I => "이",
            Self::Ga => "가",
            Self::Na => "나",
            Self::Ro => "로",
            Self::Eun => "은",
            Self::Neun => "는",
        }
    }

    /// Particle attached to the replacement word, chosen by this particle's
    /// row of the rule table from the replacement's coda.
    ///
    /// 를, 와, 가, 나 and 는 append 로 to the consonant-final partner, so a
    /// vowel-final replacement gets a bare 로. 은 follows the 이/을 rows.
    pub fn replacement_form(self, coda: Coda) -> &'static str {
        let Coda { batchim, rieul } = coda;
        match self {
            Self::Eul if rieul => "로",
            Self::Eul if batchim => "으로",
            Self::Eul => "를",
            Self::Reul if batchim => "을로",
            Self::Reul => "로",
            Self::Gwa if rieul => "로",
            Self::Gwa if batchim => "으로",
            Self::Gwa => "와",
            Self::Wa if batchim => "과로",
            Self::Wa => "로",
            Self::I if rieul => "로",
            Self::I if batchim => "으로",
            Self::I => "가",
            Self::Ga if batchim => "이로",
            Self::Ga => "로",
            Self::Ina if rieul => "로",
            Self::Ina if batchim => "으로",
            Self::Ina => "나",
            Self::Na if batchim => "이나로",
            Self::Na => "로",
            Self::Euro | Self::Ro => coda.instrumental_marker(),
            Self::Eun if rieul => "로",
            Self::Eun if batchim => "으로",
            Self::Eun => "는",
            Self::Neun if batchim => "은로",
            Self::Neun => "로",
        }
    }
}

impl fmt::Display for Particle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a recognised particle off the end of `token`.
///
/// The particle is only split off when what remains is non-empty and still
/// contains `matched_word`; a syllable that belongs to the matched word
/// itself (가 in 국가) is never taken for a particle.
pub fn extract_trailing_particle<'a>(
    token: &'a str,
    matched_word: &str,
) -> (&'a str, Option<Particle>) {
    for particle in Particle::ALL {
        if let Some(chunk) = token.strip_suffix(particle.as_str()) {
            if !chunk.is_empty() && chunk.contains(matched_word) {
                return (chunk, Some(particle));
            }
        }
    }
    (token, None)
}
