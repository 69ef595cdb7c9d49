//! Valence-aware lexicon scorer.
//!
//! Each token is looked up in a word → valence lexicon (`[-4, 4]`), adjusted
//! for nearby negators and intensity modifiers, and the sum is squashed into a
//! compound score in `[-1, 1]`. Positive/neutral/negative proportions are
//! derived from the same per-token valences.

use anyhow::Context;
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fs, path::Path, sync::Arc};

static LEXICON: Lazy<Arc<HashMap<String, f64>>> = Lazy::new(|| {
    let raw = include_str!("../sentiment_lexicon.json");
    Arc::new(serde_json::from_str::<HashMap<String, f64>>(raw).expect("valid sentiment lexicon"))
});

/// Normalization constant for the compound score.
const ALPHA: f64 = 15.0;
/// Valence shift contributed by a booster/dampener word.
const B_INCR: f64 = 0.293;
/// Valence shift for an ALL-CAPS word in otherwise mixed-case text.
const C_INCR: f64 = 0.733;
/// Multiplier applied to a negated valence.
const N_SCALAR: f64 = -0.74;
/// Per-`!` emphasis, capped at four marks.
const EXCL_INCR: f64 = 0.292;

/// Four-number polarity result for one text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PolarityScores {
    pub compound: f64,
    pub pos: f64,
    pub neu: f64,
    pub neg: f64,
}

/// Text → polarity. Implementations must keep `compound` in `[-1, 1]` and
/// each proportion in `[0, 1]`.
pub trait PolarityScorer {
    fn polarity_scores(&self, text: &str) -> PolarityScores;
}

#[derive(Debug, Clone)]
pub struct LexiconScorer {
    lexicon: Arc<HashMap<String, f64>>,
}

impl Default for LexiconScorer {
    fn default() -> Self {
        Self::new()
    }
}

impl LexiconScorer {
    /// Scorer backed by the built-in lexicon.
    pub fn new() -> Self {
        Self {
            lexicon: Arc::clone(&LEXICON),
        }
    }

    pub fn from_map(lexicon: HashMap<String, f64>) -> Self {
        let lexicon = lexicon
            .into_iter()
            .map(|(k, v)| (k.to_lowercase(), v.clamp(-4.0, 4.0)))
            .collect();
        Self {
            lexicon: Arc::new(lexicon),
        }
    }

    /// Load a `{"word": valence, ...}` JSON lexicon.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)
            .with_context(|| format!("reading lexicon from {}", path.display()))?;
        let map: HashMap<String, f64> = serde_json::from_str(&raw)
            .with_context(|| format!("parsing lexicon {}", path.display()))?;
        Ok(Self::from_map(map))
    }

    #[inline]
    fn word_valence(&self, w: &str) -> f64 {
        self.lexicon.get(w).copied().unwrap_or(0.0)
    }

    fn valences(&self, tokens: &[Token]) -> Vec<f64> {
        let cap_diff = has_cap_differential(tokens);
        let mut out = Vec::with_capacity(tokens.len());

        for (i, tok) in tokens.iter().enumerate() {
            let w = tok.lower.as_str();
            if booster_scalar(w) != 0.0 {
                out.push(0.0);
                continue;
            }
            let mut v = self.word_valence(w);
            if v == 0.0 {
                out.push(0.0);
                continue;
            }

            if cap_diff && tok.is_shouting() {
                v += C_INCR.copysign(v);
            }

            // Intensity modifiers up to three tokens back, fading with distance.
            for (k, decay) in [(1usize, 1.0), (2, 0.95), (3, 0.9)] {
                if i < k {
                    break;
                }
                let b = booster_scalar(&tokens[i - k].lower);
                if b != 0.0 {
                    v += b * v.signum() * decay;
                }
            }

            let negated = (1..=3).any(|k| i >= k && is_negator(&tokens[i - k].lower));
            if negated {
                v *= N_SCALAR;
            }
            out.push(v);
        }

        apply_but_rule(tokens, &mut out);
        out
    }
}

impl PolarityScorer for LexiconScorer {
    fn polarity_scores(&self, text: &str) -> PolarityScores {
        let tokens = tokenize(text);
        if tokens.is_empty() {
            return PolarityScores::default();
        }
        let sentiments = self.valences(&tokens);

        let mut sum: f64 = sentiments.iter().sum();
        let emphasis = punctuation_emphasis(text);
        if sum > 0.0 {
            sum += emphasis;
        } else if sum < 0.0 {
            sum -= emphasis;
        }
        let compound = round_to(normalize(sum), 4);

        let (mut pos_sum, mut neg_sum, mut neu_count) = (0.0f64, 0.0f64, 0usize);
        for &s in &sentiments {
            if s > 0.0 {
                pos_sum += s + 1.0;
            } else if s < 0.0 {
                neg_sum += s - 1.0;
            } else {
                neu_count += 1;
            }
        }
        if pos_sum > neg_sum.abs() {
            pos_sum += emphasis;
        } else if pos_sum < neg_sum.abs() {
            neg_sum -= emphasis;
        }

        let total = pos_sum + neg_sum.abs() + neu_count as f64;
        PolarityScores {
            compound,
            pos: round_to((pos_sum / total).abs(), 3),
            neu: round_to((neu_count as f64 / total).abs(), 3),
            neg: round_to((neg_sum / total).abs(), 3),
        }
    }
}

struct Token {
    raw: String,
    lower: String,
}

impl Token {
    fn is_shouting(&self) -> bool {
        self.raw.chars().any(char::is_alphabetic)
            && self.raw.chars().count() > 1
            && self
                .raw
                .chars()
                .filter(|c| c.is_alphabetic())
                .all(char::is_uppercase)
    }
}

/// Whitespace tokens with surrounding punctuation stripped; inner apostrophes
/// are kept so contractions like "isn't" stay whole.
fn tokenize(s: &str) -> Vec<Token> {
    s.split_whitespace()
        .map(|t| t.replace('\u{2019}', "'"))
        .map(|t| {
            t.trim_matches(|c: char| !c.is_alphanumeric() && c != '\'')
                .trim_matches('\'')
                .to_string()
        })
        .filter(|t| !t.is_empty())
        .map(|raw| Token {
            lower: raw.to_lowercase(),
            raw,
        })
        .collect()
}

fn has_cap_differential(tokens: &[Token]) -> bool {
    let shouting = tokens.iter().filter(|t| t.is_shouting()).count();
    shouting > 0 && shouting < tokens.len()
}

fn is_negator(tok: &str) -> bool {
    tok.ends_with("n't")
        || matches!(
            tok,
            "not"
                | "no"
                | "never"
                | "none"
                | "nothing"
                | "nowhere"
                | "neither"
                | "nor"
                | "cannot"
                | "without"
                | "rarely"
                | "seldom"
                | "despite"
                | "isnt"
                | "wasnt"
                | "arent"
                | "dont"
                | "doesnt"
                | "didnt"
                | "wont"
                | "cant"
        )
}

fn booster_scalar(tok: &str) -> f64 {
    match tok {
        "absolutely" | "amazingly" | "completely" | "considerably" | "deeply" | "enormously"
        | "entirely" | "especially" | "exceptionally" | "extremely" | "fully" | "greatly"
        | "highly" | "hugely" | "incredibly" | "intensely" | "particularly" | "really"
        | "remarkably" | "so" | "substantially" | "thoroughly" | "totally" | "tremendously"
        | "unbelievably" | "utterly" | "very" | "most" | "more" => B_INCR,
        "almost" | "barely" | "hardly" | "less" | "marginally" | "occasionally" | "partly"
        | "scarcely" | "slightly" | "somewhat" => -B_INCR,
        _ => 0.0,
    }
}

/// Contrast: sentiment before "but" is halved, after it amplified by half.
fn apply_but_rule(tokens: &[Token], sentiments: &mut [f64]) {
    let Some(but_idx) = tokens.iter().position(|t| t.lower == "but") else {
        return;
    };
    for (i, s) in sentiments.iter_mut().enumerate() {
        if i < but_idx {
            *s *= 0.5;
        } else if i > but_idx {
            *s *= 1.5;
        }
    }
}

fn punctuation_emphasis(text: &str) -> f64 {
    let marks = text.chars().filter(|&c| c == '!').count().min(4);
    marks as f64 * EXCL_INCR
}

/// Squash an unbounded valence sum into `[-1, 1]`.
fn normalize(score: f64) -> f64 {
    (score / (score * score + ALPHA).sqrt()).clamp(-1.0, 1.0)
}

fn round_to(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}
