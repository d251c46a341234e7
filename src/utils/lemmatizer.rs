//! A small WordNet-style noun lemmatizer.
//!
//! Lemmas are found by an irregular-form lookup followed by suffix detachment. There is no
//! dictionary to validate candidates against, so words that only look like plurals are listed
//! as invariants and short words are never reduced.

use std::collections::{HashMap, HashSet};

use lazy_static::lazy_static;

use super::stopwords::is_stopword;

/// Words shorter than this are returned as-is
const MIN_WORD_LEN: usize = 4;

/// Endings that mark a singular noun even though they end with an "s"
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is"];

/// A suffix detachment rule
struct Rule {
    suffix: &'static str,
    replacement: &'static str,
    min_len: usize,
}

/// Detachment rules, tried in order
static RULES: &[Rule] = &[
    Rule { suffix: "sses", replacement: "ss", min_len: 5 },
    Rule { suffix: "ches", replacement: "ch", min_len: 5 },
    Rule { suffix: "shes", replacement: "sh", min_len: 5 },
    Rule { suffix: "xes", replacement: "x", min_len: 4 },
    Rule { suffix: "ies", replacement: "y", min_len: 5 },
    Rule { suffix: "s", replacement: "", min_len: MIN_WORD_LEN },
];

lazy_static! {
    static ref IRREGULAR: HashMap<&'static str, &'static str> = [
        ("children", "child"),
        ("men", "man"),
        ("women", "woman"),
        ("businessmen", "businessman"),
        ("chairmen", "chairman"),
        ("congressmen", "congressman"),
        ("congresswomen", "congresswoman"),
        ("firemen", "fireman"),
        ("gunmen", "gunman"),
        ("policemen", "policeman"),
        ("servicemen", "serviceman"),
        ("spokesmen", "spokesman"),
        ("mice", "mouse"),
        ("geese", "goose"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("media", "medium"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("leaves", "leaf"),
        ("lives", "life"),
        ("wives", "wife"),
        ("knives", "knife"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("thieves", "thief"),
        ("calves", "calf"),
        ("loaves", "loaf"),
        ("scarves", "scarf"),
        ("selves", "self"),
        ("buses", "bus"),
        ("statuses", "status"),
        ("viruses", "virus"),
        ("bonuses", "bonus"),
        ("campuses", "campus"),
        ("censuses", "census"),
        ("consensuses", "consensus"),
        ("geniuses", "genius"),
        ("prospectuses", "prospectus"),
        ("stimuluses", "stimulus"),
        ("gases", "gas"),
        ("biases", "bias"),
        ("aliases", "alias"),
        ("atlases", "atlas"),
        ("canvases", "canvas"),
        ("goes", "go"),
        ("movies", "movie"),
        ("cookies", "cookie"),
        ("rookies", "rookie"),
        ("zombies", "zombie"),
        ("calories", "calorie"),
        ("goalies", "goalie"),
        ("selfies", "selfie"),
        ("brownies", "brownie"),
        ("hippies", "hippie"),
        ("genies", "genie"),
        ("prairies", "prairie"),
        ("sorties", "sortie"),
        ("aunties", "auntie"),
        ("bookies", "bookie"),
        ("newbies", "newbie"),
        ("freebies", "freebie"),
        ("junkies", "junkie"),
        ("smoothies", "smoothie"),
        ("yuppies", "yuppie"),
        ("eyries", "eyrie"),
        ("quizzes", "quiz"),
        ("headaches", "headache"),
        ("niches", "niche"),
        ("caches", "cache"),
        ("cliches", "cliche"),
        ("avalanches", "avalanche"),
        ("moustaches", "moustache"),
    ]
    .into_iter()
    .collect();

    static ref INVARIANT: HashSet<&'static str> = [
        "news", "series", "species", "politics", "economics", "physics", "mathematics",
        "ethics", "athletics", "lens", "means", "always", "perhaps", "whereas", "towards",
        "afterwards", "sometimes", "besides", "nowadays", "unless", "thanks", "texas", "kansas",
        "arkansas", "vegas", "christmas", "james", "jones", "reuters", "bias", "atlas", "canvas",
        "alias", "people", "police", "data", "chaos", "cosmos", "ethos", "pathos", "kudos",
        "rabies", "diabetes", "herpes", "measles", "mumps", "mars", "jesus", "clothes",
        "headquarters", "whereabouts", "barracks", "gallows", "innings", "scissors", "pants",
    ]
    .into_iter()
    .collect();
}

/// Perform a single reduction step, if any rule applies
fn reduce(word: &str) -> Option<String> {
    if let Some(base) = IRREGULAR.get(word) {
        return Some((*base).to_string());
    }

    if word.len() < MIN_WORD_LEN
        || INVARIANT.contains(word)
        || SINGULAR_ENDINGS.iter().any(|ending| word.ends_with(ending))
    {
        return None;
    }

    RULES
        .iter()
        .find(|rule| word.len() >= rule.min_len && word.ends_with(rule.suffix))
        .map(|rule| {
            let stem = &word[..word.len() - rule.suffix.len()];

            format!("{}{}", stem, rule.replacement)
        })
}

/// Reduce a lowercase word to its base form.
///
/// Reductions are repeated until none applies, and a reduction that would produce a stopword is
/// rejected, so `lemmatize(&lemmatize(w)) == lemmatize(w)` holds for every word.
pub fn lemmatize(word: &str) -> String {
    let mut current = word.to_string();

    while let Some(next) = reduce(&current) {
        if next == current || next.is_empty() || is_stopword(&next) {
            break;
        }

        current = next;
    }

    current
}
