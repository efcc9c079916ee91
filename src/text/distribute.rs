//! Splitting one block of free text into per-slide fragments.
//!
//! Three tiers are tried in order: sentences, paragraphs, words. The first tier that yields at
//! least as many units as there are slides wins; the word tier always applies as the last resort.
//! Units are dealt out with ceil-division, so earlier slides never receive fewer units than later
//! ones and trailing slides may end up empty.

/// Which splitting tier produced a distribution.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SplitTier {
    /// Sentence-terminal punctuation followed by whitespace.
    Sentences,
    /// One or more newlines.
    Paragraphs,
    /// Any whitespace.
    Words,
}

impl SplitTier {
    fn joiner(self) -> &'static str {
        match self {
            Self::Sentences | Self::Words => " ",
            Self::Paragraphs => "\n",
        }
    }
}

/// Result of [`distribute_text_with_tier`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Tier that produced the fragments.
    pub tier: SplitTier,
    /// Exactly one fragment per slide, in reading order.
    pub fragments: Vec<String>,
}

fn is_terminal(c: char) -> bool {
    matches!(c, '.' | '!' | '?' | '。' | '！' | '？')
}

/// Split at runs of `. ! ? 。 ！ ？` that are followed by whitespace.
///
/// Punctuation stays with its sentence; the separating whitespace is dropped. Sentences are
/// trimmed and empty ones removed.
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut start = 0usize;
    let mut prev_terminal = false;
    let mut chars = text.char_indices().peekable();

    while let Some((i, c)) = chars.next() {
        if prev_terminal && c.is_whitespace() {
            push_trimmed(&mut out, &text[start..i]);
            let mut next = i + c.len_utf8();
            while let Some(&(j, w)) = chars.peek() {
                if !w.is_whitespace() {
                    break;
                }
                next = j + w.len_utf8();
                chars.next();
            }
            start = next;
            prev_terminal = false;
            continue;
        }
        prev_terminal = is_terminal(c);
    }
    push_trimmed(&mut out, &text[start..]);
    out
}

/// Split on one or more newlines; paragraphs are trimmed and empty ones removed.
pub fn split_paragraphs(text: &str) -> Vec<&str> {
    text.split('\n')
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .collect()
}

/// Split on any whitespace.
pub fn split_words(text: &str) -> Vec<&str> {
    text.split_whitespace().collect()
}

fn push_trimmed<'a>(out: &mut Vec<&'a str>, s: &'a str) {
    let s = s.trim();
    if !s.is_empty() {
        out.push(s);
    }
}

/// Deal `units` onto `slides` slots with ceil-division, joining each slot with `joiner`.
fn deal(units: &[&str], slides: usize, joiner: &str) -> Vec<String> {
    let per_slide = units.len().div_ceil(slides).max(1);
    let mut out: Vec<String> = (0..slides)
        .map(|i| {
            let start = (i * per_slide).min(units.len());
            let end = ((i + 1) * per_slide).min(units.len());
            units[start..end].join(joiner)
        })
        .collect();
    out.resize(slides, String::new());
    out
}

/// Distribute `text` across `slides` fragments, reporting the tier used.
///
/// Returns `None` (nothing to assign) for blank text or zero slides.
pub fn distribute_text_with_tier(text: &str, slides: usize) -> Option<Distribution> {
    if slides == 0 || text.trim().is_empty() {
        return None;
    }

    let sentences = split_sentences(text);
    let (tier, units) = if sentences.len() >= slides {
        (SplitTier::Sentences, sentences)
    } else {
        let paragraphs = split_paragraphs(text);
        if paragraphs.len() >= slides {
            (SplitTier::Paragraphs, paragraphs)
        } else {
            (SplitTier::Words, split_words(text))
        }
    };

    Some(Distribution {
        tier,
        fragments: deal(&units, slides, tier.joiner()),
    })
}

/// Distribute `text` across `slides` fragments.
///
/// Returns exactly `slides` fragments, or `None` for blank text or zero slides.
pub fn distribute_text(text: &str, slides: usize) -> Option<Vec<String>> {
    distribute_text_with_tier(text, slides).map(|d| d.fragments)
}

#[cfg(test)]
#[path = "../../tests/unit/text/distribute.rs"]
mod tests;
