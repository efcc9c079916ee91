use super::*;

#[test]
fn sentence_tier_splits_evenly() {
    let d = distribute_text_with_tier("One. Two. Three. Four.", 2).unwrap();
    assert_eq!(d.tier, SplitTier::Sentences);
    assert_eq!(d.fragments, vec!["One. Two.", "Three. Four."]);
}

#[test]
fn word_tier_pads_trailing_slides() {
    let d = distribute_text_with_tier("hello world foo bar", 3).unwrap();
    assert_eq!(d.tier, SplitTier::Words);
    assert_eq!(d.fragments, vec!["hello world", "foo bar", ""]);
}

#[test]
fn paragraph_tier_joins_with_newlines() {
    let text = "first line\n\nsecond line\nthird line\n";
    let d = distribute_text_with_tier(text, 2).unwrap();
    assert_eq!(d.tier, SplitTier::Paragraphs);
    assert_eq!(d.fragments, vec!["first line\nsecond line", "third line"]);
}

#[test]
fn blank_text_or_zero_slides_is_a_noop() {
    assert_eq!(distribute_text("", 3), None);
    assert_eq!(distribute_text("  \n\t ", 3), None);
    assert_eq!(distribute_text("Hello.", 0), None);
}

#[test]
fn sentence_split_keeps_punctuation_runs() {
    assert_eq!(
        split_sentences("Wait... What?! Yes.   No"),
        vec!["Wait...", "What?!", "Yes.", "No"]
    );
}

#[test]
fn sentence_split_requires_trailing_whitespace() {
    assert_eq!(split_sentences("v1.2 is out.Really"), vec!["v1.2 is out.Really"]);
}

#[test]
fn sentence_split_handles_fullwidth_terminals() {
    assert_eq!(
        split_sentences("你好。 世界！ 再见？ end"),
        vec!["你好。", "世界！", "再见？", "end"]
    );
}

#[test]
fn single_slide_gets_everything() {
    let d = distribute_text_with_tier("A. B. C.", 1).unwrap();
    assert_eq!(d.fragments, vec!["A. B. C."]);
}

#[test]
fn more_slides_than_words_leaves_tail_empty() {
    let out = distribute_text("lonely", 4).unwrap();
    assert_eq!(out, vec!["lonely", "", "", ""]);
}
