use super::*;

fn deck_of(n: usize) -> SlideDeck {
    let mut deck = SlideDeck::new();
    deck.add_images((0..n).map(|i| format!("img{i}.jpg")));
    deck
}

#[test]
fn add_images_caps_at_ten_in_upload_order() {
    let mut deck = deck_of(7);
    let added = deck.add_images((0..6).map(|i| format!("more{i}.jpg")));
    assert_eq!(added.len(), 3);
    assert_eq!(deck.len(), MAX_SLIDES);
    assert_eq!(deck.slides()[7].image.as_deref(), Some("more0.jpg"));
    assert_eq!(deck.slides()[9].image.as_deref(), Some("more2.jpg"));
}

#[test]
fn new_slides_start_centered_with_empty_text() {
    let deck = deck_of(1);
    let s = &deck.slides()[0];
    assert!(s.text.is_empty());
    assert_eq!(s.position_mode, PositionMode::FixedCenter);
    assert_eq!(s.text_position, TextPosition::new(50.0, 50.0));
}

#[test]
fn ids_stay_unique_after_delete_and_add() {
    let mut deck = deck_of(3);
    let first = deck.slides()[0].id.clone();
    deck.delete(&first).unwrap();
    deck.add_images(["x.jpg", "y.jpg"]);
    let mut ids: Vec<_> = deck.slides().iter().map(|s| s.id.clone()).collect();
    ids.sort_by(|a, b| a.0.cmp(&b.0));
    ids.dedup();
    assert_eq!(ids.len(), 4);
}

#[test]
fn drag_switches_to_manual_and_clamps() {
    let mut deck = deck_of(1);
    let id = deck.slides()[0].id.clone();
    deck.drag_text_to(&id, TextPosition::new(2.0, 95.0)).unwrap();
    let s = &deck.slides()[0];
    assert_eq!(s.position_mode, PositionMode::Manual);
    assert_eq!(s.text_position, TextPosition::new(10.0, 90.0));
}

#[test]
fn fixed_modes_overwrite_position_and_manual_keeps_it() {
    let mut deck = deck_of(1);
    let id = deck.slides()[0].id.clone();
    deck.drag_text_to(&id, TextPosition::new(33.0, 44.0)).unwrap();

    deck.set_position_mode(&id, PositionMode::Manual).unwrap();
    assert_eq!(deck.slides()[0].text_position, TextPosition::new(33.0, 44.0));

    deck.set_position_mode(&id, PositionMode::FixedBottom).unwrap();
    assert_eq!(deck.slides()[0].text_position, TextPosition::new(50.0, 85.0));
    assert_eq!(deck.slides()[0].position_mode, PositionMode::FixedBottom);

    deck.set_position_mode(&id, PositionMode::FixedTop).unwrap();
    assert_eq!(deck.slides()[0].text_position, TextPosition::new(50.0, 15.0));
}

#[test]
fn reorder_moves_slide() {
    let mut deck = deck_of(4);
    let ids: Vec<_> = deck.slides().iter().map(|s| s.id.clone()).collect();
    deck.reorder(0, 2).unwrap();
    let now: Vec<_> = deck.slides().iter().map(|s| s.id.clone()).collect();
    assert_eq!(now, vec![ids[1].clone(), ids[2].clone(), ids[0].clone(), ids[3].clone()]);
    assert!(deck.reorder(0, 9).is_err());
}

#[test]
fn unknown_ids_are_validation_errors() {
    let mut deck = deck_of(1);
    let missing = SlideId::from("nope");
    assert!(deck.set_text(&missing, "x").is_err());
    assert!(deck.delete(&missing).is_err());
}

#[test]
fn distribute_overwrites_all_text() {
    let mut deck = deck_of(2);
    let id = deck.slides()[1].id.clone();
    deck.set_text(&id, "old").unwrap();

    assert!(deck.distribute_text("One. Two. Three. Four."));
    assert_eq!(deck.slides()[0].text, "One. Two.");
    assert_eq!(deck.slides()[1].text, "Three. Four.");
}

#[test]
fn distribute_blank_is_noop() {
    let mut deck = deck_of(2);
    let id = deck.slides()[0].id.clone();
    deck.set_text(&id, "keep").unwrap();
    assert!(!deck.distribute_text("   "));
    assert_eq!(deck.slides()[0].text, "keep");
    assert!(!SlideDeck::new().distribute_text("Hello."));
}

#[test]
fn project_edit_slides_roundtrips_through_deck() {
    let mut project = Project::default();
    let added = project
        .edit_slides(|deck| deck.add_images(["a.png", "b.png"]))
        .unwrap();
    assert_eq!(added.len(), 2);
    assert_eq!(project.slides.len(), 2);
    assert!(
        project
            .edit_slides(|deck| deck.distribute_text("hello world"))
            .unwrap()
    );
    assert_eq!(project.slides[0].text, "hello");
    assert_eq!(project.slides[1].text, "world");
}

#[test]
fn oversized_project_is_rejected_without_losing_slides() {
    let mut project = Project::default();
    project.slides = (0..MAX_SLIDES + 1)
        .map(|i| Slide::new(format!("s{i}"), Some(format!("img{i}.jpg"))))
        .collect();

    let err = project
        .edit_slides(|deck| deck.distribute_text("one two three"))
        .unwrap_err();
    assert!(matches!(err, CarouselError::Validation(_)));
    assert_eq!(project.slides.len(), MAX_SLIDES + 1);
    assert!(project.slides.iter().all(|s| s.text.is_empty()));

    assert!(SlideDeck::from_slides(project.slides.clone()).is_err());
    let ten = project.slides[..MAX_SLIDES].to_vec();
    assert_eq!(SlideDeck::from_slides(ten).unwrap().len(), MAX_SLIDES);
}
