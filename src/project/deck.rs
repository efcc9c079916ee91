use crate::{
    foundation::error::{CarouselError, CarouselResult},
    project::model::{MAX_SLIDES, PositionMode, Project, Slide, SlideId, TextPosition},
    text::distribute::distribute_text_with_tier,
};

/// Lower/upper bound for dragged text anchors, in percent.
const DRAG_MIN_PCT: f64 = 10.0;
const DRAG_MAX_PCT: f64 = 90.0;

/// Ordered slide collection with the editor's mutation rules.
///
/// The deck never holds more than [`MAX_SLIDES`] slides.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SlideDeck {
    slides: Vec<Slide>,
    next_seq: u64,
}

impl SlideDeck {
    /// Empty deck.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adopt the slides of an existing project.
    ///
    /// More than [`MAX_SLIDES`] slides is a validation error; nothing is dropped.
    pub fn from_slides(slides: Vec<Slide>) -> CarouselResult<Self> {
        check_slide_count(slides.len())?;
        let next_seq = slides.len() as u64;
        Ok(Self { slides, next_seq })
    }

    /// Borrow the slides in order.
    pub fn slides(&self) -> &[Slide] {
        &self.slides
    }

    /// Give the slides back.
    pub fn into_slides(self) -> Vec<Slide> {
        self.slides
    }

    /// Number of slides.
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    /// Whether the deck is empty.
    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Append one slide per image reference, in order, keeping at most [`MAX_SLIDES`].
    ///
    /// Returns the ids of the slides that were kept.
    pub fn add_images<I, S>(&mut self, images: I) -> Vec<SlideId>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut added = Vec::new();
        for image in images {
            if self.slides.len() >= MAX_SLIDES {
                break;
            }
            let id = self.fresh_id();
            self.slides.push(Slide::new(id.0.clone(), Some(image.into())));
            added.push(id);
        }
        added
    }

    /// Replace one slide's text.
    pub fn set_text(&mut self, id: &SlideId, text: impl Into<String>) -> CarouselResult<()> {
        self.slide_mut(id)?.text = text.into();
        Ok(())
    }

    /// Move a slide's text to a dragged position; switches the slide to manual placement.
    ///
    /// Both coordinates are clamped to 10-90%.
    pub fn drag_text_to(&mut self, id: &SlideId, position: TextPosition) -> CarouselResult<()> {
        if !position.x.is_finite() || !position.y.is_finite() {
            return Err(CarouselError::validation("drag position must be finite"));
        }
        let slide = self.slide_mut(id)?;
        slide.text_position = TextPosition::new(
            position.x.clamp(DRAG_MIN_PCT, DRAG_MAX_PCT),
            position.y.clamp(DRAG_MIN_PCT, DRAG_MAX_PCT),
        );
        slide.position_mode = PositionMode::Manual;
        Ok(())
    }

    /// Change placement mode; fixed modes snap the anchor to their canonical position.
    pub fn set_position_mode(&mut self, id: &SlideId, mode: PositionMode) -> CarouselResult<()> {
        let slide = self.slide_mut(id)?;
        if let Some(anchor) = mode.anchor() {
            slide.text_position = anchor;
        }
        slide.position_mode = mode;
        Ok(())
    }

    /// Move the slide at `from` so it ends up at index `to`.
    pub fn reorder(&mut self, from: usize, to: usize) -> CarouselResult<()> {
        let len = self.slides.len();
        if from >= len || to >= len {
            return Err(CarouselError::validation(format!(
                "reorder indices {from}->{to} out of range for {len} slides"
            )));
        }
        let slide = self.slides.remove(from);
        self.slides.insert(to, slide);
        Ok(())
    }

    /// Remove a slide.
    pub fn delete(&mut self, id: &SlideId) -> CarouselResult<Slide> {
        let idx = self.index_of(id)?;
        Ok(self.slides.remove(idx))
    }

    /// Split `full_text` across all slides, overwriting every slide's text.
    ///
    /// Blank text or an empty deck leaves the deck untouched and returns `false`.
    pub fn distribute_text(&mut self, full_text: &str) -> bool {
        let Some(dist) = distribute_text_with_tier(full_text, self.slides.len()) else {
            return false;
        };
        tracing::debug!(tier = ?dist.tier, slides = self.slides.len(), "distributed text");
        for (slide, text) in self.slides.iter_mut().zip(dist.fragments) {
            slide.text = text;
        }
        true
    }

    fn index_of(&self, id: &SlideId) -> CarouselResult<usize> {
        self.slides
            .iter()
            .position(|s| &s.id == id)
            .ok_or_else(|| CarouselError::validation(format!("unknown slide id '{id}'")))
    }

    fn slide_mut(&mut self, id: &SlideId) -> CarouselResult<&mut Slide> {
        let idx = self.index_of(id)?;
        Ok(&mut self.slides[idx])
    }

    fn fresh_id(&mut self) -> SlideId {
        loop {
            let candidate = SlideId(format!("slide-{}", self.next_seq));
            self.next_seq += 1;
            if !self.slides.iter().any(|s| s.id == candidate) {
                return candidate;
            }
        }
    }
}

impl Project {
    /// Run `f` against a deck view of this project's slides.
    ///
    /// Fails without touching the project when it already holds more than [`MAX_SLIDES`]
    /// slides.
    pub fn edit_slides<R>(&mut self, f: impl FnOnce(&mut SlideDeck) -> R) -> CarouselResult<R> {
        check_slide_count(self.slides.len())?;
        let mut deck = SlideDeck::from_slides(std::mem::take(&mut self.slides))?;
        let out = f(&mut deck);
        self.slides = deck.into_slides();
        Ok(out)
    }
}

fn check_slide_count(len: usize) -> CarouselResult<()> {
    if len > MAX_SLIDES {
        return Err(CarouselError::validation(format!(
            "a carousel holds at most {MAX_SLIDES} slides, got {len}"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/project/deck.rs"]
mod tests;
