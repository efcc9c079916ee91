use super::*;

#[test]
fn empty_registry_cannot_resolve() {
    let mut reg = FontRegistry::new();
    assert_eq!(reg.face_count(), 0);
    let err = reg.resolve(FontFamily::Roboto).unwrap_err();
    assert!(matches!(err, CarouselError::Render(_)));
}

#[test]
fn missing_font_dir_loads_nothing() {
    let mut reg = FontRegistry::new();
    assert_eq!(
        reg.load_fonts_from_dir(Path::new("target/no-such-font-dir")),
        0
    );
}

#[test]
fn host_fonts_resolve_with_fallback() {
    let mut reg = crate::ExportSettings::default()
        .with_env_overrides()
        .load_fonts();
    assert!(
        reg.face_count() > 0,
        "font tests need installed system fonts or {}",
        crate::export::settings::ENV_FONT_DIR
    );
    let font = reg.resolve(FontFamily::Pacifico).unwrap();
    assert!(!font.bytes.is_empty());
    assert!(!font.family.is_empty());

    let again = reg.resolve(FontFamily::Pacifico).unwrap();
    assert!(Arc::ptr_eq(&font.bytes, &again.bytes));
}
