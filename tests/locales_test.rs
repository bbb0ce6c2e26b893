use ai_content_service::Locales;

#[test]
fn test_locales_load_and_translate() {
    let mut locales = Locales::new("locales").expect("locales directory should load");
    locales.set_default("en").expect("en locale should exist");

    assert_eq!(locales.t("models.distilgpt2"), "DistilGPT-2");
    assert_eq!(locales.t("errors.validation.prompt_required"), "prompt is required");

    let zh = locales.translate("zh", "errors.http.not_found").expect("zh locale should exist");
    assert_eq!(zh, "未找到");
}

#[test]
fn test_missing_key_falls_back_to_key() {
    let mut locales = Locales::new("locales").expect("locales directory should load");
    locales.set_default("en").expect("en locale should exist");

    assert_eq!(locales.t("no.such.key"), "no.such.key");
}

#[test]
fn test_unknown_default_locale_is_rejected() {
    let mut locales = Locales::new("locales").expect("locales directory should load");

    assert!(locales.set_default("fr").is_err());
}
