use super::*;

#[test]
fn status_label_is_human_readable() {
    assert_eq!(status_label(&ProjectStatus::ScrapingFailed), "scraping failed");
    assert_eq!(status_label(&ProjectStatus::Ready), "ready");
}

#[test]
fn status_class_carries_modifier() {
    assert_eq!(
        status_class(&ProjectStatus::Scraping),
        "project-card__status project-card__status--scraping"
    );
}
