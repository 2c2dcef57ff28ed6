use std::time::Duration;

use hush_core::disclosure::{EditDescriptor, InputMasker, DEFAULT_IDLE_MASK};

fn just_past(delay: Duration) -> Duration {
    delay + Duration::from_millis(1)
}

#[tokio::test(start_paused = true)]
async fn test_idle_timeout_masks_trailing_word() {
    let mut masker = InputMasker::default();
    let shown = masker.apply_edit(&EditDescriptor::insert(0, "the quick brown"));
    assert_eq!(shown, "*** ***** brown");

    tokio::time::sleep(just_past(DEFAULT_IDLE_MASK)).await;

    assert_eq!(masker.display(), "*** ***** *****");
    assert!(masker.is_tail_hidden());
    assert!(!masker.is_idle_timer_pending());
    assert_eq!(masker.plaintext(), "the quick brown");
}

#[tokio::test(start_paused = true)]
async fn test_idle_mask_is_observable() {
    let mut masker = InputMasker::new(Duration::from_secs(2));
    let mut rx = masker.subscribe();
    masker.apply_edit(&EditDescriptor::insert(0, "hello world"));
    rx.borrow_and_update();

    rx.changed().await.expect("masker alive");
    let view = rx.borrow_and_update().clone();
    assert_eq!(view.display, "***** *****");
    assert!(view.tail_hidden);
}

#[tokio::test(start_paused = true)]
async fn test_each_edit_restarts_idle_timer() {
    let mut masker = InputMasker::default();
    masker.apply_edit(&EditDescriptor::insert(0, "typ"));

    tokio::time::sleep(Duration::from_secs(4)).await;
    masker.apply_edit(&EditDescriptor::insert(3, "ing"));
    tokio::time::sleep(Duration::from_secs(4)).await;

    // Eight seconds since the first keystroke, four since the last.
    assert_eq!(masker.display(), "typing");
    assert!(!masker.is_tail_hidden());

    tokio::time::sleep(Duration::from_secs(2)).await;
    assert_eq!(masker.display(), "******");
}

#[tokio::test(start_paused = true)]
async fn test_cancel_idle_timer_keeps_tail_visible() {
    let mut masker = InputMasker::default();
    masker.apply_edit(&EditDescriptor::insert(0, "keep this"));
    masker.cancel_idle_timer();

    tokio::time::sleep(Duration::from_secs(30)).await;

    assert_eq!(masker.display(), "**** this");
    assert!(!masker.is_tail_hidden());
}

#[tokio::test(start_paused = true)]
async fn test_clear_wipes_buffer_and_timer() {
    let mut masker = InputMasker::default();
    masker.apply_edit(&EditDescriptor::insert(0, "gone soon"));
    masker.clear();

    assert!(masker.is_empty());
    assert_eq!(masker.display(), "");
    assert!(!masker.is_idle_timer_pending());

    tokio::time::sleep(just_past(DEFAULT_IDLE_MASK)).await;
    assert_eq!(masker.display(), "");
}

#[tokio::test(start_paused = true)]
async fn test_editing_after_idle_mask_reveals_new_tail() {
    let mut masker = InputMasker::default();
    masker.apply_edit(&EditDescriptor::insert(0, "first"));
    tokio::time::sleep(just_past(DEFAULT_IDLE_MASK)).await;
    assert_eq!(masker.display(), "*****");

    let shown = masker.apply_edit(&EditDescriptor::insert(5, " second"));
    assert_eq!(shown, "***** second");
    assert!(!masker.is_tail_hidden());
}

#[tokio::test(start_paused = true)]
async fn test_backspace_and_selection_edits() {
    let mut masker = InputMasker::default();
    masker.apply_edit(&EditDescriptor::insert(0, "meet at noon"));
    let shown = masker.apply_edit(&EditDescriptor::delete_backward(12));
    assert_eq!(shown, "**** ** noo");

    let shown = masker.apply_edit(&EditDescriptor::replace(8, 11, "dawn"));
    assert_eq!(shown, "**** ** dawn");
    assert_eq!(masker.plaintext(), "meet at dawn");
    assert_eq!(masker.len(), 12);

    let shown = masker.apply_edit(&EditDescriptor::delete_range(4, 12));
    assert_eq!(shown, "meet");
}

#[tokio::test(start_paused = true)]
async fn test_trailing_space_keeps_last_word_until_idle() {
    let mut masker = InputMasker::default();
    let shown = masker.apply_edit(&EditDescriptor::insert(0, "word "));
    assert_eq!(shown, "word ");
    assert!(masker.is_idle_timer_pending());

    tokio::time::sleep(just_past(DEFAULT_IDLE_MASK)).await;
    assert_eq!(masker.display(), "**** ");
}
