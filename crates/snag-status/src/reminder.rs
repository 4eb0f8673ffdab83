/// One-line nudge to review pending reflections, shown only once the backlog
/// is strictly larger than `threshold`.
pub fn pending_reminder(pending: usize, threshold: usize) -> Option<String> {
    (pending > threshold).then(|| {
        format!(
            "{pending} reflections pending review. Run `snag status` to see recurring failures."
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_threshold_is_exclusive() {
        assert!(pending_reminder(0, 10).is_none());
        assert!(pending_reminder(10, 10).is_none());

        let reminder = pending_reminder(11, 10).unwrap();
        assert!(reminder.starts_with("11 reflections pending"));
    }

    #[test]
    fn test_reminder_shows_exact_count() {
        let reminder = pending_reminder(1234, 10).unwrap();
        assert!(reminder.contains("1234"));
    }
}
