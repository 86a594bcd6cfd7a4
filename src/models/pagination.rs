use super::page::PaginationEnvelope;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageDelta {
    Previous,
    Next,
}

impl PageDelta {
    pub fn as_offset(self) -> i64 {
        match self {
            PageDelta::Previous => -1,
            PageDelta::Next => 1,
        }
    }
}

/// Previous/next controls for the active view's listing.
///
/// Enabled state is derived from the last configured envelope and is
/// re-checked whenever a control is used, so a stale draw can never
/// navigate past either end.
#[derive(Debug, Clone, Default)]
pub struct PaginationControls {
    envelope: Option<PaginationEnvelope>,
}

impl PaginationControls {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn configure(&mut self, envelope: PaginationEnvelope) {
        self.envelope = Some(envelope);
    }

    pub fn envelope(&self) -> Option<PaginationEnvelope> {
        self.envelope
    }

    /// Controls are hidden until configured and when there is only one page.
    pub fn is_visible(&self) -> bool {
        matches!(self.envelope, Some(e) if !e.is_single_page())
    }

    pub fn prev_enabled(&self) -> bool {
        self.is_visible() && self.envelope.is_some_and(|e| e.current_page > 1)
    }

    pub fn next_enabled(&self) -> bool {
        self.is_visible() && self.envelope.is_some_and(|e| e.current_page < e.total_pages)
    }

    pub fn is_enabled(&self, delta: PageDelta) -> bool {
        match delta {
            PageDelta::Previous => self.prev_enabled(),
            PageDelta::Next => self.next_enabled(),
        }
    }

    /// The page to fetch for `delta`, or `None` if that control is disabled.
    pub fn navigate(&self, delta: PageDelta) -> Option<u32> {
        if !self.is_enabled(delta) {
            return None;
        }
        let current = i64::from(self.envelope?.current_page);
        u32::try_from(current + delta.as_offset()).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn controls(current: u32, total: u32) -> PaginationControls {
        let mut c = PaginationControls::new();
        c.configure(PaginationEnvelope::new(current, total));
        c
    }

    #[test]
    fn single_page_hides_controls() {
        let c = controls(1, 1);
        assert!(!c.is_visible());
        assert!(!c.prev_enabled());
        assert!(!c.next_enabled());
        assert_eq!(c.navigate(PageDelta::Next), None);
        assert_eq!(c.navigate(PageDelta::Previous), None);
    }

    #[test]
    fn first_page_disables_previous_only() {
        for total in 2..6 {
            let c = controls(1, total);
            assert!(c.is_visible());
            assert!(!c.prev_enabled());
            assert!(c.next_enabled());
            assert_eq!(c.navigate(PageDelta::Previous), None);
            assert_eq!(c.navigate(PageDelta::Next), Some(2));
        }
    }

    #[test]
    fn last_page_disables_next_only() {
        for total in 2..6 {
            let c = controls(total, total);
            assert!(c.prev_enabled());
            assert!(!c.next_enabled());
            assert_eq!(c.navigate(PageDelta::Next), None);
            assert_eq!(c.navigate(PageDelta::Previous), Some(total - 1));
        }
    }

    #[test]
    fn middle_pages_enable_both() {
        for current in 2..5 {
            let c = controls(current, 5);
            assert!(c.prev_enabled());
            assert!(c.next_enabled());
            assert_eq!(c.navigate(PageDelta::Previous), Some(current - 1));
            assert_eq!(c.navigate(PageDelta::Next), Some(current + 1));
        }
    }

    #[test]
    fn unconfigured_controls_never_navigate() {
        let c = PaginationControls::new();
        assert!(!c.is_visible());
        assert_eq!(c.navigate(PageDelta::Next), None);
    }
}
