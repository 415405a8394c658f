pub const DEFAULT_SCHEDULER_URL: &str = "https://calendly.com/ananyaa-lactonourish";
pub const DEFAULT_SCHEDULER_SCRIPT_URL: &str =
    "https://assets.calendly.com/assets/external/widget.js";

/// Booking page. The scheduler's script is attached while the page is
/// mounted and detached when it is left.
#[derive(Debug, Clone)]
pub struct AppointmentPage {
    booking_url: String,
    script_url: String,
    script_attached: bool,
}

impl AppointmentPage {
    pub fn new(booking_url: impl Into<String>, script_url: impl Into<String>) -> Self {
        Self {
            booking_url: booking_url.into(),
            script_url: script_url.into(),
            script_attached: false,
        }
    }

    pub fn booking_url(&self) -> &str {
        &self.booking_url
    }

    /// Returns the script to attach, or `None` if it is already attached.
    pub fn mount(&mut self) -> Option<&str> {
        if self.script_attached {
            return None;
        }
        self.script_attached = true;
        tracing::debug!("Attaching scheduler script {}", self.script_url);
        Some(self.script_url.as_str())
    }

    /// Returns the script to detach, or `None` if nothing is attached.
    pub fn unmount(&mut self) -> Option<&str> {
        if !self.script_attached {
            return None;
        }
        self.script_attached = false;
        Some(self.script_url.as_str())
    }

    pub fn is_script_attached(&self) -> bool {
        self.script_attached
    }
}

impl Default for AppointmentPage {
    fn default() -> Self {
        Self::new(DEFAULT_SCHEDULER_URL, DEFAULT_SCHEDULER_SCRIPT_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_script_lifecycle() {
        let mut page = AppointmentPage::default();
        assert!(!page.is_script_attached());
        assert_eq!(page.unmount(), None);

        assert_eq!(page.mount(), Some(DEFAULT_SCHEDULER_SCRIPT_URL));
        assert_eq!(page.mount(), None);
        assert!(page.is_script_attached());

        assert_eq!(page.unmount(), Some(DEFAULT_SCHEDULER_SCRIPT_URL));
        assert!(!page.is_script_attached());
        assert_eq!(page.booking_url(), DEFAULT_SCHEDULER_URL);
    }
}
