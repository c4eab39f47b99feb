use indicatif::{ProgressBar, ProgressStyle};
use std::io::{self, IsTerminal};
use std::sync::Arc;
use std::time::Duration;

/// Progress indicator manager
pub struct ProgressManager {
    enabled: bool,
    verbose: bool,
}

impl ProgressManager {
    /// Create a new progress manager
    pub fn new(quiet: bool, verbose: bool) -> Self {
        // Progress goes to stderr, so only draw it on an interactive terminal
        let enabled = !quiet && io::stderr().is_terminal();

        Self { enabled, verbose }
    }

    /// Create a spinner for a long-running request
    pub fn create_spinner(&self, message: &str) -> Option<ProgressBar> {
        if !self.enabled {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        let style = ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .map(|style| style.tick_strings(&["⣾", "⣽", "⣻", "⢿", "⡿", "⣟", "⣯", "⣷"]))
            .unwrap_or_else(|_| ProgressStyle::default_spinner());
        pb.set_style(style);
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));

        Some(pb)
    }

    /// Show a simple message (for verbose mode)
    pub fn show_message(&self, message: &str) {
        if self.verbose && self.enabled {
            eprintln!("🔍 {}", message);
        }
    }

    /// Check if progress is enabled
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

/// Spinner bound to one command; cleared on drop
pub struct TaskProgress {
    spinner: Option<ProgressBar>,
    manager: Arc<ProgressManager>,
}

impl TaskProgress {
    pub fn new(manager: Arc<ProgressManager>, message: &str) -> Self {
        let spinner = manager.create_spinner(message);
        Self { spinner, manager }
    }

    /// Update the progress message
    pub fn set_message(&self, message: &str) {
        if let Some(ref pb) = self.spinner {
            pb.set_message(message.to_string());
        }
        self.manager.show_message(message);
    }

    /// Finish and clear the progress
    pub fn finish_and_clear(&self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

impl Drop for TaskProgress {
    fn drop(&mut self) {
        if let Some(ref pb) = self.spinner {
            pb.finish_and_clear();
        }
    }
}

/// Progress messages for different operations
pub mod messages {
    pub fn searching_statutes(query: &str) -> String {
        format!("'{}' 포함 법령 검색 중...", query)
    }

    pub fn generating_amendments(find_word: &str, replace_word: &str) -> String {
        format!("'{}' → '{}' 개정문 생성 중...", find_word, replace_word)
    }

    pub fn statutes_matched(matched: usize, searched: usize) -> String {
        format!("검색된 법령 {}개 중 {}개에서 발견", searched, matched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quiet_disables_progress() {
        let manager = ProgressManager::new(true, true);
        assert!(!manager.is_enabled());
        assert!(manager.create_spinner("검색 중").is_none());
    }

    #[test]
    fn test_progress_messages() {
        assert_eq!(messages::searching_statutes("정의"), "'정의' 포함 법령 검색 중...");
        assert_eq!(
            messages::generating_amendments("정의", "개념"),
            "'정의' → '개념' 개정문 생성 중..."
        );
        assert_eq!(messages::statutes_matched(2, 5), "검색된 법령 5개 중 2개에서 발견");
    }

    #[test]
    fn test_task_progress_lifecycle_when_disabled() {
        let manager = Arc::new(ProgressManager::new(true, false));
        let progress = TaskProgress::new(manager, "테스트");

        progress.set_message("테스트 메시지");
        progress.finish_and_clear();
    }
}
