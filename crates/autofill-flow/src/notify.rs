use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::SharedPage;
use crate::ports::Notifier;

pub const TOAST_CLASS: &str = "autofiller-toast";

pub fn toast_message(filled: usize) -> String {
    let plural = if filled == 1 { "" } else { "s" };
    format!("Autofiller: Filled {filled} field{plural}")
}

/// Renders a transient status node into the page body and removes it once
/// the duration has passed.
pub struct ToastNotifier {
    page: SharedPage,
    duration: Duration,
}

impl ToastNotifier {
    pub fn new(page: SharedPage, duration: Duration) -> Self {
        Self { page, duration }
    }
}

#[async_trait]
impl Notifier for ToastNotifier {
    async fn notify(&self, filled: usize) {
        let toast = {
            let mut doc = self.page.lock();
            let body = doc.body();
            let created = doc
                .create_element(body, "div", &[("class", TOAST_CLASS), ("role", "status")])
                .and_then(|toast| doc.append_text(toast, &toast_message(filled)).map(|_| toast));
            match created {
                Ok(toast) => toast,
                Err(err) => {
                    warn!(error = %err, "could not render toast");
                    return;
                }
            }
        };
        let page = self.page.clone();
        let duration = self.duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            if let Err(err) = page.lock().remove(toast) {
                debug!(error = %err, "toast already gone");
            }
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use page_dom::Document;
    use parking_lot::Mutex;
    use std::sync::Arc;

    #[test]
    fn message_pluralizes() {
        assert_eq!(toast_message(1), "Autofiller: Filled 1 field");
        assert_eq!(toast_message(4), "Autofiller: Filled 4 fields");
    }

    #[tokio::test(start_paused = true)]
    async fn toast_dismisses_itself() {
        let page: SharedPage = Arc::new(Mutex::new(Document::parse_html("<p>form</p>")));
        let notifier = ToastNotifier::new(page.clone(), Duration::from_millis(3000));
        notifier.notify(2).await;

        let find = |page: &SharedPage| {
            let doc = page.lock();
            doc.find(doc.root(), |doc, id| doc.class_contains(id, TOAST_CLASS))
                .map(|toast| doc.text_content(toast))
        };
        assert_eq!(find(&page).as_deref(), Some("Autofiller: Filled 2 fields"));

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(find(&page).is_some());
        tokio::time::sleep(Duration::from_millis(2)).await;
        assert!(find(&page).is_none());
    }
}
