//! The host's tab table.

use crate::error::MessagingError;
use crate::messaging::{PAGE_CONTEXT, UNREACHABLE_MESSAGE};
use crate::messaging::mailbox::Mailbox;
use crate::messaging::messages::{PageReply, PageRequest};

use log::debug;

pub type TabId = u32;

/// What the host reports about a tab.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Tab {
    pub id: Option<TabId>,
    pub url: Option<String>,
}

impl Tab {
    pub fn new(id: TabId, url: impl Into<String>) -> Self {
        Self {
            id: Some(id),
            url: Some(url.into()),
        }
    }
}

struct TabEntry {
    tab: Tab,
    page: Option<Mailbox<PageRequest, PageReply>>,
}

/// Open tabs, the active one, and a route to each tab's page context.
#[derive(Default)]
pub struct BrowserTabs {
    entries: Vec<TabEntry>,
    active: Option<usize>,
}

impl BrowserTabs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open a tab and make it active. `page` is `None` when no page context
    /// was injected (e.g. a browser-internal page).
    pub fn open(&mut self, tab: Tab, page: Option<Mailbox<PageRequest, PageReply>>) {
        self.entries.push(TabEntry { tab, page });
        self.active = Some(self.entries.len() - 1);
    }

    pub fn active_tab(&self) -> Option<&Tab> {
        self.active
            .and_then(|index| self.entries.get(index))
            .map(|entry| &entry.tab)
    }

    /// Deliver `request` to the page context of tab `tab_id`.
    ///
    /// # Errors
    ///
    /// Returns [`MessagingError::Unreachable`] when the tab has no page
    /// context, plus whatever [`Mailbox::send`] reports.
    pub async fn send_to_tab(
        &self,
        tab_id: TabId,
        request: PageRequest,
    ) -> Result<PageReply, MessagingError> {
        let page = self
            .entries
            .iter()
            .find(|entry| entry.tab.id == Some(tab_id))
            .and_then(|entry| entry.page.as_ref());

        match page {
            Some(mailbox) => {
                debug!("Routing {:?} to tab {}", request, tab_id);
                mailbox.send(request).await
            }
            None => Err(MessagingError::unreachable(PAGE_CONTEXT, UNREACHABLE_MESSAGE)),
        }
    }
}
