//! Host messaging substrate between the page, background and popup contexts.
//!
//! Contexts share no memory. Each one owns an [`Inbox`] drained by its own
//! task; callers hold a cloneable [`Mailbox`] and get exactly one reply or
//! one [`MessagingError`] per request.
//!
//! - [`Mailbox::send`] fails with `Unreachable` when the target task is gone
//! - and with `NoResponse` when the target drops the request unanswered
//!
//! [`MessagingError`]: crate::error::MessagingError

pub mod contexts;
mod mailbox;
pub mod messages;
pub mod tabs;

pub use contexts::{spawn_background_context, spawn_page_context};
pub use mailbox::{Envelope, Inbox, Mailbox, Responder, channel};
pub use messages::{AnalysisReply, BackgroundRequest, PageReply, PageRequest};
pub use tabs::{BrowserTabs, Tab, TabId};

/// Context name of the page-side extractor.
pub const PAGE_CONTEXT: &str = "content script";

/// Context name of the background coordinator.
pub const BACKGROUND_CONTEXT: &str = "background script";

/// Queue depth of each context's inbox.
pub const INBOX_CAPACITY: usize = 16;

pub(crate) const UNREACHABLE_MESSAGE: &str =
    "Could not establish connection. Receiving end does not exist.";
