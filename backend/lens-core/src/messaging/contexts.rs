//! Listener tasks for the page and background contexts.

use crate::coordinator::Analyzer;
use crate::credential::CredentialStore;
use crate::extractor::{DocumentView, Extractor};
use crate::messaging::mailbox::{Mailbox, channel};
use crate::messaging::messages::{AnalysisReply, BackgroundRequest, PageReply, PageRequest};
use crate::messaging::{BACKGROUND_CONTEXT, INBOX_CAPACITY, PAGE_CONTEXT};

use log::{error, info, warn};

/// Start the page context for one tab.
///
/// `load_document` is called on every request so each extraction reads the
/// page as it is at that moment.
pub fn spawn_page_context<F, D>(load_document: F, extractor: Extractor) -> Mailbox<PageRequest, PageReply>
where
    F: Fn() -> D + Send + 'static,
    D: DocumentView + 'static,
{
    let (mailbox, mut inbox) = channel(PAGE_CONTEXT, INBOX_CAPACITY);

    tokio::spawn(async move {
        info!("Page context loaded and ready");

        while let Some(envelope) = inbox.recv().await {
            let reply = match envelope.message {
                PageRequest::GetCode => {
                    info!("Page context: code requested ({})", envelope.request_id);
                    let document = load_document();
                    PageReply::from(extractor.extract(&document))
                }
            };

            if let Some(reason) = &reply.error {
                error!("Page context: {}", reason);
            }

            if !envelope.responder.reply(reply) {
                warn!("Requester for {} stopped waiting", envelope.request_id);
            }
        }

        info!("Page context closed");
    });

    mailbox
}

/// Start the background context around `analyzer`.
///
/// Requests are handled one at a time, in arrival order.
pub fn spawn_background_context<S: CredentialStore>(
    analyzer: Analyzer<S>,
) -> Mailbox<BackgroundRequest, AnalysisReply> {
    let (mailbox, mut inbox) = channel(BACKGROUND_CONTEXT, INBOX_CAPACITY);

    tokio::spawn(async move {
        info!("Background context listening");

        while let Some(envelope) = inbox.recv().await {
            let reply = match envelope.message {
                BackgroundRequest::AnalyzeCode { code } => {
                    info!(
                        "Background context: analysis requested ({})",
                        envelope.request_id
                    );
                    let result = analyzer.analyze(&code).await;
                    if let Err(e) = &result {
                        error!("Analysis failed [{}]: {}", e.error_category(), e);
                    }
                    AnalysisReply::from(result)
                }
            };

            if !envelope.responder.reply(reply) {
                warn!("Requester for {} stopped waiting", envelope.request_id);
            }
        }

        info!("Background context closed");
    });

    mailbox
}
