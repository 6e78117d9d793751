// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Intake workflow: the state machine that takes one document from selection
// through analysis, quoting, payment, and the print hand-off.
//
//   Empty -> Analyzing -> Ready -> AwaitingPayment -> Processing
//         -> PaidConfirmation -> (banner timeout) -> Ready
//
// Intents outside their source state are no-ops. Every submission and every
// clear bumps an epoch; asynchronous continuations (analysis, settlement, the
// confirmation banner) compare the epoch they started under and drop their
// result if it moved on. The workflow is the single owner of the current
// document's resource handle and gives it back to the provider whenever the
// record leaves the session.

use std::sync::Arc;

use chrono::Utc;
use druckkasse_bridge::{OpenedDocument, PlatformBridge};
use druckkasse_core::config::IntakePolicy;
use druckkasse_core::error::{DruckkasseError, Result};
use druckkasse_core::pricing::{PricingEngine, PricingQuote};
use druckkasse_core::types::{
    FileRecord, FileView, MediaType, PageEstimate, WorkflowStage, WorkflowState, WorkflowView,
};
use druckkasse_document::integrity::short_hash;
use druckkasse_document::{ByteSource, FileDescriptor, PageEstimator, Validator, hash_bytes};
use parking_lot::Mutex;
use tokio::sync::watch;
use tracing::{debug, info, instrument, warn};

use crate::payment::PaymentProvider;

/// Mutable part of the workflow, guarded by one lock.
#[derive(Debug, Default)]
struct Session {
    state: WorkflowState,
    epoch: u64,
    last_error: Option<String>,
}

/// Bytes and estimate of a document that passed every intake gate.
struct Analysis {
    bytes: Vec<u8>,
    estimate: PageEstimate,
    document_hash: String,
}

struct Inner {
    policy: IntakePolicy,
    validator: Validator,
    estimator: PageEstimator,
    pricing: PricingEngine,
    bridge: Arc<dyn PlatformBridge>,
    payments: Arc<dyn PaymentProvider>,
    session: Mutex<Session>,
    views: watch::Sender<WorkflowView>,
}

impl Inner {
    fn view_of(&self, session: &Session) -> WorkflowView {
        let record = session.state.record();
        WorkflowView {
            stage: session.state.stage(),
            file: record.map(FileRecord::view),
            quote: record.map(|r| self.pricing.quote(r.page_count)),
            last_error: session.last_error.clone(),
        }
    }

    /// Push the current state to subscribers. Called with the session lock
    /// held so views are published in transition order.
    fn publish(&self, session: &Session) {
        let view = self.view_of(session);
        debug!(stage = view.stage.label(), "workflow view published");
        self.views.send_replace(view);
    }
}

/// Returns the session to `Empty` when a submission is dropped while its
/// analysis is still pending, so later submissions are not refused as busy.
struct AnalysisGuard<'a> {
    inner: &'a Inner,
    epoch: u64,
    armed: bool,
}

impl AnalysisGuard<'_> {
    fn disarm(&mut self) {
        self.armed = false;
    }
}

impl Drop for AnalysisGuard<'_> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        let mut session = self.inner.session.lock();
        if session.epoch == self.epoch && matches!(session.state, WorkflowState::Analyzing) {
            info!(epoch = self.epoch, "submission dropped during analysis");
            session.epoch += 1;
            session.state = WorkflowState::Empty;
            self.inner.publish(&session);
        }
    }
}

impl Drop for Inner {
    fn drop(&mut self) {
        if let Some(record) = self.session.get_mut().state.take_record() {
            debug!(url = record.resource_handle.url(), "releasing handle on shutdown");
            self.bridge.revoke(record.resource_handle);
        }
    }
}

/// One kiosk session. Cheap to clone; clones share the session.
///
/// `confirm_payment` spawns onto the current tokio runtime, so the workflow
/// must be driven from inside one.
#[derive(Clone)]
pub struct IntakeWorkflow {
    inner: Arc<Inner>,
}

impl IntakeWorkflow {
    pub fn new(
        policy: IntakePolicy,
        bridge: Arc<dyn PlatformBridge>,
        payments: Arc<dyn PaymentProvider>,
    ) -> Self {
        let (views, _) = watch::channel(WorkflowView::empty());
        Self {
            inner: Arc::new(Inner {
                validator: Validator::from_policy(&policy),
                estimator: PageEstimator::from_policy(&policy),
                pricing: PricingEngine::from_policy(&policy),
                policy,
                bridge,
                payments,
                session: Mutex::new(Session::default()),
                views,
            }),
        }
    }

    // -- Read model --

    pub fn view(&self) -> WorkflowView {
        self.inner.view_of(&self.inner.session.lock())
    }

    pub fn stage(&self) -> WorkflowStage {
        self.inner.session.lock().state.stage()
    }

    /// Quote for the held document, if any.
    pub fn quote(&self) -> Option<PricingQuote> {
        let session = self.inner.session.lock();
        session
            .state
            .record()
            .map(|r| self.inner.pricing.quote(r.page_count))
    }

    /// Receiver that sees a fresh view after every transition.
    pub fn subscribe(&self) -> watch::Receiver<WorkflowView> {
        self.inner.views.subscribe()
    }

    // -- Intake --

    /// Validate, read, and estimate a candidate document.
    ///
    /// A submission while another is being analysed is refused with `Busy`
    /// and changes nothing. Validation rejections return immediately and
    /// leave the session as it was, including any document already held.
    /// Otherwise the held document (if any) is released and the session is
    /// `Analyzing` until the bytes have been read and estimated. A document
    /// over the page ceiling sends the session back to `Empty`; an accepted
    /// one gets a resource handle and the session becomes `Ready`. Dropping
    /// the returned future mid-analysis also returns the session to `Empty`.
    #[instrument(skip_all, fields(name = %descriptor.name, declared = %descriptor.media_type, size_bytes = descriptor.size_bytes))]
    pub async fn submit_file(&self, descriptor: FileDescriptor) -> Result<FileView> {
        let FileDescriptor {
            name,
            media_type: declared,
            size_bytes,
            source,
        } = descriptor;

        let (media_type, epoch, released) = {
            let mut session = self.inner.session.lock();
            if matches!(session.state, WorkflowState::Analyzing) {
                debug!("submission refused while analysing");
                return Err(DruckkasseError::Busy);
            }
            let media_type = match self.inner.validator.validate(&declared, size_bytes) {
                Ok(media_type) => media_type,
                Err(e) => {
                    info!(error = %e, "submission rejected");
                    session.last_error = Some(e.to_string());
                    self.inner.publish(&session);
                    return Err(e);
                }
            };
            session.epoch += 1;
            let released = session.state.take_record();
            session.state = WorkflowState::Analyzing;
            session.last_error = None;
            self.inner.publish(&session);
            (media_type, session.epoch, released)
        };
        if let Some(previous) = released {
            info!(previous = %previous.name, "replacing held document");
            self.inner.bridge.revoke(previous.resource_handle);
        }

        let mut guard = AnalysisGuard {
            inner: self.inner.as_ref(),
            epoch,
            armed: true,
        };
        let outcome = self.analyse(media_type, size_bytes, source).await;

        if self.inner.session.lock().epoch != epoch {
            guard.disarm();
            debug!(epoch, "stale analysis discarded");
            return Err(DruckkasseError::Superseded);
        }

        let accepted = outcome.and_then(|analysis| {
            let handle = self.inner.bridge.create(&name, media_type, analysis.bytes)?;
            Ok(FileRecord {
                name,
                resource_handle: handle,
                media_type,
                size_bytes,
                page_count: analysis.estimate.page_count,
                document_hash: analysis.document_hash,
                estimate: analysis.estimate,
                accepted_at: Utc::now(),
            })
        });

        let mut session = self.inner.session.lock();
        guard.disarm();
        if session.epoch != epoch {
            drop(session);
            debug!(epoch, "selection changed while the handle was created");
            if let Ok(record) = accepted {
                self.inner.bridge.revoke(record.resource_handle);
            }
            return Err(DruckkasseError::Superseded);
        }

        match accepted {
            Ok(record) => {
                info!(
                    pages = record.page_count,
                    hash = short_hash(&record.document_hash),
                    url = record.resource_handle.url(),
                    "document ready"
                );
                let view = record.view();
                session.state = WorkflowState::Ready(record);
                session.last_error = None;
                self.inner.publish(&session);
                Ok(view)
            }
            Err(e) => {
                if e.is_rejection() {
                    info!(error = %e, "analysis rejected document");
                } else {
                    warn!(error = %e, "analysis failed");
                }
                session.state = WorkflowState::Empty;
                session.last_error = Some(e.to_string());
                self.inner.publish(&session);
                Err(e)
            }
        }
    }

    /// Read the bytes and run every gate that needs them.
    async fn analyse(
        &self,
        media_type: MediaType,
        declared_size: u64,
        source: ByteSource,
    ) -> Result<Analysis> {
        let bytes = source.read_all().await?;
        let actual_size = bytes.len() as u64;
        if actual_size != declared_size {
            debug!(declared_size, actual_size, "declared size differs from content");
        }
        self.inner.validator.check_size(actual_size)?;

        let estimate = self
            .inner
            .estimator
            .estimate(media_type, Some(&bytes), declared_size.max(actual_size));
        let max_pages = self.inner.policy.max_pages;
        if estimate.page_count > max_pages {
            return Err(DruckkasseError::OversizedDocument {
                pages: estimate.page_count,
                max_pages,
            });
        }

        let document_hash = hash_bytes(&bytes);
        Ok(Analysis {
            bytes,
            estimate,
            document_hash,
        })
    }

    /// Drop the held document and release its handle. Also abandons an
    /// analysis or settlement in flight. Returns whether anything changed.
    pub fn clear_selection(&self) -> bool {
        let released = {
            let mut session = self.inner.session.lock();
            if matches!(session.state, WorkflowState::Empty) {
                return false;
            }
            session.epoch += 1;
            let released = session.state.take_record();
            session.state = WorkflowState::Empty;
            session.last_error = None;
            self.inner.publish(&session);
            released
        };
        match released {
            Some(record) => {
                info!(name = %record.name, "selection cleared");
                self.inner.bridge.revoke(record.resource_handle);
            }
            None => info!("analysis abandoned"),
        }
        true
    }

    /// Open the held document in the preview collaborator. Nothing held is a
    /// no-op.
    pub fn preview(&self) -> Result<()> {
        let target = self
            .inner
            .session
            .lock()
            .state
            .record()
            .map(|record| record.resource_handle.to_ref());
        match target {
            Some(target) => self.inner.bridge.open_preview(&target),
            None => Ok(()),
        }
    }

    // -- Payment --

    /// `Ready -> AwaitingPayment`. Returns the quote the user is asked to pay.
    pub fn request_print(&self) -> Option<PricingQuote> {
        let mut session = self.inner.session.lock();
        match std::mem::take(&mut session.state) {
            WorkflowState::Ready(record) => {
                let quote = self.inner.pricing.quote(record.page_count);
                info!(%quote, "awaiting payment");
                session.state = WorkflowState::AwaitingPayment(record);
                session.last_error = None;
                self.inner.publish(&session);
                Some(quote)
            }
            other => {
                session.state = other;
                None
            }
        }
    }

    /// `AwaitingPayment -> Ready`.
    pub fn cancel_payment(&self) -> bool {
        let mut session = self.inner.session.lock();
        match std::mem::take(&mut session.state) {
            WorkflowState::AwaitingPayment(record) => {
                info!("payment cancelled");
                session.state = WorkflowState::Ready(record);
                self.inner.publish(&session);
                true
            }
            other => {
                session.state = other;
                false
            }
        }
    }

    /// `AwaitingPayment -> Processing`, then settle in the background.
    pub fn confirm_payment(&self) -> bool {
        let (epoch, quote) = {
            let mut session = self.inner.session.lock();
            match std::mem::take(&mut session.state) {
                WorkflowState::AwaitingPayment(record) => {
                    let quote = self.inner.pricing.quote(record.page_count);
                    session.state = WorkflowState::Processing(record);
                    session.last_error = None;
                    self.inner.publish(&session);
                    (session.epoch, quote)
                }
                other => {
                    session.state = other;
                    return false;
                }
            }
        };
        info!(%quote, "payment confirmed, settling");
        let this = self.clone();
        tokio::spawn(async move { this.settle(epoch, quote).await });
        true
    }

    async fn settle(self, epoch: u64, quote: PricingQuote) {
        let outcome = self.inner.payments.settle(&quote).await;

        let target = {
            let mut session = self.inner.session.lock();
            if session.epoch != epoch {
                debug!(epoch, "stale settlement discarded");
                return;
            }
            let record = match std::mem::take(&mut session.state) {
                WorkflowState::Processing(record) => record,
                other => {
                    session.state = other;
                    return;
                }
            };
            match outcome {
                Err(e) => {
                    warn!(error = %e, "settlement failed");
                    session.state = WorkflowState::AwaitingPayment(record);
                    session.last_error = Some(e.to_string());
                    self.inner.publish(&session);
                    return;
                }
                Ok(receipt) => {
                    info!(receipt = %receipt.id, amount = %receipt.amount, "payment settled");
                    let target = record.resource_handle.to_ref();
                    session.state = WorkflowState::PaidConfirmation(record);
                    self.inner.publish(&session);
                    target
                }
            }
        };

        self.spawn_banner_timeout(epoch);

        match self.inner.bridge.open(&target) {
            Ok(document) => self.print_when_loaded(epoch, document).await,
            Err(e) => warn!(error = %e, "print window could not be opened"),
        }
    }

    /// Print once the window reports the document loaded, unless the
    /// selection changed in the meantime. Failures are logged and never
    /// change the session.
    async fn print_when_loaded(&self, epoch: u64, mut document: OpenedDocument) {
        let timeout = self.inner.policy.print_load_timeout();
        let loaded = tokio::time::timeout(timeout, &mut document.loaded).await;
        match loaded {
            Ok(Ok(())) => {
                if self.inner.session.lock().epoch != epoch {
                    debug!(url = %document.url, "selection changed before printing");
                    return;
                }
                let url = document.url.clone();
                let bridge = Arc::clone(&self.inner.bridge);
                let printed = tokio::task::spawn_blocking(move || bridge.print(document)).await;
                match printed {
                    Ok(Ok(())) => info!(%url, "print dialog opened"),
                    Ok(Err(e)) => warn!(error = %e, %url, "print failed"),
                    Err(e) => warn!(error = %e, %url, "print task failed"),
                }
            }
            Ok(Err(_)) => warn!(url = %document.url, "print window closed before loading"),
            Err(_) => warn!(url = %document.url, ?timeout, "print window did not load in time"),
        }
    }

    /// `PaidConfirmation -> Ready` after the confirmation banner has shown.
    fn spawn_banner_timeout(&self, epoch: u64) {
        let this = self.clone();
        let display = self.inner.policy.confirmation_display();
        tokio::spawn(async move {
            tokio::time::sleep(display).await;
            let mut session = this.inner.session.lock();
            if session.epoch != epoch {
                return;
            }
            match std::mem::take(&mut session.state) {
                WorkflowState::PaidConfirmation(record) => {
                    debug!("confirmation banner dismissed");
                    session.state = WorkflowState::Ready(record);
                    this.inner.publish(&session);
                }
                other => session.state = other,
            }
        });
    }
}
