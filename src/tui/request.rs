//! In-flight request bookkeeping
//!
//! Each component that issues network commands owns one `RequestSlot` per
//! kind of request. Starting a request cancels the one before it, results are
//! accepted only for the latest sequence number, and dropping the slot (the
//! component unmounting) cancels whatever is still outstanding.

use tokio_util::sync::CancellationToken;

#[derive(Debug, Default)]
pub struct RequestSlot {
    seq: u64,
    token: Option<CancellationToken>,
}

impl RequestSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a new request, cancelling any outstanding one
    pub fn start(&mut self) -> (u64, CancellationToken) {
        self.cancel();
        self.seq += 1;
        let token = CancellationToken::new();
        self.token = Some(token.clone());
        (self.seq, token)
    }

    /// Cancel the outstanding request, if any
    pub fn cancel(&mut self) {
        if let Some(token) = self.token.take() {
            token.cancel();
        }
    }

    /// Accept a result. Returns false for stale or cancelled requests.
    pub fn finish(&mut self, seq: u64) -> bool {
        if self.token.is_some() && seq == self.seq {
            self.token = None;
            true
        } else {
            false
        }
    }

    pub fn is_pending(&self) -> bool {
        self.token.is_some()
    }
}

impl Drop for RequestSlot {
    fn drop(&mut self) {
        self.cancel();
    }
}
