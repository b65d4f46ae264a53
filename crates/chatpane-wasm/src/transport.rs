use async_trait::async_trait;
use chatpane_core::{parse_reply, ChatError, ChatReply, ChatRequest, ChatTransport, Result};
use futures::future::{select, Either};
use gloo_net::http::{Request, Response};
use gloo_timers::future::TimeoutFuture;
use std::future::Future;
use web_sys::AbortController;

/// Sends chat requests with `fetch`
pub struct HttpTransport {
    timeout_ms: Option<u32>,
}

impl HttpTransport {
    pub fn new(timeout_ms: Option<u32>) -> Self {
        Self { timeout_ms }
    }

    async fn fetch(&self, request: &ChatRequest) -> Result<Response> {
        let abort = AbortController::new()
            .map_err(|e| ChatError::Transport(format!("Failed to create AbortController: {:?}", e)))?;
        let signal = abort.signal();
        let pending = request
            .headers
            .iter()
            .fold(Request::post(&request.url), |builder, (name, value)| builder.header(name, value))
            .abort_signal(Some(&signal))
            .body(request.body.clone())
            .map_err(|e| ChatError::Transport(format!("Failed to build request: {}", e)))?;

        with_timeout(pending.send(), self.timeout_ms, &abort)
            .await?
            .map_err(|e| ChatError::Transport(format!("Request failed: {}", e)))
    }
}

/// Await `future`, giving up with [`ChatError::Timeout`] after `timeout_ms`.
///
/// Dropping a `fetch` future does not cancel the request, so `abort` is
/// signalled when the timeout wins.
pub async fn with_timeout<F: Future>(
    future: F,
    timeout_ms: Option<u32>,
    abort: &AbortController,
) -> Result<F::Output> {
    let Some(ms) = timeout_ms else {
        return Ok(future.await);
    };

    match select(Box::pin(future), TimeoutFuture::new(ms)).await {
        Either::Left((output, _)) => Ok(output),
        Either::Right(_) => {
            log::warn!("No reply after {}ms, aborting request", ms);
            abort.abort();
            Err(ChatError::Timeout(ms))
        }
    }
}

#[async_trait(?Send)]
impl ChatTransport for HttpTransport {
    async fn send(&self, request: &ChatRequest) -> Result<ChatReply> {
        let response = self.fetch(request).await?;

        if !response.ok() {
            return Err(ChatError::Status {
                status: response.status(),
                status_text: response.status_text(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| ChatError::MalformedReply(format!("Failed to read body: {}", e)))?;
        log::debug!("Received reply: {} bytes", body.len());

        parse_reply(&body)
    }
}
