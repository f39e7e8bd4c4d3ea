//! Auto-reconnecting item streams.
//!
//! Long-lived streams from the API (logs, execution output) are cut by the
//! server with a 408 when a request runs too long. [`reconnecting`] hides
//! those cuts: it reopens the stream from the last offset it delivered and
//! keeps yielding as if nothing happened.
//!
//! # Example
//!
//! ```ignore
//! use devbox_core::stream::reconnecting;
//! use futures::StreamExt;
//!
//! let mut logs = reconnecting(
//!     move |offset| client.stream_logs(devbox_id.clone(), offset),
//!     |line: &LogLine| line.offset,
//! );
//! while let Some(line) = logs.next().await {
//!     println!("{}", line?.message);
//! }
//! ```

use crate::error::HttpStatus;
use futures::stream::BoxStream;
use futures::{Stream, StreamExt};
use std::future::Future;

/// Wrap a resumable stream so request timeouts reconnect transparently.
///
/// `creator` opens the underlying stream from a resume offset (`None` = from
/// the start). `get_offset` extracts the resume offset carried by an item;
/// items without one leave the resume point unchanged.
///
/// Behavior:
/// - an error with status 408 drops the current stream and calls `creator`
///   again with the latest offset, without surfacing the error;
/// - any other error is yielded as is and ends the stream;
/// - an error from `creator` itself is yielded as is and ends the stream.
///
/// There is no reconnect limit. Only one underlying stream is open at a time,
/// and dropping the returned stream drops it.
pub fn reconnecting<T, E, S, C, Fut, O>(
    mut creator: C,
    get_offset: O,
) -> BoxStream<'static, Result<T, E>>
where
    T: Send + 'static,
    E: HttpStatus + Send + 'static,
    S: Stream<Item = Result<T, E>> + Send + 'static,
    C: FnMut(Option<u64>) -> Fut + Send + 'static,
    Fut: Future<Output = Result<S, E>> + Send + 'static,
    O: Fn(&T) -> Option<u64> + Send + 'static,
{
    let stream = async_stream::stream! {
        let mut last_offset: Option<u64> = None;
        let mut reconnects: u64 = 0;

        let mut current = match creator(None).await {
            Ok(stream) => Box::pin(stream),
            Err(e) => {
                tracing::debug!(status = ?e.status(), "Failed to open stream");
                yield Err(e);
                return;
            }
        };

        loop {
            let next = current.next().await;
            match next {
                Some(Ok(item)) => {
                    if let Some(offset) = get_offset(&item) {
                        last_offset = Some(offset);
                    }
                    yield Ok(item);
                }
                Some(Err(e)) if e.is_timeout() => {
                    reconnects += 1;
                    tracing::debug!(offset = ?last_offset, reconnects, "Stream timed out, reconnecting");
                    drop(current);

                    current = match creator(last_offset).await {
                        Ok(stream) => Box::pin(stream),
                        Err(e) => {
                            tracing::debug!(
                                offset = ?last_offset,
                                status = ?e.status(),
                                "Failed to reopen stream"
                            );
                            yield Err(e);
                            return;
                        }
                    };
                }
                Some(Err(e)) => {
                    tracing::debug!(status = ?e.status(), reconnects, "Stream failed");
                    yield Err(e);
                    return;
                }
                None => {
                    tracing::trace!(offset = ?last_offset, reconnects, "Stream finished");
                    return;
                }
            }
        }
    };

    Box::pin(stream)
}
