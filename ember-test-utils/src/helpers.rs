use ember_core::{EmberError, StreamItem};
use futures::stream::StreamExt;
use futures::Stream;
use std::fmt::Debug;
use std::time::Duration;
use tokio::time::{sleep, timeout};

const RECEIVE_TIMEOUT: Duration = Duration::from_secs(1);

pub async fn assert_no_element_emitted<S, T>(stream: &mut S, timeout_ms: u64)
where
    S: Stream<Item = T> + Unpin,
{
    tokio::select! {
        _state = stream.next() => {
            panic!(
                "Unexpected item emitted, expected no output."
            );
        }
        _ = sleep(Duration::from_millis(timeout_ms)) => {
        }
    }
}

async fn next_item<S, T>(stream: &mut S) -> Option<StreamItem<T>>
where
    S: Stream<Item = StreamItem<T>> + Unpin,
{
    timeout(RECEIVE_TIMEOUT, stream.next())
        .await
        .expect("timed out waiting for the next item")
}

pub async fn expect_value<S, T>(stream: &mut S, expected: T)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: PartialEq + Debug,
{
    match next_item(stream).await {
        Some(StreamItem::Value(value)) => assert_eq!(value, expected),
        other => panic!("expected value {expected:?}, got {other:?}"),
    }
}

/// Expects the next item to be an error and returns it.
pub async fn expect_error<S, T>(stream: &mut S) -> EmberError
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Debug,
{
    match next_item(stream).await {
        Some(StreamItem::Error(err)) => err,
        other => panic!("expected error, got {other:?}"),
    }
}

pub async fn expect_end<S, T>(stream: &mut S)
where
    S: Stream<Item = StreamItem<T>> + Unpin,
    T: Debug,
{
    let item = next_item(stream).await;
    assert!(item.is_none(), "expected end of stream, got {item:?}");
}
