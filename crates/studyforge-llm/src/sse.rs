use anyhow::Result;
use futures::{Stream, StreamExt};
use std::collections::VecDeque;
use std::fmt::Display;

use crate::streaming::{EventStream, StreamEvent};

/// Byte buffer that hands out complete lines.
/// Bytes are drained as lines are taken, so partial lines survive across chunks.
pub struct LineBuffer {
    buffer: VecDeque<u8>,
}

impl LineBuffer {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: VecDeque::with_capacity(capacity),
        }
    }

    pub fn extend(&mut self, bytes: &[u8]) {
        self.buffer.extend(bytes);
    }

    /// Next complete line with surrounding whitespace (and `\r`) trimmed
    pub fn next_line(&mut self) -> Option<Result<String>> {
        let newline_pos = self.buffer.iter().position(|&b| b == b'\n')?;
        let line_bytes: Vec<u8> = self.buffer.drain(..=newline_pos).collect();
        Some(decode(line_bytes))
    }

    /// Whatever is left once the body ends without a trailing newline
    pub fn take_remainder(&mut self) -> Option<Result<String>> {
        if self.buffer.is_empty() {
            return None;
        }
        let rest: Vec<u8> = self.buffer.drain(..).collect();
        Some(decode(rest))
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

fn decode(bytes: Vec<u8>) -> Result<String> {
    String::from_utf8(bytes)
        .map(|s| s.trim().to_string())
        .map_err(|e| anyhow::anyhow!("Invalid UTF-8 in event stream: {}", e))
}

/// Strategy for turning SSE `data:` payloads into events
pub trait SseLineParser: Send {
    fn parse_data_line(&self, data: &str) -> Result<Vec<StreamEvent>>;

    fn is_done_marker(&self, data: &str) -> bool {
        data == "[DONE]"
    }
}

/// Parse an SSE byte stream into generation events.
///
/// Always terminates with exactly one `Done` event unless the parser already
/// produced one.
pub fn parse_sse_bytes<S, B, E, P>(byte_stream: S, parser: P) -> EventStream
where
    S: Stream<Item = std::result::Result<B, E>> + Send + 'static,
    B: AsRef<[u8]> + Send + 'static,
    E: Display + Send + 'static,
    P: SseLineParser + 'static,
{
    Box::pin(async_stream::stream! {
        let mut byte_chunks = Box::pin(byte_stream);
        let mut buffer = LineBuffer::with_capacity(4096);
        let mut done = false;

        'outer: while let Some(chunk_result) = byte_chunks.next().await {
            match chunk_result {
                Ok(bytes) => {
                    buffer.extend(bytes.as_ref());

                    while let Some(line_result) = buffer.next_line() {
                        match line_result {
                            Ok(line) => {
                                for event in handle_line(&parser, &line) {
                                    if matches!(event, Ok(StreamEvent::Done { .. })) {
                                        done = true;
                                        yield event;
                                        break 'outer;
                                    }
                                    yield event;
                                }
                            }
                            Err(e) => yield Err(e),
                        }
                    }
                }
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {}", e));
                    done = true;
                    break;
                }
            }
        }

        if !done {
            if let Some(Ok(line)) = buffer.take_remainder() {
                for event in handle_line(&parser, &line) {
                    if matches!(event, Ok(StreamEvent::Done { .. })) {
                        done = true;
                    }
                    yield event;
                }
            }
        }

        if !done {
            yield Ok(StreamEvent::Done { finish_reason: None });
        }
    })
}

fn handle_line<P: SseLineParser>(parser: &P, line: &str) -> Vec<Result<StreamEvent>> {
    let Some(data) = line.strip_prefix("data:").map(str::trim_start) else {
        return Vec::new();
    };

    if parser.is_done_marker(data) {
        return vec![Ok(StreamEvent::Done { finish_reason: None })];
    }

    match parser.parse_data_line(data) {
        Ok(events) => events.into_iter().map(Ok).collect(),
        Err(e) => vec![Err(e)],
    }
}

/// Parse an HTTP response body as SSE
pub fn parse_sse_stream<P: SseLineParser + 'static>(
    response: reqwest::Response,
    parser: P,
) -> EventStream {
    parse_sse_bytes(response.bytes_stream(), parser)
}
