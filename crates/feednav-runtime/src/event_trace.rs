#![forbid(unsafe_code)]

//! Message trace recording and replay for deterministic debugging.
//!
//! Records every [`NavMsg`] the coordinator receives, with nanosecond
//! timestamps relative to the session start, to a JSONL file (gzip by
//! default). [`MsgReplayer`] reads the trace back and feeds the messages into
//! a fresh [`ViewModeCoordinator`] in the recorded order, so a bug report
//! becomes a reproducible test.
//!
//! # Format
//!
//! Each line is a JSON object tagged by `event`. The first line is always a
//! `trace_header`, the last a `trace_summary`; every other line is a `msg`.
//!
//! # Example
//!
//! ```ignore
//! use feednav_runtime::event_trace::{MsgTraceReader, MsgTraceWriter, MsgReplayer};
//!
//! let mut writer = MsgTraceWriter::gzip("nav.jsonl.gz", "pull_bug")?;
//! writer.record(&NavMsg::Retry, 1_000_000)?;
//! writer.finish()?.finish()?;
//!
//! let trace = MsgTraceReader::open("nav.jsonl.gz")?;
//! let mut coordinator = ViewModeCoordinator::new(NavConfig::default(), viewer);
//! MsgReplayer::from_trace(&trace).replay_into(&mut coordinator, Instant::now());
//! ```

use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::coordinator::{NavMsg, ViewModeCoordinator};
use crate::program::Cmd;

/// Current schema version for message trace files.
pub const SCHEMA_VERSION: &str = "feednav-trace-v1";

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

// ---------------------------------------------------------------------------
// Records
// ---------------------------------------------------------------------------

/// A single line of a trace file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "event")]
pub enum TraceRecord {
    #[serde(rename = "trace_header")]
    Header {
        schema_version: String,
        session_name: String,
        viewer: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        seed: Option<u64>,
    },

    #[serde(rename = "msg")]
    Msg { ts_ns: u64, msg: NavMsg },

    #[serde(rename = "trace_summary")]
    Summary {
        total_events: u64,
        total_duration_ns: u64,
    },
}

impl TraceRecord {
    #[must_use]
    pub fn ts_ns(&self) -> Option<u64> {
        match self {
            Self::Msg { ts_ns, .. } => Some(*ts_ns),
            Self::Header { .. } | Self::Summary { .. } => None,
        }
    }
}

// ---------------------------------------------------------------------------
// MsgTraceWriter
// ---------------------------------------------------------------------------

/// Writes trace records to a JSONL sink.
pub struct MsgTraceWriter<W: Write> {
    writer: BufWriter<W>,
    event_count: u64,
    first_ts_ns: Option<u64>,
    last_ts_ns: u64,
}

impl MsgTraceWriter<std::fs::File> {
    /// Uncompressed JSONL file.
    pub fn plain(path: impl AsRef<Path>, session_name: &str, viewer: &str) -> io::Result<Self> {
        let file = std::fs::File::create(path)?;
        Self::from_writer(file, session_name, viewer, None)
    }
}

impl MsgTraceWriter<flate2::write::GzEncoder<std::fs::File>> {
    /// Gzip-compressed JSONL file. Call `finish()` on the returned encoder
    /// after [`MsgTraceWriter::finish`] to write the gzip trailer.
    pub fn gzip(path: impl AsRef<Path>, session_name: &str, viewer: &str) -> io::Result<Self> {
        let file = std::fs::File::create(path)?;
        let encoder = flate2::write::GzEncoder::new(file, flate2::Compression::fast());
        Self::from_writer(encoder, session_name, viewer, None)
    }
}

impl<W: Write> MsgTraceWriter<W> {
    /// Wrap any sink and write the header line.
    pub fn from_writer(
        writer: W,
        session_name: &str,
        viewer: &str,
        seed: Option<u64>,
    ) -> io::Result<Self> {
        let mut w = BufWriter::new(writer);
        let header = TraceRecord::Header {
            schema_version: SCHEMA_VERSION.to_string(),
            session_name: session_name.to_string(),
            viewer: viewer.to_string(),
            seed,
        };
        serde_json::to_writer(&mut w, &header).map_err(io::Error::other)?;
        w.write_all(b"\n")?;

        Ok(Self {
            writer: w,
            event_count: 0,
            first_ts_ns: None,
            last_ts_ns: 0,
        })
    }

    /// Record one message at `ts_ns` since the session start.
    pub fn record(&mut self, msg: &NavMsg, ts_ns: u64) -> io::Result<()> {
        self.write_record(&TraceRecord::Msg {
            ts_ns,
            msg: msg.clone(),
        })
    }

    pub fn write_record(&mut self, record: &TraceRecord) -> io::Result<()> {
        serde_json::to_writer(&mut self.writer, record).map_err(io::Error::other)?;
        self.writer.write_all(b"\n")?;

        if let Some(ts) = record.ts_ns() {
            self.first_ts_ns.get_or_insert(ts);
            self.last_ts_ns = ts;
            self.event_count += 1;
        }
        Ok(())
    }

    #[inline]
    #[must_use]
    pub fn event_count(&self) -> u64 {
        self.event_count
    }

    /// Write the summary line, flush, and hand back the sink.
    pub fn finish(mut self) -> io::Result<W> {
        let total_duration_ns = self
            .first_ts_ns
            .map_or(0, |first| self.last_ts_ns.saturating_sub(first));
        let summary = TraceRecord::Summary {
            total_events: self.event_count,
            total_duration_ns,
        };
        serde_json::to_writer(&mut self.writer, &summary).map_err(io::Error::other)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;

        self.writer
            .into_inner()
            .map_err(|e| io::Error::other(e.to_string()))
    }
}

// ---------------------------------------------------------------------------
// MsgTraceReader
// ---------------------------------------------------------------------------

/// Reads trace files, detecting gzip by its magic bytes.
pub struct MsgTraceReader;

impl MsgTraceReader {
    pub fn open(path: impl AsRef<Path>) -> io::Result<TraceFile> {
        let data = std::fs::read(path.as_ref())?;
        Self::from_bytes(&data)
    }

    pub fn from_bytes(data: &[u8]) -> io::Result<TraceFile> {
        let text = if data.starts_with(&GZIP_MAGIC) {
            let mut decoder = flate2::read::GzDecoder::new(data);
            let mut buf = Vec::new();
            io::Read::read_to_end(&mut decoder, &mut buf)?;
            buf
        } else {
            data.to_vec()
        };

        let mut records = Vec::new();
        for line in BufReader::new(text.as_slice()).lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            let record: TraceRecord = serde_json::from_str(&line).map_err(io::Error::other)?;
            records.push(record);
        }
        Ok(TraceFile { records })
    }
}

/// A parsed trace.
#[derive(Debug, Clone)]
pub struct TraceFile {
    records: Vec<TraceRecord>,
}

impl TraceFile {
    #[inline]
    #[must_use]
    pub fn records(&self) -> &[TraceRecord] {
        &self.records
    }

    #[must_use]
    pub fn header(&self) -> Option<&TraceRecord> {
        self.records
            .first()
            .filter(|r| matches!(r, TraceRecord::Header { .. }))
    }

    #[must_use]
    pub fn summary(&self) -> Option<&TraceRecord> {
        self.records
            .last()
            .filter(|r| matches!(r, TraceRecord::Summary { .. }))
    }

    #[must_use]
    pub fn session_name(&self) -> Option<&str> {
        match self.header()? {
            TraceRecord::Header { session_name, .. } => Some(session_name),
            _ => None,
        }
    }

    #[must_use]
    pub fn viewer(&self) -> Option<&str> {
        match self.header()? {
            TraceRecord::Header { viewer, .. } => Some(viewer),
            _ => None,
        }
    }

    #[must_use]
    pub fn total_events(&self) -> Option<u64> {
        match self.summary()? {
            TraceRecord::Summary { total_events, .. } => Some(*total_events),
            _ => None,
        }
    }

    /// Messages with timestamps, in recorded order.
    #[must_use]
    pub fn messages(&self) -> Vec<(NavMsg, u64)> {
        self.records
            .iter()
            .filter_map(|r| match r {
                TraceRecord::Msg { ts_ns, msg } => Some((msg.clone(), *ts_ns)),
                _ => None,
            })
            .collect()
    }
}

// ---------------------------------------------------------------------------
// MsgReplayer
// ---------------------------------------------------------------------------

/// Feeds recorded messages back in order.
pub struct MsgReplayer {
    messages: Vec<(NavMsg, u64)>,
    position: usize,
}

impl MsgReplayer {
    #[must_use]
    pub fn new(messages: Vec<(NavMsg, u64)>) -> Self {
        Self {
            messages,
            position: 0,
        }
    }

    #[must_use]
    pub fn from_trace(trace: &TraceFile) -> Self {
        Self::new(trace.messages())
    }

    pub fn next_msg(&mut self) -> Option<(NavMsg, u64)> {
        let item = self.messages.get(self.position)?.clone();
        self.position += 1;
        Some(item)
    }

    #[must_use]
    pub fn peek(&self) -> Option<&(NavMsg, u64)> {
        self.messages.get(self.position)
    }

    #[must_use]
    pub fn is_done(&self) -> bool {
        self.position >= self.messages.len()
    }

    #[inline]
    #[must_use]
    pub fn position(&self) -> usize {
        self.position
    }

    #[inline]
    #[must_use]
    pub fn total(&self) -> usize {
        self.messages.len()
    }

    pub fn reset(&mut self) {
        self.position = 0;
    }

    /// Messages with `ts_ns <= until_ns`.
    pub fn advance_until(&mut self, until_ns: u64) -> Vec<NavMsg> {
        let mut out = Vec::new();
        while let Some((_, ts)) = self.peek() {
            if *ts > until_ns {
                break;
            }
            if let Some((msg, _)) = self.next_msg() {
                out.push(msg);
            }
        }
        out
    }

    /// Fast-forward every remaining message through `coordinator`, mapping
    /// timestamps onto `epoch`. Returns the non-empty commands in order.
    pub fn replay_into(&mut self, coordinator: &mut ViewModeCoordinator, epoch: Instant) -> Vec<Cmd> {
        let mut cmds = Vec::new();
        while let Some((msg, ts_ns)) = self.next_msg() {
            let cmd = coordinator.update(msg, epoch + Duration::from_nanos(ts_ns));
            if !cmd.is_none() {
                cmds.push(cmd);
            }
        }
        cmds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::LoadError;
    use feednav_core::{CancelReason, GestureEvent, PointerId};

    fn sample() -> Vec<(NavMsg, u64)> {
        vec![
            (GestureEvent::down(1, 10.0, 20.0).into(), 1_000),
            (GestureEvent::moved(1, 10.0, 80.0).into(), 17_000_000),
            (
                GestureEvent::Cancel {
                    pointer: Some(PointerId(1)),
                    reason: CancelReason::Blur,
                }
                .into(),
                33_000_000,
            ),
            (NavMsg::HeaderActivated, 40_000_000),
            (
                NavMsg::RecallLoaded {
                    ticket: crate::content::LoadTicket(4),
                    result: Err(LoadError::Timeout),
                },
                50_000_000,
            ),
            (NavMsg::Tick, 66_000_000),
        ]
    }

    #[test]
    fn plain_round_trip() {
        let mut buf = Vec::new();
        {
            let mut writer =
                MsgTraceWriter::from_writer(&mut buf, "unit", "viewer-1", Some(7)).expect("writer");
            for (msg, ts) in sample() {
                writer.record(&msg, ts).expect("record");
            }
            assert_eq!(writer.event_count(), 6);
            writer.finish().expect("finish");
        }

        let trace = MsgTraceReader::from_bytes(&buf).expect("read");
        assert_eq!(trace.session_name(), Some("unit"));
        assert_eq!(trace.viewer(), Some("viewer-1"));
        assert_eq!(trace.total_events(), Some(6));
        assert_eq!(trace.messages(), sample());
        assert!(matches!(
            trace.summary(),
            Some(TraceRecord::Summary {
                total_duration_ns: 65_999_000,
                ..
            })
        ));
    }

    #[test]
    fn header_line_carries_schema() {
        let mut buf = Vec::new();
        MsgTraceWriter::from_writer(&mut buf, "s", "v", None)
            .expect("writer")
            .finish()
            .expect("finish");
        let text = String::from_utf8(buf).expect("utf8");
        let first = text.lines().next().expect("header line");
        assert!(first.contains(r#""event":"trace_header""#));
        assert!(first.contains(SCHEMA_VERSION));
        assert!(!first.contains("seed"));
    }

    #[test]
    fn gzip_file_round_trip() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nav.jsonl.gz");
        {
            let mut writer = MsgTraceWriter::gzip(&path, "gz", "v").expect("gzip writer");
            writer.record(&NavMsg::Retry, 5).expect("record");
            let encoder = writer.finish().expect("finish");
            encoder.finish().expect("flush gzip");
        }
        let raw = std::fs::read(&path).expect("read raw");
        assert!(raw.starts_with(&GZIP_MAGIC));

        let trace = MsgTraceReader::open(&path).expect("open");
        assert_eq!(trace.messages(), vec![(NavMsg::Retry, 5)]);
    }

    #[test]
    fn replayer_advance_and_reset() {
        let mut r = MsgReplayer::new(sample());
        assert_eq!(r.total(), 6);
        assert_eq!(r.advance_until(20_000_000).len(), 2);
        assert_eq!(r.position(), 2);
        r.reset();
        assert_eq!(r.position(), 0);
        assert!(!r.is_done());
    }

    #[test]
    fn malformed_line_is_error() {
        let err = MsgTraceReader::from_bytes(b"{\"event\":\"nope\"}\n").expect_err("bad record");
        assert_eq!(err.kind(), io::ErrorKind::Other);
    }
}
