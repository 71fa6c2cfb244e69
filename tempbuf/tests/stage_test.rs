use std::io::Cursor;
use tempbuf::{
    stage_from, stage_with, BufferOptions, StageError, StdIo, TempBuffer, TempBufferError, Whence,
};

/// Reader that hands out at most `step` bytes per call
struct Trickle<'a> {
    data: &'a [u8],
    step: usize,
}

impl embedded_io::ErrorType for Trickle<'_> {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Read for Trickle<'_> {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        let n = self.step.min(buf.len()).min(self.data.len());
        buf[..n].copy_from_slice(&self.data[..n]);
        self.data = &self.data[n..];
        Ok(n)
    }
}

struct FailingReader;

impl embedded_io::ErrorType for FailingReader {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Read for FailingReader {
    fn read(&mut self, _buf: &mut [u8]) -> Result<usize, Self::Error> {
        Err(embedded_io::ErrorKind::PermissionDenied)
    }
}

/// Sink that accepts `budget` bytes, then fails
struct LimitedSink {
    data: Vec<u8>,
    budget: usize,
}

impl embedded_io::ErrorType for LimitedSink {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for LimitedSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        if self.budget == 0 {
            return Err(embedded_io::ErrorKind::BrokenPipe);
        }
        let n = self.budget.min(buf.len());
        self.data.extend_from_slice(&buf[..n]);
        self.budget -= n;
        Ok(n)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Sink that records the size of every write
#[derive(Default)]
struct RecordingSink {
    data: Vec<u8>,
    writes: Vec<usize>,
}

impl embedded_io::ErrorType for RecordingSink {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for RecordingSink {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        self.data.extend_from_slice(buf);
        self.writes.push(buf.len());
        Ok(buf.len())
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Sink that accepts nothing but does not fail
struct StuckSink;

impl embedded_io::ErrorType for StuckSink {
    type Error = embedded_io::ErrorKind;
}

impl embedded_io::Write for StuckSink {
    fn write(&mut self, _buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(0)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[test]
fn stage_collects_all_chunks() {
    let source = Trickle {
        data: b"first\nchunk\nthird",
        step: 4,
    };

    let buffer = stage_from(source).expect("Should stage");

    assert_eq!(buffer.bytes(), b"first\nchunk\nthird");
    assert_eq!(buffer.position(), buffer.len());
}

#[test]
fn stage_with_small_chunk_size() {
    let options = BufferOptions {
        chunk_size: 3,
        ..BufferOptions::default()
    };
    let data: Vec<u8> = (0..=255).collect();

    let buffer = stage_with(&data[..], &options).expect("Should stage");

    assert_eq!(buffer.bytes(), &data[..]);
}

#[test]
fn stage_empty_source() {
    let mut buffer = stage_from(&b""[..]).expect("Should stage");

    assert!(buffer.is_empty());
    let mut sink = TempBuffer::new();
    assert_eq!(buffer.replay_into(&mut sink), Ok(0));
    assert!(sink.is_empty());
}

#[test]
fn stage_reports_source_error() {
    let err = stage_from(FailingReader).expect_err("Should fail");

    assert_eq!(err, StageError::Source(embedded_io::ErrorKind::PermissionDenied));
    assert_eq!(err.to_string(), "Failed to read source: permission denied");
}

#[test]
fn stage_from_std_reader() {
    let buffer = stage_from(StdIo(Cursor::new(b"std source".to_vec()))).expect("Should stage");

    assert_eq!(buffer.bytes(), b"std source");
}

#[test]
fn replay_repeats_from_start_regardless_of_cursor() {
    let mut buffer = TempBuffer::new();
    buffer.write(b"retry me");
    buffer.seek(3, Whence::Start).unwrap();

    let mut sink = TempBuffer::new();
    assert_eq!(buffer.replay_into(&mut sink), Ok(8));
    assert_eq!(buffer.replay_into(&mut sink), Ok(8));

    assert_eq!(sink.bytes(), b"retry meretry me");
    assert_eq!(buffer.position(), buffer.len());
}

#[test]
fn replay_large_buffer_into_std_writer() {
    let data: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
    let mut buffer = stage_from(&data[..]).expect("Should stage");

    let mut sink = StdIo(Vec::new());
    assert_eq!(buffer.replay_into(&mut sink), Ok(5000));

    assert_eq!(sink.into_inner(), data);
}

#[test]
fn replay_reports_sink_error() {
    let mut buffer = TempBuffer::new();
    buffer.write(b"0123456789");
    let mut sink = LimitedSink {
        data: Vec::new(),
        budget: 4,
    };

    let err = buffer.replay_into(&mut sink).expect_err("Should fail");

    assert_eq!(err, StageError::Sink(embedded_io::ErrorKind::BrokenPipe));
    assert_eq!(sink.data, b"0123");
}

#[test]
fn buffer_error_converts() {
    let err: StageError = TempBufferError::EndOfStream.into();

    assert_eq!(err.to_string(), "Buffer error: End of stream");
}

#[test]
fn replay_into_full_std_slice_is_sink_error() {
    let mut buffer = TempBuffer::new();
    buffer.write(b"0123456789");
    let mut dest = [0u8; 4];

    let err = buffer
        .replay_into(&mut StdIo(&mut dest[..]))
        .expect_err("Should fail on a full sink");

    assert_eq!(err, StageError::Sink(embedded_io::ErrorKind::WriteZero));
    assert_eq!(err.to_string(), "Failed to write sink: write zero");
    assert_eq!(&dest, b"0123");
}

#[test]
fn replay_into_sink_accepting_nothing_is_sink_error() {
    let mut buffer = TempBuffer::new();
    buffer.write(b"abc");

    assert_eq!(
        buffer.replay_into(&mut StuckSink),
        Err(StageError::Sink(embedded_io::ErrorKind::WriteZero))
    );
}

#[test]
fn replay_uses_configured_chunk_size() {
    let options = BufferOptions {
        chunk_size: 4,
        ..BufferOptions::default()
    };
    let mut buffer = stage_with(&b"0123456789"[..], &options).expect("Should stage");
    let mut sink = RecordingSink::default();

    assert_eq!(buffer.replay_into(&mut sink), Ok(10));

    assert_eq!(sink.data, b"0123456789");
    assert_eq!(sink.writes, vec![4, 4, 2]);
}

#[test]
fn replay_default_chunk_size_is_capped_by_len() {
    let data: Vec<u8> = (0..3000u32).map(|i| (i % 251) as u8).collect();
    let mut buffer = stage_from(&data[..]).expect("Should stage");
    let mut sink = RecordingSink::default();

    assert_eq!(buffer.replay_into(&mut sink), Ok(3000));

    assert_eq!(sink.writes, vec![1024, 1024, 952]);
}
