// tests/trace_reader.rs
use std::io::Write;

use oosim_rust::trace::reader::TraceReader;
use oosim_rust::trace::{DecodedInstruction, TraceSource, VecTraceSource};
use oosim_rust::SimulatorError;

#[test]
fn reads_trace_file_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "00400100 1 5 -1 -1").unwrap();
    writeln!(file, "00400104 2 6 5 -1").unwrap();
    writeln!(file).unwrap();
    writeln!(file, "0x00400108 -1 -1 6 5").unwrap();
    file.flush().unwrap();

    let mut reader = TraceReader::open(file.path()).unwrap();
    let mut records = Vec::new();
    while let Some(record) = reader.next_instruction().unwrap() {
        records.push(record);
    }

    assert_eq!(records.len(), 3);
    assert_eq!(records[0].address, 0x0040_0100);
    assert_eq!(records[0].dest_reg, 5);
    assert_eq!(records[1].op_code, 2);
    assert_eq!(records[2].op_code, -1);
    assert_eq!(records[2].src_reg, [6, 5]);
}

#[test]
fn malformed_line_number_is_reported() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "00400100 1 5 -1 -1").unwrap();
    writeln!(file, "not a record").unwrap();
    file.flush().unwrap();

    let mut reader = TraceReader::open(file.path()).unwrap();
    assert!(reader.next_instruction().unwrap().is_some());
    match reader.next_instruction() {
        Err(SimulatorError::MalformedTraceRecord { line, content }) => {
            assert_eq!(line, 2);
            assert_eq!(content, "not a record");
        },
        other => panic!("expected malformed record error, got {:?}", other),
    }
}

#[test]
fn missing_file_reports_io_error() {
    match TraceReader::open("/nonexistent/trace.txt") {
        Err(SimulatorError::IoError(_)) => {},
        other => panic!("expected I/O error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn vec_source_preserves_order() {
    let records: Vec<DecodedInstruction> = (0..4)
        .map(|i| DecodedInstruction {
            address: 0x100 + i,
            op_code: 1,
            dest_reg: i as i32,
            src_reg: [-1, -1],
        })
        .collect();

    let mut source = VecTraceSource::new(records.clone());
    for expected in &records {
        assert_eq!(source.next_instruction().unwrap().as_ref(), Some(expected));
    }
    assert_eq!(source.next_instruction().unwrap(), None);
}
