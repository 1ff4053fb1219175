//! Integration tests for the print client, against a mock TCP printer.

use std::io::Read;
use std::net::{SocketAddr, TcpListener};
use std::thread;
use std::time::Duration;

use shiplabel_core::{
    BatchComposer, LabelRenderer, PolicyTable, QuantityResolver, RecordSource, Selection,
    sample_record,
};
use shiplabel_print_client::{
    DispatchOutcome, Dispatcher, PrintError, Printer, PrinterConfig, PrinterTarget, TcpPrinter,
};

// ── Mock printer server ─────────────────────────────────────────────────

/// A mock printer on a background thread. It accepts one connection, reads
/// until the client closes, then reports what arrived and whether a second
/// connection was attempted.
struct MockPrinterServer {
    addr: SocketAddr,
    handle: Option<thread::JoinHandle<(Vec<u8>, bool)>>,
}

impl MockPrinterServer {
    fn start() -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = thread::spawn(move || {
            let (mut stream, _) = listener.accept().unwrap();
            stream
                .set_read_timeout(Some(Duration::from_secs(5)))
                .unwrap();

            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                match stream.read(&mut buf) {
                    Ok(0) | Err(_) => break,
                    Ok(n) => received.extend_from_slice(&buf[..n]),
                }
            }

            listener.set_nonblocking(true).unwrap();
            let second = listener.accept().is_ok();
            (received, second)
        });

        Self {
            addr,
            handle: Some(handle),
        }
    }

    fn target(&self) -> PrinterTarget {
        PrinterTarget::new("Mock", self.addr.to_string())
    }

    /// Wait for the server thread; returns the bytes and the second-connection flag.
    fn finish(mut self) -> (Vec<u8>, bool) {
        self.handle.take().unwrap().join().unwrap()
    }
}

fn fast_config() -> PrinterConfig {
    PrinterConfig::with_timeout(Duration::from_secs(2))
}

/// An address on which nothing is listening.
fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    addr
}

// ── Tests ───────────────────────────────────────────────────────────────

#[test]
fn tcp_printer_delivers_bytes() {
    let server = MockPrinterServer::start();
    let addr = server.addr;

    let mut printer = TcpPrinter::connect(&addr.to_string(), &fast_config()).unwrap();
    assert_eq!(printer.remote_addr(), addr);
    printer.send_raw(b"^XA^FDhello^FS^XZ").unwrap();
    printer.finish().unwrap();
    drop(printer);

    let (received, _) = server.finish();
    assert_eq!(received, b"^XA^FDhello^FS^XZ");
}

#[test]
fn composed_job_arrives_in_one_connection() {
    let records = vec![sample_record()];
    let policies = PolicyTable::default();
    let composer = BatchComposer::new(
        QuantityResolver::new(&policies),
        LabelRenderer::new(&policies),
    );
    let mut selection = Selection::with_keys(["0"]);
    selection.set_override("0", "3");
    let job = composer.compose(&records, RecordSource::RouteBatch, &selection);
    assert_eq!(job.label_count(), 3);

    let server = MockPrinterServer::start();
    let target = server.target();
    let outcome = Dispatcher::tcp(fast_config())
        .dispatch(&job, &target)
        .unwrap();
    assert_eq!(
        outcome,
        DispatchOutcome::Sent {
            labels: 3,
            bytes: job.as_bytes().len()
        }
    );

    let (received, second_connection) = server.finish();
    assert_eq!(received, job.as_bytes());
    assert!(!second_connection);
    let text = String::from_utf8(received).unwrap();
    assert_eq!(text.matches("^XA").count(), 3);
    assert_eq!(text.matches("^XZ").count(), 3);
}

#[test]
fn refused_connection_is_a_dispatch_error() {
    let mut job = shiplabel_core::LabelJob::new();
    job.push_label(b"^XA^XZ\n");
    let target = PrinterTarget::new("Dock 9", closed_port().to_string());

    let err = Dispatcher::tcp(fast_config())
        .dispatch(&job, &target)
        .unwrap_err();
    assert_eq!(err.printer, "Dock 9");
    assert!(err.source.is_connect_failure());
    assert!(matches!(err.source, PrintError::ConnectionRefused { .. }));
}

#[test]
fn empty_job_needs_no_printer() {
    let target = PrinterTarget::new("Nowhere", closed_port().to_string());
    let outcome = Dispatcher::tcp(fast_config())
        .dispatch(&shiplabel_core::LabelJob::new(), &target)
        .unwrap();
    assert_eq!(outcome, DispatchOutcome::NothingToPrint);
}

#[test]
fn unresolvable_address_is_reported() {
    let target = PrinterTarget::new("Typo", "not a printer!!!");
    let mut job = shiplabel_core::LabelJob::new();
    job.push_label(b"^XA^XZ\n");
    let err = Dispatcher::tcp(fast_config())
        .dispatch(&job, &target)
        .unwrap_err();
    assert!(matches!(err.source, PrintError::NoAddressFound(_)));
}
