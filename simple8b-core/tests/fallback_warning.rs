//! A pinned backend the CPU lacks must be reported once, not once per word.

use std::sync::atomic::{AtomicUsize, Ordering};

use log::{Level, LevelFilter, Log, Metadata, Record};
use simple8b_core::{Backend, RUN_LENGTH};

static WARNINGS: AtomicUsize = AtomicUsize::new(0);
static LOGGER: CountingLogger = CountingLogger;

struct CountingLogger;

impl Log for CountingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= Level::Warn
    }

    fn log(&self, record: &Record) {
        if record.level() == Level::Warn {
            WARNINGS.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn flush(&self) {}
}

#[test]
fn test_unsupported_backend_warns_once() {
    log::set_logger(&LOGGER).unwrap();
    log::set_max_level(LevelFilter::Warn);

    let Some(backend) = [Backend::Neon, Backend::Avx2]
        .into_iter()
        .find(|b| !b.is_supported())
    else {
        return;
    };

    let mut dst = [0u64; 15];
    for _ in 0..1000 {
        backend.decode_fixed_4((1u64 << 60) - 1, &mut dst);
    }
    assert_eq!(dst, [15u64; 15]);
    assert_eq!(WARNINGS.load(Ordering::SeqCst), 1);

    // Other kernels on the same backend share the one report
    let mut run = [0u64; RUN_LENGTH];
    let mut bits = [0u64; 60];
    for _ in 0..1000 {
        backend.decode_run(&mut run);
        backend.decode_fixed_1(u64::MAX, &mut bits);
    }
    assert_eq!(run, [1u64; RUN_LENGTH]);
    assert_eq!(bits, [1u64; 60]);
    assert_eq!(WARNINGS.load(Ordering::SeqCst), 1);

    // Supported backends never warn
    let mut dst = [0u64; 15];
    for _ in 0..1000 {
        Backend::Scalar.decode_fixed_4(0, &mut dst);
        Backend::active().decode_fixed_4(0, &mut dst);
    }
    assert_eq!(WARNINGS.load(Ordering::SeqCst), 1);
}
