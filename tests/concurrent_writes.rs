#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::{fs, sync::Arc, thread};

use rustylog::log::{LogLevel, Logger};

const PER_THREAD: usize = 1_000;

fn is_well_formed(line: &str, expected_level: &str) -> bool {
    let mut parts = line.splitn(4, ' ');
    let (Some(date), Some(time), Some(level), Some(body)) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return false;
    };
    date.len() == 10
        && time.len() == 8
        && level == expected_level
        && body.starts_with("thread=")
        && body.split(' ').count() == 2
}

#[test]
fn two_threads_produce_exactly_two_thousand_whole_lines() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("concurrent.log");
    let logger = Arc::new(Logger::init(path.to_str().unwrap()).unwrap());
    assert_eq!(logger.level(), LogLevel::All);

    let handles: Vec<_> = ["a", "b"]
        .into_iter()
        .map(|name| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for n in 0..PER_THREAD {
                    logger.info(format_args!("thread={name} seq={n}"));
                }
            })
        })
        .collect();
    for h in handles {
        h.join().unwrap();
    }

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<_> = text.lines().collect();
    assert_eq!(lines.len(), 2 * PER_THREAD);
    assert!(text.ends_with('\n'));

    for line in &lines {
        assert!(is_well_formed(line, "INFO"), "torn line: {line:?}");
    }

    // Each thread's own lines keep their order.
    for name in ["a", "b"] {
        let tag = format!("thread={name} ");
        let seqs: Vec<usize> = lines
            .iter()
            .filter_map(|l| l.split_once(&tag))
            .map(|(_, rest)| rest.trim_start_matches("seq=").parse().unwrap())
            .collect();
        assert_eq!(seqs, (0..PER_THREAD).collect::<Vec<_>>());
    }
}

#[test]
fn threshold_changes_race_safely_with_emits() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("racing.log");
    let logger = Arc::new(Logger::init(path.to_str().unwrap()).unwrap());

    let writer = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..PER_THREAD {
                logger.warn(format_args!("thread=w seq={n}"));
            }
        })
    };
    let toggler = {
        let logger = Arc::clone(&logger);
        thread::spawn(move || {
            for n in 0..PER_THREAD {
                let level = if n % 2 == 0 { LogLevel::Error } else { LogLevel::All };
                logger.set_level(level);
            }
            logger.set_level(LogLevel::All);
        })
    };
    writer.join().unwrap();
    toggler.join().unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert!(text.lines().count() <= PER_THREAD);
    for line in text.lines() {
        assert!(is_well_formed(line, "WARN"), "torn line: {line:?}");
    }
}
