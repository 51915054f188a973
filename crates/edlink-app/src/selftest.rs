//! Built-in self-test (`--run-tests`)
//!
//! Checks the URI decoder against a fixed table, then opens a scratch file in
//! every registered editor so the user can eyeball the cursor position.

use std::io::{BufRead, Write};

use edlink_core::prelude::*;
use edlink_core::parse_uri;
use edlink_launch::{Notifier, ProcessLauncher};

use crate::editor::{Dispatcher, EditorRegistry};

/// Line the smoke test asks every editor to jump to
const FOCUS_LINE: u32 = 3;

const SMOKE_TEST_CONTENT: &str = "line 1
line 2
line 3 ---- THIS LINE SHOULD BE IN FOCUS!
line 4";

/// One decoder check: a URI and its expected path/line, or `None` for a URI
/// that must be rejected.
#[derive(Debug, Clone, Copy)]
pub struct ParseCase {
    pub uri: &'static str,
    pub expected: Option<(&'static str, Option<u32>)>,
}

pub const PARSE_CASES: &[ParseCase] = &[
    ParseCase {
        uri: "editor:///path/to/file",
        expected: Some(("/path/to/file", None)),
    },
    ParseCase {
        uri: "editor:///path/with spaces",
        expected: Some(("/path/with spaces", None)),
    },
    ParseCase {
        uri: "editor:///path/url%20encoded",
        expected: Some(("/path/url encoded", None)),
    },
    ParseCase {
        uri: "editor:///path/to/file:10",
        expected: Some(("/path/to/file", Some(10))),
    },
    ParseCase {
        uri: "editor:///path/to/file?line=10",
        expected: Some(("/path/to/file", Some(10))),
    },
    ParseCase {
        uri: "editor:///path/to/file:oops/and:more",
        expected: Some(("/path/to/file:oops/and:more", None)),
    },
    ParseCase {
        uri: "badmime://whatever",
        expected: None,
    },
];

/// A decoder check that did not produce the expected outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaseFailure {
    pub uri: String,
    pub reason: String,
}

/// Run every entry of [`PARSE_CASES`], returning the ones that failed.
pub fn check_parse_cases() -> Vec<CaseFailure> {
    PARSE_CASES.iter().filter_map(check_case).collect()
}

fn check_case(case: &ParseCase) -> Option<CaseFailure> {
    let failure = |reason: String| {
        Some(CaseFailure {
            uri: case.uri.to_string(),
            reason,
        })
    };

    match (parse_uri(case.uri), case.expected) {
        (Ok(target), Some((path, line))) if target.path == path && target.line == line => None,
        (Ok(target), Some((path, line))) => failure(format!(
            "expected ({:?}, {:?}), got ({:?}, {:?})",
            path, line, target.path, target.line
        )),
        (Ok(target), None) => failure(format!("expected an error, got {:?}", target)),
        (Err(Error::InvalidScheme { .. }), None) => None,
        (Err(e), _) => failure(format!("unexpected error: {}", e)),
    }
}

/// Run the full self-test, writing a report to `out`.
///
/// When the decoder checks pass, a scratch file is opened at line 3 in every
/// registered editor and the function waits for a line on `input` before
/// removing it.
pub fn run_self_test<L, N, R, W>(
    registry: &EditorRegistry,
    launcher: &L,
    notifier: &N,
    input: &mut R,
    out: &mut W,
) -> Result<()>
where
    L: ProcessLauncher + ?Sized,
    N: Notifier + ?Sized,
    R: BufRead,
    W: Write,
{
    let failures = check_parse_cases();
    for case in PARSE_CASES {
        let status = match failures.iter().find(|f| f.uri == case.uri) {
            Some(f) => format!("FAIL ({})", f.reason),
            None => "ok".to_string(),
        };
        writeln!(out, "parse {} ... {}", case.uri, status)?;
    }
    if !failures.is_empty() {
        return Err(Error::SelfTestFailed {
            failures: failures.len(),
        });
    }

    let scratch = tempfile::Builder::new()
        .prefix("edlink-selftest")
        .tempdir()
        .context("Failed to create scratch directory")?;
    let file = scratch.path().join("some file.org");
    std::fs::write(&file, SMOKE_TEST_CONTENT)?;
    let uri = format!("editor://{}:{}", file.display(), FOCUS_LINE);

    let dispatcher = Dispatcher::new(registry, launcher, notifier);
    let mut launch_failures = 0;
    for spec in registry.iter() {
        match dispatcher.open_uri(&uri, &spec.name) {
            Ok(result) => writeln!(out, "open with {} ... ok ({})", spec.name, result.command)?,
            Err(e) => {
                launch_failures += 1;
                warn!("Self-test launch with {} failed: {}", spec.name, e);
                writeln!(out, "open with {} ... FAIL ({})", spec.name, e)?;
            }
        }
    }

    write!(out, "Press enter when ready")?;
    out.flush()?;
    let mut line = String::new();
    input.read_line(&mut line)?;

    if launch_failures > 0 {
        return Err(Error::SelfTestFailed {
            failures: launch_failures,
        });
    }
    Ok(())
}
