use std::fmt::Write;

/// TAP (Test Anything Protocol) v14 report.
pub struct Tap {
    tests: Vec<TapTest>,
}

struct TapTest {
    ok: bool,
    desc: String,
    diagnostics: Option<String>,
}

impl Tap {
    pub fn new() -> Self {
        Tap { tests: Vec::new() }
    }

    pub fn ok(&mut self, desc: impl Into<String>) {
        self.tests.push(TapTest {
            ok: true,
            desc: desc.into(),
            diagnostics: None,
        });
    }

    pub fn not_ok(&mut self, desc: impl Into<String>, diagnostics: impl Into<String>) {
        self.tests.push(TapTest {
            ok: false,
            desc: desc.into(),
            diagnostics: Some(diagnostics.into()),
        });
    }

    pub fn failure_count(&self) -> usize {
        self.tests.iter().filter(|t| !t.ok).count()
    }

    pub fn report(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "TAP version 14");
        let _ = writeln!(out, "1..{}", self.tests.len());
        for (i, t) in self.tests.iter().enumerate() {
            let n = i + 1;
            if t.ok {
                let _ = writeln!(out, "ok {} - {}", n, t.desc);
            } else {
                let _ = writeln!(out, "not ok {} - {}", n, t.desc);
                if let Some(diag) = &t.diagnostics {
                    for line in diag.lines() {
                        let _ = writeln!(out, "  # {}", line);
                    }
                }
            }
        }
        let fail = self.failure_count();
        let _ = writeln!(out, "# tests {}", self.tests.len());
        let _ = writeln!(out, "# pass  {}", self.tests.len() - fail);
        let _ = writeln!(out, "# fail  {}", fail);
        out
    }

    /// Print the report to stdout.
    pub fn finish(self) {
        print!("{}", self.report());
    }
}
