use std::io::{self, Write};

/// TAP (Test Anything Protocol) v14 report, collected first and written
/// once the run is over.
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

    pub fn pass_count(&self) -> usize {
        self.tests.iter().filter(|t| t.ok).count()
    }

    pub fn failure_count(&self) -> usize {
        self.tests.len() - self.pass_count()
    }

    /// Write the report to stdout.
    pub fn finish(self) {
        let stdout = io::stdout();
        // A closed stdout leaves nothing to report to.
        let _ = self.write_to(&mut stdout.lock());
    }

    pub fn write_to<W: Write>(&self, out: &mut W) -> io::Result<()> {
        writeln!(out, "TAP version 14")?;
        writeln!(out, "1..{}", self.tests.len())?;
        for (i, t) in self.tests.iter().enumerate() {
            let status = if t.ok { "ok" } else { "not ok" };
            writeln!(out, "{} {} - {}", status, i + 1, t.desc)?;
            if let Some(diag) = &t.diagnostics {
                for line in diag.lines() {
                    writeln!(out, "  # {}", line)?;
                }
            }
        }
        writeln!(out, "# tests {}", self.tests.len())?;
        writeln!(out, "# pass  {}", self.pass_count())?;
        writeln!(out, "# fail  {}", self.failure_count())?;
        Ok(())
    }
}
