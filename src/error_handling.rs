use std::path::PathBuf;
use std::fmt::Display;

#[derive(Debug, PartialEq, Clone, Copy)]
pub enum Severity {
    Error,
    Warning
}

impl Severity {
    // ANSI foreground colour used for the location tag
    fn color(&self) -> u8 {
        match self {
            Severity::Error => 31,
            Severity::Warning => 33
        }
    }
}

impl Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Severity::Error => write!(f, "error"),
            Severity::Warning => write!(f, "warning")
        }
    }
}

pub trait DiagnosticKind: Display + PartialEq {
    fn severity(&self) -> Severity;
}

#[derive(Debug, PartialEq, Clone)]
pub struct Location {
    pub file: PathBuf,
    // 1-based, 0 refers to the whole file
    pub line: usize
}

impl Location {
    pub fn whole_file(file: PathBuf) -> Self {
        Location { file, line: 0 }
    }
}

impl Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.line == 0 {
            write!(f, "{}", self.file.display())
        } else {
            write!(f, "{}:{}", self.file.display(), self.line)
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct Diagnostic<T: DiagnosticKind> {
    pub location: Location,
    pub kind: T
}

// `{:#}` renders without colour escapes
impl<T: DiagnosticKind> Display for Diagnostic<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let severity = self.kind.severity();
        if f.alternate() {
            write!(f, "[{}] {}: {}", self.location, severity, self.kind)
        } else {
            write!(
                f,
                "\x1b[{};49;1m[{}]\x1b[39;49;1m  {}: {}\x1b[0m",
                severity.color(), self.location, severity, self.kind
            )
        }
    }
}

pub type Diagnostics<T> = Vec<Diagnostic<T>>;
