use std::error::Error as StdError;
use std::fmt;
use std::path::{Path, PathBuf};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorKind {
    Internal,
    Usage,
    InvalidPayload,
    MarkerResolution,
    Io,
}

/// Which search step of a locate operation failed to resolve.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum LookupStage {
    StartMarker,
    OpeningToken,
    EndMarker,
    ClosingToken,
}

impl LookupStage {
    pub fn as_str(self) -> &'static str {
        match self {
            LookupStage::StartMarker => "start-marker",
            LookupStage::OpeningToken => "opening-token",
            LookupStage::EndMarker => "end-marker",
            LookupStage::ClosingToken => "closing-token",
        }
    }
}

#[derive(Debug)]
pub struct Error {
    kind: ErrorKind,
    message: Option<String>,
    hint: Option<String>,
    path: Option<PathBuf>,
    marker: Option<String>,
    stage: Option<LookupStage>,
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl Error {
    pub fn new(kind: ErrorKind) -> Self {
        Self {
            kind,
            message: None,
            hint: None,
            path: None,
            marker: None,
            stage: None,
            source: None,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    pub fn hint(&self) -> Option<&str> {
        self.hint.as_deref()
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn marker(&self) -> Option<&str> {
        self.marker.as_deref()
    }

    pub fn stage(&self) -> Option<LookupStage> {
        self.stage
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_marker(mut self, marker: impl Into<String>) -> Self {
        self.marker = Some(marker.into());
        self
    }

    pub fn with_stage(mut self, stage: LookupStage) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_source(mut self, source: impl StdError + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.kind)?;
        if let Some(message) = &self.message {
            write!(f, ": {message}")?;
        }
        if let Some(marker) = &self.marker {
            write!(f, " (marker: {marker})")?;
        }
        if let Some(stage) = self.stage {
            write!(f, " (stage: {})", stage.as_str())?;
        }
        if let Some(path) = &self.path {
            write!(f, " (path: {})", path.display())?;
        }
        Ok(())
    }
}

impl StdError for Error {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn StdError + 'static))
    }
}

pub fn to_exit_code(kind: ErrorKind) -> i32 {
    match kind {
        ErrorKind::Internal => 1,
        ErrorKind::Usage => 2,
        ErrorKind::InvalidPayload => 3,
        ErrorKind::MarkerResolution => 4,
        ErrorKind::Io => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::{Error, ErrorKind, LookupStage, to_exit_code};

    #[test]
    fn exit_code_mapping_is_stable() {
        let cases = [
            (ErrorKind::Internal, 1),
            (ErrorKind::Usage, 2),
            (ErrorKind::InvalidPayload, 3),
            (ErrorKind::MarkerResolution, 4),
            (ErrorKind::Io, 5),
        ];
        for (kind, code) in cases {
            assert_eq!(to_exit_code(kind), code);
        }
    }

    #[test]
    fn display_includes_marker_and_stage() {
        let err = Error::new(ErrorKind::MarkerResolution)
            .with_message("start marker not found in template")
            .with_marker("runSummary")
            .with_stage(LookupStage::StartMarker);
        let text = err.to_string();
        assert!(text.contains("MarkerResolution"));
        assert!(text.contains("start marker not found"));
        assert!(text.contains("(marker: runSummary)"));
        assert!(text.contains("(stage: start-marker)"));
    }
}
