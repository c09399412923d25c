use std::{
    fmt::{self, Display},
    path::{Path, PathBuf},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Stage {
    Compile,
    PostProcess,
}

impl Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Compile => f.write_str("compilation"),
            Self::PostProcess => f.write_str("post-processing"),
        }
    }
}

/// Why a single stylesheet didn't make it into the output directory
#[derive(Clone, Debug)]
pub struct Diagnostic {
    pub stage: Stage,
    pub message: String,
}

impl Diagnostic {
    pub(crate) fn new<M>(stage: Stage, message: M) -> Self
    where
        M: Display,
    {
        Self {
            stage,
            message: message.to_string(),
        }
    }
}

impl Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} failed: {}", self.stage, self.message)
    }
}

impl std::error::Error for Diagnostic {}

#[derive(Debug)]
pub enum Outcome {
    Compiled {
        source: PathBuf,
        destination: PathBuf,
    },
    Failed {
        source: PathBuf,
        diagnostic: Diagnostic,
    },
}

impl Outcome {
    #[must_use]
    pub fn source(&self) -> &Path {
        match self {
            Self::Compiled { source, .. } | Self::Failed { source, .. } => source,
        }
    }
}

/// Per-file outcomes of one build, in the order the files were processed
#[derive(Debug, Default)]
pub struct BatchReport {
    outcomes: Vec<Outcome>,
}

impl BatchReport {
    pub(crate) fn push(&mut self, outcome: Outcome) {
        self.outcomes.push(outcome);
    }

    #[must_use]
    pub fn outcomes(&self) -> &[Outcome] {
        &self.outcomes
    }

    pub fn compiled(&self) -> impl Iterator<Item = (&Path, &Path)> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Compiled {
                source,
                destination,
            } => Some((source.as_path(), destination.as_path())),
            Outcome::Failed { .. } => None,
        })
    }

    pub fn failed(&self) -> impl Iterator<Item = (&Path, &Diagnostic)> + '_ {
        self.outcomes.iter().filter_map(|outcome| match outcome {
            Outcome::Failed { source, diagnostic } => Some((source.as_path(), diagnostic)),
            Outcome::Compiled { .. } => None,
        })
    }

    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.failed().next().is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.outcomes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.outcomes.is_empty()
    }
}

impl IntoIterator for BatchReport {
    type Item = Outcome;
    type IntoIter = std::vec::IntoIter<Outcome>;

    fn into_iter(self) -> Self::IntoIter {
        self.outcomes.into_iter()
    }
}
