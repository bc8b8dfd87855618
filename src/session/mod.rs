// Session history for the interactive REPL

use crate::compiler::CompileError;

/// What one submitted line produced
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Output(String),
    Error { message: String, internal: bool },
}

/// A submitted line and its result
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    pub input: String,
    pub outcome: Outcome,
}

impl Entry {
    pub fn new(input: impl Into<String>, result: Result<String, CompileError>) -> Self {
        let outcome = match result {
            Ok(output) => Outcome::Output(output),
            Err(err) => Outcome::Error {
                internal: err.is_internal(),
                message: err.to_string(),
            },
        };
        Entry {
            input: input.into(),
            outcome,
        }
    }

    /// Transcript lines for this entry: the prompt echo, then the result
    pub fn transcript_lines(&self) -> Vec<String> {
        let mut lines = vec![format!("> {}", self.input)];
        match &self.outcome {
            Outcome::Output(output) => {
                let mut rendered = output.lines();
                lines.push(format!("Output: {}", rendered.next().unwrap_or_default()));
                lines.extend(rendered.map(|line| format!("        {}", line)));
            }
            Outcome::Error { message, .. } => lines.push(format!("Error: {}", message)),
        }
        lines
    }
}

/// Bounded list of entries plus an up/down recall cursor
#[derive(Debug)]
pub struct History {
    entries: Vec<Entry>,
    limit: usize,
    /// Index of the entry currently recalled into the input line
    recall: Option<usize>,
}

impl History {
    pub fn new(limit: usize) -> Self {
        History {
            entries: Vec::new(),
            limit,
            recall: None,
        }
    }

    /// Add an entry, dropping the oldest past the limit
    pub fn push(&mut self, entry: Entry) {
        self.entries.push(entry);
        if self.entries.len() > self.limit {
            let excess = self.entries.len() - self.limit;
            self.entries.drain(..excess);
        }
        self.recall = None;
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Step the recall cursor one entry older
    pub fn recall_previous(&mut self) -> Option<&str> {
        let index = match self.recall {
            None => self.entries.len().checked_sub(1)?,
            Some(0) => 0,
            Some(i) => i - 1,
        };
        self.recall = Some(index);
        self.entries.get(index).map(|e| e.input.as_str())
    }

    /// Step the recall cursor one entry newer; `None` once past the newest
    pub fn recall_next(&mut self) -> Option<&str> {
        let index = self.recall? + 1;
        if index >= self.entries.len() {
            self.recall = None;
            return None;
        }
        self.recall = Some(index);
        self.entries.get(index).map(|e| e.input.as_str())
    }

    pub fn reset_recall(&mut self) {
        self.recall = None;
    }
}
