//! Scripted prompt responses for interactive commands

/// Answers a prompt that appears in a command's output stream.
///
/// `pattern` is matched as a literal substring. A responder fires once for
/// every new occurrence of its pattern, so a prompt that is repeated (e.g. a
/// retyped password) is answered again.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Responder {
    pattern: String,
    response: String,
}

impl Responder {
    pub fn new(pattern: impl Into<String>, response: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            response: response.into(),
        }
    }

    /// Respond with `secret` followed by a newline
    pub fn line(pattern: impl Into<String>, secret: &str) -> Self {
        Self::new(pattern, format!("{}\n", secret))
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn response(&self) -> &str {
        &self.response
    }
}

/// Tracks how far each responder has searched an output transcript.
///
/// Matching works on raw bytes, so a multi-byte character split across two
/// reads never shifts the offsets.
#[derive(Debug, Clone)]
pub struct ResponderScript {
    responders: Vec<Responder>,
    /// Where the next search for each responder starts
    offsets: Vec<usize>,
}

impl ResponderScript {
    pub fn new(responders: &[Responder]) -> Self {
        Self {
            responders: responders.to_vec(),
            offsets: vec![0; responders.len()],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.responders.is_empty()
    }

    /// Scan `transcript` (all output seen so far) and return the responses due,
    /// in responder order.
    pub fn feed(&mut self, transcript: &[u8]) -> Vec<&str> {
        let mut due = Vec::new();
        for (responder, offset) in self.responders.iter().zip(self.offsets.iter_mut()) {
            let pattern = responder.pattern().as_bytes();
            if pattern.is_empty() || *offset >= transcript.len() {
                continue;
            }
            match find(&transcript[*offset..], pattern) {
                Some(found) => {
                    *offset += found + pattern.len();
                    due.push(responder.response());
                }
                // only the tail can still start a match
                None => {
                    *offset = (*offset).max(transcript.len().saturating_sub(pattern.len() - 1));
                }
            }
        }
        due
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}
