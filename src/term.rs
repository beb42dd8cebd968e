use console::{style, Color, Term};

/// Where the tagged progress lines go.
#[derive(Debug, Clone)]
pub struct Console {
    term: Option<Term>,
}

impl Console {
    pub fn stdout() -> Self {
        Self {
            term: Some(Term::stdout()),
        }
    }

    pub fn stderr() -> Self {
        Self {
            term: Some(Term::stderr()),
        }
    }

    pub fn silent() -> Self {
        Self { term: None }
    }

    fn line(&self, text: String) {
        if let Some(term) = &self.term {
            // Terminal write errors are ignored.
            let _ = term.write_line(&text);
        }
    }

    /// Writes `label` without a trailing newline so the answer follows it.
    pub fn ask(&self, label: &str) {
        if let Some(term) = &self.term {
            let _ = term.write_str(label);
            let _ = term.flush();
        }
    }

    pub fn blank(&self) {
        self.line(String::new());
    }

    pub fn prompt(&self, msg: &str) {
        self.line(style(format!("[PROMPT] {msg}")).cyan().to_string());
    }

    pub fn info(&self, msg: &str) {
        self.line(style(format!("[INFO] {msg}")).cyan().to_string());
    }

    pub fn success(&self, msg: &str) {
        self.line(style(format!("[INFO] {msg}")).green().to_string());
    }

    pub fn notice(&self, msg: &str) {
        self.line(style(format!("[INFO] {msg}")).yellow().to_string());
    }

    pub fn error(&self, msg: &str) {
        tracing::debug!("{msg}");
        self.line(style(format!("[ERROR] {msg}")).red().to_string());
    }

    pub fn warning(&self, msg: &str) {
        self.line(style(format!("[WARNING] {msg}")).yellow().to_string());
    }

    pub fn skip(&self, msg: &str) {
        self.line(style(format!("[SKIP] {msg}")).black().bright().to_string());
    }

    pub fn file(&self, msg: &str) {
        self.line(style(format!("[FILE] {msg}")).green().to_string());
    }

    pub fn dir(&self, msg: &str) {
        self.line(style(format!("[DIR] {msg}")).blue().to_string());
    }

    pub fn repo(&self, msg: &str) {
        self.line(style(format!("[REPO] {msg}")).magenta().to_string());
    }

    pub fn repo_total(&self, msg: &str) {
        self.line(style(format!("[REPO] {msg}")).cyan().to_string());
    }

    pub fn metrics(&self, msg: &str, color: Color) {
        self.line(style(format!("    [METRICS] {msg}")).fg(color).to_string());
    }

    pub fn summary(&self, msg: &str) {
        self.line(style(format!("[SUMMARY] {msg}")).magenta().to_string());
    }

    pub fn colored(&self, msg: &str, color: Color) {
        self.line(style(msg).fg(color).to_string());
    }
}
