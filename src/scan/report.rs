use crate::classify::{display_category, Category};
use crate::error::Result;
use crate::model::{AggregationResult, ExtensionTally};
use crate::term::Console;
use console::Color;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Appends per-repository blocks to the summary file and prints the overall tally.
pub struct Reporter<'a> {
    output: PathBuf,
    console: &'a Console,
}

impl<'a> Reporter<'a> {
    pub fn new<P: AsRef<Path>>(output: P, console: &'a Console) -> Self {
        Self {
            output: output.as_ref().to_path_buf(),
            console,
        }
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Never truncates; the file is created on first use.
    pub fn record_repository(&self, name: &str, result: &AggregationResult) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.output)?;
        file.write_all(format_repository_block(name, result).as_bytes())?;
        Ok(())
    }

    pub fn record_overall(&self, tally: &ExtensionTally, repo_count: usize) {
        self.console.blank();
        self.console.summary("Overall File Type Statistics:");
        for (ext, count) in tally.iter() {
            self.console.colored(&format!("{ext}: {count} lines"), Color::Magenta);
        }

        self.console.blank();
        self.console.summary(&format!(
            "Overall File Type Statistics - Repo count: {repo_count}"
        ));
        for (ext, count, category) in categorized(tally) {
            self.console
                .colored(&format!("{ext}: {count} lines ({})", category.label()), category.color());
        }
    }
}

pub fn format_repository_block(name: &str, result: &AggregationResult) -> String {
    let mut block = format!(
        "Repository: {name}\nTotal Lines: {}\nFile Type Statistics:\n",
        result.total_lines
    );
    for (ext, count) in result.tally.iter() {
        block.push_str(&format!("  {ext}: {count} lines\n"));
    }
    block.push('\n');
    block
}

pub fn categorized(tally: &ExtensionTally) -> Vec<(&str, u64, Category)> {
    tally
        .iter()
        .map(|(ext, count)| (ext, count, display_category(ext)))
        .collect()
}
