use console::Color;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Stylesheet,
    Markup,
    Script,
    Component,
    Shell,
    Other,
}

impl Category {
    pub fn color(self) -> Color {
        match self {
            Category::Stylesheet => Color::Cyan,
            Category::Markup => Color::Red,
            Category::Script => Color::Yellow,
            Category::Component => Color::Green,
            Category::Shell => Color::Blue,
            Category::Other => Color::White,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Stylesheet => "stylesheet",
            Category::Markup => "markup",
            Category::Script => "script",
            Category::Component => "component",
            Category::Shell => "shell",
            Category::Other => "other",
        }
    }
}

/// Everything not listed here is skipped without being fetched.
const ALLOWED: &[(&str, Category)] = &[
    ("css", Category::Stylesheet),
    ("sass", Category::Stylesheet),
    ("scss", Category::Stylesheet),
    ("html", Category::Markup),
    ("htm", Category::Markup),
    ("ejs", Category::Markup),
    ("astro", Category::Markup),
    ("js", Category::Script),
    ("jsx", Category::Script),
    ("ts", Category::Script),
    ("tsx", Category::Script),
    ("vue", Category::Component),
    ("svelte", Category::Component),
    ("py", Category::Shell),
    ("ps1", Category::Shell),
    ("sh", Category::Shell),
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    Counted { extension: String, category: Category },
    Skipped { extension: Option<String> },
}

pub fn extension_of(file_name: &str) -> Option<String> {
    file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
}

pub fn category_of(extension: &str) -> Option<Category> {
    ALLOWED
        .iter()
        .find(|(ext, _)| *ext == extension)
        .map(|(_, category)| *category)
}

pub fn display_category(extension: &str) -> Category {
    category_of(extension).unwrap_or(Category::Other)
}

pub fn classify(file_name: &str) -> Classification {
    let extension = extension_of(file_name);
    match extension.as_deref().and_then(category_of) {
        Some(category) => Classification::Counted {
            extension: extension.unwrap_or_default(),
            category,
        },
        None => Classification::Skipped { extension },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_text_after_last_dot() {
        assert_eq!(extension_of("a.tar.gz").as_deref(), Some("gz"));
        assert_eq!(extension_of("Main.PY").as_deref(), Some("py"));
        assert_eq!(extension_of(".eslintrc").as_deref(), Some("eslintrc"));
        assert_eq!(extension_of("Makefile"), None);
        assert_eq!(extension_of("trailing.").as_deref(), Some(""));
    }

    #[test]
    fn allow_listed_files_are_counted() {
        assert_eq!(
            classify("index.tsx"),
            Classification::Counted {
                extension: "tsx".into(),
                category: Category::Script
            }
        );
        assert_eq!(
            classify("STYLE.SCSS"),
            Classification::Counted {
                extension: "scss".into(),
                category: Category::Stylesheet
            }
        );
    }

    #[test]
    fn missing_and_unknown_extensions_both_skip() {
        assert_eq!(classify("LICENSE"), Classification::Skipped { extension: None });
        assert_eq!(
            classify("logo.png"),
            Classification::Skipped {
                extension: Some("png".into())
            }
        );
    }

    #[test]
    fn unknown_extensions_fall_back_to_other() {
        assert_eq!(display_category("rs"), Category::Other);
        assert_eq!(display_category("vue"), Category::Component);
        assert_eq!(Category::Other.color(), Color::White);
    }

    #[test]
    fn allow_list_has_sixteen_entries() {
        assert_eq!(ALLOWED.len(), 16);
        assert!(ALLOWED.iter().all(|(ext, _)| category_of(ext).is_some()));
    }
}
