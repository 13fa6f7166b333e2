//! Template path table and fallback resolution
//!
//! Everything here is pure: deciding which template directory to use never
//! touches the filesystem. The assembler checks which candidates exist.

use crate::compat::Layer;
use std::collections::HashMap;

/// Template directories of one stack
#[derive(Debug, Clone, Default)]
pub struct StackPaths {
    options: HashMap<String, String>,
    default: Option<String>,
}

impl StackPaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Template for a specific secondary option (CSS framework or database)
    pub fn option(mut self, name: impl Into<String>, path: impl Into<String>) -> Self {
        self.options.insert(name.into(), path.into());
        self
    }

    /// Template used when the option has none of its own
    pub fn default_path(mut self, path: impl Into<String>) -> Self {
        self.default = Some(path.into());
        self
    }

    pub fn get(&self, option: &str) -> Option<&str> {
        self.options.get(option).map(String::as_str)
    }

    pub fn default_template(&self) -> Option<&str> {
        self.default.as_deref()
    }
}

/// Stack name -> template directories, for one layer
#[derive(Debug, Clone, Default)]
pub struct LayerPaths {
    stacks: HashMap<String, StackPaths>,
}

impl LayerPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stack(mut self, name: impl Into<String>, paths: StackPaths) -> Self {
        self.stacks.insert(name.into(), paths);
        self
    }

    pub fn get(&self, stack: &str) -> Option<&StackPaths> {
        self.stacks.get(stack)
    }
}

#[derive(Debug, Clone, Default)]
pub struct TemplatePaths {
    pub frontend: LayerPaths,
    pub backend: LayerPaths,
}

impl TemplatePaths {
    /// Layout of the published template repository
    pub fn builtin() -> Self {
        Self {
            frontend: LayerPaths::new()
                .stack(
                    "React",
                    StackPaths::new()
                        .option("Tailwind CSS", "templates/frontend/react/tailwind")
                        .option("Bootstrap", "templates/frontend/react/bootstrap")
                        .default_path("templates/frontend/react/scss"),
                )
                .stack(
                    "Vue",
                    StackPaths::new()
                        .option("Tailwind CSS", "templates/frontend/vue/tailwind")
                        .option("Bootstrap", "templates/frontend/vue/bootstrap")
                        .default_path("templates/frontend/vue/scss"),
                ),
            backend: LayerPaths::new()
                .stack(
                    "Express.js",
                    StackPaths::new()
                        .option("MongoDB", "templates/backend/express/mongodb")
                        .option("PostgreSQL", "templates/backend/express/postgresql")
                        .option("MySQL", "templates/backend/express/mysql")
                        .default_path("templates/backend/express/mongodb"),
                )
                .stack(
                    "Django",
                    StackPaths::new()
                        .option("PostgreSQL", "templates/backend/django/postgresql")
                        .option("MySQL", "templates/backend/django/mysql")
                        .default_path("templates/backend/django/postgresql"),
                ),
        }
    }

    pub fn layer(&self, layer: Layer) -> &LayerPaths {
        match layer {
            Layer::Frontend => &self.frontend,
            Layer::Backend => &self.backend,
        }
    }
}

/// Template path for `stack` + `option`, falling back to the stack default.
///
/// `None` means there is no template at all and the caller should create an
/// empty directory.
pub fn resolve<'a>(paths: &'a LayerPaths, stack: &str, option: &str) -> Option<&'a str> {
    let stack_paths = paths.get(stack)?;
    stack_paths.get(option).or_else(|| stack_paths.default_template())
}

/// The stack-level default template
pub fn fallback<'a>(paths: &'a LayerPaths, stack: &str) -> Option<&'a str> {
    paths.get(stack)?.default_template()
}

/// Ordered paths to try: the resolved path, then the stack default if different
pub fn candidates<'a>(paths: &'a LayerPaths, stack: &str, option: &str) -> Vec<&'a str> {
    let mut chain = Vec::with_capacity(2);
    if let Some(resolved) = resolve(paths, stack, option) {
        chain.push(resolved);
    }
    if let Some(default) = fallback(paths, stack) {
        if !chain.contains(&default) {
            chain.push(default);
        }
    }
    chain
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compat::CompatibilityMatrix;

    #[test]
    fn test_specific_path_wins() {
        let paths = TemplatePaths::builtin();
        assert_eq!(
            resolve(&paths.frontend, "React", "Bootstrap"),
            Some("templates/frontend/react/bootstrap")
        );
    }

    #[test]
    fn test_unknown_option_falls_back_to_default() {
        let paths = TemplatePaths::builtin();
        assert_eq!(
            resolve(&paths.backend, "Django", "nonexistent-option"),
            Some("templates/backend/django/postgresql")
        );
    }

    #[test]
    fn test_unknown_option_without_default_is_none() {
        let paths = LayerPaths::new().stack(
            "Flask",
            StackPaths::new().option("SQLite", "templates/backend/flask/sqlite"),
        );
        assert_eq!(resolve(&paths, "Flask", "nonexistent-option"), None);
        assert_eq!(resolve(&paths, "Rails", "SQLite"), None);
    }

    #[test]
    fn test_every_compatible_option_resolves() {
        let matrix = CompatibilityMatrix::builtin().unwrap();
        let paths = TemplatePaths::builtin();

        for layer in Layer::ALL {
            let category = matrix.category(layer);
            for stack in &category.stacks {
                for option in category.compatible_options(stack) {
                    assert!(
                        resolve(paths.layer(layer), stack, option).is_some(),
                        "{} {} + {} has no template",
                        layer,
                        stack,
                        option
                    );
                }
            }
        }
    }

    #[test]
    fn test_candidates_chain() {
        let paths = TemplatePaths::builtin();
        assert_eq!(
            candidates(&paths.frontend, "Vue", "Bootstrap"),
            vec!["templates/frontend/vue/bootstrap", "templates/frontend/vue/scss"]
        );
        // Resolved path already is the default, so it is not repeated
        assert_eq!(
            candidates(&paths.backend, "Express.js", "MongoDB"),
            vec!["templates/backend/express/mongodb"]
        );
        assert!(candidates(&paths.backend, "Rails", "MongoDB").is_empty());
    }
}
