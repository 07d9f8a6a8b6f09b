//! Build options
//!
//! Resolves the descriptor's directory fields into the concrete inputs a
//! build needs: template paths, the contexts glob, the destination dir,
//! linking rules, and the normalized globals key.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use glob::{MatchOptions, Pattern};

use super::SiteDescriptor;
use crate::domain::ContextPath;
use crate::plugin::DEFAULT_DATE_FORMAT;

/// Rule patterns match store keys, which always use `/` separators, so a
/// `*` must not cross a directory boundary.
const RULE_MATCH: MatchOptions = MatchOptions {
    case_sensitive: true,
    require_literal_separator: true,
    require_literal_leading_dot: false,
};

/// Maps contexts matching a pattern to the template they render through.
#[derive(Debug, Clone)]
pub struct LinkingRule {
    pub contexts: Pattern,
    pub template: PathBuf,
}

impl LinkingRule {
    /// Tests a store key against the rule's pattern.
    pub fn matches(&self, path: &ContextPath) -> bool {
        self.contexts.matches_with(path.as_str(), RULE_MATCH)
    }
}

/// Fully-resolved inputs for one build.
#[derive(Debug, Clone)]
pub struct BuildOptions {
    /// Template files, post template first.
    pub templates: Vec<PathBuf>,

    /// On-disk glob selecting the context metadata files.
    pub contexts_pattern: String,

    /// Build output directory.
    pub dest: PathBuf,

    /// Linking rules over store keys, in descriptor order.
    pub linking_rules: Vec<LinkingRule>,

    /// Canonical key of the designated global context.
    pub globals: ContextPath,

    /// strftime pattern for the date formatter stage.
    pub date_format: String,
}

impl BuildOptions {
    /// Derives build options from a descriptor rooted at `root`.
    ///
    /// The globals path and the linking-rule pattern are normalized with
    /// the same rules as store keys, so descriptor spellings like
    /// `./metadata/global.json` resolve to the key the loader produces.
    pub fn from_descriptor(root: &Path, descriptor: &SiteDescriptor) -> Result<Self> {
        let theme = root.join(&descriptor.theme);
        let metadata = root.join(&descriptor.metadata);

        let templates = vec![
            theme.join("templates").join("post.tpl"),
            theme.join("templates").join("index.tpl"),
        ];

        let contexts_pattern = metadata.join("*.json").to_string_lossy().into_owned();

        let metadata_key = ContextPath::new(&descriptor.metadata).with_context(|| {
            format!(
                "Invalid metadata directory in descriptor: {}",
                descriptor.metadata.display()
            )
        })?;
        let rule_pattern = Pattern::new(&format!("{metadata_key}/*.json")).with_context(|| {
            format!(
                "Invalid contexts pattern for metadata directory: {}",
                descriptor.metadata.display()
            )
        })?;
        let linking_rules = vec![LinkingRule {
            contexts: rule_pattern,
            template: theme.join("templates").join("post.tpl"),
        }];

        let globals = ContextPath::new(&descriptor.globals).with_context(|| {
            format!(
                "Invalid globals path in descriptor: {}",
                descriptor.globals.display()
            )
        })?;

        let date_format = descriptor
            .date_format
            .clone()
            .unwrap_or_else(|| DEFAULT_DATE_FORMAT.to_string());

        Ok(Self {
            templates,
            contexts_pattern,
            dest: root.join(&descriptor.build),
            linking_rules,
            globals,
            date_format,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor(date_format: Option<&str>) -> SiteDescriptor {
        SiteDescriptor {
            theme: PathBuf::from("theme"),
            metadata: PathBuf::from("metadata"),
            build: PathBuf::from("build"),
            globals: PathBuf::from("metadata/global.json"),
            date_format: date_format.map(String::from),
        }
    }

    #[test]
    fn resolves_paths_against_the_root() {
        let options =
            BuildOptions::from_descriptor(Path::new("/srv/site"), &descriptor(None)).unwrap();

        assert_eq!(
            options.templates,
            [
                PathBuf::from("/srv/site/theme/templates/post.tpl"),
                PathBuf::from("/srv/site/theme/templates/index.tpl"),
            ]
        );
        assert_eq!(options.contexts_pattern, "/srv/site/metadata/*.json");
        assert_eq!(options.dest, PathBuf::from("/srv/site/build"));
        assert_eq!(options.globals.as_str(), "metadata/global.json");
    }

    #[test]
    fn missing_date_format_falls_back_to_default() {
        let options =
            BuildOptions::from_descriptor(Path::new("/srv/site"), &descriptor(None)).unwrap();
        assert_eq!(options.date_format, DEFAULT_DATE_FORMAT);
    }

    #[test]
    fn descriptor_date_format_wins() {
        let options =
            BuildOptions::from_descriptor(Path::new("/srv/site"), &descriptor(Some("%Y")))
                .unwrap();
        assert_eq!(options.date_format, "%Y");
    }

    #[test]
    fn linking_rule_targets_the_post_template() {
        let options =
            BuildOptions::from_descriptor(Path::new("/srv/site"), &descriptor(None)).unwrap();

        assert_eq!(options.linking_rules.len(), 1);
        assert_eq!(
            options.linking_rules[0].template,
            PathBuf::from("/srv/site/theme/templates/post.tpl")
        );
    }

    #[test]
    fn linking_rule_matches_direct_children_only() {
        let options =
            BuildOptions::from_descriptor(Path::new("/srv/site"), &descriptor(None)).unwrap();
        let rule = &options.linking_rules[0];

        assert!(rule.matches(&"metadata/post.json".parse().unwrap()));
        assert!(!rule.matches(&"metadata/drafts/post.json".parse().unwrap()));
        assert!(!rule.matches(&"theme/post.json".parse().unwrap()));
    }

    #[test]
    fn dotted_descriptor_paths_normalize() {
        let mut desc = descriptor(None);
        desc.metadata = PathBuf::from("./metadata");
        desc.globals = PathBuf::from("./metadata/./global.json");

        let options = BuildOptions::from_descriptor(Path::new("/srv/site"), &desc).unwrap();

        assert_eq!(options.globals.as_str(), "metadata/global.json");
        assert!(options.linking_rules[0].matches(&"metadata/post.json".parse().unwrap()));
    }

    #[test]
    fn globals_outside_the_root_is_rejected() {
        let mut desc = descriptor(None);
        desc.globals = PathBuf::from("../elsewhere/global.json");

        let err = BuildOptions::from_descriptor(Path::new("/srv/site"), &desc).unwrap_err();
        assert!(err.to_string().contains("Invalid globals path"));
    }
}
